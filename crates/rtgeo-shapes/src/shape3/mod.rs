//! 3D primitives and their intersection contract.

mod cone;
mod cuboid;
mod curve;
mod cylinder;
mod disk;
mod hyperboloid;
mod paraboloid;
mod plane;
mod polygon;
mod sphere;
mod torus;
mod triangle;

pub use cone::Cone3;
pub use cuboid::RectangularCuboid3;
pub use curve::Curve3;
pub use cylinder::Cylinder3;
pub use disk::Disk3;
pub use hyperboloid::Hyperboloid3;
pub use paraboloid::Paraboloid3;
pub use plane::Plane3;
pub use polygon::Polygon3;
pub use sphere::Sphere3;
pub use torus::Torus3;
pub use triangle::{Triangle3, Vertex3};

use crate::SurfaceIntersection3;
use rtgeo_bounds::BoundingVolume3;
use rtgeo_math::{Dir3, OrthonormalBasis, Point3, Ray3, Vec3};
use std::f64::consts::PI;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A primitive that rays can hit in 3D.
///
/// Queries are pure: no method mutates the shape, and the same inputs always
/// produce the same answer.
pub trait Shape3: fmt::Debug + Send + Sync {
    /// Type id, as written by the codec.
    fn id(&self) -> i32;

    /// Type name.
    fn name(&self) -> &'static str;

    /// A volume enclosing the whole primitive.
    fn bounding_volume(&self) -> BoundingVolume3;

    /// Whether `point` lies on (or, for closed solids, inside) the primitive.
    fn contains(&self, point: &Point3) -> bool;

    /// Area of the primitive's surface.
    fn surface_area(&self) -> f64;

    /// Enclosed volume; zero for open surfaces.
    fn volume(&self) -> f64 {
        0.0
    }

    /// Ray parameter of the nearest hit with `t_min < t < t_max`, or NaN.
    ///
    /// This is the cheap query: it builds no frame, which is all shadow and
    /// occlusion tests need.
    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64;

    /// Build the surface record for a hit at `t`.
    ///
    /// `t` must come from [`Shape3::intersection_t`] on the same ray.
    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_>;

    /// The nearest hit inside the window, with its differential frame.
    fn intersection(&self, ray: &Ray3, t_min: f64, t_max: f64) -> Option<SurfaceIntersection3<'_>> {
        let t = self.intersection_t(ray, t_min, t_max);
        if t.is_nan() {
            None
        } else {
            Some(self.surface_at(ray, t))
        }
    }

    /// Whether the ray hits the primitive inside the window.
    fn intersects(&self, ray: &Ray3, t_min: f64, t_max: f64) -> bool {
        !self.intersection_t(ray, t_min, t_max).is_nan()
    }
}

/// The closed family of 3D primitives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive3 {
    /// Sphere.
    Sphere(Sphere3),
    /// Torus around the z axis.
    Torus(Torus3),
    /// Swept cylinder.
    Cylinder(Cylinder3),
    /// Swept cone.
    Cone(Cone3),
    /// Swept paraboloid.
    Paraboloid(Paraboloid3),
    /// Swept hyperboloid.
    Hyperboloid(Hyperboloid3),
    /// Swept annulus in the z = 0 plane.
    Disk(Disk3),
    /// Infinite plane.
    Plane(Plane3),
    /// Axis-aligned box.
    RectangularCuboid(RectangularCuboid3),
    /// Triangle with per-vertex attributes.
    Triangle(Triangle3),
    /// Planar polygon.
    Polygon(Polygon3),
    /// Bézier ribbon.
    Curve(Curve3),
}

impl Primitive3 {
    fn as_dyn(&self) -> &dyn Shape3 {
        match self {
            Primitive3::Sphere(s) => s,
            Primitive3::Torus(s) => s,
            Primitive3::Cylinder(s) => s,
            Primitive3::Cone(s) => s,
            Primitive3::Paraboloid(s) => s,
            Primitive3::Hyperboloid(s) => s,
            Primitive3::Disk(s) => s,
            Primitive3::Plane(s) => s,
            Primitive3::RectangularCuboid(s) => s,
            Primitive3::Triangle(s) => s,
            Primitive3::Polygon(s) => s,
            Primitive3::Curve(s) => s,
        }
    }
}

impl Shape3 for Primitive3 {
    fn id(&self) -> i32 {
        self.as_dyn().id()
    }

    fn name(&self) -> &'static str {
        self.as_dyn().name()
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        self.as_dyn().bounding_volume()
    }

    fn contains(&self, point: &Point3) -> bool {
        self.as_dyn().contains(point)
    }

    fn surface_area(&self) -> f64 {
        self.as_dyn().surface_area()
    }

    fn volume(&self) -> f64 {
        self.as_dyn().volume()
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        self.as_dyn().intersection_t(ray, t_min, t_max)
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        self.as_dyn().surface_at(ray, t)
    }

    fn intersection(&self, ray: &Ray3, t_min: f64, t_max: f64) -> Option<SurfaceIntersection3<'_>> {
        self.as_dyn().intersection(ray, t_min, t_max)
    }
}

macro_rules! impl_from_primitive3 {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Primitive3 {
                fn from(shape: $ty) -> Self {
                    Primitive3::$variant(shape)
                }
            }
        )*
    };
}

impl_from_primitive3!(
    Sphere(Sphere3),
    Torus(Torus3),
    Cylinder(Cylinder3),
    Cone(Cone3),
    Paraboloid(Paraboloid3),
    Hyperboloid(Hyperboloid3),
    Disk(Disk3),
    Plane(Plane3),
    RectangularCuboid(RectangularCuboid3),
    Triangle(Triangle3),
    Polygon(Polygon3),
    Curve(Curve3),
);

/// Azimuth of `(x, y)` around the z axis, in `[0, 2π)`.
pub(crate) fn azimuth(x: f64, y: f64) -> f64 {
    let phi = y.atan2(x);
    if phi < 0.0 {
        phi + 2.0 * PI
    } else {
        phi
    }
}

/// The smaller quadratic root inside the window that `accept` keeps, else
/// the larger one, else NaN.
///
/// Swept quadrics clip by z and azimuth after root finding, so a rejected
/// near root must fall through to the far one.
pub(crate) fn nearest_root(roots: [f64; 2], t_min: f64, t_max: f64, mut accept: impl FnMut(f64) -> bool) -> f64 {
    let [r0, r1] = roots;
    let ordered = if r1 < r0 { [r1, r0] } else { [r0, r1] };
    ordered
        .into_iter()
        .find(|&t| t > t_min && t < t_max && accept(t))
        .unwrap_or(f64::NAN)
}

/// Frame around an (unnormalized) outward normal with `u` along `dpdu`.
pub(crate) fn frame(normal: Vec3, dpdu: Vec3) -> OrthonormalBasis {
    OrthonormalBasis::from_w_u(&Dir3::new_normalize(normal), &dpdu)
}
