//! Swept cylinder around the z axis.

use super::{azimuth, frame, nearest_root, Shape3};
use crate::{Identified, SurfaceIntersection3, EPSILON};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{Angle, Point2, Point3, Ray3, Vec3};
use rtgeo_solve::solve_quadratic;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Open cylinder `x^2 + y^2 = radius^2`, clipped to `z_min..=z_max` and
/// swept from azimuth 0 to `phi_max`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cylinder3 {
    /// Sweep angle.
    pub phi_max: Angle,
    /// Cylinder radius.
    pub radius: f64,
    /// Lower clip height.
    pub z_min: f64,
    /// Upper clip height.
    pub z_max: f64,
}

impl Cylinder3 {
    /// Create a cylinder. The clip heights may be given in either order.
    pub fn new(phi_max: Angle, radius: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            phi_max,
            radius,
            z_min: z_min.min(z_max),
            z_max: z_min.max(z_max),
        }
    }

    fn in_range(&self, p: &Point3) -> bool {
        p.z >= self.z_min && p.z <= self.z_max && azimuth(p.x, p.y) <= self.phi_max.radians()
    }
}

impl Identified for Cylinder3 {
    const ID: i32 = 3;
    const NAME: &'static str = "Cylinder";
}

impl Shape3 for Cylinder3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        Aabb3::new(
            Point3::new(-self.radius, -self.radius, self.z_min),
            Point3::new(self.radius, self.radius, self.z_max),
        )
        .into()
    }

    fn contains(&self, point: &Point3) -> bool {
        (point.x.hypot(point.y) - self.radius).abs() <= EPSILON && self.in_range(point)
    }

    fn surface_area(&self) -> f64 {
        (self.z_max - self.z_min) * self.radius * self.phi_max.radians()
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let o = ray.origin();
        let d = ray.direction();
        let roots = solve_quadratic(
            d.x * d.x + d.y * d.y,
            2.0 * (d.x * o.x + d.y * o.y),
            o.x * o.x + o.y * o.y - self.radius * self.radius,
        );
        nearest_root(roots, t_min, t_max, |t| self.in_range(&ray.at(t)))
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let p = ray.at(t);
        let phi_max = self.phi_max.radians();
        let u = azimuth(p.x, p.y) / phi_max;
        let v = (p.z - self.z_min) / (self.z_max - self.z_min);
        let dpdu = Vec3::new(-phi_max * p.y, phi_max * p.x, 0.0);
        let normal = Vec3::new(p.x, p.y, 0.0);
        SurfaceIntersection3::new(self, *ray, t, frame(normal, dpdu), Point2::new(u, v))
    }
}
