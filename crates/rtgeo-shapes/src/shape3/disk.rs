//! Swept annulus in the z = 0 plane.

use super::{azimuth, frame, Shape3};
use crate::{Identified, SurfaceIntersection3, EPSILON};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{Angle, Point2, Point3, Ray3, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Annulus `radius_inner <= r <= radius_outer` at z = 0, facing +z, swept
/// from azimuth 0 to `phi_max`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Disk3 {
    /// Sweep angle.
    pub phi_max: Angle,
    /// Hole radius; zero for a full disk.
    pub radius_inner: f64,
    /// Rim radius.
    pub radius_outer: f64,
}

impl Disk3 {
    /// Create an annulus.
    pub fn new(phi_max: Angle, radius_inner: f64, radius_outer: f64) -> Self {
        Self {
            phi_max,
            radius_inner,
            radius_outer,
        }
    }

    fn in_range(&self, x: f64, y: f64) -> bool {
        let r2 = x * x + y * y;
        r2 <= self.radius_outer * self.radius_outer
            && r2 >= self.radius_inner * self.radius_inner
            && azimuth(x, y) <= self.phi_max.radians()
    }
}

impl Identified for Disk3 {
    const ID: i32 = 7;
    const NAME: &'static str = "Disk";
}

impl Shape3 for Disk3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        let r = self.radius_outer;
        Aabb3::new(Point3::new(-r, -r, 0.0), Point3::new(r, r, 0.0)).into()
    }

    fn contains(&self, point: &Point3) -> bool {
        point.z.abs() <= EPSILON && self.in_range(point.x, point.y)
    }

    fn surface_area(&self) -> f64 {
        self.phi_max.radians() / 2.0
            * (self.radius_outer * self.radius_outer - self.radius_inner * self.radius_inner)
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let d = ray.direction();
        if d.z.abs() < EPSILON {
            return f64::NAN;
        }
        let t = -ray.origin().z / d.z;
        if !(t > t_min && t < t_max) {
            return f64::NAN;
        }
        let p = ray.at(t);
        if self.in_range(p.x, p.y) {
            t
        } else {
            f64::NAN
        }
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let p = ray.at(t);
        let phi_max = self.phi_max.radians();
        let u = azimuth(p.x, p.y) / phi_max;
        let v = (self.radius_outer - p.x.hypot(p.y)) / (self.radius_outer - self.radius_inner);
        let dpdu = Vec3::new(-phi_max * p.y, phi_max * p.x, 0.0);
        SurfaceIntersection3::new(self, *ray, t, frame(Vec3::z(), dpdu), Point2::new(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn annulus() -> Disk3 {
        Disk3::new(Angle::FULL, 0.5, 1.0)
    }

    #[test]
    fn test_hit_from_below_keeps_up_normal() {
        let ray = Ray3::new(Point3::new(0.75, 0.0, -2.0), Vec3::z()).unwrap();
        let shape = annulus();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-12);
        assert!((hit.normal() - Vec3::z()).norm() < 1e-12);
        assert_relative_eq!(hit.texture_coordinates.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hole_and_rim_miss() {
        let through_hole = Ray3::new(Point3::new(0.2, 0.0, 1.0), -Vec3::z()).unwrap();
        assert!(annulus().intersection_t(&through_hole, 0.0, f64::INFINITY).is_nan());
        let outside = Ray3::new(Point3::new(1.2, 0.0, 1.0), -Vec3::z()).unwrap();
        assert!(annulus().intersection_t(&outside, 0.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray3::new(Point3::new(-5.0, 0.0, 0.0), Vec3::x()).unwrap();
        assert!(annulus().intersection_t(&ray, 0.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_quarter_sweep() {
        let quarter = Disk3::new(Angle::from_degrees(90.0), 0.0, 1.0);
        let inside = Ray3::new(Point3::new(0.3, 0.3, 1.0), -Vec3::z()).unwrap();
        let outside = Ray3::new(Point3::new(-0.3, 0.3, 1.0), -Vec3::z()).unwrap();
        assert!(quarter.intersects(&inside, 0.0, 10.0));
        assert!(!quarter.intersects(&outside, 0.0, 10.0));
        assert_relative_eq!(quarter.surface_area(), PI / 4.0, epsilon = 1e-12);
    }
}
