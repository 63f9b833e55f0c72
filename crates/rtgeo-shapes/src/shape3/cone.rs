//! Swept cone around the z axis.

use super::{azimuth, frame, nearest_root, Shape3};
use crate::{Identified, SurfaceIntersection3, EPSILON};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{Angle, Point2, Point3, Ray3, Vec3};
use rtgeo_solve::solve_quadratic;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Open cone with its base circle of `radius` at z = 0 and its apex at
/// `z_max`, swept from azimuth 0 to `phi_max`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cone3 {
    /// Sweep angle.
    pub phi_max: Angle,
    /// Base radius.
    pub radius: f64,
    /// Apex height.
    pub z_max: f64,
}

impl Cone3 {
    /// Create a cone.
    pub fn new(phi_max: Angle, radius: f64, z_max: f64) -> Self {
        Self {
            phi_max,
            radius,
            z_max,
        }
    }

    fn in_range(&self, p: &Point3) -> bool {
        p.z >= 0.0 && p.z <= self.z_max && azimuth(p.x, p.y) <= self.phi_max.radians()
    }
}

impl Identified for Cone3 {
    const ID: i32 = 4;
    const NAME: &'static str = "Cone";
}

impl Shape3 for Cone3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        Aabb3::new(
            Point3::new(-self.radius, -self.radius, 0.0),
            Point3::new(self.radius, self.radius, self.z_max),
        )
        .into()
    }

    fn contains(&self, point: &Point3) -> bool {
        let expected = self.radius * (1.0 - point.z / self.z_max);
        (point.x.hypot(point.y) - expected).abs() <= EPSILON && self.in_range(point)
    }

    fn surface_area(&self) -> f64 {
        self.radius * self.z_max.hypot(self.radius) * self.phi_max.radians() / 2.0
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let o = ray.origin();
        let d = ray.direction();
        let k = (self.radius / self.z_max).powi(2);
        let oz = o.z - self.z_max;
        let roots = solve_quadratic(
            d.x * d.x + d.y * d.y - k * d.z * d.z,
            2.0 * (d.x * o.x + d.y * o.y - k * d.z * oz),
            o.x * o.x + o.y * o.y - k * oz * oz,
        );
        nearest_root(roots, t_min, t_max, |t| self.in_range(&ray.at(t)))
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let p = ray.at(t);
        let phi_max = self.phi_max.radians();
        let k = (self.radius / self.z_max).powi(2);
        let u = azimuth(p.x, p.y) / phi_max;
        let v = p.z / self.z_max;
        let dpdu = Vec3::new(-phi_max * p.y, phi_max * p.x, 0.0);
        let normal = Vec3::new(p.x, p.y, -k * (p.z - self.z_max));
        SurfaceIntersection3::new(self, *ray, t, frame(normal, dpdu), Point2::new(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn cone() -> Cone3 {
        Cone3::new(Angle::FULL, 1.0, 2.0)
    }

    #[test]
    fn test_side_hit_halfway_up() {
        let ray = Ray3::new(Point3::new(5.0, 0.0, 1.0), -Vec3::x()).unwrap();
        let shape = cone();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 4.5, epsilon = 1e-10);
        assert_relative_eq!(hit.texture_coordinates.y, 0.5, epsilon = 1e-10);
        // Outward and tilted up.
        let n = hit.normal();
        assert!(n.x > 0.0 && n.z > 0.0);
        assert_relative_eq!(n.x / n.z, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_shadow_cone_above_apex_is_clipped() {
        // The implicit double cone extends above the apex; those hits are
        // rejected by the z clip.
        let ray = Ray3::new(Point3::new(5.0, 0.0, 3.0), -Vec3::x()).unwrap();
        assert!(cone().intersection_t(&ray, 0.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_vertical_ray_from_below_hits_inside_of_wall() {
        let ray = Ray3::new(Point3::new(0.2, 0.0, -1.0), Vec3::z()).unwrap();
        let t = cone().intersection_t(&ray, 0.0, f64::INFINITY);
        assert_relative_eq!(t, 2.6, epsilon = 1e-10);
    }

    #[test]
    fn test_phi_clip() {
        let half = Cone3::new(Angle::HALF, 1.0, 2.0);
        // Radius 0.5 at z = 1. The near wall at y = -0.5 lies outside the
        // sweep, the far wall at y = +0.5 inside it.
        let ray = Ray3::new(Point3::new(0.0, -5.0, 1.0), Vec3::y()).unwrap();
        let hit = half.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 5.5, epsilon = 1e-10);
        assert_relative_eq!(hit.texture_coordinates.x, 0.5, epsilon = 1e-10);
        assert!(half.contains(&hit.point));
        assert!(!half.contains(&Point3::new(0.0, -0.5, 1.0)));
        assert!(half.intersection_t(&ray, 0.0, 5.4).is_nan());
    }

    #[test]
    fn test_contains_and_area() {
        assert!(cone().contains(&Point3::new(0.0, 0.5, 1.0)));
        assert!(!cone().contains(&Point3::new(0.0, 0.7, 1.0)));
        assert_relative_eq!(cone().surface_area(), PI * 5.0_f64.sqrt(), epsilon = 1e-12);
    }
}
