//! Swept paraboloid around the z axis.

use super::{azimuth, frame, nearest_root, Shape3};
use crate::{Identified, SurfaceIntersection3, EPSILON};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{Angle, Point2, Point3, Ray3, Vec3};
use rtgeo_solve::solve_quadratic;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Paraboloid `z = k (x^2 + y^2)` reaching `radius` at `z_max`, clipped to
/// `z_min..=z_max` and swept from azimuth 0 to `phi_max`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paraboloid3 {
    /// Sweep angle.
    pub phi_max: Angle,
    /// Radius at `z_max`.
    pub radius: f64,
    /// Lower clip height.
    pub z_min: f64,
    /// Upper clip height.
    pub z_max: f64,
}

impl Paraboloid3 {
    /// Create a paraboloid. The clip heights may be given in either order.
    pub fn new(phi_max: Angle, radius: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            phi_max,
            radius,
            z_min: z_min.min(z_max),
            z_max: z_min.max(z_max),
        }
    }

    /// Curvature `k` of `z = k r^2`.
    fn k(&self) -> f64 {
        self.z_max / (self.radius * self.radius)
    }

    fn in_range(&self, p: &Point3) -> bool {
        p.z >= self.z_min && p.z <= self.z_max && azimuth(p.x, p.y) <= self.phi_max.radians()
    }
}

impl Identified for Paraboloid3 {
    const ID: i32 = 5;
    const NAME: &'static str = "Paraboloid";
}

impl Shape3 for Paraboloid3 {
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
        let k = self.k();
        (k * (point.x * point.x + point.y * point.y) - point.z).abs() <= EPSILON
            && self.in_range(point)
    }

    fn surface_area(&self) -> f64 {
        let r2 = self.radius * self.radius;
        let k4 = 4.0 * self.z_max / r2;
        r2 * r2 * self.phi_max.radians() / (12.0 * self.z_max * self.z_max)
            * ((k4 * self.z_max + 1.0).powf(1.5) - (k4 * self.z_min + 1.0).powf(1.5))
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let o = ray.origin();
        let d = ray.direction();
        let k = self.k();
        let roots = solve_quadratic(
            k * (d.x * d.x + d.y * d.y),
            2.0 * k * (d.x * o.x + d.y * o.y) - d.z,
            k * (o.x * o.x + o.y * o.y) - o.z,
        );
        nearest_root(roots, t_min, t_max, |t| self.in_range(&ray.at(t)))
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let p = ray.at(t);
        let phi_max = self.phi_max.radians();
        let k = self.k();
        let u = azimuth(p.x, p.y) / phi_max;
        let v = (p.z - self.z_min) / (self.z_max - self.z_min);
        let dpdu = Vec3::new(-phi_max * p.y, phi_max * p.x, 0.0);
        let normal = Vec3::new(2.0 * k * p.x, 2.0 * k * p.y, -1.0);
        SurfaceIntersection3::new(self, *ray, t, frame(normal, dpdu), Point2::new(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn bowl() -> Paraboloid3 {
        Paraboloid3::new(Angle::FULL, 1.0, 0.0, 1.0)
    }

    #[test]
    fn test_vertical_ray_hits_bowl() {
        let ray = Ray3::new(Point3::new(0.5, 0.0, 5.0), -Vec3::z()).unwrap();
        let shape = bowl();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.point.z, 0.25, epsilon = 1e-10);
        assert!(bowl().contains(&hit.point));
        // The outward side of the bowl faces down and away from the axis.
        assert!(hit.normal().z < 0.0);
        assert!(hit.normal().x > 0.0);
    }

    #[test]
    fn test_horizontal_ray_above_rim_misses() {
        let ray = Ray3::new(Point3::new(-5.0, 0.0, 1.5), Vec3::x()).unwrap();
        assert!(bowl().intersection_t(&ray, 0.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_horizontal_ray_hits_both_walls_in_order() {
        let ray = Ray3::new(Point3::new(-5.0, 0.0, 0.25), Vec3::x()).unwrap();
        assert_relative_eq!(bowl().intersection_t(&ray, 0.0, f64::INFINITY), 4.5, epsilon = 1e-10);
        assert_relative_eq!(bowl().intersection_t(&ray, 4.6, f64::INFINITY), 5.5, epsilon = 1e-10);
    }

    #[test]
    fn test_phi_clip() {
        let half = Paraboloid3::new(Angle::HALF, 1.0, 0.0, 1.0);
        let ray = Ray3::new(Point3::new(0.0, -5.0, 0.25), Vec3::y()).unwrap();
        let hit = half.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        // The wall at y = -0.5 (phi = 3π/2) is clipped.
        assert_relative_eq!(hit.t, 5.5, epsilon = 1e-10);
        assert_relative_eq!(hit.point.y, 0.5, epsilon = 1e-10);
        assert_relative_eq!(hit.texture_coordinates.x, 0.5, epsilon = 1e-10);
        assert!(half.contains(&hit.point));
        assert!(!half.contains(&Point3::new(0.0, -0.5, 0.25)));
    }

    #[test]
    fn test_area_matches_closed_form() {
        // k = 1: area = π/6 ((4z + 1)^1.5 - 1) over a full sweep.
        let expected = PI / 6.0 * (5.0_f64.powf(1.5) - 1.0);
        assert_relative_eq!(bowl().surface_area(), expected, epsilon = 1e-12);
    }
}
