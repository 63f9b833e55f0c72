//! Sphere.

use super::{azimuth, frame, nearest_root, Shape3};
use crate::{Identified, SurfaceIntersection3};
use rtgeo_bounds::{BoundingSphere3, BoundingVolume3};
use rtgeo_math::{Point2, Point3, Ray3, Vec3};
use rtgeo_solve::solve_quadratic;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A solid sphere.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere3 {
    /// Sphere radius.
    pub radius: f64,
    /// Sphere center.
    pub center: Point3,
}

impl Sphere3 {
    /// Create a sphere.
    pub fn new(radius: f64, center: Point3) -> Self {
        Self { radius, center }
    }
}

impl Identified for Sphere3 {
    const ID: i32 = 1;
    const NAME: &'static str = "Sphere";
}

impl Shape3 for Sphere3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        BoundingSphere3::new(self.center, self.radius).into()
    }

    fn contains(&self, point: &Point3) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    fn surface_area(&self) -> f64 {
        4.0 * PI * self.radius * self.radius
    }

    fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let oc = ray.origin() - self.center;
        let d = ray.direction().as_ref();
        let roots = solve_quadratic(
            d.dot(d),
            2.0 * oc.dot(d),
            oc.dot(&oc) - self.radius * self.radius,
        );
        nearest_root(roots, t_min, t_max, |_| true)
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let point = ray.at(t);
        let local = point - self.center;
        let phi = azimuth(local.x, local.y);
        let theta = (local.z / self.radius).clamp(-1.0, 1.0).acos();
        let dpdu = Vec3::new(-2.0 * PI * local.y, 2.0 * PI * local.x, 0.0);
        let uv = Point2::new(phi / (2.0 * PI), theta / PI);
        SurfaceIntersection3::new(self, *ray, t, frame(local, dpdu), uv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rtgeo_bounds::BoundingVolume;

    fn unit_sphere() -> Sphere3 {
        Sphere3::new(1.0, Point3::origin())
    }

    #[test]
    fn test_ray_hits_front_of_sphere() {
        let ray = Ray3::new(Point3::new(0.0, 0.0, -5.0), Vec3::z()).unwrap();
        let shape = unit_sphere();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 4.0, epsilon = 1e-10);
        assert!((hit.normal() - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-10);
        assert_relative_eq!(hit.texture_coordinates.y, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ray_from_inside_hits_far_side() {
        let ray = Ray3::new(Point3::origin(), Vec3::x()).unwrap();
        let shape = unit_sphere();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 1.0, epsilon = 1e-10);
        // Normals stay outward even when the ray leaves the solid.
        assert!(hit.normal().dot(ray.direction().as_ref()) > 0.0);
    }

    #[test]
    fn test_ray_misses_and_window() {
        let sphere = Sphere3::new(2.0, Point3::new(0.0, 0.0, 10.0));
        let miss = Ray3::new(Point3::new(5.0, 0.0, 0.0), Vec3::z()).unwrap();
        assert!(sphere.intersection_t(&miss, 0.0, f64::INFINITY).is_nan());
        assert!(sphere.intersection(&miss, 0.0, f64::INFINITY).is_none());

        let ray = Ray3::new(Point3::origin(), Vec3::z()).unwrap();
        assert!(!sphere.intersects(&ray, 0.0, 7.5));
        assert_relative_eq!(sphere.intersection_t(&ray, 9.0, 100.0), 12.0, epsilon = 1e-10);
    }

    #[test]
    fn test_hit_point_lies_on_surface() {
        let sphere = Sphere3::new(1.5, Point3::new(1.0, -2.0, 0.5));
        let ray = Ray3::new(Point3::new(-4.0, 0.0, 0.0), Vec3::new(1.0, -0.35, 0.1)).unwrap();
        let hit = sphere.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!((hit.point - sphere.center).norm(), 1.5, epsilon = 1e-9);
        assert!(hit.geometric_frame.u.dot(&hit.normal()).abs() < 1e-12);
        assert_eq!(hit.shape.name(), "Sphere");
    }

    #[test]
    fn test_measures() {
        let sphere = Sphere3::new(2.0, Point3::origin());
        assert_relative_eq!(sphere.surface_area(), 16.0 * PI);
        assert_relative_eq!(sphere.volume(), 32.0 / 3.0 * PI);
        assert!(sphere.contains(&Point3::new(0.0, 2.0, 0.0)));
        assert!(!sphere.contains(&Point3::new(0.0, 2.1, 0.0)));
        assert_eq!(sphere.bounding_volume().max(), Point3::new(2.0, 2.0, 2.0));
    }
}
