//! Bounding sphere.

use crate::{BoundingVolume, BoundingVolume3};
use rtgeo_math::{Point3, Ray3, Transform, Vec3};
use rtgeo_solve::solve_quadratic;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sphere enclosing some extent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingSphere3 {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere.
    pub radius: f64,
}

impl BoundingSphere3 {
    /// Create a bounding sphere.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl BoundingVolume for BoundingSphere3 {
    /// Re-derives the radius from three axis probes around the transformed
    /// center. Exact for similarity transforms; under non-uniform scale the
    /// largest probe distance keeps the result enclosing.
    fn transform(&self, transform: &Transform) -> BoundingVolume3 {
        let center = transform.apply_point(&self.center);
        let radius = [Vec3::x(), Vec3::y(), Vec3::z()]
            .iter()
            .map(|axis| {
                let probe = transform.apply_point(&(self.center + axis * self.radius));
                (probe - center).norm()
            })
            .fold(0.0, f64::max);
        BoundingVolume3::Sphere(BoundingSphere3::new(center, radius))
    }

    fn closest_point(&self, point: &Point3) -> Point3 {
        let offset = point - self.center;
        let distance = offset.norm();
        if distance <= self.radius {
            *point
        } else {
            self.center + offset * (self.radius / distance)
        }
    }

    fn contains(&self, point: &Point3) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    fn surface_area(&self) -> f64 {
        4.0 * PI * self.radius * self.radius
    }

    fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius * self.radius * self.radius
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let oc = ray.origin() - self.center;
        let d = ray.direction().as_ref();

        let [r0, r1] = solve_quadratic(
            d.dot(d),
            2.0 * oc.dot(d),
            oc.dot(&oc) - self.radius * self.radius,
        );
        let (near, far) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };

        if near > t_min && near < t_max {
            near
        } else if far > t_min && far < t_max {
            far
        } else {
            f64::NAN
        }
    }

    fn min(&self) -> Point3 {
        self.center - Vec3::repeat(self.radius)
    }

    fn max(&self) -> Point3 {
        self.center + Vec3::repeat(self.radius)
    }

    fn midpoint(&self) -> Point3 {
        self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rtgeo_math::{Angle, Dir3};

    fn x_ray(x: f64) -> Ray3 {
        Ray3::new(Point3::new(x, 0.0, 0.0), Vec3::x()).unwrap()
    }

    #[test]
    fn test_intersection_from_outside_takes_entry() {
        let sphere = BoundingSphere3::new(Point3::origin(), 5.0);
        let t = sphere.intersection_t(&x_ray(-10.0), 0.0, f64::INFINITY);
        assert_relative_eq!(t, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_intersection_from_inside_takes_exit() {
        let sphere = BoundingSphere3::new(Point3::origin(), 5.0);
        let t = sphere.intersection_t(&x_ray(0.0), 0.0, f64::INFINITY);
        assert_relative_eq!(t, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_intersection_respects_window() {
        let sphere = BoundingSphere3::new(Point3::origin(), 5.0);
        assert!(sphere.intersection_t(&x_ray(-10.0), 0.0, 4.0).is_nan());
        assert!(sphere.intersection_t(&x_ray(10.0), 0.0, 100.0).is_nan());
        let t = sphere.intersection_t(&x_ray(-10.0), 6.0, 100.0);
        assert_relative_eq!(t, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_preserves_radius() {
        let sphere = BoundingSphere3::new(Point3::origin(), 1.0);
        let axis = Dir3::new_normalize(Vec3::new(1.0, 1.0, 0.0));
        let rotated = sphere.transform(&Transform::rotation(&axis, Angle::from_degrees(37.0)));
        let BoundingVolume3::Sphere(rotated) = rotated else {
            panic!("sphere transform must stay a sphere");
        };
        assert_relative_eq!(rotated.radius, 1.0, epsilon = 1e-12);
        assert!(rotated.center.coords.norm() < 1e-12);
    }

    #[test]
    fn test_rotation_moves_offset_center() {
        let sphere = BoundingSphere3::new(Point3::new(2.0, 0.0, 0.0), 1.0);
        let axis = Dir3::new_normalize(Vec3::z());
        let BoundingVolume3::Sphere(rotated) =
            sphere.transform(&Transform::rotation(&axis, Angle::from_degrees(90.0)))
        else {
            panic!("sphere transform must stay a sphere");
        };
        assert_relative_eq!(rotated.radius, 1.0, epsilon = 1e-12);
        assert!((rotated.center - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_non_uniform_scale_stays_enclosing() {
        let sphere = BoundingSphere3::new(Point3::origin(), 1.0);
        let t = Transform::scale(1.0, 3.0, 0.5);
        let scaled = sphere.transform(&t);
        for probe in [Vec3::x(), Vec3::y(), Vec3::z(), Vec3::new(0.0, -1.0, 0.0)] {
            assert!(scaled.contains(&t.apply_point(&Point3::from(probe))));
        }
        assert_relative_eq!(scaled.max().y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_point_and_measures() {
        let sphere = BoundingSphere3::new(Point3::new(1.0, 0.0, 0.0), 2.0);
        let inside = Point3::new(1.5, 0.5, 0.0);
        assert_eq!(sphere.closest_point(&inside), inside);
        let outside = sphere.closest_point(&Point3::new(10.0, 0.0, 0.0));
        assert!((outside - Point3::new(3.0, 0.0, 0.0)).norm() < 1e-12);

        assert_relative_eq!(sphere.surface_area(), 16.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(sphere.volume(), 32.0 / 3.0 * PI, epsilon = 1e-12);
        assert_eq!(sphere.min(), Point3::new(-1.0, -2.0, -2.0));
    }
}
