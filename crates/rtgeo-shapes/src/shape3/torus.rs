//! Ray-torus intersection (quartic equation).

use super::{azimuth, frame, Shape3};
use crate::{Identified, SurfaceIntersection3};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{Point2, Point3, Ray3, Vec3};
use rtgeo_solve::solve_quartic;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A solid torus centered at the origin, revolving around the z axis.
///
/// `radius_outer` is the distance from the axis to the tube center and
/// `radius_inner` the tube radius.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Torus3 {
    /// Tube radius.
    pub radius_inner: f64,
    /// Distance from the z axis to the tube center.
    pub radius_outer: f64,
}

impl Torus3 {
    /// Create a torus.
    pub fn new(radius_inner: f64, radius_outer: f64) -> Self {
        Self {
            radius_inner,
            radius_outer,
        }
    }

    /// Every real root of the ray/torus quartic, ascending.
    ///
    /// A ray through the tube yields 2 or 4 roots; a miss yields none.
    pub fn roots(&self, ray: &Ray3) -> Vec<f64> {
        let r2 = self.radius_outer * self.radius_outer;
        let a2 = self.radius_inner * self.radius_inner;

        let o = ray.origin().coords;
        let d = ray.direction().as_ref();

        let od = o.dot(d);
        let oo = o.dot(&o);
        let dd = d.dot(d);

        // The torus is (sqrt(x^2 + y^2) - R)^2 + z^2 = r^2. Substituting the
        // ray and squaring out the root gives a quartic in t.
        let k = oo - (r2 + a2);

        let c4 = dd * dd;
        let c3 = 4.0 * dd * od;
        let c2 = 2.0 * dd * k + 4.0 * od * od + 4.0 * r2 * d.z * d.z;
        let c1 = 4.0 * k * od + 8.0 * r2 * o.z * d.z;
        let c0 = k * k - 4.0 * r2 * (a2 - o.z * o.z);

        solve_quartic(c4, c3, c2, c1, c0)
    }
}

impl Identified for Torus3 {
    const ID: i32 = 2;
    const NAME: &'static str = "Torus";
}

impl Shape3 for Torus3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        let extent = self.radius_outer + self.radius_inner;
        Aabb3::new(
            Point3::new(-extent, -extent, -self.radius_inner),
            Point3::new(extent, extent, self.radius_inner),
        )
        .into()
    }

    fn contains(&self, point: &Point3) -> bool {
        let ring = point.x.hypot(point.y) - self.radius_outer;
        ring * ring + point.z * point.z <= self.radius_inner * self.radius_inner
    }

    fn surface_area(&self) -> f64 {
        4.0 * PI * PI * self.radius_outer * self.radius_inner
    }

    fn volume(&self) -> f64 {
        2.0 * PI * PI * self.radius_outer * self.radius_inner * self.radius_inner
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let roots = self.roots(ray);
        let (Some(&first), Some(&last)) = (roots.first(), roots.last()) else {
            return f64::NAN;
        };
        if first >= t_max || last <= t_min {
            return f64::NAN;
        }
        match roots.into_iter().find(|&t| t > t_min) {
            Some(t) if t < t_max => t,
            _ => f64::NAN,
        }
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let p = ray.at(t);
        let r2 = self.radius_outer * self.radius_outer;
        let a2 = self.radius_inner * self.radius_inner;

        // Gradient of (|p|^2 + R^2 - r^2)^2 - 4R^2(x^2 + y^2), up to a factor 4.
        let k = p.coords.norm_squared() - r2 - a2;
        let normal = Vec3::new(p.x * k, p.y * k, p.z * (k + 2.0 * r2));
        let dpdu = Vec3::new(-p.y, p.x, 0.0);

        let u = azimuth(p.x, p.y) / (2.0 * PI);
        let v = ((p.z / self.radius_inner).clamp(-1.0, 1.0).asin() + PI / 2.0) / PI;
        SurfaceIntersection3::new(self, *ray, t, frame(normal, dpdu), Point2::new(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn torus() -> Torus3 {
        Torus3::new(0.25, 1.0)
    }

    fn on_surface(torus: &Torus3, p: &Point3) -> f64 {
        let ring = p.x.hypot(p.y) - torus.radius_outer;
        (ring * ring + p.z * p.z).sqrt() - torus.radius_inner
    }

    #[test]
    fn test_ray_through_center_crosses_tube_twice() {
        let ray = Ray3::new(Point3::new(-3.0, 0.0, 0.0), Vec3::x()).unwrap();
        let roots = torus().roots(&ray);
        assert_eq!(roots.len(), 4);
        for (root, expected) in roots.iter().zip([1.75, 2.25, 3.75, 4.25]) {
            assert_relative_eq!(*root, expected, epsilon = 1e-7);
        }

        let t = torus().intersection_t(&ray, 0.0, f64::INFINITY);
        assert_relative_eq!(t, 1.75, epsilon = 1e-7);
        let t = torus().intersection_t(&ray, 2.0, f64::INFINITY);
        assert_relative_eq!(t, 2.25, epsilon = 1e-7);
    }

    #[test]
    fn test_ray_through_hole_along_axis_misses() {
        let ray = Ray3::new(Point3::new(0.0, 0.0, -5.0), Vec3::z()).unwrap();
        assert!(torus().roots(&ray).is_empty());
        assert!(torus().intersection_t(&ray, 0.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_tangent_plane_ray_hits_top_of_tube() {
        let ray = Ray3::new(Point3::new(1.0, 0.0, 5.0), -Vec3::z()).unwrap();
        let shape = torus();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 4.75, epsilon = 1e-7);
        assert!((hit.normal() - Vec3::z()).norm() < 1e-6);
        assert_relative_eq!(hit.texture_coordinates.y, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_window_excludes_all_roots() {
        let ray = Ray3::new(Point3::new(-3.0, 0.0, 0.0), Vec3::x()).unwrap();
        assert!(torus().intersection_t(&ray, 0.0, 1.5).is_nan());
        assert!(torus().intersection_t(&ray, 4.5, 10.0).is_nan());
    }

    #[test]
    fn test_oblique_hit_lies_on_surface_with_outward_normal() {
        let ray = Ray3::new(Point3::new(-2.0, 0.3, 0.6), Vec3::new(1.0, 0.0, -0.5)).unwrap();
        let shape = torus();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert!(on_surface(&torus(), &hit.point).abs() < 1e-7);
        // Stepping along the normal leaves the solid.
        let outside = hit.point + hit.normal() * 1e-4;
        assert!(!torus().contains(&outside));
        assert!(torus().contains(&(hit.point - hit.normal() * 1e-4)));
    }

    #[test]
    fn test_measures() {
        let torus = Torus3::new(1.0, 3.0);
        assert_relative_eq!(torus.surface_area(), 12.0 * PI * PI);
        assert_relative_eq!(torus.volume(), 6.0 * PI * PI);
        assert!(torus.contains(&Point3::new(3.0, 0.0, 0.5)));
        assert!(!torus.contains(&Point3::origin()));
    }
}
