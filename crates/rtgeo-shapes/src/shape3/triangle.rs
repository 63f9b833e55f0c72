//! Triangle with per-vertex attributes (Möller–Trumbore).

use super::{frame, Shape3};
use crate::{Identified, SurfaceIntersection3, EPSILON};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{Point2, Point3, Point4, Ray3, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex3 {
    /// Texture coordinates at this corner.
    pub texture_coordinates: Point2,
    /// Homogeneous position; `w` is carried but not used for intersection.
    pub position: Point4,
    /// Shading normal at this corner.
    pub normal: Vec3,
}

impl Vertex3 {
    /// Create a vertex.
    pub fn new(texture_coordinates: Point2, position: Point4, normal: Vec3) -> Self {
        Self {
            texture_coordinates,
            position,
            normal,
        }
    }

    /// Position with the homogeneous component dropped.
    pub fn point(&self) -> Point3 {
        Point3::new(self.position.x, self.position.y, self.position.z)
    }
}

/// Triangle `a → b → c`. The geometric normal follows the winding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle3 {
    /// First corner.
    pub a: Vertex3,
    /// Second corner.
    pub b: Vertex3,
    /// Third corner.
    pub c: Vertex3,
}

/// Ray parameter and barycentric weights of `b` and `c`.
struct Barycentric {
    t: f64,
    u: f64,
    v: f64,
}

impl Triangle3 {
    /// Create a triangle.
    pub fn new(a: Vertex3, b: Vertex3, c: Vertex3) -> Self {
        Self { a, b, c }
    }

    fn points(&self) -> [Point3; 3] {
        [self.a.point(), self.b.point(), self.c.point()]
    }

    fn edges(&self) -> (Vec3, Vec3) {
        let [p0, p1, p2] = self.points();
        (p1 - p0, p2 - p0)
    }

    /// Möller–Trumbore: solve `O + tD = p0 + u e1 + v e2` by Cramer's rule.
    fn barycentric(&self, ray: &Ray3) -> Option<Barycentric> {
        let p0 = self.a.point();
        let (e1, e2) = self.edges();
        let d = ray.direction().as_ref();

        let pvec = d.cross(&e2);
        let det = e1.dot(&pvec);
        if !(det.abs() >= EPSILON) {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin() - p0;
        let u = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(&e1);
        let v = d.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        Some(Barycentric {
            t: e2.dot(&qvec) * inv_det,
            u,
            v,
        })
    }

    /// `dp/du` in texture space, or the first edge when the texture mapping
    /// is degenerate.
    fn dpdu(&self) -> Vec3 {
        let [p0, p1, p2] = self.points();
        let duv02 = self.a.texture_coordinates - self.c.texture_coordinates;
        let duv12 = self.b.texture_coordinates - self.c.texture_coordinates;
        let det = duv02.x * duv12.y - duv02.y * duv12.x;
        if det.abs() < EPSILON {
            return p1 - p0;
        }
        ((p0 - p2) * duv12.y - (p1 - p2) * duv02.y) / det
    }
}

impl Identified for Triangle3 {
    const ID: i32 = 10;
    const NAME: &'static str = "Triangle";
}

impl Shape3 for Triangle3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        Aabb3::from_points(&self.points()).into()
    }

    fn contains(&self, point: &Point3) -> bool {
        let [p0, p1, p2] = self.points();
        let (e1, e2) = self.edges();
        let normal = e1.cross(&e2);
        let area2 = normal.norm_squared();
        if area2 == 0.0 || ((point - p0).dot(&normal)).abs() > EPSILON * area2.sqrt() {
            return false;
        }
        // Signed sub-areas relative to the full triangle.
        [(p0, p1), (p1, p2), (p2, p0)]
            .iter()
            .all(|(from, to)| (to - from).cross(&(point - from)).dot(&normal) >= -EPSILON * area2)
    }

    fn surface_area(&self) -> f64 {
        let (e1, e2) = self.edges();
        0.5 * e1.cross(&e2).norm()
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        match self.barycentric(ray) {
            Some(hit) if hit.t > t_min && hit.t < t_max => hit.t,
            _ => f64::NAN,
        }
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let (u, v) = self.barycentric(ray).map_or((0.0, 0.0), |b| (b.u, b.v));
        let w = 1.0 - u - v;

        let (e1, e2) = self.edges();
        let geometric = e1.cross(&e2);
        let dpdu = self.dpdu();

        let uv = Point2::from(
            self.a.texture_coordinates.coords * w
                + self.b.texture_coordinates.coords * u
                + self.c.texture_coordinates.coords * v,
        );

        let mut shading = self.a.normal * w + self.b.normal * u + self.c.normal * v;
        if !(shading.norm_squared() > 0.0) {
            shading = geometric;
        }

        SurfaceIntersection3::new(self, *ray, t, frame(geometric, dpdu), uv)
            .with_shading_frame(frame(shading, dpdu))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertex(x: f64, y: f64, normal: Vec3) -> Vertex3 {
        Vertex3::new(Point2::new(x, y), Point4::new(x, y, 0.0, 1.0), normal)
    }

    fn flat() -> Triangle3 {
        Triangle3::new(
            vertex(0.0, 0.0, Vec3::z()),
            vertex(1.0, 0.0, Vec3::z()),
            vertex(0.0, 1.0, Vec3::z()),
        )
    }

    #[test]
    fn test_hit_inside_interpolates_uv() {
        let ray = Ray3::new(Point3::new(0.25, 0.25, 1.0), -Vec3::z()).unwrap();
        let shape = flat();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 1.0, epsilon = 1e-12);
        assert_relative_eq!(hit.texture_coordinates.x, 0.25, epsilon = 1e-12);
        assert_relative_eq!(hit.texture_coordinates.y, 0.25, epsilon = 1e-12);
        assert!((hit.normal() - Vec3::z()).norm() < 1e-12);
        assert!((hit.geometric_frame.u - Vec3::x()).norm() < 1e-12);
    }

    #[test]
    fn test_miss_outside_and_parallel() {
        let outside = Ray3::new(Point3::new(0.75, 0.75, 1.0), -Vec3::z()).unwrap();
        assert!(flat().intersection_t(&outside, 0.0, f64::INFINITY).is_nan());
        let parallel = Ray3::new(Point3::new(-1.0, 0.25, 0.0), Vec3::x()).unwrap();
        assert!(flat().intersection_t(&parallel, 0.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_backface_hits_with_winding_normal() {
        let ray = Ray3::new(Point3::new(0.2, 0.2, -1.0), Vec3::z()).unwrap();
        let shape = flat();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert!((hit.normal() - Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_shading_normal_is_interpolated() {
        let tilted = Vec3::new(1.0, 0.0, 1.0).normalize();
        let triangle = Triangle3::new(
            vertex(0.0, 0.0, Vec3::z()),
            vertex(1.0, 0.0, tilted),
            vertex(0.0, 1.0, Vec3::z()),
        );
        let ray = Ray3::new(Point3::new(0.5, 0.25, 1.0), -Vec3::z()).unwrap();
        let hit = triangle.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert!((hit.normal() - Vec3::z()).norm() < 1e-12);
        let shading = hit.shading_normal();
        assert!(shading.x > 0.0);
        assert_relative_eq!(shading.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contains_and_area() {
        assert!(flat().contains(&Point3::new(0.2, 0.2, 0.0)));
        assert!(flat().contains(&Point3::new(0.5, 0.5, 0.0)));
        assert!(!flat().contains(&Point3::new(0.6, 0.6, 0.0)));
        assert!(!flat().contains(&Point3::new(0.2, 0.2, 0.1)));
        assert_relative_eq!(flat().surface_area(), 0.5);
    }
}
