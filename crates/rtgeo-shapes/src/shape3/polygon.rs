//! Planar polygon in 3D.

use super::{frame, Shape3};
use crate::shape2::point_in_polygon;
use crate::{GeometryError, Identified, SurfaceIntersection3, EPSILON};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{OrthonormalBasis, Point2, Point3, Ray3, Tolerance, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A simple planar polygon with at least three vertices.
///
/// The normal follows the vertex winding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon3 {
    points: Vec<Point3>,
    /// Newell vector: the normal scaled by twice the area.
    newell: Vec3,
    basis: OrthonormalBasis,
    /// Vertices in the plane's (u, v) coordinates.
    projected: Vec<Point2>,
}

impl Polygon3 {
    /// Create a polygon.
    ///
    /// Fails with fewer than three points, when the points span no area, or
    /// when a vertex lies off the plane of the others.
    pub fn new(points: Vec<Point3>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                shape: Self::NAME,
                required: 3,
                actual: points.len(),
            });
        }

        let newell = newell_normal(&points);
        let twice_area = newell.norm();
        if !(twice_area > 0.0) {
            return Err(GeometryError::Degenerate(Self::NAME));
        }
        let normal = newell / twice_area;

        let origin = points[0];
        let scale = points
            .iter()
            .map(|p| (p - origin).norm())
            .fold(1.0, f64::max);
        let tolerance = Tolerance::DEFAULT.linear * scale;
        for (index, p) in points.iter().enumerate() {
            let distance = (p - origin).dot(&normal).abs();
            if distance > tolerance {
                return Err(GeometryError::NonPlanar { index, distance });
            }
        }

        let basis = frame(normal, points[1] - origin);
        let projected = points
            .iter()
            .map(|p| {
                let offset = p - origin;
                Point2::new(offset.dot(&basis.u), offset.dot(&basis.v))
            })
            .collect();

        Ok(Self {
            points,
            newell,
            basis,
            projected,
        })
    }

    /// The vertices, in winding order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        self.basis.w
    }

    fn project(&self, p: &Point3) -> Point2 {
        let offset = p - self.points[0];
        Point2::new(offset.dot(&self.basis.u), offset.dot(&self.basis.v))
    }
}

/// Newell's method: exact for planar polygons and robust to collinear runs.
fn newell_normal(points: &[Point3]) -> Vec3 {
    let mut n = Vec3::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        n.x += (current.y - next.y) * (current.z + next.z);
        n.y += (current.z - next.z) * (current.x + next.x);
        n.z += (current.x - next.x) * (current.y + next.y);
    }
    n
}

impl Identified for Polygon3 {
    const ID: i32 = 11;
    const NAME: &'static str = "Polygon";
}

impl Shape3 for Polygon3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        Aabb3::from_points(&self.points).into()
    }

    fn contains(&self, point: &Point3) -> bool {
        (point - self.points[0]).dot(&self.basis.w).abs() <= EPSILON
            && point_in_polygon(&self.project(point), &self.projected)
    }

    fn surface_area(&self) -> f64 {
        0.5 * self.newell.norm()
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let normal = &self.basis.w;
        let denom = ray.direction().dot(normal);
        if denom.abs() < EPSILON {
            return f64::NAN;
        }
        let t = (self.points[0] - ray.origin()).dot(normal) / denom;
        if !(t > t_min && t < t_max) {
            return f64::NAN;
        }
        if point_in_polygon(&self.project(&ray.at(t)), &self.projected) {
            t
        } else {
            f64::NAN
        }
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let uv = self.project(&ray.at(t));
        SurfaceIntersection3::new(self, *ray, t, self.basis, uv)
    }
}
