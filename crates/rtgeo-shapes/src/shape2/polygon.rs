//! Simple polygon and the winding-number containment test.

use super::{nearest_edge_crossing, Shape2};
use crate::{GeometryError, Identified};
use rtgeo_bounds::Aabb2;
use rtgeo_math::{Point2, Ray2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A filled simple polygon with at least three vertices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon2 {
    points: Vec<Point2>,
}

impl Polygon2 {
    /// Create a polygon. Fails with fewer than three points.
    pub fn new(points: Vec<Point2>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                shape: Self::NAME,
                required: 3,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// The vertices, in winding order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Enclosed area (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (p, q) = (&self.points[i], &self.points[(i + 1) % n]);
                p.x * q.y - q.x * p.y
            })
            .sum();
        0.5 * twice.abs()
    }
}

impl Identified for Polygon2 {
    const ID: i32 = 104;
    const NAME: &'static str = "Polygon";
}

impl Shape2 for Polygon2 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> Aabb2 {
        Aabb2::from_points(&self.points)
    }

    fn contains(&self, point: &Point2) -> bool {
        point_in_polygon(point, &self.points)
    }

    fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64 {
        nearest_edge_crossing(ray, &self.points, t_min, t_max)
    }
}

/// Test if a point is inside a polygon using the winding number algorithm.
///
/// Handles concave polygons and either winding. Points exactly on an edge
/// may land on either side.
pub(crate) fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut winding = 0i32;
    let n = polygon.len();

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];

        if p1.y <= point.y {
            if p2.y > point.y && is_left(&p1, &p2, point) > 0.0 {
                // Upward crossing
                winding += 1;
            }
        } else if p2.y <= point.y && is_left(&p1, &p2, point) < 0.0 {
            // Downward crossing
            winding -= 1;
        }
    }

    winding != 0
}

/// Twice the signed area of `(p0, p1, p2)`; positive if `p2` is left of
/// the line `p0 → p1`.
#[inline]
fn is_left(p0: &Point2, p1: &Point2, p2: &Point2) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}
