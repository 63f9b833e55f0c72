//! Triangle in the plane.

use super::{cross, nearest_edge_crossing, Shape2};
use crate::Identified;
use rtgeo_bounds::Aabb2;
use rtgeo_math::{Point2, Ray2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A filled triangle, in either winding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle2 {
    /// First corner.
    pub a: Point2,
    /// Second corner.
    pub b: Point2,
    /// Third corner.
    pub c: Point2,
}

impl Triangle2 {
    /// Create a triangle.
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self { a, b, c }
    }

    /// Signed area, positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        0.5 * cross(&(self.b - self.a), &(self.c - self.a))
    }
}

impl Identified for Triangle2 {
    const ID: i32 = 103;
    const NAME: &'static str = "Triangle";
}

impl Shape2 for Triangle2 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> Aabb2 {
        Aabb2::from_points(&[self.a, self.b, self.c])
    }

    fn contains(&self, point: &Point2) -> bool {
        let d0 = cross(&(self.b - self.a), &(point - self.a));
        let d1 = cross(&(self.c - self.b), &(point - self.b));
        let d2 = cross(&(self.a - self.c), &(point - self.c));
        let has_negative = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
        let has_positive = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
        !(has_negative && has_positive)
    }

    fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64 {
        nearest_edge_crossing(ray, &[self.a, self.b, self.c], t_min, t_max)
    }
}
