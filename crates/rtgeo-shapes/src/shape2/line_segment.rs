//! Line segment.

use super::{cross, ray_segment, Shape2};
use crate::{Identified, EPSILON};
use rtgeo_bounds::Aabb2;
use rtgeo_math::{Point2, Ray2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The segment between `a` and `b`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineSegment2 {
    /// Start point.
    pub a: Point2,
    /// End point.
    pub b: Point2,
}

impl LineSegment2 {
    /// Create a segment.
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }
}

impl Identified for LineSegment2 {
    const ID: i32 = 105;
    const NAME: &'static str = "LineSegment";
}

impl Shape2 for LineSegment2 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> Aabb2 {
        Aabb2::new(self.a, self.b)
    }

    fn contains(&self, point: &Point2) -> bool {
        let edge = self.b - self.a;
        let offset = point - self.a;
        let length = edge.norm();
        if length == 0.0 {
            return offset.norm() <= EPSILON;
        }
        let along = offset.dot(&edge) / (length * length);
        (0.0..=1.0).contains(&along) && (cross(&edge, &offset) / length).abs() <= EPSILON
    }

    fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64 {
        ray_segment(ray, &self.a, &self.b, t_min, t_max).unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rtgeo_math::Vec2;

    fn diagonal() -> LineSegment2 {
        LineSegment2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0))
    }

    #[test]
    fn test_crossing() {
        let ray = Ray2::new(Point2::new(0.0, 1.0), Vec2::x()).unwrap();
        assert_relative_eq!(diagonal().intersection_t(&ray, 0.0, 10.0), 1.0, epsilon = 1e-12);
        assert!(diagonal().intersection_t(&ray, 0.0, 0.5).is_nan());
    }

    #[test]
    fn test_beyond_end_and_parallel() {
        let beyond = Ray2::new(Point2::new(0.0, 3.0), Vec2::x()).unwrap();
        assert!(diagonal().intersection_t(&beyond, 0.0, 10.0).is_nan());
        let collinear = Ray2::new(Point2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)).unwrap();
        assert!(diagonal().intersection_t(&collinear, 0.0, 10.0).is_nan());
    }

    #[test]
    fn test_contains() {
        assert!(diagonal().contains(&Point2::new(1.0, 1.0)));
        assert!(!diagonal().contains(&Point2::new(3.0, 3.0)));
        assert!(!diagonal().contains(&Point2::new(1.0, 1.1)));
        assert_relative_eq!(diagonal().length(), 8.0_f64.sqrt());
    }
}
