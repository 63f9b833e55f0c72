//! Axis-aligned bounding rectangle, the bound reported by 2D shapes.

use rtgeo_math::{Point2, Ray2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in 2D.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Aabb2 {
    /// Create an AABB spanning two opposite corners, in any order.
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// The smallest AABB containing every point.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Self {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min = min.inf(p);
            max = max.sup(p);
        }
        Self { min, max }
    }

    /// Whether `point` lies inside or on the rectangle.
    pub fn contains(&self, point: &Point2) -> bool {
        (0..2).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// The point of the rectangle closest to `point`.
    pub fn closest_point(&self, point: &Point2) -> Point2 {
        point.sup(&self.min).inf(&self.max)
    }

    /// Center of the rectangle.
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        let e = self.max - self.min;
        e.x * e.y
    }

    /// Boundary length.
    pub fn perimeter(&self) -> f64 {
        let e = self.max - self.min;
        2.0 * (e.x + e.y)
    }

    /// Parametric distance at which `ray` meets the rectangle boundary
    /// inside `(t_min, t_max)`, or NaN.
    pub fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64 {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        for axis in 0..2 {
            if direction[axis] == 0.0 {
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return f64::NAN;
                }
                continue;
            }
            let t0 = (self.min[axis] - origin[axis]) / direction[axis];
            let t1 = (self.max[axis] - origin[axis]) / direction[axis];
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        if t_near > t_far {
            f64::NAN
        } else if t_near > t_min && t_near < t_max {
            t_near
        } else if t_far > t_min && t_far < t_max {
            t_far
        } else {
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtgeo_math::Vec2;

    #[test]
    fn test_rectangle_measures() {
        let r = Aabb2::new(Point2::new(3.0, 2.0), Point2::origin());
        assert_eq!(r.area(), 6.0);
        assert_eq!(r.perimeter(), 10.0);
        assert_eq!(r.midpoint(), Point2::new(1.5, 1.0));
        assert!(r.contains(&Point2::new(3.0, 0.0)));
        assert_eq!(r.closest_point(&Point2::new(5.0, -1.0)), Point2::new(3.0, 0.0));
    }

    #[test]
    fn test_rectangle_ray() {
        let r = Aabb2::from_points(&[Point2::new(1.0, -1.0), Point2::new(2.0, 1.0)]);
        let ray = Ray2::new(Point2::origin(), Vec2::x()).unwrap();
        assert!((r.intersection_t(&ray, 0.0, 10.0) - 1.0).abs() < 1e-12);
        assert!((r.intersection_t(&ray, 1.5, 10.0) - 2.0).abs() < 1e-12);
        let up = Ray2::new(Point2::origin(), Vec2::y()).unwrap();
        assert!(r.intersection_t(&up, 0.0, 10.0).is_nan());
    }
}
