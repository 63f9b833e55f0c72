//! 2D primitives and their intersection contract.

mod circle;
mod line_segment;
mod polygon;
mod rectangle;
mod triangle;

pub use circle::Circle2;
pub use line_segment::LineSegment2;
pub use polygon::Polygon2;
pub use rectangle::Rectangle2;
pub use triangle::Triangle2;

pub(crate) use polygon::point_in_polygon;

use crate::EPSILON;
use rtgeo_bounds::Aabb2;
use rtgeo_math::{Point2, Ray2, Vec2};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A primitive that rays can hit in the plane.
pub trait Shape2: fmt::Debug + Send + Sync {
    /// Type id, as written by the codec.
    fn id(&self) -> i32;

    /// Type name.
    fn name(&self) -> &'static str;

    /// The axis-aligned box enclosing the primitive.
    fn bounding_volume(&self) -> Aabb2;

    /// Whether `point` lies inside or on the primitive.
    fn contains(&self, point: &Point2) -> bool;

    /// Ray parameter of the nearest boundary crossing with
    /// `t_min < t < t_max`, or NaN.
    fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64;

    /// Whether the ray crosses the boundary inside the window.
    fn intersects(&self, ray: &Ray2, t_min: f64, t_max: f64) -> bool {
        !self.intersection_t(ray, t_min, t_max).is_nan()
    }
}

/// The closed family of 2D primitives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive2 {
    /// Disc.
    Circle(Circle2),
    /// Axis-aligned rectangle.
    Rectangle(Rectangle2),
    /// Triangle.
    Triangle(Triangle2),
    /// Simple polygon.
    Polygon(Polygon2),
    /// Line segment.
    LineSegment(LineSegment2),
}

impl Primitive2 {
    fn as_dyn(&self) -> &dyn Shape2 {
        match self {
            Primitive2::Circle(s) => s,
            Primitive2::Rectangle(s) => s,
            Primitive2::Triangle(s) => s,
            Primitive2::Polygon(s) => s,
            Primitive2::LineSegment(s) => s,
        }
    }
}

impl Shape2 for Primitive2 {
    fn id(&self) -> i32 {
        self.as_dyn().id()
    }

    fn name(&self) -> &'static str {
        self.as_dyn().name()
    }

    fn bounding_volume(&self) -> Aabb2 {
        self.as_dyn().bounding_volume()
    }

    fn contains(&self, point: &Point2) -> bool {
        self.as_dyn().contains(point)
    }

    fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64 {
        self.as_dyn().intersection_t(ray, t_min, t_max)
    }
}

impl From<Circle2> for Primitive2 {
    fn from(shape: Circle2) -> Self {
        Primitive2::Circle(shape)
    }
}

impl From<Rectangle2> for Primitive2 {
    fn from(shape: Rectangle2) -> Self {
        Primitive2::Rectangle(shape)
    }
}

impl From<Triangle2> for Primitive2 {
    fn from(shape: Triangle2) -> Self {
        Primitive2::Triangle(shape)
    }
}

impl From<Polygon2> for Primitive2 {
    fn from(shape: Polygon2) -> Self {
        Primitive2::Polygon(shape)
    }
}

impl From<LineSegment2> for Primitive2 {
    fn from(shape: LineSegment2) -> Self {
        Primitive2::LineSegment(shape)
    }
}

/// 2D cross product (signed parallelogram area).
#[inline]
pub(crate) fn cross(a: &Vec2, b: &Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Ray parameter where `ray` crosses segment `a → b`, if inside the window.
///
/// Parallel rays never cross, even when collinear with the segment.
pub(crate) fn ray_segment(ray: &Ray2, a: &Point2, b: &Point2, t_min: f64, t_max: f64) -> Option<f64> {
    let edge = b - a;
    let d = ray.direction().into_inner();
    let denom = cross(&d, &edge);
    if denom.abs() < EPSILON {
        return None;
    }
    let offset = a - ray.origin();
    let t = cross(&offset, &edge) / denom;
    let s = cross(&offset, &d) / denom;
    ((0.0..=1.0).contains(&s) && t > t_min && t < t_max).then_some(t)
}

/// Nearest crossing of a closed edge loop.
pub(crate) fn nearest_edge_crossing(ray: &Ray2, vertices: &[Point2], t_min: f64, t_max: f64) -> f64 {
    let n = vertices.len();
    (0..n)
        .filter_map(|i| ray_segment(ray, &vertices[i], &vertices[(i + 1) % n], t_min, t_max))
        .fold(f64::NAN, f64::min)
}
