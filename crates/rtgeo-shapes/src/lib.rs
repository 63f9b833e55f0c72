#![warn(missing_docs)]

//! Analytic primitives for the rtgeo intersection kernel.
//!
//! Every primitive answers the same questions: where does a ray first meet
//! it inside a parametric window, does it contain a point, and what volume
//! bounds it. The 3D family additionally builds a [`SurfaceIntersection3`]
//! record (hit point, frames, texture coordinates) on demand.
//!
//! - [`Shape3`] / [`Primitive3`] - 3D contract and its closed family
//! - [`Shape2`] / [`Primitive2`] - 2D contract and its closed family
//! - [`Identified`] - compile-time type id and name, shared with the codec

mod error;
mod intersection;
pub mod shape2;
pub mod shape3;

pub use error::GeometryError;
pub use intersection::SurfaceIntersection3;
pub use shape2::{Circle2, LineSegment2, Polygon2, Primitive2, Rectangle2, Shape2, Triangle2};
pub use shape3::{
    Cone3, Curve3, Cylinder3, Disk3, Hyperboloid3, Paraboloid3, Plane3, Polygon3, Primitive3,
    RectangularCuboid3, Shape3, Sphere3, Torus3, Triangle3, Vertex3,
};

/// Tolerance for parallel-ray and on-surface decisions.
pub const EPSILON: f64 = 1e-9;

/// A concrete primitive type with a stable integer id.
///
/// Ids are part of the binary encoding and must never be reused.
pub trait Identified {
    /// Type id written ahead of every encoded record.
    const ID: i32;
    /// Human-readable type name.
    const NAME: &'static str;
}
