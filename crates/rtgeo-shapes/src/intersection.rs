//! The record built for a confirmed ray hit.

use crate::Shape3;
use rtgeo_math::{OrthonormalBasis, Point2, Point3, Ray3, Vec3};

/// Differential geometry at a ray/surface hit.
///
/// Built only after [`Shape3::intersection_t`] reported a hit, and borrowed
/// from the shape that produced it.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceIntersection3<'a> {
    /// The query ray.
    pub ray: Ray3,
    /// The primitive that was hit.
    pub shape: &'a dyn Shape3,
    /// Ray parameter of the hit.
    pub t: f64,
    /// Hit point in the shape's space.
    pub point: Point3,
    /// Frame whose `w` axis is the true surface normal.
    pub geometric_frame: OrthonormalBasis,
    /// Frame whose `w` axis is the shading normal.
    ///
    /// Identical to `geometric_frame` except for primitives with
    /// per-vertex normals.
    pub shading_frame: OrthonormalBasis,
    /// Surface parameters of the hit.
    pub texture_coordinates: Point2,
}

impl<'a> SurfaceIntersection3<'a> {
    /// Record a hit whose shading frame equals its geometric frame.
    pub fn new(
        shape: &'a dyn Shape3,
        ray: Ray3,
        t: f64,
        frame: OrthonormalBasis,
        texture_coordinates: Point2,
    ) -> Self {
        Self {
            ray,
            shape,
            t,
            point: ray.at(t),
            geometric_frame: frame,
            shading_frame: frame,
            texture_coordinates,
        }
    }

    /// Replace the shading frame.
    pub fn with_shading_frame(mut self, frame: OrthonormalBasis) -> Self {
        self.shading_frame = frame;
        self
    }

    /// The geometric surface normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.geometric_frame.w
    }

    /// The shading normal.
    #[inline]
    pub fn shading_normal(&self) -> Vec3 {
        self.shading_frame.w
    }
}
