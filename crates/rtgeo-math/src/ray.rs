//! Rays used as intersection query inputs.

use crate::{Dir2, Dir3, Point2, Point3, Vec2, Vec3};
use thiserror::Error;

/// Rejection of a malformed ray at construction time.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RayError {
    /// The direction was zero-length or contained a non-finite component.
    #[error("ray direction must be finite and non-zero")]
    DegenerateDirection,
}

/// A ray in 3D space defined by an origin and a unit direction.
///
/// The direction is normalized once, at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3 {
    origin: Point3,
    direction: Dir3,
    /// Reciprocal of the direction components, for slab tests.
    inv_direction: Vec3,
}

impl Ray3 {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length or is not finite.
    pub fn new(origin: Point3, direction: Vec3) -> Result<Self, RayError> {
        let length = direction.norm();
        if length == 0.0 || !length.is_finite() {
            return Err(RayError::DegenerateDirection);
        }
        Ok(Self::from_dir(origin, Dir3::new_unchecked(direction / length)))
    }

    /// Create a new ray from an already normalized direction.
    pub fn from_dir(origin: Point3, direction: Dir3) -> Self {
        let inv_direction = Vec3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z);
        Self {
            origin,
            direction,
            inv_direction,
        }
    }

    /// The ray origin.
    #[inline]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// The unit ray direction.
    #[inline]
    pub fn direction(&self) -> &Dir3 {
        &self.direction
    }

    /// Component-wise reciprocal of the direction (infinite on axis-parallel components).
    #[inline]
    pub fn inv_direction(&self) -> &Vec3 {
        &self.inv_direction
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }
}

/// A ray in 2D space defined by an origin and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    origin: Point2,
    direction: Dir2,
}

impl Ray2 {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length or is not finite.
    pub fn new(origin: Point2, direction: Vec2) -> Result<Self, RayError> {
        let length = direction.norm();
        if length == 0.0 || !length.is_finite() {
            return Err(RayError::DegenerateDirection);
        }
        Ok(Self {
            origin,
            direction: Dir2::new_unchecked(direction / length),
        })
    }

    /// The ray origin.
    #[inline]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// The unit ray direction.
    #[inline]
    pub fn direction(&self) -> &Dir2 {
        &self.direction
    }

    /// Evaluate the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> Point2 {
        self.origin + t * self.direction.as_ref()
    }
}
