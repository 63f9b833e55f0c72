//! Unbounded volume, reported by shapes with infinite extent.

use crate::{BoundingVolume, BoundingVolume3};
use rtgeo_math::{Point3, Ray3, Transform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A volume covering all of space.
///
/// Every point is inside it, so any parameter of a non-empty window is a
/// valid answer to [`BoundingVolume::intersection_t`]. It reports one just
/// past `t_min`, strictly inside the window like every other volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InfiniteBounds3;

impl BoundingVolume for InfiniteBounds3 {
    fn transform(&self, _transform: &Transform) -> BoundingVolume3 {
        BoundingVolume3::Infinite(*self)
    }

    fn closest_point(&self, point: &Point3) -> Point3 {
        *point
    }

    fn contains(&self, _point: &Point3) -> bool {
        true
    }

    fn surface_area(&self) -> f64 {
        f64::INFINITY
    }

    fn volume(&self) -> f64 {
        f64::INFINITY
    }

    fn intersection_t(&self, _ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let t = if t_min.is_finite() {
            // Step relative to t_min so the sum never rounds back onto it.
            t_min + 0.5 * (t_max - t_min).min(t_min.abs().max(1.0))
        } else {
            2.0 * t_max.min(0.0) - 1.0
        };
        if t > t_min && t < t_max {
            t
        } else {
            f64::NAN
        }
    }

    fn min(&self) -> Point3 {
        Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }

    fn max(&self) -> Point3 {
        Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY)
    }

    /// The origin; the midpoint of the infinite corners is undefined.
    fn midpoint(&self) -> Point3 {
        Point3::origin()
    }
}
