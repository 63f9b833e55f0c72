#![warn(missing_docs)]

//! Bounding volumes for the rtgeo intersection kernel.
//!
//! A bounding volume is a cheap enclosing shape used to pre-filter ray and
//! overlap queries before the exact primitive test runs.
//!
//! - [`BoundingVolume`] - the shared contract
//! - [`BoundingVolume3`] - the closed family of 3D volumes
//! - [`BoundingSphere3`], [`Aabb3`], [`InfiniteBounds3`] - its members
//! - [`Aabb2`] - the bound reported by 2D shapes

mod aabb;
mod aabb2;
mod infinite;
mod sphere;

pub use aabb::Aabb3;
pub use aabb2::Aabb2;
pub use infinite::InfiniteBounds3;
pub use sphere::BoundingSphere3;

use rtgeo_math::{Point3, Ray3, Transform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A volume enclosing some extent of 3D space.
pub trait BoundingVolume {
    /// A new volume enclosing this one's extent after `transform`.
    fn transform(&self, transform: &Transform) -> BoundingVolume3;

    /// The point of this volume closest to `point`.
    ///
    /// Points already inside the volume are returned unchanged.
    fn closest_point(&self, point: &Point3) -> Point3;

    /// Whether `point` lies inside or on this volume.
    fn contains(&self, point: &Point3) -> bool;

    /// Surface area of the volume's boundary.
    fn surface_area(&self) -> f64;

    /// Enclosed volume.
    fn volume(&self) -> f64;

    /// Parametric distance at which `ray` meets this volume inside
    /// `(t_min, t_max)`, or NaN.
    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64;

    /// Minimum corner of the axis-aligned extent.
    fn min(&self) -> Point3;

    /// Maximum corner of the axis-aligned extent.
    fn max(&self) -> Point3;

    /// Center of the axis-aligned extent.
    fn midpoint(&self) -> Point3 {
        nalgebra::center(&self.min(), &self.max())
    }

    /// Whether `ray` meets this volume inside `(t_min, t_max)`.
    fn intersects(&self, ray: &Ray3, t_min: f64, t_max: f64) -> bool {
        !self.intersection_t(ray, t_min, t_max).is_nan()
    }

    /// Approximate volume/volume overlap test.
    ///
    /// Reports overlap when either volume contains the other's closest point
    /// to its own midpoint. This is a heuristic, not an exact separating-axis
    /// test: it can miss overlaps between volumes whose midpoints are far
    /// from the shared region.
    fn intersects_volume(&self, other: &dyn BoundingVolume) -> bool {
        other.contains(&self.closest_point(&other.midpoint()))
            || self.contains(&other.closest_point(&self.midpoint()))
    }
}

/// The closed family of 3D bounding volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundingVolume3 {
    /// A bounding sphere.
    Sphere(BoundingSphere3),
    /// An axis-aligned bounding box.
    Aabb(Aabb3),
    /// Unbounded extent (planes).
    Infinite(InfiniteBounds3),
}

impl BoundingVolume3 {
    fn as_dyn(&self) -> &dyn BoundingVolume {
        match self {
            BoundingVolume3::Sphere(sphere) => sphere,
            BoundingVolume3::Aabb(aabb) => aabb,
            BoundingVolume3::Infinite(infinite) => infinite,
        }
    }
}

impl BoundingVolume for BoundingVolume3 {
    fn transform(&self, transform: &Transform) -> BoundingVolume3 {
        self.as_dyn().transform(transform)
    }

    fn closest_point(&self, point: &Point3) -> Point3 {
        self.as_dyn().closest_point(point)
    }

    fn contains(&self, point: &Point3) -> bool {
        self.as_dyn().contains(point)
    }

    fn surface_area(&self) -> f64 {
        self.as_dyn().surface_area()
    }

    fn volume(&self) -> f64 {
        self.as_dyn().volume()
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        self.as_dyn().intersection_t(ray, t_min, t_max)
    }

    fn min(&self) -> Point3 {
        self.as_dyn().min()
    }

    fn max(&self) -> Point3 {
        self.as_dyn().max()
    }

    fn midpoint(&self) -> Point3 {
        self.as_dyn().midpoint()
    }
}

impl From<BoundingSphere3> for BoundingVolume3 {
    fn from(sphere: BoundingSphere3) -> Self {
        BoundingVolume3::Sphere(sphere)
    }
}

impl From<Aabb3> for BoundingVolume3 {
    fn from(aabb: Aabb3) -> Self {
        BoundingVolume3::Aabb(aabb)
    }
}

impl From<InfiniteBounds3> for BoundingVolume3 {
    fn from(infinite: InfiniteBounds3) -> Self {
        BoundingVolume3::Infinite(infinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_heuristic_detects_nested_and_disjoint() {
        let big = BoundingVolume3::from(BoundingSphere3::new(Point3::origin(), 5.0));
        let small = BoundingVolume3::from(Aabb3::new(
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ));
        let far = BoundingVolume3::from(BoundingSphere3::new(Point3::new(20.0, 0.0, 0.0), 1.0));

        assert!(big.intersects_volume(&small));
        assert!(small.intersects_volume(&big));
        assert!(!big.intersects_volume(&far));
    }

    #[test]
    fn test_overlap_heuristic_partial_overlap() {
        let a = BoundingSphere3::new(Point3::origin(), 1.0);
        let b = BoundingSphere3::new(Point3::new(1.5, 0.0, 0.0), 1.0);
        assert!(a.intersects_volume(&b));
    }

    #[test]
    fn test_infinite_overlaps_everything() {
        let infinite = BoundingVolume3::from(InfiniteBounds3);
        let sphere = BoundingSphere3::new(Point3::new(1e6, 0.0, 0.0), 1.0);
        assert!(infinite.intersects_volume(&sphere));
        assert!(sphere.intersects_volume(&infinite));
    }

    #[test]
    fn test_enum_dispatch_matches_variant() {
        let sphere = BoundingSphere3::new(Point3::new(1.0, 2.0, 3.0), 2.0);
        let volume = BoundingVolume3::from(sphere);
        assert_eq!(volume.surface_area(), sphere.surface_area());
        assert_eq!(volume.min(), sphere.min());
        assert_eq!(volume.midpoint(), Point3::new(1.0, 2.0, 3.0));
    }
}
