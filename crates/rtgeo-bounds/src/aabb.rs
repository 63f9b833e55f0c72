//! Axis-aligned bounding box in 3D.

use crate::{BoundingVolume, BoundingVolume3};
use rtgeo_math::{Point3, Ray3, Transform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB spanning two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// The smallest AABB containing every point.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Expand the AABB by a distance in all directions.
    pub fn expand(&mut self, amount: f64) {
        self.min -= rtgeo_math::Vec3::repeat(amount);
        self.max += rtgeo_math::Vec3::repeat(amount);
    }

    /// Entry and exit parameters of the slab test, without a window.
    ///
    /// Returns `None` when the ray line misses the box.
    pub fn slab(&self, ray: &Ray3) -> Option<(f64, f64)> {
        let origin = ray.origin();
        let direction = ray.direction();
        let inv = ray.inv_direction();

        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        for axis in 0..3 {
            if direction[axis] == 0.0 {
                // Parallel to this slab: inside it for every t, or never.
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            let t0 = (self.min[axis] - origin[axis]) * inv[axis];
            let t1 = (self.max[axis] - origin[axis]) * inv[axis];
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        if t_near <= t_far {
            Some((t_near, t_far))
        } else {
            None
        }
    }

    fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }
}

impl BoundingVolume for Aabb3 {
    fn transform(&self, transform: &Transform) -> BoundingVolume3 {
        let corners = self.corners().map(|c| transform.apply_point(&c));
        BoundingVolume3::Aabb(Aabb3::from_points(&corners))
    }

    fn closest_point(&self, point: &Point3) -> Point3 {
        point.sup(&self.min).inf(&self.max)
    }

    fn contains(&self, point: &Point3) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    fn surface_area(&self) -> f64 {
        let e = self.max - self.min;
        2.0 * (e.x * e.y + e.y * e.z + e.z * e.x)
    }

    fn volume(&self) -> f64 {
        let e = self.max - self.min;
        e.x * e.y * e.z
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let Some((t_near, t_far)) = self.slab(ray) else {
            return f64::NAN;
        };
        if t_near > t_min && t_near < t_max {
            t_near
        } else if t_far > t_min && t_far < t_max {
            t_far
        } else {
            f64::NAN
        }
    }

    fn min(&self) -> Point3 {
        self.min
    }

    fn max(&self) -> Point3 {
        self.max
    }
}
