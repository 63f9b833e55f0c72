//! Axis-aligned rectangular cuboid.

use super::{frame, Shape3};
use crate::{Identified, SurfaceIntersection3};
use rtgeo_bounds::{Aabb3, BoundingVolume, BoundingVolume3};
use rtgeo_math::{Point2, Point3, Ray3, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Solid axis-aligned box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RectangularCuboid3 {
    /// Minimum corner.
    pub minimum: Point3,
    /// Maximum corner.
    pub maximum: Point3,
}

impl RectangularCuboid3 {
    /// Create a cuboid from two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            minimum: a.inf(&b),
            maximum: a.sup(&b),
        }
    }

    fn aabb(&self) -> Aabb3 {
        Aabb3::new(self.minimum, self.maximum)
    }

    /// Axis and side (`+1` / `-1`) of the face nearest `p`.
    fn nearest_face(&self, p: &Point3) -> (usize, f64) {
        let mut best = (0, -1.0);
        let mut best_distance = f64::INFINITY;
        for axis in 0..3 {
            for (bound, side) in [(self.minimum[axis], -1.0), (self.maximum[axis], 1.0)] {
                let distance = (p[axis] - bound).abs();
                if distance < best_distance {
                    best_distance = distance;
                    best = (axis, side);
                }
            }
        }
        best
    }
}

impl Identified for RectangularCuboid3 {
    const ID: i32 = 9;
    const NAME: &'static str = "RectangularCuboid";
}

impl Shape3 for RectangularCuboid3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        self.aabb().into()
    }

    fn contains(&self, point: &Point3) -> bool {
        self.aabb().contains(point)
    }

    fn surface_area(&self) -> f64 {
        self.aabb().surface_area()
    }

    fn volume(&self) -> f64 {
        self.aabb().volume()
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        self.aabb().intersection_t(ray, t_min, t_max)
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let p = ray.at(t);
        let (axis, side) = self.nearest_face(&p);
        let (i, j) = ((axis + 1) % 3, (axis + 2) % 3);

        let mut normal = Vec3::zeros();
        normal[axis] = side;
        let mut dpdu = Vec3::zeros();
        dpdu[i] = 1.0;

        let extent = self.maximum - self.minimum;
        let uv = Point2::new(
            (p[i] - self.minimum[i]) / extent[i],
            (p[j] - self.minimum[j]) / extent[j],
        );
        SurfaceIntersection3::new(self, *ray, t, frame(normal, dpdu), uv)
    }
}
