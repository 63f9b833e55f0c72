//! Axis-aligned rectangle.

use super::Shape2;
use crate::Identified;
use rtgeo_bounds::Aabb2;
use rtgeo_math::{Point2, Ray2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A filled axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle2 {
    /// Minimum corner.
    pub minimum: Point2,
    /// Maximum corner.
    pub maximum: Point2,
}

impl Rectangle2 {
    /// Create a rectangle from two opposite corners, in any order.
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            minimum: a.inf(&b),
            maximum: a.sup(&b),
        }
    }
}

impl Identified for Rectangle2 {
    const ID: i32 = 102;
    const NAME: &'static str = "Rectangle";
}

impl Shape2 for Rectangle2 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> Aabb2 {
        Aabb2::new(self.minimum, self.maximum)
    }

    fn contains(&self, point: &Point2) -> bool {
        self.bounding_volume().contains(point)
    }

    fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64 {
        self.bounding_volume().intersection_t(ray, t_min, t_max)
    }
}
