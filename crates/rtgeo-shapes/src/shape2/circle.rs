//! Disc.

use super::Shape2;
use crate::Identified;
use rtgeo_bounds::Aabb2;
use rtgeo_math::{Point2, Ray2, Vec2};
use rtgeo_solve::solve_quadratic;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A filled circle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle2 {
    /// Circle center.
    pub center: Point2,
    /// Circle radius.
    pub radius: f64,
}

impl Circle2 {
    /// Create a circle.
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Identified for Circle2 {
    const ID: i32 = 101;
    const NAME: &'static str = "Circle";
}

impl Shape2 for Circle2 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> Aabb2 {
        let r = Vec2::repeat(self.radius);
        Aabb2::new(self.center - r, self.center + r)
    }

    fn contains(&self, point: &Point2) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    fn intersection_t(&self, ray: &Ray2, t_min: f64, t_max: f64) -> f64 {
        let oc = ray.origin() - self.center;
        let d = ray.direction().as_ref();
        let [r0, r1] = solve_quadratic(
            d.dot(d),
            2.0 * oc.dot(d),
            oc.dot(&oc) - self.radius * self.radius,
        );
        let (near, far) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        if near > t_min && near < t_max {
            near
        } else if far > t_min && far < t_max {
            far
        } else {
            f64::NAN
        }
    }
}
