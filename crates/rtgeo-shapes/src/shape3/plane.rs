//! Infinite plane through three points.

use super::{frame, Shape3};
use crate::{Identified, SurfaceIntersection3, EPSILON};
use rtgeo_bounds::{BoundingVolume3, InfiniteBounds3};
use rtgeo_math::{Point2, Point3, Ray3, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Infinite plane through `a`, `b` and `c`.
///
/// The normal follows the winding `a → b → c` (right-hand rule). Collinear
/// points leave the normal undefined and the plane unhittable.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane3 {
    a: Point3,
    b: Point3,
    c: Point3,
    normal: Vec3,
}

impl Plane3 {
    /// Create a plane through three points.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Self { a, b, c, normal }
    }

    /// The three defining points.
    pub fn points(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    /// Unit normal.
    pub fn normal(&self) -> &Vec3 {
        &self.normal
    }

    /// Signed distance from the plane, positive on the normal side.
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.a).dot(&self.normal)
    }
}

impl PartialEq for Plane3 {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.c == other.c
    }
}

impl Identified for Plane3 {
    const ID: i32 = 8;
    const NAME: &'static str = "Plane";
}

impl Shape3 for Plane3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        InfiniteBounds3.into()
    }

    fn contains(&self, point: &Point3) -> bool {
        self.signed_distance(point).abs() <= EPSILON
    }

    fn surface_area(&self) -> f64 {
        f64::INFINITY
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let denom = ray.direction().dot(&self.normal);
        if !(denom.abs() >= EPSILON) {
            return f64::NAN;
        }
        let t = (self.a - ray.origin()).dot(&self.normal) / denom;
        if t > t_min && t < t_max {
            t
        } else {
            f64::NAN
        }
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let basis = frame(self.normal, self.b - self.a);
        let offset = ray.at(t) - self.a;
        let uv = Point2::new(offset.dot(&basis.u), offset.dot(&basis.v));
        SurfaceIntersection3::new(self, *ray, t, basis, uv)
    }
}
