//! Flat ribbon along a piecewise cubic Bézier curve.
//!
//! Ray queries move the control points into a frame where the ray runs down
//! the +z axis from the origin, then recursively split each segment until it
//! is nearly straight and test the ribbon against the origin there.

use super::{frame, Shape3};
use crate::{GeometryError, Identified, SurfaceIntersection3};
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{OrthonormalBasis, Point2, Point3, Ray3, Vec2, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deepest subdivision of a single segment.
const MAX_DEPTH: i32 = 10;

/// Samples per segment when locating the closest curve parameter.
const CLOSEST_SAMPLES: usize = 32;

/// A ribbon whose width varies linearly from `width_start` to `width_end`
/// along a chain of cubic Bézier segments sharing endpoints.
///
/// The ribbon always faces the incoming ray.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Curve3 {
    points: Vec<Point3>,
    width_start: f64,
    width_end: f64,
}

/// A ribbon hit in ray space.
#[derive(Debug, Clone, Copy)]
struct CurveHit {
    t: f64,
    u: f64,
    v: f64,
}

type Segment = [Vec3; 4];

impl Curve3 {
    /// Create a curve from `3n + 1` control points (`n >= 1` segments).
    pub fn new(points: Vec<Point3>, width_start: f64, width_end: f64) -> Result<Self, GeometryError> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return Err(GeometryError::InvalidControlPointCount(points.len()));
        }
        Ok(Self {
            points,
            width_start,
            width_end,
        })
    }

    /// The control points.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Width at the first control point.
    pub fn width_start(&self) -> f64 {
        self.width_start
    }

    /// Width at the last control point.
    pub fn width_end(&self) -> f64 {
        self.width_end
    }

    fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    fn width_at(&self, u: f64) -> f64 {
        self.width_start + (self.width_end - self.width_start) * u
    }

    fn segment(&self, index: usize) -> Segment {
        let p = &self.points[3 * index..3 * index + 4];
        [p[0].coords, p[1].coords, p[2].coords, p[3].coords]
    }

    /// Point and tangent at global parameter `u` in `[0, 1]`.
    fn evaluate(&self, u: f64) -> (Point3, Vec3) {
        let n = self.segment_count();
        let scaled = u.clamp(0.0, 1.0) * n as f64;
        let index = (scaled.floor() as usize).min(n - 1);
        let (p, dp) = eval_bezier(&self.segment(index), scaled - index as f64);
        (Point3::from(p), dp * n as f64)
    }

    /// Global parameter of the curve point nearest `point`.
    fn closest_parameter(&self, point: &Point3) -> f64 {
        let samples = CLOSEST_SAMPLES * self.segment_count();
        let distance = |u: f64| (self.evaluate(u).0 - point).norm_squared();

        let step = 1.0 / samples as f64;
        let mut best = 0.0;
        let mut best_distance = f64::INFINITY;
        for i in 0..=samples {
            let u = i as f64 * step;
            let d = distance(u);
            if d < best_distance {
                best = u;
                best_distance = d;
            }
        }

        // Ternary refinement within the bracketing samples.
        let (mut lo, mut hi) = ((best - step).max(0.0), (best + step).min(1.0));
        for _ in 0..40 {
            let m1 = lo + (hi - lo) / 3.0;
            let m2 = hi - (hi - lo) / 3.0;
            if distance(m1) < distance(m2) {
                hi = m2;
            } else {
                lo = m1;
            }
        }
        0.5 * (lo + hi)
    }

    /// Nearest ribbon hit inside the window.
    fn hit(&self, ray: &Ray3, t_min: f64, t_max: f64) -> Option<CurveHit> {
        let basis = OrthonormalBasis::from_w(ray.direction());
        let origin = ray.origin().coords;
        let to_ray = |p: &Vec3| basis.to_local(&(p - origin));

        let n = self.segment_count();
        let max_width = self.width_start.max(self.width_end);
        let mut best: Option<CurveHit> = None;
        for index in 0..n {
            let segment = self.segment(index).map(|p| to_ray(&p));
            let depth = subdivision_depth(&segment, max_width);
            let u0 = index as f64 / n as f64;
            let u1 = (index + 1) as f64 / n as f64;
            let limit = best.map_or(t_max, |hit| hit.t);
            if let Some(hit) = self.recurse(&segment, u0, u1, depth, t_min, limit) {
                best = Some(hit);
            }
        }
        best
    }

    fn recurse(
        &self,
        cp: &Segment,
        u0: f64,
        u1: f64,
        depth: i32,
        t_min: f64,
        t_max: f64,
    ) -> Option<CurveHit> {
        let half_width = 0.5 * self.width_at(u0).max(self.width_at(u1));

        // Ray-space bounds of this piece must straddle the ray (the z axis)
        // and overlap the window.
        let (lo, hi) = cp.iter().fold(
            (Vec3::repeat(f64::INFINITY), Vec3::repeat(f64::NEG_INFINITY)),
            |(lo, hi), p| (lo.inf(p), hi.sup(p)),
        );
        if lo.x - half_width > 0.0
            || hi.x + half_width < 0.0
            || lo.y - half_width > 0.0
            || hi.y + half_width < 0.0
            || hi.z + half_width <= t_min
            || lo.z - half_width >= t_max
        {
            return None;
        }

        if depth > 0 {
            let [left, right] = split_bezier(cp);
            let mid = 0.5 * (u0 + u1);
            let near = self.recurse(&left, u0, mid, depth - 1, t_min, t_max);
            let limit = near.map_or(t_max, |hit| hit.t);
            let far = self.recurse(&right, mid, u1, depth - 1, t_min, limit);
            return far.or(near);
        }

        self.leaf(cp, u0, u1, t_min, t_max)
    }

    /// Treat a nearly straight piece as a line and test the closest point.
    fn leaf(&self, cp: &Segment, u0: f64, u1: f64, t_min: f64, t_max: f64) -> Option<CurveHit> {
        // The origin must lie between the perpendiculars at both ends.
        let start_edge = (cp[1].y - cp[0].y) * -cp[0].y + cp[0].x * (cp[0].x - cp[1].x);
        if start_edge < 0.0 {
            return None;
        }
        let end_edge = (cp[2].y - cp[3].y) * -cp[3].y + cp[3].x * (cp[3].x - cp[2].x);
        if end_edge < 0.0 {
            return None;
        }

        let segment = Vec2::new(cp[3].x - cp[0].x, cp[3].y - cp[0].y);
        let denom = segment.norm_squared();
        if denom == 0.0 {
            return None;
        }
        let w = ((-cp[0].x * segment.x) + (-cp[0].y * segment.y)) / denom;

        let u = (u0 + (u1 - u0) * w).clamp(u0, u1);
        let width = self.width_at(u);
        let (pc, dpcdw) = eval_bezier(cp, w.clamp(0.0, 1.0));
        let distance2 = pc.x * pc.x + pc.y * pc.y;
        if distance2 > width * width * 0.25 {
            return None;
        }
        if !(pc.z > t_min && pc.z < t_max) {
            return None;
        }

        let distance = distance2.sqrt();
        let edge = dpcdw.x * -pc.y + pc.x * dpcdw.y;
        let v = if edge > 0.0 {
            0.5 + distance / width
        } else {
            0.5 - distance / width
        };
        Some(CurveHit { t: pc.z, u, v })
    }
}

/// Subdivision depth that makes each piece flat to within a twentieth of
/// the ribbon width.
fn subdivision_depth(cp: &Segment, width: f64) -> i32 {
    let mut l0: f64 = 0.0;
    for i in 0..2 {
        let second = cp[i] - 2.0 * cp[i + 1] + cp[i + 2];
        l0 = l0.max(second.x.abs()).max(second.y.abs()).max(second.z.abs());
    }
    let eps = width * 0.05;
    if l0 <= 0.0 || eps <= 0.0 {
        return 0;
    }
    let r0 = (std::f64::consts::SQRT_2 * 6.0 * l0 / (8.0 * eps)).log2() / 2.0;
    (r0.round() as i32).clamp(0, MAX_DEPTH)
}

/// De Casteljau split at the midpoint.
fn split_bezier(cp: &Segment) -> [Segment; 2] {
    let m01 = (cp[0] + cp[1]) * 0.5;
    let m12 = (cp[1] + cp[2]) * 0.5;
    let m23 = (cp[2] + cp[3]) * 0.5;
    let m012 = (m01 + m12) * 0.5;
    let m123 = (m12 + m23) * 0.5;
    let mid = (m012 + m123) * 0.5;
    [[cp[0], m01, m012, mid], [mid, m123, m23, cp[3]]]
}

/// Point and derivative of a cubic Bézier at `u`.
fn eval_bezier(cp: &Segment, u: f64) -> (Vec3, Vec3) {
    let lerp = |a: &Vec3, b: &Vec3| a + (b - a) * u;
    let a = [lerp(&cp[0], &cp[1]), lerp(&cp[1], &cp[2]), lerp(&cp[2], &cp[3])];
    let b = [lerp(&a[0], &a[1]), lerp(&a[1], &a[2])];
    (lerp(&b[0], &b[1]), 3.0 * (b[1] - b[0]))
}

impl Identified for Curve3 {
    const ID: i32 = 12;
    const NAME: &'static str = "Curve";
}

impl Shape3 for Curve3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Control-point hull grown by half the widest width.
    fn bounding_volume(&self) -> BoundingVolume3 {
        let mut aabb = Aabb3::from_points(&self.points);
        aabb.expand(0.5 * self.width_start.max(self.width_end));
        aabb.into()
    }

    /// Whether `point` is within half the local width of the curve.
    fn contains(&self, point: &Point3) -> bool {
        let u = self.closest_parameter(point);
        let (on_curve, _) = self.evaluate(u);
        (on_curve - point).norm() <= 0.5 * self.width_at(u)
    }

    /// Ribbon area: arc length weighted by local width.
    fn surface_area(&self) -> f64 {
        let samples = CLOSEST_SAMPLES * self.segment_count();
        let step = 1.0 / samples as f64;
        (0..samples)
            .map(|i| {
                let u = (i as f64 + 0.5) * step;
                self.evaluate(u).1.norm() * step * self.width_at(u)
            })
            .sum()
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        self.hit(ray, t_min, t_max).map_or(f64::NAN, |hit| hit.t)
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let point = ray.at(t);
        let u = self.closest_parameter(&point);
        let (on_curve, tangent) = self.evaluate(u);

        // Which side of the spine the hit lies on, seen from the ray.
        let offset = point - on_curve;
        let side = tangent.cross(&offset).dot(ray.direction().as_ref());
        let half = offset.norm() / self.width_at(u).max(f64::MIN_POSITIVE);
        let v = if side < 0.0 { 0.5 + half } else { 0.5 - half };

        let normal = -ray.direction().into_inner();
        SurfaceIntersection3::new(self, *ray, t, frame(normal, tangent), Point2::new(u, v))
    }

    fn intersection(&self, ray: &Ray3, t_min: f64, t_max: f64) -> Option<SurfaceIntersection3<'_>> {
        let hit = self.hit(ray, t_min, t_max)?;
        let (_, tangent) = self.evaluate(hit.u);
        let normal = -ray.direction().into_inner();
        Some(SurfaceIntersection3::new(
            self,
            *ray,
            hit.t,
            frame(normal, tangent),
            Point2::new(hit.u, hit.v),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// A straight single-segment curve along x from 0 to 3, 0.2 wide.
    fn straight() -> Curve3 {
        Curve3::new(
            (0..4).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect(),
            0.2,
            0.2,
        )
        .unwrap()
    }

    /// Two segments bending up in z.
    fn arch() -> Curve3 {
        Curve3::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 2.0),
                Point3::new(2.0, 0.0, 2.0),
                Point3::new(3.0, 0.0, 2.0),
                Point3::new(4.0, 0.0, 1.0),
                Point3::new(4.0, 0.0, 0.0),
            ],
            0.1,
            0.3,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_control_point_counts() {
        for count in [0, 1, 3, 5, 6, 8] {
            let points = vec![Point3::origin(); count];
            assert_eq!(
                Curve3::new(points, 1.0, 1.0),
                Err(GeometryError::InvalidControlPointCount(count))
            );
        }
        assert!(Curve3::new(vec![Point3::origin(); 7], 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_ray_hits_straight_ribbon() {
        let ray = Ray3::new(Point3::new(1.5, 0.05, 5.0), -Vec3::z()).unwrap();
        let shape = straight();
        let hit = shape.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        assert_relative_eq!(hit.t, 5.0, epsilon = 1e-9);
        assert_relative_eq!(hit.texture_coordinates.x, 0.5, epsilon = 1e-6);
        assert!((hit.texture_coordinates.y - 0.5).abs() > 0.2);
        // The ribbon faces the ray.
        assert!((hit.normal() - Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_ray_beside_ribbon_misses() {
        let ray = Ray3::new(Point3::new(1.5, 0.15, 5.0), -Vec3::z()).unwrap();
        assert!(straight().intersection_t(&ray, 0.0, f64::INFINITY).is_nan());
        let past_end = Ray3::new(Point3::new(3.5, 0.0, 5.0), -Vec3::z()).unwrap();
        assert!(straight().intersection_t(&past_end, 0.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_arch_hit_lies_on_curve() {
        let curve = arch();
        let ray = Ray3::new(Point3::new(2.0, -5.0, 1.95), Vec3::y()).unwrap();
        let t = curve.intersection_t(&ray, 0.0, f64::INFINITY);
        assert_relative_eq!(t, 5.0, epsilon = 1e-3);
        let p = ray.at(t);
        assert!(curve.contains(&Point3::new(p.x, 0.0, p.z)));

        let shadow = curve.intersection_t(&ray, 0.0, 4.0);
        assert!(shadow.is_nan());
    }

    #[test]
    fn test_default_surface_matches_direct_intersection() {
        let curve = arch();
        let ray = Ray3::new(Point3::new(0.5, -5.0, 1.2), Vec3::y()).unwrap();
        let direct = curve.intersection(&ray, 0.0, f64::INFINITY).unwrap();
        let rebuilt = curve.surface_at(&ray, direct.t);
        assert_relative_eq!(
            direct.texture_coordinates.x,
            rebuilt.texture_coordinates.x,
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_area_and_bounds() {
        assert_relative_eq!(straight().surface_area(), 0.6, epsilon = 1e-9);
        let bounds = straight().bounding_volume();
        assert_eq!(
            bounds,
            BoundingVolume3::Aabb(Aabb3::new(
                Point3::new(-0.1, -0.1, -0.1),
                Point3::new(3.1, 0.1, 0.1)
            ))
        );
    }
}
