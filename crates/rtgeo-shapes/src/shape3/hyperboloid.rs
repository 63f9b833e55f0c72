//! Swept hyperboloid of revolution.

use super::{frame, nearest_root, Shape3};
use crate::{Identified, SurfaceIntersection3, EPSILON};
use log::debug;
use rtgeo_bounds::{Aabb3, BoundingVolume3};
use rtgeo_math::{Angle, Point2, Point3, Ray3, Vec3};
use rtgeo_solve::solve_quadratic;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attempts at stepping along the ruling before giving up on the fit.
const MAX_FIT_STEPS: usize = 32;

/// Subintervals for the numeric area integral (even, for Simpson's rule).
const AREA_STEPS: usize = 64;

/// Surface swept by revolving the segment `a → b` around the z axis, from
/// azimuth 0 to `phi_max`.
///
/// The implicit form is `ah (x^2 + y^2) - ch z^2 = 1`, with `ah` and `ch`
/// fitted from the segment at construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hyperboloid3 {
    phi_max: Angle,
    a: Point3,
    b: Point3,
    z_min: f64,
    z_max: f64,
    r_max: f64,
    ah: f64,
    ch: f64,
}

impl Hyperboloid3 {
    /// Create a hyperboloid from the two ends of its ruling.
    pub fn new(phi_max: Angle, a: Point3, b: Point3) -> Self {
        let (ah, ch) = fit_coefficients(&a, &b);
        Self {
            phi_max,
            a,
            b,
            z_min: a.z.min(b.z),
            z_max: a.z.max(b.z),
            r_max: a.x.hypot(a.y).max(b.x.hypot(b.y)),
            ah,
            ch,
        }
    }

    /// Sweep angle.
    pub fn phi_max(&self) -> Angle {
        self.phi_max
    }

    /// First end of the ruling.
    pub fn a(&self) -> &Point3 {
        &self.a
    }

    /// Second end of the ruling.
    pub fn b(&self) -> &Point3 {
        &self.b
    }

    /// Azimuth of `p` measured from the ruling at the same height, and the
    /// ruling parameter `v` of that height.
    fn sweep(&self, p: &Point3) -> (f64, f64) {
        let v = (p.z - self.a.z) / (self.b.z - self.a.z);
        let ruling = self.a + (self.b - self.a) * v;
        let mut phi = (ruling.x * p.y - p.x * ruling.y).atan2(p.x * ruling.x + p.y * ruling.y);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        (phi, v)
    }

    fn in_range(&self, p: &Point3) -> bool {
        if p.z < self.z_min || p.z > self.z_max {
            return false;
        }
        let (phi, _) = self.sweep(p);
        phi <= self.phi_max.radians()
    }

    /// Profile radius at height `z`.
    fn radius_at(&self, z: f64) -> f64 {
        ((1.0 + self.ch * z * z) / self.ah).sqrt()
    }
}

/// Fit `ah`, `ch` so both segment ends satisfy the implicit form.
///
/// Steps a probe point along the ruling until the 2x2 system is
/// well-conditioned. Returns NaN coefficients (a surface no ray can hit)
/// when no step succeeds.
fn fit_coefficients(a: &Point3, b: &Point3) -> (f64, f64) {
    let (p1, p2) = if b.z == 0.0 { (b, a) } else { (a, b) };
    let xy2 = p2.x * p2.x + p2.y * p2.y;
    let mut pp = *p1;
    for _ in 0..MAX_FIT_STEPS {
        pp += 2.0 * (p2 - p1);
        let xy1 = pp.x * pp.x + pp.y * pp.y;
        let ah = (1.0 / xy1 - (pp.z * pp.z) / (xy1 * p2.z * p2.z))
            / (1.0 - (xy2 * pp.z * pp.z) / (xy1 * p2.z * p2.z));
        let ch = (ah * xy2 - 1.0) / (p2.z * p2.z);
        if ah.is_finite() && ch.is_finite() {
            return (ah, ch);
        }
    }
    debug!("hyperboloid fit did not converge for ruling {a:?} -> {b:?}");
    (f64::NAN, f64::NAN)
}

// The cached fit can be NaN for a flat ruling, so only the defining fields
// take part in equality.
impl PartialEq for Hyperboloid3 {
    fn eq(&self, other: &Self) -> bool {
        self.phi_max == other.phi_max && self.a == other.a && self.b == other.b
    }
}

impl Identified for Hyperboloid3 {
    const ID: i32 = 6;
    const NAME: &'static str = "Hyperboloid";
}

impl Shape3 for Hyperboloid3 {
    fn id(&self) -> i32 {
        Self::ID
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bounding_volume(&self) -> BoundingVolume3 {
        Aabb3::new(
            Point3::new(-self.r_max, -self.r_max, self.z_min),
            Point3::new(self.r_max, self.r_max, self.z_max),
        )
        .into()
    }

    fn contains(&self, point: &Point3) -> bool {
        let f = self.ah * (point.x * point.x + point.y * point.y) - self.ch * point.z * point.z;
        (f - 1.0).abs() <= EPSILON && self.in_range(point)
    }

    /// Simpson's rule over the profile curve; there is no convenient closed
    /// form for a general ruling.
    fn surface_area(&self) -> f64 {
        let height = self.z_max - self.z_min;
        if !(height > 0.0) || !self.ah.is_finite() {
            return 0.0;
        }
        let integrand = |z: f64| {
            let r = self.radius_at(z);
            let dr = self.ch * z / (self.ah * r);
            r * (1.0 + dr * dr).sqrt()
        };
        let h = height / AREA_STEPS as f64;
        let mut sum = integrand(self.z_min) + integrand(self.z_max);
        for i in 1..AREA_STEPS {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * integrand(self.z_min + i as f64 * h);
        }
        self.phi_max.radians() * sum * h / 3.0
    }

    fn intersection_t(&self, ray: &Ray3, t_min: f64, t_max: f64) -> f64 {
        let o = ray.origin();
        let d = ray.direction();
        let (ah, ch) = (self.ah, self.ch);
        let roots = solve_quadratic(
            ah * (d.x * d.x + d.y * d.y) - ch * d.z * d.z,
            2.0 * (ah * (d.x * o.x + d.y * o.y) - ch * d.z * o.z),
            ah * (o.x * o.x + o.y * o.y) - ch * o.z * o.z - 1.0,
        );
        nearest_root(roots, t_min, t_max, |t| self.in_range(&ray.at(t)))
    }

    fn surface_at(&self, ray: &Ray3, t: f64) -> SurfaceIntersection3<'_> {
        let p = ray.at(t);
        let phi_max = self.phi_max.radians();
        let (phi, v) = self.sweep(&p);
        let dpdu = Vec3::new(-phi_max * p.y, phi_max * p.x, 0.0);
        let normal = Vec3::new(self.ah * p.x, self.ah * p.y, -self.ch * p.z);
        SurfaceIntersection3::new(self, *ray, t, frame(normal, dpdu), Point2::new(phi / phi_max, v))
    }
}
