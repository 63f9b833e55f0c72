#![warn(missing_docs)]

//! Closed-form polynomial root solvers for the rtgeo intersection kernel.
//!
//! - [`solve_quadratic`] backs every quadric primitive and the bounding sphere.
//! - [`solve_cubic`] finds the real roots of a cubic.
//! - [`solve_quartic`] backs the torus via Ferrari's resolvent-cubic method.
//!
//! "No real root" is an ordinary outcome, never an error: the quadratic
//! solver marks empty slots with NaN and the others return shorter vectors.

use log::trace;
use std::f64::consts::PI;

/// Threshold below which a leading coefficient or discriminant is treated as zero.
pub const EPSILON: f64 = 1e-12;

/// Solve `a*t^2 + b*t + c = 0`.
///
/// Returns both roots in no particular order. A missing root is NaN: both
/// slots are NaN for a negative discriminant, and the second slot is NaN
/// when `a == 0` reduces the equation to a line.
///
/// Uses the cancellation-free form `q = -(b + sign(b) * sqrt(disc)) / 2`,
/// `t0 = q / a`, `t1 = c / q`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> [f64; 2] {
    if a == 0.0 {
        if b == 0.0 {
            return [f64::NAN, f64::NAN];
        }
        return [-c / b, f64::NAN];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return [f64::NAN, f64::NAN];
    }

    let sqrt_disc = discriminant.sqrt();
    let q = if b < 0.0 {
        -0.5 * (b - sqrt_disc)
    } else {
        -0.5 * (b + sqrt_disc)
    };

    if q == 0.0 {
        // b == 0 and c == 0: double root at the origin.
        return [0.0, 0.0];
    }

    [q / a, c / q]
}

/// Solve `a*t^3 + b*t^2 + c*t + d = 0`, returning the real roots ascending.
///
/// Repeated roots are reported once per multiplicity the branch can see; a
/// degenerate `a == 0` delegates to [`solve_quadratic`].
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        let mut roots: Vec<f64> = solve_quadratic(b, c, d)
            .into_iter()
            .filter(|t| !t.is_nan())
            .collect();
        roots.sort_by(f64::total_cmp);
        return roots;
    }

    let depressed = DepressedCubic::new(b / a, c / a, d / a);
    let mut roots = depressed.real_roots();
    roots.sort_by(f64::total_cmp);
    roots
}

/// Solve `a*t^4 + b*t^3 + c*t^2 + d*t + e = 0`.
///
/// Returns the real roots sorted ascending: zero, two or four of them (a
/// tangent touch shows up as a repeated pair). Returns an empty vector when
/// `a == 0` or any coefficient is not finite.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<f64> {
    if a.abs() < EPSILON || ![a, b, c, d, e].iter().all(|x| x.is_finite()) {
        trace!("quartic: degenerate coefficients ({a}, {b}, {c}, {d}, {e})");
        return Vec::new();
    }

    let b = b / a;
    let c = c / a;
    let d = d / a;
    let e = e / a;

    // Depress via t = z - b/4: z^4 + p*z^2 + q*z + r = 0
    let b2 = b * b;
    let p = c - 3.0 * b2 / 8.0;
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - 3.0 * b2 * b2 / 256.0;
    let shift = b / 4.0;

    // z^4 + p*z^2 + q*z + r = (z^2 + y)^2 - [(2y - p) z^2 - q z + (y^2 - r)].
    // The bracket is a perfect square when y solves the resolvent cubic
    // 8y^3 - 4p*y^2 - 8r*y + (4pr - q^2) = 0.
    let y = DepressedCubic::new(-p / 2.0, -r, (4.0 * p * r - q * q) / 8.0).largest_root();
    let d1 = 2.0 * y - p;

    let mut roots = Vec::with_capacity(4);
    if d1 < EPSILON {
        // q vanishes with d1; the bracket reduces to the constant y^2 - r.
        let d2 = y * y - r;
        if d2 < 0.0 {
            trace!("quartic: degenerate resolvent without real factors (d2 = {d2})");
            return roots;
        }
        let d2 = d2.sqrt();
        push_real_roots(&mut roots, solve_quadratic(1.0, 0.0, y - d2));
        push_real_roots(&mut roots, solve_quadratic(1.0, 0.0, y + d2));
    } else {
        let s = d1.sqrt();
        let k = q / (2.0 * s);
        push_real_roots(&mut roots, solve_quadratic(1.0, -s, y + k));
        push_real_roots(&mut roots, solve_quadratic(1.0, s, y - k));
    }

    for root in &mut roots {
        *root -= shift;
    }
    roots.sort_by(f64::total_cmp);
    roots
}

fn push_real_roots(roots: &mut Vec<f64>, pair: [f64; 2]) {
    if pair.iter().all(|t| !t.is_nan()) {
        roots.extend_from_slice(&pair);
    }
}

/// The monic cubic `y^3 + a*y^2 + b*y + c`, held in depressed form
/// `x^3 + p*x + q` with `y = x - a/3`.
struct DepressedCubic {
    p: f64,
    q: f64,
    shift: f64,
}

impl DepressedCubic {
    fn new(a: f64, b: f64, c: f64) -> Self {
        let p = b - a * a / 3.0;
        let q = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;
        Self { p, q, shift: a / 3.0 }
    }

    fn discriminant(&self) -> f64 {
        -(4.0 * self.p * self.p * self.p + 27.0 * self.q * self.q)
    }

    /// The largest real root (a cubic always has at least one).
    fn largest_root(&self) -> f64 {
        if self.discriminant() >= 0.0 {
            self.trigonometric_root(0) - self.shift
        } else {
            self.cardano_root() - self.shift
        }
    }

    fn real_roots(&self) -> Vec<f64> {
        if self.discriminant() >= 0.0 {
            (0..3)
                .map(|k| self.trigonometric_root(k) - self.shift)
                .collect()
        } else {
            vec![self.cardano_root() - self.shift]
        }
    }

    /// The `k`-th of three real roots; `k == 0` is the largest.
    fn trigonometric_root(&self, k: u32) -> f64 {
        if self.p.abs() < EPSILON {
            // Triple root; the cosine form divides by p.
            return (-self.q).cbrt();
        }
        let m = 2.0 * (-self.p / 3.0).sqrt();
        let cos_arg = (3.0 * self.q / (self.p * m)).clamp(-1.0, 1.0);
        let theta = cos_arg.acos() / 3.0;
        m * (theta - 2.0 * PI * f64::from(k) / 3.0).cos()
    }

    fn cardano_root(&self) -> f64 {
        let half_q = self.q / 2.0;
        let sqrt_delta = (half_q * half_q + self.p * self.p * self.p / 27.0).sqrt();
        (-half_q + sqrt_delta).cbrt() + (-half_q - sqrt_delta).cbrt()
    }
}
