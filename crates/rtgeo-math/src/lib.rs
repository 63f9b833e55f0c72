#![warn(missing_docs)]

//! Math types for the rtgeo intersection kernel.
//!
//! Thin wrappers around nalgebra: points, vectors, unit directions,
//! affine transforms, angles, orthonormal frames and tolerance constants.
//! The kernel treats these as plain numeric tuples; nothing in here knows
//! about shapes; [`Ray3`] and [`Ray2`] are the only query inputs.

mod ray;

pub use ray::{Ray2, Ray3, RayError};

use nalgebra::{Matrix4, Unit, Vector2, Vector3, Vector4};
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in 2D space (also used for texture coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A homogeneous point, used for triangle vertex positions.
pub type Point4 = nalgebra::Point4<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 2D space.
pub type Dir2 = Unit<Vector2<f64>>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vec3::new(dx, dy, dz)),
        }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz)),
        }
    }

    /// Rotation about an arbitrary axis through the origin.
    ///
    /// Uses Rodrigues' rotation formula.
    pub fn rotation(axis: &Dir3, angle: Angle) -> Self {
        let (s, c) = angle.radians().sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        if v.w != 1.0 && v.w != 0.0 {
            Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
        } else {
            Point3::new(v.x, v.y, v.z)
        }
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// An angle, stored in radians.
///
/// Used for the angular sweep (`phi_max`) of the quadric primitives.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Angle {
    radians: f64,
}

impl Angle {
    /// A full turn (2π).
    pub const FULL: Self = Self { radians: 2.0 * PI };

    /// A half turn (π).
    pub const HALF: Self = Self { radians: PI };

    /// Create an angle from radians.
    pub const fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    /// Create an angle from degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    /// The angle in radians.
    pub const fn radians(self) -> f64 {
        self.radians
    }

    /// The angle in degrees.
    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }
}

/// A right-handed orthonormal frame `(u, v, w)`.
///
/// Surface intersections use `w` as the surface normal and `u`/`v` as the
/// tangent directions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrthonormalBasis {
    /// First tangent axis.
    pub u: Vec3,
    /// Second tangent axis.
    pub v: Vec3,
    /// Normal axis.
    pub w: Vec3,
}

impl OrthonormalBasis {
    /// The canonical frame `(x, y, z)`.
    pub fn identity() -> Self {
        Self {
            u: Vec3::x(),
            v: Vec3::y(),
            w: Vec3::z(),
        }
    }

    /// Build a frame around `w`, picking the tangents arbitrarily.
    pub fn from_w(w: &Dir3) -> Self {
        let w = w.into_inner();
        let arbitrary = if w.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        let u = arbitrary.cross(&w).normalize();
        let v = w.cross(&u);
        Self { u, v, w }
    }

    /// Build a frame around `w` whose `u` axis follows `u_hint` projected
    /// onto the tangent plane.
    ///
    /// Falls back to [`OrthonormalBasis::from_w`] when `u_hint` is (nearly)
    /// parallel to `w`, zero, or not finite.
    pub fn from_w_u(w: &Dir3, u_hint: &Vec3) -> Self {
        let v = w.as_ref().cross(u_hint);
        let length = v.norm();
        if length < 1e-12 || !length.is_finite() {
            return Self::from_w(w);
        }
        let v = v / length;
        let w = w.into_inner();
        let u = v.cross(&w);
        Self { u, v, w }
    }

    /// Express a local-frame vector in world coordinates.
    pub fn to_world(&self, local: &Vec3) -> Vec3 {
        self.u * local.x + self.v * local.y + self.w * local.z
    }

    /// Express a world vector in this frame's coordinates.
    pub fn to_local(&self, world: &Vec3) -> Vec3 {
        Vec3::new(world.dot(&self.u), world.dot(&self.v), world.dot(&self.w))
    }
}

impl Default for OrthonormalBasis {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default kernel tolerances (1e-6 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: Angle, b: Angle) -> bool {
        (a.radians() - b.radians()).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = t.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert!((p - Point3::new(11.0, 22.0, 33.0)).norm() < 1e-12);

        let v = t.apply_vec(&Vec3::new(1.0, 2.0, 3.0));
        assert!((v - Vec3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_about_z() {
        let axis = Dir3::new_normalize(Vec3::z());
        let t = Transform::rotation(&axis, Angle::from_degrees(90.0));
        let p = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_then_applies_right_operand_first() {
        // translate (0,0,0) -> (1,0,0), then scale -> (2,0,0)
        let composed = Transform::scale(2.0, 2.0, 2.0).then(&Transform::translation(1.0, 0.0, 0.0));
        let p = composed.apply_point(&Point3::origin());
        assert!((p.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_round_trips() {
        let t = Transform::translation(1.0, 2.0, 3.0).then(&Transform::scale(2.0, 4.0, 8.0));
        let inv = t.inverse().unwrap();
        let p = Point3::new(5.0, 6.0, 7.0);
        let back = inv.apply_point(&t.apply_point(&p));
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn test_angle_conversions() {
        let a = Angle::from_degrees(180.0);
        assert!((a.radians() - PI).abs() < 1e-12);
        assert!((Angle::FULL.degrees() - 360.0).abs() < 1e-9);
        assert!(Tolerance::DEFAULT.angles_equal(a, Angle::HALF));
    }

    #[test]
    fn test_basis_from_w_is_orthonormal() {
        for w in [Vec3::x(), Vec3::y(), Vec3::new(1.0, 2.0, -3.0)] {
            let basis = OrthonormalBasis::from_w(&Dir3::new_normalize(w));
            assert!((basis.u.norm() - 1.0).abs() < 1e-12);
            assert!((basis.v.norm() - 1.0).abs() < 1e-12);
            assert!(basis.u.dot(&basis.v).abs() < 1e-12);
            assert!(basis.u.dot(&basis.w).abs() < 1e-12);
            assert!((basis.u.cross(&basis.v) - basis.w).norm() < 1e-12);
        }
    }

    #[test]
    fn test_basis_from_w_u_keeps_tangent_direction() {
        let w = Dir3::new_normalize(Vec3::z());
        let basis = OrthonormalBasis::from_w_u(&w, &Vec3::new(3.0, 0.0, 1.0));
        assert!((basis.u - Vec3::x()).norm() < 1e-12);
        assert!((basis.v - Vec3::y()).norm() < 1e-12);

        // Parallel hint falls back to an arbitrary frame.
        let fallback = OrthonormalBasis::from_w_u(&w, &Vec3::z());
        assert!(fallback.u.dot(&fallback.w).abs() < 1e-12);
        let nan = OrthonormalBasis::from_w_u(&w, &Vec3::new(f64::NAN, 0.0, 0.0));
        assert!(nan.u.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_basis_local_world_round_trip() {
        let basis = OrthonormalBasis::from_w(&Dir3::new_normalize(Vec3::new(1.0, 1.0, 1.0)));
        let v = Vec3::new(0.3, -2.0, 5.0);
        let back = basis.to_world(&basis.to_local(&v));
        assert!((back - v).norm() < 1e-12);
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        assert!(tol.points_equal(&a, &Point3::new(1.0 + 1e-7, 2.0, 3.0)));
        assert!(!tol.points_equal(&a, &Point3::new(1.001, 2.0, 3.0)));
        assert!(tol.is_zero(1e-8));
    }
}
