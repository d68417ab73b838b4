// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::{deg_to_rad, Mat4, Vec3, EPSILON};

/// Quaternion stored as `(x, y, z, w)` with float32 rounding.
///
/// * All angles are expressed in radians unless a method says otherwise.
/// * Normalisation falls back to identity for zero-length input so malformed
///   rotations never turn into NaN downstream.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    data: [f32; 4],
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quat {
    /// Creates a quaternion from components.
    ///
    /// Components are taken verbatim; use [`Quat::normalize`] before treating
    /// the result as a rotation.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Vector part X.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Vector part Y.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Vector part Z.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// Scalar part.
    pub fn w(&self) -> f32 {
        self.data[3]
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len_sq = axis.length_squared();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        let norm_axis = axis.scale(1.0 / len_sq.sqrt());
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let v = norm_axis.scale(sin_half);
        Self::new(v.x(), v.y(), v.z(), cos_half)
    }

    /// Builds a rotation from Euler angles in degrees applied as
    /// `R = R_x * R_y * R_z`.
    ///
    /// # Examples
    /// ```
    /// use vela_math::{Quat, Vec3};
    /// let q = Quat::from_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
    /// let v = q.rotate_vec3(&Vec3::UNIT_Z);
    /// assert!((v.x() - 1.0).abs() < 1e-6);
    /// ```
    pub fn from_euler_degrees(degrees: Vec3) -> Self {
        let qx = Self::from_axis_angle(Vec3::UNIT_X, deg_to_rad(degrees.x()));
        let qy = Self::from_axis_angle(Vec3::UNIT_Y, deg_to_rad(degrees.y()));
        let qz = Self::from_axis_angle(Vec3::UNIT_Z, deg_to_rad(degrees.z()));
        qx.multiply(&qy).multiply(&qz).normalize()
    }

    /// Builds the rotation whose columns are the orthonormal basis
    /// `(x_axis, y_axis, z_axis)`.
    ///
    /// Callers must pass a right-handed orthonormal basis; the result is
    /// normalised but not re-orthogonalised.
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let (m00, m10, m20) = (x_axis.x(), x_axis.y(), x_axis.z());
        let (m01, m11, m21) = (y_axis.x(), y_axis.y(), y_axis.z());
        let (m02, m12, m22) = (z_axis.x(), z_axis.y(), z_axis.z());
        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize()
    }

    /// Rotation that maps the −Z axis onto `forward` with `up` as the hint for
    /// the +Y axis.
    ///
    /// Returns `None` when `forward` is degenerate. When `up` is parallel to
    /// `forward` a perpendicular fallback axis is chosen.
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Self> {
        let f = forward.normalize();
        if f.length_squared() <= EPSILON {
            return None;
        }
        let mut right = f.cross(&up).normalize();
        if right.length_squared() <= EPSILON {
            let fallback = if f.y().abs() < 0.9 { Vec3::UNIT_Y } else { Vec3::UNIT_X };
            right = f.cross(&fallback).normalize();
        }
        let true_up = right.cross(&f);
        Some(Self::from_basis(right, true_up, f.scale(-1.0)))
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Operand order matters: applied to a vector, `self * other` rotates by
    /// `other` first and then by `self`. When both operands are unit
    /// quaternions the result stays unit up to floating-point error.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use vela_math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
    /// assert_ne!(yaw.multiply(&pitch).to_array(), pitch.multiply(&yaw).to_array());
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Euclidean norm of the four components.
    pub fn length(&self) -> f32 {
        self.data.iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    /// Normalises the quaternion; returns identity when the norm is ~0 or
    /// not finite.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON || !len.is_finite() {
            return Self::identity();
        }
        let inv = 1.0 / len;
        Self::new(
            self.data[0] * inv,
            self.data[1] * inv,
            self.data[2] * inv,
            self.data[3] * inv,
        )
    }

    /// Conjugate `(−x, −y, −z, w)`.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.data[0], -self.data[1], -self.data[2], self.data[3])
    }

    /// Multiplicative inverse. Degenerate input yields identity.
    pub fn inverse(&self) -> Self {
        let len_sq = self.data.iter().map(|c| c * c).sum::<f32>();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        self.conjugate().scale(1.0 / len_sq)
    }

    fn scale(&self, s: f32) -> Self {
        Self::new(
            self.data[0] * s,
            self.data[1] * s,
            self.data[2] * s,
            self.data[3] * s,
        )
    }

    /// Rotates a vector by this (normalised) quaternion.
    pub fn rotate_vec3(&self, v: &Vec3) -> Vec3 {
        let q = self.normalize();
        let u = Vec3::new(q.x(), q.y(), q.z());
        let s = q.w();
        // v' = 2(u·v)u + (s² − u·u)v + 2s(u × v)
        u.scale(2.0 * u.dot(v))
            .add(&v.scale(s * s - u.dot(&u)))
            .add(&u.cross(v).scale(2.0 * s))
    }

    /// Converts the quaternion to a rotation matrix (column-major 4×4).
    pub fn to_mat4(&self) -> Mat4 {
        let q = self.normalize();
        let [x, y, z, w] = q.data;

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Mat4::new([
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            2.0 * (xy - wz),
            1.0 - 2.0 * (xx + zz),
            2.0 * (yz + wx),
            0.0,
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

/// Converts a 4-element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// Components are taken verbatim; normalisation is not enforced here.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl core::ops::Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
