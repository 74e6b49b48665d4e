//! Unit quaternion rotations

use crate::Vec3;

/// Rotation quaternion (x, y, z vector part, w scalar part)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    #[inline]
    pub const fn from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around a unit `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self::from_xyzw(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`
    ///
    /// Opposite vectors rotate by half a turn around an arbitrary
    /// perpendicular axis.
    pub fn from_unit_vectors(from: Vec3, to: Vec3) -> Self {
        let r = from.dot(to) + 1.0;

        let q = if r < f32::EPSILON {
            if from.x.abs() > from.z.abs() {
                Self::from_xyzw(-from.y, from.x, 0.0, 0.0)
            } else {
                Self::from_xyzw(0.0, -from.z, from.y, 0.0)
            }
        } else {
            let c = from.cross(to);
            Self::from_xyzw(c.x, c.y, c.z, r)
        };

        q.normalize()
    }

    /// Build a rotation from the three orthonormal basis columns of a
    /// rotation matrix
    pub fn from_rotation_axes(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let (m11, m12, m13) = (x_axis.x, y_axis.x, z_axis.x);
        let (m21, m22, m23) = (x_axis.y, y_axis.y, z_axis.y);
        let (m31, m32, m33) = (x_axis.z, y_axis.z, z_axis.z);

        let trace = m11 + m22 + m33;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::from_xyzw((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::from_xyzw(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::from_xyzw((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::from_xyzw((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Normalize to unit length (identity for a zero quaternion)
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            let inv = 1.0 / len;
            Self::from_xyzw(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Inverse of a unit quaternion
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::from_xyzw(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotate a vector
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}

/// Hamilton product: applying `a * b` equals applying `b` then `a`
impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (other.x, other.y, other.z, other.w);

        Self::from_xyzw(
            ax * bw + aw * bx + ay * bz - az * by,
            ay * bw + aw * by + az * bx - ax * bz,
            az * bw + aw * bz + ax * by - ay * bx,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }
}
