//! 3D Transform (position, rotation, scale)

use scenekit_math::{mat4, Mat4, Quat, Vec3};

/// Position, rotation and per-axis scale of an object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a unit quaternion
    pub rotation: Quat,
    /// Scale factor per axis
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Transform a point from local space to world space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p.component_mul(self.scale)) + self.position
    }

    /// Transform a surface normal from local space to world space
    ///
    /// Normals scale by the inverse of the object's scale so they stay
    /// perpendicular to stretched surfaces.
    pub fn transform_normal(&self, n: Vec3) -> Vec3 {
        self.rotation.rotate(n.component_div(self.scale)).normalized()
    }

    /// Local-to-world matrix
    pub fn matrix(&self) -> Mat4 {
        mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
