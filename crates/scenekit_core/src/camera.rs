//! Perspective camera
//!
//! The camera has a position, an orientation quaternion and an `up` hint.
//! `up` does not rotate the camera by itself: it only decides how
//! [`PerspectiveCamera::look_at`] and orbit-style controls orient the view.
//! A fresh camera looks down -Z.

use scenekit_math::{mat4, Mat4, Quat, Vec3};

/// Perspective camera with a cached projection matrix
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// World-space position
    pub position: Vec3,
    /// Up direction used when aiming the camera
    pub up: Vec3,
    /// Orientation (camera looks down its local -Z)
    pub quaternion: Quat,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOV, 1.0, Self::DEFAULT_NEAR, Self::DEFAULT_FAR)
    }
}

impl PerspectiveCamera {
    /// Field of view used by scene bootstrapping, in degrees
    pub const DEFAULT_FOV: f32 = 75.0;
    /// Near plane used by scene bootstrapping
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Far plane used by scene bootstrapping
    pub const DEFAULT_FAR: f32 = 1000.0;
    /// Default up direction
    pub const DEFAULT_UP: Vec3 = Vec3::Y;

    /// Create a camera at the origin looking down -Z
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            up: Self::DEFAULT_UP,
            quaternion: Quat::IDENTITY,
            projection: mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the projection matrix after changing `fov`, `aspect`,
    /// `near` or `far`
    pub fn update_projection_matrix(&mut self) {
        self.projection = mat4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    /// Projection matrix as of the last [`update_projection_matrix`](Self::update_projection_matrix)
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::view_from_pose(self.quaternion, self.position)
    }

    /// Combined projection * view matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        mat4::mul(self.projection, self.view_matrix())
    }

    /// Rotate the camera to face `target`, keeping `up` as the vertical hint
    ///
    /// When `up` is parallel to the view direction the view direction is
    /// nudged slightly so a valid orientation always results.
    pub fn look_at(&mut self, target: Vec3) {
        let mut z = self.position - target;
        if z.length_squared() == 0.0 {
            z.z = 1.0;
        }
        z = z.normalized();

        let mut x = self.up.cross(z);
        if x.length_squared() == 0.0 {
            if self.up.z.abs() == 1.0 {
                z.x += 0.0001;
            } else {
                z.z += 0.0001;
            }
            z = z.normalized();
            x = self.up.cross(z);
        }
        x = x.normalized();
        let y = z.cross(x);

        self.quaternion = Quat::from_rotation_axes(x, y, z);
    }

    /// View direction
    pub fn forward(&self) -> Vec3 {
        self.quaternion.rotate(-Vec3::Z)
    }

    /// Camera-local right direction in world space
    pub fn right(&self) -> Vec3 {
        self.quaternion.rotate(Vec3::X)
    }

    /// Camera-local up direction in world space
    ///
    /// This is the orientation's Y axis, not the `up` hint.
    pub fn camera_up(&self) -> Vec3 {
        self.quaternion.rotate(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_default_orientation() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.up, Vec3::Y);
        assert!(approx(cam.forward(), -Vec3::Z));
    }

    #[test]
    fn test_update_projection_matrix_uses_aspect() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let before = cam.projection_matrix();
        cam.aspect = 2.0;
        // Not recomputed until asked
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        let after = cam.projection_matrix();
        assert!((after[0][0] - before[0][0] / 2.0).abs() < 1e-5);
        assert_eq!(after[1][1], before[1][1]);
    }

    #[test]
    fn test_look_at_faces_target() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(6.12, 3.59, 5.43);
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalized();
        assert!(approx(cam.forward(), expected));
        // Right vector stays horizontal for a Y-up camera
        assert!(cam.right().y.abs() < 1e-5);
    }

    #[test]
    fn test_look_at_respects_z_up() {
        let mut cam = PerspectiveCamera::default();
        cam.up = Vec3::Z;
        cam.position = Vec3::new(5.0, 0.0, 2.0);
        cam.look_at(Vec3::ZERO);
        assert!(cam.right().z.abs() < 1e-5);
        assert!(cam.camera_up().z > 0.0);
    }

    #[test]
    fn test_look_at_degenerate_up() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 10.0, 0.0);
        cam.look_at(Vec3::ZERO);
        let q = cam.quaternion;
        assert!(q.x.is_finite() && q.y.is_finite() && q.z.is_finite() && q.w.is_finite());
        assert!(cam.forward().y < -0.99);
    }

    #[test]
    fn test_view_projection_places_target_in_front() {
        let mut cam = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 5.0);
        cam.look_at(Vec3::ZERO);
        let clip = mat4::transform_point(&cam.view_projection_matrix(), Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }
}
