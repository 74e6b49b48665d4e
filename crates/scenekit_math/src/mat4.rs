//! 4x4 matrix utilities for 3D transforms and projection
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's
//! `mat4x4<f32>` layout so they can be written to uniform buffers as-is.
//! Projection follows the wgpu clip-space convention (depth in `[0, 1]`).

use crate::{Quat, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two matrices (`a * b`, so `b` is applied first)
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            result[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    result
}

/// Right-handed perspective projection
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width / height
/// * `near`, `far` - Clip plane distances
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// View matrix for an eye at `position` with orientation `rotation`
///
/// The eye looks down its local -Z axis with local +Y up.
pub fn view_from_pose(rotation: Quat, position: Vec3) -> Mat4 {
    let r = rotation.rotate(Vec3::X);
    let u = rotation.rotate(Vec3::Y);
    let b = rotation.rotate(Vec3::Z);

    [
        [r.x, u.x, b.x, 0.0],
        [r.y, u.y, b.y, 0.0],
        [r.z, u.z, b.z, 0.0],
        [-r.dot(position), -u.dot(position), -b.dot(position), 1.0],
    ]
}

/// Model matrix: scale, then rotate, then translate
pub fn from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    let x = rotation.rotate(Vec3::X) * scale.x;
    let y = rotation.rotate(Vec3::Y) * scale.y;
    let z = rotation.rotate(Vec3::Z) * scale.z;

    [
        [x.x, x.y, x.z, 0.0],
        [y.x, y.y, y.z, 0.0],
        [z.x, z.y, z.z, 0.0],
        [translation.x, translation.y, translation.z, 1.0],
    ]
}

/// Transform a point (w = 1), performing the perspective divide
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    let x = m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0];
    let y = m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1];
    let z = m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2];
    let w = m[0][3] * p.x + m[1][3] * p.y + m[2][3] * p.z + m[3][3];

    if w != 0.0 && w != 1.0 {
        Vec3::new(x / w, y / w, z / w)
    } else {
        Vec3::new(x, y, z)
    }
}

/// Get a column as an array
#[inline]
pub fn get_column(m: &Mat4, col: usize) -> [f32; 4] {
    m[col]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_mul_identity() {
        let m = from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_axis_angle(Vec3::Y, 0.4),
            Vec3::new(1.0, 2.0, 3.0),
        );
        assert_eq!(mul(IDENTITY, m), m);
        assert_eq!(mul(m, IDENTITY), m);
    }

    #[test]
    fn test_mul_applies_right_operand_first() {
        let translate = from_scale_rotation_translation(Vec3::ONE, Quat::IDENTITY, Vec3::X);
        let rotate = from_scale_rotation_translation(
            Vec3::ONE,
            Quat::from_axis_angle(Vec3::Z, FRAC_PI_2),
            Vec3::ZERO,
        );
        // Translate to (1,0,0), then rotate a quarter turn around Z
        let p = transform_point(&mul(rotate, translate), Vec3::ZERO);
        assert!(approx(p, Vec3::Y));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(75f32.to_radians(), 1.5, 0.1, 1000.0);
        let near = transform_point(&proj, Vec3::new(0.0, 0.0, -0.1));
        let far = transform_point(&proj, Vec3::new(0.0, 0.0, -1000.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_aspect() {
        let proj = perspective(FRAC_PI_2, 2.0, 0.1, 100.0);
        assert!((proj[1][1] - 1.0).abs() < 1e-6);
        assert!((proj[0][0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_view_from_pose_moves_eye_to_origin() {
        let eye = Vec3::new(3.0, -2.0, 7.0);
        let rotation = Quat::from_axis_angle(Vec3::Y, 1.1);
        let view = view_from_pose(rotation, eye);
        assert!(approx(transform_point(&view, eye), Vec3::ZERO));

        // A point straight ahead of the eye lands on the -Z axis
        let ahead = eye + rotation.rotate(-Vec3::Z) * 4.0;
        assert!(approx(transform_point(&view, ahead), Vec3::new(0.0, 0.0, -4.0)));
    }

    #[test]
    fn test_get_column() {
        let m = from_scale_rotation_translation(Vec3::ONE, Quat::IDENTITY, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(get_column(&m, 3), [4.0, 5.0, 6.0, 1.0]);
    }
}
