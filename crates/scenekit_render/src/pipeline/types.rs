//! GPU-compatible data types for the mesh pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use scenekit_math::{mat4, Mat4};

/// Maximum number of point lights passed to the shader
pub const MAX_POINT_LIGHTS: usize = 4;

/// A world-space vertex ready for drawing
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// World-space position
    pub position: [f32; 3],
    /// World-space normal (zero for lines)
    pub normal: [f32; 3],
    /// Linear RGBA color, alpha is material opacity
    pub color: [f32; 4],
    /// (lit, shininess, side, unused); side is 0 front, 1 back, 2 double
    pub material: [f32; 4],
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 0.0, 1.0],
            color: [1.0; 4],
            material: [0.0; 4],
        }
    }
}

/// A point light as laid out in the uniform buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuPointLight {
    /// World position in xyz, cutoff distance in w
    pub position: [f32; 4],
    /// Linear color times intensity in rgb, decay exponent in w
    pub color: [f32; 4],
}

/// Per-frame uniforms
/// Layout: 240 bytes total (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: Mat4,
    /// Camera position + padding (16 bytes)
    pub camera_position: [f32; 4],
    /// Summed ambient light, linear rgb + padding (16 bytes)
    pub ambient: [f32; 4],
    /// Number of valid entries in `point_lights` + padding (16 bytes)
    pub light_count: u32,
    pub _padding: [u32; 3],
    /// Point lights (128 bytes)
    pub point_lights: [GpuPointLight; MAX_POINT_LIGHTS],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            camera_position: [0.0; 4],
            ambient: [0.0; 4],
            light_count: 0,
            _padding: [0; 3],
            point_lights: [GpuPointLight::default(); MAX_POINT_LIGHTS],
        }
    }
}
