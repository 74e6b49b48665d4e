//! Rendering pipeline components
//!
//! This module contains the GPU data layouts and the mesh render pipeline.

pub mod types;
pub mod mesh_pipeline;

// Re-export types
pub use types::{GpuPointLight, SceneUniforms, Vertex, MAX_POINT_LIGHTS};

// Re-export pipelines
pub use mesh_pipeline::MeshPipeline;
