//! Scene Rendering Library
//!
//! This crate provides the wgpu-based renderer for scenekit scenes.
//!
//! ## Key Components
//!
//! - [`Renderer`] - Trait for anything that draws a scene into a [`Container`]
//! - [`WgpuRenderer`] - Forward renderer drawing into a winit window
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::MeshPipeline`] - Opaque, transparent and line passes with lighting
//! - [`renderable::RenderableGeometry`] - Converts Scene/Object3D to GPU buffers

pub mod context;
pub mod container;
pub mod pipeline;
pub mod renderable;
pub mod renderer;

pub use container::{Container, ContainerSize};
pub use renderable::{LightingUniforms, RenderableGeometry};
pub use renderer::{RenderError, Renderer, RendererOptions, WgpuRenderer};

// Re-export core types for convenience
pub use scenekit_core::{PerspectiveCamera, Scene, SurfaceSize};
