//! Scene graph types for scenekit
//!
//! - [`Scene`] - Slotmap-backed object container with change tracking
//! - [`Object3D`] - A mesh or light placed with a [`Transform`]
//! - [`PerspectiveCamera`] - Camera with an `up` hint and `look_at`
//! - [`Geometry`] - Indexed triangles or lines, with sphere and axes builders
//! - [`Material`], [`Light`], [`Color`] - Appearance
//! - [`SurfaceSize`] - Pixel dimensions shared by renderers and controls

mod camera;
mod color;
mod geometry;
mod light;
mod material;
mod object;
mod scene;
mod surface;
mod transform;

pub use camera::PerspectiveCamera;
pub use color::Color;
pub use geometry::{Geometry, Topology};
pub use light::Light;
pub use material::{Material, Shading, Side};
pub use object::{Mesh, Object3D, ObjectKind};
pub use scene::{ObjectKey, Scene};
pub use surface::SurfaceSize;
pub use transform::Transform;

// Re-export commonly used math types for convenience
pub use scenekit_math::{Quat, Vec3};
