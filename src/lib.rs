//! scenekit - bootstrap a lit 3D scene with a camera, renderer and controls
//!
//! [`make_scene`] is the entry point: it creates a [`Scene`], a
//! [`PerspectiveCamera`], a renderer attached to a container and optional
//! camera controls, then keeps them in step with a [`host::Page`].

pub mod bootstrap;
pub mod config;
pub mod debug;
pub mod host;
pub mod input;
pub mod systems;

pub use bootstrap::{
    make_scene, with_controls, AnimateFn, BootstrapError, CameraSetup, ControlsFactory,
    SceneConfig, Viewport, ViewportSubscriptions,
};
pub use scenekit_core::{PerspectiveCamera, Scene};
pub use scenekit_math::{lerp, truncate};
