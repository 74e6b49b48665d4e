//! Pointer input and camera controls
//!
//! This crate turns pointer events into camera motion:
//!
//! - [`Controls`] - Trait every camera controller implements
//! - [`OrbitControls`] - Orbit, dolly and pan around a target point
//! - [`PointerEvent`], [`Modifiers`] - Windowing-independent input

mod controls;
mod orbit_controls;
mod pointer;

pub use controls::Controls;
pub use orbit_controls::OrbitControls;
pub use pointer::{Modifiers, PointerButton, PointerEvent, PointerPosition};

pub use scenekit_core::SurfaceSize;
