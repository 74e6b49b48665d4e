//! Camera controls interface

use crate::PointerEvent;
use scenekit_core::{PerspectiveCamera, SurfaceSize};

/// Something that moves a camera in response to pointer input
///
/// Controls are built from the camera they drive and the size of the surface
/// the pointer moves over. Input is buffered in [`handle_pointer`](Self::handle_pointer)
/// and applied once per frame in [`update`](Self::update).
pub trait Controls {
    /// Bind new controls to `camera`, reading its current pose
    fn new(camera: &PerspectiveCamera, surface: SurfaceSize) -> Self
    where
        Self: Sized;

    /// Buffer a pointer event; `camera` is the current camera state
    fn handle_pointer(&mut self, event: &PointerEvent, camera: &PerspectiveCamera);

    /// The surface the pointer moves over changed size
    fn resize_surface(&mut self, _surface: SurfaceSize) {}

    /// Apply buffered motion to the camera
    ///
    /// Returns true if the camera moved.
    fn update(&mut self, camera: &mut PerspectiveCamera) -> bool;
}
