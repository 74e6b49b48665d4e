//! Debug helpers

use scenekit_core::Vec3;
use scenekit_math::{truncate, DEFAULT_PRECISION};
use scenekit_render::Renderer;

use crate::host::{HostEvent, ListenerContext};

/// Camera position as `x, y, z`, each truncated to two decimals
pub fn format_camera_position(position: Vec3) -> String {
    let [x, y, z] = position
        .to_array()
        .map(|c| truncate(c as f64, DEFAULT_PRECISION));
    format!("{}, {}, {}", x, y, z)
}

/// Click listener copying the camera position to the clipboard on shift-click
///
/// A clipboard failure is logged and otherwise ignored.
pub fn copy_camera_position<R: Renderer>(event: &HostEvent, context: &mut ListenerContext<'_, R>) {
    let HostEvent::Click(click) = event else {
        return;
    };
    if !click.shift_key() {
        return;
    }

    let text = format_camera_position(context.viewport.camera.position);
    log::info!("camera position: [{}]", text);
    match context.clipboard.write_text(&text) {
        Ok(()) => log::info!("copied camera coords to clipboard!"),
        Err(e) => log::warn!("Could not copy camera coords: {}", e),
    }
}
