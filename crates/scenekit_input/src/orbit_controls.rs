//! Orbit controls
//!
//! Controls:
//! - Primary drag: orbit around the target
//! - Secondary drag (or primary + Shift/Ctrl/Meta): pan
//! - Auxiliary drag / wheel: dolly in and out
//!
//! Orbiting respects the camera's `up` hint: offsets are rotated into a
//! Y-up frame, orbited there, and rotated back.

use crate::{Controls, Modifiers, PointerButton, PointerEvent, PointerPosition};
use scenekit_core::{PerspectiveCamera, SurfaceSize};
use scenekit_math::{Quat, Spherical, Vec3};
use std::f32::consts::PI;

/// Minimum camera movement reported as a change by `update`
const CHANGE_EPSILON: f32 = 0.000001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragState {
    None,
    Rotate,
    Dolly,
    Pan,
}

/// Orbit a camera around a target point
pub struct OrbitControls {
    /// Point the camera orbits and looks at
    pub target: Vec3,

    // Frame alignment between camera.up and +Y
    up_to_y: Quat,
    y_to_up: Quat,

    // Pending motion
    spherical_delta: Spherical,
    scale: f32,
    pan_offset: Vec3,
    zoom_changed: bool,

    // Drag state
    state: DragState,
    drag_start: PointerPosition,
    surface: SurfaceSize,

    // Change detection
    last_position: Vec3,
    last_quaternion: Quat,

    // Configuration
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    /// Seconds per orbit at 60 fps is `60 / auto_rotate_speed`
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl OrbitControls {
    /// Create controls orbiting the origin
    ///
    /// The camera's `up` is read once here; changing it afterwards needs
    /// new controls.
    pub fn new(camera: &PerspectiveCamera, surface: SurfaceSize) -> Self {
        let up_to_y = Quat::from_unit_vectors(camera.up.normalized(), Vec3::Y);

        Self {
            target: Vec3::ZERO,

            up_to_y,
            y_to_up: up_to_y.conjugate(),

            spherical_delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            zoom_changed: false,

            state: DragState::None,
            drag_start: PointerPosition::default(),
            surface,

            last_position: camera.position,
            last_quaternion: camera.quaternion,

            enabled: true,
            enable_damping: false,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }

    /// Builder: set the orbit target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Builder: enable damping with the given factor
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Builder: enable auto-rotation (2.0 = one orbit every 30 seconds)
    pub fn with_auto_rotate(mut self, enabled: bool, speed: f32) -> Self {
        self.auto_rotate = enabled;
        self.auto_rotate_speed = speed;
        self
    }

    /// Builder: set rotation speed
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set pan speed
    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.pan_speed = speed;
        self
    }

    /// Builder: limit the orbit radius
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Builder: limit the polar angle (0 = looking down from above `up`)
    pub fn with_polar_limits(mut self, min: f32, max: f32) -> Self {
        self.min_polar_angle = min;
        self.max_polar_angle = max;
        self
    }

    /// Check if a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.state != DragState::None
    }

    fn auto_rotation_angle(&self) -> f32 {
        2.0 * PI / 60.0 / 60.0 * self.auto_rotate_speed
    }

    fn zoom_scale(&self, delta: f32) -> f32 {
        0.95f32.powf(self.zoom_speed * (delta * 0.01).abs())
    }

    fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    fn dolly_in(&mut self, scale: f32) {
        self.scale *= scale;
        self.zoom_changed = true;
    }

    fn dolly_out(&mut self, scale: f32) {
        self.scale /= scale;
        self.zoom_changed = true;
    }

    fn dolly(&mut self, delta: f32) {
        if delta < 0.0 {
            self.dolly_in(self.zoom_scale(delta));
        } else if delta > 0.0 {
            self.dolly_out(self.zoom_scale(delta));
        }
    }

    fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera) {
        let height = self.surface.height.max(1) as f32;
        let offset = camera.position - self.target;

        // Half the visible height at the target's depth
        let target_distance = offset.length() * (camera.fov.to_radians() / 2.0).tan();

        let left = camera.right() * (-2.0 * dx * target_distance / height);
        let up = camera.camera_up() * (2.0 * dy * target_distance / height);
        self.pan_offset += left + up;
    }

    fn drag_to(&mut self, position: PointerPosition, camera: &PerspectiveCamera) {
        let delta = position - self.drag_start;
        self.drag_start = position;
        let height = self.surface.height.max(1) as f32;

        match self.state {
            DragState::Rotate => {
                let dx = delta.x * self.rotate_speed;
                let dy = delta.y * self.rotate_speed;
                self.rotate_left(2.0 * PI * dx / height);
                self.rotate_up(2.0 * PI * dy / height);
            }
            DragState::Dolly => self.dolly(-delta.y),
            DragState::Pan => {
                self.pan(delta.x * self.pan_speed, delta.y * self.pan_speed, camera);
            }
            DragState::None => {}
        }
    }
}

impl Controls for OrbitControls {
    fn new(camera: &PerspectiveCamera, surface: SurfaceSize) -> Self {
        OrbitControls::new(camera, surface)
    }

    fn handle_pointer(&mut self, event: &PointerEvent, camera: &PerspectiveCamera) {
        if !self.enabled {
            return;
        }

        match *event {
            PointerEvent::Down { button, position, modifiers } => {
                let pan_modifier = Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::META;
                self.state = match button {
                    PointerButton::Primary if modifiers.intersects(pan_modifier) => DragState::Pan,
                    PointerButton::Primary => DragState::Rotate,
                    PointerButton::Auxiliary => DragState::Dolly,
                    PointerButton::Secondary => DragState::Pan,
                };
                self.drag_start = position;
            }
            PointerEvent::Move { position, .. } => {
                if self.state != DragState::None {
                    self.drag_to(position, camera);
                }
            }
            PointerEvent::Up { .. } => {
                self.state = DragState::None;
            }
            PointerEvent::Wheel { delta_y, .. } => {
                if self.state == DragState::None {
                    self.dolly(delta_y);
                }
            }
        }
    }

    fn resize_surface(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = self.up_to_y.rotate(camera.position - self.target);
        let mut spherical = Spherical::from_vec3(offset);

        if self.auto_rotate && self.state == DragState::None {
            self.rotate_left(self.auto_rotation_angle());
        }

        if self.enable_damping {
            spherical.theta += self.spherical_delta.theta * self.damping_factor;
            spherical.phi += self.spherical_delta.phi * self.damping_factor;
        } else {
            spherical.theta += self.spherical_delta.theta;
            spherical.phi += self.spherical_delta.phi;
        }

        spherical.phi = spherical.phi.clamp(self.min_polar_angle, self.max_polar_angle);
        spherical = spherical.make_safe();
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        camera.position = self.target + self.y_to_up.rotate(spherical.to_vec3());
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let q = camera.quaternion;
        let p = self.last_quaternion;
        let quat_dot = q.x * p.x + q.y * p.y + q.z * p.z + q.w * p.w;

        let moved = self.zoom_changed
            || (camera.position - self.last_position).length_squared() > CHANGE_EPSILON
            || 8.0 * (1.0 - quat_dot) > CHANGE_EPSILON;

        if moved {
            self.last_position = camera.position;
            self.last_quaternion = camera.quaternion;
            self.zoom_changed = false;
        }
        moved
    }
}
