//! Spherical coordinates for orbiting around a point

use crate::Vec3;

/// Spherical coordinates with Y as the polar axis
///
/// - `radius`: distance from the origin
/// - `phi`: polar angle from +Y, in `[0, PI]`
/// - `theta`: azimuth around Y, measured from +Z towards +X
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    /// Margin kept between `phi` and the poles
    pub const POLE_EPSILON: f32 = 0.000001;

    pub const fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a Cartesian offset to spherical coordinates
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            Self::new(0.0, 0.0, 0.0)
        } else {
            Self::new(radius, (v.y / radius).clamp(-1.0, 1.0).acos(), v.x.atan2(v.z))
        }
    }

    /// Convert back to a Cartesian offset
    pub fn to_vec3(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep `phi` off the poles so the view direction never aligns with up
    pub fn make_safe(mut self) -> Self {
        self.phi = self
            .phi
            .clamp(Self::POLE_EPSILON, std::f32::consts::PI - Self::POLE_EPSILON);
        self
    }
}
