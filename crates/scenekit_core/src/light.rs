//! Light sources

use crate::Color;
use std::f32::consts::PI;

/// A light attached to a scene object
///
/// Point lights take their position from the owning object's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform light from every direction
    Ambient { color: Color, intensity: f32 },
    /// Light radiating from a single point
    Point {
        color: Color,
        intensity: f32,
        /// Cutoff distance; 0 means unlimited range
        distance: f32,
        /// Falloff exponent; 2 is physically correct, 0 disables falloff
        decay: f32,
    },
}

impl Light {
    /// Default point-light intensity (one candela's worth of radiant flux)
    pub const DEFAULT_POINT_INTENSITY: f32 = PI;

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    /// Point light with unlimited range and physical falloff
    pub fn point(color: Color, intensity: f32) -> Self {
        Self::Point {
            color,
            intensity,
            distance: 0.0,
            decay: 2.0,
        }
    }

    /// Override the range and falloff of a point light
    ///
    /// Has no effect on ambient lights.
    pub fn with_falloff(self, range: f32, falloff: f32) -> Self {
        match self {
            Self::Point { color, intensity, .. } => Self::Point {
                color,
                intensity,
                distance: range.max(0.0),
                decay: falloff.max(0.0),
            },
            ambient => ambient,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Self::Ambient { color, .. } | Self::Point { color, .. } => color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Self::Ambient { intensity, .. } | Self::Point { intensity, .. } => intensity,
        }
    }

    #[inline]
    pub fn is_ambient(&self) -> bool {
        matches!(self, Self::Ambient { .. })
    }
}
