//! Surface materials

use crate::Color;
use serde::{Serialize, Deserialize};

/// Which faces of a triangle are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Lighting model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    /// Unlit, flat color
    Basic,
    /// Blinn-Phong with ambient and point lights
    #[default]
    Phong,
}

/// Visual properties of a mesh
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    /// Opacity in `[0, 1]`; only takes effect when `transparent` is set
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
    pub shading: Shading,
    /// Specular exponent for Phong shading
    pub shininess: f32,
    /// Multiply `color` by the geometry's vertex colors
    pub vertex_colors: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
            shading: Shading::Phong,
            shininess: 30.0,
            vertex_colors: false,
        }
    }
}

impl Material {
    /// Unlit material
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            shading: Shading::Basic,
            ..Default::default()
        }
    }

    /// Lit material
    pub fn phong(color: Color) -> Self {
        Self {
            color,
            shading: Shading::Phong,
            ..Default::default()
        }
    }

    /// Set opacity; anything below 1.0 marks the material transparent
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = self.opacity < 1.0;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_vertex_colors(mut self, enabled: bool) -> Self {
        self.vertex_colors = enabled;
        self
    }

    /// Opacity the renderer should blend with
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_marks_transparent() {
        let m = Material::phong(Color::GREEN).with_opacity(0.5);
        assert!(m.transparent);
        assert_eq!(m.effective_opacity(), 0.5);

        let opaque = Material::phong(Color::GREEN).with_opacity(1.0);
        assert!(!opaque.transparent);
    }

    #[test]
    fn test_opacity_ignored_when_opaque() {
        let m = Material {
            opacity: 0.2,
            ..Material::basic(Color::RED)
        };
        assert_eq!(m.effective_opacity(), 1.0);
    }

    #[test]
    fn test_side_deserializes_lowercase() {
        use serde::de::{value::Error, IntoDeserializer};
        let de: serde::de::value::StrDeserializer<'_, Error> = "double".into_deserializer();
        assert_eq!(Side::deserialize(de).unwrap(), Side::Double);
    }
}
