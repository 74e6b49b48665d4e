//! Indexed vertex geometry
//!
//! Geometry is stored in object space and shared between objects through
//! `Arc`. Renderers flatten it into world space per object.

use crate::Color;
use scenekit_math::Vec3;
use std::f32::consts::PI;

/// How the index buffer is interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Every three indices form a triangle
    #[default]
    Triangles,
    /// Every two indices form a line segment
    Lines,
}

/// Indexed geometry with per-vertex normals and optional per-vertex colors
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Per-vertex colors, used when the material enables vertex colors
    pub colors: Option<Vec<Color>>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Geometry {
    /// Create triangle geometry from raw buffers
    pub fn triangles(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            colors: None,
            indices,
            topology: Topology::Triangles,
        }
    }

    /// Create line-segment geometry from raw buffers
    ///
    /// Lines are unlit, so normals are left at zero.
    pub fn lines(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let normals = vec![Vec3::ZERO; positions.len()];
        Self {
            positions,
            normals,
            colors: None,
            indices,
            topology: Topology::Lines,
        }
    }

    /// Attach per-vertex colors
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// UV sphere centered on the origin
    ///
    /// The pole rows produce a single triangle per segment instead of a
    /// degenerate quad.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut grid = Vec::with_capacity(height_segments as usize + 1);
        let mut index = 0u32;

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let mut row = Vec::with_capacity(width_segments as usize + 1);
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * PI * 2.0;
                let theta = v * PI;

                let p = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                positions.push(p);
                normals.push(p.normalized());
                row.push(index);
                index += 1;
            }
            grid.push(row);
        }

        let mut indices = Vec::new();
        for iy in 0..height_segments as usize {
            for ix in 0..width_segments as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::triangles(positions, normals, indices)
    }

    /// Three colored line segments from the origin along +X, +Y and +Z
    ///
    /// Each axis fades from its primary color at the origin to a lighter
    /// tint at the tip.
    pub fn axes(size: f32) -> Self {
        let positions = vec![
            Vec3::ZERO,
            Vec3::new(size, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, size, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, size),
        ];
        let colors = vec![
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(1.0, 0.6, 0.0),
            Color::rgb(0.0, 1.0, 0.0),
            Color::rgb(0.6, 1.0, 0.0),
            Color::rgb(0.0, 0.0, 1.0),
            Color::rgb(0.0, 0.6, 1.0),
        ];

        Self::lines(positions, (0..6).collect()).with_colors(colors)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of primitives (triangles or line segments)
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => self.indices.len() / 2,
        }
    }

    /// Color of vertex `i`, if this geometry carries vertex colors
    pub fn vertex_color(&self, i: usize) -> Option<Color> {
        self.colors.as_ref().and_then(|colors| colors.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let geo = Geometry::sphere(1.0, 8, 6);
        assert_eq!(geo.vertex_count(), 9 * 7);
        // Pole rows contribute one triangle per segment
        assert_eq!(geo.indices.len(), 8 * (6 - 1) * 6);
    }

    #[test]
    fn test_sphere_on_surface() {
        let geo = Geometry::sphere(2.5, 12, 8);
        for (p, n) in geo.positions.iter().zip(&geo.normals) {
            assert!((p.length() - 2.5).abs() < 1e-4);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_axes() {
        let geo = Geometry::axes(5.0);
        assert_eq!(geo.topology, Topology::Lines);
        assert_eq!(geo.primitive_count(), 3);
        assert_eq!(geo.positions[3], Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(geo.vertex_color(0), Some(Color::RED));
        assert_eq!(geo.vertex_color(2), Some(Color::GREEN));
        assert_eq!(geo.vertex_color(4), Some(Color::BLUE));
    }
}
