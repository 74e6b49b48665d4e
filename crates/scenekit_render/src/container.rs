//! Drawing containers
//!
//! A container is whatever a renderer attaches to and sizes itself from.

use std::sync::Arc;
use scenekit_core::SurfaceSize;
use winit::window::Window;

/// Size of a container as reported by the host
///
/// Kept as floats because hosts may report fractional or invalid sizes;
/// [`ContainerSize::is_empty`] catches the invalid ones.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or not finite
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Width / height
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Whole-pixel size, rounding to nearest
    pub fn to_surface(&self) -> SurfaceSize {
        if self.is_empty() {
            return SurfaceSize::default();
        }
        SurfaceSize::new(self.width.round() as u32, self.height.round() as u32)
    }
}

impl From<SurfaceSize> for ContainerSize {
    fn from(size: SurfaceSize) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}

/// Something a renderer can draw into
pub trait Container {
    /// Current client-area size
    fn size(&self) -> ContainerSize;
}

impl Container for Arc<Window> {
    fn size(&self) -> ContainerSize {
        let size = self.inner_size();
        ContainerSize::new(size.width as f32, size.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sizes() {
        assert!(ContainerSize::new(0.0, 600.0).is_empty());
        assert!(ContainerSize::new(800.0, 0.0).is_empty());
        assert!(ContainerSize::new(f32::NAN, 600.0).is_empty());
        assert!(ContainerSize::new(f32::INFINITY, 600.0).is_empty());
        assert!(!ContainerSize::new(800.0, 600.0).is_empty());
    }

    #[test]
    fn test_to_surface() {
        assert_eq!(ContainerSize::new(799.6, 600.0).to_surface(), SurfaceSize::new(800, 600));
        assert_eq!(ContainerSize::new(0.0, 600.0).to_surface(), SurfaceSize::default());
        assert_eq!(ContainerSize::from(SurfaceSize::new(1024, 768)).aspect(), 1024.0 / 768.0);
    }
}
