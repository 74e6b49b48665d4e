//! Headless container

use std::cell::Cell;
use std::rc::Rc;

use scenekit_render::{Container, ContainerSize};

/// A container whose size is set by hand
///
/// Clones share the size, so whoever holds a handle can resize the
/// container a renderer is attached to.
#[derive(Clone, Debug, Default)]
pub struct FixedContainer {
    size: Rc<Cell<ContainerSize>>,
}

impl FixedContainer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Rc::new(Cell::new(ContainerSize::new(width, height))),
        }
    }

    pub fn set_size(&self, width: f32, height: f32) {
        self.size.set(ContainerSize::new(width, height));
    }
}

impl Container for FixedContainer {
    fn size(&self) -> ContainerSize {
        self.size.get()
    }
}
