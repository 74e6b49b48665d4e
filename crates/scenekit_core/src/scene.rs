//! Scene container
//!
//! A [`Scene`] owns its objects in a slotmap. Every mutable access bumps a
//! revision counter, which renderers compare against their last upload to
//! decide whether vertex buffers need rebuilding.

use crate::{Color, Light, Object3D, ObjectKind};
use scenekit_math::Vec3;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key to an object in a scene
    ///
    /// Keys are generational: a key to a removed object stays invalid even
    /// after its slot is reused.
    pub struct ObjectKey;
}

/// The set of objects rendered together
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectKey, Object3D>,
    background: Option<Color>,
    revision: u64,
}

impl Scene {
    /// Create an empty scene with no background
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            background: None,
            revision: 0,
        }
    }

    /// Add an object, returning its key
    pub fn add(&mut self, object: Object3D) -> ObjectKey {
        self.touch();
        let key = self.objects.insert(object);
        log::trace!("added object {:?} to scene", key);
        key
    }

    /// Remove an object and return it
    pub fn remove(&mut self, key: ObjectKey) -> Option<Object3D> {
        let removed = self.objects.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn get(&self, key: ObjectKey) -> Option<&Object3D> {
        self.objects.get(key)
    }

    /// Mutable access to an object; marks the scene as changed
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut Object3D> {
        self.touch();
        self.objects.get_mut(key)
    }

    /// Key of the first object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find(|(_, object)| object.name.as_deref() == Some(name))
            .map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &Object3D)> {
        self.objects.iter()
    }

    /// Mutable iteration; marks the scene as changed
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectKey, &mut Object3D)> {
        self.touch();
        self.objects.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object
    pub fn clear(&mut self) {
        self.touch();
        self.objects.clear();
    }

    /// Visible lights paired with their world-space positions
    pub fn lights(&self) -> impl Iterator<Item = (&Light, Vec3)> {
        self.objects.values().filter(|o| o.visible).filter_map(|o| match &o.kind {
            ObjectKind::Light(light) => Some((light, o.transform.position)),
            ObjectKind::Mesh(_) => None,
        })
    }

    /// Background color; `None` leaves the renderer's clear color in place
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Counter that changes whenever objects may have changed
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
