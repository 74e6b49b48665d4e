//! Scene objects

use crate::{Color, Geometry, Light, Material, Transform};
use scenekit_math::Vec3;
use std::sync::Arc;

/// Geometry paired with the material it is drawn with
#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Arc<Geometry>,
    pub material: Material,
}

/// What an object contributes to the scene
#[derive(Clone, Debug)]
pub enum ObjectKind {
    Mesh(Mesh),
    Light(Light),
}

/// An object placed in a scene
#[derive(Clone, Debug)]
pub struct Object3D {
    /// Optional name for lookups
    pub name: Option<String>,
    pub transform: Transform,
    pub kind: ObjectKind,
    /// Hidden objects are skipped by renderers
    pub visible: bool,
}

impl Object3D {
    /// Create a mesh object at the origin
    pub fn mesh(geometry: impl Into<Arc<Geometry>>, material: Material) -> Self {
        Self::new(ObjectKind::Mesh(Mesh {
            geometry: geometry.into(),
            material,
        }))
    }

    /// Create a light object at the origin
    pub fn light(light: Light) -> Self {
        Self::new(ObjectKind::Light(light))
    }

    /// Colored X/Y/Z axis lines of the given length
    pub fn axes_helper(size: f32) -> Self {
        let material = Material::basic(Color::WHITE).with_vertex_colors(true);
        Self::mesh(Geometry::axes(size), material).with_name("axes")
    }

    fn new(kind: ObjectKind) -> Self {
        Self {
            name: None,
            transform: Transform::identity(),
            kind,
            visible: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            ObjectKind::Light(_) => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            ObjectKind::Light(light) => Some(light),
            ObjectKind::Mesh(_) => None,
        }
    }
}
