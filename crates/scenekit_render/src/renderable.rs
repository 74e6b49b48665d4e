//! Renderable geometry - bridges Scene/Object3D to GPU buffers
//!
//! This module flattens the meshes of a scene into world-space vertex
//! streams and gathers its lights into shader uniforms.

use scenekit_core::{
    Geometry, Light, Material, Object3D, ObjectKind, PerspectiveCamera, Scene, Shading, Side,
    Topology,
};
use crate::pipeline::{GpuPointLight, SceneUniforms, Vertex, MAX_POINT_LIGHTS};

/// World-space vertices collected from a scene, split by draw pass
///
/// Indices are expanded, so every three vertices of `opaque` and
/// `transparent` form a triangle and every two of `lines` form a segment.
#[derive(Clone, Debug, Default)]
pub struct RenderableGeometry {
    pub opaque: Vec<Vertex>,
    pub transparent: Vec<Vertex>,
    pub lines: Vec<Vertex>,
}

impl RenderableGeometry {
    /// Create an empty renderable geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect geometry from every visible mesh in a scene
    pub fn from_scene(scene: &Scene) -> Self {
        let mut result = Self::new();
        for (_key, object) in scene.iter() {
            result.add_object(object);
        }
        result
    }

    /// Add an object's geometry to this collection
    ///
    /// Lights and hidden objects contribute nothing.
    pub fn add_object(&mut self, object: &Object3D) {
        if !object.visible {
            return;
        }
        let mesh = match &object.kind {
            ObjectKind::Mesh(mesh) => mesh,
            ObjectKind::Light(_) => return,
        };

        let geometry: &Geometry = &mesh.geometry;
        let material = &mesh.material;
        let target = match (geometry.topology, material.transparent) {
            (Topology::Lines, _) => &mut self.lines,
            (Topology::Triangles, true) => &mut self.transparent,
            (Topology::Triangles, false) => &mut self.opaque,
        };

        let base = material.color.to_linear();
        let opacity = material.effective_opacity();
        let material_params = material_params(material, geometry.topology);

        for &index in &geometry.indices {
            let i = index as usize;
            let (Some(&position), Some(&normal)) = (geometry.positions.get(i), geometry.normals.get(i))
            else {
                log::warn!("skipping out-of-range index {} in {:?}", index, object.name);
                continue;
            };

            let mut color = base;
            if material.vertex_colors {
                if let Some(vertex_color) = geometry.vertex_color(i) {
                    let tint = vertex_color.to_linear();
                    color = [color[0] * tint[0], color[1] * tint[1], color[2] * tint[2]];
                }
            }

            target.push(Vertex {
                position: object.transform.transform_point(position).to_array(),
                normal: object.transform.transform_normal(normal).to_array(),
                color: [color[0], color[1], color[2], opacity],
                material: material_params,
            });
        }
    }

    /// Clear all geometry
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
        self.lines.clear();
    }

    /// Get the total number of vertices across all passes
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.opaque.len() + self.transparent.len() + self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

fn material_params(material: &Material, topology: Topology) -> [f32; 4] {
    let lit = topology == Topology::Triangles && material.shading == Shading::Phong;
    let side = match (topology, material.side) {
        // Lines have no facing
        (Topology::Lines, _) => 2.0,
        (_, Side::Front) => 0.0,
        (_, Side::Back) => 1.0,
        (_, Side::Double) => 2.0,
    };
    [if lit { 1.0 } else { 0.0 }, material.shininess.max(1.0), side, 0.0]
}

/// Lights gathered from a scene, in shader layout
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightingUniforms {
    /// Summed ambient light, linear rgb
    pub ambient: [f32; 3],
    pub point_lights: [GpuPointLight; MAX_POINT_LIGHTS],
    pub point_light_count: usize,
}

impl LightingUniforms {
    /// Gather the visible lights of a scene
    ///
    /// Ambient lights are summed. Point lights beyond [`MAX_POINT_LIGHTS`]
    /// are dropped with a warning.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut lighting = Self::default();
        let mut dropped = 0;

        for (light, position) in scene.lights() {
            match *light {
                Light::Ambient { color, intensity } => {
                    let c = color.scaled_linear(intensity);
                    for (sum, channel) in lighting.ambient.iter_mut().zip(c) {
                        *sum += channel;
                    }
                }
                Light::Point { color, intensity, distance, decay } => {
                    if lighting.point_light_count == MAX_POINT_LIGHTS {
                        dropped += 1;
                        continue;
                    }
                    let c = color.scaled_linear(intensity);
                    lighting.point_lights[lighting.point_light_count] = GpuPointLight {
                        position: [position.x, position.y, position.z, distance],
                        color: [c[0], c[1], c[2], decay],
                    };
                    lighting.point_light_count += 1;
                }
            }
        }

        if dropped > 0 {
            log::warn!(
                "scene has {} point lights; only the first {} are rendered",
                MAX_POINT_LIGHTS + dropped,
                MAX_POINT_LIGHTS
            );
        }
        lighting
    }

    /// Combine with camera state into the per-frame uniform block
    pub fn to_uniforms(&self, camera: &PerspectiveCamera) -> SceneUniforms {
        let eye = camera.position;
        SceneUniforms {
            view_proj: camera.view_projection_matrix(),
            camera_position: [eye.x, eye.y, eye.z, 1.0],
            ambient: [self.ambient[0], self.ambient[1], self.ambient[2], 0.0],
            light_count: self.point_light_count as u32,
            _padding: [0; 3],
            point_lights: self.point_lights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit_core::{Color, Transform, Vec3};

    fn triangle() -> Geometry {
        Geometry::triangles(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z; 3],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_from_scene_splits_passes() {
        let mut scene = Scene::new();
        scene.add(Object3D::mesh(triangle(), Material::phong(Color::GREEN)));
        scene.add(Object3D::mesh(triangle(), Material::phong(Color::RED).with_opacity(0.5)));
        scene.add(Object3D::axes_helper(5.0));
        scene.add(Object3D::light(Light::point(Color::WHITE, 1.0)));

        let geometry = RenderableGeometry::from_scene(&scene);
        assert_eq!(geometry.opaque.len(), 3);
        assert_eq!(geometry.transparent.len(), 3);
        assert_eq!(geometry.lines.len(), 6);
        assert_eq!(geometry.transparent[0].color[3], 0.5);
    }

    #[test]
    fn test_world_space_transform() {
        let mut scene = Scene::new();
        let transform = Transform::from_position(Vec3::new(0.0, 0.0, -3.0));
        scene.add(Object3D::mesh(triangle(), Material::default()).with_transform(transform));

        let geometry = RenderableGeometry::from_scene(&scene);
        assert_eq!(geometry.opaque[1].position, [1.0, 0.0, -3.0]);
        assert_eq!(geometry.opaque[1].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hidden_objects_skipped() {
        let mut scene = Scene::new();
        let key = scene.add(Object3D::mesh(triangle(), Material::default()));
        scene.get_mut(key).unwrap().visible = false;
        assert!(RenderableGeometry::from_scene(&scene).is_empty());
    }

    #[test]
    fn test_vertex_colors_and_unlit_lines() {
        let mut scene = Scene::new();
        scene.add(Object3D::axes_helper(1.0));
        let geometry = RenderableGeometry::from_scene(&scene);
        let first = geometry.lines[0];
        assert_eq!(first.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(first.material[0], 0.0);
    }

    #[test]
    fn test_material_side_encoding() {
        assert_eq!(material_params(&Material::default(), Topology::Triangles)[2], 0.0);
        let double = Material::default().with_side(Side::Double);
        assert_eq!(material_params(&double, Topology::Triangles)[2], 2.0);
        assert_eq!(material_params(&Material::basic(Color::WHITE), Topology::Triangles)[0], 0.0);
    }

    #[test]
    fn test_lighting_gathers_and_caps() {
        let mut scene = Scene::new();
        scene.add(Object3D::light(Light::ambient(Color::WHITE, 0.25)));
        scene.add(Object3D::light(Light::ambient(Color::WHITE, 0.25)));
        for i in 0..6 {
            let light = Light::point(Color::WHITE, 2.0).with_falloff(10.0, 0.0);
            scene.add(Object3D::light(light).with_position(Vec3::new(i as f32, 0.0, 0.0)));
        }

        let lighting = LightingUniforms::from_scene(&scene);
        assert!((lighting.ambient[0] - 0.5).abs() < 1e-6);
        assert_eq!(lighting.point_light_count, MAX_POINT_LIGHTS);
        assert_eq!(lighting.point_lights[0].position[3], 10.0);
        assert_eq!(lighting.point_lights[0].color, [2.0, 2.0, 2.0, 0.0]);

        let camera = PerspectiveCamera::default();
        let uniforms = lighting.to_uniforms(&camera);
        assert_eq!(uniforms.light_count, MAX_POINT_LIGHTS as u32);
        assert_eq!(uniforms.ambient[3], 0.0);
    }
}
