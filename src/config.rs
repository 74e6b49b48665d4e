//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`SCENEKIT_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env, Serialized}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use scenekit_core::{Color, Geometry, Light, Material, Object3D, PerspectiveCamera, Scene, SurfaceSize, Vec3};
use scenekit_input::{Controls, OrbitControls};
use scenekit_render::{Renderer, RendererOptions};

use crate::bootstrap::{CameraSetup, ControlsFactory, SceneConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Camera controls configuration
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Viewer scene contents
    #[serde(default)]
    pub scene: SceneSettings,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Built-in defaults
    /// 2. `config/default.toml`
    /// 3. `config/user.toml`
    /// 4. Environment variables (`SCENEKIT_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        // Load default config
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SCENEKIT_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SCENEKIT_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Build the bootstrap configuration for a renderer
    ///
    /// The container is left unset so the page body is used.
    pub fn scene_config<R: Renderer>(&self) -> SceneConfig<R> {
        SceneConfig {
            camera: self.camera.setup(),
            controls: self.controls.factory(),
            renderer: self.rendering.renderer_options(),
            camera_clipboard: self.debug.camera_clipboard,
            ..SceneConfig::default()
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Let the desktop show through transparent pixels
    pub transparent: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "scenekit".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            transparent: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Up direction [x, y, z]; unset keeps +Y
    pub up: Option<[f32; 3]>,
    /// Starting position [x, y, z]; unset keeps the origin
    pub position: Option<[f32; 3]>,
}

impl CameraConfig {
    pub fn setup(&self) -> CameraSetup {
        CameraSetup {
            up: self.up.map(Vec3::from),
            position: self.position.map(Vec3::from),
        }
    }
}

/// Which camera controls to install
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlsKind {
    #[default]
    Orbit,
    None,
}

/// Camera controls configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub kind: ControlsKind,
    /// Keep the camera gliding after a drag ends
    pub enable_damping: bool,
    /// Fraction of remaining motion applied per frame when damping
    pub damping_factor: f32,
    /// Orbit continuously without input
    pub auto_rotate: bool,
    /// 2.0 = one orbit every 30 seconds at 60 fps
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            kind: ControlsKind::Orbit,
            enable_damping: false,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

impl ControlsConfig {
    /// Factory building the configured controls, or `None` for no controls
    pub fn factory(&self) -> Option<ControlsFactory> {
        match self.kind {
            ControlsKind::None => None,
            ControlsKind::Orbit => {
                let settings = self.clone();
                Some(Box::new(move |camera: &PerspectiveCamera, surface: SurfaceSize| -> Box<dyn Controls> {
                    Box::new(
                        OrbitControls::new(camera, surface)
                            .with_damping(settings.enable_damping, settings.damping_factor)
                            .with_auto_rotate(settings.auto_rotate, settings.auto_rotate_speed)
                            .with_rotate_speed(settings.rotate_speed)
                            .with_zoom_speed(settings.zoom_speed)
                            .with_pan_speed(settings.pan_speed),
                    )
                }))
            }
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Transparent background
    pub alpha: bool,
    /// Multisample antialiasing
    pub antialias: bool,
    /// Enable VSync
    pub vsync: bool,
    /// Clear color [r, g, b, a]
    pub clear_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        let options = RendererOptions::default();
        Self {
            alpha: options.alpha,
            antialias: options.antialias,
            vsync: options.vsync,
            clear_color: options.clear_color,
        }
    }
}

impl RenderingConfig {
    pub fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            alpha: self.alpha,
            antialias: self.antialias,
            vsync: self.vsync,
            clear_color: self.clear_color,
        }
    }
}

/// A point light placed by the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLightConfig {
    pub position: [f32; 3],
    /// Color as 0xRRGGBB
    #[serde(default = "default_light_color")]
    pub color: u32,
    #[serde(default = "default_point_intensity")]
    pub intensity: f32,
    /// Cutoff distance, 0 = unlimited
    #[serde(default)]
    pub distance: f32,
    /// Falloff exponent
    #[serde(default = "default_decay")]
    pub decay: f32,
}

fn default_light_color() -> u32 {
    0xffffff
}

fn default_point_intensity() -> f32 {
    Light::DEFAULT_POINT_INTENSITY
}

fn default_decay() -> f32 {
    2.0
}

impl PointLightConfig {
    pub fn to_light(&self) -> Light {
        Light::point(Color::from_hex(self.color), self.intensity).with_falloff(self.distance, self.decay)
    }
}

/// A shaded sphere placed by the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_sphere_radius")]
    pub radius: f32,
    /// Color as 0xRRGGBB
    #[serde(default = "default_light_color")]
    pub color: u32,
    #[serde(default = "default_sphere_opacity")]
    pub opacity: f32,
    /// Segments around the equator; half as many are used pole to pole
    #[serde(default = "default_sphere_segments")]
    pub segments: u32,
}

fn default_sphere_radius() -> f32 {
    1.0
}

fn default_sphere_opacity() -> f32 {
    1.0
}

fn default_sphere_segments() -> u32 {
    32
}

impl SphereConfig {
    pub fn to_object(&self) -> Object3D {
        let width_segments = self.segments.max(3);
        let height_segments = (width_segments / 2).max(2);
        let geometry = Geometry::sphere(self.radius, width_segments, height_segments);
        let material = Material::phong(Color::from_hex(self.color)).with_opacity(self.opacity);
        Object3D::mesh(geometry, material).with_position(Vec3::from(self.position))
    }
}

/// Contents of the viewer scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Axes helper length, 0 disables it
    pub axes_size: f32,
    /// Ambient light intensity, 0 disables it
    pub ambient_intensity: f32,
    /// Background color as 0xRRGGBB; unset keeps the renderer's clear color
    pub background: Option<u32>,
    pub point_lights: Vec<PointLightConfig>,
    pub spheres: Vec<SphereConfig>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            axes_size: 5.0,
            ambient_intensity: 0.5,
            background: None,
            point_lights: vec![
                PointLightConfig {
                    position: [0.0, 5.0, 5.0],
                    color: default_light_color(),
                    intensity: default_point_intensity(),
                    distance: 0.0,
                    decay: 0.0,
                },
                PointLightConfig {
                    position: [0.0, 0.0, -2.0],
                    color: default_light_color(),
                    intensity: default_point_intensity(),
                    distance: 0.0,
                    decay: default_decay(),
                },
            ],
            spheres: Vec::new(),
        }
    }
}

impl SceneSettings {
    /// Add the configured helpers, lights and spheres to `scene`
    pub fn populate(&self, scene: &mut Scene) {
        if self.axes_size > 0.0 {
            scene.add(Object3D::axes_helper(self.axes_size));
        }
        if self.ambient_intensity > 0.0 {
            scene.add(Object3D::light(Light::ambient(Color::WHITE, self.ambient_intensity)).with_name("ambient"));
        }
        for (i, light) in self.point_lights.iter().enumerate() {
            scene.add(
                Object3D::light(light.to_light())
                    .with_name(format!("point_light_{}", i))
                    .with_position(Vec3::from(light.position)),
            );
        }
        for (i, sphere) in self.spheres.iter().enumerate() {
            scene.add(sphere.to_object().with_name(format!("sphere_{}", i)));
        }
        scene.set_background(self.background.map(Color::from_hex));
    }
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Shift-click copies the camera position to the clipboard
    pub camera_clipboard: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            camera_clipboard: true,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
