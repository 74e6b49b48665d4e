//! Renderer interface and the wgpu implementation

use std::sync::Arc;
use scenekit_core::{PerspectiveCamera, Scene, SurfaceSize};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::{
    context::RenderContext,
    pipeline::MeshPipeline,
    renderable::{LightingUniforms, RenderableGeometry},
    Container,
};

/// Render error types
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Timed out waiting for the next surface texture
    Timeout,
    /// No GPU adapter compatible with the surface
    NoAdapter,
    /// The adapter refused to create a device
    DeviceRequest(String),
    /// The surface could not be created or configured
    Surface(String),
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Timeout => write!(f, "Timed out acquiring surface texture"),
            RenderError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            RenderError::DeviceRequest(msg) => write!(f, "Failed to create device: {}", msg),
            RenderError::Surface(msg) => write!(f, "Surface error: {}", msg),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Options for attaching a renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RendererOptions {
    /// Composite the output over whatever is behind the container
    pub alpha: bool,
    /// Multisample edges when the GPU supports it
    pub antialias: bool,
    /// Wait for vertical sync when presenting
    pub vsync: bool,
    /// RGBA clear color in linear space; alpha is forced to 1 without `alpha`
    pub clear_color: [f32; 4],
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl RendererOptions {
    /// Clear color to use for a scene with the given background
    pub fn effective_clear_color(&self, scene: &Scene) -> [f32; 4] {
        if let Some(background) = scene.background() {
            let [r, g, b] = background.to_linear();
            return [r, g, b, 1.0];
        }
        let [r, g, b, a] = self.clear_color;
        if self.alpha {
            // Premultiplied output
            [r * a, g * a, b * a, a]
        } else {
            [r, g, b, 1.0]
        }
    }
}

/// Something that draws a scene into a container
pub trait Renderer: Sized + 'static {
    /// What the renderer attaches to; listeners keep a handle to re-read its size
    type Container: Container + Clone + 'static;

    /// Create a renderer drawing into `container`
    fn attach(container: &Self::Container, options: &RendererOptions) -> Result<Self, RenderError>;

    /// Resize the drawing buffer
    fn set_size(&mut self, width: u32, height: u32);

    /// Current drawing-buffer size
    fn size(&self) -> SurfaceSize;

    /// Size of the surface pointer input arrives on
    fn output_surface(&self) -> SurfaceSize {
        self.size()
    }

    /// Draw `scene` as seen from `camera`
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;
}

/// Forward rendering into a winit window through wgpu
pub struct WgpuRenderer {
    context: RenderContext,
    pipeline: MeshPipeline,
    options: RendererOptions,
    /// Scene revision last uploaded, with its gathered lights
    uploaded: Option<(u64, LightingUniforms)>,
}

impl WgpuRenderer {
    /// Configure the surface again at its current size, e.g. after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Get the underlying render context
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    fn sync_scene(&mut self, scene: &Scene) -> LightingUniforms {
        match self.uploaded {
            Some((revision, lighting)) if revision == scene.revision() => lighting,
            _ => {
                let geometry = RenderableGeometry::from_scene(scene);
                self.pipeline.upload(&self.context.device, &geometry);
                let lighting = LightingUniforms::from_scene(scene);
                log::debug!(
                    "Uploaded scene revision {}: {} vertices, {} point lights",
                    scene.revision(),
                    geometry.vertex_count(),
                    lighting.point_light_count
                );
                self.uploaded = Some((scene.revision(), lighting));
                lighting
            }
        }
    }
}

impl Renderer for WgpuRenderer {
    type Container = Arc<Window>;

    fn attach(container: &Arc<Window>, options: &RendererOptions) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(container.clone(), options))?;
        let mut pipeline = MeshPipeline::new(&context.device, context.format(), context.sample_count);
        pipeline.ensure_targets(&context.device, context.config.width, context.config.height);

        log::info!(
            "Renderer attached: {}x{}, {} samples",
            context.config.width,
            context.config.height,
            pipeline.sample_count()
        );

        Ok(Self {
            context,
            pipeline,
            options: *options,
            uploaded: None,
        })
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.context.resize(PhysicalSize::new(width, height));
        self.pipeline.ensure_targets(&self.context.device, width, height);
    }

    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.context.config.width, self.context.config.height)
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        let lighting = self.sync_scene(scene);
        self.pipeline
            .update_uniforms(&self.context.queue, &lighting.to_uniforms(camera));

        // Get surface texture
        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Create command encoder
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let [r, g, b, a] = self.options.effective_clear_color(scene);
        self.pipeline.render(
            &mut encoder,
            &view,
            wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        );

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
