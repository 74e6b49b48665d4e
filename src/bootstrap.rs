//! Scene bootstrapping
//!
//! [`make_scene`] wires a scene, a perspective camera, a renderer and
//! optional camera controls into a page, keeps them in step with container
//! resizes and installs the per-frame loop.

use scenekit_core::{PerspectiveCamera, Scene, SurfaceSize, Vec3};
use scenekit_input::Controls;
use scenekit_render::{Container, RenderError, Renderer, RendererOptions};

use crate::debug;
use crate::host::{EventKind, FrameTime, HostEvent, Page, Subscription};

/// Per-frame scene callback
pub type AnimateFn = Box<dyn FnMut(&mut Scene, &FrameTime)>;

/// Builds controls bound to a camera and the surface input arrives on
pub type ControlsFactory = Box<dyn FnOnce(&PerspectiveCamera, SurfaceSize) -> Box<dyn Controls>>;

/// Factory for any [`Controls`] implementation with default settings
pub fn with_controls<C: Controls + 'static>() -> ControlsFactory {
    Box::new(|camera: &PerspectiveCamera, surface: SurfaceSize| -> Box<dyn Controls> {
        Box::new(C::new(camera, surface))
    })
}

/// Initial camera placement
///
/// `up` is applied before `position`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraSetup {
    pub up: Option<Vec3>,
    pub position: Option<Vec3>,
}

/// Everything optional about a scene
pub struct SceneConfig<R: Renderer> {
    pub animate: Option<AnimateFn>,
    pub camera: CameraSetup,
    /// Defaults to the page body
    pub container: Option<R::Container>,
    pub controls: Option<ControlsFactory>,
    pub renderer: RendererOptions,
    /// Shift-click copies the camera position to the clipboard
    pub camera_clipboard: bool,
}

impl<R: Renderer> Default for SceneConfig<R> {
    fn default() -> Self {
        Self {
            animate: None,
            camera: CameraSetup::default(),
            container: None,
            controls: None,
            renderer: RendererOptions::default(),
            camera_clipboard: true,
        }
    }
}

impl<R: Renderer> SceneConfig<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animate<F>(mut self, animate: F) -> Self
    where
        F: FnMut(&mut Scene, &FrameTime) + 'static,
    {
        self.animate = Some(Box::new(animate));
        self
    }

    pub fn with_camera(mut self, camera: CameraSetup) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_container(mut self, container: R::Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_controls(mut self, factory: ControlsFactory) -> Self {
        self.controls = Some(factory);
        self
    }

    pub fn with_renderer_options(mut self, options: RendererOptions) -> Self {
        self.renderer = options;
        self
    }

    pub fn with_camera_clipboard(mut self, enabled: bool) -> Self {
        self.camera_clipboard = enabled;
        self
    }
}

/// Listener handles installed by [`make_scene`]
#[derive(Clone, Debug)]
pub struct ViewportSubscriptions {
    pub resize: Subscription,
    pub camera_clipboard: Option<Subscription>,
    pub controls_input: Option<Subscription>,
}

impl ViewportSubscriptions {
    pub fn unsubscribe_all(&self) {
        self.resize.unsubscribe();
        for subscription in self.camera_clipboard.iter().chain(&self.controls_input) {
            subscription.unsubscribe();
        }
    }
}

/// A bootstrapped scene
pub struct Viewport<R: Renderer> {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub renderer: R,
    pub controls: Option<Box<dyn Controls>>,
    pub subscriptions: ViewportSubscriptions,
}

/// Bootstrap error types
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// The container has no drawable area
    EmptyContainer { width: f32, height: f32 },
    /// The renderer could not attach
    Renderer(RenderError),
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapError::EmptyContainer { width, height } => {
                write!(f, "Container has no drawable area ({}x{})", width, height)
            }
            BootstrapError::Renderer(err) => write!(f, "Renderer failed to attach: {}", err),
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::Renderer(err) => Some(err),
            BootstrapError::EmptyContainer { .. } => None,
        }
    }
}

impl From<RenderError> for BootstrapError {
    fn from(err: RenderError) -> Self {
        BootstrapError::Renderer(err)
    }
}

/// Create a scene, camera and renderer in `page` and start its animation loop
pub fn make_scene<R: Renderer>(
    page: &mut Page<R>,
    config: SceneConfig<R>,
) -> Result<Viewport<R>, BootstrapError> {
    let SceneConfig {
        animate,
        camera: camera_setup,
        container,
        controls,
        renderer: renderer_options,
        camera_clipboard,
    } = config;

    let scene = Scene::new();

    let container = container.unwrap_or_else(|| page.body().clone());
    let size = container.size();
    if size.is_empty() {
        return Err(BootstrapError::EmptyContainer {
            width: size.width,
            height: size.height,
        });
    }

    let mut camera = PerspectiveCamera::new(
        PerspectiveCamera::DEFAULT_FOV,
        size.aspect(),
        PerspectiveCamera::DEFAULT_NEAR,
        PerspectiveCamera::DEFAULT_FAR,
    );
    if let Some(up) = camera_setup.up {
        camera.up = up;
    }
    if let Some(position) = camera_setup.position {
        camera.position = position;
    }

    let mut renderer = R::attach(&container, &renderer_options)?;
    let surface = size.to_surface();
    renderer.set_size(surface.width, surface.height);

    let controls = controls.map(|factory| factory(&camera, renderer.output_surface()));

    let resize = page.add_listener(EventKind::Resize, move |_event, context| {
        let size = container.size();
        if size.is_empty() {
            log::debug!("Skipping resize to empty container {}x{}", size.width, size.height);
            return;
        }
        let viewport = &mut *context.viewport;
        viewport.camera.aspect = size.aspect();
        viewport.camera.update_projection_matrix();

        let surface = size.to_surface();
        viewport.renderer.set_size(surface.width, surface.height);
        if let Some(controls) = viewport.controls.as_mut() {
            controls.resize_surface(viewport.renderer.output_surface());
        }
        log::debug!("Resized viewport to {}x{}", surface.width, surface.height);
    });

    let mut animate = animate;
    page.set_animation_loop(Some(Box::new(
        move |viewport: &mut Viewport<R>, time: &FrameTime| {
            if let Some(animate) = animate.as_mut() {
                animate(&mut viewport.scene, time);
            }
            if let Some(controls) = viewport.controls.as_mut() {
                controls.update(&mut viewport.camera);
            }
            viewport.renderer.render(&viewport.scene, &viewport.camera)
        },
    )));

    let camera_clipboard = camera_clipboard
        .then(|| page.add_listener(EventKind::Click, debug::copy_camera_position::<R>));

    let controls_input = controls.is_some().then(|| {
        page.add_listener(EventKind::Pointer, |event, context| {
            let HostEvent::Pointer(pointer) = event else {
                return;
            };
            let viewport = &mut *context.viewport;
            if let Some(controls) = viewport.controls.as_mut() {
                controls.handle_pointer(pointer, &viewport.camera);
            }
        })
    });

    log::info!(
        "Scene ready: {}x{}, controls: {}",
        surface.width,
        surface.height,
        if controls.is_some() { "on" } else { "off" }
    );

    Ok(Viewport {
        scene,
        camera,
        renderer,
        controls,
        subscriptions: ViewportSubscriptions {
            resize,
            camera_clipboard,
            controls_input,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit_input::OrbitControls;

    #[test]
    fn test_default_config() {
        struct NoRenderer;
        impl Renderer for NoRenderer {
            type Container = crate::host::FixedContainer;
            fn attach(_: &Self::Container, _: &RendererOptions) -> Result<Self, RenderError> {
                Err(RenderError::NoAdapter)
            }
            fn set_size(&mut self, _: u32, _: u32) {}
            fn size(&self) -> SurfaceSize {
                SurfaceSize::default()
            }
            fn render(&mut self, _: &Scene, _: &PerspectiveCamera) -> Result<(), RenderError> {
                Ok(())
            }
        }

        let config = SceneConfig::<NoRenderer>::default();
        assert!(config.animate.is_none());
        assert!(config.container.is_none());
        assert!(config.controls.is_none());
        assert!(config.camera_clipboard);
        assert!(config.renderer.alpha && config.renderer.antialias);
    }

    #[test]
    fn test_with_controls_factory() {
        let factory = with_controls::<OrbitControls>();
        let mut camera = PerspectiveCamera::default();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        let mut controls = factory(&camera, SurfaceSize::new(800, 600));
        // No input yet: the camera only turns to face the target
        controls.update(&mut camera);
        assert!((camera.position.z - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_error_display() {
        let err = BootstrapError::EmptyContainer { width: 0.0, height: 600.0 };
        assert_eq!(err.to_string(), "Container has no drawable area (0x600)");
        let err = BootstrapError::from(RenderError::NoAdapter);
        assert!(err.to_string().contains("No compatible GPU adapter"));
    }
}
