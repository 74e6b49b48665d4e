//! scenekit viewer
//!
//! Opens a window with an axes helper and a few lights, orbit controls
//! included. Shift-click logs the camera position and copies it.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

use scenekit::{
    config::AppConfig,
    host::{HostEvent, Page, SystemClipboard},
    input::{InputAction, InputMapper},
    make_scene,
    systems::WindowSystem,
    Viewport,
};
use scenekit_core::Vec3;
use scenekit_render::{RenderError, WgpuRenderer};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    page: Option<Page<WgpuRenderer>>,
    viewport: Option<Viewport<WgpuRenderer>>,
    input: InputMapper,
    /// Camera position last shown in the title
    title_position: Option<Vec3>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            page: None,
            viewport: None,
            input: InputMapper::new(),
            title_position: None,
        }
    }

    fn dispatch(&mut self, event: HostEvent) {
        if let (Some(page), Some(viewport)) = (&mut self.page, &mut self.viewport) {
            page.dispatch(&event, viewport);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(page), Some(viewport)) =
            (&self.window, &mut self.page, &mut self.viewport)
        else {
            return;
        };

        match page.run_frame(viewport) {
            Ok(_) => {}
            Err(RenderError::SurfaceLost) => viewport.renderer.reconfigure(),
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("Frame skipped: {}", e),
        }

        let position = viewport.camera.position;
        if self.title_position != Some(position) {
            window.update_title(position);
            self.title_position = Some(position);
        }

        // Request next frame
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut page = Page::new(window.window().clone(), Box::new(SystemClipboard::new()));
        let mut viewport = match make_scene(&mut page, self.config.scene_config()) {
            Ok(viewport) => viewport,
            Err(e) => {
                log::error!("Failed to create scene: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.config.scene.populate(&mut viewport.scene);
        log::info!("Scene populated with {} objects", viewport.scene.len());

        window.request_redraw();
        self.window = Some(window);
        self.page = Some(page);
        self.viewport = Some(viewport);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(_) => {
                self.dispatch(HostEvent::Resize);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            WindowEvent::KeyboardInput { .. } => match InputMapper::map_key_event(&event) {
                Some(InputAction::Exit) => event_loop.exit(),
                Some(InputAction::ToggleFullscreen) => {
                    if let Some(window) = &self.window {
                        window.toggle_fullscreen();
                    }
                }
                None => {}
            },

            other => {
                for host_event in self.input.handle_window_event(&other) {
                    self.dispatch(host_event);
                }
            }
        }
    }
}

fn main() {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // Initialize logging; RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting scenekit");

    // Create event loop
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
