//! Integration tests for scene bootstrapping
//!
//! A recording renderer and a headless container stand in for the GPU and
//! the window, so these run anywhere.

use std::cell::RefCell;
use std::rc::Rc;

use scenekit::host::{
    ClickEvent, Clipboard, ClipboardError, EventKind, FixedContainer, HostEvent, MemoryClipboard,
    Page,
};
use scenekit::{make_scene, with_controls, BootstrapError, CameraSetup, SceneConfig, Viewport};
use scenekit_core::{Color, Material, Object3D, PerspectiveCamera, Scene, SurfaceSize, Vec3};
use scenekit_input::{Modifiers, OrbitControls, PointerButton, PointerEvent, PointerPosition};
use scenekit_render::{Container, RenderError, Renderer, RendererOptions};

/// What the recording renderer saw, shared with the test
#[derive(Debug, Default)]
struct RenderLog {
    attached: Vec<(f32, f32)>,
    sizes: Vec<(u32, u32)>,
    /// Camera position and scene object count per rendered frame
    frames: Vec<(Vec3, usize)>,
    fail_next: Option<RenderError>,
}

struct RecordingRenderer {
    size: SurfaceSize,
    log: Rc<RefCell<RenderLog>>,
}

thread_local! {
    static LOG: Rc<RefCell<RenderLog>> = Rc::new(RefCell::new(RenderLog::default()));
}

fn render_log() -> Rc<RefCell<RenderLog>> {
    LOG.with(|log| {
        *log.borrow_mut() = RenderLog::default();
        Rc::clone(log)
    })
}

impl Renderer for RecordingRenderer {
    type Container = FixedContainer;

    fn attach(container: &FixedContainer, _options: &RendererOptions) -> Result<Self, RenderError> {
        let log = LOG.with(Rc::clone);
        let size = container.size();
        log.borrow_mut().attached.push((size.width, size.height));
        Ok(Self {
            size: SurfaceSize::default(),
            log,
        })
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = SurfaceSize::new(width, height);
        self.log.borrow_mut().sizes.push((width, height));
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        let mut log = self.log.borrow_mut();
        if let Some(err) = log.fail_next.take() {
            return Err(err);
        }
        log.frames.push((camera.position, scene.len()));
        Ok(())
    }
}

/// Renderer that never attaches
struct NoGpu;

impl Renderer for NoGpu {
    type Container = FixedContainer;

    fn attach(_container: &FixedContainer, _options: &RendererOptions) -> Result<Self, RenderError> {
        Err(RenderError::NoAdapter)
    }

    fn set_size(&mut self, _width: u32, _height: u32) {}

    fn size(&self) -> SurfaceSize {
        SurfaceSize::default()
    }

    fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), RenderError> {
        Ok(())
    }
}

struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("headless".to_string()))
    }
}

fn page(width: f32, height: f32) -> (Page<RecordingRenderer>, FixedContainer, MemoryClipboard) {
    let container = FixedContainer::new(width, height);
    let clipboard = MemoryClipboard::new();
    let page = Page::new(container.clone(), Box::new(clipboard.clone()));
    (page, container, clipboard)
}

fn click(modifiers: Modifiers) -> HostEvent {
    HostEvent::Click(ClickEvent::new(PointerPosition::new(10.0, 10.0), modifiers))
}

fn pointer(event: PointerEvent) -> HostEvent {
    HostEvent::Pointer(event)
}

#[test]
fn test_camera_defaults() {
    let log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);

    let viewport = make_scene(&mut page, SceneConfig::default()).unwrap();
    assert_eq!(viewport.camera.fov, 75.0);
    assert_eq!(viewport.camera.near, 0.1);
    assert_eq!(viewport.camera.far, 1000.0);
    assert_eq!(viewport.camera.aspect, 800.0 / 600.0);
    assert_eq!(viewport.camera.up, Vec3::Y);
    assert_eq!(viewport.camera.position, Vec3::ZERO);
    assert!(viewport.scene.is_empty());

    assert_eq!(log.borrow().attached, vec![(800.0, 600.0)]);
    assert_eq!(viewport.renderer.size(), SurfaceSize::new(800, 600));
    assert!(page.has_animation_loop());
}

#[test]
fn test_camera_setup_applied() {
    let _log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default().with_camera(CameraSetup {
        up: Some(Vec3::new(0.0, 0.0, 1.0)),
        position: Some(Vec3::new(6.12, 3.59, 5.43)),
    });

    let viewport = make_scene(&mut page, config).unwrap();
    assert_eq!(viewport.camera.up, Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(viewport.camera.position, Vec3::new(6.12, 3.59, 5.43));
}

#[test]
fn test_explicit_container_wins_over_body() {
    let log = render_log();
    let (mut page, _body, _clipboard) = page(800.0, 600.0);
    let canvas = FixedContainer::new(300.0, 150.0);

    let viewport = make_scene(&mut page, SceneConfig::default().with_container(canvas)).unwrap();
    assert_eq!(log.borrow().attached, vec![(300.0, 150.0)]);
    assert_eq!(viewport.camera.aspect, 2.0);
}

#[test]
fn test_without_controls() {
    let log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default().with_camera(CameraSetup {
        up: None,
        position: Some(Vec3::new(1.0, 2.0, 3.0)),
    });

    let mut viewport = make_scene(&mut page, config).unwrap();
    assert!(viewport.controls.is_none());
    assert!(viewport.subscriptions.controls_input.is_none());
    assert_eq!(page.listener_count(EventKind::Pointer), 0);

    let wheel = pointer(PointerEvent::Wheel { delta_y: -100.0, modifiers: Modifiers::empty() });
    assert_eq!(page.dispatch(&wheel, &mut viewport), 0);

    assert!(page.run_frame(&mut viewport).unwrap());
    assert!(page.run_frame(&mut viewport).unwrap());
    let frames = &log.borrow().frames;
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|(position, _)| *position == Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn test_controls_drive_camera() {
    let log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default()
        .with_camera(CameraSetup { up: None, position: Some(Vec3::new(0.0, 0.0, 10.0)) })
        .with_controls(with_controls::<OrbitControls>());

    let mut viewport = make_scene(&mut page, config).unwrap();
    assert!(viewport.controls.is_some());
    assert_eq!(page.listener_count(EventKind::Pointer), 1);

    // Scrolling towards the content dollies in
    let wheel = pointer(PointerEvent::Wheel { delta_y: -100.0, modifiers: Modifiers::empty() });
    assert_eq!(page.dispatch(&wheel, &mut viewport), 1);
    page.run_frame(&mut viewport).unwrap();

    let distance = viewport.camera.position.length();
    assert!(distance < 10.0, "camera did not dolly in: {}", distance);
    assert_eq!(log.borrow().frames.last().map(|(p, _)| *p), Some(viewport.camera.position));
}

#[test]
fn test_drag_rotates_camera() {
    let _log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default()
        .with_camera(CameraSetup { up: None, position: Some(Vec3::new(0.0, 0.0, 10.0)) })
        .with_controls(with_controls::<OrbitControls>());
    let mut viewport = make_scene(&mut page, config).unwrap();

    let none = Modifiers::empty();
    let events = [
        PointerEvent::Down { button: PointerButton::Primary, position: PointerPosition::new(400.0, 300.0), modifiers: none },
        PointerEvent::Move { position: PointerPosition::new(500.0, 300.0), modifiers: none },
        PointerEvent::Up { button: PointerButton::Primary, position: PointerPosition::new(500.0, 300.0), modifiers: none },
    ];
    for event in events {
        page.dispatch(&pointer(event), &mut viewport);
    }
    page.run_frame(&mut viewport).unwrap();

    assert!(viewport.camera.position.x.abs() > 0.1);
    assert!((viewport.camera.position.length() - 10.0).abs() < 1e-3);
}

#[test]
fn test_resize_updates_camera_and_renderer() {
    let log = render_log();
    let (mut page, container, _clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default().with_controls(with_controls::<OrbitControls>());
    let mut viewport = make_scene(&mut page, config).unwrap();

    container.set_size(1024.0, 512.0);
    assert_eq!(page.dispatch(&HostEvent::Resize, &mut viewport), 1);

    assert_eq!(viewport.camera.aspect, 1024.0 / 512.0);
    assert_eq!(viewport.renderer.size(), SurfaceSize::new(1024, 512));
    assert_eq!(log.borrow().sizes.last(), Some(&(1024, 512)));
    let expected = PerspectiveCamera::new(75.0, 2.0, 0.1, 1000.0);
    assert_eq!(viewport.camera.projection_matrix(), expected.projection_matrix());
}

#[test]
fn test_resize_to_empty_is_skipped() {
    let log = render_log();
    let (mut page, container, _clipboard) = page(800.0, 600.0);
    let mut viewport = make_scene(&mut page, SceneConfig::default()).unwrap();

    container.set_size(0.0, 600.0);
    page.dispatch(&HostEvent::Resize, &mut viewport);
    assert_eq!(viewport.camera.aspect, 800.0 / 600.0);
    assert_eq!(log.borrow().sizes, vec![(800, 600)]);
}

#[test]
fn test_shift_click_copies_camera_position() {
    let _log = render_log();
    let (mut page, _container, clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default().with_camera(CameraSetup {
        up: Some(Vec3::new(0.0, 0.0, 1.0)),
        position: Some(Vec3::new(6.12, 3.59, 5.43)),
    });
    let mut viewport = make_scene(&mut page, config).unwrap();

    page.dispatch(&click(Modifiers::empty()), &mut viewport);
    assert_eq!(clipboard.write_count(), 0);

    page.dispatch(&click(Modifiers::SHIFT), &mut viewport);
    assert_eq!(clipboard.contents().as_deref(), Some("6.12, 3.59, 5.43"));

    viewport.camera.position = Vec3::new(-1.23456, 0.0, 2.0);
    page.dispatch(&click(Modifiers::SHIFT | Modifiers::CONTROL), &mut viewport);
    assert_eq!(clipboard.contents().as_deref(), Some("-1.23, 0, 2"));
    assert_eq!(clipboard.write_count(), 2);
}

#[test]
fn test_copied_coordinates_round_ties_up() {
    let _log = render_log();
    let (mut page, _container, clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default().with_camera(CameraSetup {
        up: None,
        position: Some(Vec3::new(1.125, 0.375, 2.625)),
    });
    let mut viewport = make_scene(&mut page, config).unwrap();

    page.dispatch(&click(Modifiers::SHIFT), &mut viewport);
    assert_eq!(clipboard.contents().as_deref(), Some("1.13, 0.38, 2.63"));
}

#[test]
fn test_camera_clipboard_disabled() {
    let _log = render_log();
    let (mut page, _container, clipboard) = page(800.0, 600.0);
    let mut viewport =
        make_scene(&mut page, SceneConfig::default().with_camera_clipboard(false)).unwrap();

    assert!(viewport.subscriptions.camera_clipboard.is_none());
    assert_eq!(page.dispatch(&click(Modifiers::SHIFT), &mut viewport), 0);
    assert_eq!(clipboard.write_count(), 0);
}

#[test]
fn test_failing_clipboard_is_not_fatal() {
    let _log = render_log();
    let container = FixedContainer::new(800.0, 600.0);
    let mut page: Page<RecordingRenderer> = Page::new(container, Box::new(FailingClipboard));
    let mut viewport = make_scene(&mut page, SceneConfig::default()).unwrap();

    assert_eq!(page.dispatch(&click(Modifiers::SHIFT), &mut viewport), 1);
    assert!(page.run_frame(&mut viewport).unwrap());
}

#[test]
fn test_unsubscribed_listeners_not_invoked() {
    let _log = render_log();
    let (mut page, container, clipboard) = page(800.0, 600.0);
    let mut viewport = make_scene(&mut page, SceneConfig::default()).unwrap();

    viewport.subscriptions.unsubscribe_all();
    assert!(!viewport.subscriptions.resize.is_active());

    container.set_size(400.0, 400.0);
    assert_eq!(page.dispatch(&HostEvent::Resize, &mut viewport), 0);
    assert_eq!(page.dispatch(&click(Modifiers::SHIFT), &mut viewport), 0);
    assert_eq!(viewport.camera.aspect, 800.0 / 600.0);
    assert_eq!(clipboard.write_count(), 0);
    assert_eq!(page.listener_count(EventKind::Resize), 0);
}

#[test]
fn test_unsubscribe_during_dispatch() {
    let _log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let mut viewport = make_scene(&mut page, SceneConfig::default()).unwrap();

    let calls = Rc::new(RefCell::new(Vec::new()));
    let second: Rc<RefCell<Option<scenekit::host::Subscription>>> = Rc::default();

    let first_calls = Rc::clone(&calls);
    let second_handle = Rc::clone(&second);
    page.add_listener(EventKind::Resize, move |_, _| {
        first_calls.borrow_mut().push("first");
        if let Some(subscription) = second_handle.borrow().as_ref() {
            subscription.unsubscribe();
        }
    });
    let second_calls = Rc::clone(&calls);
    let subscription = page.add_listener(EventKind::Resize, move |_, _| {
        second_calls.borrow_mut().push("second");
    });
    *second.borrow_mut() = Some(subscription);

    // Bootstrap resize listener plus the first one; the second was detached mid-dispatch
    assert_eq!(page.dispatch(&HostEvent::Resize, &mut viewport), 2);
    assert_eq!(*calls.borrow(), vec!["first"]);
}

#[test]
fn test_dropped_handle_keeps_listener() {
    let _log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let mut viewport = make_scene(&mut page, SceneConfig::default()).unwrap();

    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    drop(page.add_listener(EventKind::Click, move |_, _| *counter.borrow_mut() += 1));

    page.dispatch(&click(Modifiers::empty()), &mut viewport);
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn test_animate_runs_each_frame() {
    let log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let config = SceneConfig::default().with_animate(|scene: &mut Scene, time| {
        if time.frame == 0 {
            scene.add(Object3D::axes_helper(1.0));
        }
        scene.add(Object3D::light(scenekit_core::Light::ambient(Color::WHITE, 0.1)));
    });
    let mut viewport: Viewport<RecordingRenderer> = make_scene(&mut page, config).unwrap();

    for _ in 0..3 {
        page.run_frame(&mut viewport).unwrap();
    }
    let counts: Vec<usize> = log.borrow().frames.iter().map(|(_, count)| *count).collect();
    // The animate step runs before the frame is drawn
    assert_eq!(counts, vec![2, 3, 4]);
    assert_eq!(page.frame_count(), 3);
}

#[test]
fn test_render_errors_propagate() {
    let log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let mut viewport = make_scene(&mut page, SceneConfig::default()).unwrap();
    viewport
        .scene
        .add(Object3D::mesh(scenekit_core::Geometry::sphere(1.0, 8, 6), Material::phong(Color::GREEN)));

    log.borrow_mut().fail_next = Some(RenderError::SurfaceLost);
    assert_eq!(page.run_frame(&mut viewport), Err(RenderError::SurfaceLost));
    assert_eq!(page.run_frame(&mut viewport), Ok(true));
}

#[test]
fn test_no_animation_loop() {
    let _log = render_log();
    let (mut page, _container, _clipboard) = page(800.0, 600.0);
    let mut viewport = make_scene(&mut page, SceneConfig::default()).unwrap();

    page.set_animation_loop(None);
    assert!(!page.has_animation_loop());
    assert_eq!(page.run_frame(&mut viewport), Ok(false));
}

#[test]
fn test_empty_container_fails() {
    let log = render_log();
    let (mut page, _container, _clipboard) = page(0.0, 600.0);

    let result = make_scene(&mut page, SceneConfig::default());
    assert!(matches!(
        result,
        Err(BootstrapError::EmptyContainer { width, height }) if width == 0.0 && height == 600.0
    ));
    // Nothing attached, nothing subscribed
    assert!(log.borrow().attached.is_empty());
    assert_eq!(page.listener_count(EventKind::Resize), 0);
    assert!(!page.has_animation_loop());
}

#[test]
fn test_renderer_failure_surfaces() {
    let mut page: Page<NoGpu> =
        Page::new(FixedContainer::new(800.0, 600.0), Box::new(MemoryClipboard::new()));

    let result = make_scene(&mut page, SceneConfig::default());
    assert!(matches!(result, Err(BootstrapError::Renderer(RenderError::NoAdapter))));
}
