//! The page: listener table, clipboard and animation loop

use std::cell::Cell;
use std::rc::Rc;

use scenekit_render::{RenderError, Renderer};

use super::{Clipboard, EventKind, FrameClock, FrameTime, HostEvent};
use crate::bootstrap::Viewport;

/// What a listener can reach while handling an event
pub struct ListenerContext<'a, R: Renderer> {
    pub viewport: &'a mut Viewport<R>,
    pub clipboard: &'a mut dyn Clipboard,
}

/// Event listener registered on a page
pub type Listener<R> = Box<dyn FnMut(&HostEvent, &mut ListenerContext<'_, R>)>;

/// Per-frame step run by [`Page::run_frame`]
pub type AnimationLoop<R> = Box<dyn FnMut(&mut Viewport<R>, &FrameTime) -> Result<(), RenderError>>;

/// Handle to a registered listener
///
/// Dropping the handle leaves the listener attached.
#[derive(Clone, Debug)]
pub struct Subscription {
    id: u64,
    kind: EventKind,
    active: Rc<Cell<bool>>,
}

impl Subscription {
    /// Detach the listener; it is never invoked again, even later in the
    /// dispatch that is currently running
    pub fn unsubscribe(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

struct Registration<R: Renderer> {
    kind: EventKind,
    active: Rc<Cell<bool>>,
    listener: Listener<R>,
}

/// Host a viewport lives in
pub struct Page<R: Renderer> {
    body: R::Container,
    clipboard: Box<dyn Clipboard>,
    listeners: Vec<Registration<R>>,
    next_id: u64,
    animation_loop: Option<AnimationLoop<R>>,
    clock: FrameClock,
}

impl<R: Renderer> Page<R> {
    pub fn new(body: R::Container, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            body,
            clipboard,
            listeners: Vec::new(),
            next_id: 0,
            animation_loop: None,
            clock: FrameClock::new(),
        }
    }

    /// Container used when a scene does not name its own
    pub fn body(&self) -> &R::Container {
        &self.body
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn Clipboard {
        self.clipboard.as_mut()
    }

    /// Register `listener` for events of `kind`
    pub fn add_listener<F>(&mut self, kind: EventKind, listener: F) -> Subscription
    where
        F: FnMut(&HostEvent, &mut ListenerContext<'_, R>) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        let active = Rc::new(Cell::new(true));
        self.listeners.push(Registration {
            kind,
            active: Rc::clone(&active),
            listener: Box::new(listener),
        });
        log::trace!("Added {:?} listener #{}", kind, id);
        Subscription { id, kind, active }
    }

    /// Number of attached listeners for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|r| r.kind == kind && r.active.get())
            .count()
    }

    /// Deliver `event` to its listeners in registration order
    ///
    /// Returns how many listeners ran.
    pub fn dispatch(&mut self, event: &HostEvent, viewport: &mut Viewport<R>) -> usize {
        let kind = event.kind();
        let clipboard = self.clipboard.as_mut();
        let mut invoked = 0;

        for registration in self.listeners.iter_mut() {
            if registration.kind != kind || !registration.active.get() {
                continue;
            }
            let mut context = ListenerContext {
                viewport: &mut *viewport,
                clipboard: &mut *clipboard,
            };
            (registration.listener)(event, &mut context);
            invoked += 1;
        }

        self.listeners.retain(|r| r.active.get());
        invoked
    }

    /// Install or clear the per-frame step; installing restarts the frame clock
    pub fn set_animation_loop(&mut self, animation_loop: Option<AnimationLoop<R>>) {
        if animation_loop.is_some() {
            self.clock.reset();
        }
        self.animation_loop = animation_loop;
    }

    pub fn has_animation_loop(&self) -> bool {
        self.animation_loop.is_some()
    }

    /// Run one frame of the animation loop
    ///
    /// Returns `Ok(false)` when no loop is installed.
    pub fn run_frame(&mut self, viewport: &mut Viewport<R>) -> Result<bool, RenderError> {
        let Some(step) = self.animation_loop.as_mut() else {
            return Ok(false);
        };
        let time = self.clock.tick();
        step(viewport, &time)?;
        Ok(true)
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }
}
