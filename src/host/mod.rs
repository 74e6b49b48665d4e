//! Native host for a scene
//!
//! The [`Page`] owns what a scene needs from its surroundings: the body
//! container, a clipboard, registered event listeners and the animation loop.

mod clipboard;
mod clock;
mod container;
mod events;
mod page;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use clock::{FrameClock, FrameTime};
pub use container::FixedContainer;
pub use events::{ClickEvent, EventKind, HostEvent};
pub use page::{AnimationLoop, Listener, ListenerContext, Page, Subscription};
