//! Application systems
//!
//! Window management for the viewer binary.

mod window;

pub use window::{WindowError, WindowSystem};
