//! Input handling module
//!
//! Translates window events into page events and special-key actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
