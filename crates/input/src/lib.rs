//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Each press
//! is one action; the engine has no key repeat of its own.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_event, handle_key_event, should_quit};
