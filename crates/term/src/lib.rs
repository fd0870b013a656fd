//! Terminal presentation for the engine.
//!
//! Snapshots are drawn into a plain framebuffer (no widget toolkit) and the
//! renderer flushes only what changed since the previous frame. Board cells
//! are two columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{kind_color, AnchorY, BoardFrame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
