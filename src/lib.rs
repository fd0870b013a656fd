//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under `blockfall::{core,input,term,types}`
//! and hosts the driver-side pieces: environment [`config`], per-frame time stepping in
//! [`frame`] and the transition [`journal`].

pub mod config;
pub mod frame;
pub mod journal;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::Config;
pub use frame::{advance_frame, MAX_FRAME_MS};
pub use journal::Journal;
