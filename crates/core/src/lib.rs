//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block engine. It has **no dependencies** on
//! terminal I/O or input handling, so it runs the same in the terminal
//! driver, in tests and in benchmarks.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven kinds, each a bounding box plus pre-rotated row masks
//! - [`board`]: guarded `u16` row registers, collision, merge and row clearing
//! - [`layers`]: per-kind copies of the board for rendering identity
//! - [`piece`]: the active piece
//! - [`session`]: the grid engine (spawn, move, rotate, drop, lock, pause)
//! - [`gravity`]: the session-owned gravity timer
//! - [`transition`]: what operations report to presentation
//! - [`rng`]: seeded uniform piece selection
//! - [`snapshot`]: copyable session view for renderers
//!
//! # Rules
//!
//! - Pieces spawn in rotation 0, horizontally centred, at the top row
//! - Rotation cycles through fixed states; no wall kicks
//! - A blocked down move locks the piece; full rows are removed and the rows
//!   above shift down
//! - The game ends when the top row holds a settled cell at spawn time
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Direction, GameSession, Transition};
//!
//! let mut game = GameSession::with_seed(12345);
//! game.start();
//!
//! game.move_piece(Direction::Right);
//! game.rotate();
//! game.drop_piece();
//!
//! let merged = game
//!     .drain_transitions()
//!     .any(|t| matches!(t, Transition::Merged { .. }));
//! assert!(merged);
//! ```
//!
//! # Timing
//!
//! The engine has no clock. Drivers call
//! [`GameSession::tick`](session::GameSession::tick) with elapsed
//! milliseconds; the session's [`Gravity`] turns that into down moves.

pub mod board;
pub mod gravity;
pub mod layers;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod transition;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, RowBits};
pub use gravity::Gravity;
pub use layers::LayerMaps;
pub use piece::ActivePiece;
pub use rng::SimpleRng;
pub use session::{GameSession, SessionConfig};
pub use shapes::{shape, Shape, ShapeRow};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use transition::{Transition, Transitions};
pub use types::{Direction, GameAction, Phase, PieceKind};
