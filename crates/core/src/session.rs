//! Game session - the grid engine
//!
//! Owns the board, the layer maps, the active piece with its single
//! look-ahead, the pause flag and the gravity timer. Every mutating operation
//! takes `&mut self` and runs to completion, so gravity ticks and player input
//! are serialized by construction.
//!
//! Phases: `Idle` (reset, nothing in play) → `Active` → `GameOver`. Movement,
//! rotation and drops are no-ops unless the phase is `Active` and the session
//! is not paused. Illegal moves are rejected silently and reported as `false`.

use crate::board::Board;
use crate::gravity::Gravity;
use crate::layers::LayerMaps;
use crate::piece::ActivePiece;
use crate::rng::SimpleRng;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::transition::{Transition, Transitions, TRANSITION_CAPACITY};
use crate::types::*;

/// Engine-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Interval between gravity-driven down moves.
    pub gravity_ms: u32,
    /// Seed for piece selection.
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity_ms: DEFAULT_GRAVITY_MS,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    layers: LayerMaps,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    phase: Phase,
    paused: bool,
    gravity: Gravity,
    rng: SimpleRng,
    transitions: Transitions,
    seed: u32,
}

impl GameSession {
    /// Create a session in the reset state.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            board: Board::new(),
            layers: LayerMaps::new(),
            active: None,
            next: None,
            phase: Phase::Idle,
            paused: false,
            gravity: Gravity::new(config.gravity_ms),
            rng: SimpleRng::new(config.seed),
            transitions: Transitions::new(),
            seed: config.seed,
        }
    }

    /// Shorthand for a default-gravity session with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SessionConfig {
            seed,
            ..SessionConfig::default()
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layers(&self) -> &LayerMaps {
        &self.layers
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Pending transitions, oldest first.
    pub fn transitions(&self) -> &[Transition] {
        self.transitions.as_slice()
    }

    /// Take all pending transitions.
    pub fn drain_transitions(&mut self) -> arrayvec::Drain<'_, Transition, TRANSITION_CAPACITY> {
        self.transitions.drain()
    }

    /// Transitions discarded because nobody drained them in time.
    pub fn dropped_transitions(&self) -> u32 {
        self.transitions.dropped()
    }

    /// True when movement, rotation and drops take effect.
    #[inline]
    fn playable(&self) -> bool {
        self.phase == Phase::Active && !self.paused
    }

    /// Spawn the first piece and arm gravity. Only valid from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        if !self.spawn_next() {
            return false;
        }
        self.paused = false;
        self.gravity.arm();
        true
    }

    /// Promote the look-ahead to the active piece and draw a new look-ahead.
    ///
    /// The new piece starts in rotation 0, horizontally centred, at row 0. If
    /// the top row already holds a settled cell, or the spawn box overlaps
    /// one, the session ends instead, the look-ahead is left as it was and
    /// `false` is returned. Any active piece is replaced without merging, so
    /// only `start` and `lock` call this.
    pub(crate) fn spawn_next(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }

        let kind = match self.next {
            Some(kind) => kind,
            None => {
                let kind = self.rng.next_kind();
                self.next = Some(kind);
                kind
            }
        };

        let piece = ActivePiece::spawn(kind);
        if !self.board.is_row_empty(0) || piece.collides(&self.board, 0, 0, 0) {
            self.enter_game_over();
            return false;
        }

        let next = self.rng.next_kind();
        self.next = Some(next);
        self.active = Some(piece);
        self.phase = Phase::Active;
        self.transitions.push(Transition::Spawned { kind, next });
        true
    }

    /// Would the active piece collide if offset by `(dx, dy)` in `rotation`?
    ///
    /// With no active piece every placement counts as a collision.
    pub fn would_collide(&self, dx: i8, dy: i8, rotation: u8) -> bool {
        match self.active {
            Some(piece) => piece.collides(&self.board, dx, dy, rotation),
            None => true,
        }
    }

    /// Move the active piece one cell.
    ///
    /// A blocked downward move locks the piece instead. Returns true only when
    /// the piece actually moved.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let (dx, dy) = direction.offset();
        if self.would_collide(dx, dy, piece.rotation) {
            if direction == Direction::Down {
                self.lock();
            }
            return false;
        }

        self.active = Some(piece.translated(dx, dy));
        self.transitions.push(Transition::Moved);
        true
    }

    /// Advance to the next rotation state in place. No kicks: any overlap
    /// rejects the rotation.
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let next_rotation = piece.shape().next_rotation(piece.rotation);
        if self.would_collide(0, 0, next_rotation) {
            return false;
        }

        self.active = Some(ActivePiece {
            rotation: next_rotation,
            ..piece
        });
        self.transitions.push(Transition::Moved);
        true
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Intermediate rows produce no `Moved` transitions.
    pub fn drop_piece(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        while !piece.collides(&self.board, 0, 1, piece.rotation) {
            piece = piece.translated(0, 1);
        }
        self.active = Some(piece);
        self.lock();
        true
    }

    /// Merge the active piece, clear full rows, then spawn or end the game.
    fn lock(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let shape = piece.shape();
        let masks = piece.masks();
        self.board.merge(masks, shape.width, piece.x, piece.y);
        self.layers
            .merge(piece.kind, masks, shape.width, piece.x, piece.y);
        self.transitions.push(Transition::Merged {
            kind: piece.kind,
            y: piece.y,
            height: shape.height,
        });

        let cleared = self.board.full_rows();
        if !cleared.is_empty() {
            self.board.remove_rows(&cleared);
            self.layers.remove_rows(&cleared);
            self.transitions.push(Transition::RowsCleared(cleared));
        }

        self.spawn_next();
    }

    fn enter_game_over(&mut self) {
        self.active = None;
        self.phase = Phase::GameOver;
        self.gravity.cancel();
        self.transitions.push(Transition::GameOver);
    }

    /// Kind of the settled cell at (x, y), if any.
    pub fn cell_kind_at(&self, x: i8, y: i8) -> Cell {
        self.layers.kind_at(x, y)
    }

    /// Pause: gate input and cancel gravity in one step.
    pub fn pause(&mut self) -> bool {
        if self.paused || self.phase != Phase::Active {
            return false;
        }
        self.paused = true;
        self.gravity.cancel();
        true
    }

    /// Resume: lift the gate and re-arm gravity. The first tick comes one full
    /// interval later.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        if self.phase == Phase::Active {
            self.gravity.arm();
        }
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Back to the initial state: empty board and layers, no active or next
    /// piece, gravity cancelled. The RNG keeps its position.
    pub fn reset(&mut self) {
        self.board.clear();
        self.layers.clear();
        self.active = None;
        self.next = None;
        self.phase = Phase::Idle;
        self.paused = false;
        self.gravity.cancel();
        self.transitions.clear();
    }

    /// `reset` followed by `start`.
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    /// Feed elapsed time to gravity and apply every due down move.
    ///
    /// Returns the number of gravity steps applied. Stops early if a step
    /// ends the game.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if !self.playable() {
            return 0;
        }
        let mut steps = 0;
        let mut due = self.gravity.advance(elapsed_ms);
        while due {
            self.move_piece(Direction::Down);
            steps += 1;
            due = self.gravity.poll();
        }
        steps
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left),
            GameAction::MoveRight => self.move_piece(Direction::Right),
            GameAction::MoveDown => self.move_piece(Direction::Down),
            GameAction::Rotate => self.rotate(),
            GameAction::Drop => self.drop_piece(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.restart(),
        }
    }

    /// Settle a cell outside normal play (puzzle setups, test fixtures).
    ///
    /// Writes both the board and the kind's layer. Full rows created this way
    /// are cleared by the next lock.
    pub fn preset_cell(&mut self, x: i8, y: i8, kind: PieceKind) -> bool {
        if !self.board.fill(x, y) {
            return false;
        }
        self.layers.fill(kind, x, y)
    }

    /// Override the look-ahead (replays, puzzle setups).
    pub fn set_next_kind(&mut self, kind: PieceKind) {
        self.next = Some(kind);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.layers.kind_at(x as i8, y as i8);
            }
        }
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.phase = self.phase;
        out.paused = self.paused;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
