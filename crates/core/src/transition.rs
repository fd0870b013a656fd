//! Transitions reported to presentation
//!
//! Operations push what happened into a fixed-capacity buffer; the driver
//! drains it once per frame. Consecutive `Moved` entries collapse into one,
//! and when the buffer is full the oldest entry is discarded.

use arrayvec::ArrayVec;

use crate::board::ClearedRows;
use crate::types::PieceKind;

pub const TRANSITION_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A new active piece entered at its spawn position.
    Spawned { kind: PieceKind, next: PieceKind },
    /// The active piece moved or rotated.
    Moved,
    /// The active piece was merged into the board; `y..y + height` are the
    /// board rows its bounding box covered.
    Merged { kind: PieceKind, y: i8, height: u8 },
    /// Full rows were removed, top to bottom (pre-clear indices).
    RowsCleared(ClearedRows),
    /// No further piece can enter.
    GameOver,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Spawned { .. } => "spawned",
            Transition::Moved => "moved",
            Transition::Merged { .. } => "merged",
            Transition::RowsCleared(_) => "rows_cleared",
            Transition::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transitions {
    buf: ArrayVec<Transition, TRANSITION_CAPACITY>,
    dropped: u32,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, t: Transition) {
        if t == Transition::Moved && self.buf.last() == Some(&Transition::Moved) {
            return;
        }
        if self.buf.is_full() {
            self.buf.remove(0);
            self.dropped = self.dropped.wrapping_add(1);
        }
        self.buf.push(t);
    }

    pub fn drain(&mut self) -> arrayvec::Drain<'_, Transition, TRANSITION_CAPACITY> {
        self.buf.drain(..)
    }

    pub fn as_slice(&self) -> &[Transition] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Entries discarded because the buffer was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_coalesces() {
        let mut t = Transitions::new();
        t.push(Transition::Moved);
        t.push(Transition::Moved);
        assert_eq!(t.len(), 1);
        t.push(Transition::GameOver);
        t.push(Transition::Moved);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_full_buffer_drops_oldest() {
        let mut t = Transitions::new();
        t.push(Transition::GameOver);
        for _ in 0..TRANSITION_CAPACITY {
            t.push(Transition::Merged {
                kind: PieceKind::O,
                y: 0,
                height: 2,
            });
        }
        assert_eq!(t.len(), TRANSITION_CAPACITY);
        assert_eq!(t.dropped(), 1);
        assert_ne!(t.as_slice()[0], Transition::GameOver);
    }

    #[test]
    fn test_drain_empties() {
        let mut t = Transitions::new();
        t.push(Transition::Moved);
        let drained: Vec<_> = t.drain().collect();
        assert_eq!(drained, vec![Transition::Moved]);
        assert!(t.is_empty());
    }
}
