//! Active piece - kind, rotation index and bounding-box position

use crate::board::Board;
use crate::shapes::{shape, Shape, ShapeRow};
use crate::types::{PieceKind, BOARD_WIDTH};

/// The falling piece.
///
/// `(x, y)` is the top-left corner of the bounding box on the board; `x` may
/// go negative (or past the right edge) as long as the occupied cells do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a kind at its spawn position: rotation 0, horizontally centred,
    /// top row.
    pub fn spawn(kind: PieceKind) -> Self {
        let width = shape(kind).width;
        Self {
            kind,
            rotation: 0,
            x: ((BOARD_WIDTH - width) / 2) as i8,
            y: 0,
        }
    }

    #[inline]
    pub fn shape(&self) -> &'static Shape {
        shape(self.kind)
    }

    /// Row masks of the current rotation.
    #[inline]
    pub fn masks(&self) -> &'static [ShapeRow] {
        self.shape().rotation(self.rotation)
    }

    /// Collision test for this piece offset by `(dx, dy)` in `rotation`.
    #[inline]
    pub fn collides(&self, board: &Board, dx: i8, dy: i8, rotation: u8) -> bool {
        let shape = self.shape();
        board.collides(
            shape.rotation(rotation),
            shape.width,
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
        )
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Absolute board cells of the current rotation.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape()
            .cells(self.rotation)
            .map(move |(c, r)| (self.x + c as i8, self.y + r as i8))
    }
}
