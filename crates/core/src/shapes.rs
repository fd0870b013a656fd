//! Shape catalog - bounding boxes and pre-rotated row masks for every kind
//!
//! Each rotation state is one mask per bounding-box row. Bit `w - 1 - c` of a
//! mask is bounding-box column `c`, so masks read left to right the way they
//! are drawn:
//!
//! ```text
//! T, rotation 0:  .x.  -> 0b010 = 2
//!                 xxx  -> 0b111 = 7
//!                 ...  -> 0b000 = 0
//! ```
//!
//! Rotation never recomputes geometry; it only advances an index into the
//! kind's fixed list of states.

use crate::types::PieceKind;

/// Row mask of one bounding-box row.
pub type ShapeRow = u16;

/// Static description of a piece kind.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    pub kind: PieceKind,
    /// Bounding-box width in cells.
    pub width: u8,
    /// Bounding-box height in cells (and the length of every rotation).
    pub height: u8,
    rotations: &'static [&'static [ShapeRow]],
}

impl Shape {
    /// Number of distinct rotation states (1, 2 or 4).
    #[inline]
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Row masks of one rotation state.
    ///
    /// The index wraps, so any `u8` names a valid state.
    #[inline]
    pub fn rotation(&self, index: u8) -> &'static [ShapeRow] {
        self.rotations[index as usize % self.rotations.len()]
    }

    /// Index of the state after `index`.
    #[inline]
    pub fn next_rotation(&self, index: u8) -> u8 {
        ((index as usize + 1) % self.rotations.len()) as u8
    }

    /// Occupied cells of a rotation as `(column, row)` inside the bounding box.
    pub fn cells(&self, index: u8) -> impl Iterator<Item = (u8, u8)> + '_ {
        let width = self.width;
        self.rotation(index)
            .iter()
            .enumerate()
            .flat_map(move |(row, &mask)| {
                (0..width)
                    .filter(move |&col| mask & (1 << (width - 1 - col)) != 0)
                    .map(move |col| (col, row as u8))
            })
    }
}

// .... .x..
// xxxx .x..
// .... .x..
// .... .x..
static I_SHAPE: Shape = Shape {
    kind: PieceKind::I,
    width: 4,
    height: 4,
    rotations: &[&[0, 15, 0, 0], &[4, 4, 4, 4]],
};

// xx
// xx
static O_SHAPE: Shape = Shape {
    kind: PieceKind::O,
    width: 2,
    height: 2,
    rotations: &[&[3, 3]],
};

// .x. .x. ... .x.
// xxx .xx xxx xx.
// ... .x. .x. .x.
static T_SHAPE: Shape = Shape {
    kind: PieceKind::T,
    width: 3,
    height: 3,
    rotations: &[&[2, 7, 0], &[2, 3, 2], &[0, 7, 2], &[2, 6, 2]],
};

// .xx .x.
// xx. .xx
// ... ..x
static S_SHAPE: Shape = Shape {
    kind: PieceKind::S,
    width: 3,
    height: 3,
    rotations: &[&[3, 6, 0], &[2, 3, 1]],
};

// xx. ..x
// .xx .xx
// ... .x.
static Z_SHAPE: Shape = Shape {
    kind: PieceKind::Z,
    width: 3,
    height: 3,
    rotations: &[&[6, 3, 0], &[1, 3, 2]],
};

// x.. .xx ... .x.
// xxx .x. xxx .x.
// ... .x. ..x xx.
static J_SHAPE: Shape = Shape {
    kind: PieceKind::J,
    width: 3,
    height: 3,
    rotations: &[&[4, 7, 0], &[3, 2, 2], &[0, 7, 1], &[2, 2, 6]],
};

// ..x .x. ... xx.
// xxx .x. xxx .x.
// ... .xx x.. .x.
static L_SHAPE: Shape = Shape {
    kind: PieceKind::L,
    width: 3,
    height: 3,
    rotations: &[&[1, 7, 0], &[2, 2, 3], &[0, 7, 4], &[6, 2, 2]],
};

/// Look up the shape of a kind.
#[inline]
pub fn shape(kind: PieceKind) -> &'static Shape {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::L => &L_SHAPE,
    }
}
