//! Board module - bit-packed playfield
//!
//! Every row is a `u16` register. The `BOARD_WIDTH` playable bits sit between
//! permanently-set guard bits:
//!
//! ```text
//! bit: 15 14 13 12 11 | 10  9  8  7  6  5  4  3  2  1 | 0
//!       1  1  1  1  1 | x0 x1 x2 x3 x4 x5 x6 x7 x8 x9 | 1
//! ```
//!
//! A piece row shifted past either edge lands on a guard bit, so a single AND
//! against the row register answers both "out of bounds" and "occupied".
//! Below the last row sits an implicit all-ones floor, and any row index
//! outside the board reads as all ones too.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).

use arrayvec::ArrayVec;

use crate::shapes::ShapeRow;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// One row register.
pub type RowBits = u16;

const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Guard bits to the right of column `BOARD_WIDTH - 1`.
pub const RIGHT_GUARD_BITS: u32 = 1;

/// Guard bits to the left of column 0.
pub const LEFT_GUARD_BITS: u32 = RowBits::BITS - BOARD_WIDTH as u32 - RIGHT_GUARD_BITS;

const _: () = assert!(LEFT_GUARD_BITS >= 1, "board too wide for its row register");

/// Bits of the playable columns.
pub const PLAYABLE_MASK: RowBits = (((1u32 << BOARD_WIDTH) - 1) << RIGHT_GUARD_BITS) as RowBits;

/// A row with every playable cell empty (guard bits only).
pub const EMPTY_ROW: RowBits = !PLAYABLE_MASK;

/// A completed row; also the value of the floor and of every off-board row.
pub const FULL_ROW: RowBits = RowBits::MAX;

/// Row indices removed by a line clear, top to bottom.
pub type ClearedRows = ArrayVec<u8, HEIGHT>;

/// The game board - `BOARD_HEIGHT` guarded row registers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [RowBits; HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; HEIGHT],
        }
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Register bit of a playable column.
    #[inline(always)]
    pub fn column_bit(x: u8) -> RowBits {
        debug_assert!(x < BOARD_WIDTH);
        1 << (RIGHT_GUARD_BITS + (BOARD_WIDTH - 1 - x) as u32)
    }

    /// Raw register of row `y`; the floor and everything else off the board
    /// read as [`FULL_ROW`].
    #[inline(always)]
    pub fn row_at(&self, y: i32) -> RowBits {
        if y < 0 || y >= HEIGHT as i32 {
            return FULL_ROW;
        }
        self.rows[y as usize]
    }

    /// All playable row registers, top to bottom.
    pub fn rows(&self) -> &[RowBits; HEIGHT] {
        &self.rows
    }

    /// Check if (x, y) is a settled cell. Off-board positions are not.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        self.rows[y as usize] & Self::column_bit(x as u8) != 0
    }

    /// Check if a piece cell may not go to (x, y): off-board or occupied.
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 {
            return true;
        }
        self.row_at(y as i32) & Self::column_bit(x as u8) != 0
    }

    /// Settle a single cell. Returns false if (x, y) is off the board.
    pub fn fill(&mut self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        self.rows[y as usize] |= Self::column_bit(x as u8);
        true
    }

    /// Empty a single cell. Returns false if (x, y) is off the board.
    pub fn clear_cell(&mut self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        self.rows[y as usize] &= !Self::column_bit(x as u8);
        true
    }

    /// Check if a row is completely filled
    #[inline]
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.rows[y] == FULL_ROW
    }

    /// Check if a row has no settled cells
    #[inline]
    pub fn is_row_empty(&self, y: usize) -> bool {
        y < HEIGHT && self.rows[y] == EMPTY_ROW
    }

    /// Number of settled cells in the whole board.
    pub fn filled_cells(&self) -> u32 {
        self.rows
            .iter()
            .map(|&r| (r & PLAYABLE_MASK).count_ones())
            .sum()
    }

    /// Shift one bounding-box row mask into register alignment.
    ///
    /// Bounding-box column `c` of a box whose left edge is at board column `x`
    /// lands on board column `x + c`. Returns `None` when an occupied bit would
    /// fall off the register entirely, which callers treat as a collision.
    #[inline(always)]
    pub fn align(mask: ShapeRow, box_width: u8, x: i8) -> Option<RowBits> {
        if mask == 0 {
            return Some(0);
        }
        let shift = RIGHT_GUARD_BITS as i32 + BOARD_WIDTH as i32 - box_width as i32 - x as i32;
        if shift >= 0 {
            if shift >= RowBits::BITS as i32 {
                return None;
            }
            let wide = (mask as u32) << shift;
            if wide > RowBits::MAX as u32 {
                return None;
            }
            Some(wide as RowBits)
        } else {
            let drop = -shift;
            if drop >= RowBits::BITS as i32 || mask & ((1 << drop) - 1) != 0 {
                return None;
            }
            Some(mask >> drop)
        }
    }

    /// Collision test for a bounding box at (x, y).
    ///
    /// True if any occupied cell of `masks` overlaps a settled cell, a guard
    /// bit, the floor, or lies off the register.
    #[inline]
    pub fn collides(&self, masks: &[ShapeRow], box_width: u8, x: i8, y: i8) -> bool {
        masks.iter().enumerate().any(|(i, &mask)| {
            if mask == 0 {
                return false;
            }
            match Self::align(mask, box_width, x) {
                Some(bits) => bits & self.row_at(y as i32 + i as i32) != 0,
                None => true,
            }
        })
    }

    /// OR a placed bounding box into the board.
    ///
    /// Callers check [`Board::collides`] first; bits outside the playable
    /// columns are never written.
    pub fn merge(&mut self, masks: &[ShapeRow], box_width: u8, x: i8, y: i8) {
        for (i, &mask) in masks.iter().enumerate() {
            let row = y as i32 + i as i32;
            if mask == 0 || row < 0 || row >= HEIGHT as i32 {
                continue;
            }
            if let Some(bits) = Self::align(mask, box_width, x) {
                self.rows[row as usize] |= bits & PLAYABLE_MASK;
            }
        }
    }

    /// Indices of all full rows, top to bottom.
    pub fn full_rows(&self) -> ClearedRows {
        let mut out = ClearedRows::new();
        for (y, &row) in self.rows.iter().enumerate() {
            if row == FULL_ROW {
                out.push(y as u8);
            }
        }
        out
    }

    /// Remove `cleared` rows and prepend as many empty rows.
    ///
    /// `cleared` must be sorted top to bottom. Surviving rows keep their
    /// relative order. Uses a bottom-up two-pointer pass with no allocation.
    pub fn remove_rows(&mut self, cleared: &[u8]) {
        if cleared.is_empty() {
            return;
        }
        let mut pending = cleared.iter().rev().peekable();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if pending.peek().is_some_and(|&&c| c as usize == read_y) {
                pending.next();
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.rows[write_y] = self.rows[read_y];
            }
        }

        self.rows[..write_y].fill(EMPTY_ROW);
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.rows.fill(EMPTY_ROW);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
