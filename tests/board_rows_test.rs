//! Board tests - guarded row registers, collision and compaction

use blockfall::core::board::{EMPTY_ROW, FULL_ROW, PLAYABLE_MASK};
use blockfall::core::{shape, Board};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_cells(), 0);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(!board.is_occupied(x, y), "cell ({}, {}) should be empty", x, y);
        }
    }
    assert!(board.rows().iter().all(|&r| r == EMPTY_ROW));
}

#[test]
fn test_guard_bits_surround_playable_columns() {
    assert_eq!(PLAYABLE_MASK.count_ones(), BOARD_WIDTH as u32);
    assert_eq!(EMPTY_ROW & PLAYABLE_MASK, 0);
    assert_eq!(EMPTY_ROW | PLAYABLE_MASK, FULL_ROW);

    // Column 0 is the highest playable bit, column 9 the lowest.
    assert_eq!(Board::column_bit(0), 1 << 10);
    assert_eq!(Board::column_bit(BOARD_WIDTH - 1), 1 << 1);
}

#[test]
fn test_outside_cells_are_blocked() {
    let board = Board::new();
    assert!(board.is_blocked(-1, 5));
    assert!(board.is_blocked(BOARD_WIDTH as i8, 5));
    assert!(board.is_blocked(3, BOARD_HEIGHT as i8));
    assert!(board.is_blocked(3, -1));
    assert!(!board.is_blocked(3, 5));

    assert_eq!(board.row_at(-1), FULL_ROW);
    assert_eq!(board.row_at(BOARD_HEIGHT as i32), FULL_ROW);
}

#[test]
fn test_fill_rejects_outside_cells() {
    let mut board = Board::new();
    assert!(board.fill(0, 0));
    assert!(board.fill(9, 19));
    assert!(!board.fill(-1, 0));
    assert!(!board.fill(10, 0));
    assert!(!board.fill(0, 20));
    assert_eq!(board.filled_cells(), 2);
}

#[test]
fn test_left_move_from_column_zero_hits_guard() {
    let board = Board::new();
    let o = shape(PieceKind::O);
    assert!(!board.collides(o.rotation(0), o.width, 0, 10));
    assert!(board.collides(o.rotation(0), o.width, -1, 10));
    assert!(!board.collides(o.rotation(0), o.width, 8, 10));
    assert!(board.collides(o.rotation(0), o.width, 9, 10));
}

#[test]
fn test_floor_collides() {
    let board = Board::new();
    let o = shape(PieceKind::O);
    assert!(!board.collides(o.rotation(0), o.width, 4, 18));
    assert!(board.collides(o.rotation(0), o.width, 4, 19));
}

#[test]
fn test_empty_mask_rows_never_collide() {
    let board = Board::new();
    let i = shape(PieceKind::I);
    // Horizontal I occupies only box row 1; rows 2-3 hang below the floor.
    assert!(!board.collides(i.rotation(0), i.width, 3, 18));
    assert!(board.collides(i.rotation(0), i.width, 3, 19));
}

#[test]
fn test_settled_cells_collide() {
    let mut board = Board::new();
    board.fill(5, 10);
    let t = shape(PieceKind::T);
    // T rotation 0: stem at box (1, 0), bar on box row 1.
    assert!(board.collides(t.rotation(0), t.width, 4, 10));
    assert!(board.collides(t.rotation(0), t.width, 3, 9));
    assert!(!board.collides(t.rotation(0), t.width, 3, 10));
}

#[test]
fn test_merge_then_full_row() {
    let mut board = Board::new();
    for x in 0..9 {
        board.fill(x, 19);
    }
    assert!(board.full_rows().is_empty());

    let i = shape(PieceKind::I);
    // Vertical I: occupied column is box column 1.
    board.merge(i.rotation(1), i.width, 8, 16);
    assert!(board.is_row_full(19));
    assert_eq!(board.full_rows().as_slice(), &[19]);
}

#[test]
fn test_remove_rows_keeps_order_and_adds_empty_top() {
    let mut board = Board::new();
    // Mark rows with distinct single cells.
    board.fill(0, 5);
    board.fill(1, 10);
    board.fill(2, 17);
    for y in [8u8, 12, 19] {
        for x in 0..10 {
            board.fill(x, y as i8);
        }
    }
    let full = board.full_rows();
    assert_eq!(full.as_slice(), &[8, 12, 19]);

    board.remove_rows(&full);

    assert_eq!(board.rows().len(), BOARD_HEIGHT as usize);
    assert!(board.full_rows().is_empty());
    assert!(board.is_occupied(0, 8));
    assert!(board.is_occupied(1, 12));
    assert!(board.is_occupied(2, 18));
    for y in 0..3 {
        assert!(board.is_row_empty(y));
    }
    assert_eq!(board.filled_cells(), 3);
}

#[test]
fn test_remove_all_rows() {
    let mut board = Board::new();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            board.fill(x, y);
        }
    }
    let full = board.full_rows();
    assert_eq!(full.len(), BOARD_HEIGHT as usize);
    board.remove_rows(&full);
    assert_eq!(board, Board::new());
}
