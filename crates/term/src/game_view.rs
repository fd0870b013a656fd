//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board placement inside the viewport, in terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares the cell on common terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the bordered board lands for a given viewport.
    pub fn board_frame(&self, viewport: Viewport) -> BoardFrame {
        let width = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let height = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(width) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(height) / 2,
            AnchorY::Top => 0,
        };
        BoardFrame {
            x,
            y,
            width,
            height,
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// Allocation-free once `fb` has reached the viewport size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let frame = self.board_frame(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.width - 2,
            frame.height - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, frame, border);

        // Settled cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_board_cell(fb, frame, x as u16, y as u16, *kind),
                    None => self.fill_cell(
                        fb,
                        frame,
                        x as u16,
                        y as u16,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        // Active piece; cells above the board are not drawn.
        if let Some(active) = snap.active {
            for (cx, cy) in shape(active.kind).cells(active.rotation) {
                let x = active.x as i16 + cx as i16;
                let y = active.y as i16 + cy as i16;
                if (0..BOARD_WIDTH as i16).contains(&x) && (0..BOARD_HEIGHT as i16).contains(&y) {
                    self.draw_board_cell(fb, frame, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.phase == Phase::GameOver {
            draw_overlay_text(fb, frame, "GAME OVER");
        } else if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.phase == Phase::Idle {
            draw_overlay_text(fb, frame, "READY");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(kind_color(kind), PLAY_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: BoardFrame) {
        let panel_x = frame.x.saturating_add(frame.width).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            let preview = shape(kind);
            let style = CellStyle::new(kind_color(kind), PANEL_BG).bold();
            for (cx, cy) in preview.cells(0) {
                fb.fill_rect(
                    panel_x + (cx as u16) * self.cell_w,
                    y + (cy as u16) * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                    '█',
                    style,
                );
            }
            y = y.saturating_add(4 * self.cell_h + 1);
        } else {
            fb.put_str(panel_x, y, "-", value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "SEED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.seed, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, state_label(snap), value);
        y = y.saturating_add(2);

        let hint = value.dim();
        for line in ["←→↓ move", "↑ rotate", "space drop", "p pause", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }
}

pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn state_label(snap: &GameSnapshot) -> &'static str {
    match snap.phase {
        Phase::Idle => "ready",
        Phase::Active if snap.paused => "paused",
        Phase::Active => "playing",
        Phase::GameOver => "over",
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: BoardFrame, style: CellStyle) {
    let BoardFrame {
        x,
        y,
        width: w,
        height: h,
    } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: BoardFrame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.height / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.width.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;

    fn glyph_at(fb: &FrameBuffer, view: &GameView, viewport: Viewport, x: u16, y: u16) -> char {
        let frame = view.board_frame(viewport);
        fb.get(frame.x + 1 + x * 2, frame.y + 1 + y)
            .map(|g| g.ch)
            .unwrap_or('?')
    }

    #[test]
    fn settled_and_active_cells_are_drawn() {
        let view = GameView::default();
        let viewport = Viewport::new(60, 24);
        let mut snap = GameSnapshot::default();
        snap.phase = Phase::Active;
        snap.board[19][0] = Some(PieceKind::Z);
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            rotation: 0,
            x: 4,
            y: 0,
        });

        let fb = view.render(&snap, viewport);
        assert_eq!(glyph_at(&fb, &view, viewport, 0, 19), '█');
        assert_eq!(glyph_at(&fb, &view, viewport, 1, 19), '·');
        assert_eq!(glyph_at(&fb, &view, viewport, 4, 0), '█');
        assert_eq!(glyph_at(&fb, &view, viewport, 5, 1), '█');
        assert_eq!(glyph_at(&fb, &view, viewport, 6, 0), '·');
    }

    #[test]
    fn active_cells_outside_board_are_skipped() {
        let view = GameView::default();
        let viewport = Viewport::new(60, 24);
        let mut snap = GameSnapshot::default();
        snap.phase = Phase::Active;
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::I,
            rotation: 1,
            x: -1,
            y: 0,
        });
        // Column 0 of the box is off-board; column 1 lands on x=0.
        let fb = view.render(&snap, viewport);
        for y in 0..4 {
            assert_eq!(glyph_at(&fb, &view, viewport, 0, y), '█');
        }
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let snap = GameSnapshot::default();
        let fb = view.render(&snap, Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
