//! Layer maps - which kind each settled cell came from
//!
//! One board-shaped register stack per kind. Collision never looks at these;
//! they exist so presentation can colour settled cells.

use crate::board::Board;
use crate::shapes::ShapeRow;
use crate::types::{Cell, PieceKind, PIECE_KIND_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerMaps {
    layers: [Board; PIECE_KIND_COUNT],
}

impl LayerMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer of one kind.
    pub fn layer(&self, kind: PieceKind) -> &Board {
        &self.layers[kind.index()]
    }

    /// Record a locked bounding box under its kind.
    pub fn merge(&mut self, kind: PieceKind, masks: &[ShapeRow], box_width: u8, x: i8, y: i8) {
        self.layers[kind.index()].merge(masks, box_width, x, y);
    }

    /// Mark one settled cell as belonging to `kind`.
    pub fn fill(&mut self, kind: PieceKind, x: i8, y: i8) -> bool {
        self.layers[kind.index()].fill(x, y)
    }

    /// Apply the same clear-set the board applied.
    pub fn remove_rows(&mut self, cleared: &[u8]) {
        for layer in &mut self.layers {
            layer.remove_rows(cleared);
        }
    }

    /// Kind owning (x, y), or `None` if no layer has it.
    pub fn kind_at(&self, x: i8, y: i8) -> Cell {
        self.layers
            .iter()
            .position(|layer| layer.is_occupied(x, y))
            .map(|i| PieceKind::ALL[i])
    }

    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }
}
