//! Tetromino wall pieces and their distinct orientations.

use std::collections::BTreeSet;

use maze_sculptor_core::{CellState, Position};
use maze_sculptor_world::GridModel;

/// Number of cells covered by every piece.
pub(crate) const PIECE_CELLS: usize = 4;

type Offsets = [(i32, i32); PIECE_CELLS];

// Offsets are (dx, dy) from the piece origin.
const BASE_SHAPES: [Offsets; 7] = [
    // I
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    // O
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    // T
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    // S
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    // Z
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    // J
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    // L
    [(2, 0), (0, 1), (1, 1), (2, 1)],
];

/// One rotation of a piece, normalised so its smallest offsets are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Orientation {
    offsets: Offsets,
}

impl Orientation {
    fn normalised(mut offsets: Offsets) -> Self {
        let min_x = offsets.iter().map(|(dx, _)| *dx).min().unwrap_or(0);
        let min_y = offsets.iter().map(|(_, dy)| *dy).min().unwrap_or(0);
        for (dx, dy) in &mut offsets {
            *dx -= min_x;
            *dy -= min_y;
        }
        offsets.sort_unstable();
        Self { offsets }
    }

    fn rotated(&self) -> Self {
        let mut offsets = self.offsets;
        for offset in &mut offsets {
            *offset = (-offset.1, offset.0);
        }
        Self::normalised(offsets)
    }

    /// Cells covered when the piece is anchored at `origin`, provided every
    /// one of them is an empty cell of `grid` outside `unbuildable`.
    pub(crate) fn fit(
        &self,
        grid: &GridModel,
        unbuildable: &BTreeSet<Position>,
        origin: Position,
    ) -> Option<[Position; PIECE_CELLS]> {
        let mut cells = [origin; PIECE_CELLS];
        for (cell, (dx, dy)) in cells.iter_mut().zip(self.offsets) {
            let x = origin.x().checked_add_signed(dx)?;
            let y = origin.y().checked_add_signed(dy)?;
            let candidate = Position::new(x, y);
            let buildable = grid.cell_at(candidate).ok()? == CellState::Empty
                && !unbuildable.contains(&candidate);
            if !buildable {
                return None;
            }
            *cell = candidate;
        }
        Some(cells)
    }
}

/// Distinct orientations of every tetromino, grouped per piece.
pub(crate) fn catalogue() -> Vec<Vec<Orientation>> {
    BASE_SHAPES
        .iter()
        .map(|shape| {
            let mut orientations: Vec<Orientation> = Vec::with_capacity(4);
            let mut current = Orientation::normalised(*shape);
            for _ in 0..4 {
                if !orientations.contains(&current) {
                    orientations.push(current);
                }
                current = current.rotated();
            }
            orientations
        })
        .collect()
}
