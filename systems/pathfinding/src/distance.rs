//! Reverse breadth-first distance field seeded from the nucleus.

use std::collections::VecDeque;

use maze_sculptor_core::{cardinal_neighbors, GridView, Position};

const UNREACHABLE: u32 = u32::MAX;

/// Dense step-count grid measuring every cell's distance to the nucleus.
///
/// The field mirrors the grid's dimensions and stores the reverse
/// breadth-first search results, so one rebuild answers the distance query
/// for every spawn at once. Walls and cells cut off from the nucleus report no
/// distance.
#[derive(Clone, Debug, Default)]
pub struct DistanceField {
    side: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Creates an empty field; call [`DistanceField::rebuild`] before querying.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the distances using a reverse breadth-first search.
    ///
    /// A missing, out-of-bounds, or walled nucleus leaves every cell
    /// unreachable.
    pub fn rebuild(&mut self, grid: GridView<'_>, nucleus: Option<Position>) {
        self.side = grid.side();
        self.distances.clear();
        self.distances.resize(grid.cell_count(), UNREACHABLE);

        let Some(nucleus) = nucleus.filter(|cell| grid.is_passable(*cell)) else {
            return;
        };
        let Some(nucleus_index) = grid.index(nucleus) else {
            return;
        };

        self.distances[nucleus_index] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(nucleus);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = grid.index(cell) else {
                continue;
            };
            let next_distance = self.distances[current_index].saturating_add(1);

            for neighbor in cardinal_neighbors(cell, grid.side()) {
                if !grid.is_passable(neighbor) {
                    continue;
                }

                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };

                if self.distances[neighbor_index] <= next_distance {
                    continue;
                }

                self.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    /// Side length of the grid the field was last built for.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Steps from `cell` to the nucleus, or `None` when the cell is outside the
    /// field, a wall, or cut off.
    #[must_use]
    pub fn distance(&self, cell: Position) -> Option<u32> {
        if cell.x() >= self.side || cell.y() >= self.side {
            return None;
        }

        let width = usize::try_from(self.side).ok()?;
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        let index = y.checked_mul(width)?.checked_add(x)?;
        self.distances
            .get(index)
            .copied()
            .filter(|distance| *distance != UNREACHABLE)
    }
}
