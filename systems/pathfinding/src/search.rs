//! Single-source, single-target A* search over the 4-connected grid.

use std::{cmp::Reverse, collections::BinaryHeap};

use maze_sculptor_core::{cardinal_neighbors, GridView, Path, Position};
use tracing::trace;

/// Open-set entry ordered by f-score, then by the order in which the node
/// first entered the open set.
type OpenEntry = Reverse<(u32, u64, usize)>;

/// Finds one shortest path from `start` to `end`.
///
/// Returns `None` when either endpoint is out of bounds or a wall, or when
/// walls separate the two cells.
#[must_use]
pub fn find_path(grid: GridView<'_>, start: Position, end: Position) -> Option<Path> {
    ShortestPathSearch::default().find(grid, start, end)
}

/// Reusable A* workspace.
///
/// Per-node state lives in flat arrays indexed by the row-major cell offset.
/// Reusing one workspace across many searches on the same grid avoids
/// reallocating those arrays for every spawn.
#[derive(Debug, Default)]
pub struct ShortestPathSearch {
    g_scores: Vec<u32>,
    came_from: Vec<Option<usize>>,
    closed: Vec<bool>,
    sequence: Vec<Option<u64>>,
    open: BinaryHeap<OpenEntry>,
}

impl ShortestPathSearch {
    /// Creates a new search workspace with empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds one shortest path from `start` to `end`.
    ///
    /// Neighbours are expanded up, right, down, left. Among open nodes with
    /// equal f-score the node that entered the open set first is expanded
    /// first, and a node keeps its original entry order when its g-score
    /// improves. Repeated searches on an unchanged grid therefore return the
    /// same path.
    pub fn find(&mut self, grid: GridView<'_>, start: Position, end: Position) -> Option<Path> {
        if !grid.is_passable(start) || !grid.is_passable(end) {
            return None;
        }

        let start_index = grid.index(start)?;
        let end_index = grid.index(end)?;
        self.reset(grid.cell_count());

        self.g_scores[start_index] = 0;
        self.sequence[start_index] = Some(0);
        self.open
            .push(Reverse((start.manhattan_distance(end), 0, start_index)));
        let mut next_sequence = 1_u64;

        while let Some(Reverse((_, _, current))) = self.open.pop() {
            if self.closed[current] {
                continue;
            }

            if current == end_index {
                let path = self.reconstruct(grid, current)?;
                trace!(%start, %end, steps = path.steps(), "path found");
                return Some(path);
            }

            self.closed[current] = true;
            let cell = grid.position(current)?;
            let tentative = self.g_scores[current].saturating_add(1);

            for neighbor in cardinal_neighbors(cell, grid.side()) {
                if !grid.is_passable(neighbor) {
                    continue;
                }

                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };

                if self.closed[neighbor_index] {
                    continue;
                }

                let order = match self.sequence[neighbor_index] {
                    None => {
                        let order = next_sequence;
                        next_sequence += 1;
                        self.sequence[neighbor_index] = Some(order);
                        order
                    }
                    Some(order) => {
                        if tentative >= self.g_scores[neighbor_index] {
                            continue;
                        }
                        order
                    }
                };

                self.g_scores[neighbor_index] = tentative;
                self.came_from[neighbor_index] = Some(current);
                let f_score = tentative.saturating_add(neighbor.manhattan_distance(end));
                self.open.push(Reverse((f_score, order, neighbor_index)));
            }
        }

        trace!(%start, %end, "no path");
        None
    }

    fn reset(&mut self, cell_count: usize) {
        self.g_scores.clear();
        self.g_scores.resize(cell_count, u32::MAX);
        self.came_from.clear();
        self.came_from.resize(cell_count, None);
        self.closed.clear();
        self.closed.resize(cell_count, false);
        self.sequence.clear();
        self.sequence.resize(cell_count, None);
        self.open.clear();
    }

    fn reconstruct(&self, grid: GridView<'_>, end_index: usize) -> Option<Path> {
        let mut cells = vec![grid.position(end_index)?];
        let mut current = end_index;

        while let Some(previous) = self.came_from[current] {
            cells.push(grid.position(previous)?);
            current = previous;
        }

        cells.reverse();
        Some(Path::from_cells(cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_sculptor_core::CellState;

    fn open_grid(side: u32) -> Vec<CellState> {
        vec![CellState::Empty; (side * side) as usize]
    }

    fn coords(path: &Path) -> Vec<(u32, u32)> {
        path.cells().iter().map(|cell| (cell.x(), cell.y())).collect()
    }

    #[test]
    fn open_grid_path_matches_manhattan_distance() {
        let cells = open_grid(5);
        let grid = GridView::new(&cells, 5);

        let path = find_path(grid, Position::new(0, 0), Position::new(4, 4)).expect("reachable");

        assert_eq!(path.len(), 9);
        assert_eq!(path.steps(), 8);
        assert_eq!(path.source(), Some(Position::new(0, 0)));
        assert_eq!(path.target(), Some(Position::new(4, 4)));
    }

    #[test]
    fn equal_scores_expand_in_insertion_order() {
        let cells = open_grid(3);
        let grid = GridView::new(&cells, 3);

        let path = find_path(grid, Position::new(0, 0), Position::new(2, 2)).expect("reachable");

        assert_eq!(coords(&path), vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn start_equal_to_end_yields_single_cell_path() {
        let cells = open_grid(2);
        let grid = GridView::new(&cells, 2);

        let path = find_path(grid, Position::new(1, 1), Position::new(1, 1)).expect("reachable");

        assert_eq!(path.cells(), &[Position::new(1, 1)]);
        assert_eq!(path.steps(), 0);
    }

    #[test]
    fn walled_or_out_of_bounds_endpoints_are_unreachable() {
        let mut cells = open_grid(3);
        cells[4] = CellState::Wall;
        let grid = GridView::new(&cells, 3);

        assert!(find_path(grid, Position::new(1, 1), Position::new(0, 0)).is_none());
        assert!(find_path(grid, Position::new(0, 0), Position::new(1, 1)).is_none());
        assert!(find_path(grid, Position::new(0, 0), Position::new(3, 0)).is_none());
        assert!(find_path(grid, Position::new(9, 9), Position::new(0, 0)).is_none());
    }

    #[test]
    fn detours_around_walls() {
        // . # .
        // . # .
        // . . .
        let mut cells = open_grid(3);
        cells[1] = CellState::Wall;
        cells[4] = CellState::Wall;
        let grid = GridView::new(&cells, 3);

        let path = find_path(grid, Position::new(0, 0), Position::new(2, 0)).expect("reachable");

        assert_eq!(
            coords(&path),
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)]
        );
    }

    #[test]
    fn sealed_target_is_unreachable() {
        // . # .
        // # # .
        // . . .
        let mut cells = open_grid(3);
        cells[1] = CellState::Wall;
        cells[3] = CellState::Wall;
        cells[4] = CellState::Wall;
        let grid = GridView::new(&cells, 3);

        assert!(find_path(grid, Position::new(2, 2), Position::new(0, 0)).is_none());
    }

    #[test]
    fn spawn_and_nucleus_cells_are_passable() {
        let mut cells = open_grid(3);
        cells[0] = CellState::Spawn;
        cells[1] = CellState::Spawn;
        cells[2] = CellState::Nucleus;
        let grid = GridView::new(&cells, 3);

        let path = find_path(grid, Position::new(0, 0), Position::new(2, 0)).expect("reachable");

        assert_eq!(path.steps(), 2);
    }

    #[test]
    fn workspace_reuse_matches_fresh_searches() {
        let mut cells = open_grid(6);
        for y in 0..5 {
            cells[y * 6 + 3] = CellState::Wall;
        }
        let grid = GridView::new(&cells, 6);
        let mut search = ShortestPathSearch::new();
        let targets = [Position::new(5, 0), Position::new(0, 5), Position::new(4, 4)];

        for target in targets {
            let reused = search.find(grid, Position::new(0, 0), target);
            let fresh = find_path(grid, Position::new(0, 0), target);
            assert_eq!(reused, fresh);
        }
    }
}
