//! Breadth-first flood fill over passable cells.

use std::collections::{BTreeSet, VecDeque};

use maze_sculptor_core::{cardinal_neighbors, GridView, Position};

/// Collects every cell connected to `start` through non-wall cells.
///
/// The result includes `start` itself. It is empty only when `start` lies
/// outside the grid or is a wall.
#[must_use]
pub fn reachable_from(grid: GridView<'_>, start: Position) -> BTreeSet<Position> {
    let mut reachable = BTreeSet::new();

    if !grid.is_passable(start) {
        return reachable;
    }
    let Some(start_index) = grid.index(start) else {
        return reachable;
    };

    let mut visited = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();
    visited[start_index] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let _ = reachable.insert(cell);

        for neighbor in cardinal_neighbors(cell, grid.side()) {
            if !grid.is_passable(neighbor) {
                continue;
            }

            let Some(index) = grid.index(neighbor) else {
                continue;
            };

            if visited[index] {
                continue;
            }

            visited[index] = true;
            queue.push_back(neighbor);
        }
    }

    reachable
}
