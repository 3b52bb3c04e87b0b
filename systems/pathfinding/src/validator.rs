//! Guard that refuses wall placements which would strand every spawn.

use maze_sculptor_core::{CellState, Position};
use maze_sculptor_world::GridModel;
use tracing::debug;

use crate::search::ShortestPathSearch;

/// Decides whether walling `candidate` would leave no spawn connected to the
/// nucleus.
///
/// Rules, in order:
/// 1. without a nucleus or spawns nothing can be blocked, so `false`;
/// 2. a candidate that is not currently empty (or lies outside the grid) is
///    not a wall placement, so `false`;
/// 3. a candidate on the nucleus or on a spawn is always refused, so `true`;
/// 4. otherwise the wall is tried on a copy of the grid and the placement is
///    refused only if no spawn reaches the nucleus afterwards.
///
/// A placement that strands some spawns while another one stays connected is
/// allowed.
#[must_use]
pub fn would_block_all_paths(
    grid: &GridModel,
    spawns: &[Position],
    nucleus: Option<Position>,
    candidate: Position,
) -> bool {
    let Some(nucleus) = nucleus else {
        return false;
    };
    if spawns.is_empty() {
        return false;
    }

    if grid.cell_at(candidate) != Ok(CellState::Empty) {
        return false;
    }

    if candidate == nucleus || spawns.contains(&candidate) {
        return true;
    }

    let mut hypothetical = grid.clone();
    if hypothetical.set_cell(candidate, CellState::Wall).is_err() {
        return false;
    }

    let view = hypothetical.view();
    let mut search = ShortestPathSearch::new();
    let blocked = !spawns
        .iter()
        .any(|spawn| search.find(view, *spawn, nucleus).is_some());

    if blocked {
        debug!(%candidate, "wall would block every spawn");
    }
    blocked
}

/// [`would_block_all_paths`] using the grid's own spawns and nucleus.
#[must_use]
pub fn would_block(grid: &GridModel, candidate: Position) -> bool {
    would_block_all_paths(grid, grid.spawns(), grid.nucleus(), candidate)
}
