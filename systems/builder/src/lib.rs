#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure editor system responsible for emitting grid edit commands.

use std::{collections::BTreeSet, fmt};

use maze_sculptor_core::{CellState, Command, Position};
use maze_sculptor_system_pathfinding::would_block;
use maze_sculptor_world::GridModel;
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

/// Which kind of cell a click places or removes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Clicks toggle walls; dragging paints or erases walls.
    #[default]
    Wall,
    /// Clicks toggle spawns.
    Spawn,
    /// Clicks place or remove the nucleus.
    Nucleus,
}

/// Input distilled from adapter-provided pointer and keyboard data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Switches the active edit mode.
    SetMode {
        /// Mode to activate.
        mode: EditMode,
    },
    /// Primary click on a cell.
    Click {
        /// Cell under the cursor.
        cell: Position,
    },
    /// Erase click that resets a cell regardless of mode.
    Erase {
        /// Cell under the cursor.
        cell: Position,
    },
    /// The cursor moved over a cell while the primary button is held.
    DragOver {
        /// Cell under the cursor.
        cell: Position,
    },
    /// The primary button was released.
    DragEnd,
}

/// Feedback for edits the builder refused to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderWarning {
    /// Walling the cell would disconnect every spawn from the nucleus.
    WouldBlockAllPaths {
        /// Cell the player tried to wall.
        cell: Position,
    },
}

impl fmt::Display for BuilderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WouldBlockAllPaths { .. } => write!(f, "Cannot block all paths to nucleus!"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragIntent {
    Place,
    Remove,
}

/// Editor system that translates actions into grid commands.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    mode: EditMode,
    drag: Option<DragIntent>,
}

impl Builder {
    /// Creates a new builder in wall mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: EditMode::Wall,
            drag: None,
        }
    }

    /// Currently active edit mode.
    #[must_use]
    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    /// Consumes one action against the current grid and emits commands.
    ///
    /// Wall placements are checked with the placement validator first; a
    /// refused click pushes a warning instead of a command, while a refused
    /// drag step is skipped silently.
    pub fn handle(
        &mut self,
        grid: &GridModel,
        action: EditAction,
        out: &mut Vec<Command>,
        warnings: &mut Vec<BuilderWarning>,
    ) {
        match action {
            EditAction::SetMode { mode } => {
                self.mode = mode;
                self.drag = None;
            }
            EditAction::Click { cell } => self.click(grid, cell, out, warnings),
            EditAction::Erase { cell } => {
                if grid.is_in_bounds(cell) {
                    out.push(Command::EraseCell { position: cell });
                }
            }
            EditAction::DragOver { cell } => self.drag_over(grid, cell, out),
            EditAction::DragEnd => self.drag = None,
        }
    }

    fn click(
        &self,
        grid: &GridModel,
        cell: Position,
        out: &mut Vec<Command>,
        warnings: &mut Vec<BuilderWarning>,
    ) {
        let Ok(current) = grid.cell_at(cell) else {
            return;
        };

        let state = match (self.mode, current) {
            (EditMode::Wall, CellState::Empty) => {
                if would_block(grid, cell) {
                    debug!(%cell, "wall placement refused");
                    warnings.push(BuilderWarning::WouldBlockAllPaths { cell });
                    return;
                }
                CellState::Wall
            }
            (EditMode::Spawn, CellState::Empty) => CellState::Spawn,
            (EditMode::Nucleus, CellState::Empty) => CellState::Nucleus,
            (EditMode::Wall, CellState::Wall)
            | (EditMode::Spawn, CellState::Spawn)
            | (EditMode::Nucleus, CellState::Nucleus) => CellState::Empty,
            _ => return,
        };

        out.push(Command::SetCell {
            position: cell,
            state,
        });
    }

    fn drag_over(&mut self, grid: &GridModel, cell: Position, out: &mut Vec<Command>) {
        if self.mode != EditMode::Wall {
            return;
        }

        let Ok(current) = grid.cell_at(cell) else {
            return;
        };

        let intent = *self.drag.get_or_insert(match current {
            CellState::Empty => DragIntent::Place,
            _ => DragIntent::Remove,
        });

        let state = match (intent, current) {
            (DragIntent::Place, CellState::Empty) if !would_block(grid, cell) => CellState::Wall,
            (DragIntent::Remove, CellState::Wall) => CellState::Empty,
            _ => return,
        };

        out.push(Command::SetCell {
            position: cell,
            state,
        });
    }
}

/// Emits commands that wall roughly `density` of the grid at random.
///
/// Up to `floor(side² × density)` walls are attempted. Empty cells outside
/// `unbuildable` are visited in random order and each is tried at most once; a cell is only
/// walled if the placement validator accepts it against the grid including
/// the walls accepted before it. Returns the number of walls emitted.
pub fn scatter_walls<R>(
    grid: &GridModel,
    unbuildable: &BTreeSet<Position>,
    density: f64,
    rng: &mut R,
    out: &mut Vec<Command>,
) -> usize
where
    R: Rng + ?Sized,
{
    if !density.is_finite() || density <= 0.0 {
        return 0;
    }

    let view = grid.view();
    let requested = (view.cell_count() as f64 * density.min(1.0)).floor() as usize;
    let mut candidates: Vec<Position> = view
        .iter()
        .filter(|(position, state)| {
            *state == CellState::Empty && !unbuildable.contains(position)
        })
        .map(|(position, _)| position)
        .collect();
    candidates.shuffle(rng);

    let mut scratch = grid.clone();
    let mut placed = 0;
    for cell in candidates {
        if placed == requested {
            break;
        }

        if would_block(&scratch, cell) {
            continue;
        }

        if scratch.set_cell(cell, CellState::Wall).is_err() {
            continue;
        }

        out.push(Command::SetCell {
            position: cell,
            state: CellState::Wall,
        });
        placed += 1;
    }

    debug!(placed, requested, "scattered walls");
    placed
}
