#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state for Maze Sculptor.

use maze_sculptor_core::{CellState, Command, Event, GridError, GridView, Position};
use tracing::debug;

/// Side length used when adapters do not request a specific grid size.
pub const DEFAULT_GRID_SIDE: u32 = 12;

/// Authoritative square grid of walls, spawns, and a single nucleus.
///
/// Cell classification and the spawn list / nucleus field are only ever
/// changed together, so a cell marked [`CellState::Spawn`] always appears in
/// [`GridModel::spawns`] and the [`CellState::Nucleus`] cell is always the one
/// reported by [`GridModel::nucleus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    side: u32,
    cells: Vec<CellState>,
    spawns: Vec<Position>,
    nucleus: Option<Position>,
}

impl GridModel {
    /// Creates an empty grid with `side` cells along each edge.
    pub fn new(side: u32) -> Result<Self, GridError> {
        let cell_count = cell_count(side).ok_or(GridError::InvalidSide { side })?;
        Ok(Self {
            side,
            cells: vec![CellState::Empty; cell_count],
            spawns: Vec::new(),
            nucleus: None,
        })
    }

    /// Creates a grid with the nucleus in the centre and a spawn in each corner.
    ///
    /// Corners are added in the order top-left, top-right, bottom-left,
    /// bottom-right. On tiny grids a corner that coincides with the nucleus or
    /// with an earlier corner is skipped.
    pub fn with_default_layout(side: u32) -> Result<Self, GridError> {
        let mut grid = Self::new(side)?;
        let center = side / 2;
        let _ = grid.set_cell(Position::new(center, center), CellState::Nucleus)?;

        let far = side - 1;
        let corners = [
            Position::new(0, 0),
            Position::new(far, 0),
            Position::new(0, far),
            Position::new(far, far),
        ];
        for corner in corners {
            if grid.cell_at(corner)? == CellState::Empty {
                let _ = grid.set_cell(corner, CellState::Spawn)?;
            }
        }

        Ok(grid)
    }

    /// Number of cells along each edge.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Reports whether the position lies within `[0, side)` on both axes.
    #[must_use]
    pub fn is_in_bounds(&self, position: Position) -> bool {
        self.view().is_in_bounds(position)
    }

    /// Returns the classification of the provided cell.
    pub fn cell_at(&self, position: Position) -> Result<CellState, GridError> {
        self.view().cell(position).ok_or(GridError::OutOfBounds {
            position,
            side: self.side,
        })
    }

    /// Overwrites a cell, keeping the spawn list and nucleus consistent.
    ///
    /// Placing a nucleus empties the previous nucleus cell. Overwriting a
    /// spawn or the nucleus retires it. Returns the state the cell held
    /// before the edit.
    pub fn set_cell(&mut self, position: Position, state: CellState) -> Result<CellState, GridError> {
        let index = self.index(position)?;
        let previous = self.cells[index];
        if previous == state {
            return Ok(previous);
        }

        match previous {
            CellState::Spawn => self.spawns.retain(|spawn| *spawn != position),
            CellState::Nucleus => self.nucleus = None,
            CellState::Empty | CellState::Wall => {}
        }

        match state {
            CellState::Nucleus => {
                if let Some(displaced) = self.nucleus.replace(position) {
                    let displaced_index = self.index(displaced)?;
                    self.cells[displaced_index] = CellState::Empty;
                }
            }
            CellState::Spawn => self.spawns.push(position),
            CellState::Empty | CellState::Wall => {}
        }

        self.cells[index] = state;
        Ok(previous)
    }

    /// Spawn cells in the order they were placed.
    #[must_use]
    pub fn spawns(&self) -> &[Position] {
        &self.spawns
    }

    /// The nucleus cell, if one is placed.
    #[must_use]
    pub const fn nucleus(&self) -> Option<Position> {
        self.nucleus
    }

    /// Captures a borrowed read-only view of the cells.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.side)
    }

    /// Resets every cell to empty and forgets all spawns and the nucleus.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
        self.spawns.clear();
        self.nucleus = None;
    }

    fn index(&self, position: Position) -> Result<usize, GridError> {
        self.view().index(position).ok_or(GridError::OutOfBounds {
            position,
            side: self.side,
        })
    }
}

fn cell_count(side: u32) -> Option<usize> {
    if side == 0 {
        return None;
    }

    let side = usize::try_from(side).ok()?;
    side.checked_mul(side)
}

/// Applies the provided command to the grid, mutating state deterministically.
pub fn apply(grid: &mut GridModel, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { side } => match GridModel::with_default_layout(side) {
            Ok(configured) => {
                *grid = configured;
                out_events.push(Event::GridConfigured { side });
            }
            Err(reason) => reject(reason, out_events),
        },
        Command::ClearGrid => {
            grid.clear();
            out_events.push(Event::GridCleared);
        }
        Command::SetCell { position, state } => set_cell(grid, position, state, out_events),
        Command::EraseCell { position } => {
            set_cell(grid, position, CellState::Empty, out_events);
        }
    }
}

fn set_cell(
    grid: &mut GridModel,
    position: Position,
    state: CellState,
    out_events: &mut Vec<Event>,
) {
    let displaced = match state {
        CellState::Nucleus => grid.nucleus().filter(|nucleus| *nucleus != position),
        _ => None,
    };

    match grid.set_cell(position, state) {
        Ok(from) if from == state => {}
        Ok(from) => {
            if let Some(displaced) = displaced {
                out_events.push(Event::CellChanged {
                    position: displaced,
                    from: CellState::Nucleus,
                    to: CellState::Empty,
                });
            }
            out_events.push(Event::CellChanged {
                position,
                from,
                to: state,
            });
        }
        Err(reason) => reject(reason, out_events),
    }
}

fn reject(reason: GridError, out_events: &mut Vec<Event>) {
    debug!(%reason, "grid edit rejected");
    out_events.push(Event::EditRejected { reason });
}

/// Query functions that provide read-only access to the grid state.
pub mod query {
    use maze_sculptor_core::{CellState, GridError, GridView, Position};

    use super::GridModel;

    /// Captures a read-only view of the cells for search algorithms.
    #[must_use]
    pub fn grid_view(grid: &GridModel) -> GridView<'_> {
        grid.view()
    }

    /// Spawn cells in placement order.
    #[must_use]
    pub fn spawns(grid: &GridModel) -> &[Position] {
        grid.spawns()
    }

    /// The nucleus cell, if one is placed.
    #[must_use]
    pub fn nucleus(grid: &GridModel) -> Option<Position> {
        grid.nucleus()
    }

    /// Classification of a single cell.
    pub fn cell_at(grid: &GridModel, position: Position) -> Result<CellState, GridError> {
        grid.cell_at(position)
    }
}
