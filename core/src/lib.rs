#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Sculptor engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative grid model, and pure systems. Adapters submit [`Command`]
//! values describing desired edits, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems read the grid through borrowed
//! [`GridView`] snapshots and respond exclusively with new command batches or
//! derived reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as column (`x`) and row (`y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Reports whether the two positions share an edge.
    #[must_use]
    pub fn is_adjacent_to(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Enumerates the in-bounds 4-neighbours of `cell` on a `side`×`side` grid.
///
/// Neighbours are always produced in the order up, right, down, left. Search
/// routines rely on this order for reproducible output.
pub fn cardinal_neighbors(cell: Position, side: u32) -> impl Iterator<Item = Position> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(y) = cell.y().checked_sub(1) {
        candidates[count] = Some(Position::new(cell.x(), y));
        count += 1;
    }

    if let Some(x) = cell.x().checked_add(1) {
        if x < side {
            candidates[count] = Some(Position::new(x, cell.y()));
            count += 1;
        }
    }

    if let Some(y) = cell.y().checked_add(1) {
        if y < side {
            candidates[count] = Some(Position::new(cell.x(), y));
            count += 1;
        }
    }

    if let Some(x) = cell.x().checked_sub(1) {
        candidates[count] = Some(Position::new(x, cell.y()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}

/// Classification of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Open floor that paths may cross and walls may be built on.
    #[default]
    Empty,
    /// Impassable obstacle.
    Wall,
    /// Source cell from which a route to the nucleus is expected.
    Spawn,
    /// The unique target every spawn must reach.
    Nucleus,
}

impl CellState {
    /// Reports whether paths may traverse a cell in this state.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Faults raised when a caller addresses the grid incorrectly.
///
/// These are distinct from "no path" outcomes, which are always encoded as
/// empty results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error, Serialize, Deserialize)]
pub enum GridError {
    /// The position lies outside `[0, side)` on at least one axis.
    #[error("position {position} is outside the {side}x{side} grid")]
    OutOfBounds {
        /// Position supplied by the caller.
        position: Position,
        /// Side length of the grid that rejected the position.
        side: u32,
    },
    /// The requested side length cannot describe a usable grid.
    #[error("grid side {side} is not supported")]
    InvalidSide {
        /// Side length supplied by the caller.
        side: u32,
    },
}

/// Read-only view into a dense square grid of cell states.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellState],
    side: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellState], side: u32) -> Self {
        Self { cells, side }
    }

    /// Side length of the square grid.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Number of cells addressable through the view.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the position lies within the grid.
    #[must_use]
    pub fn is_in_bounds(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns the state of the provided cell, if it lies within the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<CellState> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell lies within the grid and is not a wall.
    #[must_use]
    pub fn is_passable(&self, position: Position) -> bool {
        self.cell(position).is_some_and(CellState::is_passable)
    }

    /// Row-major offset of the position, if it lies within the grid.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if position.x() >= self.side || position.y() >= self.side {
            return None;
        }

        let x = usize::try_from(position.x()).ok()?;
        let y = usize::try_from(position.y()).ok()?;
        let width = usize::try_from(self.side).ok()?;
        let index = y.checked_mul(width)?.checked_add(x)?;
        (index < self.cells.len()).then_some(index)
    }

    /// Inverse of [`GridView::index`].
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Position> {
        if index >= self.cells.len() {
            return None;
        }

        let width = usize::try_from(self.side).ok()?;
        let x = u32::try_from(index % width).ok()?;
        let y = u32::try_from(index / width).ok()?;
        Some(Position::new(x, y))
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + 'a {
        let side = self.side;
        self.cells.iter().enumerate().filter_map(move |(index, state)| {
            let width = usize::try_from(side).ok()?;
            let x = u32::try_from(index % width).ok()?;
            let y = u32::try_from(index / width).ok()?;
            Some((Position::new(x, y), *state))
        })
    }
}

/// Ordered sequence of 4-adjacent positions from a source to a target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    /// Wraps an already ordered list of cells.
    #[must_use]
    pub fn from_cells(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Cells visited by the path, source first.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of cells in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path contains no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Length of the path measured in steps (cell count minus one).
    #[must_use]
    pub fn steps(&self) -> u32 {
        u32::try_from(self.cells.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// First cell of the path.
    #[must_use]
    pub fn source(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    /// Last cell of the path.
    #[must_use]
    pub fn target(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    /// Consumes the path, yielding the underlying cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<Position> {
        self.cells
    }
}

/// Paths found for the spawns that currently reach the nucleus.
///
/// Entries follow spawn-list order. Unreachable spawns have no entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<Path>,
}

impl PathSet {
    /// Creates an empty path set.
    #[must_use]
    pub const fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Iterator over the stored paths in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    /// Number of stored paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Reports whether no spawn currently has a route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Consumes the set, yielding the underlying paths.
    #[must_use]
    pub fn into_vec(self) -> Vec<Path> {
        self.paths
    }
}

impl FromIterator<Path> for PathSet {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

/// Summary statistics published after the layout changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsReport {
    /// Longest spawn-to-nucleus route measured in steps.
    pub max_distance: u32,
    /// Number of spawns placed on the grid.
    pub spawn_count: u32,
    /// Number of spawns that currently reach the nucleus.
    pub connected_spawns: u32,
}

impl StatsReport {
    /// Creates a new statistics report.
    #[must_use]
    pub const fn new(max_distance: u32, spawn_count: u32, connected_spawns: u32) -> Self {
        Self {
            max_distance,
            spawn_count,
            connected_spawns,
        }
    }
}

/// Commands that express all permissible grid mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Recreates the grid with the provided side length and the default layout.
    ConfigureGrid {
        /// Number of cells along each edge.
        side: u32,
    },
    /// Empties every cell and forgets all spawns and the nucleus.
    ClearGrid,
    /// Overwrites a single cell with the provided state.
    SetCell {
        /// Cell to overwrite.
        position: Position,
        /// New classification for the cell.
        state: CellState,
    },
    /// Resets a single cell to [`CellState::Empty`].
    EraseCell {
        /// Cell to reset.
        position: Position,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The grid was recreated with a new side length.
    GridConfigured {
        /// Number of cells along each edge.
        side: u32,
    },
    /// Every cell was reset to empty.
    GridCleared,
    /// A single cell changed classification.
    CellChanged {
        /// Cell that changed.
        position: Position,
        /// State before the edit.
        from: CellState,
        /// State after the edit.
        to: CellState,
    },
    /// An edit was refused because it addressed the grid incorrectly.
    EditRejected {
        /// Specific reason the edit failed.
        reason: GridError,
    },
    /// Analytics finished recomputing routes for the current layout.
    AnalyticsUpdated {
        /// Statistics derived from the recomputed routes.
        report: StatsReport,
    },
}

impl Event {
    /// Reports whether the event signals a change to the grid layout.
    #[must_use]
    pub const fn is_layout_change(&self) -> bool {
        matches!(
            self,
            Self::GridConfigured { .. } | Self::GridCleared | Self::CellChanged { .. }
        )
    }
}
