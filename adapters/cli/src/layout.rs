//! Plain-text layout maps: one row per line, one glyph per cell.

use std::collections::BTreeSet;

use maze_sculptor_core::{CellState, GridError, Position};
use maze_sculptor_world::GridModel;
use thiserror::Error;

/// Errors raised while reading a text layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LayoutError {
    /// The map contained no rows.
    #[error("layout contains no rows")]
    Empty,
    /// A glyph outside the layout alphabet was found.
    #[error("unknown glyph '{glyph}' at line {line}, column {column}")]
    UnknownGlyph {
        /// One-based line number.
        line: usize,
        /// One-based column number.
        column: usize,
        /// Offending character.
        glyph: char,
    },
    /// A row was wider or narrower than the row count.
    #[error("layout must be square: line {line} has {found} cells, expected {expected}")]
    NotSquare {
        /// One-based line number.
        line: usize,
        /// Cells found on the line.
        found: usize,
        /// Number of rows, which every row must match.
        expected: usize,
    },
    /// More than one nucleus glyph was present.
    #[error("layout has more than one nucleus: {first} and {second}")]
    MultipleNuclei {
        /// First nucleus encountered.
        first: Position,
        /// Second nucleus encountered.
        second: Position,
    },
    /// The map has more rows than a grid can address.
    #[error("layout has {rows} rows, which is too many")]
    TooLarge {
        /// Number of non-blank rows.
        rows: usize,
    },
    /// The grid rejected the layout dimensions or a cell.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Glyph for an empty cell that walls may never be built on.
pub(crate) const UNBUILDABLE_GLYPH: char = 'X';

/// A parsed layout: the grid plus the empty cells that must stay open.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Layout {
    pub(crate) grid: GridModel,
    pub(crate) unbuildable: BTreeSet<Position>,
}

/// Character used for a cell state when reading or drawing a layout.
pub(crate) const fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Wall => '#',
        CellState::Spawn => 'S',
        CellState::Nucleus => 'N',
    }
}

fn state_for(glyph: char) -> Option<CellState> {
    match glyph {
        '.' | UNBUILDABLE_GLYPH => Some(CellState::Empty),
        '#' => Some(CellState::Wall),
        'S' => Some(CellState::Spawn),
        'N' | 'T' => Some(CellState::Nucleus),
        _ => None,
    }
}

/// Parses a square text layout into a grid.
///
/// Blank lines and trailing whitespace are ignored. Spawns are recorded in
/// reading order. `X` cells are walkable like `.` but land in
/// [`Layout::unbuildable`].
pub(crate) fn parse(text: &str) -> Result<Layout, LayoutError> {
    let rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(LayoutError::Empty);
    }

    let side =
        u32::try_from(rows.len()).map_err(|_| LayoutError::TooLarge { rows: rows.len() })?;
    let mut grid = GridModel::new(side)?;
    let mut nucleus: Option<Position> = None;
    let mut unbuildable = BTreeSet::new();

    for ((line, row), y) in rows.iter().copied().zip(0_u32..) {
        let found = row.chars().count();
        if found != rows.len() {
            return Err(LayoutError::NotSquare {
                line,
                found,
                expected: rows.len(),
            });
        }

        for ((column, glyph), x) in row.chars().enumerate().zip(0_u32..) {
            let state = state_for(glyph).ok_or(LayoutError::UnknownGlyph {
                line,
                column: column + 1,
                glyph,
            })?;
            let position = Position::new(x, y);
            if glyph == UNBUILDABLE_GLYPH {
                let _ = unbuildable.insert(position);
            }

            if state == CellState::Nucleus {
                if let Some(first) = nucleus {
                    return Err(LayoutError::MultipleNuclei {
                        first,
                        second: position,
                    });
                }
                nucleus = Some(position);
            }

            let _ = grid.set_cell(position, state)?;
        }
    }

    Ok(Layout { grid, unbuildable })
}
