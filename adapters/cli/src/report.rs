//! Text rendering of a grid, its spawn routes and summary statistics.

use std::{collections::BTreeSet, fmt};

use maze_sculptor_core::{CellState, PathSet, Position, StatsReport};
use maze_sculptor_world::GridModel;

use crate::layout::{glyph, UNBUILDABLE_GLYPH};

/// Marker drawn on empty cells that lie on a spawn route.
const ROUTE_GLYPH: char = '*';

/// Borrowed view that formats a grid together with its routes.
///
/// Route marks take precedence over the unbuildable glyph.
pub(crate) struct Report<'a> {
    grid: &'a GridModel,
    unbuildable: &'a BTreeSet<Position>,
    paths: &'a PathSet,
    stats: StatsReport,
}

impl<'a> Report<'a> {
    pub(crate) fn new(
        grid: &'a GridModel,
        unbuildable: &'a BTreeSet<Position>,
        paths: &'a PathSet,
        stats: StatsReport,
    ) -> Self {
        Self {
            grid,
            unbuildable,
            paths,
            stats,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route: BTreeSet<Position> = self
            .paths
            .iter()
            .flat_map(|path| path.cells().iter().copied())
            .collect();

        let side = self.grid.side();
        for y in 0..side {
            for x in 0..side {
                let position = Position::new(x, y);
                let state = self.grid.cell_at(position).map_err(|_| fmt::Error)?;
                let mark = match state {
                    CellState::Empty if route.contains(&position) => ROUTE_GLYPH,
                    CellState::Empty if self.unbuildable.contains(&position) => UNBUILDABLE_GLYPH,
                    _ => glyph(state),
                };
                write!(f, "{mark}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        for spawn in self.grid.spawns() {
            let path = self.paths.iter().find(|path| path.source() == Some(*spawn));
            match path {
                Some(path) => writeln!(f, "spawn {spawn}: {} steps", path.steps())?,
                None => writeln!(f, "spawn {spawn}: unreachable")?,
            }
        }

        match self.grid.nucleus() {
            Some(nucleus) => writeln!(f, "nucleus: {nucleus}")?,
            None => writeln!(f, "nucleus: none")?,
        }
        writeln!(
            f,
            "connected spawns: {}/{}",
            self.stats.connected_spawns, self.stats.spawn_count
        )?;
        write!(f, "max distance: {}", self.stats.max_distance)
    }
}
