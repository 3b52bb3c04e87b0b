#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Searches for wall layouts that lengthen the shortest spawn route.
//!
//! Two strategies share one score: simulated annealing drops tetromino
//! pieces onto empty cells and removes them again, while the genetic solver
//! evolves whole wall masks. Both leave existing walls, spawns, the nucleus
//! and every unbuildable cell untouched, and both return the best layout they
//! saw.

mod annealing;
mod genetic;
mod pieces;

use maze_sculptor_system_pathfinding::DistanceField;
use maze_sculptor_world::GridModel;
use thiserror::Error;

pub use annealing::{optimize, AnnealOutcome, AnnealingConfig};
pub use genetic::{evolve, EvolveOutcome, GeneticConfig};

/// Score assigned to layouts in which some spawn cannot reach the nucleus.
pub const DISCONNECTED_SCORE: i64 = -1_000_000;

/// Invalid optimizer parameters.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Temperature must be positive and finite.
    #[error("initial temperature must be positive, got {value}")]
    Temperature {
        /// Rejected value.
        value: f64,
    },
    /// Cooling rate must lie in `(0, 1]`.
    #[error("cooling rate must lie in (0, 1], got {value}")]
    CoolingRate {
        /// Rejected value.
        value: f64,
    },
    /// A probability or fraction fell outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    Probability {
        /// Name of the offending setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The population is too small to breed.
    #[error("population must hold at least 2 layouts, got {value}")]
    Population {
        /// Rejected value.
        value: usize,
    },
    /// Tournaments must draw between one layout and the whole population.
    #[error("tournament size must lie in 1..={population}, got {value}")]
    TournamentSize {
        /// Rejected value.
        value: usize,
        /// Configured population.
        population: usize,
    },
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}

/// Scores a layout as the shortest spawn-to-nucleus distance.
///
/// Returns [`DISCONNECTED_SCORE`] when any spawn is cut off (including when
/// the nucleus is missing) and `0` when there are no spawns.
#[must_use]
pub fn score(grid: &GridModel) -> i64 {
    let mut field = DistanceField::new();
    score_with(grid, &mut field)
}

pub(crate) fn score_with(grid: &GridModel, field: &mut DistanceField) -> i64 {
    field.rebuild(grid.view(), grid.nucleus());

    let mut shortest: Option<u32> = None;
    for spawn in grid.spawns() {
        let Some(distance) = field.distance(*spawn) else {
            return DISCONNECTED_SCORE;
        };
        shortest = Some(shortest.map_or(distance, |current| current.min(distance)));
    }

    shortest.map_or(0, i64::from)
}
