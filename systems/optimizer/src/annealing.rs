//! Simulated annealing over tetromino wall pieces.

use std::collections::BTreeSet;

use maze_sculptor_core::{CellState, Position};
use maze_sculptor_system_pathfinding::DistanceField;
use maze_sculptor_world::GridModel;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    check_probability,
    pieces::{self, PIECE_CELLS},
    score_with, ConfigError,
};

const PROGRESS_INTERVAL: u64 = 5_000;

/// Tuning knobs for the annealing schedule.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Number of moves attempted.
    pub iterations: u64,
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Factor applied to the temperature after every evaluated move.
    ///
    /// A piece that does not fit at the drawn origin is skipped without
    /// cooling, so crowded grids cool more slowly per iteration.
    pub cooling_rate: f64,
    /// Probability of adding a piece rather than removing one.
    pub add_bias: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            iterations: 200_000,
            initial_temperature: 50.0,
            cooling_rate: 0.9995,
            add_bias: 0.6,
        }
    }
}

impl AnnealingConfig {
    /// Checks that the schedule describes a cooling search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(ConfigError::Temperature {
                value: self.initial_temperature,
            });
        }

        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(ConfigError::CoolingRate {
                value: self.cooling_rate,
            });
        }

        check_probability("add bias", self.add_bias)
    }
}

/// Result of an annealing run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnealOutcome {
    /// Best layout encountered.
    pub grid: GridModel,
    /// Score of [`AnnealOutcome::grid`].
    pub score: i64,
    /// Score of the layout the search started from.
    pub initial_score: i64,
    /// Number of pieces placed in the best layout.
    pub pieces: usize,
    /// Temperature when the run stopped.
    pub final_temperature: f64,
}

/// Anneals wall pieces onto `grid` and returns the best layout found.
///
/// Pieces only cover cells that are empty and not listed in `unbuildable`.
/// Runs are reproducible: the same inputs and seed always produce the same
/// outcome. The returned score is never below the score of the input layout.
pub fn optimize(
    grid: &GridModel,
    unbuildable: &BTreeSet<Position>,
    config: &AnnealingConfig,
    seed: u64,
) -> Result<AnnealOutcome, ConfigError> {
    config.validate()?;

    let catalogue = pieces::catalogue();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut field = DistanceField::new();
    let side = grid.side();

    let mut current = grid.clone();
    let mut current_score = score_with(&current, &mut field);
    let mut placed: Vec<[Position; PIECE_CELLS]> = Vec::new();
    let mut best = AnnealOutcome {
        grid: current.clone(),
        score: current_score,
        initial_score: current_score,
        pieces: 0,
        final_temperature: config.initial_temperature,
    };
    let mut temperature = config.initial_temperature;

    for iteration in 0..config.iterations {
        let add = placed.is_empty() || rng.gen_bool(config.add_bias);

        if add {
            let origin = Position::new(rng.gen_range(0..side), rng.gen_range(0..side));
            let fitted = catalogue
                .choose(&mut rng)
                .and_then(|orientations| orientations.choose(&mut rng))
                .and_then(|orientation| orientation.fit(&current, unbuildable, origin));
            let Some(cells) = fitted else {
                continue;
            };

            paint(&mut current, &cells, CellState::Wall);
            let candidate = score_with(&current, &mut field);
            if accept(candidate - current_score, temperature, &mut rng) {
                current_score = candidate;
                placed.push(cells);
            } else {
                paint(&mut current, &cells, CellState::Empty);
            }
        } else {
            let index = rng.gen_range(0..placed.len());
            let cells = placed[index];
            paint(&mut current, &cells, CellState::Empty);
            let candidate = score_with(&current, &mut field);
            if accept(candidate - current_score, temperature, &mut rng) {
                current_score = candidate;
                let _ = placed.swap_remove(index);
            } else {
                paint(&mut current, &cells, CellState::Wall);
            }
        }

        if current_score > best.score {
            best.grid = current.clone();
            best.score = current_score;
            best.pieces = placed.len();
        }

        temperature *= config.cooling_rate;
        if iteration % PROGRESS_INTERVAL == 0 {
            debug!(iteration, temperature, best = best.score, "annealing progress");
        }
    }

    best.final_temperature = temperature;
    info!(
        best = best.score,
        initial = best.initial_score,
        pieces = best.pieces,
        "annealing finished"
    );
    Ok(best)
}

fn accept<R: Rng + ?Sized>(delta: i64, temperature: f64, rng: &mut R) -> bool {
    if delta >= 0 {
        return true;
    }

    if temperature <= 0.0 {
        return false;
    }

    rng.gen::<f64>() < (delta as f64 / temperature).exp()
}

// Cells come from `Orientation::fit`, so every write is in bounds.
fn paint(grid: &mut GridModel, cells: &[Position; PIECE_CELLS], state: CellState) {
    for cell in cells {
        let _ = grid.set_cell(*cell, state);
    }
}
