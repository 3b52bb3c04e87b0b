//! Genetic search over whole wall masks.
//!
//! A genome holds one bit per buildable cell (empty and not unbuildable, in
//! row-major order). Walls already present in the input, spawns, the nucleus
//! and unbuildable cells are never genes, so no genome can change them.

use std::collections::BTreeSet;

use maze_sculptor_core::{CellState, Position};
use maze_sculptor_system_pathfinding::{find_path, DistanceField};
use maze_sculptor_world::GridModel;
use rand::{seq::index, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{check_probability, score_with, ConfigError};

/// Tuning knobs for the genetic search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Layouts per generation.
    pub population: usize,
    /// Number of generations bred after the first.
    pub generations: u32,
    /// Chance that a gene starts as a wall in the random first generation.
    pub wall_probability: f64,
    /// Chance that each gene of a child flips.
    pub mutation_rate: f64,
    /// Share of each generation copied unchanged into the next, at least one.
    pub elite_fraction: f64,
    /// Layouts drawn per tournament when picking a parent.
    pub tournament_size: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population: 80,
            generations: 200,
            wall_probability: 0.2,
            mutation_rate: 0.01,
            elite_fraction: 0.05,
            tournament_size: 3,
        }
    }
}

impl GeneticConfig {
    /// Checks that the population can breed and every rate is a probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population < 2 {
            return Err(ConfigError::Population {
                value: self.population,
            });
        }

        if self.tournament_size == 0 || self.tournament_size > self.population {
            return Err(ConfigError::TournamentSize {
                value: self.tournament_size,
                population: self.population,
            });
        }

        check_probability("wall probability", self.wall_probability)?;
        check_probability("mutation rate", self.mutation_rate)?;
        check_probability("elite fraction", self.elite_fraction)
    }

    fn elite_count(&self) -> usize {
        let share = (self.elite_fraction * self.population as f64).ceil() as usize;
        share.clamp(1, self.population)
    }
}

/// Result of a genetic run.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolveOutcome {
    /// Best layout encountered over all generations.
    pub grid: GridModel,
    /// Score of [`EvolveOutcome::grid`].
    pub score: i64,
    /// Score of the layout the search started from.
    pub initial_score: i64,
    /// Walls the best layout adds to the input.
    pub walls: usize,
}

struct Problem<'a> {
    base: &'a GridModel,
    genes: Vec<Position>,
    // Gene indices along each spawn's shortest route in the input layout.
    routes: Vec<Vec<usize>>,
    field: DistanceField,
}

impl<'a> Problem<'a> {
    fn new(base: &'a GridModel, unbuildable: &BTreeSet<Position>) -> Self {
        let view = base.view();
        let genes: Vec<Position> = view
            .iter()
            .filter(|(position, state)| {
                *state == CellState::Empty && !unbuildable.contains(position)
            })
            .map(|(position, _)| position)
            .collect();

        let mut slots: Vec<Option<usize>> = vec![None; view.cell_count()];
        for (gene, position) in genes.iter().enumerate() {
            if let Some(index) = view.index(*position) {
                slots[index] = Some(gene);
            }
        }

        let routes: Vec<Vec<usize>> = base
            .spawns()
            .iter()
            .map(|spawn| {
                base.nucleus()
                    .and_then(|nucleus| find_path(view, *spawn, nucleus))
                    .map(|path| {
                        path.cells()
                            .iter()
                            .filter_map(|cell| view.index(*cell).and_then(|index| slots[index]))
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();

        Self {
            base,
            genes,
            routes,
            field: DistanceField::new(),
        }
    }

    fn width(&self) -> usize {
        self.genes.len()
    }

    fn decode(&self, genome: &[bool]) -> GridModel {
        let mut grid = self.base.clone();
        for (position, wall) in self.genes.iter().zip(genome) {
            if *wall {
                let _ = grid.set_cell(*position, CellState::Wall);
            }
        }
        grid
    }

    /// Reopens the input route of every spawn the genome cuts off.
    fn repair(&mut self, genome: &mut [bool]) {
        let grid = self.decode(genome);
        self.field.rebuild(grid.view(), grid.nucleus());

        for (spawn, route) in self.base.spawns().iter().zip(&self.routes) {
            if self.field.distance(*spawn).is_none() {
                for gene in route {
                    genome[*gene] = false;
                }
            }
        }
    }

    fn fitness(&mut self, genome: &[bool]) -> i64 {
        let grid = self.decode(genome);
        score_with(&grid, &mut self.field)
    }
}

/// Evolves wall masks over `grid` and returns the best layout found.
///
/// Only cells that are empty and not listed in `unbuildable` can become
/// walls. The input layout seeds the first generation, so the returned score
/// is never below the input score. The same inputs and seed always produce
/// the same outcome.
pub fn evolve(
    grid: &GridModel,
    unbuildable: &BTreeSet<Position>,
    config: &GeneticConfig,
    seed: u64,
) -> Result<EvolveOutcome, ConfigError> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut problem = Problem::new(grid, unbuildable);
    let width = problem.width();

    let mut population: Vec<Vec<bool>> = Vec::with_capacity(config.population);
    population.push(vec![false; width]);
    while population.len() < config.population {
        let mut genome: Vec<bool> = (0..width)
            .map(|_| rng.gen_bool(config.wall_probability))
            .collect();
        problem.repair(&mut genome);
        population.push(genome);
    }
    let mut fitness: Vec<i64> = population
        .iter()
        .map(|genome| problem.fitness(genome))
        .collect();

    let initial_score = fitness[0];
    let mut best_genome = population[0].clone();
    let mut best_score = initial_score;
    let elites = config.elite_count();
    let log_every = (config.generations / 10).max(1);

    for generation in 0..=config.generations {
        let mut ranked: Vec<usize> = (0..population.len()).collect();
        ranked.sort_by(|a, b| fitness[*b].cmp(&fitness[*a]));

        let leader = ranked[0];
        if fitness[leader] > best_score {
            best_score = fitness[leader];
            best_genome = population[leader].clone();
        }
        if generation % log_every == 0 || generation <= 5 {
            debug!(
                generation,
                leader = fitness[leader],
                best = best_score,
                "evolution progress"
            );
        }

        if generation == config.generations {
            break;
        }

        let mut next: Vec<Vec<bool>> = ranked
            .iter()
            .take(elites)
            .map(|index| population[*index].clone())
            .collect();
        while next.len() < config.population {
            let first = tournament(&fitness, config.tournament_size, &mut rng);
            let second = tournament(&fitness, config.tournament_size, &mut rng);
            let (mut left, mut right) = crossover(&population[first], &population[second], &mut rng);

            for child in [&mut left, &mut right] {
                mutate(child, config.mutation_rate, &mut rng);
                problem.repair(child);
            }

            next.push(left);
            if next.len() < config.population {
                next.push(right);
            }
        }

        population = next;
        fitness = population
            .iter()
            .map(|genome| problem.fitness(genome))
            .collect();
    }

    let walls = best_genome.iter().filter(|wall| **wall).count();
    info!(
        best = best_score,
        initial = initial_score,
        walls,
        "evolution finished"
    );
    Ok(EvolveOutcome {
        grid: problem.decode(&best_genome),
        score: best_score,
        initial_score,
        walls,
    })
}

/// Index of the fittest of `size` distinct, randomly drawn layouts.
fn tournament<R: Rng + ?Sized>(fitness: &[i64], size: usize, rng: &mut R) -> usize {
    let mut winner: Option<usize> = None;
    for contender in index::sample(rng, fitness.len(), size) {
        if winner.map_or(true, |current| fitness[contender] > fitness[current]) {
            winner = Some(contender);
        }
    }
    winner.unwrap_or(0)
}

/// Two-point crossover: the children swap the genes between two cut points.
fn crossover<R: Rng + ?Sized>(
    first: &[bool],
    second: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let mut left = first.to_vec();
    let mut right = second.to_vec();

    if left.len() >= 2 {
        let cuts = index::sample(rng, left.len(), 2);
        let start = cuts.index(0).min(cuts.index(1));
        let end = cuts.index(0).max(cuts.index(1));
        left[start..end].swap_with_slice(&mut right[start..end]);
    }

    (left, right)
}

fn mutate<R: Rng + ?Sized>(genome: &mut [bool], rate: f64, rng: &mut R) {
    for gene in genome {
        if rng.gen_bool(rate) {
            *gene = !*gene;
        }
    }
}
