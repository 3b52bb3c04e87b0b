#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting, editing and optimising maze layouts.

mod config;
mod layout;
mod report;

use std::{
    collections::BTreeSet,
    fs,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maze_sculptor_core::{CellState, Event, Position};
use maze_sculptor_system_analytics::Analytics;
use maze_sculptor_system_builder::scatter_walls;
use maze_sculptor_system_optimizer::{evolve, optimize, AnnealingConfig, GeneticConfig};
use maze_sculptor_system_pathfinding::would_block;
use maze_sculptor_world::{self as world, GridModel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::SculptorConfig,
    layout::{Layout, UNBUILDABLE_GLYPH},
    report::Report,
};

#[derive(Debug, Parser)]
#[command(
    name = "maze-sculptor",
    about = "Inspect and sculpt grid mazes between spawns and a nucleus"
)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the grid with spawn routes and distance statistics.
    Report {
        /// Text layout to load instead of the default layout.
        #[arg(short, long)]
        layout: Option<PathBuf>,
        /// Side length of the default layout.
        #[arg(short, long)]
        size: Option<u32>,
    },
    /// Tell whether walling a cell would cut every spawn off from the nucleus.
    Check {
        /// Text layout to check against.
        #[arg(short, long)]
        layout: PathBuf,
        /// Column of the candidate cell.
        x: u32,
        /// Row of the candidate cell.
        y: u32,
    },
    /// Scatter random walls that keep a route open, then print the report.
    Scatter {
        /// Text layout to start from instead of the default layout.
        #[arg(short, long)]
        layout: Option<PathBuf>,
        /// Side length of the default layout.
        #[arg(short, long)]
        size: Option<u32>,
        /// Fraction of cells to try walling.
        #[arg(short, long)]
        density: Option<f64>,
        /// Random seed.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search for tetromino walls that lengthen the shortest spawn route.
    Optimize {
        /// Text layout to optimise.
        #[arg(short, long)]
        layout: PathBuf,
        /// Number of annealing iterations.
        #[arg(short, long)]
        iterations: Option<u64>,
        /// Random seed.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evolve whole wall layouts that lengthen the shortest spawn route.
    Evolve {
        /// Text layout to optimise.
        #[arg(short, long)]
        layout: PathBuf,
        /// Number of generations to breed.
        #[arg(short, long)]
        generations: Option<u32>,
        /// Random seed.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Entry point for the Maze Sculptor command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SculptorConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Report { layout, size } => {
            let Layout { grid, unbuildable } = load_layout(layout, size, &config)?;
            print_report(&grid, &unbuildable);
        }
        Commands::Check { layout, x, y } => {
            let Layout { grid, unbuildable } = load_layout(Some(layout), None, &config)?;
            let cell = Position::new(x, y);
            let current = grid
                .cell_at(cell)
                .with_context(|| format!("cannot check cell {cell}"))?;

            if current != CellState::Empty {
                println!("{cell} holds a {current:?} cell; only empty cells can be walled");
            } else if unbuildable.contains(&cell) {
                println!("{cell} is marked '{UNBUILDABLE_GLYPH}'; walls cannot be built there");
            } else if would_block(&grid, cell) {
                println!("walling {cell} would block all paths to the nucleus");
            } else {
                println!("walling {cell} keeps a path open");
            }
        }
        Commands::Scatter {
            layout,
            size,
            density,
            seed,
        } => {
            let Layout {
                mut grid,
                unbuildable,
            } = load_layout(layout, size, &config)?;
            let density = density.unwrap_or(config.wall_density);
            let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or(config.seed));

            let mut commands = Vec::new();
            let placed = scatter_walls(&grid, &unbuildable, density, &mut rng, &mut commands);
            info!(placed, density, "walls scattered");

            let mut events = Vec::new();
            for command in commands {
                world::apply(&mut grid, command, &mut events);
            }

            let mut analytics = Analytics::new();
            let mut published = Vec::new();
            analytics.handle(&events, &grid, &mut published);
            if published.is_empty() {
                analytics.refresh(&grid, &mut published);
            }
            println!("{}", render(&grid, &unbuildable, &analytics));
        }
        Commands::Optimize {
            layout,
            iterations,
            seed,
        } => {
            let Layout { grid, unbuildable } = load_layout(Some(layout), None, &config)?;
            let annealing = AnnealingConfig {
                iterations: iterations.unwrap_or(config.annealing.iterations),
                ..config.annealing
            };

            let outcome = optimize(&grid, &unbuildable, &annealing, seed.unwrap_or(config.seed))
                .context("invalid annealing configuration")?;

            print_report(&outcome.grid, &unbuildable);
            println!();
            println!(
                "score: {} (initial {}), pieces placed: {}",
                outcome.score, outcome.initial_score, outcome.pieces
            );
        }
        Commands::Evolve {
            layout,
            generations,
            seed,
        } => {
            let Layout { grid, unbuildable } = load_layout(Some(layout), None, &config)?;
            let genetic = GeneticConfig {
                generations: generations.unwrap_or(config.genetic.generations),
                ..config.genetic
            };

            let outcome = evolve(&grid, &unbuildable, &genetic, seed.unwrap_or(config.seed))
                .context("invalid genetic configuration")?;

            print_report(&outcome.grid, &unbuildable);
            println!();
            println!(
                "score: {} (initial {}), walls added: {}",
                outcome.score, outcome.initial_score, outcome.walls
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_layout(
    path: Option<PathBuf>,
    size: Option<u32>,
    config: &SculptorConfig,
) -> Result<Layout> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read layout {}", path.display()))?;
            layout::parse(&text).with_context(|| format!("invalid layout {}", path.display()))
        }
        None => {
            let side = size.unwrap_or(config.grid_side);
            let grid = GridModel::with_default_layout(side)
                .with_context(|| format!("cannot build a default layout of side {side}"))?;
            Ok(Layout {
                grid,
                unbuildable: BTreeSet::new(),
            })
        }
    }
}

fn print_report(grid: &GridModel, unbuildable: &BTreeSet<Position>) {
    let mut analytics = Analytics::new();
    let mut published: Vec<Event> = Vec::new();
    analytics.refresh(grid, &mut published);
    println!("{}", render(grid, unbuildable, &analytics));
}

fn render(grid: &GridModel, unbuildable: &BTreeSet<Position>, analytics: &Analytics) -> String {
    let stats = analytics
        .last_report()
        .copied()
        .unwrap_or_default();
    Report::new(grid, unbuildable, analytics.paths(), stats).to_string()
}
