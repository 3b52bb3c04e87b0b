//! TOML configuration for the command-line tool.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use maze_sculptor_system_optimizer::{AnnealingConfig, GeneticConfig};
use maze_sculptor_world::DEFAULT_GRID_SIDE;
use serde::Deserialize;

/// Settings shared by every subcommand; explicit flags take precedence.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SculptorConfig {
    /// Side length used when no layout file is given.
    pub(crate) grid_side: u32,
    /// Fraction of cells `scatter` tries to wall.
    pub(crate) wall_density: f64,
    /// Seed for scattering, annealing and evolution.
    pub(crate) seed: u64,
    /// Annealing schedule for `optimize`.
    pub(crate) annealing: AnnealingConfig,
    /// Population settings for `evolve`.
    pub(crate) genetic: GeneticConfig,
}

impl Default for SculptorConfig {
    fn default() -> Self {
        Self {
            grid_side: DEFAULT_GRID_SIDE,
            wall_density: 0.2,
            seed: 0x5eed,
            annealing: AnnealingConfig::default(),
            genetic: GeneticConfig::default(),
        }
    }
}

impl SculptorConfig {
    /// Reads the file at `path`, or returns defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;

        if !(0.0..=1.0).contains(&config.wall_density) {
            bail!(
                "wall_density must lie in [0, 1], got {}",
                config.wall_density
            );
        }
        config.annealing.validate()?;
        config.genetic.validate()?;

        Ok(config)
    }
}
