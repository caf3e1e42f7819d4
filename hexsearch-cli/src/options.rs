//! Engine options shared by the commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use hexsearch_core::{Player, SearchConfig};

/// Side to move, as typed on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Blue,
    Red,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Blue => Player::Blue,
            Side::Red => Player::Red,
        }
    }
}

/// Difficulty preset, a named search depth
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Easy,
    Medium,
    Difficult,
}

impl Level {
    pub fn depth(self) -> u32 {
        match self {
            Level::Easy => 1,
            Level::Medium => 2,
            Level::Difficult => 3,
        }
    }
}

/// Explicit `--depth` wins over `--level`
pub fn resolve_depth(depth: Option<u32>, level: Option<Level>) -> Option<u32> {
    depth.or(level.map(Level::depth))
}

/// Search config from an optional JSON file, then command-line overrides
pub fn build_config(
    path: Option<&Path>,
    depth: Option<u32>,
    size_cap: bool,
    seed: Option<u64>,
) -> Result<SearchConfig> {
    let mut config = match path {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(depth) = depth {
        config.max_depth = depth;
    }
    if size_cap {
        config.cap_depth_by_size = true;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}
