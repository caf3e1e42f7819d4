//! Search configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::eval::Weights;

/// Hard ceiling on search depth; bounds recursion regardless of input
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Settings for one engine instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest iterative-deepening pass
    pub max_depth: u32,
    /// Memoize search results by position
    pub use_transposition: bool,
    /// Lower the depth on large boards (4 up to 7x7, 3 up to 9x9, else 2)
    pub cap_depth_by_size: bool,
    /// Seed for the random fallback move
    pub seed: u64,
    /// Heuristic weights
    pub weights: Weights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            use_transposition: true,
            cap_depth_by_size: false,
            seed: 42,
            weights: Weights::default(),
        }
    }
}

impl SearchConfig {
    /// Config searching to `max_depth`
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    pub fn with_transposition(mut self, enabled: bool) -> Self {
        self.use_transposition = enabled;
        self
    }

    pub fn with_size_cap(mut self, enabled: bool) -> Self {
        self.cap_depth_by_size = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Depth actually searched on a board of `size`
    pub fn effective_depth(&self, size: usize) -> u32 {
        let mut depth = self.max_depth.min(MAX_SEARCH_DEPTH);
        if self.cap_depth_by_size {
            let cap = match size {
                0..=7 => 4,
                8..=9 => 3,
                _ => 2,
            };
            depth = depth.min(cap);
        }
        depth
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
