use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pool state file (defaults to ~/.config/bb-pool/pool.json)
    #[serde(default)]
    pub pool_file: Option<PathBuf>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    pub fn pool_path(&self) -> PathBuf {
        self.pool_file
            .clone()
            .unwrap_or_else(crate::pool::get_pool_path)
    }

    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}
