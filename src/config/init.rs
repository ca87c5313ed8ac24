use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::pool::{save_pool_state, PoolState};
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    Kept(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub config: FileOutcome,
    pub pool: FileOutcome,
}

/// Write a starter config (default rule table) and an empty pool state next to it.
///
/// Existing files are kept unless `force` is set.
pub fn write_starter_files(
    config_path: &Path,
    pool_name: &str,
    picks_per_team: usize,
    force: bool,
) -> Result<InitOutcome> {
    let pool_path = starter_pool_path(config_path)?;

    let config_outcome = if config_path.exists() && !force {
        FileOutcome::Kept(config_path.to_path_buf())
    } else {
        let config = Config {
            pool_file: Some(pool_path.clone()),
            scoring: Some(ScoringConfig::default()),
        };
        let yaml = serde_saphyr::to_string(&config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        std::fs::write(config_path, &yaml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        tracing::info!(path = %config_path.display(), "config written");
        FileOutcome::Written(config_path.to_path_buf())
    };

    let pool_outcome = if pool_path.exists() && !force {
        FileOutcome::Kept(pool_path)
    } else {
        save_pool_state(&pool_path, &PoolState::new(pool_name, picks_per_team))?;
        tracing::info!(path = %pool_path.display(), "pool state written");
        FileOutcome::Written(pool_path)
    };

    Ok(InitOutcome {
        config: config_outcome,
        pool: pool_outcome,
    })
}

/// Absolute path of `pool.json` beside the config file.
fn starter_pool_path(config_path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(config_path)
        .with_context(|| format!("Failed to resolve {}", config_path.display()))?;
    Ok(absolute
        .parent()
        .map(|p| p.join("pool.json"))
        .unwrap_or_else(|| PathBuf::from("pool.json")))
}
