use super::error::PoolError;
use super::types::{PoolState, POOL_STATE_VERSION};
use crate::scoring::WeeklyEventFact;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default pool state file path (~/.config/bb-pool/pool.json)
pub fn get_pool_path() -> PathBuf {
    crate::config::get_config_dir().join("pool.json")
}

/// Load pool state from a JSON file
///
/// If the file doesn't exist, returns a new empty state.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_pool_state(path: &Path) -> Result<PoolState> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no pool state yet, starting empty");
        return Ok(PoolState::default());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open pool state file at {}", path.display()))?;

    let state: PoolState = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load pool state from {}", path.display()))?;

    if state.version != POOL_STATE_VERSION {
        return Err(PoolError::UnsupportedVersion {
            version: state.version,
        }
        .into());
    }

    Ok(state)
}

/// Save pool state to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if needed.
pub fn save_pool_state(path: &Path, state: &PoolState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize pool state")?;

    file.commit().context("Failed to save pool state")?;

    tracing::debug!(path = %path.display(), weeks = state.weeks.len(), "pool state saved");
    Ok(())
}

/// Read one week's facts from a YAML (`.yaml`/`.yml`) or JSON file
pub fn read_fact_file(path: &Path) -> Result<WeeklyEventFact> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fact file at {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let fact: WeeklyEventFact = if is_yaml {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse facts: invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse facts: invalid JSON in {}", path.display()))?
    };

    Ok(fact)
}
