// Commands module - handles CLI command execution

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;

pub mod replay;

pub use replay::{LifecycleEvent, ReplaySummary, handle_replay, replay_events};

/// Write a default configuration file, refusing to overwrite
pub fn handle_init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Configuration file already exists: {}", path.display());
    }

    std::fs::write(path, Config::default().to_toml())
        .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;
    println!("Created configuration file: {}", path.display());
    Ok(())
}
