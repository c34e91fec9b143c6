use anyhow::{Context, Result};
use std::path::PathBuf;

/// `$ROYALTIES_HOME`, or `~/.royalties` when unset.
pub fn royalties_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ROYALTIES_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".royalties"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(royalties_home()?.join("config.toml"))
}
