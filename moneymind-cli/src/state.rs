use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$MONEYMIND_HOME`, or `~/.moneymind`.
pub fn moneymind_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MONEYMIND_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moneymind"))
}

pub fn ensure_moneymind_home() -> Result<PathBuf> {
    let dir = moneymind_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
