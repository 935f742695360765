//! Cross-platform state directory resolution.
//!
//! The state directory holds the remembered theme and the last speed test.
//! Candidates are tried in order until one is writable.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const APP_DIR: &str = "dltime";

/// Get the state directory with cross-platform fallback chain.
///
/// Priority order:
/// 1. Explicit override (for testing/CI)
/// 2. Home directory (~/.dltime)
/// 3. Platform-specific data directory (XDG on Linux, AppData on Windows)
/// 4. Current working directory (last resort)
pub fn get_state_dir(override_dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.clone());
    }

    if let Some(home) = home::home_dir() {
        let dir = home.join(format!(".{APP_DIR}"));
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
        warn!(
            "Cannot write to {}. Trying fallback locations.",
            dir.display()
        );
    }

    if let Some(data) = dirs::data_local_dir() {
        let dir = data.join(APP_DIR);
        if ensure_writable(&dir).is_ok() {
            return Ok(dir);
        }
    }

    let dir = PathBuf::from(format!(".{APP_DIR}"));
    ensure_writable(&dir).context(
        "Cannot create state directory in any location. \
         Check file permissions or set state.state_dir_override in config.",
    )?;
    Ok(dir)
}

/// Ensure a directory exists and is writable by the current user.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let test_path = dir.join(".write_test");
    fs::write(&test_path, b"test")
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;

    // Best effort, the probe file is harmless if it lingers
    let _ = fs::remove_file(&test_path);

    Ok(())
}

/// Lock file and state JSON paths, respecting the config override.
pub fn state_paths(state_dir_override: Option<&PathBuf>) -> Result<(PathBuf, PathBuf)> {
    let state_dir = get_state_dir(state_dir_override)?;
    Ok((state_dir.join("state.lock"), state_dir.join("state.json")))
}
