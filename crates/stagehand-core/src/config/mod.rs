//! Launcher configuration: schema and sibling-file loading.

pub mod schema;

pub use schema::{CopyOperation, EnvAction, EnvDirective, KvOperation, LauncherConfig};

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::error::{LaunchError, LaunchResult};

/// Load and parse the launcher config at `path`.
///
/// A missing file is `ConfigMissing`; a file that exists but does not
/// parse is an unhandled fault, since it indicates a broken build
/// artifact rather than a clean "not deployed here" state.
pub fn load_config(path: &Path) -> LaunchResult<LauncherConfig> {
    if !path.exists() {
        return Err(LaunchError::ConfigMissing(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: LauncherConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
