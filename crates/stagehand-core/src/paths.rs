//! Well-known filesystem locations.

use std::path::PathBuf;

/// Fixed config filename resolved next to the launcher executable.
pub const CONFIG_FILE_NAME: &str = "llconfig.json";

/// Per-user state directory holding the completion and settings stores.
pub fn state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("stagehand"))
        .unwrap_or_else(|| std::env::temp_dir().join("stagehand"))
}

/// Run-log location. The file is recreated at the start of every run.
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("stagehand.log")
}
