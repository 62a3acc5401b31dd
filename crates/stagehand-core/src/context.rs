//! Launch context threaded through the sequencer.
//!
//! Replaces process-global current-directory and environment mutation
//! with explicit paths passed to every component that needs them.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::paths::CONFIG_FILE_NAME;

/// Explicit path context for one run.
///
/// `launcher_dir` is the directory holding the launcher executable and
/// its sibling config file; `working_dir` is the resolved working
/// directory for the child process, defaulting to `launcher_dir`.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    launcher_dir: PathBuf,
    working_dir: PathBuf,
}

impl LaunchContext {
    pub fn new(launcher_dir: PathBuf) -> Self {
        let working_dir = launcher_dir.clone();
        Self {
            launcher_dir,
            working_dir,
        }
    }

    /// Build a context from the running executable's own location.
    pub fn for_current_exe() -> anyhow::Result<Self> {
        let exe = std::env::current_exe().context("Could not resolve launcher executable path")?;
        let launcher_dir = exe
            .parent()
            .context("Launcher executable has no parent directory")?
            .to_path_buf();
        Ok(Self::new(launcher_dir))
    }

    pub fn with_working_dir(mut self, working_dir: PathBuf) -> Self {
        self.working_dir = working_dir;
        self
    }

    pub fn launcher_dir(&self) -> &Path {
        &self.launcher_dir
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The sibling config file resolved next to the launcher.
    pub fn config_path(&self) -> PathBuf {
        self.launcher_dir.join(CONFIG_FILE_NAME)
    }
}
