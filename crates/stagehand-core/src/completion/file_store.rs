//! File-backed completion store under the per-user state directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{CompletionStore, completion_stamp};
use crate::paths;

/// Completion records persisted as a JSON map of id to ISO-8601
/// timestamp. The document is externally inspectable and can be
/// cleared by an operator to force re-provisioning.
#[derive(Debug, Clone)]
pub struct FileCompletionStore {
    path: PathBuf,
}

impl FileCompletionStore {
    /// Store at the default per-user location.
    pub fn open_default() -> Self {
        Self::at(paths::state_dir().join("completions.json"))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read completion store: {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse completion store: {}", self.path.display()))
    }

    fn save(&self, records: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(records)
            .context("Failed to serialize completion records")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write completion store: {}", self.path.display()))
    }
}

impl CompletionStore for FileCompletionStore {
    fn has_completed(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.load()?.contains_key(id))
    }

    fn mark_completed(&self, id: &str) -> anyhow::Result<()> {
        let mut records = self.load()?;
        records.insert(id.to_string(), completion_stamp());
        self.save(&records)
    }
}
