//! Persistent settings store backing key-value operations.
//!
//! A single JSON document under the per-user state directory, keyed by
//! key name then value name. Operator-controlled via config; no schema
//! is enforced beyond the typed value representation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::kv::TypedValue;
use crate::paths;

type Document = BTreeMap<String, BTreeMap<String, TypedValue>>;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the default per-user location.
    pub fn open_default() -> Self {
        Self::at(paths::state_dir().join("settings.json"))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&self, key: &str, name: &str, value: TypedValue) -> anyhow::Result<()> {
        let mut doc = self.load()?;
        doc.entry(key.to_string())
            .or_default()
            .insert(name.to_string(), value);
        self.save(&doc)
    }

    pub fn get(&self, key: &str, name: &str) -> anyhow::Result<Option<TypedValue>> {
        Ok(self
            .load()?
            .get(key)
            .and_then(|entries| entries.get(name))
            .cloned())
    }

    fn load(&self) -> anyhow::Result<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings store: {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings store: {}", self.path.display()))
    }

    fn save(&self, doc: &Document) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory: {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(doc).context("Failed to serialize settings document")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings store: {}", self.path.display()))
    }
}
