//! Completion records gating one-time provisioning.
//!
//! A completion record is created once per identifier and never
//! updated or deleted; its existence alone decides whether the
//! provisioning phase runs.

mod file_store;

pub use file_store::FileCompletionStore;

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

/// Persistent record of which identifiers have been provisioned.
///
/// Absence of the store, namespace, or key is the "not yet done" state,
/// not an error. A failed `mark_completed` write is fatal for the run.
pub trait CompletionStore {
    fn has_completed(&self, id: &str) -> anyhow::Result<bool>;
    fn mark_completed(&self, id: &str) -> anyhow::Result<()>;
}

/// ISO-8601 UTC timestamp stored against a completed identifier.
pub(crate) fn completion_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryCompletionStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryCompletionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded completions.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CompletionStore for MemoryCompletionStore {
    fn has_completed(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.records.lock().unwrap().contains_key(id))
    }

    fn mark_completed(&self, id: &str) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(id.to_string(), completion_stamp());
        Ok(())
    }
}
