//! Provisioning operation executors.

pub mod copy;
pub mod kv;
pub mod settings;

pub use copy::{CopyStats, copy_tree};
pub use kv::{TypedValue, ValueKind};
pub use settings::SettingsStore;
