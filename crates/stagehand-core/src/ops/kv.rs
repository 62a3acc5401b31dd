//! Typed key-value operations against the persistent settings store.

use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::settings::SettingsStore;
use crate::config::KvOperation;
use crate::error::{LaunchError, LaunchResult};

/// Native storage type tag for a key-value entry.
///
/// Closed enumeration; config files name a kind by string and an
/// unrecognized name fails the run, since it indicates an authoring
/// error rather than a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    String,
    ExpandString,
    Binary,
    Dword,
    Qword,
    MultiString,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "String",
            ValueKind::ExpandString => "ExpandString",
            ValueKind::Binary => "Binary",
            ValueKind::Dword => "DWord",
            ValueKind::Qword => "QWord",
            ValueKind::MultiString => "MultiString",
        }
    }
}

impl FromStr for ValueKind {
    type Err = LaunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(ValueKind::String),
            "expandstring" => Ok(ValueKind::ExpandString),
            "binary" => Ok(ValueKind::Binary),
            "dword" => Ok(ValueKind::Dword),
            "qword" => Ok(ValueKind::Qword),
            "multistring" => Ok(ValueKind::MultiString),
            _ => Err(LaunchError::Operation(format!(
                "Unrecognized value kind: {s}"
            ))),
        }
    }
}

/// A config value coerced from its text form into the kind's native
/// representation. Serialized tagged so the settings document stays
/// readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum TypedValue {
    String(String),
    ExpandString(String),
    Binary(Vec<u8>),
    Dword(u32),
    Qword(u64),
    MultiString(Vec<String>),
}

/// Coerce the config text form into the kind's native representation.
///
/// `Binary` expects hex text; `MultiString` splits on newlines. A value
/// that does not coerce is an unhandled fault, not an operation error:
/// the kind itself was recognized.
pub fn coerce_value(kind: ValueKind, raw: &str) -> anyhow::Result<TypedValue> {
    let value = match kind {
        ValueKind::String => TypedValue::String(raw.to_string()),
        ValueKind::ExpandString => TypedValue::ExpandString(raw.to_string()),
        ValueKind::Binary => TypedValue::Binary(
            hex::decode(raw).with_context(|| format!("Invalid binary value: {raw}"))?,
        ),
        ValueKind::Dword => TypedValue::Dword(
            raw.parse()
                .with_context(|| format!("Invalid DWord value: {raw}"))?,
        ),
        ValueKind::Qword => TypedValue::Qword(
            raw.parse()
                .with_context(|| format!("Invalid QWord value: {raw}"))?,
        ),
        ValueKind::MultiString => {
            TypedValue::MultiString(raw.lines().map(str::to_string).collect())
        }
    };
    Ok(value)
}

/// Apply one key-value operation to the settings store.
pub fn apply(store: &SettingsStore, op: &KvOperation) -> LaunchResult<()> {
    let kind: ValueKind = op.value_kind.parse()?;
    let value = coerce_value(kind, &op.value)?;
    store.set(&op.key_name, &op.value_name, value)?;
    info!(
        "Wrote value: {}\\{} ({})",
        op.key_name,
        op.value_name,
        kind.as_str()
    );
    Ok(())
}
