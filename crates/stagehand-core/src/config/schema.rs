//! Configuration schema for llconfig.json.
//!
//! Field names keep the PascalCase wire form of existing config files,
//! so a config authored for an earlier deployment keeps parsing.

use serde::{Deserialize, Serialize};

/// One deployment unit: what to stage, how to launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LauncherConfig {
    /// Stable identity for the whole config. Gates re-provisioning:
    /// a completed id never has its operations applied again.
    #[serde(rename = "ID")]
    pub id: String,

    pub executable_path: String,

    /// Working directory for the child; defaults to the launcher's own
    /// directory when unset.
    #[serde(default)]
    pub working_dir_path: Option<String>,

    /// Argument template prepended to runtime-forwarded arguments.
    #[serde(default)]
    pub arguments: String,

    /// Launch via the platform shell instead of directly. Forced off
    /// when any environment directive is present.
    #[serde(default)]
    pub use_shell_execute: bool,

    #[serde(default)]
    pub copy_operations: Vec<CopyOperation>,

    #[serde(default)]
    pub registry_operations: Vec<KvOperation>,

    #[serde(default)]
    pub environment_variables: Vec<EnvDirective>,
}

/// Mirror one directory tree into another.
///
/// Both paths may contain `%VAR%` environment tokens and may be
/// relative; they are expanded and resolved before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CopyOperation {
    pub origin_path: String,
    pub destination_path: String,
}

/// Write one typed entry into the persistent settings store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KvOperation {
    pub key_name: String,
    pub value_name: String,
    /// Always the text representation; coerced per `value_kind`.
    pub value: String,
    /// Must name one of the recognized value kinds, else the run fails.
    pub value_kind: String,
}

/// One environment-variable directive applied in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvDirective {
    pub name: String,
    /// Template string; `{llWorkingDirPath}` and `{llRootPath}` are
    /// substituted before the directive is applied.
    pub value: String,
    #[serde(default)]
    pub action: EnvAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EnvAction {
    /// Concatenate onto an existing value, no separator inserted.
    Append,
    /// Overwrite any prior value.
    #[default]
    Replace,
}
