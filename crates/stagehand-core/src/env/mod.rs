//! Child-process environment composition.
//!
//! Directives are applied in declaration order against a copy of the
//! inherited environment; nothing in the launcher's own process
//! environment is mutated.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{EnvAction, EnvDirective};
use crate::context::LaunchContext;

/// Placeholder substituted with the resolved working directory.
pub const WORKING_DIR_TOKEN: &str = "{llWorkingDirPath}";
/// Placeholder substituted with the launcher's own directory.
pub const ROOT_PATH_TOKEN: &str = "{llRootPath}";

/// The environment map for the child plus how many directives shaped it.
#[derive(Debug)]
pub struct ComposedEnv {
    pub vars: HashMap<String, String>,
    pub applied: usize,
}

impl ComposedEnv {
    /// Environment injection is incompatible with shell-mediated launch,
    /// so any applied directive forces direct process creation.
    pub fn forces_direct_launch(&self) -> bool {
        self.applied > 0
    }
}

/// Substitute the launcher path placeholders in a directive value.
pub fn substitute_tokens(value: &str, ctx: &LaunchContext) -> String {
    value
        .replace(WORKING_DIR_TOKEN, &ctx.working_dir().to_string_lossy())
        .replace(ROOT_PATH_TOKEN, &ctx.launcher_dir().to_string_lossy())
}

/// Apply each directive in order over the base environment.
pub fn compose(
    base: impl IntoIterator<Item = (String, String)>,
    directives: &[EnvDirective],
    ctx: &LaunchContext,
) -> ComposedEnv {
    let mut vars: HashMap<String, String> = base.into_iter().collect();
    let mut applied = 0;

    for directive in directives {
        let value = substitute_tokens(&directive.value, ctx);
        match directive.action {
            EnvAction::Append => match vars.get_mut(&directive.name) {
                Some(existing) => existing.push_str(&value),
                None => {
                    vars.insert(directive.name.clone(), value);
                }
            },
            EnvAction::Replace => {
                vars.insert(directive.name.clone(), value);
            }
        }
        debug!("Applied environment directive: {}", directive.name);
        applied += 1;
    }

    ComposedEnv { vars, applied }
}

/// Expand `%NAME%` environment tokens in a raw config path.
///
/// Tokens naming an unset variable are kept literally, matching
/// Windows-style `%VAR%` expansion semantics.
pub fn expand_env_tokens(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('%') {
        let Some(len) = rest[start + 1..].find('%') else {
            break;
        };
        let name = &rest[start + 1..start + 1 + len];
        out.push_str(&rest[..start]);
        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => {
                out.push('%');
                out.push_str(name);
                out.push('%');
            }
        }
        rest = &rest[start + len + 2..];
    }

    out.push_str(rest);
    out
}

/// Expand tokens and resolve against `base` if the result is relative.
pub fn resolve_path(raw: &str, base: &Path) -> PathBuf {
    let expanded = PathBuf::from(expand_env_tokens(raw));
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}
