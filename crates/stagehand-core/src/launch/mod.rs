//! Launch sequencing: provision once, compose the environment, spawn
//! the wrapped executable, propagate its exit code.
//!
//! One run moves through config load, gated provisioning, plan
//! preparation, and spawn. Any fatal error short-circuits the rest.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use anyhow::Context;
use tracing::info;

use crate::completion::CompletionStore;
use crate::config::{self, LauncherConfig};
use crate::context::LaunchContext;
use crate::env;
use crate::error::{LaunchError, LaunchResult};
use crate::ops::{SettingsStore, copy, kv};

/// Everything needed to spawn the child, resolved and final.
#[derive(Debug)]
pub struct LaunchPlan {
    pub executable: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Full replacement environment when any directive was applied;
    /// `None` inherits the launcher's environment untouched.
    pub env: Option<HashMap<String, String>>,
    pub shell_execute: bool,
}

/// Orchestrates one run against a completion store and settings store.
pub struct Sequencer<'a> {
    ctx: LaunchContext,
    completion: &'a dyn CompletionStore,
    settings: SettingsStore,
}

impl<'a> Sequencer<'a> {
    pub fn new(ctx: LaunchContext, completion: &'a dyn CompletionStore, settings: SettingsStore) -> Self {
        Self {
            ctx,
            completion,
            settings,
        }
    }

    /// Full run: load the sibling config, provision if the gate is
    /// open, prepare the plan, spawn, and return the exit code to
    /// propagate.
    pub fn run(&self, runtime_args: &[String]) -> LaunchResult<i32> {
        let config_path = self.ctx.config_path();
        let config = config::load_config(&config_path)?;
        info!("Loaded config [{}] from {}", config.id, config_path.display());

        let ctx = self.resolve_context(&config);
        self.provision(&config, &ctx)?;
        let plan = prepare_launch(&config, &ctx, runtime_args)?;
        spawn(&plan)
    }

    /// Resolve the working directory: configured value, or the
    /// launcher's own directory when unset.
    pub fn resolve_context(&self, config: &LauncherConfig) -> LaunchContext {
        match config.working_dir_path.as_deref() {
            Some(raw) => {
                let working_dir = env::resolve_path(raw, self.ctx.launcher_dir());
                self.ctx.clone().with_working_dir(working_dir)
            }
            None => self.ctx.clone(),
        }
    }

    /// Apply copy then key-value operations, in that fixed order, then
    /// close the gate. A completed config id skips everything.
    pub fn provision(&self, config: &LauncherConfig, ctx: &LaunchContext) -> LaunchResult<()> {
        if self.completion.has_completed(&config.id)? {
            info!("Provisioning already completed for [{}]", config.id);
            return Ok(());
        }

        for op in &config.copy_operations {
            let origin = env::resolve_path(&op.origin_path, ctx.working_dir());
            let destination = env::resolve_path(&op.destination_path, ctx.working_dir());
            let stats = copy::copy_tree(&origin, &destination)?;
            info!(
                "Copy operation finished: {} -> {} ({} copied, {} failed)",
                origin.display(),
                destination.display(),
                stats.copied,
                stats.failed
            );
        }

        for op in &config.registry_operations {
            kv::apply(&self.settings, op)?;
        }

        self.completion.mark_completed(&config.id)?;
        info!("Provisioning completed for [{}]", config.id);
        Ok(())
    }
}

/// Resolve the executable, build arguments, compose the environment,
/// and decide shell-mediation.
pub fn prepare_launch(
    config: &LauncherConfig,
    ctx: &LaunchContext,
    runtime_args: &[String],
) -> LaunchResult<LaunchPlan> {
    let executable = env::resolve_path(&config.executable_path, ctx.launcher_dir());
    if !executable.exists() {
        return Err(LaunchError::ExecutableMissing(executable));
    }

    let args = build_arguments(&config.arguments, runtime_args);
    let composed = env::compose(std::env::vars(), &config.environment_variables, ctx);

    let mut shell_execute = config.use_shell_execute;
    if shell_execute && composed.forces_direct_launch() {
        info!("Environment directives present; forcing direct launch");
        shell_execute = false;
    }

    let env = composed.forces_direct_launch().then_some(composed.vars);

    Ok(LaunchPlan {
        executable,
        args,
        working_dir: ctx.working_dir().to_path_buf(),
        env,
        shell_execute,
    })
}

/// The configured template split on whitespace, then each runtime
/// argument appended as its own element so embedded spaces survive.
pub fn build_arguments(template: &str, runtime_args: &[String]) -> Vec<String> {
    let mut args: Vec<String> = template.split_whitespace().map(str::to_string).collect();
    args.extend(runtime_args.iter().cloned());
    args
}

/// Spawn per the plan and return the exit code to propagate.
pub fn spawn(plan: &LaunchPlan) -> LaunchResult<i32> {
    if plan.shell_execute {
        spawn_via_shell(plan)
    } else {
        spawn_direct(plan)
    }
}

/// Direct launch: block until the child exits and propagate its code.
fn spawn_direct(plan: &LaunchPlan) -> LaunchResult<i32> {
    let mut command = Command::new(&plan.executable);
    command.args(&plan.args).current_dir(&plan.working_dir);
    if let Some(vars) = &plan.env {
        command.env_clear().envs(vars);
    }

    info!("Launching (direct): {}", plan.executable.display());
    let status = command
        .status()
        .with_context(|| format!("Failed to launch: {}", plan.executable.display()))?;

    // Signal-terminated children carry no exit code.
    Ok(status.code().unwrap_or(1))
}

/// Shell-mediated launch: fire and forget, the child's outcome is
/// never observed and the launcher reports success.
fn spawn_via_shell(plan: &LaunchPlan) -> LaunchResult<i32> {
    let line = render_command_line(plan);
    let mut command = shell_command(&line);
    command.current_dir(&plan.working_dir);

    info!("Launching (shell): {line}");
    command
        .spawn()
        .with_context(|| format!("Failed to launch via shell: {line}"))?;
    Ok(0)
}

/// Single command line for the platform shell, arguments quoted so
/// embedded spaces survive the extra parse.
pub fn render_command_line(plan: &LaunchPlan) -> String {
    let mut line = quote(&plan.executable.to_string_lossy());
    for arg in &plan.args {
        line.push(' ');
        line.push_str(&quote(arg));
    }
    line
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains(' ') {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", line]);
    command
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.args(["-c", line]);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_splits_and_runtime_args_append() {
        let args = build_arguments("--profile default", &["a b".to_string()]);
        assert_eq!(args, vec!["--profile", "default", "a b"]);
    }

    #[test]
    fn empty_template_yields_only_runtime_args() {
        assert!(build_arguments("", &[]).is_empty());
        assert_eq!(build_arguments("", &["x".to_string()]), vec!["x"]);
    }

    #[test]
    fn command_line_quotes_spaced_arguments() {
        let plan = LaunchPlan {
            executable: PathBuf::from("/opt/app/run"),
            args: vec!["plain".to_string(), "has space".to_string()],
            working_dir: PathBuf::from("/opt/app"),
            env: None,
            shell_execute: true,
        };
        assert_eq!(render_command_line(&plan), "/opt/app/run plain \"has space\"");
    }
}
