//! stagehand - Deployment-and-launch shim
//!
//! Usage:
//!   stagehand [ARGS...]   # Provision on first run, then launch the
//!                         # wrapped executable, forwarding ARGS and
//!                         # propagating its exit code

mod logging;

use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::error;

use stagehand_core::completion::FileCompletionStore;
use stagehand_core::context::LaunchContext;
use stagehand_core::error::{LaunchError, UNHANDLED_FAULT_CODE};
use stagehand_core::launch::Sequencer;
use stagehand_core::ops::SettingsStore;

/// How long a fatal message stays on an interactive console before the
/// process exits and the window closes.
const FATAL_PAUSE: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(about = "Deployment-and-launch shim", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Arguments forwarded verbatim to the launched executable
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::init() {
        eprintln!("Failed to initialize logging: {err:#}");
    }
    install_panic_hook();

    match run(&cli.args) {
        Ok(code) => std::process::exit(code),
        Err(err) => exit_fatal(&err),
    }
}

fn run(args: &[String]) -> Result<i32, LaunchError> {
    let ctx = LaunchContext::for_current_exe()?;
    let completion = FileCompletionStore::open_default();
    let settings = SettingsStore::open_default();

    let sequencer = Sequencer::new(ctx, &completion, settings);
    sequencer.run(args)
}

/// Log the fatal error to console and run log, hold the console open
/// briefly so an operator can read it, then exit with the mapped code.
fn exit_fatal(err: &LaunchError) -> ! {
    error!("{err:#}");
    thread::sleep(FATAL_PAUSE);
    std::process::exit(err.exit_code());
}

/// Route panics through the same fatal-exit path as classified errors.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        error!("Unhandled fault: {info}");
        thread::sleep(FATAL_PAUSE);
        std::process::exit(UNHANDLED_FAULT_CODE);
    }));
}
