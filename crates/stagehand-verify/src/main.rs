//! stagehand-verify - Deployment diagnostic probe
//!
//! Usage:
//!   stagehand-verify [PATHS...] [--env NAME]... [--wait]
//!
//! Checks that expected files, directories, and environment variables
//! are present after a stagehand deployment. Exits non-zero if
//! anything is missing.

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use stagehand_core::env::expand_env_tokens;

#[derive(Parser)]
#[command(name = "stagehand-verify")]
#[command(about = "Probe for expected files, directories, and environment variables", long_about = None)]
struct Cli {
    /// Paths to probe; environment tokens like %APPDATA% are expanded
    paths: Vec<String>,

    /// Environment variables that must be present and non-empty
    #[arg(long = "env", value_name = "NAME")]
    env_vars: Vec<String>,

    /// Wait for enter before exiting (interactive console use)
    #[arg(long)]
    wait: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut missing = 0usize;

    for raw in &cli.paths {
        let path = PathBuf::from(expand_env_tokens(raw));
        if path.is_file() {
            println!("Found file: {}", path.display());
        } else if path.is_dir() {
            println!("Found directory: {}", path.display());
        } else {
            eprintln!("Unable to find: {}", path.display());
            missing += 1;
        }
    }

    for name in &cli.env_vars {
        match std::env::var(name) {
            Ok(value) if !value.is_empty() => {
                println!("Found variable [{name}] with content: {value}");
            }
            _ => {
                eprintln!("Unable to find environment variable: {name}");
                missing += 1;
            }
        }
    }

    if cli.wait {
        println!("Press enter to exit...");
        let _ = std::io::stdin().lock().read_line(&mut String::new());
    }

    if missing > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
