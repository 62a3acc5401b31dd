//! Recursive directory staging for copy operations.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::{error, info};

use crate::error::{LaunchError, LaunchResult};

/// Counts of per-file outcomes from one tree copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyStats {
    pub copied: usize,
    pub failed: usize,
}

/// Mirror `origin` into `destination`, overwriting existing files.
///
/// A missing origin directory is a fatal operation error. Individual
/// file copies that fail are logged and skipped so a locked or in-use
/// destination file does not block the rest of the deployment.
/// Directory trees are assumed acyclic; subdirectories are descended
/// depth-first before files in each directory are copied.
pub fn copy_tree(origin: &Path, destination: &Path) -> LaunchResult<CopyStats> {
    if !origin.is_dir() {
        return Err(LaunchError::Operation(format!(
            "Can't find origin path: {}",
            origin.display()
        )));
    }
    let mut stats = CopyStats::default();
    copy_dir_recursive(origin, destination, &mut stats)?;
    Ok(stats)
}

fn copy_dir_recursive(origin: &Path, destination: &Path, stats: &mut CopyStats) -> anyhow::Result<()> {
    if !destination.exists() {
        fs::create_dir_all(destination)
            .with_context(|| format!("Failed to create directory: {}", destination.display()))?;
        info!("Created directory: {}", destination.display());
    }

    let entries = fs::read_dir(origin)
        .with_context(|| format!("Failed to read directory: {}", origin.display()))?;

    let mut subdirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read directory entry in: {}", origin.display()))?;
        let ty = entry
            .file_type()
            .with_context(|| format!("Failed to stat: {}", entry.path().display()))?;
        if ty.is_dir() {
            subdirs.push(entry);
        } else {
            files.push(entry);
        }
    }

    for entry in subdirs {
        copy_dir_recursive(&entry.path(), &destination.join(entry.file_name()), stats)?;
    }

    for entry in files {
        let source = entry.path();
        let target = destination.join(entry.file_name());
        match fs::copy(&source, &target) {
            Ok(_) => {
                info!("Copied file: {}", source.display());
                stats.copied += 1;
            }
            Err(err) => {
                error!("Unable to copy file at path: {} ({err})", source.display());
                stats.failed += 1;
            }
        }
    }

    Ok(())
}
