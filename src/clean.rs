//! Staged artifact cleaning.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

/// Remove every allow-listed file from the destination directory.
///
/// Files whose names are not allow-listed are left alone, as are
/// allow-listed names that turn out to be directories or symlinks.
/// Returns the removed paths.
pub fn clean_staged(config: &Config) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    if !config.dest_dir.is_dir() {
        println!(
            "Destination {} not found, nothing to clean.",
            config.dest_dir.display()
        );
        return Ok(removed);
    }

    for name in &config.allow_list {
        let path = config.dest_dir.join(name);
        let Ok(meta) = fs::symlink_metadata(&path) else {
            continue;
        };
        if !meta.file_type().is_file() {
            continue;
        }
        println!("Removing {}...", path.display());
        fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
        removed.push(path);
    }

    if removed.is_empty() {
        println!("No staged artifacts to clean.");
    } else {
        println!("Removed {} staged artifact(s).", removed.len());
    }

    Ok(removed)
}
