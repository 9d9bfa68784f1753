//! Artifact collection.
//!
//! Walks the build output tree and copies every regular file whose base name
//! is allow-listed into the flat destination directory.
//!
//! Entries are visited depth-first and sorted by file name at each directory
//! level, so when two files share a name the one that sorts last wins. For
//! `x/init` and `y/init`, `y/init` is what ends up staged.
//!
//! Symlinks are not descended into, but a symlink to a file is staged with
//! the target's content. Dangling links and links to directories are skipped.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::StageError;

/// Terminal marker printed once the walk completes.
pub const SUCCESS_MARKER: &str = "success.";

/// One artifact copied (or, in a dry run, selected) during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Bytes written; zero in a dry run
    pub bytes: u64,
}

/// Outcome of a collect run.
#[derive(Debug, Default)]
pub struct CollectReport {
    /// Artifacts in the order they were copied
    pub staged: Vec<StagedFile>,
    /// Directory entries that could not be read and were skipped
    pub walk_errors: usize,
}

impl CollectReport {
    /// Base names present in the destination after the run, without repeats.
    pub fn staged_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for file in &self.staged {
            if let Some(name) = file.dest.file_name().and_then(|n| n.to_str()) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

/// Stage allow-listed artifacts, printing progress to stdout.
pub fn collect(config: &Config) -> Result<CollectReport, StageError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    collect_to(config, false, &mut out)
}

/// Stage allow-listed artifacts, writing progress records to `out`.
///
/// With `dry_run` set the walk and selection run as usual but nothing is
/// written to the destination.
///
/// A missing source root is not an error: nothing is staged and the success
/// marker is still written. The first failed copy aborts the run.
pub fn collect_to<W: Write>(
    config: &Config,
    dry_run: bool,
    out: &mut W,
) -> Result<CollectReport, StageError> {
    let mut report = CollectReport::default();

    if !config.source_root.is_dir() {
        eprintln!(
            "  [NOTE] Source root {} not found, nothing to stage",
            config.source_root.display()
        );
        writeln!(out, "{}", SUCCESS_MARKER)?;
        return Ok(report);
    }

    // The destination may live inside the build tree; never walk into it.
    let dest_canonical = fs::canonicalize(&config.dest_dir).ok();

    let walker = WalkDir::new(&config.source_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_dir_at(e, dest_canonical.as_deref()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                report.walk_errors += 1;
                eprintln!("  [WARN] Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !is_file_or_link_to_file(&entry) {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !config.allows(name) {
            continue;
        }

        let source = entry.path().to_path_buf();
        let dest = config.dest_dir.join(name);

        if dry_run {
            writeln!(
                out,
                "would copy file from {} to {}\n",
                source.display(),
                dest.display()
            )?;
            report.staged.push(StagedFile {
                source,
                dest,
                bytes: 0,
            });
            continue;
        }

        let bytes = copy_artifact(&source, &dest)?;
        writeln!(
            out,
            "copy file from {} to {}\n",
            source.display(),
            dest.display()
        )?;
        report.staged.push(StagedFile {
            source,
            dest,
            bytes,
        });
    }

    if report.walk_errors > 0 {
        eprintln!(
            "  [WARN] {} entries could not be read (staged set may be incomplete)",
            report.walk_errors
        );
    }

    writeln!(out, "{}", SUCCESS_MARKER)?;
    Ok(report)
}

/// Copy one artifact, contents and permission bits, replacing any existing file.
fn copy_artifact(source: &Path, dest: &Path) -> Result<u64, StageError> {
    fs::copy(source, dest).map_err(|err| StageError::Copy {
        source: source.to_path_buf(),
        dest: dest.to_path_buf(),
        err,
    })
}

fn is_file_or_link_to_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink()
        && fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}

fn is_dir_at(entry: &DirEntry, target: Option<&Path>) -> bool {
    let Some(target) = target else {
        return false;
    };
    entry.file_type().is_dir()
        && fs::canonicalize(entry.path())
            .map(|p| p == target)
            .unwrap_or(false)
}
