//! Configuration management for binstage.
//!
//! Reads configuration from environment variables (a `.env` file in the
//! working directory is loaded into the environment by `main` first).
//! Command-line flags override both.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default build output directory of the user programs.
pub const DEFAULT_SOURCE_ROOT: &str = "../user/target/riscv64gc-unknown-none-elf/debug";

/// Default flat distribution directory read by the image builder.
pub const DEFAULT_DEST_DIR: &str = "../bin";

/// Binaries staged when no allow-list is configured.
pub const DEFAULT_ALLOW_LIST: &[&str] = &["init", "hello_world", "sh"];

pub const ENV_SOURCE_ROOT: &str = "BINSTAGE_SOURCE_ROOT";
pub const ENV_DEST_DIR: &str = "BINSTAGE_DEST_DIR";
pub const ENV_ALLOW: &str = "BINSTAGE_ALLOW";

/// binstage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the compiler output tree to scan
    pub source_root: PathBuf,
    /// Flat directory the matched binaries are copied into
    pub dest_dir: PathBuf,
    /// Exact base names eligible for staging
    pub allow_list: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            allow_list: DEFAULT_ALLOW_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Build a config for explicit paths, mostly for callers that already know
    /// where everything lives.
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        allow_list: &[&str],
    ) -> Self {
        Self {
            source_root: source_root.into(),
            dest_dir: dest_dir.into(),
            allow_list: allow_list.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Relative paths are resolved against `base_dir`.
    pub fn load(base_dir: &Path) -> Self {
        let env_vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(base_dir, &env_vars)
    }

    /// Build a config from an explicit variable map, falling back to defaults.
    pub fn from_vars(base_dir: &Path, env_vars: &HashMap<String, String>) -> Self {
        let source_root = env_vars
            .get(ENV_SOURCE_ROOT)
            .filter(|s| !s.trim().is_empty())
            .map(|s| resolve(base_dir, Path::new(s.trim())))
            .unwrap_or_else(|| base_dir.join(DEFAULT_SOURCE_ROOT));

        let dest_dir = env_vars
            .get(ENV_DEST_DIR)
            .filter(|s| !s.trim().is_empty())
            .map(|s| resolve(base_dir, Path::new(s.trim())))
            .unwrap_or_else(|| base_dir.join(DEFAULT_DEST_DIR));

        let allow_list = env_vars
            .get(ENV_ALLOW)
            .map(|s| parse_allow_list(s))
            .unwrap_or_else(|| DEFAULT_ALLOW_LIST.iter().map(|s| s.to_string()).collect());

        Self {
            source_root,
            dest_dir,
            allow_list,
        }
    }

    /// Apply command-line overrides on top of the loaded values.
    ///
    /// A non-empty `allow` replaces the allow-list entirely.
    pub fn with_overrides(
        mut self,
        base_dir: &Path,
        source: Option<PathBuf>,
        dest: Option<PathBuf>,
        allow: Vec<String>,
    ) -> Self {
        if let Some(source) = source {
            self.source_root = resolve(base_dir, &source);
        }
        if let Some(dest) = dest {
            self.dest_dir = resolve(base_dir, &dest);
        }
        if !allow.is_empty() {
            self.allow_list = allow;
        }
        self
    }

    /// Reject configurations that can never stage anything sensible.
    pub fn validate(&self) -> Result<()> {
        if self.allow_list.is_empty() {
            bail!("Allow-list is empty. Set {} or pass --allow.", ENV_ALLOW);
        }
        for name in &self.allow_list {
            if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
                bail!(
                    "Allow-list entry '{}' contains a path separator; entries are base names",
                    name
                );
            }
        }
        Ok(())
    }

    /// Check if `name` is an allow-listed base name.
    pub fn allows(&self, name: &str) -> bool {
        self.allow_list.iter().any(|n| n == name)
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  {}: {}", ENV_SOURCE_ROOT, self.source_root.display());
        println!("  {}: {}", ENV_DEST_DIR, self.dest_dir.display());
        println!("  {}: {}", ENV_ALLOW, self.allow_list.join(","));
        if self.source_root.is_dir() {
            println!("  Source root: FOUND");
        } else {
            println!("  Source root: NOT FOUND (build the user programs first)");
        }
        if self.dest_dir.is_dir() {
            println!("  Destination: FOUND");
        } else {
            println!("  Destination: NOT FOUND (create it before collecting)");
        }
    }
}

/// Split a comma-separated allow-list, dropping blanks and duplicates.
pub fn parse_allow_list(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
