//! Preflight checks for a collect run.
//!
//! The collector itself never checks its inputs up front; a missing
//! destination only shows up as a failed copy. Run `binstage preflight` to
//! catch that before a build pipeline gets there.

use anyhow::{bail, Result};

use crate::config::Config;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Check failed - collection will fail.
    Fail,
    /// Check passed but with a warning.
    Warn,
}

impl CheckResult {
    pub fn pass_with(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            details: Some(details.to_string()),
        }
    }

    pub fn fail(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            details: Some(details.to_string()),
        }
    }

    pub fn warn(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warn,
            details: Some(details.to_string()),
        }
    }
}

/// Results of all preflight checks.
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Returns true if no check failed.
    pub fn all_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    pub fn fail_count(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    pub fn warn_count(&self) -> usize {
        self.count(CheckStatus::Warn)
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let (icon, status_str) = match check.status {
                CheckStatus::Pass => ("✓", "PASS"),
                CheckStatus::Fail => ("✗", "FAIL"),
                CheckStatus::Warn => ("⚠", "WARN"),
            };

            print!("  {} [{}] {}", icon, status_str, check.name);
            if let Some(details) = &check.details {
                println!(": {}", details);
            } else {
                println!();
            }
        }

        println!();
        println!(
            "Summary: {}/{} passed",
            self.count(CheckStatus::Pass),
            self.checks.len()
        );
        if self.fail_count() > 0 {
            println!("         {} FAILED - collection will not succeed", self.fail_count());
        }
        if self.warn_count() > 0 {
            println!("         {} warnings", self.warn_count());
        }
    }
}

/// Run all preflight checks against `config`.
pub fn run_preflight(config: &Config) -> PreflightReport {
    let checks = vec![
        check_dest_dir(config),
        check_source_root(config),
        check_allow_list(config),
    ];

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(config: &Config) -> Result<()> {
    let report = run_preflight(config);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before collecting.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!\n");
    Ok(())
}

fn check_dest_dir(config: &Config) -> CheckResult {
    let name = "Destination directory";
    let dest = &config.dest_dir;
    if !dest.exists() {
        return CheckResult::fail(name, &format!("{} does not exist", dest.display()));
    }
    if !dest.is_dir() {
        return CheckResult::fail(name, &format!("{} is not a directory", dest.display()));
    }
    // Dropping the temp file removes it again.
    match tempfile::NamedTempFile::new_in(dest) {
        Ok(_) => CheckResult::pass_with(name, &dest.display().to_string()),
        Err(e) => CheckResult::fail(
            name,
            &format!("{} is not writable: {}", dest.display(), e),
        ),
    }
}

fn check_source_root(config: &Config) -> CheckResult {
    let name = "Source root";
    let root = &config.source_root;
    if root.is_dir() {
        CheckResult::pass_with(name, &root.display().to_string())
    } else {
        CheckResult::warn(
            name,
            &format!("{} not found, nothing will be staged", root.display()),
        )
    }
}

fn check_allow_list(config: &Config) -> CheckResult {
    let name = "Allow-list";
    match config.validate() {
        Ok(()) => CheckResult::pass_with(name, &config.allow_list.join(", ")),
        Err(e) => CheckResult::fail(name, &e.to_string()),
    }
}
