//! binstage - stages user binaries for the image builder.
//!
//! After the user programs are compiled, copies the allow-listed binaries
//! (`init`, `hello_world`, `sh` by default) out of the target directory into
//! the flat `bin/` directory the filesystem image is built from.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use binstage::Config;
use commands::show::ShowTarget as CmdShowTarget;

#[derive(Parser)]
#[command(name = "binstage")]
#[command(about = "Stage built user binaries into a flat distribution directory")]
#[command(
    after_help = "QUICK START:\n  binstage            Copy init, hello_world and sh into ../bin\n  binstage preflight  Check source and destination\n  binstage clean      Remove staged binaries\n\nENVIRONMENT:\n  BINSTAGE_SOURCE_ROOT, BINSTAGE_DEST_DIR, BINSTAGE_ALLOW (comma-separated).\n  A .env file in the working directory is read first."
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct PathArgs {
    /// Build output tree to scan (default: ../user/target/riscv64gc-unknown-none-elf/debug)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Directory the binaries are copied into (default: ../bin)
    #[arg(long, global = true)]
    dest: Option<PathBuf>,

    /// Binary name to stage; repeat to stage several (replaces the configured list)
    #[arg(long = "allow", value_name = "NAME", global = true)]
    allow: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy allow-listed binaries into the destination (default)
    Collect {
        /// Show what would be copied without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove previously staged binaries from the destination
    Clean,

    /// Run preflight checks (verify paths before collecting)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir().context("Failed to read working directory")?;

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load(&base_dir).with_overrides(
        &base_dir,
        cli.paths.source,
        cli.paths.dest,
        cli.paths.allow,
    );

    match cli.command.unwrap_or(Commands::Collect { dry_run: false }) {
        Commands::Collect { dry_run } => commands::cmd_collect(&config, dry_run)?,
        Commands::Clean => commands::cmd_clean(&config)?,
        Commands::Preflight { strict } => commands::cmd_preflight(&config, strict)?,
        Commands::Show { what } => {
            let target = match what {
                ShowTarget::Config => CmdShowTarget::Config,
            };
            commands::cmd_show(target, &config)?;
        }
    }

    Ok(())
}
