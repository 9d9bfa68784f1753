//! Collect command - stages allow-listed binaries.

use anyhow::Result;

use binstage::collect;
use binstage::config::Config;

/// Execute the collect command.
pub fn cmd_collect(config: &Config, dry_run: bool) -> Result<()> {
    config.validate()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    collect::collect_to(config, dry_run, &mut out)?;
    Ok(())
}
