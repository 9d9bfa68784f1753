//! Clean command - removes staged binaries.

use anyhow::Result;

use binstage::clean;
use binstage::config::Config;

/// Execute the clean command.
pub fn cmd_clean(config: &Config) -> Result<()> {
    config.validate()?;
    clean::clean_staged(config)?;
    Ok(())
}
