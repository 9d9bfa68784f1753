//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `collect` - Stage allow-listed binaries
//! - `clean` - Remove staged binaries
//! - `preflight` - Run preflight checks
//! - `show` - Display information

mod clean;
mod collect;
mod preflight;
pub mod show;

pub use clean::cmd_clean;
pub use collect::cmd_collect;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
