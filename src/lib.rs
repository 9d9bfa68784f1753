//! binstage library exports.
//!
//! The binary in `main.rs` is a thin clap front end over these modules; the
//! integration tests in `tests/` drive them directly.

pub mod clean;
pub mod collect;
pub mod config;
pub mod error;
pub mod preflight;

pub use collect::{collect, collect_to, CollectReport, StagedFile};
pub use config::Config;
pub use error::StageError;
