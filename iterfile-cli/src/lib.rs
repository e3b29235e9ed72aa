//! iterfile CLI library
//!
//! This library provides the `readline` command, which profiles the
//! line-reading strategies of `iterfile-core` over a set of files.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod profile;
pub mod progress;

pub use error::{exit_code, CliError, CliResult};
pub use profile::{profile_path, Strategy, Tally};
