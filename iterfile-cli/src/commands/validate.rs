//! Validate command implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        println!("Validating configuration: {}", self.config.display());

        let config = CliConfig::load(&self.config)?;
        let reader_config = config.reader_config();

        if let Err(e) = reader_config.validate(&self.config) {
            println!("✗ Configuration is invalid!");
            println!("  Error: {e}");
            return Err(CliError::ConfigError(e.to_string()).into());
        }

        println!("✓ Configuration is valid!");
        println!("  Default strategy: {}", config.profile.default_strategy.name());
        println!("  Max line length: {} bytes", reader_config.max_line_length);
        println!("  Handoff capacity: {}", reader_config.handoff_capacity);
        Ok(())
    }
}
