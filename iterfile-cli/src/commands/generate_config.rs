//! Generate config command implementation

use crate::config::CliConfig;
use crate::error::CliResult;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::path::PathBuf;

const HEADER: &str = "\
# readline configuration
#
# [scan]
#   buffer_kb         initial reader buffer
#   max_line_kb       longest accepted line; longer lines fail the read
#   handoff_capacity  lines the channel producer may read ahead (0 = rendezvous)
#
# [profile]
#   default_strategy  channel | callback | iterator | generator

";

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> CliResult<()> {
        fs::write(&self.output, Self::template()?)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!("  Check it with: readline validate -c {}", self.output.display());
        Ok(())
    }

    /// Default configuration rendered as commented TOML
    pub fn template() -> CliResult<String> {
        let body = toml::to_string_pretty(&CliConfig::default())
            .context("Failed to render default configuration")?;
        Ok(format!("{HEADER}{body}"))
    }
}
