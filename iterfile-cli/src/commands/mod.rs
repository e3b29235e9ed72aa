//! CLI command implementations

use crate::error::CliResult;
use crate::output::OutputFormat;
use crate::profile::Strategy;
use clap::{Subcommand, ValueEnum};

pub mod count;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read files line by line with one strategy and report the counts
    ///
    /// The summary counts Unicode characters, not bytes. The JSON report
    /// carries both `chars` and `bytes`.
    Count(count::CountArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a configuration file populated with the defaults
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check that a configuration file is usable
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List available line-reading strategies
    Strategies,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Count(args) => args.execute(),
            Commands::List { subcommand } => {
                for name in subcommand.names() {
                    println!("{name}");
                }
                Ok(())
            }
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Names printed by the list command
    pub fn names(self) -> Vec<String> {
        match self {
            ListCommands::Strategies => Strategy::ALL.iter().map(|s| s.name().to_string()).collect(),
            ListCommands::Formats => OutputFormat::value_variants()
                .iter()
                .filter_map(|f| f.to_possible_value())
                .map(|v| v.get_name().to_string())
                .collect(),
        }
    }
}
