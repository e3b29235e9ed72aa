//! Count command implementation

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::input::resolve_patterns;
use crate::output::{OutputFormat, Report};
use crate::profile::{profile_path, Strategy};
use crate::progress::ProgressReporter;
use anyhow::Context;
use clap::Args;
use iterfile_core::ReaderConfig;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the count command
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Input files or patterns (supports glob)
    #[arg(value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Line-reading strategy (default: from config, else channel)
    #[arg(short = 'f', long = "func", value_enum)]
    pub strategy: Option<Strategy>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "READLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Lines the channel producer may read ahead (overrides config)
    #[arg(long, value_name = "N")]
    pub handoff: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CountArgs {
    /// Execute the count command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging();

        log::info!("Starting line count");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let strategy = self.strategy.unwrap_or(config.profile.default_strategy);
        let reader_config = self.reader_config(&config);

        let files = resolve_patterns(&self.input)?;
        log::info!(
            "Reading {} file(s) with the {} strategy",
            files.len(),
            strategy.name()
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let mut report = Report::new(strategy);
        let start = Instant::now();
        for path in files {
            let tally = match profile_path(strategy, &path, &reader_config) {
                Ok(tally) => tally,
                Err(e) => {
                    progress.abandon();
                    return Err(e).with_context(|| format!("Failed to read {}", path.display()));
                }
            };
            progress.file_completed(&path.display().to_string());
            report.push(path, tally);
        }
        report.elapsed = start.elapsed();
        progress.finish();

        log::info!(
            "Read {} lines in {:?}",
            report.total.lines,
            report.elapsed
        );

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                self.format
                    .formatter(BufWriter::new(file))
                    .format_report(&report)
            }
            None => self.format.formatter(io::stdout().lock()).format_report(&report),
        }
    }

    fn reader_config(&self, config: &CliConfig) -> ReaderConfig {
        let mut reader_config = config.reader_config();
        if let Some(capacity) = self.handoff {
            reader_config.handoff_capacity = capacity;
        }
        reader_config
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // An embedding process may already have installed a logger.
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
