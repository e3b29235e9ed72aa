//! Output formatting module

use crate::profile::{Strategy, Tally};
use anyhow::Result;
use serde::{Serialize, Serializer};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Trait for output formatters
pub trait ReportFormatter {
    /// Write a complete profiling report
    fn format_report(&mut self, report: &Report) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One summary line, plus one line per file when several were read
    Text,
    /// JSON report with per-file tallies
    Json,
}

impl OutputFormat {
    /// Formatter for this format writing to `writer`
    pub fn formatter<'a, W: Write + 'a>(self, writer: W) -> Box<dyn ReportFormatter + 'a> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        }
    }
}

/// Tally for a single input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File as resolved from the command line
    pub path: PathBuf,
    /// Counts for this file alone
    #[serde(flatten)]
    pub tally: Tally,
}

/// Result of profiling one strategy over a set of files
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Strategy that read every file
    pub strategy: Strategy,
    /// Per-file tallies in resolution order
    pub files: Vec<FileReport>,
    /// Sum over all files
    pub total: Tally,
    /// Wall time spent reading
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl Report {
    /// Empty report for `strategy`
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            files: Vec::new(),
            total: Tally::default(),
            elapsed: Duration::ZERO,
        }
    }

    /// Record the tally of one file
    pub fn push(&mut self, path: PathBuf, tally: Tally) {
        self.total.merge(&tally);
        self.files.push(FileReport { path, tally });
    }
}

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_nanos() as f64 / 1_000_000.0)
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
