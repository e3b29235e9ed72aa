//! Drive a line-reading strategy over one file and tally what it yields

use iterfile_core::{
    chan_read_lines_with, for_each_line_with, generate_with, iterate_with, ReaderConfig, Result,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::Path;

/// Line-reading strategy selectable with `--func`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Producer thread with a bounded handoff queue
    #[default]
    Channel,
    /// Push-style callback per line
    Callback,
    /// Stateful iterator with advance/line
    Iterator,
    /// Closure with one line of lookahead
    Generator,
}

impl Strategy {
    /// Every strategy, in listing order
    pub const ALL: [Strategy; 4] = [
        Strategy::Channel,
        Strategy::Callback,
        Strategy::Iterator,
        Strategy::Generator,
    ];

    /// Name accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Channel => "channel",
            Strategy::Callback => "callback",
            Strategy::Iterator => "iterator",
            Strategy::Generator => "generator",
        }
    }
}

/// Counts accumulated over the lines of one or more files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Lines read
    pub lines: u64,
    /// Whitespace-delimited words
    pub words: u64,
    /// Unicode scalar values
    pub chars: u64,
    /// UTF-8 bytes, terminators excluded
    pub bytes: u64,
}

impl Tally {
    /// Account for one line, terminator already stripped
    pub fn observe(&mut self, line: &str) {
        self.lines += 1;
        self.words += line.split_whitespace().count() as u64;
        self.chars += line.chars().count() as u64;
        self.bytes += line.len() as u64;
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &Tally) {
        self.lines += other.lines;
        self.words += other.words;
        self.chars += other.chars;
        self.bytes += other.bytes;
    }
}

/// Read every line of `path` with `strategy`
pub fn profile_path(strategy: Strategy, path: &Path, config: &ReaderConfig) -> Result<Tally> {
    log::debug!("Profiling {} with the {} strategy", path.display(), strategy.name());

    let mut tally = Tally::default();
    match strategy {
        Strategy::Channel => {
            for line in chan_read_lines_with(path, config)? {
                tally.observe(&line?);
            }
        }
        Strategy::Callback => {
            for_each_line_with(path, config, |line| {
                tally.observe(line);
                Ok::<_, Infallible>(())
            })?;
        }
        Strategy::Iterator => {
            let mut lines = iterate_with(path, config)?;
            while lines.advance() {
                tally.observe(lines.line());
            }
            lines.finish()?;
        }
        Strategy::Generator => {
            let (mut next, mut more) = generate_with(path, config)?;
            while more {
                let (line, has_more) = next()?;
                tally.observe(&line);
                more = has_more;
            }
        }
    }

    Ok(tally)
}
