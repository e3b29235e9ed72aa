//! Plain text output formatter

use super::{Report, ReportFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn format_report(&mut self, report: &Report) -> Result<()> {
        if report.files.len() > 1 {
            for file in &report.files {
                writeln!(
                    self.writer,
                    "{}: {} lines, {} words, {} characters",
                    file.path.display(),
                    file.tally.lines,
                    file.tally.words,
                    file.tally.chars
                )?;
            }
        }
        writeln!(
            self.writer,
            "Counted {} characters in {:?}",
            report.total.chars, report.elapsed
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
