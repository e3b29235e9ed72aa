//! Pull-based iterator strategy

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::source::{open_source, Source};
use std::fs::File;
use std::io::Read;
use std::iter::FusedIterator;
use std::path::Path;

/// Open `path` and wrap it in a [`LineIterator`]
pub fn iterate<P: AsRef<Path>>(path: P) -> Result<LineIterator<File>> {
    iterate_with(path, &ReaderConfig::default())
}

/// Same as [`iterate`] with an explicit reader configuration
pub fn iterate_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<LineIterator<File>> {
    Ok(LineIterator::new(open_source(path, config)?))
}

/// Lifecycle of a [`LineIterator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// More lines may follow
    Ready,
    /// The source ended cleanly
    Exhausted,
    /// A scan error ended iteration
    Failed,
}

/// Stateful single-consumer line iterator
///
/// ```no_run
/// let mut lines = iterfile_core::iterate("notes.txt")?;
/// while lines.advance() {
///     println!("{}", lines.line());
/// }
/// lines.finish()?;
/// # Ok::<(), iterfile_core::Error>(())
/// ```
///
/// Once [`advance`](Self::advance) has returned `false` the iterator is
/// terminal: the source is closed and further calls return `false` again.
#[derive(Debug)]
pub struct LineIterator<R = File> {
    source: Source<R>,
    line: String,
    state: IterState,
    error: Option<Error>,
}

impl<R: Read> LineIterator<R> {
    /// Wrap an already bound source
    pub fn new(source: Source<R>) -> Self {
        Self {
            source,
            line: String::new(),
            state: IterState::Ready,
            error: None,
        }
    }

    /// Fetch the next line, returning whether one is available
    pub fn advance(&mut self) -> bool {
        if self.state != IterState::Ready {
            return false;
        }

        match self.source.read_line() {
            Ok(Some(line)) => {
                self.line = line;
                true
            }
            Ok(None) => {
                self.terminate(IterState::Exhausted);
                false
            }
            Err(e) => {
                self.error = Some(e);
                self.terminate(IterState::Failed);
                false
            }
        }
    }

    fn terminate(&mut self, state: IterState) {
        self.line.clear();
        self.state = state;
        self.source.close();
    }

    /// The line made available by the last successful `advance`
    ///
    /// Empty before the first call and after a terminal state.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Current lifecycle state
    pub fn state(&self) -> IterState {
        self.state
    }

    /// The scan error that ended iteration, if any
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Whether the underlying source has been released
    pub fn is_closed(&self) -> bool {
        self.source.is_closed()
    }

    /// Consume the iterator, surfacing a scan error if one ended it
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Yields each line, then a single `Err` if a scan error ended iteration.
///
/// Lines are moved out, so [`LineIterator::line`] stays empty when the
/// iterator is driven this way, and the error is taken rather than kept.
impl<R: Read> Iterator for LineIterator<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            return Some(Ok(std::mem::take(&mut self.line)));
        }
        self.error.take().map(Err)
    }
}

impl<R: Read> FusedIterator for LineIterator<R> {}
