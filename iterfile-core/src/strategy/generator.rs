//! Pull-based generator strategy
//!
//! [`generate`] returns a closure together with an initial "has more" flag.
//! The first line is read eagerly while the generator is built; every call
//! then hands back the line fetched by the previous step and reads one line
//! ahead to decide whether another call is worthwhile.

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::source::{open_source, Source};
use log::debug;
use std::io::Read;
use std::path::Path;

/// Open `path` and build a line generator over it
///
/// ```no_run
/// let (mut next, mut more) = iterfile_core::generate("notes.txt")?;
/// while more {
///     let (line, has_more) = next()?;
///     println!("{line}");
///     more = has_more;
/// }
/// # Ok::<(), iterfile_core::Error>(())
/// ```
pub fn generate<P: AsRef<Path>>(path: P) -> Result<(impl FnMut() -> Result<(String, bool)>, bool)> {
    generate_with(path, &ReaderConfig::default())
}

/// Same as [`generate`] with an explicit reader configuration
pub fn generate_with<P: AsRef<Path>>(
    path: P,
    config: &ReaderConfig,
) -> Result<(impl FnMut() -> Result<(String, bool)>, bool)> {
    generate_from(open_source(path, config)?)
}

/// Build a generator over an already bound source
///
/// A scan error on the eager first read is returned here instead of being
/// folded into an empty sequence.
pub fn generate_from<R: Read>(
    source: Source<R>,
) -> Result<(impl FnMut() -> Result<(String, bool)>, bool)> {
    let mut state = Lookahead::prime(source)?;
    let has_more = state.has_more();
    Ok((move || state.pull(), has_more))
}

/// One-line lookahead over a [`Source`]
#[derive(Debug)]
pub struct Lookahead<R> {
    source: Source<R>,
    pending: Option<String>,
    deferred: Option<Error>,
}

impl<R: Read> Lookahead<R> {
    /// Read the first line ahead of any request
    pub fn prime(mut source: Source<R>) -> Result<Self> {
        let pending = match source.read_line() {
            Ok(pending) => pending,
            Err(e) => {
                source.close();
                return Err(e);
            }
        };
        if pending.is_none() {
            source.close();
        }

        debug!(
            "primed generator over {} (empty: {})",
            source.label().display(),
            pending.is_none()
        );
        Ok(Self {
            source,
            pending,
            deferred: None,
        })
    }

    /// Whether the next [`pull`](Self::pull) will produce a line or an error
    pub fn has_more(&self) -> bool {
        self.pending.is_some() || self.deferred.is_some()
    }

    /// Return the buffered line and refill the lookahead
    ///
    /// A scan error hit while refilling is held back so the buffered line is
    /// not lost; it is returned by the following call. Once nothing is left
    /// every call yields `Ok((String::new(), false))`.
    pub fn pull(&mut self) -> Result<(String, bool)> {
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }
        let Some(current) = self.pending.take() else {
            return Ok((String::new(), false));
        };

        match self.source.read_line() {
            Ok(Some(next)) => self.pending = Some(next),
            Ok(None) => {
                self.source.close();
            }
            Err(e) => {
                self.source.close();
                self.deferred = Some(e);
            }
        }

        Ok((current, self.has_more()))
    }

    /// Whether the underlying source has been released
    pub fn is_closed(&self) -> bool {
        self.source.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(data: &'static [u8]) -> Source<Cursor<&'static [u8]>> {
        Source::from_reader(Cursor::new(data), "memory", &ReaderConfig::default()).unwrap()
    }

    #[test]
    fn test_generator_sequence() {
        let (mut next, mut more) = generate_from(source(b"a\nbb\nccc\n")).unwrap();
        let mut lines = Vec::new();
        while more {
            let (line, has_more) = next().unwrap();
            lines.push(line);
            more = has_more;
        }
        assert_eq!(lines, vec!["a", "bb", "ccc"]);

        // Exhausted generators keep answering with nothing
        assert_eq!(next().unwrap(), (String::new(), false));
    }

    #[test]
    fn test_empty_source_has_nothing() {
        let (mut next, more) = generate_from(source(b"")).unwrap();
        assert!(!more);
        assert_eq!(next().unwrap(), (String::new(), false));
    }

    #[test]
    fn test_lookahead_closes_on_last_line() {
        let mut state = Lookahead::prime(source(b"one\ntwo\n")).unwrap();
        assert!(!state.is_closed());

        assert_eq!(state.pull().unwrap(), ("one".to_string(), true));
        assert!(!state.is_closed());
        assert_eq!(state.pull().unwrap(), ("two".to_string(), false));
        assert!(state.is_closed());
    }

    #[test]
    fn test_first_read_error_is_surfaced() {
        let result = generate_from(source(b"\xff\n"));
        match result {
            Err(Error::Scan { line, .. }) => assert_eq!(line, 1),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected the first scan error"),
        }
    }

    #[test]
    fn test_later_error_is_deferred_one_call() {
        let mut state = Lookahead::prime(source(b"ok\n\xff\n")).unwrap();

        assert_eq!(state.pull().unwrap(), ("ok".to_string(), true));
        assert!(state.is_closed());
        assert!(state.pull().unwrap_err().is_scan());
        assert_eq!(state.pull().unwrap(), (String::new(), false));
    }
}
