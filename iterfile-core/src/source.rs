//! Source opener and the line-scanning cursor bound to it
//!
//! A [`Source`] owns a buffered reader and hands out one decoded line per
//! call. Lines end at `\n`; a single `\r` before the terminator is dropped,
//! a final unterminated line is still produced, and an empty trailing
//! segment is not. Every strategy in [`crate::strategy`] owns exactly one
//! source and closes it when it reaches a terminal state.

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Open `path` for reading and bind a scan cursor to it
///
/// Fails with [`Error::Open`] when the file cannot be opened and with
/// [`Error::ScanInit`] when the path is not a regular readable file or the
/// configuration is unusable.
pub fn open_source<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Source<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata = file
        .metadata()
        .map_err(|e| Error::scan_init(path, format!("cannot read metadata: {e}")))?;
    if metadata.is_dir() {
        return Err(Error::scan_init(path, "path is a directory"));
    }

    debug!("opened {} ({} bytes)", path.display(), metadata.len());
    Source::from_reader(file, path, config)
}

/// A readable byte stream bound to a line scanner
pub struct Source<R> {
    label: PathBuf,
    reader: Option<BufReader<R>>,
    max_line_length: usize,
    lines_read: usize,
}

impl<R: Read> Source<R> {
    /// Bind an arbitrary reader to a scan cursor
    ///
    /// `label` names the source in errors and log output.
    pub fn from_reader<L: Into<PathBuf>>(reader: R, label: L, config: &ReaderConfig) -> Result<Self> {
        let label = label.into();
        config.validate(&label)?;

        Ok(Self {
            reader: Some(BufReader::with_capacity(config.buffer_capacity, reader)),
            label,
            max_line_length: config.max_line_length,
            lines_read: 0,
        })
    }

    /// Advance the cursor by one line
    ///
    /// Returns `Ok(None)` at the end of input and on every call after the
    /// source has been closed.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let line = self.lines_read + 1;
        let mut buf = Vec::new();
        let read = read_terminated(reader, &mut buf, self.max_line_length)
            .map_err(|source| Error::Scan { line, source })?;
        if read == 0 {
            return Ok(None);
        }

        strip_terminator(&mut buf);
        let text = String::from_utf8(buf).map_err(|e| Error::Scan {
            line,
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;

        self.lines_read = line;
        Ok(Some(text))
    }

    /// Release the underlying reader
    ///
    /// Returns `true` only for the call that actually closed it.
    pub fn close(&mut self) -> bool {
        match self.reader.take() {
            Some(reader) => {
                drop(reader);
                debug!(
                    "closed {} after {} lines",
                    self.label.display(),
                    self.lines_read
                );
                true
            }
            None => false,
        }
    }

    /// Whether the reader has been released
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R> Source<R> {
    /// Number of lines successfully read so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Path or label this source was bound with
    pub fn label(&self) -> &Path {
        &self.label
    }
}

impl<R> fmt::Debug for Source<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("label", &self.label)
            .field("open", &self.reader.is_some())
            .field("lines_read", &self.lines_read)
            .finish()
    }
}

/// Read up to and including the next `\n`, enforcing the line limit
///
/// Returns the number of bytes consumed; zero means end of input.
fn read_terminated<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> io::Result<usize> {
    let mut total = 0;
    loop {
        let (done, used) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                (true, 0)
            } else {
                match available.iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        buf.extend_from_slice(&available[..=i]);
                        (true, i + 1)
                    }
                    None => {
                        buf.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            }
        };
        reader.consume(used);
        total += used;

        // A pending `\r` may still turn out to be part of the terminator.
        if content_len(buf) > limit && !(buf.last() == Some(&b'\r') && buf.len() - 1 <= limit) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line exceeds {limit} bytes"),
            ));
        }
        if done {
            return Ok(total);
        }
    }
}

fn content_len(buf: &[u8]) -> usize {
    let mut len = buf.len();
    if len > 0 && buf[len - 1] == b'\n' {
        len -= 1;
        if len > 0 && buf[len - 1] == b'\r' {
            len -= 1;
        }
    }
    len
}

fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}
