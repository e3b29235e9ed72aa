//! Shared helpers for the integration tests

#![allow(dead_code)]

use iterfile_core::{
    chan_read_lines_with, for_each_line_with, generate_with, iterate_with, ReaderConfig, Result,
};
use std::convert::Infallible;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Every strategy, driven to completion by its own contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Channel,
    Callback,
    Generator,
    Iterator,
}

pub const ALL_KINDS: [Kind; 4] = [Kind::Channel, Kind::Callback, Kind::Generator, Kind::Iterator];

/// Path to a checked-in fixture
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Collect every line of `path` through the given strategy
pub fn collect_lines(kind: Kind, path: &Path) -> Result<Vec<String>> {
    collect_lines_with(kind, path, &ReaderConfig::default())
}

pub fn collect_lines_with(kind: Kind, path: &Path, config: &ReaderConfig) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    match kind {
        Kind::Channel => {
            for line in chan_read_lines_with(path, config)? {
                lines.push(line?);
            }
        }
        Kind::Callback => {
            for_each_line_with(path, config, |line| {
                lines.push(line.to_string());
                Ok::<_, Infallible>(())
            })?;
        }
        Kind::Generator => {
            let (mut next, mut more) = generate_with(path, config)?;
            while more {
                let (line, has_more) = next()?;
                lines.push(line);
                more = has_more;
            }
        }
        Kind::Iterator => {
            let mut it = iterate_with(path, config)?;
            while it.advance() {
                lines.push(it.line().to_string());
            }
            it.finish()?;
        }
    }
    Ok(lines)
}

/// Line, whitespace-token and character totals over a line sequence
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub lines: usize,
    pub words: usize,
    pub chars: usize,
}

impl Counts {
    pub fn of(lines: &[String]) -> Self {
        lines.iter().fold(Self::default(), |acc, line| Self {
            lines: acc.lines + 1,
            words: acc.words + line.split_whitespace().count(),
            chars: acc.chars + line.chars().count(),
        })
    }
}

/// Deterministic word soup in the shape of the benchmark fixtures
pub fn word_lines(count: usize, seed: u64) -> Vec<String> {
    const WORDS: [&str; 5] = ["fizz", "buzz", "foo", "bar", "baz"];
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % bound
    };

    (0..count)
        .map(|_| {
            let words = 20 + next(81) as usize;
            (0..words)
                .map(|_| WORDS[next(WORDS.len() as u64) as usize])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Write `lines` newline-terminated into `dir/name`
pub fn write_lines(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

/// Reader that records when it is dropped and how often it is read
#[derive(Debug)]
pub struct TrackedReader<R> {
    inner: R,
    closed: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
}

/// Observer side of a [`TrackedReader`]
#[derive(Debug, Clone)]
pub struct Tracker {
    closed: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
}

impl Tracker {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Poll until the reader is dropped or `timeout` elapses
    pub fn wait_closed(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.is_closed() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        self.is_closed()
    }
}

pub fn tracked<R: Read>(inner: R) -> (TrackedReader<R>, Tracker) {
    let closed = Arc::new(AtomicBool::new(false));
    let reads = Arc::new(AtomicUsize::new(0));
    let tracker = Tracker {
        closed: Arc::clone(&closed),
        reads: Arc::clone(&reads),
    };
    (
        TrackedReader {
            inner,
            closed,
            reads,
        },
        tracker,
    )
}

impl<R: Read> Read for TrackedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(buf)
    }
}

impl<R> Drop for TrackedReader<R> {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Reader handing out one pre-split chunk per `read` call
#[derive(Debug)]
pub struct ChunkedReader {
    chunks: std::collections::VecDeque<Vec<u8>>,
}

impl ChunkedReader {
    pub fn lines(lines: &[&str]) -> Self {
        Self {
            chunks: lines
                .iter()
                .map(|line| format!("{line}\n").into_bytes())
                .collect(),
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        assert!(chunk.len() <= buf.len(), "test chunk larger than read buffer");
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

/// Reader that fails with an I/O error once its data runs out
#[derive(Debug)]
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn after(data: &str) -> Self {
        Self {
            data: io::Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::Other, "device unplugged")),
            n => Ok(n),
        }
    }
}
