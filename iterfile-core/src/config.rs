//! Configuration for the scanning facility and the channel strategy

use crate::error::{Error, Result};
use std::path::Path;

/// Default initial capacity of the buffered reader
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Default limit on a single line, terminator excluded
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Largest accepted reader buffer
pub const MAX_BUFFER_CAPACITY: usize = 256 * 1024 * 1024;

/// Largest accepted handoff queue, in lines
pub const MAX_HANDOFF_CAPACITY: usize = 1 << 20;

/// Reader configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Initial capacity of the buffered reader in bytes
    pub buffer_capacity: usize,
    /// Longest accepted line in bytes; longer lines are scan errors
    pub max_line_length: usize,
    /// Handoff queue capacity for the channel strategy (0 = rendezvous)
    pub handoff_capacity: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            handoff_capacity: 0,
        }
    }
}

impl ReaderConfig {
    /// Configuration whose channel producer may run `capacity` lines ahead
    pub fn buffered(capacity: usize) -> Self {
        Self {
            handoff_capacity: capacity,
            ..Self::default()
        }
    }

    /// Set the longest accepted line
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Set the initial reader buffer capacity
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    /// Pre-flight check run before any source is bound
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(Error::scan_init(path, "buffer capacity must be non-zero"));
        }
        if self.buffer_capacity > MAX_BUFFER_CAPACITY {
            return Err(Error::scan_init(
                path,
                format!(
                    "buffer capacity {} exceeds the {MAX_BUFFER_CAPACITY} byte limit",
                    self.buffer_capacity
                ),
            ));
        }
        if self.max_line_length == 0 {
            return Err(Error::scan_init(path, "max line length must be non-zero"));
        }
        if self.handoff_capacity > MAX_HANDOFF_CAPACITY {
            return Err(Error::scan_init(
                path,
                format!(
                    "handoff capacity {} exceeds the {MAX_HANDOFF_CAPACITY} line limit",
                    self.handoff_capacity
                ),
            ));
        }
        Ok(())
    }
}
