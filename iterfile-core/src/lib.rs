//! Interchangeable strategies for reading a file one line at a time
//!
//! This crate offers four ways to consume the lines of a text source, each
//! with its own control-flow contract:
//!
//! - [`chan_read_lines`]: a producer thread feeding a bounded handoff queue
//! - [`for_each_line`]: a push-style callback that stops on the first error
//! - [`generate`]: a pull-style closure with one line of lookahead
//! - [`iterate`]: a pull-style object with `advance` / `line`
//!
//! Every strategy yields the same sequence of lines (terminators stripped)
//! and releases the file once it reaches a terminal state. Mid-stream read
//! failures are reported as [`Error::Scan`] by all four instead of being
//! mistaken for end of input.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod source;
pub mod strategy;

// Re-export key types
pub use config::{ReaderConfig, MAX_BUFFER_CAPACITY, MAX_HANDOFF_CAPACITY};
pub use error::{BoxError, Error, Result};
pub use source::{open_source, Source};
pub use strategy::{
    chan_read_lines, chan_read_lines_with, for_each_line, for_each_line_in, for_each_line_with,
    generate, generate_from, generate_with, iterate, iterate_with, spawn_producer, CancelHandle,
    IterState, LineIterator, LineReceiver, Lookahead, ProducerOutcome, ProducerSummary,
};
