//! Line-production strategies
//!
//! Each strategy owns one [`Source`](crate::Source) and exposes a different
//! control-flow contract over the same line sequence:
//!
//! - [`channel`]: a background producer feeding a bounded handoff queue
//! - [`callback`]: push-style, one call per line, stops on the first error
//! - [`generator`]: pull-style closure with a one-line lookahead
//! - [`iterator`]: pull-style object with `advance` / `line`
//!
//! All four produce identical sequences and close the source once they
//! reach a terminal state.

pub mod callback;
pub mod channel;
pub mod generator;
pub mod iterator;

pub use callback::{for_each_line, for_each_line_in, for_each_line_with};
pub use channel::{
    chan_read_lines, chan_read_lines_with, spawn_producer, CancelHandle, LineReceiver,
    ProducerOutcome, ProducerSummary,
};
pub use generator::{generate, generate_from, generate_with, Lookahead};
pub use iterator::{iterate, iterate_with, IterState, LineIterator};
