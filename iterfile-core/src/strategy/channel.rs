//! Producer/consumer channel strategy
//!
//! A dedicated thread owns the [`Source`] and publishes each line onto a
//! bounded handoff queue. With the default capacity of zero every send is a
//! rendezvous: the producer blocks until the consumer takes the line, so it
//! never reads ahead of what has been accepted.
//!
//! The producer is the only party that closes the queue. It releases the
//! source first and then drops its sender, so by the time the consumer
//! observes the end of the stream the file is already closed. Scan errors
//! travel over the same queue as a final `Err` item.
//!
//! The consumer can stop early with [`LineReceiver::cancel`] or a
//! [`CancelHandle`]; dropping the receiver cancels as well. The producer
//! notices while blocked on a send (or before its next read), closes the
//! source and exits.

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::source::{open_source, Source};
use crossbeam_channel::{bounded, select, Receiver, Sender, TryRecvError};
use log::{debug, trace};
use std::io::Read;
use std::path::Path;
use std::thread::{self, JoinHandle};

const PRODUCER_THREAD_NAME: &str = "iterfile-producer";

/// Open `path` and start a producer thread streaming its lines
///
/// Open and initialization errors are returned before any thread starts.
///
/// ```no_run
/// for line in iterfile_core::chan_read_lines("notes.txt")? {
///     println!("{}", line?);
/// }
/// # Ok::<(), iterfile_core::Error>(())
/// ```
pub fn chan_read_lines<P: AsRef<Path>>(path: P) -> Result<LineReceiver> {
    chan_read_lines_with(path, &ReaderConfig::default())
}

/// Same as [`chan_read_lines`] with an explicit reader configuration
pub fn chan_read_lines_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<LineReceiver> {
    spawn_producer(open_source(path, config)?, config)
}

/// Hand an already bound source to a new producer thread
///
/// `config` is validated again here since it need not be the one the source
/// was bound with.
pub fn spawn_producer<R>(source: Source<R>, config: &ReaderConfig) -> Result<LineReceiver>
where
    R: Read + Send + 'static,
{
    config.validate(source.label())?;
    let (line_tx, line_rx) = bounded(config.handoff_capacity);
    let (cancel_tx, cancel_rx) = bounded(1);

    debug!(
        "starting producer for {} (handoff capacity {})",
        source.label().display(),
        config.handoff_capacity
    );
    let producer = thread::Builder::new()
        .name(PRODUCER_THREAD_NAME.to_string())
        .spawn(move || produce(source, line_tx, cancel_rx))
        .map_err(Error::Spawn)?;

    Ok(LineReceiver {
        lines: line_rx,
        cancel: CancelHandle { signal: cancel_tx },
        producer: Some(producer),
    })
}

/// How a producer thread finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerOutcome {
    /// Every line was delivered
    Exhausted,
    /// A scan error was delivered as the final item
    Failed,
    /// The consumer raised the cancellation signal
    Cancelled,
    /// The consumer went away without cancelling
    Abandoned,
}

/// Final report of a producer thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerSummary {
    /// Lines handed over to the queue
    pub lines_sent: usize,
    /// Why the producer stopped
    pub outcome: ProducerOutcome,
}

/// Cloneable handle that asks a producer to stop
#[derive(Debug, Clone)]
pub struct CancelHandle {
    signal: Sender<()>,
}

impl CancelHandle {
    /// Raise the cancellation signal; repeated calls are harmless
    pub fn cancel(&self) {
        // A full slot means the signal is already pending.
        let _ = self.signal.try_send(());
    }
}

/// Receiving end of the channel strategy
///
/// Iterating yields `Ok(line)` in file order, at most one trailing
/// `Err(Error::Scan { .. })`, and ends when the producer closes the queue.
#[derive(Debug)]
pub struct LineReceiver {
    lines: Receiver<Result<String>>,
    cancel: CancelHandle,
    producer: Option<JoinHandle<ProducerSummary>>,
}

impl LineReceiver {
    /// Block until the next item arrives; `None` once the queue is closed
    pub fn recv(&self) -> Option<Result<String>> {
        self.lines.recv().ok()
    }

    /// A handle that can cancel this producer from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stop the producer and wait for it to release the source
    ///
    /// If the producer already finished, its original outcome is reported.
    pub fn cancel(mut self) -> ProducerSummary {
        self.cancel.cancel();

        // The queue stays open while joining so a blocked send resolves
        // through the cancellation arm rather than a disconnect.
        match self.producer.take().map(JoinHandle::join) {
            Some(Ok(summary)) => summary,
            Some(Err(panic)) => std::panic::resume_unwind(panic),
            None => ProducerSummary {
                lines_sent: 0,
                outcome: ProducerOutcome::Cancelled,
            },
        }
    }
}

impl Iterator for LineReceiver {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

impl Drop for LineReceiver {
    fn drop(&mut self) {
        if self.producer.is_some() {
            trace!("line receiver dropped, signalling producer");
            self.cancel.cancel();
        }
    }
}

fn produce<R: Read>(
    mut source: Source<R>,
    lines: Sender<Result<String>>,
    cancel: Receiver<()>,
) -> ProducerSummary {
    let mut lines_sent = 0;

    let outcome = loop {
        match cancel.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break ProducerOutcome::Cancelled,
            Err(TryRecvError::Empty) => {}
        }

        let item = match source.read_line() {
            Ok(Some(line)) => Ok(line),
            Ok(None) => break ProducerOutcome::Exhausted,
            Err(e) => Err(e),
        };

        let failed = item.is_err();
        if failed {
            source.close();
        }

        select! {
            send(lines, item) -> sent => match sent {
                Ok(()) if failed => break ProducerOutcome::Failed,
                Ok(()) => lines_sent += 1,
                Err(_) => break ProducerOutcome::Abandoned,
            },
            recv(cancel) -> _ => break ProducerOutcome::Cancelled,
        }
    };

    // The source goes first so a consumer that sees the queue close can
    // rely on the file being released.
    source.close();
    drop(lines);

    debug!(
        "producer for {} finished: {:?} after {} lines",
        source.label().display(),
        outcome,
        lines_sent
    );
    ProducerSummary {
        lines_sent,
        outcome,
    }
}
