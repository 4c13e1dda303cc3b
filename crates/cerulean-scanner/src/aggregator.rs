//! Deduplicating aggregator.
//!
//! The `Aggregator` is the only owner of the seen-set. It is moved into its
//! task by value, so nothing else can reach the set and no lock guards it.
//! Names are emitted in first-seen order, which depends on worker scheduling
//! and varies between runs.

use crate::tracker::StageGuard;
use cerulean_core::CleanName;
use std::collections::HashSet;
use std::io::{self, Write};
use tokio::sync::mpsc;

/// Destination for unique names.
pub trait NameSink: Send {
    /// Emit one name that has not been emitted before.
    ///
    /// # Errors
    /// Returns error if the underlying output is gone.
    fn emit(&mut self, name: &CleanName) -> io::Result<()>;
}

impl NameSink for Vec<CleanName> {
    fn emit(&mut self, name: &CleanName) -> io::Result<()> {
        self.push(name.clone());
        Ok(())
    }
}

impl NameSink for mpsc::UnboundedSender<CleanName> {
    fn emit(&mut self, name: &CleanName) -> io::Result<()> {
        self.send(name.clone())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "name receiver dropped"))
    }
}

/// Writes one name per line, flushing after each so output is live.
#[derive(Debug)]
pub struct LineSink<W> {
    writer: W,
}

impl<W: Write + Send> LineSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> NameSink for LineSink<W> {
    fn emit(&mut self, name: &CleanName) -> io::Result<()> {
        writeln!(self.writer, "{name}")?;
        self.writer.flush()
    }
}

/// Aggregator counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOutcome {
    /// Names received from workers, repeats included
    pub received: usize,
    /// Distinct names emitted
    pub emitted: usize,
    /// Repeats discarded
    pub duplicates: usize,
}

/// Single consumer that drops repeated names.
pub struct Aggregator<S> {
    seen: HashSet<CleanName>,
    sink: S,
    sink_failed: bool,
    outcome: AggregateOutcome,
}

impl<S: NameSink> Aggregator<S> {
    /// Create an aggregator emitting into `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            seen: HashSet::new(),
            sink,
            sink_failed: false,
            outcome: AggregateOutcome::default(),
        }
    }

    /// Offer one name. Returns `true` if it was new.
    pub fn offer(&mut self, name: CleanName) -> bool {
        self.outcome.received += 1;

        if self.seen.contains(&name) {
            self.outcome.duplicates += 1;
            return false;
        }

        if !self.sink_failed {
            if let Err(e) = self.sink.emit(&name) {
                tracing::error!("Failed to emit name, output disabled: {}", e);
                self.sink_failed = true;
            }
        }
        self.seen.insert(name);
        self.outcome.emitted += 1;
        true
    }

    /// Number of distinct names seen so far.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    /// Consume names until the channel is closed and drained.
    ///
    /// Returns the counters and hands the sink back to the caller.
    pub async fn run(
        mut self,
        mut input: mpsc::UnboundedReceiver<CleanName>,
        guard: StageGuard,
    ) -> (AggregateOutcome, S) {
        while let Some(name) = input.recv().await {
            self.offer(name);
        }

        tracing::debug!(
            received = self.outcome.received,
            emitted = self.outcome.emitted,
            "aggregator finished"
        );
        guard.finish();
        (self.outcome, self.sink)
    }
}
