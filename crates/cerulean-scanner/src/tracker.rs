//! Stage completion tracking.
//!
//! Every pipeline stage holds a [`StageGuard`] and signals through it exactly
//! once when it has permanently stopped producing. The driver counts these
//! signals on a [`CompletionTracker`] to decide when a channel's writers are
//! all gone and the channel can be closed.
//!
//! A guard that is dropped without [`StageGuard::finish`] (a panicking task)
//! still signals, so the driver cannot wait forever on a dead stage.

use tokio::sync::mpsc;

/// Completion token. Carries no data; only the count matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSignal;

/// Counts completion signals for one pipeline stage.
#[derive(Debug)]
pub struct CompletionTracker {
    stage: &'static str,
    sender: mpsc::UnboundedSender<StageSignal>,
    receiver: mpsc::UnboundedReceiver<StageSignal>,
    issued: usize,
    received: usize,
}

impl CompletionTracker {
    /// Create a tracker for the named stage.
    #[must_use]
    pub fn new(stage: &'static str) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            stage,
            sender,
            receiver,
            issued: 0,
            received: 0,
        }
    }

    /// Hand out a guard to one stage instance.
    pub fn guard(&mut self) -> StageGuard {
        self.issued += 1;
        StageGuard {
            sender: Some(self.sender.clone()),
        }
    }

    /// Number of guards handed out so far.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Wait until `count` more signals have arrived.
    ///
    /// Returns early only if more signals are requested than guards are
    /// outstanding, in which case the shortfall could never arrive.
    pub async fn wait_for(&mut self, count: usize) -> usize {
        let outstanding = self.issued - self.received;
        if count > outstanding {
            tracing::warn!(
                stage = self.stage,
                requested = count,
                outstanding,
                "waiting for more completion signals than guards issued"
            );
        }

        let target = count.min(outstanding);
        let mut seen = 0;
        while seen < target {
            // The tracker owns a sender, so recv only ends on a signal
            if self.receiver.recv().await.is_none() {
                break;
            }
            seen += 1;
        }
        self.received += seen;
        tracing::debug!(stage = self.stage, signals = seen, "stage completed");
        seen
    }
}

/// Signals completion of one stage instance exactly once.
#[derive(Debug)]
#[must_use = "dropping a guard immediately signals completion"]
pub struct StageGuard {
    sender: Option<mpsc::UnboundedSender<StageSignal>>,
}

impl StageGuard {
    /// Signal completion.
    pub fn finish(mut self) {
        self.signal();
    }

    fn signal(&mut self) {
        if let Some(sender) = self.sender.take() {
            // Tracker already gone means nobody is waiting
            let _ = sender.send(StageSignal);
        }
    }
}

impl Drop for StageGuard {
    fn drop(&mut self) {
        self.signal();
    }
}
