//! Title-processing workers.

use crate::extract::extract_name;
use crate::tracker::StageGuard;
use cerulean_core::{CleanName, RawTitle};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Consumer side of the hand-off queue, shared by all workers.
///
/// Whichever worker holds the lock receives the next title, so every title
/// goes to exactly one worker.
pub type SharedQueue = Arc<Mutex<mpsc::Receiver<RawTitle>>>;

/// Per-worker counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerOutcome {
    /// Titles taken off the queue
    pub processed: usize,
    /// Names forwarded to the aggregator
    pub accepted: usize,
    /// Titles without a name separator
    pub rejected: usize,
}

impl std::ops::AddAssign for WorkerOutcome {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
    }
}

/// Drain the hand-off queue until it is closed and empty.
///
/// Each extracted name is sent to `names`. The worker drops its `names`
/// sender before signalling through `guard`.
pub async fn run_worker(
    id: usize,
    queue: SharedQueue,
    names: mpsc::UnboundedSender<CleanName>,
    guard: StageGuard,
) -> WorkerOutcome {
    let mut outcome = WorkerOutcome::default();
    let mut aggregator_gone = false;

    loop {
        let next = queue.lock().await.recv().await;
        let Some(title) = next else {
            break;
        };
        outcome.processed += 1;

        let Some(name) = extract_name(&title) else {
            outcome.rejected += 1;
            continue;
        };

        // Keep draining even without an aggregator so the fetcher never stalls
        if aggregator_gone {
            continue;
        }
        if names.send(name).is_err() {
            tracing::warn!(worker = id, "aggregator stopped; discarding further names");
            aggregator_gone = true;
            continue;
        }
        outcome.accepted += 1;
    }

    drop(names);
    tracing::debug!(
        worker = id,
        processed = outcome.processed,
        accepted = outcome.accepted,
        "worker finished"
    );
    guard.finish();
    outcome
}
