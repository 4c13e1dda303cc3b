//! Pipeline driver wiring the fetch, worker and aggregate stages together.
//!
//! Shutdown follows a fixed order. The hand-off queue is closed only after
//! the fetcher has signalled, the name channel only after every worker has
//! signalled, and the run returns only after the aggregator has signalled.
//! The driver keeps its own sender on both channels, so neither can close
//! before the driver decides it should.

use crate::aggregator::{AggregateOutcome, Aggregator, NameSink};
use crate::error::{Result, ScanError};
use crate::fetcher::{FetchOutcome, Fetcher};
use crate::tracker::CompletionTracker;
use crate::worker::{run_worker, SharedQueue, WorkerOutcome};
use cerulean_core::{CleanName, PipelineConfig, RawTitle, TargetOrganization};
use cerulean_search::{dork_query, SearchProvider};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Fetch stage summary
    pub fetch: FetchOutcome,
    /// Worker counters summed over the pool
    pub workers: WorkerOutcome,
    /// Aggregator counters
    pub aggregate: AggregateOutcome,
    /// Size of the worker pool
    pub worker_count: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl PipelineReport {
    /// Number of distinct names emitted.
    #[must_use]
    pub fn unique_names(&self) -> usize {
        self.aggregate.emitted
    }
}

/// Live stream of unique names from a pipeline running in the background.
pub struct NameStream {
    /// Names in first-seen order; closes when the run ends
    pub names: mpsc::UnboundedReceiver<CleanName>,
    /// Resolves to the run report once every stage has finished
    pub handle: JoinHandle<Result<PipelineReport>>,
}

/// Orchestrates one fetcher, a worker pool and one aggregator.
#[derive(Clone)]
pub struct ScanPipeline {
    provider: Arc<dyn SearchProvider>,
    threads: usize,
    page_limit: u32,
    queue_capacity: Option<usize>,
    cancel: CancellationToken,
}

impl ScanPipeline {
    /// Create a pipeline with default settings.
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self::from_config(provider, &PipelineConfig::default())
    }

    /// Create a pipeline from configuration.
    #[must_use]
    pub fn from_config(provider: Arc<dyn SearchProvider>, config: &PipelineConfig) -> Self {
        Self {
            provider,
            threads: config.threads,
            page_limit: config.page_limit,
            queue_capacity: config.queue_capacity,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the number of workers.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the maximum number of result pages.
    #[must_use]
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Set the hand-off queue capacity. Defaults to the worker count.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Use an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the fetch stage when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn validate(&self) -> Result<usize> {
        if self.threads == 0 {
            return Err(ScanError::InvalidConfig(
                "thread count must be at least 1".to_string(),
            ));
        }
        if self.page_limit == 0 {
            return Err(ScanError::InvalidConfig(
                "page limit must be at least 1".to_string(),
            ));
        }
        let capacity = self.queue_capacity.unwrap_or(self.threads);
        if capacity == 0 {
            return Err(ScanError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        Ok(capacity)
    }

    /// Run the pipeline for `target`, emitting unique names into `sink`.
    ///
    /// Returns once every stage has finished, along with the sink.
    pub async fn run<S>(&self, target: &TargetOrganization, sink: S) -> Result<(PipelineReport, S)>
    where
        S: NameSink + 'static,
    {
        self.run_query(dork_query(target), sink).await
    }

    /// Run the pipeline with a prebuilt query string.
    pub async fn run_query<S>(&self, query: String, sink: S) -> Result<(PipelineReport, S)>
    where
        S: NameSink + 'static,
    {
        let capacity = self.validate()?;
        let started = Instant::now();

        tracing::info!(
            threads = self.threads,
            page_limit = self.page_limit,
            queue_capacity = capacity,
            "starting pipeline"
        );

        let mut fetch_done = CompletionTracker::new("fetcher");
        let mut workers_done = CompletionTracker::new("workers");
        let mut aggregate_done = CompletionTracker::new("aggregator");

        let (queue_tx, queue_rx) = mpsc::channel::<RawTitle>(capacity);
        let (names_tx, names_rx) = mpsc::unbounded_channel::<CleanName>();

        let fetcher = Fetcher::new(Arc::clone(&self.provider), query, self.page_limit);
        let fetch_handle = tokio::spawn(fetcher.run(
            queue_tx.clone(),
            self.cancel.clone(),
            fetch_done.guard(),
        ));

        let shared_queue: SharedQueue = Arc::new(Mutex::new(queue_rx));
        let worker_handles: Vec<_> = (0..self.threads)
            .map(|id| {
                tokio::spawn(run_worker(
                    id,
                    Arc::clone(&shared_queue),
                    names_tx.clone(),
                    workers_done.guard(),
                ))
            })
            .collect();
        // Only workers may hold the receiver; if they all die the fetcher must see it
        drop(shared_queue);

        let aggregate_handle =
            tokio::spawn(Aggregator::new(sink).run(names_rx, aggregate_done.guard()));

        // Fetcher done, close the hand-off queue
        fetch_done.wait_for(1).await;
        drop(queue_tx);

        // All workers done, close the name channel
        workers_done.wait_for(self.threads).await;
        drop(names_tx);

        aggregate_done.wait_for(1).await;

        let fetch = fetch_handle.await.map_err(|source| ScanError::StageJoin {
            stage: "fetcher",
            source,
        })?;

        let mut workers = WorkerOutcome::default();
        for handle in worker_handles {
            workers += handle.await.map_err(|source| ScanError::StageJoin {
                stage: "worker",
                source,
            })?;
        }

        let (aggregate, sink) = aggregate_handle
            .await
            .map_err(|source| ScanError::StageJoin {
                stage: "aggregator",
                source,
            })?;

        let report = PipelineReport {
            fetch,
            workers,
            aggregate,
            worker_count: self.threads,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            unique = report.unique_names(),
            pages = report.fetch.pages_fetched,
            reason = %report.fetch.stop_reason,
            elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            "pipeline finished"
        );

        Ok((report, sink))
    }

    /// Run the pipeline in the background, streaming names as they are found.
    #[must_use]
    pub fn stream(&self, target: &TargetOrganization) -> NameStream {
        let (names_tx, names) = mpsc::unbounded_channel();
        let pipeline = self.clone();
        let query = dork_query(target);

        let handle = tokio::spawn(async move {
            pipeline
                .run_query(query, names_tx)
                .await
                .map(|(report, _sink)| report)
        });

        NameStream { names, handle }
    }
}
