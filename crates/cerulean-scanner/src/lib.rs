//! Cerulean Scanner - Concurrent name harvesting pipeline.
//!
//! This crate turns paginated search results into a stream of unique person
//! names. A single fetcher pages through the search provider and feeds raw
//! result titles into a bounded hand-off queue; a pool of workers extracts
//! names from the titles; a single aggregator drops repeats and emits each
//! name the first time it is seen.
//!
//! # Features
//!
//! - Bounded hand-off queue with backpressure on the fetcher
//! - Configurable worker pool draining the queue concurrently
//! - Single-owner deduplication, no shared locks on the seen-set
//! - Ordered shutdown driven by per-stage completion signals
//! - Provider failures stop fetching without losing results already queued
//! - Cooperative cancellation of the fetch stage
//!
//! # Example
//!
//! ```rust,ignore
//! use cerulean_scanner::{LineSink, ScanPipeline};
//! use std::sync::Arc;
//!
//! let pipeline = ScanPipeline::new(Arc::new(provider))
//!     .with_threads(50)
//!     .with_page_limit(10);
//!
//! let (report, _sink) = pipeline
//!     .run(&target, LineSink::new(std::io::stdout()))
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregator;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod pipeline;
pub mod tracker;
pub mod worker;

// Re-export commonly used types
pub use aggregator::{AggregateOutcome, Aggregator, LineSink, NameSink};
pub use error::{Result, ScanError};
pub use extract::{extract_name, SEPARATOR};
pub use fetcher::{FetchOutcome, Fetcher, StopReason};
pub use pipeline::{NameStream, PipelineReport, ScanPipeline};
pub use tracker::{CompletionTracker, StageGuard, StageSignal};
pub use worker::{run_worker, SharedQueue, WorkerOutcome};
