//! Paginated fetch stage.
//!
//! The `Fetcher` pages through the search provider and pushes every result
//! title into the hand-off queue. It never retries: the first provider error
//! ends fetching, and whatever was already queued is processed as usual.

use crate::tracker::StageGuard;
use cerulean_core::RawTitle;
use cerulean_search::{SearchProvider, SearchRequest, PAGE_SIZE};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Why the fetcher stopped requesting pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured page limit was reached
    PageLimit,
    /// A page came back with no items
    Exhausted,
    /// A page came back short, so it was the last one
    LastPage,
    /// The provider returned an error
    ProviderError,
    /// The run was cancelled
    Cancelled,
    /// Every worker is gone and nothing drains the queue
    QueueClosed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::PageLimit => "page limit reached",
            Self::Exhausted => "no more results",
            Self::LastPage => "last page",
            Self::ProviderError => "provider error",
            Self::Cancelled => "cancelled",
            Self::QueueClosed => "queue closed",
        };
        f.write_str(reason)
    }
}

/// Summary of one fetch stage run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Provider calls that returned a page
    pub pages_fetched: u32,
    /// Titles pushed into the hand-off queue
    pub titles_enqueued: usize,
    /// Why fetching ended
    pub stop_reason: StopReason,
    /// Provider error message, if fetching ended on one
    pub error: Option<String>,
}

impl Default for FetchOutcome {
    fn default() -> Self {
        Self {
            pages_fetched: 0,
            titles_enqueued: 0,
            stop_reason: StopReason::PageLimit,
            error: None,
        }
    }
}

/// Single producer feeding the hand-off queue.
pub struct Fetcher {
    provider: Arc<dyn SearchProvider>,
    query: String,
    page_limit: u32,
}

impl Fetcher {
    /// Create a fetcher for `query`, requesting at most `page_limit` pages.
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>, query: impl Into<String>, page_limit: u32) -> Self {
        Self {
            provider,
            query: query.into(),
            page_limit,
        }
    }

    /// 1-based start offset of the zero-based `page`.
    ///
    /// `None` once the offset no longer fits the request type.
    #[must_use]
    pub fn start_offset(page: u32) -> Option<u32> {
        page.checked_mul(PAGE_SIZE)?.checked_add(1)
    }

    /// Run the fetch stage to completion.
    ///
    /// Takes ownership of its queue sender and drops it before signalling
    /// through `guard`, so once the signal is observed this stage can no
    /// longer send.
    pub async fn run(
        self,
        queue: mpsc::Sender<RawTitle>,
        cancel: CancellationToken,
        guard: StageGuard,
    ) -> FetchOutcome {
        tracing::debug!(
            provider = self.provider.provider_id(),
            page_limit = self.page_limit,
            "fetcher started"
        );

        let outcome = self.fetch_pages(&queue, &cancel).await;
        drop(queue);

        tracing::debug!(
            pages = outcome.pages_fetched,
            titles = outcome.titles_enqueued,
            reason = %outcome.stop_reason,
            "fetcher finished"
        );
        guard.finish();
        outcome
    }

    async fn fetch_pages(
        &self,
        queue: &mpsc::Sender<RawTitle>,
        cancel: &CancellationToken,
    ) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();

        for page_index in 0..self.page_limit {
            let Some(start) = Self::start_offset(page_index) else {
                break;
            };
            let request = SearchRequest::new(self.query.as_str()).with_start(start);

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    outcome.stop_reason = StopReason::Cancelled;
                    return outcome;
                }
                result = self.provider.search(&request) => result,
            };

            let page = match result {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Search request failed at offset {}: {}", start, e);
                    outcome.stop_reason = StopReason::ProviderError;
                    outcome.error = Some(e.to_string());
                    return outcome;
                }
            };
            outcome.pages_fetched += 1;

            // No more results? Don't waste queries
            if page.is_empty() {
                outcome.stop_reason = StopReason::Exhausted;
                return outcome;
            }

            let page_len = page.len();
            for item in page.items {
                let sent = tokio::select! {
                    biased;
                    () = cancel.cancelled() => {
                        outcome.stop_reason = StopReason::Cancelled;
                        return outcome;
                    }
                    sent = queue.send(RawTitle::new(item.title)) => sent,
                };
                if sent.is_err() {
                    tracing::warn!("Hand-off queue closed with no workers left to drain it");
                    outcome.stop_reason = StopReason::QueueClosed;
                    return outcome;
                }
                outcome.titles_enqueued += 1;
            }

            // A short page is the end of the results; skip the extra query
            if page_len < PAGE_SIZE as usize {
                outcome.stop_reason = StopReason::LastPage;
                return outcome;
            }
        }

        outcome.stop_reason = StopReason::PageLimit;
        outcome
    }
}
