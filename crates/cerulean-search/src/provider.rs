//! Core search provider trait and request/response types.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Results requested per page. Custom Search never returns more than this.
pub const PAGE_SIZE: u32 = 10;

/// Trait for paginated web search backends.
///
/// Implementations must be thread-safe (Send + Sync) so the fetch stage can
/// own one behind an `Arc` on any runtime thread.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch one page of results.
    ///
    /// # Errors
    /// Returns error on network failure, rejected credentials, exhausted
    /// quota or an unparseable response.
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage>;

    /// Get the unique identifier for this provider.
    fn provider_id(&self) -> &str;
}

/// Request for one page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Full query string, operators included
    pub query: String,

    /// 1-based index of the first result on the page
    pub start: u32,

    /// Number of results requested
    pub num: u32,
}

impl SearchRequest {
    /// Create a request for the first page of `query`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start: 1,
            num: PAGE_SIZE,
        }
    }

    /// Set the 1-based start offset.
    #[must_use]
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Set the number of results requested.
    #[must_use]
    pub fn with_num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Result items in provider order
    pub items: Vec<SearchItem>,

    /// Provider's estimate of the total result count, if reported
    pub total_results: Option<u64>,
}

impl SearchPage {
    /// Build a page from items alone.
    #[must_use]
    pub fn from_items(items: Vec<SearchItem>) -> Self {
        Self {
            items,
            total_results: None,
        }
    }

    /// Whether the page came back with no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A single search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    /// Result title as displayed by the search engine
    pub title: String,

    /// Target URL
    #[serde(default)]
    pub link: Option<String>,

    /// Text snippet
    #[serde(default)]
    pub snippet: Option<String>,
}

impl SearchItem {
    /// Create an item carrying only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
