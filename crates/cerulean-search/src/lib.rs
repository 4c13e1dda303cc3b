//! Cerulean Search - Paginated web search provider abstraction.
//!
//! This crate provides the interface the scanner uses to page through search
//! results, plus the Google Custom Search implementation and the dork query
//! that scopes results to LinkedIn profile pages.
//!
//! # Example
//!
//! ```rust,no_run
//! use cerulean_core::{AppConfig, TargetOrganization};
//! use cerulean_search::{dork_query, GoogleCustomSearch, SearchProvider, SearchRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = AppConfig::config_path()?;
//! let config = AppConfig::load_from(&path)?;
//! let credentials = config.google.credentials(&path)?;
//! let provider = GoogleCustomSearch::from_config(credentials, &config.search)?;
//!
//! let target = TargetOrganization::new("Rootshell Security")?;
//! let page = provider
//!     .search(&SearchRequest::new(dork_query(&target)).with_start(1))
//!     .await?;
//!
//! for item in &page.items {
//!     println!("{}", item.title);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod provider;
pub mod providers;
pub mod query;

// Re-export commonly used types
pub use error::{Result, SearchError};
pub use provider::{SearchItem, SearchPage, SearchProvider, SearchRequest, PAGE_SIZE};
pub use providers::GoogleCustomSearch;
pub use query::dork_query;
