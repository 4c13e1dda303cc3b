//! Google Custom Search JSON API provider implementation.

use crate::error::{Result, SearchError};
use crate::provider::{SearchItem, SearchPage, SearchProvider, SearchRequest, PAGE_SIZE};
use crate::providers::common::{build_http_client, map_error_status};
use async_trait::async_trait;
use cerulean_core::{Credentials, SearchConfig};
use reqwest::Client;
use serde::Deserialize;

const PROVIDER_ID: &str = "google-cse";

/// Google Custom Search JSON API provider.
///
/// Each call is one `GET` against the `customsearch/v1` endpoint; the API
/// key and engine id travel as query parameters.
pub struct GoogleCustomSearch {
    credentials: Credentials,
    client: Client,
    base_url: String,
}

impl GoogleCustomSearch {
    /// Create a provider against the public endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::from_config(credentials, &SearchConfig::default())
    }

    /// Create a provider using endpoint and timeout from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(credentials: Credentials, config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            credentials,
            client: build_http_client(Some(config.timeout_secs))?,
            base_url: config.base_url.clone(),
        })
    }

    /// Point the provider at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn convert_api_response(response: GoogleResponse) -> SearchPage {
        SearchPage {
            items: response
                .items
                .into_iter()
                .map(|item| SearchItem {
                    title: item.title,
                    link: item.link,
                    snippet: item.snippet,
                })
                .collect(),
            total_results: response
                .search_information
                .and_then(|info| info.total_results)
                .and_then(|total| total.parse().ok()),
        }
    }
}

#[async_trait]
impl SearchProvider for GoogleCustomSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        if request.num == 0 || request.num > PAGE_SIZE {
            return Err(SearchError::InvalidRequest(format!(
                "num must be between 1 and {PAGE_SIZE}, got {}",
                request.num
            )));
        }
        if request.start == 0 {
            return Err(SearchError::InvalidRequest(
                "start is 1-based, got 0".to_string(),
            ));
        }

        tracing::debug!(start = request.start, num = request.num, "querying custom search");

        let start = request.start.to_string();
        let num = request.num.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("cx", self.credentials.engine_id.as_str()),
                ("q", request.query.as_str()),
                ("start", start.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        // Check for HTTP errors
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_error_status(PROVIDER_ID, status.as_u16(), &error_text));
        }

        let api_response: GoogleResponse =
            response.json().await.map_err(|e| SearchError::ParseError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {e}"),
            })?;

        Ok(Self::convert_api_response(api_response))
    }

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }
}

// Custom Search API types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleResponse {
    /// Absent entirely when the query has no (more) results
    #[serde(default)]
    items: Vec<GoogleItem>,
    #[serde(default)]
    search_information: Option<GoogleSearchInformation>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleSearchInformation {
    /// Reported as a decimal string
    #[serde(default)]
    total_results: Option<String>,
}
