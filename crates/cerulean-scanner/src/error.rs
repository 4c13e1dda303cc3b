//! Error types for the scanning pipeline.
//!
//! Provider failures are deliberately absent: the fetcher absorbs them and
//! reports them in its [`FetchOutcome`](crate::FetchOutcome) instead.

use thiserror::Error;

#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ScanError {
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("Pipeline stage {stage} terminated abnormally: {source}")]
    StageJoin {
        stage: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Result type alias for scanning operations.
pub type Result<T> = std::result::Result<T, ScanError>;

impl From<ScanError> for cerulean_core::CeruleanError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidConfig(reason) => Self::Validation(reason),
            other @ ScanError::StageJoin { .. } => Self::Internal(other.to_string()),
        }
    }
}
