//! Shared types used across the CeruleanOwl pipeline.
//!
//! The pipeline moves plain strings between stages, but each stage means
//! something different by them. These newtypes keep a raw search-result
//! title from being mistaken for an extracted name.

use crate::error::CeruleanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unprocessed title text of one search result item.
///
/// No uniqueness guarantee; the same title may come back on several pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTitle(String);

impl RawTitle {
    /// Wrap a title string as returned by the search provider.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the title and return the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RawTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RawTitle {
    fn from(title: String) -> Self {
        Self(title)
    }
}

impl From<&str> for RawTitle {
    fn from(title: &str) -> Self {
        Self(title.to_string())
    }
}

/// A person name extracted from a [`RawTitle`].
///
/// Equality is exact and case-sensitive. Two names that differ only in case
/// are different names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CleanName(String);

impl CleanName {
    /// Wrap an already-trimmed name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty (the separator opened the title).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the name and return the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CleanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CleanName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Newtype for the organization being searched for.
///
/// Must contain at least one non-whitespace character. The value is kept
/// exactly as given; it ends up inside a quoted phrase of the search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetOrganization(String);

impl TargetOrganization {
    /// Create a new `TargetOrganization` from a string.
    ///
    /// # Errors
    /// Returns error if the name is empty or whitespace only.
    pub fn new(name: impl Into<String>) -> Result<Self, CeruleanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CeruleanError::Validation(
                "target organization must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetOrganization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TargetOrganization {
    type Err = CeruleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
