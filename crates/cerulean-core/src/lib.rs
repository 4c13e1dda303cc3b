//! Cerulean Core - Foundation crate for the CeruleanOwl reconnaissance tool.
//!
//! This crate provides the shared types, error handling and configuration
//! management that the search and scanner crates build on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based settings file with per-user paths
//! - [`types`] - Pipeline newtypes (`RawTitle`, `CleanName`, `TargetOrganization`)
//!
//! # Example
//!
//! ```rust
//! use cerulean_core::{AppConfig, TargetOrganization};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.pipeline.threads, 50);
//!
//! let target = TargetOrganization::new("Rootshell Security")?;
//! assert_eq!(target.as_str(), "Rootshell Security");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, Credentials, GoogleConfig, PipelineConfig, SearchConfig};
pub use error::{CeruleanError, ConfigError, ConfigResult, Result};
pub use types::{CleanName, RawTitle, TargetOrganization};
