//! Core error types for CeruleanOwl.
//!
//! This module defines the central error type used across all subsystems.
//! Each subsystem error is represented as a variant for clear error propagation.

use thiserror::Error;

/// Central error type for all CeruleanOwl operations.
#[derive(Error, Debug)]
pub enum CeruleanError {
    /// Configuration errors (file loading, parsing, missing secrets)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Search provider errors (network, authentication, quota)
    #[error("search error: {0}")]
    Search(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (home directory not available)")]
    NoConfigDir,

    /// No settings file existed, so an empty template was written
    #[error("configuration file generated. Set Google CX and key in {path}")]
    Generated {
        /// Path of the generated file
        path: String,
    },

    /// Search engine id or API key is empty
    #[error("Google API keys not configured. Add API keys in: {path}")]
    MissingCredentials {
        /// Path of the settings file to edit
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `CeruleanError`.
pub type Result<T> = std::result::Result<T, CeruleanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
