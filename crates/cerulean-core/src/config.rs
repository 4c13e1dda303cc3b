//! Configuration management for CeruleanOwl.
//!
//! Provides a TOML settings file in the per-user config directory, with
//! environment variable overrides. The file holds the two Google Custom
//! Search secrets plus pipeline tuning defaults.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Default number of pipeline workers.
pub const DEFAULT_THREADS: usize = 50;

/// Default number of result pages to request.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Google Custom Search JSON API endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Main application configuration.
///
/// This is loaded from `~/.config/ceruleanowl/settings.toml` (or platform
/// equivalent). Unlike most settings files, a missing file is not silently
/// replaced by defaults: the secrets are mandatory, so a blank template is
/// written and the caller is told where to fill it in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Google Custom Search secrets
    pub google: GoogleConfig,
    /// Worker pool and pagination settings
    pub pipeline: PipelineConfig,
    /// Search provider transport settings
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from the default per-user location.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File was missing and a template had to be generated
    /// - File exists but cannot be read or is not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path.
    ///
    /// If nothing exists at `path`, an empty template is written there and
    /// [`ConfigError::Generated`] is returned.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.pipeline.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, generating template");
            Self::default().save_to(path)?;
            Err(ConfigError::Generated {
                path: path.display().to_string(),
            })
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `CERULEAN_GOOGLE_CX`: Override the search engine id
    /// - `CERULEAN_GOOGLE_KEY`: Override the API key
    /// - `CERULEAN_THREADS`: Override the worker count
    /// - `CERULEAN_PAGE_LIMIT`: Override the page limit
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(cx) = lookup("CERULEAN_GOOGLE_CX") {
            self.google.cx = cx;
            tracing::debug!("Override google.cx from env");
        }

        if let Some(key) = lookup("CERULEAN_GOOGLE_KEY") {
            self.google.key = key;
            tracing::debug!("Override google.key from env");
        }

        if let Some(val) = lookup("CERULEAN_THREADS") {
            if let Ok(threads) = val.parse() {
                self.pipeline.threads = threads;
                tracing::debug!("Override pipeline.threads from env: {}", threads);
            }
        }

        if let Some(val) = lookup("CERULEAN_PAGE_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.pipeline.page_limit = limit;
                tracing::debug!("Override pipeline.page_limit from env: {}", limit);
            }
        }
    }

    /// Save configuration to `path`.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the settings file.
    ///
    /// Uses per-user config directories: `~/.config/ceruleanowl/settings.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "ceruleanowl", "ceruleanowl")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("settings.toml"))
    }
}

/// Google Custom Search secrets.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// Programmable search engine id
    pub cx: String,
    /// API key
    pub key: String,
}

impl GoogleConfig {
    /// Extract the secrets, refusing to hand out blank ones.
    ///
    /// `path` is only used to tell the user which file to edit.
    pub fn credentials(&self, path: &Path) -> ConfigResult<Credentials> {
        if self.cx.trim().is_empty() || self.key.trim().is_empty() {
            return Err(ConfigError::MissingCredentials {
                path: path.display().to_string(),
            });
        }
        Ok(Credentials {
            engine_id: self.cx.clone(),
            api_key: Zeroizing::new(self.key.clone()),
        })
    }
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("cx", &self.cx)
            .field("key", &if self.key.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

/// Validated search secrets. The API key is wiped from memory on drop.
#[derive(Clone)]
pub struct Credentials {
    /// Programmable search engine id (`cx`)
    pub engine_id: String,
    /// API key
    pub api_key: Zeroizing<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("engine_id", &self.engine_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Worker pool and pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of concurrent title-processing workers
    pub threads: usize,
    /// Maximum number of result pages (10 results each)
    pub page_limit: u32,
    /// Hand-off queue capacity; defaults to `threads` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_capacity: Option<usize>,
}

impl PipelineConfig {
    /// Effective hand-off queue capacity.
    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(self.threads)
    }

    /// Reject zero-sized pools, limits and queues.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.threads == 0 {
            return Err(invalid("pipeline.threads", "must be at least 1"));
        }
        if self.page_limit == 0 {
            return Err(invalid("pipeline.page_limit", "must be at least 1"));
        }
        if self.queue_capacity == Some(0) {
            return Err(invalid("pipeline.queue_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            page_limit: DEFAULT_PAGE_LIMIT,
            queue_capacity: None,
        }
    }
}

/// Search provider transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Custom Search endpoint
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            base_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.google.cx.is_empty());
        assert!(config.google.key.is_empty());
        assert_eq!(config.pipeline.threads, 50);
        assert_eq!(config.pipeline.page_limit, 10);
        assert_eq!(config.pipeline.queue_capacity(), 50);
        assert_eq!(config.search.timeout_secs, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[google]"));
        assert!(toml_str.contains("[pipeline]"));
        assert!(toml_str.contains("[search]"));
        assert!(!toml_str.contains("queue_capacity"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.pipeline.threads, config.pipeline.threads);
    }

    #[test]
    fn test_missing_file_generates_template() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("nested").join("settings.toml");

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Generated { .. }));
        assert!(path.exists());

        // Second load reads the template back, secrets still blank
        let config = AppConfig::load_from(&path).expect("load generated template");
        assert!(config.google.cx.is_empty());
        let err = config.google.credentials(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials { .. }));
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("settings.toml");

        let mut config = AppConfig::default();
        config.google.cx = "0123456789abcdef".to_string();
        config.google.key = "AIzaTestKey".to_string();
        config.pipeline.threads = 8;
        config.save_to(&path).expect("save config");

        let loaded = AppConfig::load_from(&path).expect("load config");
        assert_eq!(loaded.pipeline.threads, 8);

        let creds = loaded.google.credentials(&path).expect("credentials present");
        assert_eq!(creds.engine_id, "0123456789abcdef");
        assert_eq!(creds.api_key.as_str(), "AIzaTestKey");
    }

    #[test]
    fn test_blank_secret_rejected() {
        let google = GoogleConfig {
            cx: "engine".to_string(),
            key: "   ".to_string(),
        };
        let err = google.credentials(Path::new("settings.toml")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Google API keys not configured. Add API keys in: settings.toml"
        );
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CERULEAN_GOOGLE_CX", "env-cx"),
            ("CERULEAN_GOOGLE_KEY", "env-key"),
            ("CERULEAN_THREADS", "12"),
            ("CERULEAN_PAGE_LIMIT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).map(ToString::to_string));

        assert_eq!(config.google.cx, "env-cx");
        assert_eq!(config.google.key, "env-key");
        assert_eq!(config.pipeline.threads, 12);
        // Unparseable value leaves the default in place
        assert_eq!(config.pipeline.page_limit, 10);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[google]
cx = "abc"

[pipeline]
threads = 4
queue_capacity = 100
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.google.cx, "abc");
        assert!(config.google.key.is_empty());
        assert_eq!(config.pipeline.threads, 4);
        assert_eq!(config.pipeline.queue_capacity(), 100);
        assert_eq!(config.pipeline.page_limit, 10);
        assert_eq!(config.search.base_url, DEFAULT_SEARCH_URL);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("settings.toml");
        fs::write(&path, "[pipeline]\nthreads = 0\n").expect("write config");

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let google = GoogleConfig {
            cx: "engine".to_string(),
            key: "super-secret".to_string(),
        };
        let rendered = format!("{google:?}");
        assert!(!rendered.contains("super-secret"));

        let creds = google
            .credentials(Path::new("settings.toml"))
            .expect("credentials present");
        assert!(!format!("{creds:?}").contains("super-secret"));
    }
}
