//! Configuration model loaded from external sources.

use std::env;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::services::search::SearchSettings;
use crate::{DEFAULT_PAGE_SIZE, MIN_SUGGESTION_CHARS, SEARCH_DEBOUNCE_MS, SUGGESTION_LIMIT};

/// Which data source backs the dashboard for the whole session.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    #[default]
    Remote,
    Fallback,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_suggestion_limit() -> usize {
    SUGGESTION_LIMIT
}

fn default_min_suggestion_chars() -> usize {
    MIN_SUGGESTION_CHARS
}

fn default_search_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the dashboard services.
pub struct DashboardConfig {
    /// Scheme, host and port of the record service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub data_source: DataSourceMode,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_min_suggestion_chars")]
    pub min_suggestion_chars: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Serve suggestions from the fallback store when the service fails.
    #[serde(default = "default_true")]
    pub suggestion_fallback: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            data_source: DataSourceMode::default(),
            page_size: default_page_size(),
            suggestion_limit: default_suggestion_limit(),
            min_suggestion_chars: default_min_suggestion_chars(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            suggestion_fallback: true,
        }
    }
}

impl DashboardConfig {
    /// Loads `config/default.yaml`, the `config/{APP_ENV}.yaml` profile
    /// (defaults to `local`) and `APP_*` environment variables, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.search_debounce_ms),
            min_chars: self.min_suggestion_chars,
        }
    }
}
