use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Application settings.
///
/// Layered, lowest priority first: built-in defaults, `ledgerdesk.toml` in the
/// working directory (or the file given with `--config`), then `LEDGERDESK_*`
/// environment variables such as `LEDGERDESK_API_PORT=8080`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "books.example.com")
    pub api_host: String,

    /// Backend API port
    pub api_port: u16,

    /// Path prefix placed before every `/api/...` endpoint
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Overrides host, port, path and scheme when set
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// How long the chart of accounts is served from cache, in seconds (0 disables)
    pub account_cache_ttl_secs: u64,

    /// Author pre-filled into new journal drafts
    #[serde(default)]
    pub default_author: Option<String>,

    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 5000,
            api_path: String::new(),
            api_use_https: false,
            api_base_url: None,
            request_timeout_ms: 30_000,
            account_cache_ttl_secs: 300,
            default_author: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppSettings {
    /// Loads settings from defaults, an optional file and the environment.
    ///
    /// With `path` set the file must exist; otherwise `ledgerdesk.toml` is
    /// read only if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("api_host", defaults.api_host)?
            .set_default("api_port", i64::from(defaults.api_port))?
            .set_default("api_path", defaults.api_path)?
            .set_default("api_use_https", defaults.api_use_https)?
            .set_default("request_timeout_ms", defaults.request_timeout_ms as i64)?
            .set_default("account_cache_ttl_secs", defaults.account_cache_ttl_secs as i64)?
            .set_default("log_level", defaults.log_level)?;

        builder = match path {
            Some(path) => {
                debug!("Reading settings from {}", path.display());
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::with_name("ledgerdesk").required(false)),
        };

        let settings: AppSettings = builder
            .add_source(Environment::with_prefix("LEDGERDESK").try_parsing(true))
            .build()?
            .try_deserialize()?;

        info!("Using accounting backend at {}", settings.api_base());
        Ok(settings)
    }

    /// Base URL of the backend, without a trailing slash.
    pub fn api_base(&self) -> String {
        if let Some(url) = &self.api_base_url {
            return url.trim_end_matches('/').to_string();
        }
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!(
            "{}://{}:{}{}",
            protocol,
            self.api_host,
            self.api_port,
            self.api_path.trim_end_matches('/')
        )
    }

    /// Full URL for an endpoint such as `/api/accounts`.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base(), endpoint)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn account_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.account_cache_ttl_secs)
    }
}
