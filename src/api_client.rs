pub mod account;
pub mod card_statement;
pub mod contract;
pub mod document;
pub mod excel;
pub mod fiscal_year;
pub mod journal_entry;
pub mod report;

use crate::config::AppSettings;
use crate::error::ApiError;
use async_trait::async_trait;
use common::{AccountDto, CreateJournalEntryRequest, JournalEntryCreated};
use moka::future::Cache;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const ACCOUNTS_KEY: &str = "accounts";

/// The two backend calls the journal workflow depends on.
#[async_trait]
pub trait AccountingApi: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<AccountDto>, ApiError>;

    /// Reloads the catalog, skipping any cache.
    async fn refresh_accounts(&self) -> Result<Vec<AccountDto>, ApiError> {
        self.list_accounts().await
    }

    async fn create_journal_entry(
        &self,
        request: &CreateJournalEntryRequest,
    ) -> Result<JournalEntryCreated, ApiError>;
}

/// A file returned by one of the download endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// REST client for the accounting backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    accounts: Option<Cache<&'static str, Arc<Vec<AccountDto>>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("account_cache", &self.accounts.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(settings: &AppSettings) -> Result<Self, ApiError> {
        let timeout = settings.request_timeout();
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let ttl = settings.account_cache_ttl();
        let accounts = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });
        Ok(Self {
            http,
            base_url: settings.api_base(),
            timeout,
            accounts,
        })
    }

    /// Client for `base_url` with default settings otherwise.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let settings = AppSettings {
            api_base_url: Some(base_url.into()),
            ..AppSettings::default()
        };
        Self::new(&settings)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Common GET request handler
    pub(crate) async fn get<T>(&self, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        tracing::debug!("GET request to: {}", url);
        self.send("GET", endpoint, self.http.get(&url)).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        tracing::debug!("GET request to: {}", url);
        self.send("GET", endpoint, self.http.get(&url).query(query)).await
    }

    /// Common POST request handler
    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        tracing::debug!("POST request to: {}", url);
        self.send("POST", endpoint, self.http.post(&url).json(body)).await
    }

    pub(crate) async fn post_multipart<T>(&self, endpoint: &str, form: Form) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        tracing::debug!("POST multipart request to: {}", url);
        self.send("POST", endpoint, self.http.post(&url).multipart(form)).await
    }

    /// Fetches a file. A JSON `{error}` body is reported as a server error.
    pub(crate) async fn download(&self, endpoint: &str) -> Result<Download, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!("GET (download) request to: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::error!("GET {} - Request failed: {}", endpoint, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_file_name);
        let bytes = response.bytes().await?;

        if is_json || !status.is_success() {
            if let Err(err) = interpret::<Value>(status, &bytes) {
                tracing::error!("GET {} - {}", endpoint, err);
                return Err(err);
            }
        }

        tracing::info!("GET {} - Downloaded {} bytes", endpoint, bytes.len());
        Ok(Download {
            file_name,
            bytes: bytes.to_vec(),
        })
    }

    async fn send<T>(&self, method: &str, endpoint: &str, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} - Request failed: {}", method, endpoint, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} {} - Non-OK response: {}", method, endpoint, status);
        }

        tracing::trace!("{} {} - Response received, parsing JSON", method, endpoint);
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("{} {} - Failed to read body: {}", method, endpoint, e);
            ApiError::from(e)
        })?;

        match interpret(status, &bytes) {
            Ok(value) => {
                tracing::info!("{} {} - Success", method, endpoint);
                Ok(value)
            }
            Err(err) => {
                tracing::error!("{} {} - {}", method, endpoint, err);
                Err(err)
            }
        }
    }

    async fn cached_accounts(&self) -> Option<Vec<AccountDto>> {
        let cache = self.accounts.as_ref()?;
        let hit = cache.get(ACCOUNTS_KEY).await?;
        tracing::trace!("Serving {} accounts from cache", hit.len());
        Some(hit.as_ref().clone())
    }

    async fn cache_accounts(&self, accounts: &[AccountDto]) {
        if let Some(cache) = &self.accounts {
            cache.insert(ACCOUNTS_KEY, Arc::new(accounts.to_vec())).await;
        }
    }

    /// Drops the cached chart of accounts.
    pub async fn invalidate_accounts(&self) {
        if let Some(cache) = &self.accounts {
            cache.invalidate(ACCOUNTS_KEY).await;
        }
    }
}

#[async_trait]
impl AccountingApi for ApiClient {
    async fn list_accounts(&self) -> Result<Vec<AccountDto>, ApiError> {
        ApiClient::list_accounts(self).await
    }

    async fn refresh_accounts(&self) -> Result<Vec<AccountDto>, ApiError> {
        ApiClient::refresh_accounts(self).await
    }

    async fn create_journal_entry(
        &self,
        request: &CreateJournalEntryRequest,
    ) -> Result<JournalEntryCreated, ApiError> {
        ApiClient::create_journal_entry(self, request).await
    }
}

/// Applies the backend's dual-channel error convention to a response.
///
/// A JSON object with a truthy `error` field is a failure whatever the
/// status. Otherwise a non-2xx status is an HTTP error and a 2xx body must
/// decode as `T`.
pub fn interpret<T>(status: StatusCode, body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Err(ApiError::Http(status)),
        Err(e) => return Err(ApiError::Decode(e.to_string())),
    };

    if let Some(message) = value.get("error").and_then(error_message) {
        return Err(ApiError::Server(message));
    }
    if !status.is_success() {
        return Err(ApiError::Http(status));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn attachment_file_name(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Reads `path` into a multipart file part named after the file.
pub(crate) async fn file_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes).file_name(file_name))
}
