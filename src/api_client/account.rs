use super::ApiClient;
use crate::error::ApiError;
use common::{AccountCreated, AccountDto, CreateAccountRequest};
use validator::Validate;

impl ApiClient {
    /// Get the chart of accounts, from cache when fresh.
    pub async fn list_accounts(&self) -> Result<Vec<AccountDto>, ApiError> {
        if let Some(accounts) = self.cached_accounts().await {
            return Ok(accounts);
        }
        tracing::trace!("Fetching all accounts");
        let result: Result<Vec<AccountDto>, ApiError> = self.get("/api/accounts").await;
        match &result {
            Ok(accounts) => {
                tracing::info!("Fetched {} accounts", accounts.len());
                self.cache_accounts(accounts).await;
            }
            Err(e) => tracing::error!("Failed to fetch accounts: {}", e),
        }
        result
    }

    /// Bypasses the cache and reloads the chart of accounts.
    pub async fn refresh_accounts(&self) -> Result<Vec<AccountDto>, ApiError> {
        self.invalidate_accounts().await;
        self.list_accounts().await
    }

    /// Get a specific account by its code
    pub async fn get_account(&self, code: &str) -> Result<AccountDto, ApiError> {
        tracing::trace!("Fetching account with code: {}", code);
        let result: Result<AccountDto, ApiError> = self.get(&format!("/api/accounts/{}", code)).await;
        match &result {
            Ok(account) => tracing::info!("Fetched account: {} (ID: {})", account.name, account.id),
            Err(e) => tracing::error!("Failed to fetch account {}: {}", code, e),
        }
        result
    }

    /// Create a new account
    pub async fn create_account(&self, request: &CreateAccountRequest) -> Result<AccountCreated, ApiError> {
        request.validate()?;
        tracing::debug!("Creating new account: {} {}", request.code, request.name);
        let result: Result<AccountCreated, ApiError> = self.post("/api/accounts", request).await;
        match &result {
            Ok(account) => {
                tracing::info!("Successfully created account: {} (ID: {})", account.name, account.account_id);
                self.invalidate_accounts().await;
            }
            Err(e) => tracing::error!("Failed to create account '{}': {}", request.name, e),
        }
        result
    }
}
