use super::{ApiClient, file_part};
use crate::error::ApiError;
use common::{
    CardCompany, CardExpensesProcessed, CardStatementDto, CardStatementUploaded, ProcessCardExpensesRequest,
    StatementMonth,
};
use reqwest::multipart::Form;
use std::path::Path;
use validator::Validate;

impl ApiClient {
    /// Uploads an issuer's monthly statement file for parsing.
    pub async fn upload_card_statement(
        &self,
        company: &CardCompany,
        month: StatementMonth,
        path: &Path,
    ) -> Result<CardStatementUploaded, ApiError> {
        tracing::debug!("Uploading {} statement for {}", company.display_name(), month);
        let form = Form::new()
            .text("company", company.code().to_string())
            .text("month", month.to_string())
            .part("file", file_part(path).await?);
        let result: Result<CardStatementUploaded, ApiError> =
            self.post_multipart("/api/card-statements/upload", form).await;
        match &result {
            Ok(uploaded) => tracing::info!("Parsed {} card transactions", uploaded.statements_count),
            Err(e) => tracing::error!("Failed to upload card statement: {}", e),
        }
        result
    }

    pub async fn list_card_statements(&self, month: Option<StatementMonth>) -> Result<Vec<CardStatementDto>, ApiError> {
        self.card_statements("/api/card-statements", month).await
    }

    /// Card transactions not yet booked to an expense account.
    pub async fn list_unprocessed_card_statements(
        &self,
        month: Option<StatementMonth>,
    ) -> Result<Vec<CardStatementDto>, ApiError> {
        self.card_statements("/api/card-statements/unprocessed", month).await
    }

    pub async fn process_card_expenses(
        &self,
        request: &ProcessCardExpensesRequest,
    ) -> Result<CardExpensesProcessed, ApiError> {
        request.validate()?;
        tracing::debug!(
            "Booking {} card transactions to account {}",
            request.statement_ids.len(),
            request.account_id
        );
        let result: Result<CardExpensesProcessed, ApiError> = self.post("/api/card-statements/process", request).await;
        match &result {
            Ok(processed) => tracing::info!("Processed {} card transactions", processed.processed_count),
            Err(e) => tracing::error!("Failed to process card expenses: {}", e),
        }
        result
    }

    async fn card_statements(
        &self,
        endpoint: &str,
        month: Option<StatementMonth>,
    ) -> Result<Vec<CardStatementDto>, ApiError> {
        tracing::trace!("Fetching {} (month: {:?})", endpoint, month);
        let result: Result<Vec<CardStatementDto>, ApiError> = match month {
            Some(month) => self.get_with_query(endpoint, &[("month", month.to_string())]).await,
            None => self.get(endpoint).await,
        };
        match &result {
            Ok(statements) => tracing::info!("Fetched {} card transactions", statements.len()),
            Err(e) => tracing::error!("Failed to fetch card transactions: {}", e),
        }
        result
    }
}
