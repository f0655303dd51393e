use super::ApiClient;
use crate::error::ApiError;
use common::{CloseFiscalYearRequest, CreateFiscalYearRequest, FiscalYearClosed, FiscalYearCreated, FiscalYearDto};
use validator::Validate;

impl ApiClient {
    pub async fn list_fiscal_years(&self) -> Result<Vec<FiscalYearDto>, ApiError> {
        tracing::trace!("Fetching fiscal years");
        let result: Result<Vec<FiscalYearDto>, ApiError> = self.get("/api/fiscal-years").await;
        match &result {
            Ok(years) => tracing::info!("Fetched {} fiscal years", years.len()),
            Err(e) => tracing::error!("Failed to fetch fiscal years: {}", e),
        }
        result
    }

    pub async fn create_fiscal_year(&self, year: i32) -> Result<FiscalYearCreated, ApiError> {
        let request = CreateFiscalYearRequest { year };
        request.validate()?;
        tracing::debug!("Creating fiscal year {}", year);
        let result: Result<FiscalYearCreated, ApiError> = self.post("/api/fiscal-years", &request).await;
        match &result {
            Ok(created) => tracing::info!(
                "Created fiscal year {} (ID: {})",
                created.year,
                created.fiscal_year_id
            ),
            Err(e) => tracing::error!("Failed to create fiscal year {}: {}", year, e),
        }
        result
    }

    /// Close a fiscal year; later entries dated inside it are rejected by the backend.
    pub async fn close_fiscal_year(&self, fiscal_year_id: i64, closed_by: &str) -> Result<FiscalYearClosed, ApiError> {
        let request = CloseFiscalYearRequest {
            closed_by: closed_by.trim().to_string(),
        };
        request.validate()?;
        tracing::debug!("Closing fiscal year with ID: {}", fiscal_year_id);
        let result: Result<FiscalYearClosed, ApiError> = self
            .post(&format!("/api/fiscal-years/{}/close", fiscal_year_id), &request)
            .await;
        match &result {
            Ok(closed) => tracing::info!("Closed fiscal year {} by {}", closed.year, closed.closed_by),
            Err(e) => tracing::error!("Failed to close fiscal year {}: {}", fiscal_year_id, e),
        }
        result
    }
}
