use super::{ApiClient, Download};
use crate::error::ApiError;
use common::{GenerateReportRequest, ReportDto, ReportGenerated};
use validator::Validate;

impl ApiClient {
    pub async fn list_reports(&self) -> Result<Vec<ReportDto>, ApiError> {
        tracing::trace!("Fetching reports");
        let result: Result<Vec<ReportDto>, ApiError> = self.get("/api/reports").await;
        match &result {
            Ok(reports) => tracing::info!("Fetched {} reports", reports.len()),
            Err(e) => tracing::error!("Failed to fetch reports: {}", e),
        }
        result
    }

    pub async fn generate_report(&self, request: &GenerateReportRequest) -> Result<ReportGenerated, ApiError> {
        request.validate()?;
        tracing::debug!(
            "Generating {} report for {} to {}",
            request.report_type.code(),
            request.period_start,
            request.period_end
        );
        let result: Result<ReportGenerated, ApiError> = self.post("/api/reports", request).await;
        match &result {
            Ok(generated) => tracing::info!("Generated report (ID: {})", generated.report.id),
            Err(e) => tracing::error!("Failed to generate report: {}", e),
        }
        result
    }

    pub async fn download_report(&self, report_id: i64) -> Result<Download, ApiError> {
        self.download(&format!("/api/reports/{}/download", report_id)).await
    }
}
