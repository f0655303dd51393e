use super::{ApiClient, Download, file_part};
use crate::error::ApiError;
use common::{SpreadsheetUploaded, StoredFileDto};
use reqwest::multipart::Form;
use std::path::Path;

const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

impl ApiClient {
    pub async fn list_spreadsheets(&self) -> Result<Vec<StoredFileDto>, ApiError> {
        tracing::trace!("Fetching spreadsheets");
        let result: Result<Vec<StoredFileDto>, ApiError> = self.get("/api/excel/files").await;
        match &result {
            Ok(files) => tracing::info!("Fetched {} spreadsheets", files.len()),
            Err(e) => tracing::error!("Failed to fetch spreadsheets: {}", e),
        }
        result
    }

    /// Uploads an `.xlsx` or `.xls` workbook.
    pub async fn upload_spreadsheet(
        &self,
        name: &str,
        description: &str,
        path: &Path,
    ) -> Result<SpreadsheetUploaded, ApiError> {
        if !is_spreadsheet(path) {
            return Err(ApiError::InvalidRequest(format!(
                "{} is not an Excel workbook",
                path.display()
            )));
        }
        tracing::debug!("Uploading spreadsheet '{}' from {}", name, path.display());
        let form = Form::new()
            .text("name", name.to_string())
            .text("description", description.to_string())
            .part("file", file_part(path).await?);
        let result: Result<SpreadsheetUploaded, ApiError> = self.post_multipart("/api/excel/upload", form).await;
        match &result {
            Ok(uploaded) => tracing::info!("Uploaded spreadsheet (ID: {})", uploaded.excel_file.id),
            Err(e) => tracing::error!("Failed to upload spreadsheet '{}': {}", name, e),
        }
        result
    }

    pub async fn download_spreadsheet(&self, file_id: i64) -> Result<Download, ApiError> {
        self.download(&format!("/api/excel/files/{}/download", file_id)).await
    }

    /// Workbook template with the chart of accounts.
    pub async fn download_accounting_workbook(&self) -> Result<Download, ApiError> {
        self.download("/api/excel/accounting/download").await
    }

    pub async fn download_custom_workbook(&self) -> Result<Download, ApiError> {
        self.download("/api/excel/custom/download").await
    }
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
