use super::{ApiClient, Download, file_part};
use crate::error::ApiError;
use common::{ContractUploaded, StoredFileDto};
use reqwest::multipart::Form;
use std::path::Path;

impl ApiClient {
    pub async fn list_contracts(&self) -> Result<Vec<StoredFileDto>, ApiError> {
        tracing::trace!("Fetching contracts");
        let result: Result<Vec<StoredFileDto>, ApiError> = self.get("/api/contracts").await;
        match &result {
            Ok(contracts) => tracing::info!("Fetched {} contracts", contracts.len()),
            Err(e) => tracing::error!("Failed to fetch contracts: {}", e),
        }
        result
    }

    pub async fn upload_contract(
        &self,
        name: &str,
        description: &str,
        path: &Path,
    ) -> Result<ContractUploaded, ApiError> {
        tracing::debug!("Uploading contract '{}' from {}", name, path.display());
        let form = Form::new()
            .text("name", name.to_string())
            .text("description", description.to_string())
            .part("file", file_part(path).await?);
        let result: Result<ContractUploaded, ApiError> = self.post_multipart("/api/contracts/upload", form).await;
        match &result {
            Ok(uploaded) => tracing::info!("Uploaded contract (ID: {})", uploaded.contract.id),
            Err(e) => tracing::error!("Failed to upload contract '{}': {}", name, e),
        }
        result
    }

    pub async fn download_contract(&self, contract_id: i64) -> Result<Download, ApiError> {
        self.download(&format!("/api/contracts/{}/download", contract_id)).await
    }

    /// The backend's blank employment contract template.
    pub async fn download_standard_contract(&self) -> Result<Download, ApiError> {
        self.download("/api/contracts/standard/download").await
    }
}
