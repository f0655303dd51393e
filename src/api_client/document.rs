use super::{ApiClient, Download, file_part};
use crate::error::ApiError;
use common::{DocumentDto, DocumentSaved, DocumentType, MergeDocumentsRequest};
use reqwest::multipart::Form;
use std::path::Path;
use validator::Validate;

impl ApiClient {
    pub async fn list_documents(&self) -> Result<Vec<DocumentDto>, ApiError> {
        tracing::trace!("Fetching documents");
        let result: Result<Vec<DocumentDto>, ApiError> = self.get("/api/documents").await;
        match &result {
            Ok(documents) => tracing::info!("Fetched {} documents", documents.len()),
            Err(e) => tracing::error!("Failed to fetch documents: {}", e),
        }
        result
    }

    pub async fn upload_document(
        &self,
        document_type: &DocumentType,
        name: &str,
        description: &str,
        path: &Path,
    ) -> Result<DocumentSaved, ApiError> {
        tracing::debug!("Uploading {} document '{}'", document_type.code(), name);
        let form = Form::new()
            .text("type", document_type.code().to_string())
            .text("name", name.to_string())
            .text("description", description.to_string())
            .part("file", file_part(path).await?);
        let result: Result<DocumentSaved, ApiError> = self.post_multipart("/api/documents/upload", form).await;
        match &result {
            Ok(saved) => tracing::info!("Uploaded document (ID: {})", saved.document.id),
            Err(e) => tracing::error!("Failed to upload document '{}': {}", name, e),
        }
        result
    }

    /// Merge two or more stored documents into a new one.
    pub async fn merge_documents(&self, request: &MergeDocumentsRequest) -> Result<DocumentSaved, ApiError> {
        request.validate()?;
        tracing::debug!("Merging {} documents into '{}'", request.document_ids.len(), request.name);
        let result: Result<DocumentSaved, ApiError> = self.post("/api/documents/merge", request).await;
        match &result {
            Ok(saved) => tracing::info!("Merged documents into ID {}", saved.document.id),
            Err(e) => tracing::error!("Failed to merge documents: {}", e),
        }
        result
    }

    pub async fn download_document(&self, document_id: i64) -> Result<Download, ApiError> {
        self.download(&format!("/api/documents/{}/download", document_id)).await
    }
}
