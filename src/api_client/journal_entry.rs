use super::ApiClient;
use crate::error::ApiError;
use common::{CreateJournalEntryRequest, JournalEntryCreated};

impl ApiClient {
    /// Sends a validated draft. Balance checks happen before this call.
    #[tracing::instrument(skip_all, fields(lines = request.lines.len()))]
    pub async fn create_journal_entry(
        &self,
        request: &CreateJournalEntryRequest,
    ) -> Result<JournalEntryCreated, ApiError> {
        tracing::debug!("Creating journal entry dated {}", request.entry_date);
        let result: Result<JournalEntryCreated, ApiError> = self.post("/api/journal-entries", request).await;
        match &result {
            Ok(JournalEntryCreated { entry_id: Some(id), .. }) => tracing::info!("Created journal entry (ID: {})", id),
            Ok(_) => tracing::info!("Created journal entry"),
            Err(e) => tracing::error!("Failed to create journal entry: {}", e),
        }
        result
    }
}
