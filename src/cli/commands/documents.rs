use anyhow::Result;
use common::{DocumentType, MergeDocumentsRequest};
use tracing::trace;

use super::{clip, save_download};
use crate::api_client::ApiClient;
use crate::cli::DocumentCommand;

pub async fn run(client: &ApiClient, command: DocumentCommand) -> Result<()> {
    trace!("Entering documents command");
    match command {
        DocumentCommand::List => {
            let documents = client.list_documents().await?;
            println!("{:>5}  {:<12}  {:<30}  {}", "ID", "TYPE", "NAME", "CREATED");
            for document in documents {
                println!(
                    "{:>5}  {:<12}  {:<30}  {}",
                    document.id,
                    document.document_type,
                    clip(&document.name, 30),
                    document.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        DocumentCommand::Upload {
            file,
            document_type,
            name,
            description,
        } => {
            let document_type = DocumentType::from_code(&document_type.trim().to_ascii_uppercase());
            anyhow::ensure!(document_type.is_known(), "unknown document type: {}", document_type.code());
            let saved = client
                .upload_document(&document_type, &name, &description, &file)
                .await?;
            println!(
                "{} (ID {})",
                saved.message.as_deref().unwrap_or("Document uploaded"),
                saved.document.id
            );
        }
        DocumentCommand::Merge { name, ids } => {
            let request = MergeDocumentsRequest {
                name,
                document_ids: ids,
            };
            let saved = client.merge_documents(&request).await?;
            println!(
                "{} (ID {})",
                saved.message.as_deref().unwrap_or("Documents merged"),
                saved.document.id
            );
        }
        DocumentCommand::Download { id, output } => {
            let download = client.download_document(id).await?;
            save_download(download, output, &format!("document_{id}")).await?;
        }
    }
    Ok(())
}
