use anyhow::Result;
use common::StoredFileDto;
use tracing::trace;

use super::{clip, save_download};
use crate::api_client::ApiClient;
use crate::cli::ContractCommand;

pub async fn run(client: &ApiClient, command: ContractCommand) -> Result<()> {
    trace!("Entering contracts command");
    match command {
        ContractCommand::List => {
            let contracts = client.list_contracts().await?;
            print_files(&contracts);
        }
        ContractCommand::Upload {
            file,
            name,
            description,
        } => {
            let uploaded = client.upload_contract(&name, &description, &file).await?;
            println!(
                "{} (ID {})",
                uploaded.message.as_deref().unwrap_or("Contract uploaded"),
                uploaded.contract.id
            );
        }
        ContractCommand::Download { id, output } => {
            let download = client.download_contract(id).await?;
            save_download(download, output, &format!("contract_{id}.pdf")).await?;
        }
        ContractCommand::Template { output } => {
            let download = client.download_standard_contract().await?;
            save_download(download, output, "standard_contract.pdf").await?;
        }
    }
    Ok(())
}

/// Table shared by contracts and spreadsheets.
pub(crate) fn print_files(files: &[StoredFileDto]) {
    println!("{:>5}  {:<30}  {:<16}  {}", "ID", "NAME", "CREATED", "DESCRIPTION");
    for file in files {
        println!(
            "{:>5}  {:<30}  {:<16}  {}",
            file.id,
            clip(&file.name, 30),
            file.created_at.format("%Y-%m-%d %H:%M").to_string(),
            file.description.as_deref().unwrap_or("")
        );
    }
}
