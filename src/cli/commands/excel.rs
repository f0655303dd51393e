use anyhow::Result;
use tracing::trace;

use super::contracts::print_files;
use super::save_download;
use crate::api_client::ApiClient;
use crate::cli::ExcelCommand;

pub async fn run(client: &ApiClient, command: ExcelCommand) -> Result<()> {
    trace!("Entering excel command");
    match command {
        ExcelCommand::List => {
            let files = client.list_spreadsheets().await?;
            print_files(&files);
        }
        ExcelCommand::Upload {
            file,
            name,
            description,
        } => {
            let uploaded = client.upload_spreadsheet(&name, &description, &file).await?;
            println!(
                "{} (ID {})",
                uploaded.message.as_deref().unwrap_or("Spreadsheet uploaded"),
                uploaded.excel_file.id
            );
        }
        ExcelCommand::Download { id, output } => {
            let download = client.download_spreadsheet(id).await?;
            save_download(download, output, &format!("spreadsheet_{id}.xlsx")).await?;
        }
        ExcelCommand::Accounting { output } => {
            let download = client.download_accounting_workbook().await?;
            save_download(download, output, "accounting_template.xlsx").await?;
        }
        ExcelCommand::Custom { output } => {
            let download = client.download_custom_workbook().await?;
            save_download(download, output, "custom_template.xlsx").await?;
        }
    }
    Ok(())
}
