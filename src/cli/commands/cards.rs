use anyhow::Result;
use common::{CardCompany, ProcessCardExpensesRequest};
use tracing::trace;

use super::clip;
use crate::api_client::ApiClient;
use crate::cli::CardCommand;

pub async fn run(client: &ApiClient, command: CardCommand) -> Result<()> {
    trace!("Entering cards command");
    match command {
        CardCommand::List { month, unprocessed } => {
            let statements = if unprocessed {
                client.list_unprocessed_card_statements(month).await?
            } else {
                client.list_card_statements(month).await?
            };
            println!(
                "{:>4}  {:<16}  {:<19}  {:<10}  {:<24}  {:>12}  {}",
                "ID", "CARD", "NUMBER", "DATE", "MERCHANT", "AMOUNT", "STATUS"
            );
            for statement in statements {
                println!(
                    "{:>4}  {:<16}  {:<19}  {:<10}  {:<24}  {:>12}  {}",
                    statement.id,
                    statement.card_company,
                    statement.masked_card_number(),
                    statement.transaction_date.date(),
                    clip(&statement.merchant_name, 24),
                    statement.amount.normalize(),
                    statement.process_status
                );
            }
        }
        CardCommand::Upload { file, company, month } => {
            let company = CardCompany::from_code(&company.trim().to_ascii_lowercase());
            anyhow::ensure!(company.is_known(), "unknown card company: {}", company.code());
            let uploaded = client.upload_card_statement(&company, month, &file).await?;
            println!(
                "{} ({} transactions)",
                uploaded.message.as_deref().unwrap_or("Card statement uploaded"),
                uploaded.statements_count
            );
        }
        CardCommand::Process { account_id, ids } => {
            let request = ProcessCardExpensesRequest {
                account_id,
                statement_ids: ids,
            };
            let processed = client.process_card_expenses(&request).await?;
            println!(
                "{} ({} transactions)",
                processed.message.as_deref().unwrap_or("Card expenses processed"),
                processed.processed_count
            );
        }
    }
    Ok(())
}
