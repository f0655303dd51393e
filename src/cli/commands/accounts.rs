use anyhow::Result;
use common::{AccountDto, AccountType, CreateAccountRequest};
use tracing::trace;

use super::clip;
use crate::api_client::ApiClient;
use crate::cli::AccountCommand;

pub async fn run(client: &ApiClient, command: AccountCommand) -> Result<()> {
    trace!("Entering accounts command");
    match command {
        AccountCommand::List => {
            let accounts = client.list_accounts().await?;
            print_accounts(&accounts);
        }
        AccountCommand::Show { code } => {
            let account = client.get_account(&code).await?;
            print_accounts(std::slice::from_ref(&account));
            if let Some(description) = account.description.filter(|d| !d.is_empty()) {
                println!("\n{}", description);
            }
        }
        AccountCommand::Create {
            code,
            name,
            account_type,
            description,
        } => {
            let request = CreateAccountRequest {
                code,
                name,
                account_type: AccountType::from_code(&account_type.trim().to_ascii_uppercase()),
                description,
            };
            let created = client.create_account(&request).await?;
            println!(
                "Created account {} - {} ({}), ID {}",
                created.code, created.name, created.account_type, created.account_id
            );
        }
    }
    Ok(())
}

fn print_accounts(accounts: &[AccountDto]) {
    println!("{:>5}  {:<8}  {:<30}  {}", "ID", "CODE", "NAME", "TYPE");
    for account in accounts {
        println!(
            "{:>5}  {:<8}  {:<30}  {}",
            account.id,
            account.code,
            clip(&account.name, 30),
            account.account_type
        );
    }
}
