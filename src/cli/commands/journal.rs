use anyhow::{Context, Result, bail};
use chrono::Local;
use model::DraftDefaults;
use std::path::Path;
use tracing::{debug, trace};

use crate::api_client::ApiClient;
use crate::app::{AdminApp, Reply};
use crate::cli::JournalCommand;
use crate::config::AppSettings;
use crate::dispatch::{Component, Event};
use crate::draft_file::DraftFile;
use crate::session::UiSession;
use crate::submission::DEFAULT_SUCCESS_MESSAGE;

pub async fn run(client: ApiClient, settings: &AppSettings, command: JournalCommand) -> Result<()> {
    trace!("Entering journal command");
    let defaults = DraftDefaults::new(Some(Local::now().date_naive()), settings.default_author.clone());
    let mut app = AdminApp::new(client, defaults, settings.request_timeout());
    app.initialize()
        .await
        .context("Failed to load the chart of accounts")?;

    match command {
        JournalCommand::Check { file } => {
            load_draft(&file)?.replay(&mut app).await?;
            print_draft(app.session());
            let session = app.session();
            match session.validator().validate(session.draft()) {
                Ok(balance) => println!("\nDraft is valid and balanced ({balance})"),
                Err(err) => bail!("{err}"),
            }
        }
        JournalCommand::Submit { file } => {
            load_draft(&file)?.replay(&mut app).await?;
            print_draft(app.session());
            match app.handle(Component::JournalForm, Event::Submit).await? {
                Reply::Submitted(created) => {
                    let message = created.message.as_deref().unwrap_or(DEFAULT_SUCCESS_MESSAGE);
                    match created.entry_id {
                        Some(id) => println!("\n{message} (entry ID {id})"),
                        None => println!("\n{message}"),
                    }
                }
                other => debug!("Unexpected reply to submit: {:?}", other),
            }
        }
    }
    Ok(())
}

fn load_draft(path: &Path) -> Result<DraftFile> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    DraftFile::from_json(&json).with_context(|| format!("Invalid draft file {}", path.display()))
}

fn print_draft(session: &UiSession) {
    let draft = session.draft();
    let date = draft
        .entry_date()
        .map(|date| date.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{}  {}  (by {})", date, draft.description(), draft.created_by());
    println!("{:>3}  {:<30}  {:>14}  {:>14}  {}", "#", "ACCOUNT", "DEBIT", "CREDIT", "MEMO");
    for (index, line) in draft.lines().enumerate() {
        let account = match line.account_id() {
            Some(id) => session
                .account(id)
                .map(|account| account.picker_label())
                .unwrap_or_else(|| format!("#{id}")),
            None => "-".to_string(),
        };
        println!(
            "{:>3}  {:<30}  {:>14}  {:>14}  {}",
            index + 1,
            super::clip(&account, 30),
            line.debit().normalize(),
            line.credit().normalize(),
            line.description()
        );
    }
    let balance = session.balance();
    println!(
        "{:>3}  {:<30}  {:>14}  {:>14}",
        "",
        "TOTAL",
        balance.total_debit.normalize(),
        balance.total_credit.normalize()
    );
}
