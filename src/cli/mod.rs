use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::StatementMonth;
use std::path::PathBuf;

use crate::api_client::ApiClient;
use crate::config::AppSettings;

pub mod commands;

use commands::{accounts, cards, contracts, documents, excel, fiscal_years, journal, reports};

#[derive(Parser)]
#[command(name = "ledgerdesk")]
#[command(about = "Admin client for the accounting backend")]
#[command(version)]
pub struct Cli {
    /// Settings file
    ///
    /// Defaults to ./ledgerdesk.toml when it exists. LEDGERDESK_* environment
    /// variables override values from the file.
    #[arg(short, long, global = true, env = "LEDGERDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL (e.g., http://localhost:5000), overriding host and port settings
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage fiscal years
    #[command(subcommand)]
    FiscalYears(FiscalYearCommand),
    /// Manage the chart of accounts
    #[command(subcommand)]
    Accounts(AccountCommand),
    /// Validate and submit journal entries
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Generate and download reports
    #[command(subcommand)]
    Reports(ReportCommand),
    /// Upload and download contracts
    #[command(subcommand)]
    Contracts(ContractCommand),
    /// Upload, list and merge documents
    #[command(subcommand)]
    Documents(DocumentCommand),
    /// Import and export Excel workbooks
    #[command(subcommand)]
    Excel(ExcelCommand),
    /// Corporate card statements
    #[command(subcommand)]
    Cards(CardCommand),
}

#[derive(Subcommand)]
pub enum FiscalYearCommand {
    /// List fiscal years
    List,
    /// Open a new fiscal year
    Create { year: i32 },
    /// Close a fiscal year
    Close {
        id: i64,
        /// Who closes the year
        #[arg(long = "by", env = "LEDGERDESK_DEFAULT_AUTHOR")]
        closed_by: String,
    },
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// List the chart of accounts
    List,
    /// Show one account by code
    Show { code: String },
    /// Create an account
    Create {
        code: String,
        name: String,
        /// ASSET, LIABILITY, EQUITY, REVENUE or EXPENSE
        #[arg(short = 't', long = "type")]
        account_type: String,
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum JournalCommand {
    /// Validate a draft file without sending it
    Check {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Validate a draft file and create the journal entry
    Submit {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// List generated reports
    List,
    /// Generate a report for a period
    Generate {
        #[arg(long)]
        fiscal_year_id: i64,
        /// BUDGET_VS_ACTUAL, FINANCIAL_STATEMENT, CASH_FLOW or TAX_SUMMARY
        #[arg(short = 't', long = "type")]
        report_type: String,
        /// Period start (YYYY-MM-DD)
        #[arg(long)]
        from: chrono::NaiveDate,
        /// Period end (YYYY-MM-DD)
        #[arg(long)]
        to: chrono::NaiveDate,
    },
    /// Download a generated report
    Download {
        id: i64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ContractCommand {
    List,
    Upload {
        file: PathBuf,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    Download {
        id: i64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download the standard contract template
    Template {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DocumentCommand {
    List,
    Upload {
        file: PathBuf,
        /// ACCOUNTING, CONTRACT, RECEIPT, REPORT or OTHER
        #[arg(short = 't', long = "type", default_value = "OTHER")]
        document_type: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Merge two or more documents into a new one
    Merge {
        #[arg(short, long)]
        name: String,
        #[arg(required = true, num_args = 2..)]
        ids: Vec<i64>,
    },
    Download {
        id: i64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ExcelCommand {
    List,
    Upload {
        file: PathBuf,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    Download {
        id: i64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download the accounting workbook template
    Accounting {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download the custom workbook template
    Custom {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CardCommand {
    /// List card transactions
    List {
        /// Statement month (YYYY-MM)
        #[arg(short, long)]
        month: Option<StatementMonth>,
        /// Only transactions not yet booked
        #[arg(short, long)]
        unprocessed: bool,
    },
    /// Upload a monthly card statement
    Upload {
        file: PathBuf,
        /// shinhan, kookmin, hana or ibk
        #[arg(long)]
        company: String,
        #[arg(short, long)]
        month: StatementMonth,
    },
    /// Book card transactions to an expense account
    Process {
        #[arg(short, long)]
        account_id: i64,
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

impl Cli {
    /// Settings after applying command-line overrides.
    pub fn settings(&self) -> Result<AppSettings> {
        let mut settings = AppSettings::load(self.config.as_deref()).context("Failed to load settings")?;
        if let Some(url) = &self.api_url {
            settings.api_base_url = Some(url.clone());
        }
        Ok(settings)
    }

    pub async fn run(self, settings: AppSettings) -> Result<()> {
        let client = ApiClient::new(&settings).context("Failed to build HTTP client")?;
        match self.command {
            Commands::FiscalYears(command) => fiscal_years::run(&client, command).await,
            Commands::Accounts(command) => accounts::run(&client, command).await,
            Commands::Journal(command) => journal::run(client, &settings, command).await,
            Commands::Reports(command) => reports::run(&client, command).await,
            Commands::Contracts(command) => contracts::run(&client, command).await,
            Commands::Documents(command) => documents::run(&client, command).await,
            Commands::Excel(command) => excel::run(&client, command).await,
            Commands::Cards(command) => cards::run(&client, command).await,
        }
    }
}
