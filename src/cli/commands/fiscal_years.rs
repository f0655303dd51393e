use anyhow::Result;
use tracing::trace;

use crate::api_client::ApiClient;
use crate::cli::FiscalYearCommand;

pub async fn run(client: &ApiClient, command: FiscalYearCommand) -> Result<()> {
    trace!("Entering fiscal-years command");
    match command {
        FiscalYearCommand::List => {
            let years = client.list_fiscal_years().await?;
            println!("{:>5}  {:>4}  {:<10}  {:<10}  {}", "ID", "YEAR", "START", "END", "STATUS");
            for year in years {
                println!(
                    "{:>5}  {:>4}  {:<10}  {:<10}  {}",
                    year.id,
                    year.year,
                    year.start_date.date(),
                    year.end_date.date(),
                    year.status_label()
                );
            }
        }
        FiscalYearCommand::Create { year } => {
            let created = client.create_fiscal_year(year).await?;
            println!(
                "Created fiscal year {} (ID {}): {} to {}",
                created.year,
                created.fiscal_year_id,
                created.start_date.date(),
                created.end_date.date()
            );
        }
        FiscalYearCommand::Close { id, closed_by } => {
            let closed = client.close_fiscal_year(id, &closed_by).await?;
            println!(
                "Closed fiscal year {} at {} by {}",
                closed.year, closed.closed_at, closed.closed_by
            );
        }
    }
    Ok(())
}
