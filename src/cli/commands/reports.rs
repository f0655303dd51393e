use anyhow::Result;
use common::{GenerateReportRequest, ReportType};
use tracing::trace;

use super::save_download;
use crate::api_client::ApiClient;
use crate::cli::ReportCommand;

pub async fn run(client: &ApiClient, command: ReportCommand) -> Result<()> {
    trace!("Entering reports command");
    match command {
        ReportCommand::List => {
            let reports = client.list_reports().await?;
            println!("{:>5}  {:<22}  {:<10}  {:<10}  {}", "ID", "TYPE", "FROM", "TO", "CREATED");
            for report in reports {
                println!(
                    "{:>5}  {:<22}  {:<10}  {:<10}  {}",
                    report.id,
                    report.report_type,
                    report.period_start,
                    report.period_end,
                    report.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        ReportCommand::Generate {
            fiscal_year_id,
            report_type,
            from,
            to,
        } => {
            let request = GenerateReportRequest {
                fiscal_year_id,
                report_type: ReportType::from_code(&report_type.trim().to_ascii_uppercase()),
                period_start: from,
                period_end: to,
            };
            let generated = client.generate_report(&request).await?;
            println!(
                "{} (report ID {})",
                generated.message.as_deref().unwrap_or("Report generated"),
                generated.report.id
            );
        }
        ReportCommand::Download { id, output } => {
            let download = client.download_report(id).await?;
            save_download(download, output, &format!("report_{id}.pdf")).await?;
        }
    }
    Ok(())
}
