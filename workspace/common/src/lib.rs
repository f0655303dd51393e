//! Common transport-layer types shared between the client library, the CLI
//! and the tests. These structs mirror the accounting backend's request and
//! response payloads so every caller deserializes the same shapes.

mod amount;
mod labels;
mod masking;
mod month;

pub use amount::{coerce_amount, parse_amount};
pub use labels::{AccountType, CardCompany, DocumentType, ProcessStatus, ReportType};
pub use masking::mask_card_number;
pub use month::StatementMonth;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Error body returned by the backend. Any body carrying an `error` field is a
/// logical failure, whatever the HTTP status was.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Acknowledgement returned by mutating endpoints that have no richer body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ===================== Fiscal years =====================

/// Fiscal year as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiscalYearDto {
    pub id: i64,
    pub year: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_closed: bool,
}

impl FiscalYearDto {
    pub fn status_label(&self) -> &'static str {
        if self.is_closed { "Closed" } else { "Open" }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct CreateFiscalYearRequest {
    #[validate(range(min = 1900, max = 9999, message = "year must be between 1900 and 9999"))]
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiscalYearCreated {
    pub fiscal_year_id: i64,
    pub year: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct CloseFiscalYearRequest {
    #[validate(length(min = 1, message = "closed_by is required"))]
    pub closed_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiscalYearClosed {
    pub fiscal_year_id: i64,
    pub year: i32,
    pub closed_at: NaiveDateTime,
    pub closed_by: String,
}

// ===================== Accounts =====================

/// Chart-of-accounts entry (mirrors backend account listing).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl AccountDto {
    /// Label used in account pickers, e.g. `1010 - Cash`.
    pub fn picker_label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Request body for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "known_account_type"))]
    pub account_type: AccountType,
    pub description: Option<String>,
}

fn known_account_type(value: &AccountType) -> Result<(), ValidationError> {
    if value.is_known() {
        Ok(())
    } else {
        let mut err = ValidationError::new("unknown_account_type");
        err.message = Some(format!("unknown account type: {}", value.code()).into());
        Err(err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountCreated {
    pub account_id: i64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub description: Option<String>,
}

// ===================== Journal entries =====================

/// One journal line on the wire. Amounts travel as JSON numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalLinePayload {
    pub account_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub debit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit: Decimal,
    pub description: String,
}

/// Request body for `POST /api/journal-entries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateJournalEntryRequest {
    pub entry_date: NaiveDate,
    pub description: String,
    pub created_by: String,
    pub lines: Vec<JournalLinePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntryCreated {
    #[serde(default)]
    pub message: Option<String>,
    /// Absent when the backend confirms without echoing the new id.
    #[serde(default)]
    pub entry_id: Option<i64>,
}

// ===================== Reports =====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDto {
    pub id: i64,
    pub report_type: ReportType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "ordered_report_period"))]
pub struct GenerateReportRequest {
    pub fiscal_year_id: i64,
    #[validate(custom(function = "known_report_type"))]
    pub report_type: ReportType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

fn known_report_type(value: &ReportType) -> Result<(), ValidationError> {
    if value.is_known() {
        Ok(())
    } else {
        let mut err = ValidationError::new("unknown_report_type");
        err.message = Some(format!("unknown report type: {}", value.code()).into());
        Err(err)
    }
}

fn ordered_report_period(request: &GenerateReportRequest) -> Result<(), ValidationError> {
    if request.period_start <= request.period_end {
        Ok(())
    } else {
        let mut err = ValidationError::new("period_order");
        err.message = Some("period start must not be after period end".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportGenerated {
    #[serde(default)]
    pub message: Option<String>,
    pub report: ReportDto,
}

// ===================== Contracts, documents, spreadsheets =====================

/// Stored file record. Contracts and spreadsheets share this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredFileDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct MergeDocumentsRequest {
    #[validate(length(min = 1, message = "merged document name is required"))]
    pub name: String,
    #[validate(length(min = 2, message = "select at least two documents to merge"))]
    pub document_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractUploaded {
    #[serde(default)]
    pub message: Option<String>,
    pub contract: StoredFileDto,
}

/// Returned by both document upload and document merge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSaved {
    #[serde(default)]
    pub message: Option<String>,
    pub document: DocumentDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpreadsheetUploaded {
    #[serde(default)]
    pub message: Option<String>,
    pub excel_file: StoredFileDto,
}

// ===================== Card statements =====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardStatementDto {
    pub id: i64,
    pub card_company: CardCompany,
    pub card_number: String,
    pub transaction_date: NaiveDateTime,
    pub merchant_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub approval_number: String,
    pub process_status: ProcessStatus,
}

impl CardStatementDto {
    pub fn masked_card_number(&self) -> String {
        mask_card_number(&self.card_number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardStatementUploaded {
    #[serde(default)]
    pub message: Option<String>,
    pub statements_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ProcessCardExpensesRequest {
    pub account_id: i64,
    #[validate(length(min = 1, message = "select at least one statement to process"))]
    pub statement_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardExpensesProcessed {
    #[serde(default)]
    pub message: Option<String>,
    pub processed_count: u64,
}
