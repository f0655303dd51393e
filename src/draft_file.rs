//! Journal drafts stored as JSON, for the command line.
//!
//! ```json
//! {
//!   "entry_date": "2024-03-15",
//!   "description": "Office rent",
//!   "created_by": "admin",
//!   "lines": [
//!     { "account_code": "5010", "debit": "1,000" },
//!     { "account_id": 2, "credit": 1000, "description": "March" }
//!   ]
//! }
//! ```
//!
//! Values are kept as raw input and replayed as form events, so a file is
//! coerced exactly like typed input would be.

use crate::api_client::AccountingApi;
use crate::app::{AdminApp, Reply};
use crate::dispatch::{Component, Event};
use crate::error::AppError;
use model::{HeaderField, LineField, LineHandle};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DraftFile {
    #[serde(default)]
    pub entry_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub lines: Vec<DraftFileLine>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DraftFileLine {
    /// Account id, number or string
    #[serde(default)]
    pub account_id: Option<Value>,
    /// Account code looked up in the loaded catalog; `account_id` wins when both are set
    #[serde(default)]
    pub account_code: Option<String>,
    #[serde(default)]
    pub debit: Option<Value>,
    #[serde(default)]
    pub credit: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DraftFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replays the file into the app's draft as form events.
    ///
    /// Header fields absent from the file keep the draft's defaults. The
    /// first line of the file fills the draft's existing blank line.
    pub async fn replay<A: AccountingApi>(&self, app: &mut AdminApp<A>) -> Result<usize, AppError> {
        let headers = [
            (HeaderField::EntryDate, &self.entry_date),
            (HeaderField::Description, &self.description),
            (HeaderField::CreatedBy, &self.created_by),
        ];
        for (field, value) in headers {
            if let Some(value) = value {
                app.handle(
                    Component::JournalForm,
                    Event::EditHeader {
                        field,
                        value: value.clone(),
                    },
                )
                .await?;
            }
        }

        let mut spare = app.session().draft().handles().first().copied();
        for (index, line) in self.lines.iter().enumerate() {
            let handle = match spare.take() {
                Some(handle) => handle,
                None => add_line(app).await?,
            };
            let account = self.resolve_account(app, index, line);
            let edits = [
                (LineField::Account, account),
                (LineField::Debit, line.debit.as_ref().map(raw).unwrap_or_default()),
                (LineField::Credit, line.credit.as_ref().map(raw).unwrap_or_default()),
                (LineField::Description, line.description.clone().unwrap_or_default()),
            ];
            for (field, value) in edits {
                app.handle(Component::JournalForm, Event::EditLine { handle, field, value })
                    .await?;
            }
        }
        debug!("Replayed {} draft lines", self.lines.len());
        Ok(self.lines.len())
    }

    fn resolve_account<A: AccountingApi>(&self, app: &AdminApp<A>, index: usize, line: &DraftFileLine) -> String {
        if let Some(id) = &line.account_id {
            return raw(id);
        }
        let Some(code) = &line.account_code else {
            return String::new();
        };
        match app
            .session()
            .accounts()
            .iter()
            .find(|account| account.code == code.trim())
        {
            Some(account) => account.id.to_string(),
            None => {
                warn!("Line {}: account code {} is not in the chart of accounts", index + 1, code);
                String::new()
            }
        }
    }
}

async fn add_line<A: AccountingApi>(app: &mut AdminApp<A>) -> Result<LineHandle, AppError> {
    match app.handle(Component::JournalForm, Event::AddLine).await? {
        Reply::LineAdded(handle) => Ok(handle),
        _ => Ok(app.session_mut().edit(|draft| draft.add_line())),
    }
}

/// Raw form text for a JSON scalar.
fn raw(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
