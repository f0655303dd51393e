//! Journal entry submission: validate the draft, send it, interpret the answer.
//!
//! A submission walks `Editing -> Validating -> Submitting -> Succeeded |
//! Failed -> Editing`. Local validation failures never touch the network.
//! On success the draft is reset; on any failure it is left exactly as it was.
//! Dropping an in-flight `submit` future returns the session to `Editing`.

use crate::api_client::AccountingApi;
use crate::error::{ApiError, SubmitError};
use crate::session::UiSession;
use common::{CreateJournalEntryRequest, JournalEntryCreated, JournalLinePayload};
use compute::ValidationError;
use model::Draft;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Journal entry created";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Editing,
    Validating,
    Submitting,
    Succeeded { entry_id: Option<i64> },
    Failed(String),
}

impl SubmissionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Submitting)
    }
}

/// Drives one draft through validation and the create-journal-entry call.
#[derive(Debug, Clone)]
pub struct SubmissionPipeline {
    timeout: Duration,
}

impl SubmissionPipeline {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validates the session's draft and builds the request body.
    ///
    /// Leaves the session in `Submitting` on success. On failure the state
    /// returns to `Editing`, an error toast is queued and the outcome is
    /// recorded.
    pub fn prepare(&self, session: &mut UiSession) -> Result<CreateJournalEntryRequest, SubmitError> {
        if session.state().is_busy() {
            warn!("Submit ignored: a journal entry is already in flight");
            return Err(SubmitError::Busy);
        }

        session.set_state(SubmissionState::Validating);
        let prepared = session
            .validator()
            .validate(session.draft())
            .and_then(|_| build_request(session.draft()));

        match prepared {
            Ok(request) => {
                session.set_state(SubmissionState::Submitting);
                Ok(request)
            }
            Err(err) => {
                let err = SubmitError::from(err);
                self.fail(session, err.clone());
                Err(err)
            }
        }
    }

    /// Applies the backend's answer to the session.
    pub fn complete(
        &self,
        session: &mut UiSession,
        response: Result<JournalEntryCreated, ApiError>,
    ) -> Result<JournalEntryCreated, SubmitError> {
        match response {
            Ok(created) => {
                match created.entry_id {
                    Some(id) => info!("Journal entry {} created", id),
                    None => info!("Journal entry created"),
                }
                session.set_state(SubmissionState::Succeeded {
                    entry_id: created.entry_id,
                });
                let message = created
                    .message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
                session.toasts_mut().show_success(message);
                session.record_outcome(Ok(created.clone()));
                session.reset();
                Ok(created)
            }
            Err(api_error) => {
                error!("Failed to create journal entry: {}", api_error);
                let err = SubmitError::from(api_error);
                self.fail(session, err.clone());
                Err(err)
            }
        }
    }

    /// Validates, sends and interprets one submission.
    #[instrument(skip_all, fields(lines = session.draft().len()))]
    pub async fn submit<A>(
        &self,
        session: &mut UiSession,
        api: &A,
    ) -> Result<JournalEntryCreated, SubmitError>
    where
        A: AccountingApi + ?Sized,
    {
        let request = self.prepare(session)?;
        let mut in_flight = InFlight { session };
        let response = match tokio::time::timeout(self.timeout, api.create_journal_entry(&request)).await {
            Ok(response) => response,
            Err(_) => Err(ApiError::Timeout(self.timeout)),
        };
        self.complete(&mut *in_flight.session, response)
    }

    /// Abandons a prepared submission without an answer. The draft is kept.
    pub fn cancel(&self, session: &mut UiSession) {
        abandon(session);
    }

    fn fail(&self, session: &mut UiSession, err: SubmitError) {
        let reason = err.to_string();
        session.set_state(SubmissionState::Failed(reason.clone()));
        session.toasts_mut().show_error(reason);
        session.record_outcome(Err(err));
        session.set_state(SubmissionState::Editing);
    }
}

/// Holds the session while the create call is awaited.
struct InFlight<'a> {
    session: &'a mut UiSession,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        abandon(self.session);
    }
}

fn abandon(session: &mut UiSession) {
    if session.state().is_busy() {
        warn!("Journal entry submission cancelled before the backend answered");
        session.toasts_mut().show_warning("Submission cancelled");
        session.set_state(SubmissionState::Editing);
    }
}

impl Default for SubmissionPipeline {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Serializes a validated draft.
pub fn build_request(draft: &Draft) -> Result<CreateJournalEntryRequest, ValidationError> {
    let entry_date = draft.entry_date().ok_or(ValidationError::MissingEntryDate)?;
    let lines = draft
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let account_id = line
                .account_id()
                .ok_or(ValidationError::MissingAccount { line: index + 1 })?;
            Ok(JournalLinePayload {
                account_id,
                debit: line.debit(),
                credit: line.credit(),
                description: line.description().to_string(),
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(CreateJournalEntryRequest {
        entry_date,
        description: draft.description().trim().to_string(),
        created_by: draft.created_by().trim().to_string(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use model::{DraftDefaults, LineField};
    use rust_decimal::Decimal;

    fn filled_session() -> UiSession {
        let mut session = UiSession::new(DraftDefaults::new(
            NaiveDate::from_ymd_opt(2024, 3, 15),
            Some("admin".to_string()),
        ));
        session.edit(|draft| {
            draft.set_description("Office rent");
            let first = draft.handles()[0];
            draft.update_line(first, LineField::Account, "1");
            draft.update_line(first, LineField::Debit, "1000");
            let second = draft.add_line();
            draft.update_line(second, LineField::Account, "2");
            draft.update_line(second, LineField::Credit, "1000");
            draft.update_line(second, LineField::Description, "March");
        });
        session
    }

    #[test]
    fn test_prepare_builds_request() {
        let mut session = filled_session();
        let request = SubmissionPipeline::default().prepare(&mut session).unwrap();

        assert_eq!(session.state(), &SubmissionState::Submitting);
        assert_eq!(request.entry_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(request.created_by, "admin");
        assert_eq!(request.lines.len(), 2);
        assert_eq!(request.lines[0].debit, Decimal::from(1000));
        assert_eq!(request.lines[0].description, "");
        assert_eq!(request.lines[1].description, "March");
    }

    #[test]
    fn test_busy_guard() {
        let pipeline = SubmissionPipeline::default();
        let mut session = filled_session();
        pipeline.prepare(&mut session).unwrap();

        let err = pipeline.prepare(&mut session).unwrap_err();
        assert_eq!(err, SubmitError::Busy);
        assert_eq!(session.state(), &SubmissionState::Submitting);
    }

    #[test]
    fn test_invalid_draft_returns_to_editing() {
        let pipeline = SubmissionPipeline::default();
        let mut session = filled_session();
        session.edit(|draft| {
            let second = draft.handles()[1];
            draft.update_line(second, LineField::Credit, "900");
        });
        let before = session.draft().clone();

        let err = pipeline.prepare(&mut session).unwrap_err();
        assert!(err.to_string().contains("amounts must match"));
        assert_eq!(session.state(), &SubmissionState::Editing);
        assert_eq!(session.draft(), &before);
        assert_eq!(
            session.toasts().latest().map(|t| t.message.clone()),
            Some(err.to_string())
        );
    }

    #[test]
    fn test_success_resets_draft() {
        let pipeline = SubmissionPipeline::default();
        let mut session = filled_session();
        pipeline.prepare(&mut session).unwrap();

        let created = pipeline
            .complete(
                &mut session,
                Ok(JournalEntryCreated {
                    message: None,
                    entry_id: Some(42),
                }),
            )
            .unwrap();

        assert_eq!(created.entry_id, Some(42));
        assert_eq!(session.state(), &SubmissionState::Editing);
        assert_eq!(session.draft().len(), 1);
        assert!(session.draft().is_pristine());
        assert_eq!(
            session.toasts().latest().map(|t| t.message.as_str()),
            Some(DEFAULT_SUCCESS_MESSAGE)
        );
        assert!(matches!(session.last_outcome(), Some(Ok(c)) if c.entry_id == Some(42)));
    }

    struct NeverAnswers;

    #[async_trait::async_trait]
    impl AccountingApi for NeverAnswers {
        async fn list_accounts(&self) -> Result<Vec<common::AccountDto>, ApiError> {
            Ok(Vec::new())
        }

        async fn create_journal_entry(
            &self,
            _request: &CreateJournalEntryRequest,
        ) -> Result<JournalEntryCreated, ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_dropped_submit_returns_to_editing() {
        let pipeline = SubmissionPipeline::new(Duration::from_secs(30));
        let mut session = filled_session();
        let before = session.draft().clone();

        let outer = tokio::time::timeout(Duration::from_millis(50), pipeline.submit(&mut session, &NeverAnswers)).await;
        assert!(outer.is_err());

        assert_eq!(session.state(), &SubmissionState::Editing);
        assert_eq!(session.draft(), &before);
        assert_eq!(
            session.toasts().latest().map(|t| t.message.as_str()),
            Some("Submission cancelled")
        );
        assert!(pipeline.prepare(&mut session).is_ok());
    }

    #[test]
    fn test_cancel_after_prepare_allows_resubmit() {
        let pipeline = SubmissionPipeline::default();
        let mut session = filled_session();
        pipeline.prepare(&mut session).unwrap();

        pipeline.cancel(&mut session);
        assert_eq!(session.state(), &SubmissionState::Editing);
        assert!(pipeline.prepare(&mut session).is_ok());
    }

    #[test]
    fn test_server_rejection_keeps_draft() {
        let pipeline = SubmissionPipeline::default();
        let mut session = filled_session();
        let before = session.draft().clone();
        pipeline.prepare(&mut session).unwrap();

        let err = pipeline
            .complete(&mut session, Err(ApiError::Server("fiscal year closed".to_string())))
            .unwrap_err();

        assert_eq!(err, SubmitError::Rejected("fiscal year closed".to_string()));
        assert_eq!(session.draft(), &before);
        assert_eq!(session.state(), &SubmissionState::Editing);
        assert_eq!(
            session.toasts().latest().map(|t| t.message.as_str()),
            Some("fiscal year closed")
        );
    }
}
