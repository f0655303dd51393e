use crate::dispatch::{Component, EventKind};
use compute::ValidationError;
use std::time::Duration;
use thiserror::Error;

/// Failures talking to the accounting backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network failure or connection refused
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// No response within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx status without an `error` body
    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    /// Body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The backend answered with an `{error}` body; the message is verbatim
    #[error("{0}")]
    Server(String),

    /// A request that failed client-side form checks and was never sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Local file could not be read or written
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// True when the backend itself rejected the request.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, ApiError::Server(_))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::InvalidRequest(describe_validation_errors(&errors))
    }
}

/// Flattens validator output into one line, using the field messages.
fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    if messages.is_empty() {
        messages.push(errors.to_string());
    }
    messages.sort();
    messages.join("; ")
}

/// Why a journal entry submission did not go through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// A submission is already in flight
    #[error("A journal entry is already being submitted")]
    Busy,

    /// Local validation failed; nothing was sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The backend rejected the entry; the message is shown verbatim
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a usable answer
    #[error("Failed to create journal entry: {0}")]
    Transport(String),
}

impl SubmitError {
    /// True when nothing reached the network.
    pub fn is_local(&self) -> bool {
        matches!(self, SubmitError::Busy | SubmitError::Invalid(_))
    }
}

impl From<ApiError> for SubmitError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Server(message) => SubmitError::Rejected(message),
            other => SubmitError::Transport(other.to_string()),
        }
    }
}

/// Failures routing an event to its handler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("No handler registered for {kind:?} on {component:?}")]
    Unhandled { component: Component, kind: EventKind },

    #[error("Handler for {expected:?} received a {actual:?} event")]
    PayloadMismatch { expected: EventKind, actual: EventKind },
}

/// Top-level error of the admin application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
