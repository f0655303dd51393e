//! Admin client for a small accounting backend.
//!
//! The journal workflow lives here: a [`session::UiSession`] holds the draft,
//! a [`dispatch::Dispatcher`] routes form events to it and a
//! [`submission::SubmissionPipeline`] validates and sends the result through
//! an [`api_client::AccountingApi`]. The other admin sections are thin calls
//! on [`api_client::ApiClient`].

pub mod api_client;
pub mod app;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod draft_file;
pub mod error;
pub mod session;
pub mod submission;
pub mod toast;

pub use api_client::{AccountingApi, ApiClient};
pub use app::{AdminApp, Reply};
pub use config::AppSettings;
pub use error::{ApiError, AppError, DispatchError, SubmitError};

#[cfg(test)]
mod test_utils;
