use crate::api_client::AccountingApi;
use crate::dispatch::{Component, Dispatcher, Effect, Event};
use crate::error::{ApiError, AppError};
use crate::session::UiSession;
use crate::submission::SubmissionPipeline;
use common::JournalEntryCreated;
use model::{DraftDefaults, LineHandle};
use std::time::Duration;
use tracing::{error, info, instrument};

/// What an event produced once its effect has been carried out.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    None,
    LineAdded(LineHandle),
    Submitted(JournalEntryCreated),
    AccountsLoaded(usize),
}

/// One admin session wired to a backend: routes events, performs their
/// effects and keeps the session state.
pub struct AdminApp<A> {
    api: A,
    session: UiSession,
    dispatcher: Dispatcher,
    pipeline: SubmissionPipeline,
}

impl<A: AccountingApi> AdminApp<A> {
    pub fn new(api: A, defaults: DraftDefaults, timeout: Duration) -> Self {
        Self {
            api,
            session: UiSession::new(defaults),
            dispatcher: Dispatcher::new(),
            pipeline: SubmissionPipeline::new(timeout),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Loads the chart of accounts and starts a fresh draft.
    #[instrument(skip_all)]
    pub async fn initialize(&mut self) -> Result<usize, ApiError> {
        match self.api.list_accounts().await {
            Ok(accounts) => {
                let count = accounts.len();
                self.session.initialize(accounts);
                Ok(count)
            }
            Err(err) => {
                error!("Failed to load accounts: {}", err);
                self.session
                    .toasts_mut()
                    .show_error(format!("Failed to load accounts: {err}"));
                Err(err)
            }
        }
    }

    /// Dispatches `event` and performs whatever effect its handler asked for.
    pub async fn handle(&mut self, component: Component, event: Event) -> Result<Reply, AppError> {
        let effect = self.dispatcher.dispatch(&mut self.session, component, &event)?;
        match effect {
            Effect::None => Ok(Reply::None),
            Effect::LineAdded(handle) => Ok(Reply::LineAdded(handle)),
            Effect::Submit => {
                let created = self.pipeline.submit(&mut self.session, &self.api).await?;
                Ok(Reply::Submitted(created))
            }
            Effect::LoadAccounts => {
                let accounts = self.api.refresh_accounts().await.inspect_err(|err| {
                    self.session
                        .toasts_mut()
                        .show_error(format!("Failed to load accounts: {err}"));
                })?;
                info!("Reloaded {} accounts", accounts.len());
                let count = accounts.len();
                self.session.set_accounts(accounts);
                Ok(Reply::AccountsLoaded(count))
            }
        }
    }

    pub fn session(&self) -> &UiSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut UiSession {
        &mut self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn pipeline(&self) -> &SubmissionPipeline {
        &self.pipeline
    }
}
