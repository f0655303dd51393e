use crate::error::SubmitError;
use crate::submission::SubmissionState;
use crate::toast::ToastQueue;
use common::{AccountDto, JournalEntryCreated};
use compute::{Balance, DraftValidator, compute};
use model::{Draft, DraftDefaults};
use tracing::{debug, info};

/// Result of the most recent submission attempt.
pub type Outcome = Result<JournalEntryCreated, SubmitError>;

/// Everything one admin session holds between events: the journal draft,
/// its running balance, the submission state, the account catalog and the
/// pending toasts.
#[derive(Debug, Clone)]
pub struct UiSession {
    draft: Draft,
    balance: Balance,
    state: SubmissionState,
    accounts: Vec<AccountDto>,
    validator: DraftValidator,
    toasts: ToastQueue,
    last_outcome: Option<Outcome>,
}

impl UiSession {
    pub fn new(defaults: DraftDefaults) -> Self {
        let draft = Draft::new(defaults);
        let balance = compute(&draft);
        Self {
            draft,
            balance,
            state: SubmissionState::Editing,
            accounts: Vec::new(),
            validator: DraftValidator::new(),
            toasts: ToastQueue::new(),
            last_outcome: None,
        }
    }

    /// Installs the account catalog and starts a fresh draft.
    pub fn initialize(&mut self, accounts: Vec<AccountDto>) {
        info!("Initializing session with {} accounts", accounts.len());
        self.set_accounts(accounts);
        self.reset();
    }

    /// Discards the draft and returns to `Editing`. The catalog is kept.
    pub fn reset(&mut self) {
        self.draft.reset();
        self.balance = compute(&self.draft);
        self.state = SubmissionState::Editing;
    }

    /// Applies `edit` to the draft and recomputes the balance.
    pub fn edit<R>(&mut self, edit: impl FnOnce(&mut Draft) -> R) -> R {
        let result = edit(&mut self.draft);
        self.balance = compute(&self.draft);
        debug!(balance = %self.balance, "Draft edited");
        result
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub(crate) fn set_state(&mut self, state: SubmissionState) {
        debug!("Submission state: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn accounts(&self) -> &[AccountDto] {
        &self.accounts
    }

    /// Replaces the catalog. Lines must then reference one of its ids.
    pub fn set_accounts(&mut self, accounts: Vec<AccountDto>) {
        self.validator = DraftValidator::with_known_accounts(accounts.iter().map(|a| a.id));
        self.accounts = accounts;
    }

    pub fn account(&self, account_id: i64) -> Option<&AccountDto> {
        self.accounts.iter().find(|account| account.id == account_id)
    }

    pub fn validator(&self) -> &DraftValidator {
        &self.validator
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub(crate) fn record_outcome(&mut self, outcome: Outcome) {
        self.last_outcome = Some(outcome);
    }
}

impl Default for UiSession {
    fn default() -> Self {
        Self::new(DraftDefaults::default())
    }
}
