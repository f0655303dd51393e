use crate::balance::{Balance, compute};
use crate::error::{Result, ValidationError};
use model::Draft;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Checks a draft before it may be sent to the backend.
///
/// Only the first violation is reported. Checks run in this order: entry
/// date, description, author, presence of lines, then every line in display
/// order (account chosen, account known, amount present), then that the
/// totals fit, then the balance.
#[derive(Debug, Clone, Default)]
pub struct DraftValidator {
    known_accounts: Option<HashSet<i64>>,
}

impl DraftValidator {
    /// Validator that only checks that every line has some account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator that also requires every account id to be one of `ids`.
    pub fn with_known_accounts(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            known_accounts: Some(ids.into_iter().collect()),
        }
    }

    pub fn knows_accounts(&self) -> bool {
        self.known_accounts.is_some()
    }

    /// Returns the draft's balance if it may be submitted.
    #[instrument(skip_all, fields(lines = draft.len()))]
    pub fn validate(&self, draft: &Draft) -> Result<Balance> {
        let outcome = self.check(draft);
        if let Err(err) = &outcome {
            debug!(%err, "Draft failed validation");
        }
        outcome
    }

    fn check(&self, draft: &Draft) -> Result<Balance> {
        if draft.entry_date().is_none() {
            return Err(ValidationError::MissingEntryDate);
        }
        if draft.description().trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if draft.created_by().trim().is_empty() {
            return Err(ValidationError::MissingAuthor);
        }
        if draft.is_empty() {
            return Err(ValidationError::NoLines);
        }

        for (index, line) in draft.lines().enumerate() {
            let position = index + 1;
            let Some(account_id) = line.account_id() else {
                return Err(ValidationError::MissingAccount { line: position });
            };
            if let Some(known) = &self.known_accounts {
                if !known.contains(&account_id) {
                    return Err(ValidationError::UnknownAccount {
                        line: position,
                        account_id,
                    });
                }
            }
            if line.has_no_amount() {
                return Err(ValidationError::MissingAmount { line: position });
            }
        }

        let balance = compute(draft);
        if balance.overflowed {
            return Err(ValidationError::AmountOverflow);
        }
        if !balance.is_balanced() {
            return Err(ValidationError::Unbalanced {
                total_debit: balance.total_debit,
                total_credit: balance.total_credit,
            });
        }
        Ok(balance)
    }
}
