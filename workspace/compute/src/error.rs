use rust_decimal::Decimal;
use thiserror::Error;

/// First rule a journal draft breaks, in check order.
///
/// Line numbers are 1-based display positions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Entry date is required")]
    MissingEntryDate,

    #[error("Description is required")]
    MissingDescription,

    #[error("Author is required")]
    MissingAuthor,

    #[error("At least one journal line is required")]
    NoLines,

    #[error("Line {line}: select an account")]
    MissingAccount { line: usize },

    #[error("Line {line}: unknown account {account_id}")]
    UnknownAccount { line: usize, account_id: i64 },

    #[error("Line {line}: enter a debit or credit amount")]
    MissingAmount { line: usize },

    #[error("Amounts are too large to total")]
    AmountOverflow,

    #[error("Debit and credit amounts must match (debit {total_debit}, credit {total_credit})")]
    Unbalanced {
        total_debit: Decimal,
        total_credit: Decimal,
    },
}

impl ValidationError {
    /// Display position of the offending line, if the error concerns one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ValidationError::MissingAccount { line }
            | ValidationError::UnknownAccount { line, .. }
            | ValidationError::MissingAmount { line } => Some(*line),
            _ => None,
        }
    }
}

/// Type alias for Result with ValidationError
pub type Result<T> = std::result::Result<T, ValidationError>;
