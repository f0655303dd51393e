use common::coerce_amount;
use rust_decimal::Decimal;
use std::fmt;

/// Stable reference to a line inside one [`crate::Draft`].
///
/// Handles are issued monotonically and never reused, so a handle that was
/// removed can never alias a line added later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineHandle(u64);

impl LineHandle {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Editable fields of a [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    Account,
    Debit,
    Credit,
    Description,
}

/// One debit-or-credit row of a journal entry draft.
///
/// `account_id` is `None` until the user picks an account. Amounts are never
/// negative; the setters coerce anything invalid to zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    account_id: Option<i64>,
    debit: Decimal,
    credit: Decimal,
    description: String,
}

impl Line {
    /// Creates a blank line: no account, both amounts zero, empty memo.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Creates a line with the given account and amounts. Negative amounts are
    /// clamped to zero.
    pub fn new(account_id: Option<i64>, debit: Decimal, credit: Decimal) -> Self {
        Self {
            account_id,
            debit: debit.max(Decimal::ZERO),
            credit: credit.max(Decimal::ZERO),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn account_id(&self) -> Option<i64> {
        self.account_id
    }

    pub fn debit(&self) -> Decimal {
        self.debit
    }

    pub fn credit(&self) -> Decimal {
        self.credit
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_account_id(&mut self, account_id: Option<i64>) {
        self.account_id = account_id;
    }

    pub fn set_debit(&mut self, debit: Decimal) {
        self.debit = debit.max(Decimal::ZERO);
    }

    pub fn set_credit(&mut self, credit: Decimal) {
        self.credit = credit.max(Decimal::ZERO);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Applies raw user input to one field. Never fails: an unparsable account
    /// leaves the line unresolved and unparsable amounts become zero.
    pub fn apply(&mut self, field: LineField, value: &str) {
        match field {
            LineField::Account => self.account_id = value.trim().parse::<i64>().ok(),
            LineField::Debit => self.debit = coerce_amount(value),
            LineField::Credit => self.credit = coerce_amount(value),
            LineField::Description => self.description = value.to_string(),
        }
    }

    /// True when neither side carries an amount.
    pub fn has_no_amount(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    pub fn is_blank(&self) -> bool {
        self == &Self::blank()
    }
}
