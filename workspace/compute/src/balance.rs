use model::{Draft, Line};
use rust_decimal::Decimal;
use std::fmt;
use tracing::trace;

/// Per-side totals of a draft. Derived on demand, never stored with the draft.
///
/// A side whose sum does not fit in a `Decimal` saturates at `Decimal::MAX`
/// and sets `overflowed`; such a balance is never balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub overflowed: bool,
}

impl Balance {
    /// Sums any sequence of lines with exact decimal addition.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a Line>) -> Self {
        lines.into_iter().fold(Balance::default(), |acc, line| {
            let debit = acc.total_debit.checked_add(line.debit());
            let credit = acc.total_credit.checked_add(line.credit());
            Balance {
                total_debit: debit.unwrap_or(Decimal::MAX),
                total_credit: credit.unwrap_or(Decimal::MAX),
                overflowed: acc.overflowed || debit.is_none() || credit.is_none(),
            }
        })
    }

    /// Debit minus credit.
    pub fn difference(&self) -> Decimal {
        self.total_debit.saturating_sub(self.total_credit)
    }

    /// Exact equality; there is no tolerance band for currency amounts.
    pub fn is_balanced(&self) -> bool {
        !self.overflowed && self.total_debit == self.total_credit
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overflowed {
            return f.write_str("amount overflow");
        }
        write!(
            f,
            "debit {} / credit {}",
            self.total_debit.normalize(),
            self.total_credit.normalize()
        )
    }
}

/// Computes the totals of every line in the draft.
pub fn compute(draft: &Draft) -> Balance {
    let balance = Balance::from_lines(draft.lines());
    trace!(
        total_debit = %balance.total_debit,
        total_credit = %balance.total_credit,
        lines = draft.len(),
        "Computed draft balance"
    );
    balance
}

pub fn is_balanced(balance: &Balance) -> bool {
    balance.is_balanced()
}
