use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a user-entered amount.
///
/// Surrounding whitespace and `,` thousands separators are ignored. Returns
/// `None` for anything that is not a decimal number.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Parses an amount field the way the journal form does: invalid or negative
/// input becomes zero and never raises.
pub fn coerce_amount(input: &str) -> Decimal {
    match parse_amount(input) {
        Some(value) if value.is_sign_negative() => {
            tracing::debug!(input, "Negative amount coerced to zero");
            Decimal::ZERO
        }
        Some(value) => value,
        None => {
            if !input.trim().is_empty() {
                tracing::debug!(input, "Non-numeric amount coerced to zero");
            }
            Decimal::ZERO
        }
    }
}
