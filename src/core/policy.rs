//! Fine policy
//!
//! Maps a classification and a base amount to the amount actually charged.
//! Dispatch is an exhaustive match over the closed `FineClassification` set;
//! a new classification is a new arm here and nowhere else.
//!
//! Amounts are not validated: zero and negative bases are transformed
//! arithmetically like any other value.

use crate::types::FineClassification;
use rust_decimal::Decimal;

/// Compute the adjusted amount for a base amount
///
/// # Returns
///
/// * `Some(amount)` - `base` for standard fines, `base * 2` for heavy fines
/// * `None` - If doubling would overflow `Decimal`
pub fn adjusted_amount(classification: FineClassification, base: Decimal) -> Option<Decimal> {
    match classification {
        FineClassification::Standard => Some(base),
        FineClassification::Heavy => base.checked_mul(Decimal::TWO),
    }
}

/// Human-readable line naming the applied policy and the adjusted amount
pub fn policy_line(classification: FineClassification, adjusted: Decimal) -> String {
    match classification {
        FineClassification::Standard => {
            format!("Applying standard fine policy: {:.2}", adjusted)
        }
        FineClassification::Heavy => {
            format!(
                "Applying heavy fine policy with double the amount: {:.2}",
                adjusted
            )
        }
    }
}
