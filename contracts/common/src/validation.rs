//! Validation Helpers for CampusPay
//!
//! Reusable checks shared by the operation handlers and the host bridge.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campuspay_common::validation::{check, require_positive_amount};
//!
//! check!(payment.amount > 0, CampusPayError::MissingPayment);
//! require_positive_amount(amount)?;
//! ```

use crate::errors::{AmountErrorReason, CampusPayError, CampusPayResult};

// ============ Validation Macro ============

/// Check a condition and return an error if it fails.
///
/// # Examples
///
/// ```rust,ignore
/// check!(amount > 0, CampusPayError::InvalidAmount {
///     amount,
///     reason: AmountErrorReason::Zero,
/// });
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr, $error:expr) => {
        if !($condition) {
            return Err($error);
        }
    };
}

pub use check;

// ============ Amount Helpers ============

/// Require an amount to be strictly positive.
///
/// Both mutating entry points funnel through this check so that
/// `total_volume` only ever grows by validated amounts.
pub fn require_positive_amount(amount: u64) -> CampusPayResult<()> {
    check!(
        amount > 0,
        CampusPayError::InvalidAmount {
            amount,
            reason: AmountErrorReason::Zero,
        }
    );
    Ok(())
}

/// Add `delta` to a counter, failing with `err` instead of wrapping.
pub fn checked_increment(counter: u64, delta: u64, err: CampusPayError) -> CampusPayResult<u64> {
    counter.checked_add(delta).ok_or(err)
}

// ============ State Transition Helpers ============

/// Verify a field value matches expected.
pub fn verify_field_eq<T: PartialEq>(actual: T, expected: T) -> CampusPayResult<()> {
    if actual != expected {
        return Err(CampusPayError::InvalidStateTransition);
    }
    Ok(())
}

/// Verify a counter moved forward by exactly `expected_delta`.
pub fn verify_counter_delta(old_value: u64, new_value: u64, expected_delta: u64) -> CampusPayResult<()> {
    match old_value.checked_add(expected_delta) {
        Some(expected) if expected == new_value => Ok(()),
        _ => Err(CampusPayError::InvalidStateTransition),
    }
}

// ============ Tests ============
