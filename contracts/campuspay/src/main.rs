//! CampusPay - Charms App Entry Point
//!
//! This app validates CampusPay calls on Bitcoin using client-side validation.
//!
//! ## What This App Validates
//!
//! - **Initialize**: State charm is created with both counters at zero
//! - **RegisterTransaction**: Counters advance by one call and the given amount
//! - **PayAndLog**: Counters advance by one call and the referenced payment
//! - **Greet / GetStats**: State charm, if spent, is recreated unchanged

use charms_sdk::data::{App, Data, Transaction};

/// Main validation function for CampusPay calls.
///
/// # Arguments
/// * `app` - The CampusPay app definition
/// * `tx` - The transaction being validated
/// * `x` - Public inputs
/// * `w` - Witness data (call details)
///
/// # Returns
/// `true` if the call is valid, `false` otherwise
pub fn app_contract(app: &App, tx: &Transaction, x: &Data, w: &Data) -> bool {
    campuspay::charms::validate_campuspay_operation(app, tx, x, w)
}

// Use the Charms SDK main macro to generate the entry point
charms_sdk::main!(app_contract);
