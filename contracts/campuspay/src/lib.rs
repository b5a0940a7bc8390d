//! CampusPay Ledger Program
//!
//! Keeps two aggregate counters for a deployed program instance: the number
//! of recorded transactions and the cumulative volume they moved. Payments
//! are validated before they are recorded.
//!
//! ## Call Model
//!
//! Every call is a pure transition:
//!
//! ```text
//! (ProgramState, action, [verified payment]) -> (new ProgramState, response) | error
//! ```
//!
//! The hosting ledger serializes calls and commits the new state atomically.
//! A rejected call leaves the state exactly as it was.
//!
//! ## Charms Integration
//!
//! When compiled with the `charms` feature, this crate provides a Charms
//! app entry point via the `charms` module.

use std::{string::String, vec::Vec};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

#[cfg(feature = "charms")]
pub mod charms;
pub mod store;

#[cfg(test)]
mod integration_tests;

use campuspay_common::{
    constants::{app, storage},
    errors::{CampusPayError, CampusPayResult},
    events::{CampusPayEvent, EventLog},
    types::{Address, CallResponse, CampusPayAction, PaymentRecord},
    validation::{checked_increment, require_positive_amount, verify_counter_delta, verify_field_eq},
};

// ============ Program State ============

/// Persistent program state: two adjacent u64 counters.
///
/// Both counters only move through [`ProgramState::apply`], so a reader
/// never sees one updated without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct ProgramState {
    /// Number of successful mutating calls
    total_transactions: u64,
    /// Sum of validated amounts across those calls
    total_volume: u64,
}

impl ProgramState {
    /// Create the state of a freshly deployed program
    pub const fn initialize() -> Self {
        Self {
            total_transactions: 0,
            total_volume: 0,
        }
    }

    /// Record one mutating call that moved `delta_volume`.
    ///
    /// The transaction count always advances by exactly one. Both sums are
    /// computed before either field is written, so an overflow leaves the
    /// state untouched.
    pub fn apply(&mut self, delta_volume: u64) -> CampusPayResult<Stats> {
        let total_transactions =
            checked_increment(self.total_transactions, 1, CampusPayError::Overflow)?;
        let total_volume =
            checked_increment(self.total_volume, delta_volume, CampusPayError::Overflow)?;

        self.total_transactions = total_transactions;
        self.total_volume = total_volume;

        Ok(self.snapshot())
    }

    pub fn total_transactions(&self) -> u64 {
        self.total_transactions
    }

    pub fn total_volume(&self) -> u64 {
        self.total_volume
    }

    /// Read both counters without mutation
    pub fn snapshot(&self) -> Stats {
        Stats {
            total_transactions: self.total_transactions,
            total_volume: self.total_volume,
        }
    }

    /// Encode for the host's persistent slot (16 bytes, little-endian)
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Decode from the host's persistent slot
    pub fn from_bytes(bytes: &[u8]) -> CampusPayResult<Self> {
        if bytes.len() != storage::STATE_LEN {
            return Err(CampusPayError::CorruptState { len: bytes.len() });
        }
        borsh::from_slice(bytes).map_err(|_| CampusPayError::CorruptState { len: bytes.len() })
    }

    #[cfg(test)]
    pub(crate) const fn from_counters(total_transactions: u64, total_volume: u64) -> Self {
        Self {
            total_transactions,
            total_volume,
        }
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_transactions: u64,
    pub total_volume: u64,
}

impl From<Stats> for (u64, u64) {
    fn from(stats: Stats) -> Self {
        (stats.total_transactions, stats.total_volume)
    }
}

// ============ Call Context ============

/// Context for one call, as furnished by the host
pub struct CampusPayContext {
    /// State committed before this call
    pub state: ProgramState,
    /// Authenticated caller
    pub caller: Address,
    /// Current block height
    pub block_height: u64,
    /// Event log for emitting events
    pub events: EventLog,
}

impl CampusPayContext {
    pub fn new(state: ProgramState, caller: Address, block_height: u64) -> Self {
        Self {
            state,
            caller,
            block_height,
            events: EventLog::new(),
        }
    }
}

/// Outcome of a successful call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State the host should commit
    pub new_state: ProgramState,
    /// Value returned to the caller
    pub response: CallResponse,
}

// ============ Operations ============

/// Main execution entry point: dispatch a call and compute its transition.
///
/// `ctx.state` is never modified; the new state is returned for the host
/// to commit.
pub fn execute(ctx: &mut CampusPayContext, action: &CampusPayAction) -> CampusPayResult<Transition> {
    match action {
        CampusPayAction::Greet => Ok(Transition {
            new_state: ctx.state,
            response: CallResponse::Greeting(String::from(greet())),
        }),
        CampusPayAction::RegisterTransaction { amount } => {
            let (new_state, count) = register_transaction(ctx, *amount)?;
            Ok(Transition {
                new_state,
                response: CallResponse::TransactionCount(count),
            })
        }
        CampusPayAction::GetStats => {
            let (total_transactions, total_volume) = get_stats(&ctx.state);
            Ok(Transition {
                new_state: ctx.state,
                response: CallResponse::Stats(total_transactions, total_volume),
            })
        }
        CampusPayAction::PayAndLog { payment } => {
            let (new_state, confirmation) = pay_and_log(ctx, payment)?;
            Ok(Transition {
                new_state,
                response: CallResponse::Confirmation(confirmation),
            })
        }
    }
}

/// Fixed welcome string
pub fn greet() -> &'static str {
    app::GREETING
}

/// Record a transaction of a caller-supplied amount.
///
/// Returns the new state and the new transaction count.
pub fn register_transaction(
    ctx: &mut CampusPayContext,
    amount: u64,
) -> CampusPayResult<(ProgramState, u64)> {
    // 1. Amount must be positive
    require_positive_amount(amount)?;

    // 2. Apply to a copy of the committed state
    let mut new_state = ctx.state;
    let stats = new_state.apply(amount)?;

    // 3. Emit event
    ctx.events.emit(CampusPayEvent::TransactionRegistered {
        caller: ctx.caller,
        amount,
        total_transactions: stats.total_transactions,
        total_volume: stats.total_volume,
        block_height: ctx.block_height,
    });

    Ok((new_state, stats.total_transactions))
}

/// Read both counters as `(total_transactions, total_volume)`
pub fn get_stats(state: &ProgramState) -> (u64, u64) {
    state.snapshot().into()
}

/// Record a host-verified payment.
///
/// Only the ledger-verified `payment.amount` is trusted. Returns the new
/// state and a confirmation message.
pub fn pay_and_log(
    ctx: &mut CampusPayContext,
    payment: &PaymentRecord,
) -> CampusPayResult<(ProgramState, String)> {
    // 1. Payment must carry value
    require_positive_amount(payment.amount)?;

    // 2. Apply to a copy of the committed state
    let mut new_state = ctx.state;
    let stats = new_state.apply(payment.amount)?;

    // 3. Emit event
    ctx.events.emit(CampusPayEvent::PaymentLogged {
        sender: payment.sender,
        receiver: payment.receiver,
        amount: payment.amount,
        total_transactions: stats.total_transactions,
        total_volume: stats.total_volume,
        block_height: ctx.block_height,
    });

    Ok((new_state, confirmation_message(payment.amount)))
}

/// Human-readable confirmation returned by `pay_and_log`
pub fn confirmation_message(amount: u64) -> String {
    format!("Transaction of {} {} logged successfully.", amount, app::NATIVE_UNIT)
}

// ============ Validation ============

/// Validate a transition claimed by a transaction against the one the
/// program computes.
///
/// Used by host bridges where the new state is supplied as a transaction
/// output rather than written by the program.
pub fn validate(
    ctx: &mut CampusPayContext,
    action: &CampusPayAction,
    claimed: &ProgramState,
) -> CampusPayResult<CallResponse> {
    // 1. Compute the transition
    let transition = execute(ctx, action)?;

    // 2. Transaction count moves by exactly one per mutating call
    let expected_delta = if action.is_mutating() { 1 } else { 0 };
    let counted = verify_counter_delta(
        ctx.state.total_transactions(),
        claimed.total_transactions(),
        expected_delta,
    );

    // 3. Claimed state must match the computed one
    if let Err(err) = counted.and_then(|_| verify_field_eq(claimed, &transition.new_state)) {
        ctx.events.clear();
        return Err(err);
    }

    Ok(transition.response)
}

// ============ Tests ============
