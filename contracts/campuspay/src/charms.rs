//! Charms SDK Integration for CampusPay
//!
//! Bridges Charms transactions to the program's call logic.
//!
//! ## UTXO Transformation Model
//!
//! The program state lives in a single state charm. A mutating call spends
//! it and recreates it with the new counters:
//!
//! ```text
//! RegisterTransaction / PayAndLog:
//!   IN:   [State charm (n, v)]
//!   OUT:  [State charm (n + 1, v + amount)]
//!   COIN OUTS: [..., payment output referenced by the witness]
//! ```
//!
//! Greet and GetStats need no state transition. If a state charm is spent
//! anyway it must be recreated unchanged.

use charms_data::{App, Data, Transaction};
use crate::{validate, CampusPayContext, ProgramState};
use campuspay_common::{
    check,
    errors::{CampusPayError, CampusPayResult},
    types::{Address, CampusPayAction, PaymentRecord},
    validation::verify_field_eq,
};

// ============ Operation Codes ============

/// Operation codes for program calls (encoded in witness)
pub mod op {
    /// Create the state charm (deployment)
    pub const INITIALIZE: u8 = 0x00;
    /// Return the welcome string
    pub const GREET: u8 = 0x01;
    /// Record a caller-supplied amount
    pub const REGISTER_TRANSACTION: u8 = 0x02;
    /// Read the counters
    pub const GET_STATS: u8 = 0x03;
    /// Record the payment output referenced by `payment_index`
    pub const PAY_AND_LOG: u8 = 0x04;
}

// ============ Witness Structures ============

/// Witness data for program calls
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CampusPayWitness {
    /// Operation type (see `op` module)
    pub op: u8,
    /// Amount for RegisterTransaction
    pub amount: Option<u64>,
    /// Index into `tx.coin_outs` of the payment for PayAndLog
    pub payment_index: Option<u32>,
    /// Caller / payer address
    pub sender: Option<Address>,
}

impl CampusPayWitness {
    pub fn initialize() -> Self {
        Self::bare(op::INITIALIZE)
    }

    pub fn greet() -> Self {
        Self::bare(op::GREET)
    }

    pub fn register_transaction(amount: u64, sender: Address) -> Self {
        Self {
            op: op::REGISTER_TRANSACTION,
            amount: Some(amount),
            payment_index: None,
            sender: Some(sender),
        }
    }

    pub fn get_stats() -> Self {
        Self::bare(op::GET_STATS)
    }

    pub fn pay_and_log(payment_index: u32, sender: Address) -> Self {
        Self {
            op: op::PAY_AND_LOG,
            amount: None,
            payment_index: Some(payment_index),
            sender: Some(sender),
        }
    }

    fn bare(op: u8) -> Self {
        Self {
            op,
            amount: None,
            payment_index: None,
            sender: None,
        }
    }
}

// ============ Main Validation Function ============

/// Validates a CampusPay call within a Charms transaction.
///
/// # Arguments
/// * `app` - The CampusPay app definition
/// * `tx` - The transaction being validated
/// * `_x` - Public inputs (unused)
/// * `w` - Witness data (call details)
///
/// # Returns
/// `true` if the call is valid, `false` otherwise
pub fn validate_campuspay_operation(
    app: &App,
    tx: &Transaction,
    _x: &Data,
    w: &Data,
) -> bool {
    check_operation(app, tx, w).is_ok()
}

/// Run every check on one call, stopping at the first failure
fn check_operation(app: &App, tx: &Transaction, w: &Data) -> CampusPayResult<()> {
    // 1. Parse witness to get operation
    let witness = parse_witness(w)?;

    // 2. At most one state charm per side, and it must decode
    let input_state = single_state(tx.ins.iter().filter_map(|(_, charms)| charms.get(app)))?;
    let output_state = single_state(tx.outs.iter().filter_map(|charms| charms.get(app)))?;

    // 3. Initialize has no input state
    if witness.op == op::INITIALIZE {
        return validate_initialize(input_state, output_state);
    }

    // 4. Convert to internal action type
    let action = witness_to_action(app, tx, &witness)?;

    let (state, new_state) = match (input_state, output_state) {
        (Some(s), Some(n)) => (s, n),
        // Pure reads may run without touching the state charm
        (None, None) if !action.is_mutating() => return Ok(()),
        (None, None) => return Err(CampusPayError::StateNotFound),
        _ => return Err(CampusPayError::InvalidStateTransition),
    };

    // 5. Build context and check the claimed transition
    let caller = witness.sender.unwrap_or([0u8; 32]);
    let mut ctx = CampusPayContext::new(state, caller, extract_block_height(tx));

    validate(&mut ctx, &action, &new_state).map(|_| ())
}

/// Validate creation of the state charm
fn validate_initialize(
    input_state: Option<ProgramState>,
    output_state: Option<ProgramState>,
) -> CampusPayResult<()> {
    check!(input_state.is_none(), CampusPayError::AlreadyInitialized);

    let state = output_state.ok_or(CampusPayError::StateNotFound)?;
    verify_field_eq(state, ProgramState::initialize())
}

// ============ Parsing Functions ============

/// Parse witness data into CampusPayWitness
fn parse_witness(w: &Data) -> CampusPayResult<CampusPayWitness> {
    w.value::<CampusPayWitness>()
        .map_err(|_| CampusPayError::InvalidSpellFormat)
}

/// Convert witness to internal action type
fn witness_to_action(
    app: &App,
    tx: &Transaction,
    w: &CampusPayWitness,
) -> CampusPayResult<CampusPayAction> {
    match w.op {
        op::GREET => Ok(CampusPayAction::Greet),
        op::REGISTER_TRANSACTION => {
            let amount = w.amount.ok_or(CampusPayError::InvalidInput {
                param: "amount",
                reason: "required by register_transaction",
            })?;
            Ok(CampusPayAction::RegisterTransaction { amount })
        }
        op::GET_STATS => Ok(CampusPayAction::GetStats),
        op::PAY_AND_LOG => {
            let index = w.payment_index.ok_or(CampusPayError::MissingPayment)?;
            Ok(CampusPayAction::PayAndLog {
                payment: extract_payment(app, tx, index, w.sender)?,
            })
        }
        _ => Err(CampusPayError::InvalidSpellFormat),
    }
}

// ============ Transaction Extraction ============

/// Build the payment record from the referenced coin output.
///
/// The Charms runtime has already verified the transaction, so the output
/// amount is trusted as-is; the receiver is this app instance.
fn extract_payment(
    app: &App,
    tx: &Transaction,
    index: u32,
    sender: Option<Address>,
) -> CampusPayResult<PaymentRecord> {
    let output = tx.coin_outs
        .as_ref()
        .and_then(|outs| outs.get(index as usize))
        .ok_or(CampusPayError::MissingPayment)?;

    Ok(PaymentRecord::new(
        sender.unwrap_or([0u8; 32]),
        app.identity.0,
        output.amount,
    ))
}

/// Decode the only state charm among `found`, if any
fn single_state<'a>(
    mut found: impl Iterator<Item = &'a Data>,
) -> CampusPayResult<Option<ProgramState>> {
    let state = match found.next() {
        Some(data) => data
            .value::<ProgramState>()
            .map_err(|_| CampusPayError::InvalidSpellFormat)?,
        None => return Ok(None),
    };

    check!(
        found.next().is_none(),
        CampusPayError::InvalidInput {
            param: "state charm",
            reason: "more than one on one side",
        }
    );

    Ok(Some(state))
}

/// Extract block height from transaction metadata
fn extract_block_height(_tx: &Transaction) -> u64 {
    // Charms does not expose the confirmation height to apps; events carry 0
    0
}

// ============ Tests ============
