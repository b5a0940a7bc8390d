//! Core Types for CampusPay
//!
//! Call descriptors, payment evidence and responses shared between the
//! program logic and the host bridges.

use crate::String;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for addresses (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for app identifiers
pub type AppId = [u8; 32];

// ============ Payment Types ============

/// Host-verified evidence that a payment accompanied the current call.
///
/// The host authenticates `sender`, `receiver` and `amount` before the
/// program sees the record; the program reads it and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PaymentRecord {
    /// Paying account
    pub sender: Address,
    /// Receiving account (the program instance)
    pub receiver: Address,
    /// Amount moved, in the host's native base unit
    pub amount: u64,
}

impl PaymentRecord {
    pub fn new(sender: Address, receiver: Address, amount: u64) -> Self {
        Self { sender, receiver, amount }
    }
}

// ============ Call Types ============

/// Callable operations of the program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum CampusPayAction {
    /// Return the fixed welcome string
    Greet,
    /// Record a transaction of a caller-supplied amount
    RegisterTransaction { amount: u64 },
    /// Read both counters
    GetStats,
    /// Record a host-verified payment
    PayAndLog { payment: PaymentRecord },
}

impl CampusPayAction {
    /// Returns true if the action writes program state
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::RegisterTransaction { .. } | Self::PayAndLog { .. })
    }
}

/// Value returned by a successful call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum CallResponse {
    /// `greet` result
    Greeting(String),
    /// `register_transaction` result: new transaction count
    TransactionCount(u64),
    /// `get_stats` result: (total_transactions, total_volume)
    Stats(u64, u64),
    /// `pay_and_log` result
    Confirmation(String),
}

impl CallResponse {
    /// Returns the text payload for string responses
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Greeting(s) | Self::Confirmation(s) => Some(s.as_str()),
            _ => None,
        }
    }
}
