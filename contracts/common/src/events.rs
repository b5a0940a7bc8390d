//! Program Events for CampusPay
//!
//! Events are emitted during call execution and can be indexed
//! off-chain for dashboards and notifications. Only successful
//! mutating calls emit; reads and rejected calls leave the log empty.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::types::Address;

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Lifecycle Events (0x01 - 0x0F)
    ProgramInitialized = 0x01,

    // Accounting Events (0x10 - 0x1F)
    TransactionRegistered = 0x10,
    PaymentLogged = 0x11,
}

/// Main event enum containing all possible program events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum CampusPayEvent {
    /// Emitted once when the program state is created
    ProgramInitialized {
        block_height: u64,
    },

    /// Emitted when `register_transaction` commits
    TransactionRegistered {
        caller: Address,
        amount: u64,
        total_transactions: u64,
        total_volume: u64,
        block_height: u64,
    },

    /// Emitted when `pay_and_log` commits
    PaymentLogged {
        sender: Address,
        receiver: Address,
        amount: u64,
        total_transactions: u64,
        total_volume: u64,
        block_height: u64,
    },
}

impl CampusPayEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::ProgramInitialized { .. } => EventType::ProgramInitialized,
            Self::TransactionRegistered { .. } => EventType::TransactionRegistered,
            Self::PaymentLogged { .. } => EventType::PaymentLogged,
        }
    }

    /// Get the block height when event occurred
    pub fn block_height(&self) -> u64 {
        match self {
            Self::ProgramInitialized { block_height } => *block_height,
            Self::TransactionRegistered { block_height, .. } => *block_height,
            Self::PaymentLogged { block_height, .. } => *block_height,
        }
    }

    /// Amount recorded by the event (zero for lifecycle events)
    pub fn amount(&self) -> u64 {
        match self {
            Self::ProgramInitialized { .. } => 0,
            Self::TransactionRegistered { amount, .. } => *amount,
            Self::PaymentLogged { amount, .. } => *amount,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting events during one call
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CampusPayEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: CampusPayEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CampusPayEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<CampusPayEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&CampusPayEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = CampusPayEvent::PaymentLogged {
            sender: [1u8; 32],
            receiver: [2u8; 32],
            amount: 10,
            total_transactions: 1,
            total_volume: 10,
            block_height: 100,
        };

        assert_eq!(event.event_type(), EventType::PaymentLogged);
        assert_eq!(event.block_height(), 100);
        assert_eq!(event.amount(), 10);
    }

    #[test]
    fn test_event_serialization() {
        let event = CampusPayEvent::TransactionRegistered {
            caller: [7u8; 32],
            amount: 250,
            total_transactions: 3,
            total_volume: 900,
            block_height: 42,
        };

        let bytes = event.to_bytes();
        let restored = CampusPayEvent::from_bytes(&bytes).unwrap();

        assert_eq!(event, restored);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(CampusPayEvent::from_bytes(&[0xFF, 0x00]).is_none());
    }

    #[test]
    fn test_event_log() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.emit(CampusPayEvent::ProgramInitialized { block_height: 1 });
        log.emit(CampusPayEvent::TransactionRegistered {
            caller: [2u8; 32],
            amount: 100,
            total_transactions: 1,
            total_volume: 100,
            block_height: 2,
        });

        assert_eq!(log.len(), 2);
        assert!(log.has_events());

        let registered = log.filter_by_type(EventType::TransactionRegistered);
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].amount(), 100);

        log.clear();
        assert!(!log.has_events());
    }
}
