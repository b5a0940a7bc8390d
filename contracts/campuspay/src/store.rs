//! Persistent State Host
//!
//! The program never owns its state across calls: the host loads the
//! committed bytes, runs one call, and writes the new state back only if
//! the call succeeded. `MemoryStore` is the in-memory host used when no
//! ledger runtime sits underneath (tests, simulations).

use std::collections::BTreeMap;
use std::vec::Vec;
use sha2::{Digest, Sha256};

use campuspay_common::{
    constants::storage::STATE_SLOT_DOMAIN,
    errors::{CampusPayError, CampusPayResult},
    events::{CampusPayEvent, EventLog},
    types::{Address, AppId, CallResponse, CampusPayAction},
};

use crate::{execute, CampusPayContext, ProgramState};

/// Key of a persistent slot
pub type SlotKey = [u8; 32];

/// Derive the slot holding the state of one program instance
pub fn state_slot_key(app_id: &AppId) -> SlotKey {
    let mut hasher = Sha256::new();
    hasher.update(STATE_SLOT_DOMAIN);
    hasher.update(app_id);
    let result = hasher.finalize();
    let mut key = [0u8; 32];
    key.copy_from_slice(&result);
    key
}

// ============ Store Trait ============

/// Host persistent key/slot storage
pub trait StateStore {
    /// Read the bytes committed under `key`
    fn load(&self, key: &SlotKey) -> Option<Vec<u8>>;

    /// Commit `bytes` under `key`
    fn save(&mut self, key: SlotKey, bytes: Vec<u8>);
}

/// In-memory slot storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<SlotKey, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &SlotKey) -> Option<Vec<u8>> {
        self.slots.get(key).cloned()
    }

    fn save(&mut self, key: SlotKey, bytes: Vec<u8>) {
        self.slots.insert(key, bytes);
    }
}

// ============ Program Instance ============

/// Result of a committed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Value returned to the caller
    pub response: CallResponse,
    /// Events emitted by the call
    pub events: Vec<CampusPayEvent>,
}

/// A deployed program instance bound to a store.
///
/// Calls are applied one at a time through `&mut self`; the store is
/// written only after a call succeeds.
pub struct Program<S: StateStore> {
    store: S,
    slot: SlotKey,
}

impl<S: StateStore> Program<S> {
    pub fn new(store: S, app_id: AppId) -> Self {
        Self {
            store,
            slot: state_slot_key(&app_id),
        }
    }

    /// Create the program state. Allowed once per instance.
    pub fn deploy(&mut self, block_height: u64) -> CampusPayResult<Vec<CampusPayEvent>> {
        if self.store.load(&self.slot).is_some() {
            return Err(CampusPayError::AlreadyInitialized);
        }

        self.store.save(self.slot, ProgramState::initialize().to_bytes());

        let mut events = EventLog::new();
        events.emit(CampusPayEvent::ProgramInitialized { block_height });
        Ok(events.into_events())
    }

    /// Load the committed state
    pub fn load_state(&self) -> CampusPayResult<ProgramState> {
        let bytes = self.store.load(&self.slot).ok_or(CampusPayError::StateNotFound)?;
        ProgramState::from_bytes(&bytes)
    }

    /// Run one call and commit its state if it succeeds
    pub fn invoke(
        &mut self,
        caller: Address,
        block_height: u64,
        action: &CampusPayAction,
    ) -> CampusPayResult<Receipt> {
        let state = self.load_state()?;
        let mut ctx = CampusPayContext::new(state, caller, block_height);

        let transition = execute(&mut ctx, action)?;

        if transition.new_state != state {
            self.store.save(self.slot, transition.new_state.to_bytes());
        }

        Ok(Receipt {
            response: transition.response,
            events: ctx.events.into_events(),
        })
    }

    /// Committed `(total_transactions, total_volume)`
    pub fn stats(&self) -> CampusPayResult<(u64, u64)> {
        self.load_state().map(|state| crate::get_stats(&state))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
