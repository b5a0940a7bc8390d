//! CampusPay Common Library
//!
//! Shared types, constants, errors and events for the CampusPay ledger
//! program and its host bridges.
//!
//! The program keeps two aggregate counters (transaction count and total
//! volume). Every call is a pure transition from the current state to a
//! new state or a rejection; the hosting ledger commits the result
//! atomically.
//!
//! This crate is `no_std` compatible for WASM compilation when built
//! without the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export Vec and String for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
pub use std::{string::String, vec::Vec};

pub mod constants;
pub mod errors;
pub mod types;
pub mod events;
pub mod validation;

// Re-exports for convenience
pub use errors::*;
pub use types::*;
pub use events::*;
