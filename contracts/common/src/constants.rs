//! Program Constants
//!
//! Fixed strings and storage parameters for the CampusPay program.

/// Program Metadata
pub mod app {
    /// Fixed response of `greet`
    pub const GREETING: &str = "Welcome to CampusPay - The Social Finance Platform for Students!";

    /// Label of the host's native base unit, used in payment confirmations
    pub const NATIVE_UNIT: &str = "sats";
}

/// Persistent State Layout
pub mod storage {
    /// Domain separator for the program state slot key
    pub const STATE_SLOT_DOMAIN: &[u8] = b"campuspay/state";

    /// Encoded size of the program state: two adjacent little-endian u64 fields
    pub const STATE_LEN: usize = 16;
}
