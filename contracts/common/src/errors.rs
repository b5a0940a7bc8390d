//! Error Types for CampusPay
//!
//! Typed errors returned by the program's operations. A failed call
//! never mutates program state, so every variant here describes a
//! rejection, not a partial effect.

/// Result type alias for CampusPay operations
pub type CampusPayResult<T> = Result<T, CampusPayError>;

/// Main error enum for all CampusPay program errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampusPayError {
    // ============ Amount Errors ============
    /// Invalid amount provided
    InvalidAmount { amount: u64, reason: AmountErrorReason },

    // ============ Math Errors ============
    /// A counter would exceed u64::MAX
    Overflow,

    // ============ Input Validation Errors ============
    /// Invalid input parameter
    InvalidInput { param: &'static str, reason: &'static str },

    /// Payment output referenced by the call is missing
    MissingPayment,

    /// Witness or state charm could not be decoded
    InvalidSpellFormat,

    // ============ State Errors ============
    /// Claimed output state does not match the computed transition
    InvalidStateTransition,

    /// Program state not found (program was never initialized)
    StateNotFound,

    /// Program state already exists for this instance
    AlreadyInitialized,

    /// Persisted state bytes could not be decoded
    CorruptState { len: usize },
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Amount is zero when non-zero required
    Zero,
}

impl CampusPayError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "E010_INVALID_AMOUNT",
            Self::Overflow => "E080_OVERFLOW",
            Self::InvalidInput { .. } => "E090_INVALID_INPUT",
            Self::MissingPayment => "E091_MISSING_PAYMENT",
            Self::InvalidSpellFormat => "E092_INVALID_SPELL",
            Self::InvalidStateTransition => "E101_INVALID_STATE",
            Self::StateNotFound => "E102_STATE_NOT_FOUND",
            Self::AlreadyInitialized => "E103_ALREADY_INIT",
            Self::CorruptState { .. } => "E104_CORRUPT_STATE",
        }
    }

    /// Returns true if this error is recoverable (caller can fix it)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidAmount { reason: AmountErrorReason::Zero, .. } => true, // Send a real amount
            Self::MissingPayment => true, // Attach the payment
            _ => false,
        }
    }
}

impl core::fmt::Display for CampusPayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidAmount { amount, reason } => {
                write!(f, "{}: amount {} rejected ({:?})", self.code(), amount, reason)
            }
            Self::InvalidInput { param, reason } => {
                write!(f, "{}: {} {}", self.code(), param, reason)
            }
            Self::CorruptState { len } => {
                write!(f, "{}: {} bytes", self.code(), len)
            }
            _ => f.write_str(self.code()),
        }
    }
}
