//! Error types for the interaction engines.
//!
//! Only construction can fail. Steady-state anomalies (empty item lists,
//! out-of-range selections, degenerate containers, missing measurements)
//! are absorbed by the engines and never surface here.

use std::fmt;

/// Result type alias for engine construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration error raised when an engine is built with invalid options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Auto-advance interval must be a positive number of milliseconds.
    InvalidInterval { interval_ms: u64 },
    /// Progress sub-tick must be a positive number of milliseconds.
    InvalidSubTick { sub_tick_ms: u64 },
    /// Non-finite or negative spacing value in placement options.
    InvalidSpacing { name: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval { interval_ms } => {
                write!(f, "invalid auto-advance interval: {interval_ms}ms")
            }
            Self::InvalidSubTick { sub_tick_ms } => {
                write!(f, "invalid progress sub-tick: {sub_tick_ms}ms")
            }
            Self::InvalidSpacing { name, value } => {
                write!(f, "invalid {name}: {value}")
            }
        }
    }
}

impl std::error::Error for Error {}
