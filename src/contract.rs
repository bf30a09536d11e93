//! Reusable law checks for strategy implementers.
//!
//! Every conforming strategy must be reflexive and must round-trip through
//! its own serialized form. The core cannot enforce either law, so these
//! checks exist for implementers to call from their own test suites.

use thiserror::Error;

use crate::error::DecodeError;
use crate::strategy::Strategy;

/// A broken strategy law, with the offending mismatch message where one
/// exists.
#[derive(Debug, Error)]
pub enum ContractViolation {
    #[error("compare(x, x) reported a mismatch: {message}")]
    Reflexivity { message: String },

    #[error("decoding a just-encoded value changed it: {message}")]
    RoundTrip { message: String },

    #[error("decoding a just-encoded value failed")]
    Decode(#[from] DecodeError),
}

/// Checks that a value compares equal to itself under the strategy.
pub fn check_reflexive<V>(strategy: &Strategy<V>, value: &V) -> Result<(), ContractViolation> {
    match strategy.compare(value, value) {
        None => Ok(()),
        Some(mismatch) => Err(ContractViolation::Reflexivity {
            message: mismatch.message,
        }),
    }
}

/// Checks that serialize → deserialize reproduces a value the strategy
/// treats as equal to the original.
pub fn check_round_trip<V>(strategy: &Strategy<V>, value: &V) -> Result<(), ContractViolation> {
    let decoded = strategy.deserialize(&strategy.serialize(value))?;
    match strategy.compare(value, &decoded) {
        None => Ok(()),
        Some(mismatch) => Err(ContractViolation::RoundTrip {
            message: mismatch.message,
        }),
    }
}
