use thiserror::Error;

use dgb_core::DgbError;

/// Failures of the monetary-policy core.
///
/// Both variants are deterministic: the same schedule and height always
/// produce the same error, so callers never retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmissionError {
    /// The era table violates ordering, contiguity, or coverage of `[0, ∞)`.
    /// Fatal at start-up.
    #[error("Malformed emission schedule: {0}")]
    MalformedSchedule(String),

    /// A negative block height was supplied.
    #[error("Invalid height: {0}")]
    InvalidHeight(i64),
}

impl From<EmissionError> for DgbError {
    fn from(e: EmissionError) -> Self {
        match e {
            EmissionError::MalformedSchedule(msg) => DgbError::Consensus(msg),
            EmissionError::InvalidHeight(h) => {
                DgbError::InvalidParameter(format!("block height {} is negative", h))
            }
        }
    }
}
