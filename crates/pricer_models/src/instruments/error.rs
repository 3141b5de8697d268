//! Instrument error types.

use thiserror::Error;

/// Instrument-related errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidOptionKind { value: "straddle".to_string() };
/// assert!(format!("{}", err).contains("straddle"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstrumentError {
    /// Option kind string is neither "call" nor "put".
    #[error("Invalid option kind: {value:?} (expected \"call\" or \"put\")")]
    InvalidOptionKind {
        /// The rejected input
        value: String,
    },
}
