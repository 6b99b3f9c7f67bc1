//! Rate table error types.

use thiserror::Error;

/// Rate table errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    /// Destination key is blank.
    #[error("Rate entry destination cannot be empty")]
    EmptyDestination,

    /// A rate amount is negative.
    #[error("Rate field '{field}' cannot be negative for destination '{destination}'")]
    NegativeAmount {
        /// Destination of the rejected entry.
        destination: String,
        /// Offending field.
        field: &'static str,
    },

    /// A rate amount has more decimal places than storage keeps.
    #[error("Rate field '{field}' has more than two decimal places for destination '{destination}'")]
    TooPrecise {
        /// Destination of the rejected entry.
        destination: String,
        /// Offending field.
        field: &'static str,
    },

    /// No entry exists for the destination.
    #[error("Rate entry not found for destination: {0}")]
    NotFound(String),
}
