//! Budget error types.

use thiserror::Error;

/// Budget line errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Budget line code is blank.
    #[error("Budget line code is required")]
    EmptyCode,

    /// Ceiling or allocation is negative.
    #[error("Budget line {code}: {field} cannot be negative")]
    NegativeAmount {
        /// Budget line code.
        code: String,
        /// Offending field.
        field: &'static str,
    },

    /// Ceiling or allocation has more decimal places than storage keeps.
    #[error("Budget line {code}: {field} has more than two decimal places")]
    TooPrecise {
        /// Budget line code.
        code: String,
        /// Offending field.
        field: &'static str,
    },

    /// Budget line not found.
    #[error("Budget line not found: {0}")]
    NotFound(String),
}
