//! Per-destination standard cost rates (the "master cost" table).

pub mod error;
pub mod types;

pub use error::RateError;
pub use types::{RateEntry, RateTable};
