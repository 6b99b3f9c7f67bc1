//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{AMOUNT_SCALE, fits_amount_scale, format_rupiah, parse_amount, try_parse_amount};
