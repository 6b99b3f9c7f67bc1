//! Dashboard statistics.
//!
//! This module provides:
//! - Assignment counts by travel type and destination
//! - Per-traveler trip history

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::*;
