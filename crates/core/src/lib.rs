//! Core business logic for SPPD travel cost management.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `rates` - Per-destination standard rate table
//! - `travel` - Assignments, cost derivation, totals and validation
//! - `budget` - Budget lines and realization reports
//! - `integrity` - Deletion guards for referenced records
//! - `dashboard` - Travel statistics and traveler history
//! - `document` - Figures for printed documents

pub mod budget;
pub mod dashboard;
pub mod document;
pub mod integrity;
pub mod rates;
pub mod travel;
