//! Shared types, errors, and configuration for the SPPD workspace.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for travelers and assignments
//! - Rupiah amount parsing and formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
