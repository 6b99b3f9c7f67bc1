//! Referential integrity error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record kinds that assignments refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Budget line, referenced by code.
    BudgetLine,
    /// Traveler, referenced by ID.
    Traveler,
    /// Rate table entry, referenced by destination.
    RateEntry,
}

impl ReferenceKind {
    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BudgetLine => "budget line",
            Self::Traveler => "traveler",
            Self::RateEntry => "rate entry",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Deletion refused because assignments still reference the record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot delete {kind} '{key}': referenced by {references} assignment(s)")]
pub struct ReferentialIntegrityError {
    /// Kind of record.
    pub kind: ReferenceKind,
    /// Key of the record (code, ID or destination).
    pub key: String,
    /// Number of referencing assignments.
    pub references: usize,
}
