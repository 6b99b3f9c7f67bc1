//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Deletions of records that assignments refer to are checked against the
//! assignments inside the same transaction as the delete.

pub mod assignment;
pub mod budget_line;
pub mod rate_entry;
pub mod reconciliation;
pub mod traveler;

pub use assignment::{AssignmentRepoError, AssignmentRepository};
pub use budget_line::{BudgetLineError, BudgetLineRepository};
pub use rate_entry::{RateEntryError, RateEntryRepository};
pub use reconciliation::{ReconciliationError, ReconciliationRepository, ReconciliationSnapshot};
pub use traveler::{TravelerError, TravelerRepository};
