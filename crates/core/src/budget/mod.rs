//! Budget lines and realization against travel costs.

pub mod error;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use service::BudgetReconciler;
pub use types::{BudgetLine, BudgetLineReconciliation, ReconciliationReport, ReconciliationTotals};
