//! Travel assignments: cost derivation, totals and validation.

pub mod derivation;
pub mod destinations;
pub mod duration;
pub mod error;
pub mod totals;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use derivation::{AssignmentDraft, CostDerivationEngine, TravelerToggle};
pub use destinations::{DEFAULT_ORIGIN, DestinationCatalog};
pub use duration::{inclusive_days, lodging_nights};
pub use error::AssignmentError;
pub use totals::{AssignmentCostAggregator, CostBreakdown};
pub use types::{Assignment, CostField, CostLine, TravelType, Traveler};
pub use validation::validate_assignment;
