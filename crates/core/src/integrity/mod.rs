//! Referential integrity guards for deletions.
//!
//! Assignments refer to budget lines, travelers and rate entries by key only,
//! with no standing constraint. Every deletion of a referenced record checks
//! the current assignment snapshot first and is refused while any assignment
//! still points at the key.

pub mod error;

pub use error::{ReferenceKind, ReferentialIntegrityError};

use sppd_shared::types::TravelerId;

use crate::travel::Assignment;

/// Counts assignments referencing a record.
///
/// Budget lines match on code, rate entries on exact destination, travelers on
/// membership in the traveler list. A traveler key that is not a valid ID has
/// no references.
#[must_use]
pub fn references(kind: ReferenceKind, key: &str, assignments: &[Assignment]) -> usize {
    match kind {
        ReferenceKind::BudgetLine => assignments
            .iter()
            .filter(|a| a.budget_line_code == key)
            .count(),
        ReferenceKind::RateEntry => assignments.iter().filter(|a| a.destination == key).count(),
        ReferenceKind::Traveler => key.parse::<TravelerId>().map_or(0, |id| {
            assignments.iter().filter(|a| a.has_traveler(id)).count()
        }),
    }
}

/// Refuses deletion of a referenced record.
///
/// # Errors
///
/// Returns `ReferentialIntegrityError` when one or more assignments reference the key.
pub fn ensure_unreferenced(
    kind: ReferenceKind,
    key: &str,
    assignments: &[Assignment],
) -> Result<(), ReferentialIntegrityError> {
    match references(kind, key, assignments) {
        0 => Ok(()),
        references => Err(ReferentialIntegrityError {
            kind,
            key: key.to_string(),
            references,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::{CostLine, TravelType};

    fn assignment(code: &str, destination: &str, travelers: &[TravelerId]) -> Assignment {
        Assignment {
            destination: destination.to_string(),
            traveler_ids: travelers.to_vec(),
            cost_lines: travelers.iter().map(|id| CostLine::empty(*id)).collect(),
            ..Assignment::new(code, TravelType::WithinRegion)
        }
    }

    #[test]
    fn test_budget_line_references() {
        let assignments = vec![
            assignment("5.1.02", "Dompu", &[]),
            assignment("5.1.02", "Bima", &[]),
            assignment("5.1.03", "Bima", &[]),
        ];

        assert_eq!(references(ReferenceKind::BudgetLine, "5.1.02", &assignments), 2);
        assert_eq!(
            ensure_unreferenced(ReferenceKind::BudgetLine, "5.1.02", &assignments),
            Err(ReferentialIntegrityError {
                kind: ReferenceKind::BudgetLine,
                key: "5.1.02".to_string(),
                references: 2,
            })
        );
        assert!(ensure_unreferenced(ReferenceKind::BudgetLine, "5.1.09", &assignments).is_ok());
    }

    #[test]
    fn test_rate_entry_references_match_exactly() {
        let assignments = vec![assignment("5.1.02", "Lombok Timur", &[])];

        assert_eq!(references(ReferenceKind::RateEntry, "Lombok Timur", &assignments), 1);
        assert_eq!(references(ReferenceKind::RateEntry, "lombok timur", &assignments), 0);
    }

    #[test]
    fn test_traveler_references() {
        let a = TravelerId::new();
        let b = TravelerId::new();
        let assignments = vec![
            assignment("5.1.02", "Dompu", &[a, b]),
            assignment("5.1.02", "Bima", &[a]),
        ];

        assert_eq!(references(ReferenceKind::Traveler, &a.to_string(), &assignments), 2);
        assert_eq!(references(ReferenceKind::Traveler, &b.to_string(), &assignments), 1);
        assert_eq!(references(ReferenceKind::Traveler, "not-an-id", &assignments), 0);
    }

    #[test]
    fn test_error_message_names_key_and_count() {
        let err = ReferentialIntegrityError {
            kind: ReferenceKind::Traveler,
            key: "abc".to_string(),
            references: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete traveler 'abc': referenced by 3 assignment(s)"
        );
    }
}
