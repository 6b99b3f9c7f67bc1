//! Assignment validation rules.

use std::collections::HashSet;

use rust_decimal::Decimal;
use sppd_shared::types::fits_amount_scale;

use super::destinations::DestinationCatalog;
use super::duration::inclusive_days;
use super::error::AssignmentError;
use super::types::Assignment;

/// Validates an assignment before it is saved.
///
/// Checks run in a fixed order and the first failure is returned:
/// budget line, dates, duration, travelers, destination, cost lines.
///
/// # Errors
///
/// Returns the first `AssignmentError` found.
pub fn validate_assignment(
    assignment: &Assignment,
    catalog: &DestinationCatalog,
) -> Result<(), AssignmentError> {
    if assignment.budget_line_code.trim().is_empty() {
        return Err(AssignmentError::MissingBudgetLine);
    }

    let (Some(start), Some(end)) = (assignment.start_date, assignment.end_date) else {
        return Err(AssignmentError::MissingDates);
    };
    let expected = inclusive_days(start, end)?;
    if assignment.duration_days != expected {
        return Err(AssignmentError::DurationMismatch {
            expected,
            actual: assignment.duration_days,
        });
    }

    if assignment.traveler_ids.is_empty() {
        return Err(AssignmentError::NoTravelers);
    }

    if assignment.destination.is_empty() {
        return Err(AssignmentError::MissingDestination);
    }
    if !catalog.contains(assignment.travel_type, &assignment.destination) {
        return Err(AssignmentError::DestinationNotAllowed {
            destination: assignment.destination.clone(),
            travel_type: assignment.travel_type,
        });
    }

    validate_cost_lines(assignment)
}

fn validate_cost_lines(assignment: &Assignment) -> Result<(), AssignmentError> {
    let mut selected = HashSet::new();
    for id in &assignment.traveler_ids {
        if !selected.insert(*id) {
            return Err(AssignmentError::DuplicateTraveler(*id));
        }
    }

    let mut priced = HashSet::new();
    for line in &assignment.cost_lines {
        if !selected.contains(&line.traveler_id) {
            return Err(AssignmentError::UnknownTraveler(line.traveler_id));
        }
        if !priced.insert(line.traveler_id) {
            return Err(AssignmentError::DuplicateTraveler(line.traveler_id));
        }
        if let Some((field, _)) = line
            .amounts()
            .into_iter()
            .find(|(_, amount)| *amount < Decimal::ZERO)
        {
            return Err(AssignmentError::NegativeAmount {
                traveler_id: line.traveler_id,
                field,
            });
        }
        if let Some((field, _)) = line
            .amounts()
            .into_iter()
            .find(|(_, amount)| !fits_amount_scale(*amount))
        {
            return Err(AssignmentError::TooPrecise {
                traveler_id: line.traveler_id,
                field,
            });
        }
    }

    if let Some(missing) = assignment.traveler_ids.iter().find(|id| !priced.contains(id)) {
        return Err(AssignmentError::MissingCostLine(*missing));
    }

    Ok(())
}
