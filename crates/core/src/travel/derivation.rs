//! Cost derivation for assignments being edited.
//!
//! Edits go through an [`AssignmentDraft`], which carries the assignment and
//! the destination for which rates were last filled in automatically. Rates
//! are auto-filled once per newly chosen destination; re-selecting the same
//! destination never overwrites rates the user has since edited.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sppd_shared::types::{TravelerId, fits_amount_scale};

use super::destinations::DestinationCatalog;
use super::duration::inclusive_days;
use super::error::AssignmentError;
use super::types::{Assignment, CostField, CostLine, TravelType, Traveler};
use super::validation::validate_assignment;
use crate::rates::RateTable;

/// An assignment in an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    assignment: Assignment,
    last_auto_applied: Option<String>,
}

impl AssignmentDraft {
    /// Opens an editing session.
    ///
    /// A saved assignment's destination counts as already looked up, so its
    /// stored rates survive until a different destination is chosen.
    #[must_use]
    pub fn new(assignment: Assignment) -> Self {
        let last_auto_applied =
            Some(assignment.destination.clone()).filter(|d| !d.is_empty());
        Self {
            assignment,
            last_auto_applied,
        }
    }

    /// The assignment as currently edited.
    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Destination whose rates were last auto-filled.
    #[must_use]
    pub fn last_auto_applied(&self) -> Option<&str> {
        self.last_auto_applied.as_deref()
    }

    /// Updates descriptive fields that take no part in pricing.
    pub fn describe(
        &mut self,
        assignment_number: impl Into<String>,
        purpose: impl Into<String>,
        transportation: impl Into<String>,
    ) {
        self.assignment.assignment_number = assignment_number.into();
        self.assignment.purpose = purpose.into();
        self.assignment.transportation = transportation.into();
    }

    /// Changes the budget line the assignment is charged to.
    pub fn set_budget_line(&mut self, code: impl Into<String>) {
        self.assignment.budget_line_code = code.into();
    }

    /// Validates and closes the session.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure. The draft stays open for further edits.
    pub fn finish(&self, catalog: &DestinationCatalog) -> Result<Assignment, AssignmentError> {
        validate_assignment(&self.assignment, catalog)?;
        Ok(self.assignment.clone())
    }

    /// Ends the session without validation.
    #[must_use]
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }
}

/// Outcome of toggling a traveler's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelerToggle {
    /// Traveler was added with a freshly derived cost line.
    Added,
    /// Traveler and their cost line were removed.
    Removed,
}

/// Derives and recomputes assignment cost lines.
pub struct CostDerivationEngine;

impl CostDerivationEngine {
    /// Prices a new cost line for a traveler joining an assignment.
    ///
    /// Rates come from the rate table entry for the current destination, or
    /// stay at zero when there is none. Day counts follow the current duration.
    #[must_use]
    pub fn derive_cost_line(
        assignment: &Assignment,
        traveler: &Traveler,
        rates: &RateTable,
    ) -> CostLine {
        let mut line = CostLine::empty(traveler.id);

        if let Some(entry) = rates.get(&assignment.destination) {
            line.apply_rates(entry);
        }
        line.representation = traveler.representation_rate(assignment.travel_type);
        line.set_days(assignment.duration_days);

        line
    }

    /// Selects or deselects a traveler.
    ///
    /// Selecting appends the traveler and a derived cost line; deselecting
    /// removes both. A traveler never has more than one cost line.
    pub fn toggle_traveler(
        draft: &mut AssignmentDraft,
        traveler: &Traveler,
        rates: &RateTable,
    ) -> TravelerToggle {
        let assignment = &mut draft.assignment;

        if assignment.has_traveler(traveler.id) {
            assignment.traveler_ids.retain(|id| *id != traveler.id);
            assignment.cost_lines.retain(|c| c.traveler_id != traveler.id);
            return TravelerToggle::Removed;
        }

        let line = Self::derive_cost_line(assignment, traveler, rates);
        assignment.cost_lines.retain(|c| c.traveler_id != traveler.id);
        assignment.traveler_ids.push(traveler.id);
        assignment.cost_lines.push(line);
        TravelerToggle::Added
    }

    /// Sets the travel dates and re-derives every day-dependent quantity.
    ///
    /// With both dates present the duration is recomputed and every cost
    /// line's day counts are overwritten; rate fields are untouched. With a
    /// date missing the dates are stored and nothing is recomputed.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentError::InvalidRange` when `end` precedes `start`;
    /// the draft is left unchanged.
    pub fn set_dates(
        draft: &mut AssignmentDraft,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), AssignmentError> {
        let duration = match (start, end) {
            (Some(start), Some(end)) => Some(inclusive_days(start, end)?),
            _ => None,
        };

        let assignment = &mut draft.assignment;
        assignment.start_date = start;
        assignment.end_date = end;

        if let Some(duration) = duration {
            assignment.duration_days = duration;
            for line in &mut assignment.cost_lines {
                line.set_days(duration);
            }
        }

        Ok(())
    }

    /// Sets the destination, auto-filling rates the first time it is chosen.
    ///
    /// Rates are overwritten on every cost line only when the destination is
    /// new for this session and has a rate table entry. A destination without
    /// an entry leaves manual amounts as they are. Returns whether rates were
    /// applied.
    pub fn set_destination(
        draft: &mut AssignmentDraft,
        destination: impl Into<String>,
        rates: &RateTable,
    ) -> bool {
        let destination = destination.into();
        draft.assignment.destination.clone_from(&destination);

        if destination.is_empty() || draft.last_auto_applied.as_deref() == Some(destination.as_str())
        {
            return false;
        }

        let Some(entry) = rates.get(&destination) else {
            return false;
        };

        let duration = draft.assignment.duration_days;
        for line in &mut draft.assignment.cost_lines {
            line.apply_rates(entry);
            line.set_days(duration);
        }
        draft.last_auto_applied = Some(destination);
        true
    }

    /// Switches the travel type.
    ///
    /// Clears the destination, since the valid destinations differ per type,
    /// and re-prices representation from each traveler's rate for the new
    /// type. Lines for travelers missing from `roster` keep their rate.
    pub fn set_travel_type(
        draft: &mut AssignmentDraft,
        travel_type: TravelType,
        roster: &[Traveler],
    ) {
        let assignment = &mut draft.assignment;
        assignment.travel_type = travel_type;
        assignment.destination.clear();

        for line in &mut assignment.cost_lines {
            if let Some(traveler) = roster.iter().find(|t| t.id == line.traveler_id) {
                line.representation = traveler.representation_rate(travel_type);
            }
        }
    }

    /// Applies a manual edit to one amount on one traveler's cost line.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentError::UnknownTraveler` if the traveler has no line
    /// and `AssignmentError::NegativeAmount` or `AssignmentError::TooPrecise`
    /// for a value that cannot be stored as entered.
    pub fn update_cost_field(
        draft: &mut AssignmentDraft,
        traveler_id: TravelerId,
        field: CostField,
        value: Decimal,
    ) -> Result<(), AssignmentError> {
        if value < Decimal::ZERO {
            return Err(AssignmentError::NegativeAmount { traveler_id, field });
        }
        if !fits_amount_scale(value) {
            return Err(AssignmentError::TooPrecise { traveler_id, field });
        }

        let line = draft
            .assignment
            .cost_line_mut(traveler_id)
            .ok_or(AssignmentError::UnknownTraveler(traveler_id))?;
        line.set_field(field, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateEntry;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn traveler(within: Decimal, out_of: Decimal) -> Traveler {
        Traveler {
            id: TravelerId::new(),
            name: "Lalu Ahmad".to_string(),
            nip: "197805122005011003".to_string(),
            rank: "III/d".to_string(),
            position: "Kepala Seksi".to_string(),
            representation_within_region: within,
            representation_out_of_region: out_of,
        }
    }

    fn rate_table() -> RateTable {
        RateTable::try_from_entries([
            RateEntry {
                destination: "Lombok Timur".to_string(),
                daily_allowance: dec!(150000),
                lodging: dec!(300000),
                fuel_transport: dec!(100000),
                sea_transport: dec!(0),
                air_transport: dec!(0),
                local_transport: dec!(50000),
            },
            RateEntry {
                destination: "Sumbawa".to_string(),
                daily_allowance: dec!(170000),
                lodging: dec!(350000),
                fuel_transport: dec!(200000),
                sea_transport: dec!(120000),
                air_transport: dec!(0),
                local_transport: dec!(60000),
            },
        ])
        .unwrap()
    }

    fn draft_with_dates() -> AssignmentDraft {
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));
        CostDerivationEngine::set_dates(&mut draft, Some(date(2024, 1, 10)), Some(date(2024, 1, 12)))
            .unwrap();
        draft
    }

    #[test]
    fn test_worked_example_lombok_timur() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);

        let t = traveler(dec!(100000), dec!(150000));
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);

        let line = draft.assignment().cost_line(t.id).unwrap();
        assert_eq!(line.daily_allowance, dec!(150000));
        assert_eq!(line.daily_days, 3);
        assert_eq!(line.lodging, dec!(300000));
        assert_eq!(line.lodging_days, 2);
        assert_eq!(line.fuel_transport, dec!(100000));
        assert_eq!(line.sea_transport, dec!(0));
        assert_eq!(line.air_transport, dec!(0));
        assert_eq!(line.local_transport, dec!(50000));
        assert_eq!(line.representation, dec!(100000));
        assert_eq!(line.representation_days, 3);
    }

    #[test]
    fn test_derive_without_rate_entry_leaves_zero_rates() {
        let mut assignment = Assignment::new("5.1.02", TravelType::OutOfRegion);
        assignment.destination = "Bali".to_string();
        assignment.duration_days = 4;
        let t = traveler(dec!(100000), dec!(150000));

        let line = CostDerivationEngine::derive_cost_line(&assignment, &t, &rate_table());

        assert_eq!(line.daily_allowance, dec!(0));
        assert_eq!(line.lodging, dec!(0));
        assert_eq!(line.representation, dec!(150000));
        assert_eq!(
            (line.daily_days, line.lodging_days, line.representation_days),
            (4, 3, 4)
        );
    }

    #[test]
    fn test_toggle_removes_id_and_cost_line() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        let a = traveler(dec!(100000), dec!(150000));
        let b = traveler(dec!(90000), dec!(120000));

        assert_eq!(
            CostDerivationEngine::toggle_traveler(&mut draft, &a, &rates),
            TravelerToggle::Added
        );
        CostDerivationEngine::toggle_traveler(&mut draft, &b, &rates);
        assert_eq!(
            CostDerivationEngine::toggle_traveler(&mut draft, &a, &rates),
            TravelerToggle::Removed
        );

        let assignment = draft.assignment();
        assert_eq!(assignment.traveler_ids, vec![b.id]);
        assert_eq!(assignment.cost_lines.len(), 1);
        assert_eq!(assignment.cost_lines[0].traveler_id, b.id);
    }

    #[test]
    fn test_date_change_overwrites_days_but_not_rates() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        let t = traveler(dec!(100000), dec!(150000));
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);
        CostDerivationEngine::update_cost_field(&mut draft, t.id, CostField::Lodging, dec!(275000))
            .unwrap();

        CostDerivationEngine::set_dates(&mut draft, Some(date(2024, 1, 10)), Some(date(2024, 1, 14)))
            .unwrap();

        let line = draft.assignment().cost_line(t.id).unwrap();
        assert_eq!(draft.assignment().duration_days, 5);
        assert_eq!(
            (line.daily_days, line.lodging_days, line.representation_days),
            (5, 4, 5)
        );
        assert_eq!(line.lodging, dec!(275000));
    }

    #[test]
    fn test_invalid_range_leaves_draft_unchanged() {
        let mut draft = draft_with_dates();
        let before = draft.clone();

        let result = CostDerivationEngine::set_dates(
            &mut draft,
            Some(date(2024, 1, 12)),
            Some(date(2024, 1, 10)),
        );

        assert!(matches!(result, Err(AssignmentError::InvalidRange { .. })));
        assert_eq!(draft, before);
    }

    #[test]
    fn test_incomplete_dates_keep_duration() {
        let mut draft = draft_with_dates();

        CostDerivationEngine::set_dates(&mut draft, Some(date(2024, 2, 1)), None).unwrap();

        assert_eq!(draft.assignment().start_date, Some(date(2024, 2, 1)));
        assert_eq!(draft.assignment().end_date, None);
        assert_eq!(draft.assignment().duration_days, 3);
    }

    #[test]
    fn test_reselecting_same_destination_keeps_manual_rates() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        let t = traveler(dec!(100000), dec!(150000));
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);

        assert!(CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates));
        CostDerivationEngine::update_cost_field(
            &mut draft,
            t.id,
            CostField::DailyAllowance,
            dec!(125000),
        )
        .unwrap();

        assert!(!CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates));
        assert_eq!(
            draft.assignment().cost_line(t.id).unwrap().daily_allowance,
            dec!(125000)
        );
    }

    #[test]
    fn test_new_destination_overwrites_all_lines() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        let a = traveler(dec!(100000), dec!(150000));
        let b = traveler(dec!(80000), dec!(110000));
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &a, &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &b, &rates);
        CostDerivationEngine::update_cost_field(&mut draft, a.id, CostField::AirTransport, dec!(1))
            .unwrap();

        assert!(CostDerivationEngine::set_destination(&mut draft, "Sumbawa", &rates));

        for line in &draft.assignment().cost_lines {
            assert_eq!(line.daily_allowance, dec!(170000));
            assert_eq!(line.lodging, dec!(350000));
            assert_eq!(line.fuel_transport, dec!(200000));
            assert_eq!(line.sea_transport, dec!(120000));
            assert_eq!(line.air_transport, dec!(0));
            assert_eq!(line.local_transport, dec!(60000));
        }
        assert_eq!(draft.last_auto_applied(), Some("Sumbawa"));
        assert_eq!(
            draft.assignment().cost_line(b.id).unwrap().representation,
            dec!(80000)
        );
    }

    #[test]
    fn test_destination_without_entry_preserves_rates_and_marker() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        let t = traveler(dec!(100000), dec!(150000));
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);
        let before = draft.assignment().cost_lines.clone();

        assert!(!CostDerivationEngine::set_destination(&mut draft, "Dompu", &rates));

        assert_eq!(draft.assignment().destination, "Dompu");
        assert_eq!(draft.assignment().cost_lines, before);
        assert_eq!(draft.last_auto_applied(), Some("Lombok Timur"));
    }

    #[test]
    fn test_opening_saved_assignment_does_not_refill_rates() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        let t = traveler(dec!(100000), dec!(150000));
        CostDerivationEngine::set_destination(&mut draft, "Sumbawa", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);
        CostDerivationEngine::update_cost_field(&mut draft, t.id, CostField::Lodging, dec!(0))
            .unwrap();

        let mut reopened = AssignmentDraft::new(draft.into_assignment());
        assert!(!CostDerivationEngine::set_destination(&mut reopened, "Sumbawa", &rates));
        assert_eq!(
            reopened.assignment().cost_line(t.id).unwrap().lodging,
            dec!(0)
        );
    }

    #[test]
    fn test_travel_type_change_clears_destination_and_reprices_representation() {
        let rates = rate_table();
        let mut draft = draft_with_dates();
        let t = traveler(dec!(100000), dec!(150000));
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);
        let before = draft.assignment().cost_line(t.id).unwrap().clone();

        CostDerivationEngine::set_travel_type(&mut draft, TravelType::OutOfRegion, &[t.clone()]);

        let after = draft.assignment().cost_line(t.id).unwrap();
        assert_eq!(draft.assignment().travel_type, TravelType::OutOfRegion);
        assert!(draft.assignment().destination.is_empty());
        assert_eq!(after.representation, dec!(150000));
        assert_eq!(
            CostLine {
                representation: before.representation,
                ..after.clone()
            },
            before
        );
    }

    #[test]
    fn test_update_cost_field_rejects_unknown_traveler_and_negative() {
        let mut draft = draft_with_dates();
        let stranger = TravelerId::new();

        assert_eq!(
            CostDerivationEngine::update_cost_field(&mut draft, stranger, CostField::Lodging, dec!(1)),
            Err(AssignmentError::UnknownTraveler(stranger))
        );
        assert_eq!(
            CostDerivationEngine::update_cost_field(
                &mut draft,
                stranger,
                CostField::Lodging,
                dec!(-1)
            ),
            Err(AssignmentError::NegativeAmount {
                traveler_id: stranger,
                field: CostField::Lodging,
            })
        );
    }

    #[test]
    fn test_update_cost_field_rejects_sub_cent_amount() {
        let mut draft = draft_with_dates();
        let t = traveler(dec!(100000), dec!(150000));
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &RateTable::new());

        assert_eq!(
            CostDerivationEngine::update_cost_field(
                &mut draft,
                t.id,
                CostField::Lodging,
                dec!(1250.505)
            ),
            Err(AssignmentError::TooPrecise {
                traveler_id: t.id,
                field: CostField::Lodging,
            })
        );
        assert_eq!(draft.assignment().cost_line(t.id).unwrap().lodging, Decimal::ZERO);

        CostDerivationEngine::update_cost_field(&mut draft, t.id, CostField::Lodging, dec!(1250.50))
            .unwrap();
        assert_eq!(draft.assignment().cost_line(t.id).unwrap().lodging, dec!(1250.50));
    }
}
