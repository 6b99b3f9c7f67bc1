//! Property-based tests for travel module.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sppd_shared::types::TravelerId;

use super::derivation::{AssignmentDraft, CostDerivationEngine};
use super::totals::AssignmentCostAggregator;
use super::types::{Assignment, CostField, CostLine, TravelType, Traveler};
use crate::rates::{RateEntry, RateTable};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn traveler(within: i64, out_of: i64) -> Traveler {
    Traveler {
        id: TravelerId::new(),
        name: "Traveler".to_string(),
        nip: String::new(),
        rank: String::new(),
        position: String::new(),
        representation_within_region: Decimal::from(within),
        representation_out_of_region: Decimal::from(out_of),
    }
}

fn rate_table(daily: i64, lodging: i64, transport: i64) -> RateTable {
    RateTable::try_from_entries([RateEntry {
        daily_allowance: Decimal::from(daily),
        lodging: Decimal::from(lodging),
        fuel_transport: Decimal::from(transport),
        local_transport: Decimal::from(transport),
        ..RateEntry::new("Lombok Timur")
    }])
    .unwrap()
}

fn field_strategy() -> impl Strategy<Value = CostField> {
    prop_oneof![
        Just(CostField::DailyAllowance),
        Just(CostField::Lodging),
        Just(CostField::FuelTransport),
        Just(CostField::SeaTransport),
        Just(CostField::AirTransport),
        Just(CostField::LocalTransport),
        Just(CostField::Representation),
    ]
}

proptest! {
    /// Day counts follow the duration: daily and representation days equal it,
    /// lodging nights are one fewer (never below zero).
    #[test]
    fn test_day_counts_follow_duration(
        offset in 0u64..3650,
        length in 0u64..60,
        travelers in 1usize..5,
    ) {
        let rates = rate_table(150_000, 300_000, 50_000);
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        for _ in 0..travelers {
            CostDerivationEngine::toggle_traveler(&mut draft, &traveler(100_000, 150_000), &rates);
        }

        let start = base_date() + Days::new(offset);
        let end = start + Days::new(length);
        CostDerivationEngine::set_dates(&mut draft, Some(start), Some(end)).unwrap();

        let duration = u32::try_from(length + 1).unwrap();
        prop_assert_eq!(draft.assignment().duration_days, duration);
        for line in &draft.assignment().cost_lines {
            prop_assert_eq!(line.daily_days, duration);
            prop_assert_eq!(line.representation_days, duration);
            prop_assert_eq!(line.lodging_days, duration - 1);
        }
    }

    /// Date changes never touch rate amounts.
    #[test]
    fn test_date_change_preserves_rates(
        daily in 0i64..1_000_000,
        lodging in 0i64..2_000_000,
        manual in 0i64..5_000_000,
        length in 0u64..30,
    ) {
        let rates = rate_table(daily, lodging, 25_000);
        let t = traveler(100_000, 150_000);
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);
        CostDerivationEngine::update_cost_field(
            &mut draft,
            t.id,
            CostField::AirTransport,
            Decimal::from(manual),
        )
        .unwrap();
        let before = draft.assignment().cost_line(t.id).unwrap().amounts();

        let start = base_date();
        CostDerivationEngine::set_dates(&mut draft, Some(start), Some(start + Days::new(length)))
            .unwrap();

        prop_assert_eq!(draft.assignment().cost_line(t.id).unwrap().amounts(), before);
    }

    /// Traveler ids and cost lines stay aligned one-to-one, in the same order,
    /// under any sequence of toggles.
    #[test]
    fn test_toggles_keep_lines_aligned(toggles in prop::collection::vec(0usize..4, 0..20)) {
        let rates = rate_table(150_000, 300_000, 50_000);
        let roster: Vec<Traveler> = (0..4).map(|_| traveler(100_000, 150_000)).collect();
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));

        for index in toggles {
            CostDerivationEngine::toggle_traveler(&mut draft, &roster[index], &rates);
        }

        let assignment = draft.assignment();
        let line_ids: Vec<TravelerId> =
            assignment.cost_lines.iter().map(|c| c.traveler_id).collect();
        prop_assert_eq!(&line_ids, &assignment.traveler_ids);
    }

    /// Toggling the same traveler twice restores the assignment.
    #[test]
    fn test_double_toggle_is_identity(existing in 0usize..4) {
        let rates = rate_table(150_000, 300_000, 50_000);
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));
        for _ in 0..existing {
            CostDerivationEngine::toggle_traveler(&mut draft, &traveler(90_000, 120_000), &rates);
        }
        let before = draft.assignment().clone();

        let t = traveler(100_000, 150_000);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);

        prop_assert_eq!(draft.assignment(), &before);
    }

    /// A manual edit moves the line total by exactly the edit's weighted difference.
    #[test]
    fn test_manual_edit_changes_total_linearly(
        field in field_strategy(),
        value in 0i64..10_000_000,
        length in 0u64..14,
    ) {
        let rates = rate_table(150_000, 300_000, 50_000);
        let t = traveler(100_000, 150_000);
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));
        let start = base_date();
        CostDerivationEngine::set_dates(&mut draft, Some(start), Some(start + Days::new(length)))
            .unwrap();
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);

        let line = draft.assignment().cost_line(t.id).unwrap().clone();
        let old_value = line
            .amounts()
            .into_iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
            .unwrap();
        let weight = match field {
            CostField::DailyAllowance => Decimal::from(line.daily_days),
            CostField::Lodging => Decimal::from(line.lodging_days),
            CostField::Representation => Decimal::from(line.representation_days),
            _ => Decimal::ONE,
        };
        let value = Decimal::from(value);

        CostDerivationEngine::update_cost_field(&mut draft, t.id, field, value).unwrap();

        let new_total =
            AssignmentCostAggregator::traveler_total(draft.assignment(), t.id).unwrap();
        prop_assert_eq!(
            new_total,
            AssignmentCostAggregator::line_total(&line) + (value - old_value) * weight
        );
    }

    /// Assignment total is the sum of its line totals and never negative.
    #[test]
    fn test_assignment_total_is_sum_of_lines(
        amounts in prop::collection::vec((0i64..2_000_000, 0u32..30), 0..6),
    ) {
        let mut assignment = Assignment::new("5.1.02", TravelType::OutOfRegion);
        for (amount, days) in &amounts {
            let mut line = CostLine::empty(TravelerId::new());
            line.daily_allowance = Decimal::from(*amount);
            line.representation = Decimal::from(*amount);
            line.set_days(*days);
            assignment.traveler_ids.push(line.traveler_id);
            assignment.cost_lines.push(line);
        }

        let total = AssignmentCostAggregator::assignment_total(&assignment);
        let expected: Decimal = assignment
            .cost_lines
            .iter()
            .map(AssignmentCostAggregator::line_total)
            .sum();

        prop_assert_eq!(total, expected);
        prop_assert!(total >= Decimal::ZERO);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_same_day_trip_has_no_lodging() {
        let rates = rate_table(150_000, 300_000, 50_000);
        let t = traveler(100_000, 150_000);
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));
        CostDerivationEngine::set_dates(&mut draft, Some(base_date()), Some(base_date())).unwrap();
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);

        let line = draft.assignment().cost_line(t.id).unwrap();
        assert_eq!(line.lodging_days, 0);
        // 150,000 + 0 + 50,000 + 50,000 + 100,000
        assert_eq!(AssignmentCostAggregator::line_total(line), dec!(350000));
    }

    #[test]
    fn test_worked_example_totals_with_representation() {
        let rates = RateTable::try_from_entries([RateEntry {
            daily_allowance: dec!(150000),
            lodging: dec!(300000),
            fuel_transport: dec!(100000),
            local_transport: dec!(50000),
            ..RateEntry::new("Lombok Timur")
        }])
        .unwrap();
        let t = traveler(100_000, 150_000);
        let mut draft = AssignmentDraft::new(Assignment::new("5.1.02", TravelType::WithinRegion));
        CostDerivationEngine::set_dates(
            &mut draft,
            NaiveDate::from_ymd_opt(2024, 1, 10),
            NaiveDate::from_ymd_opt(2024, 1, 12),
        )
        .unwrap();
        CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", &rates);
        CostDerivationEngine::toggle_traveler(&mut draft, &t, &rates);

        let line = draft.assignment().cost_line(t.id).unwrap();
        // 1,200,000 before representation, plus 100,000 x 3 days
        assert_eq!(
            AssignmentCostAggregator::line_total(line),
            dec!(1200000) + dec!(100000) * dec!(3)
        );
    }
}
