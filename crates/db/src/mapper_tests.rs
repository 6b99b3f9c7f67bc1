//! Tests for row ↔ record mapping.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use sea_orm::Set;
use uuid::Uuid;

use super::*;

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 9, 8, 0, 0).unwrap().into()
}

fn cost_line_row(assignment_id: Uuid, position: i32, traveler_id: Uuid) -> cost_lines::Model {
    cost_lines::Model {
        assignment_id,
        traveler_id,
        position,
        daily_allowance: dec!(150000),
        daily_days: 3,
        lodging: dec!(300000),
        lodging_days: 2,
        fuel_transport: dec!(100000),
        sea_transport: dec!(0),
        air_transport: dec!(0),
        local_transport: dec!(50000),
        representation: dec!(100000),
        representation_days: 3,
    }
}

fn assignment_row(id: Uuid) -> assignments::Model {
    assignments::Model {
        id,
        assignment_number: "094/123/BKD/2024".to_string(),
        purpose: "Monitoring kepegawaian".to_string(),
        budget_line_code: "5.1.02".to_string(),
        origin: "Mataram".to_string(),
        destination: "Lombok Timur".to_string(),
        travel_type: sea_orm_active_enums::TravelType::WithinRegion,
        transportation: "Kendaraan dinas".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 12),
        duration_days: 3,
        created_at: now(),
        updated_at: now(),
    }
}

#[test]
fn test_assignment_from_rows_orders_by_position() {
    let id = Uuid::now_v7();
    let first = Uuid::now_v7();
    let second = Uuid::now_v7();

    let assignment = assignment_from_rows(
        assignment_row(id),
        vec![cost_line_row(id, 1, second), cost_line_row(id, 0, first)],
    )
    .unwrap();

    assert_eq!(assignment.id, AssignmentId::from_uuid(id));
    assert_eq!(assignment.travel_type, TravelType::WithinRegion);
    assert_eq!(assignment.duration_days, 3);
    assert_eq!(
        assignment.traveler_ids,
        vec![TravelerId::from_uuid(first), TravelerId::from_uuid(second)]
    );
    assert_eq!(assignment.cost_lines[0].traveler_id, TravelerId::from_uuid(first));
    assert_eq!(assignment.cost_lines[1].lodging_days, 2);
}

#[test]
fn test_negative_days_are_rejected() {
    let id = Uuid::now_v7();
    let mut line = cost_line_row(id, 0, Uuid::now_v7());
    line.lodging_days = -1;

    assert_eq!(
        assignment_from_rows(assignment_row(id), vec![line]),
        Err(MappingError::InvalidDays {
            table: "cost_lines",
            column: "lodging_days",
            value: -1,
        })
    );
}

#[test]
fn test_assignment_to_rows_numbers_positions() {
    let id = Uuid::now_v7();
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    let assignment = assignment_from_rows(
        assignment_row(id),
        vec![cost_line_row(id, 0, a), cost_line_row(id, 1, b)],
    )
    .unwrap();

    let (row, lines) = assignment_to_rows(&assignment, now()).unwrap();

    assert_eq!(row.id, Set(id));
    assert_eq!(row.budget_line_code, Set("5.1.02".to_string()));
    assert_eq!(
        row.travel_type,
        Set(sea_orm_active_enums::TravelType::WithinRegion)
    );
    assert_eq!(row.duration_days, Set(3));
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].traveler_id, Set(a));
    assert_eq!(lines[0].position, Set(0));
    assert_eq!(lines[1].traveler_id, Set(b));
    assert_eq!(lines[1].position, Set(1));
    assert_eq!(lines[1].representation, Set(dec!(100000)));
}

#[test]
fn test_oversized_duration_is_rejected() {
    let mut assignment = Assignment::new("5.1.02", TravelType::OutOfRegion);
    assignment.duration_days = u32::MAX;

    assert!(matches!(
        assignment_to_rows(&assignment, now()),
        Err(MappingError::InvalidDays {
            column: "duration_days",
            ..
        })
    ));
}

#[test]
fn test_reference_rows_map_field_for_field() {
    let traveler = traveler_from_row(travelers::Model {
        id: Uuid::now_v7(),
        name: "Baiq Nurul".to_string(),
        nip: "198203142006042011".to_string(),
        rank: "III/c".to_string(),
        position: "Analis Kebijakan".to_string(),
        representation_within_region: dec!(100000),
        representation_out_of_region: dec!(150000),
        created_at: now(),
        updated_at: now(),
    });
    assert_eq!(traveler.representation_rate(TravelType::OutOfRegion), dec!(150000));
    assert_eq!(traveler_to_row(&traveler, now()).nip, Set(traveler.nip.clone()));

    let line = budget_line_from_row(budget_lines::Model {
        code: "5.1.02".to_string(),
        name: "Perjalanan Dinas Dalam Daerah".to_string(),
        budget_ceiling: dec!(10000000),
        disbursement_ceiling: "6,000,000".to_string(),
        q1: dec!(2500000),
        q2: dec!(2500000),
        q3: dec!(2500000),
        q4: dec!(2500000),
        created_at: now(),
        updated_at: now(),
    });
    assert_eq!(line.disbursement_ceiling_amount(), dec!(6000000));
    assert_eq!(
        budget_line_to_row(&line, now()).disbursement_ceiling,
        Set("6,000,000".to_string())
    );

    let entry = rate_entry_from_row(rate_entries::Model {
        destination: "Lombok Timur".to_string(),
        daily_allowance: dec!(150000),
        lodging: dec!(300000),
        fuel_transport: dec!(100000),
        sea_transport: dec!(0),
        air_transport: dec!(0),
        local_transport: dec!(50000),
        updated_at: now(),
    });
    assert_eq!(entry.local_transport, dec!(50000));
    assert_eq!(
        rate_entry_to_row(&entry, now()).destination,
        Set("Lombok Timur".to_string())
    );
}
