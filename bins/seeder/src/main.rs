//! Database seeder for SPPD development and testing.
//!
//! Seeds the rate table, budget lines, travelers and one priced sample
//! assignment for local development. Safe to re-run: every record is
//! upserted by its key.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sppd_core::budget::BudgetLine;
use sppd_core::rates::{RateEntry, RateTable};
use sppd_core::travel::{
    Assignment, AssignmentDraft, CostDerivationEngine, DestinationCatalog, TravelType, Traveler,
};
use sppd_db::{
    AssignmentRepository, BudgetLineRepository, RateEntryRepository, TravelerRepository,
};
use sppd_shared::AppConfig;
use sppd_shared::types::{AssignmentId, TravelerId};
use uuid::Uuid;

/// Sample traveler IDs (consistent for all seeds)
const TRAVELER_IDS: [&str; 3] = [
    "00000000-0000-0000-0000-000000000101",
    "00000000-0000-0000-0000-000000000102",
    "00000000-0000-0000-0000-000000000103",
];
/// Sample assignment ID
const SAMPLE_ASSIGNMENT_ID: &str = "00000000-0000-0000-0000-000000000201";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = sppd_db::connect_with(&config.database).await?;

    println!("Seeding rate table...");
    let rates = seed_rates(&RateEntryRepository::new(db.clone())).await?;

    println!("Seeding budget lines...");
    seed_budget_lines(&BudgetLineRepository::new(db.clone())).await?;

    println!("Seeding travelers...");
    let roster = seed_travelers(&TravelerRepository::new(db.clone())).await?;

    println!("Seeding sample assignment...");
    let catalog = DestinationCatalog::with_overrides(
        config.region.within_region.clone(),
        config.region.out_of_region.clone(),
    );
    seed_sample_assignment(&AssignmentRepository::new(db), &rates, &roster, &catalog).await?;

    println!("Seeding complete!");
    Ok(())
}

fn rate(
    destination: &str,
    daily_allowance: Decimal,
    lodging: Decimal,
    fuel_transport: Decimal,
    sea_transport: Decimal,
    air_transport: Decimal,
    local_transport: Decimal,
) -> RateEntry {
    RateEntry {
        destination: destination.to_string(),
        daily_allowance,
        lodging,
        fuel_transport,
        sea_transport,
        air_transport,
        local_transport,
    }
}

/// Seeds standard rates for a few within- and out-of-region destinations.
async fn seed_rates(repo: &RateEntryRepository) -> anyhow::Result<RateTable> {
    let entries = [
        rate("Lombok Barat", dec!(150000), dec!(300000), dec!(60000), dec!(0), dec!(0), dec!(50000)),
        rate("Lombok Tengah", dec!(150000), dec!(300000), dec!(80000), dec!(0), dec!(0), dec!(50000)),
        rate("Lombok Timur", dec!(150000), dec!(300000), dec!(100000), dec!(0), dec!(0), dec!(50000)),
        rate("Sumbawa", dec!(170000), dec!(350000), dec!(200000), dec!(120000), dec!(0), dec!(60000)),
        rate("Bima", dec!(170000), dec!(400000), dec!(250000), dec!(0), dec!(1200000), dec!(75000)),
        rate("Bali", dec!(480000), dec!(910000), dec!(0), dec!(0), dec!(1500000), dec!(150000)),
        rate("DKI Jakarta", dec!(530000), dec!(1490000), dec!(0), dec!(0), dec!(2800000), dec!(256000)),
    ];

    for entry in &entries {
        repo.upsert(entry).await?;
        println!("  Saved rate entry: {}", entry.destination);
    }

    Ok(repo.list().await?)
}

/// Seeds budget lines, including one not yet funded.
async fn seed_budget_lines(repo: &BudgetLineRepository) -> anyhow::Result<()> {
    let lines = [
        BudgetLine {
            disbursement_ceiling: "6.000.000".to_string(),
            q1: dec!(2500000),
            q2: dec!(2500000),
            q3: dec!(2500000),
            q4: dec!(2500000),
            ..BudgetLine::new("5.1.02.04.01.0001", "Belanja Perjalanan Dinas Dalam Daerah", dec!(10000000))
        },
        BudgetLine {
            disbursement_ceiling: "Rp 15.000.000".to_string(),
            q2: dec!(12500000),
            q4: dec!(12500000),
            ..BudgetLine::new("5.1.02.04.01.0003", "Belanja Perjalanan Dinas Luar Daerah", dec!(25000000))
        },
        BudgetLine::new("5.1.02.04.01.0005", "Belanja Perjalanan Dinas Paket Meeting", Decimal::ZERO),
    ];

    for line in &lines {
        repo.upsert(line).await?;
        println!("  Saved budget line: {} {}", line.code, line.name);
    }

    Ok(())
}

/// Seeds a small roster with fixed IDs.
async fn seed_travelers(repo: &TravelerRepository) -> anyhow::Result<Vec<Traveler>> {
    let people = [
        ("Lalu Ahmad Zaini", "197805122005011003", "Pembina (IV/a)", "Kepala Bidang", dec!(150000), dec!(250000)),
        ("Baiq Nurul Hidayati", "198203142006042011", "Penata (III/c)", "Analis Kebijakan", dec!(100000), dec!(150000)),
        ("I Made Suarjana", "199001202015031002", "Penata Muda (III/a)", "Pengelola Keuangan", dec!(0), dec!(0)),
    ];

    let mut roster = Vec::with_capacity(people.len());
    for (id, (name, nip, rank, position, within, out_of)) in TRAVELER_IDS.iter().zip(people) {
        let traveler = Traveler {
            id: TravelerId::from_uuid(Uuid::parse_str(id)?),
            name: name.to_string(),
            nip: nip.to_string(),
            rank: rank.to_string(),
            position: position.to_string(),
            representation_within_region: within,
            representation_out_of_region: out_of,
        };
        repo.upsert(&traveler).await?;
        println!("  Saved traveler: {}", traveler.name);
        roster.push(traveler);
    }

    Ok(roster)
}

/// Prices and saves one within-region assignment through the derivation engine.
async fn seed_sample_assignment(
    repo: &AssignmentRepository,
    rates: &RateTable,
    roster: &[Traveler],
    catalog: &DestinationCatalog,
) -> anyhow::Result<()> {
    let mut assignment = Assignment::new("5.1.02.04.01.0001", TravelType::WithinRegion);
    assignment.id = AssignmentId::from_uuid(Uuid::parse_str(SAMPLE_ASSIGNMENT_ID)?);

    let mut draft = AssignmentDraft::new(assignment);
    draft.describe(
        "094/123/BKD/2024",
        "Monitoring dan evaluasi administrasi kepegawaian",
        "Kendaraan dinas",
    );
    CostDerivationEngine::set_dates(
        &mut draft,
        NaiveDate::from_ymd_opt(2024, 1, 10),
        NaiveDate::from_ymd_opt(2024, 1, 12),
    )?;
    CostDerivationEngine::set_destination(&mut draft, "Lombok Timur", rates);
    for traveler in roster.iter().take(2) {
        CostDerivationEngine::toggle_traveler(&mut draft, traveler, rates);
    }

    let assignment = draft.finish(catalog)?;
    repo.upsert(&assignment, catalog).await?;
    println!(
        "  Saved assignment {} to {}",
        assignment.assignment_number, assignment.destination
    );

    Ok(())
}
