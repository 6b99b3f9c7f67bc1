//! Plain-text rendering.

use sppd_core::budget::ReconciliationReport;
use sppd_core::dashboard::{TravelStats, TravelerHistory};
use sppd_shared::types::format_rupiah;

/// Realization table, one row per budget line plus totals.
pub fn report(report: &ReconciliationReport) -> String {
    let mut out = String::from("Budget realization\n");
    out.push_str(&format!(
        "{:<20} {:>18} {:>18} {:>18} {:>18} {:>18} {:>8}\n",
        "Code", "Ceiling", "Disbursement", "Realized", "Left to disburse", "Left in budget", "Used"
    ));

    for line in &report.lines {
        let flag = match (line.is_over_budget, line.is_over_disbursement) {
            (true, _) => " OVER BUDGET",
            (false, true) => " OVER DISBURSEMENT",
            (false, false) => "",
        };
        out.push_str(&format!(
            "{:<20} {:>18} {:>18} {:>18} {:>18} {:>18} {:>7}%{flag}\n",
            line.code,
            format_rupiah(line.budget_ceiling),
            format_rupiah(line.disbursement_ceiling),
            format_rupiah(line.realized),
            format_rupiah(line.remaining_disbursement),
            format_rupiah(line.remaining_budget),
            line.utilization_percent,
        ));
    }

    let totals = &report.totals;
    out.push_str(&format!(
        "{:<20} {:>18} {:>18} {:>18} {:>18} {:>18}\n",
        "TOTAL",
        format_rupiah(totals.budget_ceiling),
        format_rupiah(totals.disbursement_ceiling),
        format_rupiah(totals.realized),
        format_rupiah(totals.remaining_disbursement),
        format_rupiah(totals.remaining_budget),
    ));
    out
}

/// Travel type split and within-region destination counts.
pub fn stats(stats: &TravelStats) -> String {
    let mut out = format!(
        "\nAssignments: {} (within region {} / {}%, out of region {} / {}%)\n",
        stats.total,
        stats.within_region,
        stats.within_region_percent,
        stats.out_of_region,
        stats.out_of_region_percent,
    );
    for entry in &stats.destination_counts {
        out.push_str(&format!("  {:<24} {:>4}\n", entry.destination, entry.count));
    }
    out
}

/// Trips for one traveler with their totals.
pub fn history(history: &TravelerHistory) -> String {
    let mut out = format!("\nTraveler {}\n", history.traveler_id);
    for entry in &history.entries {
        let dates = match (entry.start_date, entry.end_date) {
            (Some(start), Some(end)) => format!("{start} - {end}"),
            _ => "-".to_string(),
        };
        out.push_str(&format!(
            "  {:<22} {:<18} {:<25} {:>3} days {:>18}\n",
            entry.assignment_number,
            entry.destination,
            dates,
            entry.duration_days,
            format_rupiah(entry.amount),
        ));
    }
    out.push_str(&format!(
        "  {} trip(s), {} days, {}\n",
        history.entries.len(),
        history.total_days,
        format_rupiah(history.total_amount),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sppd_core::budget::{BudgetLineReconciliation, ReconciliationTotals};
    use sppd_core::dashboard::DestinationCount;
    use sppd_shared::types::TravelerId;

    fn line(code: &str, realized: Decimal, over_budget: bool) -> BudgetLineReconciliation {
        BudgetLineReconciliation {
            code: code.to_string(),
            name: "Perjalanan Dinas".to_string(),
            budget_ceiling: dec!(10000000),
            disbursement_ceiling: dec!(6000000),
            realized,
            remaining_disbursement: dec!(6000000) - realized,
            remaining_budget: dec!(10000000) - realized,
            utilization_percent: dec!(18.9),
            is_over_budget: over_budget,
            is_over_disbursement: over_budget,
        }
    }

    #[test]
    fn test_report_lists_lines_and_totals() {
        let report = ReconciliationReport {
            lines: vec![
                line("5.1.02.04.01.0001", dec!(1890000), false),
                line("5.1.02.04.01.0003", dec!(12000000), true),
            ],
            totals: ReconciliationTotals {
                realized: dec!(13890000),
                ..ReconciliationTotals::default()
            },
        };

        let text = super::report(&report);

        assert!(text.contains("5.1.02.04.01.0001"));
        assert!(text.contains(&format_rupiah(dec!(1890000))));
        assert!(text.contains("OVER BUDGET"));
        assert_eq!(text.matches("OVER").count(), 1);
        assert!(text.contains("TOTAL"));
        assert!(text.contains(&format_rupiah(dec!(13890000))));
    }

    #[test]
    fn test_report_shows_both_remaining_figures() {
        let report = ReconciliationReport {
            lines: vec![line("5.1.02.04.01.0001", dec!(7000000), false)],
            totals: ReconciliationTotals {
                budget_ceiling: dec!(10000000),
                disbursement_ceiling: dec!(6000000),
                realized: dec!(7000000),
                remaining_disbursement: dec!(-1000000),
                remaining_budget: dec!(3000000),
            },
        };

        let text = super::report(&report);
        let rows: Vec<&str> = text.lines().collect();

        assert!(rows[1].contains("Left to disburse"));
        assert!(rows[1].contains("Left in budget"));
        for row in &rows[2..] {
            assert!(row.contains(&format_rupiah(dec!(-1000000))), "{row}");
            assert!(row.contains(&format_rupiah(dec!(3000000))), "{row}");
        }
    }

    #[test]
    fn test_stats_lists_destinations() {
        let stats = TravelStats {
            total: 4,
            within_region: 3,
            out_of_region: 1,
            within_region_percent: dec!(75),
            out_of_region_percent: dec!(25),
            destination_counts: vec![DestinationCount {
                destination: "Lombok Timur".to_string(),
                count: 3,
            }],
        };

        let text = super::stats(&stats);

        assert!(text.contains("Assignments: 4"));
        assert!(text.contains("75%"));
        assert!(text.contains("Lombok Timur"));
    }

    #[test]
    fn test_empty_history() {
        let history = TravelerHistory {
            traveler_id: TravelerId::new(),
            entries: Vec::new(),
            total_days: 0,
            total_amount: Decimal::ZERO,
        };

        assert!(super::history(&history).contains("0 trip(s), 0 days"));
    }
}
