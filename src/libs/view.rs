use super::formatter::{format_decimal, format_seconds};
use super::totals::WorklogReport;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints the ranked issue totals followed by the grand total.
    pub fn totals(report: &WorklogReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ISSUE", "SUMMARY", "PROJECT", "TIME", "HOURS", "DAYS (8H)"]);
        for total in &report.totals {
            table.add_row(row![
                total.key,
                total.summary,
                total.project,
                format_seconds(total.seconds),
                r->format_decimal(total.hours()),
                r->format_decimal(total.days())
            ]);
        }
        table.add_row(row![
            b->"GRAND TOTAL",
            "",
            "",
            b->format_seconds(report.grand_total_seconds),
            br->format_decimal(report.grand_total_hours()),
            br->format_decimal(report.grand_total_days())
        ]);
        table.printstd();

        Ok(())
    }
}
