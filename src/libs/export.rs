//! Report rendering to files.
//!
//! Renders a [`WorklogReport`] in one of four formats:
//!
//! - **Excel**: a workbook with `Worklog` (issue totals), `Details` (one row per
//!   worklog) and `By Day` (date-wise hours per issue) sheets
//! - **CSV**: the issue totals with a grand-total row
//! - **HTML**: a standalone page with all three tables, sortable by clicking a header
//! - **JSON**: the complete report structure
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwlog::libs::export::{ExportFormat, Exporter};
//! use std::path::PathBuf;
//!
//! let exporter = Exporter::new(ExportFormat::from_path("report.csv"), Some(PathBuf::from("report.csv")));
//! exporter.export(&report)?;
//! ```

use crate::{
    libs::{
        messages::Message,
        totals::{hours, WorklogReport},
    },
    msg_success,
};
use anyhow::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SUMMARY_SHEET: &str = "Worklog";
pub const DETAILS_SHEET: &str = "Details";
pub const BY_DAY_SHEET: &str = "By Day";

const TOTALS_HEADERS: [&str; 5] = ["Issue Key", "Summary", "Project", "Total Hours", "Total Days (8h)"];
const DETAILS_HEADERS: [&str; 7] = ["Issue Key", "Summary", "Project", "Started (IST)", "Created (IST)", "Hours", "Comment"];
const BY_DAY_HEADERS: [&str; 5] = ["Date (IST)", "Issue Key", "Project", "Hours", "Day Total"];
const GRAND_TOTAL: &str = "GRAND TOTAL";
const NUMBER_FORMAT: &str = "0.00";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Excel,
    Html,
    Json,
}

impl ExportFormat {
    /// Picks the format from the file extension; anything unknown is Excel.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => ExportFormat::Csv,
            "html" | "htm" => ExportFormat::Html,
            "json" => ExportFormat::Json,
            _ => ExportFormat::Excel,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "Excel",
            ExportFormat::Html => "HTML",
            ExportFormat::Json => "JSON",
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Tracks the longest value per column to size columns like a human would.
struct ColumnWidths {
    widths: Vec<usize>,
}

impl ColumnWidths {
    fn new() -> Self {
        Self { widths: Vec::new() }
    }

    fn observe(&mut self, col: usize, value: &str) {
        if self.widths.len() <= col {
            self.widths.resize(col + 1, 0);
        }
        self.widths[col] = self.widths[col].max(value.chars().count());
    }

    fn observe_row<S: AsRef<str>>(&mut self, values: &[S]) {
        for (col, value) in values.iter().enumerate() {
            self.observe(col, value.as_ref());
        }
    }

    /// Applies `longest + 2`, clamped to `[min, max]`.
    fn apply(&self, worksheet: &mut Worksheet, min: usize, max: usize) -> Result<()> {
        for (col, width) in self.widths.iter().enumerate() {
            let width = (width + 2).clamp(min, max);
            worksheet.set_column_width(col as u16, width as f64)?;
        }
        Ok(())
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("worklog-report.{}", format.extension())));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, report: &WorklogReport) -> Result<()> {
        let path = self.output_path.display().to_string();
        match self.format {
            ExportFormat::Csv => {
                self.export_csv(report)?;
                msg_success!(Message::ExportCompleted(path));
            }
            ExportFormat::Excel => {
                self.export_excel(report)?;
                let sheets = [SUMMARY_SHEET, DETAILS_SHEET, BY_DAY_SHEET].join(", ");
                msg_success!(Message::ExcelExportCompleted(path, sheets));
            }
            ExportFormat::Html => {
                File::create(&self.output_path)?.write_all(render_html(report).as_bytes())?;
                msg_success!(Message::ExportCompleted(path));
            }
            ExportFormat::Json => {
                let json = serde_json::to_string_pretty(report)?;
                File::create(&self.output_path)?.write_all(json.as_bytes())?;
                msg_success!(Message::ExportCompleted(path));
            }
        }
        Ok(())
    }

    fn export_csv(&self, report: &WorklogReport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(TOTALS_HEADERS)?;

        for total in &report.totals {
            wtr.write_record([
                total.key.clone(),
                total.summary.clone(),
                total.project.clone(),
                format!("{:.2}", total.hours()),
                format!("{:.2}", total.days()),
            ])?;
        }

        wtr.write_record([
            GRAND_TOTAL.to_string(),
            String::new(),
            String::new(),
            format!("{:.2}", report.grand_total_hours()),
            format!("{:.2}", report.grand_total_days()),
        ])?;

        wtr.flush()?;
        Ok(())
    }

    fn export_excel(&self, report: &WorklogReport) -> Result<()> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(summary_sheet(report)?);
        workbook.push_worksheet(details_sheet(report)?);
        workbook.push_worksheet(by_day_sheet(report)?);
        workbook.save(&self.output_path)?;
        Ok(())
    }
}

fn header_format() -> Format {
    Format::new().set_bold().set_background_color(Color::Gray)
}

fn write_headers(worksheet: &mut Worksheet, row: u32, headers: &[&str]) -> Result<()> {
    let header_format = header_format();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, *header, &header_format)?;
    }
    Ok(())
}

fn summary_sheet(report: &WorklogReport) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SUMMARY_SHEET)?;

    let title_format = Format::new().set_bold().set_font_size(14.0);
    let number_format = Format::new().set_num_format(NUMBER_FORMAT);
    let mut widths = ColumnWidths::new();

    worksheet.write_string_with_format(0, 0, "Jira Worklog Report", &title_format)?;
    worksheet.write_string(1, 0, format!("Period: {}", report.period_label))?;
    worksheet.write_string(1, 1, format!("Generated: {}", report.generated_at))?;

    write_headers(&mut worksheet, 3, &TOTALS_HEADERS)?;
    widths.observe_row(&TOTALS_HEADERS);

    let mut row = 4;
    for total in &report.totals {
        let (hours, days) = (round2(total.hours()), round2(total.days()));
        worksheet.write_string(row, 0, &total.key)?;
        worksheet.write_string(row, 1, &total.summary)?;
        worksheet.write_string(row, 2, &total.project)?;
        worksheet.write_number_with_format(row, 3, hours, &number_format)?;
        worksheet.write_number_with_format(row, 4, days, &number_format)?;
        widths.observe_row(&[total.key.clone(), total.summary.clone(), total.project.clone(), hours.to_string(), days.to_string()]);
        row += 1;
    }

    // Blank spacer row before the grand total
    row += 1;
    let (hours, days) = (round2(report.grand_total_hours()), round2(report.grand_total_days()));
    worksheet.write_string_with_format(row, 0, GRAND_TOTAL, &Format::new().set_bold())?;
    worksheet.write_number_with_format(row, 3, hours, &number_format)?;
    worksheet.write_number_with_format(row, 4, days, &number_format)?;
    widths.observe_row(&[GRAND_TOTAL.to_string(), String::new(), String::new(), hours.to_string(), days.to_string()]);

    widths.apply(&mut worksheet, 8, 60)?;
    Ok(worksheet)
}

fn details_sheet(report: &WorklogReport) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(DETAILS_SHEET)?;

    let number_format = Format::new().set_num_format(NUMBER_FORMAT);
    let mut widths = ColumnWidths::new();

    write_headers(&mut worksheet, 0, &DETAILS_HEADERS)?;
    widths.observe_row(&DETAILS_HEADERS);

    for (i, detail) in report.details.iter().enumerate() {
        let row = i as u32 + 1;
        let hours = round2(detail.hours());
        worksheet.write_string(row, 0, &detail.issue_key)?;
        worksheet.write_string(row, 1, &detail.summary)?;
        worksheet.write_string(row, 2, &detail.project)?;
        worksheet.write_string(row, 3, &detail.started)?;
        worksheet.write_string(row, 4, &detail.created)?;
        worksheet.write_number_with_format(row, 5, hours, &number_format)?;
        worksheet.write_string(row, 6, &detail.comment)?;
        widths.observe_row(&[
            detail.issue_key.clone(),
            detail.summary.clone(),
            detail.project.clone(),
            detail.started.clone(),
            detail.created.clone(),
            hours.to_string(),
            detail.comment.clone(),
        ]);
    }

    widths.apply(&mut worksheet, 8, 80)?;
    Ok(worksheet)
}

fn by_day_sheet(report: &WorklogReport) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(BY_DAY_SHEET)?;

    let number_format = Format::new().set_num_format(NUMBER_FORMAT);
    let centered = Format::new().set_align(FormatAlign::VerticalCenter);
    let centered_number = Format::new().set_align(FormatAlign::VerticalCenter).set_num_format(NUMBER_FORMAT);
    let mut widths = ColumnWidths::new();

    write_headers(&mut worksheet, 0, &BY_DAY_HEADERS)?;
    widths.observe_row(&BY_DAY_HEADERS);

    for (i, day) in report.days.iter().enumerate() {
        let row = i as u32 + 1;
        let issue_hours = round2(hours(day.seconds));
        worksheet.write_string(row, 1, &day.issue_key)?;
        worksheet.write_string(row, 2, &day.project)?;
        worksheet.write_number_with_format(row, 3, issue_hours, &number_format)?;
        widths.observe_row(&[
            day.date.clone(),
            day.issue_key.clone(),
            day.project.clone(),
            issue_hours.to_string(),
            hours(day.date_seconds).to_string(),
        ]);
    }

    // Each date and its day total appear once, spanning that date's rows
    let mut span_start = 0;
    while span_start < report.days.len() {
        let date = &report.days[span_start].date;
        let span_len = report.days[span_start..].iter().take_while(|day| &day.date == date).count();
        let first_row = span_start as u32 + 1;
        let last_row = first_row + span_len as u32 - 1;
        let day_total = hours(report.days[span_start].date_seconds);

        if last_row > first_row {
            worksheet.merge_range(first_row, 0, last_row, 0, date, &centered)?;
            worksheet.merge_range(first_row, 4, last_row, 4, "", &centered_number)?;
        } else {
            worksheet.write_string_with_format(first_row, 0, date, &centered)?;
        }
        worksheet.write_number_with_format(first_row, 4, day_total, &centered_number)?;

        span_start += span_len;
    }

    widths.apply(&mut worksheet, 8, 40)?;
    Ok(worksheet)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A table cell: display text plus an optional numeric sort key.
enum Cell {
    Text(String),
    Number(f64),
}

fn html_table(out: &mut String, title: &str, headers: &[&str], rows: Vec<Vec<Cell>>) {
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(title));
    out.push_str("<table class=\"sortable\">\n<thead><tr>");
    for header in headers {
        let _ = write!(out, "<th>{}</th>", escape_html(header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            match cell {
                Cell::Text(text) => {
                    let _ = write!(out, "<td>{}</td>", escape_html(&text));
                }
                Cell::Number(value) => {
                    let _ = write!(out, "<td class=\"num\" data-value=\"{}\">{:.2}</td>", value, value);
                }
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

const HTML_STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin-bottom:2em}\
th,td{border:1px solid #ccc;padding:4px 8px}\
th{background:#ddd;cursor:pointer}\
td.num{text-align:right}";

const HTML_SORT_SCRIPT: &str = r#"document.querySelectorAll('table.sortable th').forEach(function (th, index) {
  th.addEventListener('click', function () {
    var tbody = th.closest('table').querySelector('tbody');
    var ascending = th.dataset.order !== 'asc';
    th.dataset.order = ascending ? 'asc' : 'desc';
    var key = function (row) {
      var cell = row.children[index];
      return cell.dataset.value !== undefined ? parseFloat(cell.dataset.value) : cell.textContent.toLowerCase();
    };
    Array.from(tbody.rows)
      .sort(function (a, b) {
        var x = key(a), y = key(b);
        return (x < y ? -1 : x > y ? 1 : 0) * (ascending ? 1 : -1);
      })
      .forEach(function (row) { tbody.appendChild(row); });
  });
});"#;

/// Renders the report as a standalone HTML page.
pub fn render_html(report: &WorklogReport) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>Jira Worklog Report - {}</title>", escape_html(&report.period_label));
    let _ = writeln!(out, "<style>{}</style>\n</head>\n<body>", HTML_STYLE);
    out.push_str("<h1>Jira Worklog Report</h1>\n");
    let _ = writeln!(
        out,
        "<p>Period: {} &middot; Generated: {}</p>",
        escape_html(&report.period_label),
        escape_html(&report.generated_at)
    );

    let mut totals: Vec<Vec<Cell>> = report
        .totals
        .iter()
        .map(|total| {
            vec![
                Cell::Text(total.key.clone()),
                Cell::Text(total.summary.clone()),
                Cell::Text(total.project.clone()),
                Cell::Number(round2(total.hours())),
                Cell::Number(round2(total.days())),
            ]
        })
        .collect();
    totals.push(vec![
        Cell::Text(GRAND_TOTAL.to_string()),
        Cell::Text(String::new()),
        Cell::Text(String::new()),
        Cell::Number(round2(report.grand_total_hours())),
        Cell::Number(round2(report.grand_total_days())),
    ]);
    html_table(&mut out, "Totals", &TOTALS_HEADERS, totals);

    let details = report
        .details
        .iter()
        .map(|detail| {
            vec![
                Cell::Text(detail.issue_key.clone()),
                Cell::Text(detail.summary.clone()),
                Cell::Text(detail.project.clone()),
                Cell::Text(detail.started.clone()),
                Cell::Text(detail.created.clone()),
                Cell::Number(round2(detail.hours())),
                Cell::Text(detail.comment.clone()),
            ]
        })
        .collect();
    html_table(&mut out, DETAILS_SHEET, &DETAILS_HEADERS, details);

    let days = report
        .days
        .iter()
        .map(|day| {
            vec![
                Cell::Text(day.date.clone()),
                Cell::Text(day.issue_key.clone()),
                Cell::Text(day.project.clone()),
                Cell::Number(round2(hours(day.seconds))),
                Cell::Number(round2(hours(day.date_seconds))),
            ]
        })
        .collect();
    html_table(&mut out, BY_DAY_SHEET, &BY_DAY_HEADERS, days);

    let _ = writeln!(out, "<script>\n{}\n</script>\n</body>\n</html>", HTML_SORT_SCRIPT);
    out
}
