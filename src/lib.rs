//! # jwlog - Jira worklog reporting
//!
//! A command-line utility that collects the time you logged in Jira and
//! turns it into a report.
//!
//! ## Features
//!
//! - **Period Selection**: current month, previous month or the full history
//! - **Author Filtering**: counts only your own worklogs on shared issues
//! - **Aggregation**: totals per issue, per worklog and per day (IST)
//! - **Data Export**: Excel workbook, CSV, HTML and JSON output
//! - **Credential Cache**: API token stored encrypted after the first prompt
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jwlog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
