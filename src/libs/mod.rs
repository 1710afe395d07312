//! Core library modules for the jwlog application.
//!
//! ## Reporting pipeline
//!
//! - [`rich_text`]: plain-text extraction from worklog comments
//! - [`period`]: calendar month boundaries for `this` / `last` / `all`
//! - [`aggregate`]: folds raw worklogs into per-issue, per-entry and per-day totals
//! - [`totals`]: ranking, grand total and the assembled [`totals::WorklogReport`]
//!
//! ## Infrastructure
//!
//! - [`config`], [`data_storage`], [`secret`]: settings and credential cache
//! - [`export`], [`view`], [`formatter`]: file renderers and terminal output
//! - [`messages`]: user-facing text and output macros
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwlog::libs::aggregate::{Aggregator, ReportOptions};
//! use jwlog::libs::period::Period;
//! use jwlog::libs::totals::WorklogReport;
//!
//! let options = ReportOptions::new(Period::Last, chrono_tz::Asia::Kolkata);
//! let aggregation = Aggregator::current(&options).run(&issues);
//! let report = WorklogReport::build(aggregation, &options, chrono::Utc::now());
//! println!("{:.2} hours", report.grand_total_hours());
//! ```

pub mod aggregate;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod period;
pub mod rich_text;
pub mod secret;
pub mod totals;
pub mod view;
