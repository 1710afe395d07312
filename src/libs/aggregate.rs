//! Worklog aggregation.
//!
//! Walks the raw issues returned by the search API and folds every worklog
//! entry that passes the author filter and the period range into three
//! structures:
//!
//! - per-issue second totals,
//! - one [`DetailRow`] per accepted entry, timestamps shown in IST,
//! - per-(IST date, issue) second totals.
//!
//! Malformed entries never abort a run. A missing or unparseable start time
//! drops the entry, an unparseable creation time is passed through verbatim,
//! and an issue whose worklog list is not a list contributes nothing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwlog::libs::aggregate::{Aggregator, ReportOptions};
//! use jwlog::libs::period::Period;
//!
//! let options = ReportOptions::new(Period::This, chrono_tz::UTC).with_author("me@example.com");
//! let aggregation = Aggregator::current(&options).run(&issues);
//! ```

use crate::api::models::{RawIssue, RawWorklogEntry};
use crate::libs::period::{Period, PeriodRange};
use crate::libs::rich_text::RichText;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// IST, UTC+05:30.
const DISPLAY_OFFSET: FixedOffset = match FixedOffset::east_opt(5 * 3600 + 30 * 60) {
    Some(offset) => offset,
    None => panic!("invalid display offset"),
};

/// The fixed offset used for detail timestamps and day grouping.
pub fn display_offset() -> FixedOffset {
    DISPLAY_OFFSET
}

/// Run configuration for the aggregation pipeline.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Only worklogs by this author (compared case-insensitively) are counted.
    pub author: Option<String>,
    pub period: Period,
    /// Reference timezone for the period boundaries.
    pub timezone: Tz,
}

impl ReportOptions {
    pub fn new(period: Period, timezone: Tz) -> Self {
        Self {
            author: None,
            period,
            timezone,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.author = (!author.trim().is_empty()).then_some(author);
        self
    }

    fn author_filter(&self) -> Option<&str> {
        self.author.as_deref().filter(|author| !author.trim().is_empty())
    }
}

/// One accepted worklog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub issue_key: String,
    pub summary: String,
    pub project: String,
    /// Start instant in IST, ISO-8601.
    pub started: String,
    /// Creation instant in IST, the raw value if it could not be parsed, or empty.
    pub created: String,
    pub seconds: u64,
    pub comment: String,
}

impl DetailRow {
    pub fn hours(&self) -> f64 {
        self.seconds as f64 / 3600.0
    }
}

/// Output of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Accepted seconds per issue key.
    pub totals: BTreeMap<String, u64>,
    /// First-seen summary per issue key.
    pub summaries: HashMap<String, String>,
    /// First-seen project name per issue key.
    pub projects: HashMap<String, String>,
    /// Accepted entries in encounter order.
    pub details: Vec<DetailRow>,
    /// Seconds per (IST date, issue key).
    pub day_totals: BTreeMap<(String, String), u64>,
}

pub struct Aggregator<'a> {
    options: &'a ReportOptions,
    range: Option<PeriodRange>,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator for an already computed period range.
    ///
    /// `None` disables range filtering.
    pub fn new(options: &'a ReportOptions, range: Option<PeriodRange>) -> Self {
        Self { options, range }
    }

    /// Creates an aggregator whose range is evaluated against the current instant.
    pub fn current(options: &'a ReportOptions) -> Self {
        Self::new(options, PeriodRange::current(options.period, &options.timezone))
    }

    pub fn run(&self, issues: &[RawIssue]) -> Aggregation {
        let mut aggregation = Aggregation::default();

        for issue in issues {
            let key = issue.key();
            aggregation.summaries.entry(key.to_string()).or_insert_with(|| issue.summary().to_string());
            aggregation.projects.entry(key.to_string()).or_insert_with(|| issue.project_name().to_string());

            let Some(worklogs) = issue.worklogs() else {
                tracing::debug!(issue = key, "worklog collection is not a list, skipping issue");
                continue;
            };

            let mut issue_seconds = aggregation.totals.get(key).copied().unwrap_or(0);
            for entry in worklogs {
                if let Some(seconds) = self.record(issue, entry, &mut aggregation) {
                    issue_seconds = issue_seconds.saturating_add(seconds);
                }
            }
            aggregation.totals.insert(key.to_string(), issue_seconds);
        }

        tracing::debug!(
            issues = aggregation.totals.len(),
            entries = aggregation.details.len(),
            "aggregation finished"
        );
        aggregation
    }

    /// Records a single entry, returning its seconds when accepted.
    fn record(&self, issue: &RawIssue, entry: &RawWorklogEntry, aggregation: &mut Aggregation) -> Option<u64> {
        let key = issue.key();

        // Entries without a resolvable author are never filtered out
        if let (Some(filter), Some(author)) = (self.options.author_filter(), entry.author_identity()) {
            if author.to_lowercase() != filter.to_lowercase() {
                return None;
            }
        }

        let seconds = entry.time_spent_seconds;
        let started_raw = entry.started.as_deref().filter(|started| !started.is_empty())?;
        let Some(started) = parse_instant(started_raw) else {
            tracing::debug!(issue = key, started = started_raw, "unparseable worklog start, skipping entry");
            return None;
        };

        if let Some(range) = &self.range {
            if !range.contains(&started) {
                return None;
            }
        }

        let started_local = started.with_timezone(&DISPLAY_OFFSET);
        let created = match entry.created.as_deref().filter(|created| !created.is_empty()) {
            Some(raw) => parse_instant(raw)
                .map(|created| format_instant(&created.with_timezone(&DISPLAY_OFFSET)))
                .unwrap_or_else(|| raw.to_string()),
            None => String::new(),
        };

        aggregation.details.push(DetailRow {
            issue_key: key.to_string(),
            summary: issue.summary().to_string(),
            project: issue.project_name().to_string(),
            started: format_instant(&started_local),
            created,
            seconds,
            comment: entry.comment.as_ref().map(RichText::flatten).unwrap_or_default(),
        });

        let date = started_local.date_naive().format("%Y-%m-%d").to_string();
        let day_total = aggregation.day_totals.entry((date, key.to_string())).or_insert(0);
        *day_total = day_total.saturating_add(seconds);

        Some(seconds)
    }
}

/// Parses an ISO-8601 timestamp as produced by Jira.
///
/// Accepts RFC 3339, `+0000` style offsets with optional fractional seconds,
/// and naive date-times or dates, which are taken as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(instant) = DateTime::parse_from_str(raw, format) {
            return Some(instant);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// ISO-8601 with sub-second digits only when present.
pub fn format_instant(instant: &DateTime<FixedOffset>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}
