//! Ranking of per-issue totals and the assembled report.
//!
//! Issue totals are ranked by logged time, longest first. Issues without any
//! time in the period are dropped, except for [`Period::All`] which keeps every
//! issue the search returned. Equal totals are ordered by issue key.

use crate::libs::aggregate::{Aggregation, DetailRow, ReportOptions};
use crate::libs::period::Period;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const HOURS_PER_DAY: f64 = 8.0;

pub fn hours(seconds: u64) -> f64 {
    seconds as f64 / SECONDS_PER_HOUR
}

/// Working days at eight hours per day.
pub fn days(seconds: u64) -> f64 {
    hours(seconds) / HOURS_PER_DAY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTotal {
    pub key: String,
    pub summary: String,
    pub project: String,
    pub seconds: u64,
}

impl IssueTotal {
    pub fn hours(&self) -> f64 {
        hours(self.seconds)
    }

    pub fn days(&self) -> f64 {
        days(self.seconds)
    }
}

/// Builds the ordered issue totals from an aggregation.
pub fn rank_totals(aggregation: &Aggregation, period: Period) -> Vec<IssueTotal> {
    let mut totals: Vec<IssueTotal> = aggregation
        .totals
        .iter()
        .filter(|(_, &seconds)| period == Period::All || seconds > 0)
        .map(|(key, &seconds)| IssueTotal {
            key: key.clone(),
            summary: aggregation.summaries.get(key).cloned().unwrap_or_default(),
            project: aggregation.projects.get(key).cloned().unwrap_or_default(),
            seconds,
        })
        .collect();

    totals.sort_by(|a, b| b.seconds.cmp(&a.seconds).then_with(|| a.key.cmp(&b.key)));
    totals
}

pub fn grand_total(totals: &[IssueTotal]) -> u64 {
    totals.iter().fold(0, |sum, total| sum.saturating_add(total.seconds))
}

/// A row of the by-day breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    pub date: String,
    pub issue_key: String,
    pub project: String,
    pub seconds: u64,
    /// Seconds logged on this date across all issues.
    pub date_seconds: u64,
}

/// Everything the renderers need for one run.
#[derive(Debug, Clone, Serialize)]
pub struct WorklogReport {
    pub period: Period,
    pub period_label: String,
    pub generated_at: String,
    pub totals: Vec<IssueTotal>,
    pub details: Vec<DetailRow>,
    pub days: Vec<DayRow>,
    pub grand_total_seconds: u64,
}

impl WorklogReport {
    pub fn build(aggregation: Aggregation, options: &ReportOptions, now: DateTime<Utc>) -> Self {
        let totals = rank_totals(&aggregation, options.period);
        let grand_total_seconds = grand_total(&totals);
        let days = day_rows(&aggregation.day_totals, &aggregation.projects);

        Self {
            period: options.period,
            period_label: options.period.label(&options.timezone, now),
            generated_at: now.with_timezone(&options.timezone).format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            totals,
            details: aggregation.details,
            days,
            grand_total_seconds,
        }
    }

    pub fn grand_total_hours(&self) -> f64 {
        hours(self.grand_total_seconds)
    }

    pub fn grand_total_days(&self) -> f64 {
        days(self.grand_total_seconds)
    }
}

/// Flattens the day totals into rows ordered by date, then issue key.
pub fn day_rows(day_totals: &BTreeMap<(String, String), u64>, projects: &HashMap<String, String>) -> Vec<DayRow> {
    let mut per_date: BTreeMap<&str, u64> = BTreeMap::new();
    for ((date, _), seconds) in day_totals {
        let date_total = per_date.entry(date.as_str()).or_insert(0);
        *date_total = date_total.saturating_add(*seconds);
    }

    day_totals
        .iter()
        .map(|((date, key), &seconds)| DayRow {
            date: date.clone(),
            issue_key: key.clone(),
            project: projects.get(key).cloned().unwrap_or_default(),
            seconds,
            date_seconds: per_date.get(date.as_str()).copied().unwrap_or(0),
        })
        .collect()
}
