//! Reporting periods and their calendar boundaries.
//!
//! A report covers the current calendar month (`this`), the previous one
//! (`last`) or the whole worklog history (`all`). Month boundaries are
//! computed in the user's reference timezone: the range starts at local
//! midnight on the 1st and ends at 23:59:59.999999 on the month's last day,
//! both inclusive.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use jwlog::libs::period::{Period, PeriodRange};
//!
//! let now = Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap();
//! let range = PeriodRange::compute(Period::Last, &chrono_tz::UTC, now).unwrap();
//! assert_eq!(range.start.to_rfc3339(), "2025-01-01T00:00:00+00:00");
//! ```

use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999) {
    Some(time) => time,
    None => panic!("invalid end-of-day time"),
};

/// Symbolic reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The current calendar month.
    #[default]
    This,
    /// The previous calendar month.
    Last,
    /// No date restriction.
    All,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown period '{0}'. Use this, last or all.")]
pub struct UnknownPeriod(pub String);

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "this" => Ok(Period::This),
            "last" => Ok(Period::Last),
            "all" => Ok(Period::All),
            other => Err(UnknownPeriod(other.to_string())),
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::This => "this",
            Period::Last => "last",
            Period::All => "all",
        };
        f.write_str(name)
    }
}

impl Period {
    /// JQL selecting the issues the current user logged work on in this period.
    pub fn jql(&self) -> &'static str {
        match self {
            Period::This => "worklogAuthor=currentUser() AND worklogDate>=startOfMonth() AND worklogDate<=endOfMonth()",
            Period::Last => "worklogAuthor=currentUser() AND worklogDate>=startOfMonth(-1) AND worklogDate<=endOfMonth(-1)",
            Period::All => "worklogAuthor=currentUser()",
        }
    }

    /// Human readable name of the period, e.g. "January 2025".
    pub fn label(&self, tz: &Tz, now: DateTime<Utc>) -> String {
        let first_of_this = first_of_month(now.with_timezone(tz).date_naive());
        match self {
            Period::This => first_of_this.format("%B %Y").to_string(),
            Period::Last => (first_of_this - Days::new(1)).format("%B %Y").to_string(),
            Period::All => self.to_string(),
        }
    }
}

/// Inclusive bounds of a calendar-month period, localized in the reference timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRange {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl PeriodRange {
    /// Computes the range for `period` as seen from `now` in `tz`.
    ///
    /// Returns `None` for [`Period::All`], meaning no range filtering applies.
    pub fn compute(period: Period, tz: &Tz, now: DateTime<Utc>) -> Option<Self> {
        let today = now.with_timezone(tz).date_naive();
        let first_of_this = first_of_month(today);

        let (first_day, last_day) = match period {
            Period::This => {
                let first_of_next = first_of_month(first_of_this + Days::new(32));
                (first_of_this, first_of_next - Days::new(1))
            }
            Period::Last => {
                let last_day = first_of_this - Days::new(1);
                (first_of_month(last_day), last_day)
            }
            Period::All => return None,
        };

        Some(Self {
            start: localize(tz, first_day.and_time(NaiveTime::MIN)),
            end: localize(tz, last_day.and_time(END_OF_DAY)),
        })
    }

    /// Same as [`PeriodRange::compute`] with the current instant.
    pub fn current(period: Period, tz: &Tz) -> Option<Self> {
        Self::compute(period, tz, Utc::now())
    }

    /// Whether `instant` lies within the range, boundaries included.
    pub fn contains<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        let instant = instant.with_timezone(&Utc);
        instant >= self.start.with_timezone(&Utc) && instant <= self.end.with_timezone(&Utc)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Attaches `tz` to a wall-clock time.
///
/// Ambiguous times resolve to the earliest instant. Times skipped by a DST
/// transition take the offset the zone has at that UTC instant.
fn localize(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&local).fix();
            tz.from_utc_datetime(&(local - TimeDelta::seconds(i64::from(offset.local_minus_utc()))))
        }
    }
}
