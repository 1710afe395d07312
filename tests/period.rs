#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
    use chrono_tz::{America, Asia, UTC};
    use jwlog::libs::period::{Period, PeriodRange};

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn end_of_day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_micro_opt(23, 59, 59, 999_999).unwrap()
    }

    #[test]
    fn test_this_month() {
        let now = Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::This, &UTC, now).unwrap();

        assert_eq!(range.start.naive_local(), midnight(2025, 2, 1));
        assert_eq!(range.end.naive_local(), end_of_day(2025, 2, 28));
    }

    #[test]
    fn test_this_month_leap_year() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::This, &UTC, now).unwrap();
        assert_eq!(range.end.naive_local(), end_of_day(2024, 2, 29));
    }

    #[test]
    fn test_this_month_december() {
        let now = Utc.with_ymd_and_hms(2024, 12, 20, 8, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::This, &UTC, now).unwrap();

        assert_eq!(range.start.naive_local(), midnight(2024, 12, 1));
        assert_eq!(range.end.naive_local(), end_of_day(2024, 12, 31));
    }

    #[test]
    fn test_last_month_across_year_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let range = PeriodRange::compute(Period::Last, &UTC, now).unwrap();

        assert_eq!(range.start.naive_local(), midnight(2024, 12, 1));
        assert_eq!(range.end.naive_local(), end_of_day(2024, 12, 31));
    }

    #[test]
    fn test_last_month_on_first_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::Last, &UTC, now).unwrap();

        assert_eq!(range.start.naive_local(), midnight(2025, 2, 1));
        assert_eq!(range.end.naive_local(), end_of_day(2025, 2, 28));
    }

    #[test]
    fn test_all_has_no_range() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(PeriodRange::compute(Period::All, &UTC, now), None);
    }

    #[test]
    fn test_month_is_taken_in_reference_timezone() {
        // Still February in UTC, already March in India
        let now = Utc.with_ymd_and_hms(2025, 2, 28, 20, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::This, &Asia::Kolkata, now).unwrap();

        assert_eq!(range.start.naive_local(), midnight(2025, 3, 1));
        assert_eq!(range.start.with_timezone(&Utc), Utc.with_ymd_and_hms(2025, 2, 28, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_boundaries_follow_dst_offsets() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::This, &America::New_York, now).unwrap();

        // EST at the start of March, EDT at the end
        assert_eq!(range.start.with_timezone(&Utc), Utc.with_ymd_and_hms(2025, 3, 1, 5, 0, 0).unwrap());
        assert_eq!(
            range.end.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2025, 4, 1, 3, 59, 59).unwrap() + TimeDelta::microseconds(999_999)
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::This, &UTC, now).unwrap();

        let start = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap() + TimeDelta::microseconds(999_999);

        assert!(range.contains(&start));
        assert!(range.contains(&end));
        assert!(!range.contains(&(start - TimeDelta::seconds(1))));
        assert!(!range.contains(&(end + TimeDelta::microseconds(1))));
    }

    #[test]
    fn test_contains_compares_instants_across_offsets() {
        let now = Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap();
        let range = PeriodRange::compute(Period::This, &UTC, now).unwrap();

        // 2025-03-01T04:00+05:30 is still February in UTC
        let instant = chrono::DateTime::parse_from_rfc3339("2025-03-01T04:00:00+05:30").unwrap();
        assert!(range.contains(&instant));
    }

    #[test]
    fn test_labels() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(Period::This.label(&UTC, now), "January 2025");
        assert_eq!(Period::Last.label(&UTC, now), "December 2024");
        assert_eq!(Period::All.label(&UTC, now), "all");
    }

    #[test]
    fn test_parse_period() {
        assert_eq!("this".parse::<Period>().unwrap(), Period::This);
        assert_eq!(" LAST ".parse::<Period>().unwrap(), Period::Last);
        assert_eq!("All".parse::<Period>().unwrap(), Period::All);

        let err = "yesterday".parse::<Period>().unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_default_period_is_this() {
        assert_eq!(Period::default(), Period::This);
        assert_eq!(Period::This.to_string(), "this");
    }

    #[test]
    fn test_jql_per_period() {
        assert!(Period::This.jql().contains("worklogDate>=startOfMonth()"));
        assert!(Period::Last.jql().contains("startOfMonth(-1)"));
        assert!(Period::Last.jql().contains("endOfMonth(-1)"));
        assert_eq!(Period::All.jql(), "worklogAuthor=currentUser()");
    }

    #[test]
    fn test_period_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Period::Last).unwrap(), "\"last\"");
        assert_eq!(serde_json::from_str::<Period>("\"all\"").unwrap(), Period::All);
    }
}
