#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::UTC;
    use jwlog::api::models::RawIssue;
    use jwlog::libs::aggregate::{display_offset, format_instant, parse_instant, Aggregation, Aggregator, ReportOptions};
    use jwlog::libs::period::{Period, PeriodRange};
    use serde_json::{json, Value};

    const ME: &str = "me@example.com";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap()
    }

    fn issue(key: &str, worklogs: Value) -> RawIssue {
        serde_json::from_value(json!({
            "key": key,
            "fields": {
                "summary": format!("Summary of {}", key),
                "project": { "name": "Project A" },
                "worklog": { "worklogs": worklogs }
            }
        }))
        .unwrap()
    }

    fn worklog(author: &str, seconds: u64, started: &str) -> Value {
        json!({
            "author": { "emailAddress": author },
            "timeSpentSeconds": seconds,
            "started": started
        })
    }

    fn run(options: &ReportOptions, issues: &[RawIssue]) -> Aggregation {
        let range = PeriodRange::compute(options.period, &options.timezone, now());
        Aggregator::new(options, range).run(issues)
    }

    fn this_month() -> ReportOptions {
        ReportOptions::new(Period::This, UTC).with_author(ME)
    }

    #[test]
    fn test_sums_accepted_entries_per_issue() {
        let issues = vec![
            issue(
                "PROJ-1",
                json!([
                    worklog(ME, 3600, "2025-02-10T10:00:00.000+0000"),
                    worklog(ME, 1800, "2025-02-11T10:00:00.000+0000")
                ]),
            ),
            issue("PROJ-2", json!([worklog(ME, 7200, "2025-02-12T10:00:00.000+0000")])),
        ];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&5400));
        assert_eq!(aggregation.totals.get("PROJ-2"), Some(&7200));
        assert_eq!(aggregation.details.len(), 3);
        assert_eq!(aggregation.summaries.get("PROJ-2").map(String::as_str), Some("Summary of PROJ-2"));
        assert_eq!(aggregation.projects.get("PROJ-1").map(String::as_str), Some("Project A"));
    }

    #[test]
    fn test_author_filter_is_case_insensitive() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                worklog("Me@Example.COM", 3600, "2025-02-10T10:00:00.000+0000"),
                worklog("someone@example.com", 7200, "2025-02-10T11:00:00.000+0000")
            ]),
        )];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&3600));
        assert_eq!(aggregation.details.len(), 1);
    }

    #[test]
    fn test_entries_without_author_pass_the_filter() {
        let issues = vec![issue(
            "PROJ-1",
            json!([{ "timeSpentSeconds": 900, "started": "2025-02-10T10:00:00.000+0000" }]),
        )];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&900));
    }

    #[test]
    fn test_author_falls_back_to_account_name() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                { "author": { "name": "jdoe" }, "timeSpentSeconds": 600, "started": "2025-02-10T10:00:00.000+0000" },
                { "author": { "name": "other" }, "timeSpentSeconds": 900, "started": "2025-02-10T10:00:00.000+0000" }
            ]),
        )];

        let options = ReportOptions::new(Period::This, UTC).with_author("JDOE");
        let aggregation = run(&options, &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&600));
    }

    #[test]
    fn test_without_author_filter_everything_counts() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                worklog(ME, 3600, "2025-02-10T10:00:00.000+0000"),
                worklog("someone@example.com", 7200, "2025-02-10T11:00:00.000+0000")
            ]),
        )];

        let options = ReportOptions::new(Period::This, UTC).with_author("   ");
        assert_eq!(options.author, None);
        let aggregation = run(&options, &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&10800));
    }

    #[test]
    fn test_missing_or_unparseable_start_is_skipped() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                { "author": { "emailAddress": ME }, "timeSpentSeconds": 3600 },
                worklog(ME, 3600, ""),
                worklog(ME, 3600, "last tuesday"),
                worklog(ME, 600, "2025-02-10T10:00:00.000+0000")
            ]),
        )];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&600));
        assert_eq!(aggregation.details.len(), 1);
    }

    #[test]
    fn test_entries_outside_the_period_are_skipped() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                worklog(ME, 3600, "2025-01-31T23:59:59.000+0000"),
                worklog(ME, 1200, "2025-02-01T00:00:00.000+0000"),
                worklog(ME, 3600, "2025-03-01T00:00:00.000+0000")
            ]),
        )];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&1200));
    }

    #[test]
    fn test_period_all_counts_every_date() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                worklog(ME, 3600, "2019-06-01T10:00:00.000+0000"),
                worklog(ME, 3600, "2025-02-10T10:00:00.000+0000")
            ]),
        )];

        let options = ReportOptions::new(Period::All, UTC).with_author(ME);
        let aggregation = run(&options, &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&7200));
    }

    #[test]
    fn test_issue_without_accepted_entries_has_zero_total() {
        let issues = vec![issue("PROJ-1", json!([worklog("someone@example.com", 3600, "2025-02-10T10:00:00.000+0000")]))];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&0));
        assert!(aggregation.details.is_empty());
        assert!(aggregation.day_totals.is_empty());
    }

    #[test]
    fn test_non_list_worklogs_skip_the_issue() {
        let issues = vec![
            issue("PROJ-1", json!({ "broken": true })),
            issue("PROJ-2", json!([worklog(ME, 60, "2025-02-10T10:00:00.000+0000")])),
        ];

        let aggregation = run(&this_month(), &issues);
        assert!(!aggregation.totals.contains_key("PROJ-1"));
        assert_eq!(aggregation.summaries.get("PROJ-1").map(String::as_str), Some("Summary of PROJ-1"));
        assert_eq!(aggregation.totals.get("PROJ-2"), Some(&60));
    }

    #[test]
    fn test_repeated_issue_key_accumulates() {
        let issues = vec![
            issue("PROJ-1", json!([worklog(ME, 600, "2025-02-10T10:00:00.000+0000")])),
            issue("PROJ-1", json!([worklog(ME, 300, "2025-02-11T10:00:00.000+0000")])),
        ];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&900));
        assert_eq!(aggregation.details.len(), 2);
    }

    #[test]
    fn test_detail_timestamps_are_shown_in_ist() {
        let issues = vec![issue(
            "PROJ-1",
            json!([{
                "author": { "emailAddress": ME },
                "timeSpentSeconds": 5400,
                "started": "2025-02-10T20:00:00.000+0000",
                "created": "2025-02-10T21:15:00.000+0000",
                "comment": { "type": "doc", "content": [{ "type": "paragraph", "content": [{ "text": "Late fix" }] }] }
            }]),
        )];

        let aggregation = run(&this_month(), &issues);
        let detail = &aggregation.details[0];
        assert_eq!(detail.issue_key, "PROJ-1");
        assert_eq!(detail.started, "2025-02-11T01:30:00+05:30");
        assert_eq!(detail.created, "2025-02-11T02:45:00+05:30");
        assert_eq!(detail.seconds, 5400);
        assert_eq!(detail.hours(), 1.5);
        assert_eq!(detail.comment, "Late fix");
    }

    #[test]
    fn test_created_fallbacks() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                { "author": { "emailAddress": ME }, "timeSpentSeconds": 60, "started": "2025-02-10T10:00:00.000+0000", "created": "yesterday" },
                { "author": { "emailAddress": ME }, "timeSpentSeconds": 60, "started": "2025-02-10T10:00:00.000+0000" }
            ]),
        )];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.details[0].created, "yesterday");
        assert_eq!(aggregation.details[1].created, "");
        assert_eq!(aggregation.details[1].comment, "");
    }

    #[test]
    fn test_non_string_created_is_kept_raw() {
        let issues = vec![issue(
            "PROJ-1",
            json!([{
                "author": { "emailAddress": ME },
                "timeSpentSeconds": 3600,
                "started": "2025-01-15T10:00:00.000+0000",
                "created": 1736935200000u64
            }]),
        )];

        let options = ReportOptions::new(Period::All, UTC).with_author(ME);
        let aggregation = run(&options, &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&3600));
        assert_eq!(aggregation.details.len(), 1);
        assert_eq!(aggregation.details[0].created, "1736935200000");
    }

    #[test]
    fn test_non_string_started_is_skipped_like_unparseable() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                { "author": { "emailAddress": ME }, "timeSpentSeconds": 3600, "started": 12345 },
                worklog(ME, 600, "2025-01-15T10:00:00.000+0000")
            ]),
        )];

        let options = ReportOptions::new(Period::All, UTC).with_author(ME);
        let aggregation = run(&options, &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&600));
        assert_eq!(aggregation.details.len(), 1);
    }

    #[test]
    fn test_huge_durations_saturate() {
        let issues = vec![issue(
            "PROJ-1",
            json!([
                { "author": { "emailAddress": ME }, "timeSpentSeconds": 1e20, "started": "2025-02-10T10:00:00.000+0000" },
                { "author": { "emailAddress": ME }, "timeSpentSeconds": 1e20, "started": "2025-02-10T11:00:00.000+0000" }
            ]),
        )];

        let aggregation = run(&this_month(), &issues);
        assert_eq!(aggregation.totals.get("PROJ-1"), Some(&u64::MAX));
        assert_eq!(aggregation.day_totals.values().copied().collect::<Vec<_>>(), vec![u64::MAX]);
    }

    #[test]
    fn test_day_totals_use_the_ist_date() {
        let issues = vec![
            issue(
                "PROJ-1",
                json!([
                    worklog(ME, 3600, "2025-02-10T19:00:00.000+0000"),
                    worklog(ME, 1800, "2025-02-10T17:00:00.000+0000")
                ]),
            ),
            issue("PROJ-2", json!([worklog(ME, 900, "2025-02-10T20:00:00.000+0000")])),
        ];

        let aggregation = run(&this_month(), &issues);
        let day = |date: &str, key: &str| aggregation.day_totals.get(&(date.to_string(), key.to_string())).copied();

        // 19:00 UTC is 00:30 the next day in IST
        assert_eq!(day("2025-02-11", "PROJ-1"), Some(3600));
        assert_eq!(day("2025-02-10", "PROJ-1"), Some(1800));
        assert_eq!(day("2025-02-11", "PROJ-2"), Some(900));
    }

    #[test]
    fn test_day_totals_match_issue_totals() {
        let issues = vec![
            issue(
                "PROJ-1",
                json!([
                    worklog(ME, 3600, "2025-02-03T09:00:00.000+0000"),
                    worklog(ME, 1234, "2025-02-04T22:00:00.000+0000")
                ]),
            ),
            issue("PROJ-2", json!([worklog(ME, 4321, "2025-02-05T02:00:00.000+0000")])),
        ];

        let aggregation = run(&this_month(), &issues);
        let from_totals: u64 = aggregation.totals.values().sum();
        let from_days: u64 = aggregation.day_totals.values().sum();
        let from_details: u64 = aggregation.details.iter().map(|detail| detail.seconds).sum();

        assert_eq!(from_totals, 9155);
        assert_eq!(from_days, from_totals);
        assert_eq!(from_details, from_totals);
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let issues = vec![issue("PROJ-1", json!([worklog(ME, 3600, "2025-02-10T10:00:00.000+0000")]))];
        let options = this_month();
        let aggregator = Aggregator::new(&options, PeriodRange::compute(Period::This, &UTC, now()));

        assert_eq!(aggregator.run(&issues), aggregator.run(&issues));
    }

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 2, 10, 10, 0, 0).unwrap();

        for raw in [
            "2025-02-10T10:00:00.000+0000",
            "2025-02-10T10:00:00Z",
            "2025-02-10T15:30:00+05:30",
            "2025-02-10T10:00:00",
            "2025-02-10 10:00:00",
        ] {
            let parsed = parse_instant(raw).unwrap_or_else(|| panic!("failed to parse {}", raw));
            assert_eq!(parsed.with_timezone(&Utc), expected, "{}", raw);
        }

        assert_eq!(
            parse_instant("2025-02-10").map(|instant| instant.with_timezone(&Utc)),
            Some(Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_instant("not a date"), None);
        assert_eq!(parse_instant(""), None);
    }

    #[test]
    fn test_format_instant_in_display_offset() {
        let instant = parse_instant("2025-02-10T10:00:00.123+0000").unwrap();
        assert_eq!(format_instant(&instant.with_timezone(&display_offset())), "2025-02-10T15:30:00.123+05:30");
    }
}
