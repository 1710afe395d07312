//! Worklog report command.
//!
//! Resolves the run settings, fetches the current user's worklogged issues
//! (or the built-in sample issues in mock mode), aggregates them for the
//! selected period, prints the issue totals and writes the report file.

use crate::{
    api::jira::{mock_issues, Jira, JiraConfig},
    libs::{
        aggregate::{Aggregator, ReportOptions},
        config::{parse_timezone, Config, EnvOverrides},
        export::{ExportFormat, Exporter},
        formatter::format_decimal,
        messages::Message,
        period::{Period, PeriodRange},
        secret::Secret,
        totals::WorklogReport,
        view::View,
    },
    msg_bail_anyhow, msg_debug, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Reporting period; prompted for when neither given nor configured
    #[arg(short, long, value_enum)]
    period: Option<Period>,

    /// Output file; its extension selects the format
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, overriding the file extension
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Only count worklogs by this author (defaults to EMAIL; unfiltered when neither is set)
    #[arg(short, long)]
    author: Option<String>,

    /// Reference timezone for month boundaries (defaults to TZ, then the configured zone)
    #[arg(long)]
    tz: Option<String>,

    /// Jira base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Use built-in sample issues instead of calling Jira
    #[arg(long)]
    mock: bool,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let now = Utc::now();
    let config = Config::read()?;
    let env = EnvOverrides::from_env();
    let report_config = config.report.clone().unwrap_or_default();
    let jira_config = config.jira.clone().unwrap_or_default();
    let mock = args.mock || env.mock;

    let period = match args.period.or(report_config.period) {
        Some(period) => period,
        None => prompt_period()?,
    };
    let timezone = resolve_timezone(args.tz.as_deref(), env.timezone.as_deref(), &report_config.timezone)?;

    let output = args.output.unwrap_or_else(|| PathBuf::from(&report_config.output));
    if output.file_name().is_none() {
        msg_bail_anyhow!(Message::InvalidOutputPath(output.display().to_string()));
    }
    let format = args.format.unwrap_or_else(|| ExportFormat::from_path(&output));

    let login = match env.email.clone().or_else(|| Some(jira_config.login.clone()).filter(|login| !login.trim().is_empty())) {
        Some(login) => login,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraLogin.to_string())
            .interact_text()?,
    };
    let author = resolve_author(args.author, env.email.clone());

    msg_print!(Message::ReportHeader(period.label(&timezone, now)), true);

    let issues = if mock {
        msg_info!(Message::MockModeEnabled);
        mock_issues(&login, now)
    } else {
        let token = match env.api_key {
            Some(token) => token,
            None => Secret::api_token().get_or_prompt()?,
        };
        let api_url = args.base_url.or(env.base_url).unwrap_or(jira_config.api_url);
        let jira = Jira::new(&JiraConfig { login, api_url }, &token)?;

        msg_info!(Message::FetchingIssues);
        jira.search_issues(period.jql())
            .await
            .map_err(|e| msg_error_anyhow!(Message::JiraFetchFailed(e.to_string())))?
    };
    msg_success!(Message::FetchedIssues(issues.len()));

    let options = match author {
        Some(author) => ReportOptions::new(period, timezone).with_author(author),
        None => ReportOptions::new(period, timezone),
    };
    let range = PeriodRange::compute(period, &timezone, now);
    let aggregation = Aggregator::new(&options, range).run(&issues);
    msg_debug!(Message::AggregationSummary {
        issues: aggregation.totals.len(),
        entries: aggregation.details.len(),
    });

    let report = WorklogReport::build(aggregation, &options, now);
    if report.totals.is_empty() {
        msg_warning!(Message::NoWorklogsFound(report.period_label.clone()));
    }
    View::totals(&report)?;
    msg_info!(Message::GrandTotal(
        format_decimal(report.grand_total_hours()),
        format_decimal(report.grand_total_days())
    ));

    msg_info!(Message::OutputFormatInferred(format.name().to_string()));
    Exporter::new(format, Some(output)).export(&report)?;

    Ok(())
}

/// Flag, then `EMAIL`. The configured login only authenticates and never filters.
pub fn resolve_author(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.or(env).filter(|author| !author.trim().is_empty())
}

fn prompt_period() -> Result<Period> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPeriod.to_string())
        .default(Period::This.to_string())
        .interact_text()?;
    Ok(input.parse::<Period>()?)
}

/// Flag, then `TZ`, then the configured zone.
///
/// An unusable `TZ` value (such as a POSIX rule string) is ignored with a warning.
fn resolve_timezone(flag: Option<&str>, env: Option<&str>, configured: &str) -> Result<Tz> {
    if let Some(name) = flag {
        return parse_timezone(name);
    }
    if let Some(name) = env {
        match parse_timezone(name) {
            Ok(tz) => return Ok(tz),
            Err(_) => msg_warning!(Message::UnknownTimezone(name.to_string())),
        }
    }
    parse_timezone(configured)
}
