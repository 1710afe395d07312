//! Display implementation for application messages.
//!
//! All user-facing text is defined here, in one `match`, so wording stays
//! consistent across commands and can be changed without touching callers.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "No configuration found".to_string(),
            Message::ConfigModuleJira => "Jira settings".to_string(),
            Message::ConfigModuleReport => "Report settings".to_string(),
            Message::UnknownTimezone(name) => format!("Unknown timezone '{}'. Use an IANA name such as UTC or Asia/Kolkata.", name),
            Message::InvalidOutputPath(path) => format!("Invalid output path: {}", path),
            Message::OutputFormatInferred(format) => format!("Writing {} report", format),

            // === REPORT MESSAGES ===
            Message::ReportHeader(label) => format!("Jira worklog report for {}", label),
            Message::FetchingIssues => "Fetching issues...".to_string(),
            Message::FetchedIssues(count) => format!("Fetched {} issue(s)", count),
            Message::MockModeEnabled => "Mock mode enabled, Jira will not be called".to_string(),
            Message::NoWorklogsFound(label) => format!("No worklogs found for {}", label),
            Message::AggregationSummary { issues, entries } => format!("Aggregated {} worklog(s) across {} issue(s)", entries, issues),
            Message::GrandTotal(hours, days) => format!("Grand total: {} hours ({} days)", hours, days),
            Message::ExportCompleted(path) => format!("Wrote report to {}", path),
            Message::ExcelExportCompleted(path, sheets) => format!("Wrote Excel report to {} (sheets: {})", path, sheets),

            // === AUTHENTICATION MESSAGES ===
            Message::TokenCacheDeleted => "Cached API token removed".to_string(),
            Message::TokenCacheNotFound => "No cached API token found".to_string(),
            Message::ApiTokenMissing => "API token is empty".to_string(),

            // === API MESSAGES ===
            Message::JiraFetchFailed(error) => format!("Failed to call Jira: {}", error),
            Message::JiraPageFetched { start_at, received, total } => {
                format!("Received {} issue(s) at offset {} of {}", received, start_at, total)
            }

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptJiraLogin => "Enter your Jira account email".to_string(),
            Message::PromptJiraUrl => "Enter the Jira base URL".to_string(),
            Message::PromptApiToken => "Enter your Jira API token".to_string(),
            Message::PromptTimezone => "Enter the reference timezone".to_string(),
            Message::PromptOutputFile => "Enter the output file".to_string(),
            Message::PromptPeriod => "Period (this, last, all)".to_string(),
        };
        write!(f, "{}", text)
    }
}
