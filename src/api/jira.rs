use super::models::RawIssue;
use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_print};
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://subex.atlassian.net";
const SEARCH_URL: &str = "rest/api/3/search/jql";
const SEARCH_FIELDS: &str = "project,worklog,summary";
const PAGE_SIZE: u64 = 50;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum JiraError {
    #[error("Jira API error: {status} - {body}")]
    Api { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One page of `/search/jql` results.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JiraSearchPage {
    #[serde(default)]
    issues: Vec<RawIssue>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    max_results: Option<u64>,
}

#[derive(Debug)]
pub struct Jira {
    client: Client,
    config: JiraConfig,
    token: String,
}

impl Jira {
    pub fn new(config: &JiraConfig, token: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config: config.clone(),
            token: token.to_owned(),
        })
    }

    /// Runs `jql` and collects every result page.
    ///
    /// Each page is requested once; the first failing page aborts the search.
    pub async fn search_issues(&self, jql: &str) -> Result<Vec<RawIssue>, JiraError> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), SEARCH_URL);
        let mut issues: Vec<RawIssue> = Vec::new();
        let mut start_at: u64 = 0;

        loop {
            msg_debug!(format!("GET {} jql={} startAt={}", url, jql, start_at));
            let res = self
                .client
                .get(&url)
                .basic_auth(&self.config.login, Some(&self.token))
                .header(reqwest::header::ACCEPT, "application/json")
                .query(&[
                    ("jql", jql.to_string()),
                    ("fields", SEARCH_FIELDS.to_string()),
                    ("startAt", start_at.to_string()),
                    ("maxResults", PAGE_SIZE.to_string()),
                ])
                .send()
                .await?;

            let status = res.status();
            let body = res.text().await?;
            if !status.is_success() {
                return Err(JiraError::Api { status, body });
            }

            let page: JiraSearchPage = serde_json::from_str(&body)?;
            if page.issues.is_empty() {
                break;
            }

            let received = page.issues.len();
            issues.extend(page.issues);
            let total = page.total.unwrap_or(issues.len() as u64);
            msg_debug!(Message::JiraPageFetched { start_at, received, total });

            start_at += page.max_results.unwrap_or(PAGE_SIZE);
            if start_at >= total {
                break;
            }
        }

        Ok(issues)
    }
}

/// Two sample issues with one worklog each, started at `now`.
///
/// Used in mock mode to exercise the report without a Jira instance.
pub fn mock_issues(author: &str, now: DateTime<Utc>) -> Vec<RawIssue> {
    let started = now.to_rfc3339_opts(SecondsFormat::Micros, false);
    let fixtures = [
        ("PROJ-1", "Fix login bug", "Project A", 3600),
        ("PROJ-2", "Add reporting", "Project B", 7200),
    ];

    fixtures
        .into_iter()
        .filter_map(|(key, summary, project, seconds)| {
            serde_json::from_value(json!({
                "key": key,
                "fields": {
                    "summary": summary,
                    "project": { "name": project },
                    "worklog": { "worklogs": [
                        { "author": { "emailAddress": author }, "timeSpentSeconds": seconds, "started": started }
                    ]}
                }
            }))
            .ok()
        })
        .collect()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JiraConfig {
    /// Account email, used for basic auth and as the default author filter.
    pub login: String,
    /// Base URL of the Jira instance.
    pub api_url: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            login: String::new(),
            api_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl JiraConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "jira".to_string(),
            name: "Jira".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleJira);

        Ok(Self {
            login: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraLogin.to_string())
                .default(config.login)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        })
    }
}
