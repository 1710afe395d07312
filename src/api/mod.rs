//! Jira integration.
//!
//! - [`models`]: raw issue and worklog records as delivered by the search API
//! - [`jira`]: paginated search client, connection settings and mock fixtures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jwlog::api::{Jira, JiraConfig};
//! use jwlog::libs::period::Period;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = JiraConfig { login: "me@example.com".into(), api_url: "https://example.atlassian.net".into() };
//! let issues = Jira::new(&config, "api-token")?.search_issues(Period::This.jql()).await?;
//! # Ok(())
//! # }
//! ```

pub mod jira;
pub mod models;

pub use jira::{Jira, JiraConfig, JiraError};
pub use models::{RawIssue, RawWorklogEntry};
