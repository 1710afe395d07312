//! Raw issue and worklog records as returned by the Jira search API.
//!
//! The search endpoint is queried with `fields=project,worklog,summary`, so
//! every issue carries its key, summary, project and an embedded worklog page.
//! Decoding is deliberately lenient: missing fields become `None`, durations
//! are coerced to whole seconds, and a worklog list that is not an array is
//! kept as [`WorklogCollection::NotAList`] so the aggregator can skip it.

use crate::libs::rich_text::RichText;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssue {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub fields: RawIssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub project: Option<RawProject>,
    #[serde(default)]
    pub worklog: Option<RawWorklogPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorklogPage {
    #[serde(default)]
    pub worklogs: WorklogCollection,
}

/// The `worklogs` array of an issue.
#[derive(Debug, Clone, PartialEq)]
pub enum WorklogCollection {
    Entries(Vec<RawWorklogEntry>),
    NotAList,
}

impl Default for WorklogCollection {
    fn default() -> Self {
        WorklogCollection::Entries(Vec::new())
    }
}

impl<'de> Deserialize<'de> for WorklogCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(WorklogCollection::default()),
            Value::Array(items) => Ok(WorklogCollection::Entries(
                items
                    .into_iter()
                    .filter_map(|item| match serde_json::from_value::<RawWorklogEntry>(item) {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            tracing::debug!("dropping undecodable worklog entry: {}", e);
                            None
                        }
                    })
                    .collect(),
            )),
            _ => Ok(WorklogCollection::NotAList),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorklogEntry {
    #[serde(default)]
    pub author: Option<RawAuthor>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub time_spent_seconds: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub started: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created: Option<String>,
    #[serde(default)]
    pub comment: Option<RichText>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl RawIssue {
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn summary(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or_default()
    }

    pub fn project_name(&self) -> &str {
        self.fields.project.as_ref().and_then(|project| project.name.as_deref()).unwrap_or(UNKNOWN)
    }

    /// The embedded worklogs, or `None` when the payload's list is malformed.
    ///
    /// An issue without a worklog page has an empty list.
    pub fn worklogs(&self) -> Option<&[RawWorklogEntry]> {
        match self.fields.worklog.as_ref().map(|page| &page.worklogs) {
            None => Some(&[]),
            Some(WorklogCollection::Entries(entries)) => Some(entries),
            Some(WorklogCollection::NotAList) => None,
        }
    }
}

impl RawWorklogEntry {
    /// Author identity used for filtering: email address, falling back to the account name.
    pub fn author_identity(&self) -> Option<&str> {
        self.author.as_ref().and_then(RawAuthor::identity)
    }
}

impl RawAuthor {
    pub fn identity(&self) -> Option<&str> {
        [self.email_address.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
    }
}

/// Coerces `timeSpentSeconds` into non-negative whole seconds.
///
/// Numbers are truncated and clamped at zero, numeric strings are parsed,
/// anything else counts as zero.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().or_else(|| number.as_f64().map(|value| value.max(0.0) as u64)),
        Value::String(text) => text.trim().parse::<f64>().ok().map(|value| value.max(0.0) as u64),
        _ => None,
    };
    Ok(seconds.unwrap_or(0))
}

/// Reads a timestamp field as text.
///
/// Strings are kept as they are and other non-null values are rendered as
/// JSON, so an odd value reaches the aggregator instead of failing the entry.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}
