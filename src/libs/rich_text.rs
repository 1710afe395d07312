//! Plain-text extraction from worklog comment bodies.
//!
//! Jira delivers worklog comments either as plain strings (REST v2) or as
//! Atlassian Document Format trees (REST v3): nested objects carrying `text`
//! leaves and `content` lists. Older payloads sometimes use `children` or
//! `body` instead. [`RichText`] captures any of these shapes without a schema
//! and [`RichText::flatten`] reduces them to a single line of text.
//!
//! ## Usage
//!
//! ```rust
//! use jwlog::libs::rich_text::RichText;
//! use serde_json::json;
//!
//! let comment = RichText::from(json!({
//!     "type": "paragraph",
//!     "content": [{ "text": "Hello" }, { "text": "World" }]
//! }));
//! assert_eq!(comment.flatten(), "Hello World");
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Object fields that hold nested document content.
const NESTED_FIELDS: [&str; 3] = ["content", "children", "body"];

/// A comment body of arbitrary shape.
///
/// Object fields keep the order they had in the payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RichText {
    /// JSON `null` or an absent comment.
    #[default]
    Empty,
    /// A plain string.
    Leaf(String),
    /// A number or boolean, already rendered as text.
    Scalar(String),
    /// An object with named fields.
    Node(Vec<(String, RichText)>),
    /// An array of fragments.
    List(Vec<RichText>),
}

impl RichText {
    /// Looks up a field of a [`RichText::Node`].
    pub fn field(&self, name: &str) -> Option<&RichText> {
        match self {
            RichText::Node(fields) => fields.iter().find(|(key, _)| key == name).map(|(_, value)| value),
            _ => None,
        }
    }

    fn is_container(&self) -> bool {
        matches!(self, RichText::Node(_) | RichText::List(_))
    }

    /// Flattens the structure into a single space-separated string.
    ///
    /// Plain strings and scalars are returned untouched. For objects the
    /// `text` field is taken first, followed by the flattened `content`,
    /// `children` and `body` containers. Only when none of those yields any
    /// text are the remaining string and container fields walked in payload
    /// order, which covers legacy comment shapes. Fragments are trimmed and
    /// empty ones dropped before joining.
    pub fn flatten(&self) -> String {
        match self {
            RichText::Empty => String::new(),
            RichText::Leaf(text) | RichText::Scalar(text) => text.clone(),
            RichText::List(items) => join_fragments(items.iter().map(RichText::flatten)),
            RichText::Node(fields) => {
                let mut fragments = Vec::new();

                if let Some(RichText::Leaf(text)) = self.field("text") {
                    fragments.push(text.clone());
                }
                for name in NESTED_FIELDS {
                    if let Some(child) = self.field(name).filter(|child| child.is_container()) {
                        fragments.push(child.flatten());
                    }
                }

                if fragments.iter().all(|fragment| fragment.trim().is_empty()) {
                    fragments.extend(
                        fields
                            .iter()
                            .filter(|(key, value)| key != "text" && matches!(value, RichText::Leaf(_) | RichText::Node(_) | RichText::List(_)))
                            .map(|(_, value)| value.flatten()),
                    );
                }

                join_fragments(fragments.into_iter())
            }
        }
    }
}

fn join_fragments(fragments: impl Iterator<Item = String>) -> String {
    fragments
        .filter_map(|fragment| {
            let fragment = fragment.trim();
            (!fragment.is_empty()).then(|| fragment.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<Value> for RichText {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RichText::Empty,
            Value::String(text) => RichText::Leaf(text),
            Value::Bool(flag) => RichText::Scalar(flag.to_string()),
            Value::Number(number) => RichText::Scalar(number.to_string()),
            Value::Array(items) => RichText::List(items.into_iter().map(RichText::from).collect()),
            Value::Object(map) => RichText::Node(map.into_iter().map(|(key, value)| (key, RichText::from(value))).collect()),
        }
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(RichText::from)
    }
}
