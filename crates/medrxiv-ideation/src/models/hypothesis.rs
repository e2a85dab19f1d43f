//! Payloads for the SeeChat hypothesis service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /idea/create_hypothesis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateHypothesis {
    /// One-sentence research problem.
    pub problem: String,
    /// Topics; the preprint category.
    pub research_topics: Vec<String>,
    /// Primary field of study.
    pub field_of_study_1: String,
    /// Source tag.
    pub data_source: String,
    /// Visibility.
    pub is_private: bool,
}

/// Body of `POST /idea/edit_hypothesis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditHypothesis {
    /// ID returned by create.
    pub hypothesis_id: String,
    /// Paper title.
    pub title: String,
    /// Markdown summary document.
    pub idea_summary: String,
    /// Visibility.
    pub is_private: bool,
}

/// One object from the create stream.
///
/// Only `{"data": {"type": "metadata", "content": {"hypothesis_id": ...}}}` matters;
/// every other event shape decodes to an event without an ID.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamEvent {
    #[serde(default)]
    data: Option<EventData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EventData {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<Value>,
}

impl StreamEvent {
    /// Hypothesis ID carried by a metadata event.
    #[must_use]
    pub fn hypothesis_id(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        if data.kind.as_deref() != Some("metadata") {
            return None;
        }
        match data.content.as_ref()?.get("hypothesis_id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}
