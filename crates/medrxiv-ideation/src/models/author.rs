//! Author data model matching the Semantic Scholar Graph API schema.

use serde::{Deserialize, Serialize};

/// Response of `paper/DOI:{doi}?fields=authors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperAuthors {
    /// Authors in byline order.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
}

impl PaperAuthors {
    /// Author IDs in byline order, skipping authors Semantic Scholar could not resolve.
    #[must_use]
    pub fn author_ids(&self) -> Vec<String> {
        self.authors
            .iter()
            .filter_map(|a| a.author_id.as_deref())
            .filter(|id| !id.trim().is_empty())
            .map(String::from)
            .collect()
    }
}

/// Minimal author reference (used in paper author lists).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID; null for unresolved authors.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `author/{id}?fields=hIndex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfluence {
    /// Semantic Scholar author ID.
    #[serde(default)]
    pub author_id: String,

    /// h-index metric; absent for sparse profiles.
    #[serde(default)]
    pub h_index: Option<i32>,
}

impl AuthorInfluence {
    /// Whether this author clears the influence gate.
    #[must_use]
    pub fn meets(&self, min_influence: i32) -> bool {
        matches!(self.h_index, Some(h) if h >= min_influence)
    }
}
