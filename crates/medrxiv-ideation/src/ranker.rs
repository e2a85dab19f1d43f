//! Author-reputation filter and ranking.
//!
//! A paper survives when at least one of its authors has an h-index of at
//! least the threshold. Authors are checked in byline order and the first
//! qualifying one decides; later authors are never looked up. Survivors are
//! sorted by that score, highest first, with ties kept in fetch order.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::ledger::Ledger;
use crate::models::{AuthorInfluence, PaperRecord};

/// Where author identities and influence scores come from.
#[async_trait]
pub trait InfluenceSource: Send + Sync {
    /// Author IDs of the paper with `doi`, in byline order.
    async fn author_ids(&self, doi: &str) -> ClientResult<Vec<String>>;

    /// Influence record for one author.
    async fn influence(&self, author_id: &str) -> ClientResult<AuthorInfluence>;
}

/// Reputation stage over an [`InfluenceSource`].
#[derive(Debug)]
pub struct ReputationRanker<S> {
    source: S,
}

impl<S: InfluenceSource> ReputationRanker<S> {
    /// Create a ranker.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Filter `papers` to those with a qualifying author, annotate each with the
    /// qualifying score, sort descending and keep at most `max_results`.
    ///
    /// Papers already in `ledger`, without a title or without a DOI are skipped
    /// before any lookup. Lookup failures drop only the paper concerned.
    pub async fn rank(
        &self,
        papers: Vec<PaperRecord>,
        ledger: &Ledger,
        min_influence: i32,
        max_results: usize,
    ) -> Vec<PaperRecord> {
        let candidates = papers.len();
        let mut qualified = Vec::new();

        for mut paper in papers {
            let Some(title) = paper.identifier() else {
                tracing::debug!(doi = %paper.doi, "Skipping untitled paper");
                continue;
            };
            if ledger.contains(title) {
                tracing::debug!(title, "Skipping ranked lookup for processed paper");
                continue;
            }
            let Some(doi) = paper.doi() else {
                tracing::warn!(title, "Dropping paper without DOI");
                continue;
            };

            if let Some(score) = self.qualifying_influence(title, doi, min_influence).await {
                paper.max_author_influence = Some(score);
                qualified.push(paper);
            }
        }

        let ranked = select_top(qualified, max_results);
        tracing::info!(candidates, kept = ranked.len(), min_influence, "Ranked papers by author reputation");
        ranked
    }

    /// First author score at or above `min_influence`, if any.
    async fn qualifying_influence(&self, title: &str, doi: &str, min_influence: i32) -> Option<i32> {
        let author_ids = match self.source.author_ids(doi).await {
            Ok(ids) if ids.is_empty() => {
                tracing::warn!(title, doi, "Dropping paper: no authors found");
                return None;
            }
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(title, doi, error = %e, "Dropping paper: author lookup failed");
                return None;
            }
        };

        for author_id in &author_ids {
            match self.source.influence(author_id).await {
                Ok(influence) if influence.meets(min_influence) => {
                    tracing::debug!(title, author_id, h_index = ?influence.h_index, "Qualifying author");
                    return influence.h_index;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(title, author_id, error = %e, "Skipping author: influence lookup failed");
                }
            }
        }

        tracing::info!(title, authors = author_ids.len(), min_influence, "Dropping paper: no qualifying author");
        None
    }
}

/// Stable sort by `max_author_influence` descending, then truncate.
#[must_use]
pub fn select_top(mut papers: Vec<PaperRecord>, max_results: usize) -> Vec<PaperRecord> {
    papers.sort_by(|a, b| b.max_author_influence.cmp(&a.max_author_influence));
    papers.truncate(max_results);
    papers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(title: &str, score: i32) -> PaperRecord {
        PaperRecord { title: title.into(), max_author_influence: Some(score), ..Default::default() }
    }

    fn titles(papers: &[PaperRecord]) -> Vec<&str> {
        papers.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_select_top_sorts_descending() {
        let ranked = select_top(vec![scored("a", 12), scored("b", 40), scored("c", 25)], 10);
        assert_eq!(titles(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn test_select_top_ties_keep_input_order() {
        let ranked = select_top(vec![scored("a", 30), scored("b", 50), scored("c", 30), scored("d", 30)], 3);
        assert_eq!(titles(&ranked), ["b", "a", "c"]);
    }

    #[test]
    fn test_select_top_zero_results() {
        assert!(select_top(vec![scored("a", 1)], 0).is_empty());
    }
}
