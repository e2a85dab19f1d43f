//! Per-paper processing.
//!
//! Each paper moves from pending to exactly one terminal [`PaperOutcome`]:
//!
//! ```text
//! pending ──in ledger──────────────▶ Skipped
//!    │
//!    └─extract problem ──fail/empty──▶ ProblemFailed
//!          │
//!          └─create ─▶ edit ──fail──▶ PublishFailed
//!                        │
//!                        └─ok──────▶ Published (title recorded in ledger)
//! ```
//!
//! Failures are values, not early returns out of the run: one paper's error
//! never stops the next paper from being processed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::formatters::render_summary;
use crate::ledger::Ledger;
use crate::models::{CreateHypothesis, EditHypothesis, PaperRecord};

/// Derives a one-sentence research problem from an abstract.
#[async_trait]
pub trait ProblemExtractor: Send + Sync {
    /// Extract the problem statement. An empty answer is an error.
    async fn extract_problem(&self, abstract_text: &str) -> ClientResult<String>;
}

/// Creates and edits hypotheses on the ideation service.
#[async_trait]
pub trait HypothesisPublisher: Send + Sync {
    /// Create a hypothesis, returning its ID.
    async fn create_hypothesis(&self, request: &CreateHypothesis) -> ClientResult<String>;

    /// Attach title and summary to an existing hypothesis.
    async fn edit_hypothesis(&self, request: &EditHypothesis) -> ClientResult<()>;

    /// Public page of a hypothesis.
    fn idea_url(&self, hypothesis_id: &str) -> String;
}

/// Terminal state of one paper.
#[derive(Debug)]
pub enum PaperOutcome {
    /// Already processed (or untitled); nothing was called.
    Skipped,
    /// Problem extraction failed or came back empty; nothing was published.
    ProblemFailed(ClientError),
    /// Create or edit failed; the ledger was not touched.
    PublishFailed(ClientError),
    /// Created, edited and recorded.
    Published {
        /// ID assigned by the service.
        hypothesis_id: String,
        /// Extracted problem statement.
        problem: String,
        /// Public page of the hypothesis.
        idea_url: String,
    },
}

impl PaperOutcome {
    /// Returns true for [`PaperOutcome::Published`].
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Outcome counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Newly published papers.
    pub published: usize,
    /// Papers skipped as already processed.
    pub skipped: usize,
    /// Papers whose problem extraction failed.
    pub problem_failed: usize,
    /// Papers whose publish failed.
    pub publish_failed: usize,
}

impl RunSummary {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &PaperOutcome) {
        match outcome {
            PaperOutcome::Skipped => self.skipped += 1,
            PaperOutcome::ProblemFailed(_) => self.problem_failed += 1,
            PaperOutcome::PublishFailed(_) => self.publish_failed += 1,
            PaperOutcome::Published { .. } => self.published += 1,
        }
    }

    /// Papers seen.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.published + self.skipped + self.problem_failed + self.publish_failed
    }
}

/// Fixed tags sent with every created hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    /// `field_of_study_1` value.
    pub field_of_study: String,
    /// `data_source` value.
    pub data_source: String,
}

impl From<&Config> for PublishSettings {
    fn from(config: &Config) -> Self {
        Self { field_of_study: config.field_of_study.clone(), data_source: config.data_source.clone() }
    }
}

/// Sequential paper processor owning the run's ledger.
pub struct Pipeline {
    extractor: Arc<dyn ProblemExtractor>,
    publisher: Arc<dyn HypothesisPublisher>,
    ledger: Ledger,
    settings: PublishSettings,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(
        extractor: Arc<dyn ProblemExtractor>,
        publisher: Arc<dyn HypothesisPublisher>,
        ledger: Ledger,
        settings: PublishSettings,
    ) -> Self {
        Self { extractor, publisher, ledger, settings }
    }

    /// The ledger as updated so far.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Give the ledger back.
    #[must_use]
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Carry one paper to its terminal state.
    pub async fn process(&mut self, paper: &PaperRecord) -> PaperOutcome {
        let Some(title) = paper.identifier() else {
            tracing::warn!(doi = %paper.doi, "Skipping paper without a title");
            return PaperOutcome::Skipped;
        };
        if self.ledger.contains(title) {
            tracing::info!(title, "Skipped: already processed");
            return PaperOutcome::Skipped;
        }

        let problem = match self.extractor.extract_problem(&paper.abstract_text).await {
            Ok(problem) if problem.trim().is_empty() => {
                let e = ClientError::EmptyResponse { service: "problem extraction" };
                tracing::warn!(title, error = %e, "Problem extraction failed");
                return PaperOutcome::ProblemFailed(e);
            }
            Ok(problem) => problem.trim().to_string(),
            Err(e) => {
                tracing::warn!(title, error = %e, "Problem extraction failed");
                return PaperOutcome::ProblemFailed(e);
            }
        };

        let create = CreateHypothesis {
            problem: problem.clone(),
            research_topics: vec![paper.category.clone()],
            field_of_study_1: self.settings.field_of_study.clone(),
            data_source: self.settings.data_source.clone(),
            is_private: false,
        };
        let hypothesis_id = match self.publisher.create_hypothesis(&create).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(title, error = %e, "Create hypothesis failed");
                return PaperOutcome::PublishFailed(e);
            }
        };

        let edit = EditHypothesis {
            hypothesis_id: hypothesis_id.clone(),
            title: paper.title.clone(),
            idea_summary: render_summary(paper),
            is_private: false,
        };
        if let Err(e) = self.publisher.edit_hypothesis(&edit).await {
            tracing::error!(title, hypothesis_id, error = %e, "Edit hypothesis failed");
            return PaperOutcome::PublishFailed(e);
        }

        if let Err(e) = self.ledger.record(title) {
            tracing::error!(title, hypothesis_id, error = %e, "Published but could not record title");
        }

        let idea_url = self.publisher.idea_url(&hypothesis_id);
        tracing::info!(title, hypothesis_id, "Published");
        PaperOutcome::Published { hypothesis_id, problem, idea_url }
    }

    /// Process `papers` in order, reporting each outcome to `on_outcome`.
    pub async fn run<F>(&mut self, papers: &[PaperRecord], mut on_outcome: F) -> RunSummary
    where
        F: FnMut(&PaperRecord, &PaperOutcome),
    {
        let mut summary = RunSummary::default();
        for paper in papers {
            let outcome = self.process(paper).await;
            on_outcome(paper, &outcome);
            summary.record(&outcome);
        }

        tracing::info!(
            published = summary.published,
            skipped = summary.skipped,
            problem_failed = summary.problem_failed,
            publish_failed = summary.publish_failed,
            "Run finished"
        );
        summary
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("ledger", &self.ledger)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
