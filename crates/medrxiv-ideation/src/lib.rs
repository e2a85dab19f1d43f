//! medRxiv Ideation
//!
//! Turns newly posted medRxiv preprints into research-problem hypotheses on SeeChat.
//!
//! # Flow
//!
//! 1. [`client::PreprintClient`] pages through the details API for a date range
//! 2. [`ranker::ReputationRanker`] optionally keeps papers with a high h-index author
//! 3. [`pipeline::Pipeline`] skips titles already in the [`ledger::Ledger`], extracts
//!    a one-sentence problem, creates the hypothesis and attaches a Markdown summary
//!    built by [`structure`] and [`formatters`]
//! 4. Published titles are appended to the ledger so later runs skip them
//!
//! Processing is sequential. Errors stay with the paper that caused them.
//!
//! # Example
//!
//! ```no_run
//! use medrxiv_ideation::{client::PreprintClient, config::Config, models::DateRange};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PreprintClient::new(&config)?;
//!     let today = chrono::Local::now().date_naive();
//!     let range = DateRange::resolve(None, None, config.lookback_days, today)?;
//!
//!     let papers = client.fetch(range).await;
//!     println!("{} preprints", papers.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod ledger;
pub mod models;
pub mod pipeline;
pub mod ranker;
pub mod structure;

pub use config::Config;
pub use error::{ClientError, ConfigError, LedgerError};
pub use ledger::Ledger;
pub use pipeline::{PaperOutcome, Pipeline, RunSummary};
pub use structure::{StructuredDocument, structure};
