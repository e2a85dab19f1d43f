//! medRxiv Ideation - Entry Point
//!
//! Fetches recent medRxiv preprints and publishes each new one to SeeChat.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use medrxiv_ideation::client::{ChatClient, PreprintClient, ScholarClient, SeeChatClient};
use medrxiv_ideation::config::{Config, api};
use medrxiv_ideation::models::DateRange;
use medrxiv_ideation::pipeline::{PaperOutcome, Pipeline, PublishSettings};
use medrxiv_ideation::ranker::ReputationRanker;
use medrxiv_ideation::Ledger;

#[derive(Parser, Debug)]
#[command(name = "medrxiv-ideation")]
#[command(about = "Publish research problems from new medRxiv preprints to SeeChat")]
#[command(version)]
struct Cli {
    /// First posting date (YYYY-MM-DD); defaults to --lookback-days before the end date
    #[arg(long, value_parser = DateRange::parse_date)]
    start: Option<NaiveDate>,

    /// Last posting date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = DateRange::parse_date)]
    end: Option<NaiveDate>,

    /// Prompt for the date range on stdin
    #[arg(long)]
    interactive: bool,

    /// Days covered when no start date is given
    #[arg(long, default_value_t = api::DEFAULT_LOOKBACK_DAYS)]
    lookback_days: u32,

    /// File of processed titles
    #[arg(long, default_value = api::LEDGER_FILE)]
    ledger: PathBuf,

    /// Only keep papers with an author at or above this h-index (needs SEMANTIC_SCHOLAR_API_KEY)
    #[arg(long)]
    min_h_index: Option<i32>,

    /// Maximum papers kept after ranking
    #[arg(long, default_value = "20")]
    max_results: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr)).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr)).init();
    }
}

/// Ask for one date; a blank answer keeps `current`.
fn prompt_date(label: &str, current: Option<NaiveDate>) -> anyhow::Result<Option<NaiveDate>> {
    print!("Enter {label} date (YYYY-MM-DD): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(DateRange::parse_optional(&line)?.or(current))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting medRxiv ideation run");

    let mut config = Config::from_env()?;
    config.lookback_days = cli.lookback_days;
    config.ledger_path = cli.ledger;

    // Fail on a missing ranking key before any network call.
    let scholar = match cli.min_h_index {
        Some(_) => Some(ScholarClient::new(&config)?),
        None => None,
    };
    let preprints = PreprintClient::new(&config)?;
    let extractor = Arc::new(ChatClient::new(&config)?);
    let publisher = Arc::new(SeeChatClient::new(&config)?);

    let (mut start, mut end) = (cli.start, cli.end);
    if cli.interactive {
        start = prompt_date("start", start)?;
        end = prompt_date("end", end)?;
    }
    let today = chrono::Local::now().date_naive();
    let range = DateRange::resolve(start, end, config.lookback_days, today)?;

    let ledger = Ledger::open(&config.ledger_path)?;
    tracing::info!(%range, processed = ledger.len(), "Fetching medRxiv papers");

    let mut papers = preprints.fetch(range).await;

    if let (Some(scholar), Some(min_h_index)) = (scholar, cli.min_h_index) {
        papers = ReputationRanker::new(scholar).rank(papers, &ledger, min_h_index, cli.max_results).await;
    }

    let mut pipeline = Pipeline::new(extractor, publisher, ledger, PublishSettings::from(&config));
    let summary = pipeline
        .run(&papers, |paper, outcome| {
            println!("{}", "-".repeat(60));
            println!("Title: {}", paper.title.trim());
            if let PaperOutcome::Published { problem, idea_url, .. } = outcome {
                println!("Problem Statement: {problem}");
                println!("Idea URL: {idea_url}");
            }
        })
        .await;

    println!("\n✅ Successfully processed {} new Papers.\n", summary.published);
    Ok(())
}
