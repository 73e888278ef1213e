//! Venue recommendation CLI
//!
//! The `venue-rec` command runs the multi-agent venue recommender against
//! the JSON data files of a venue data directory.
//!
//! ## Commands
//!
//! - `recommend`: rank venues for a pending event request
//! - `retrieve`: show the historical events retrieved for a request
//! - `index`: build retrievable documents from the event history

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use venue_core::{
    llm_analysts, Orchestrator, RecommendOutcome, RetryController, ServiceConfig,
    VenueRecommender, METRICS,
};
use venue_history::indexing::build_documents;
use venue_history::{
    load_history, search_documents, MemoryRetriever, ReferenceCatalog, RequestBook,
    RetrievedDocument,
};
use venue_llm::{ChatModel, OpenAiChatClient};

#[derive(Parser)]
#[command(name = "venue-rec")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-agent event venue recommendations", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "VENUE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend venues for a pending event request
    Recommend {
        /// Event ID from the current requests file
        #[arg(short, long)]
        event_id: String,

        /// Number of venues to recommend (default: from config)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Pre-built documents from `index --output` (default: built from history)
        #[arg(long)]
        documents: Option<PathBuf>,
    },

    /// Show the historical events retrieved for a request
    Retrieve {
        /// Event ID from the current requests file
        #[arg(short, long)]
        event_id: String,

        /// Number of documents to retrieve (default: from config)
        #[arg(short, long)]
        k: Option<usize>,

        /// Pre-built documents from `index --output` (default: built from history)
        #[arg(long)]
        documents: Option<PathBuf>,
    },

    /// Build retrievable documents from the event history
    Index {
        /// Event history file (default: from config)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Write the documents here as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct IndexReport {
    success: bool,
    total_documents: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = ServiceConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    venue_core::init_from_config(&config.logger, cli.json, cli.verbose)?;
    info!(service = %config.logger.service_name, version = venue_core::VERSION, "starting");

    let result = match cli.command {
        Commands::Recommend {
            event_id,
            top_n,
            documents,
        } => cmd_recommend(&config, &event_id, top_n, documents.as_deref()).await,
        Commands::Retrieve {
            event_id,
            k,
            documents,
        } => cmd_retrieve(&config, &event_id, k, documents.as_deref()).await,
        Commands::Index { history, output } => {
            cmd_index(&config, history.as_deref(), output.as_deref())
        }
    };

    METRICS.flush();
    result
}

async fn cmd_recommend(
    config: &ServiceConfig,
    event_id: &str,
    top_n: Option<usize>,
    documents: Option<&Path>,
) -> Result<()> {
    let client = OpenAiChatClient::new(config.llm.clone()).context("Failed to build LLM client")?;
    let outcome = recommend(config, Arc::new(client), event_id, top_n, documents).await?;
    print_json(&outcome)
}

async fn cmd_retrieve(
    config: &ServiceConfig,
    event_id: &str,
    k: Option<usize>,
    documents: Option<&Path>,
) -> Result<()> {
    let hits = retrieve(config, event_id, k, documents).await?;
    print_json(&hits)
}

fn cmd_index(config: &ServiceConfig, history: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let report = index(config, history, output)?;
    print_json(&report)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the orchestrator for `event_id` with `model` behind every agent.
async fn recommend(
    config: &ServiceConfig,
    model: Arc<dyn ChatModel>,
    event_id: &str,
    top_n: Option<usize>,
    documents: Option<&Path>,
) -> Result<RecommendOutcome> {
    let requests = RequestBook::load(&config.retrieval.requests_path())
        .context("Failed to load current requests")?;
    let event = requests.get(event_id)?;

    let retriever = MemoryRetriever::new(load_documents(config, documents)?);
    let hits = search_documents(&retriever, event, config.retrieval.top_k).await;
    info!(event_id, retrieved = hits.len(), "documents retrieved");

    let orchestrator = Orchestrator::new(
        llm_analysts(Arc::clone(&model)),
        Arc::new(VenueRecommender::new(model)),
        RetryController::new(config.orchestrator.max_retry_attempts),
    );
    let top_n = top_n.unwrap_or(config.orchestrator.default_top_n);
    Ok(orchestrator.recommend(event, &hits, top_n).await)
}

async fn retrieve(
    config: &ServiceConfig,
    event_id: &str,
    k: Option<usize>,
    documents: Option<&Path>,
) -> Result<Vec<RetrievedDocument>> {
    let requests = RequestBook::load(&config.retrieval.requests_path())
        .context("Failed to load current requests")?;
    let event = requests.get(event_id)?;

    let retriever = MemoryRetriever::new(load_documents(config, documents)?);
    Ok(search_documents(&retriever, event, k.unwrap_or(config.retrieval.top_k)).await)
}

fn index(config: &ServiceConfig, history: Option<&Path>, output: Option<&Path>) -> Result<IndexReport> {
    let history_path = history
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.retrieval.history_path());
    let documents = build_from_history(config, &history_path)?;

    if let Some(output) = output {
        let body = serde_json::to_vec_pretty(&documents)?;
        std::fs::write(output, body)
            .with_context(|| format!("Failed to write documents to {}", output.display()))?;
        info!(path = %output.display(), documents = documents.len(), "documents written");
    }

    Ok(IndexReport {
        success: true,
        total_documents: documents.len(),
    })
}

fn load_documents(config: &ServiceConfig, documents: Option<&Path>) -> Result<Vec<RetrievedDocument>> {
    match documents {
        Some(path) => {
            let raw = std::fs::read(path)
                .with_context(|| format!("Failed to read documents from {}", path.display()))?;
            serde_json::from_slice(&raw)
                .with_context(|| format!("Failed to parse documents in {}", path.display()))
        }
        None => build_from_history(config, &config.retrieval.history_path()),
    }
}

fn build_from_history(config: &ServiceConfig, history_path: &Path) -> Result<Vec<RetrievedDocument>> {
    let catalog = ReferenceCatalog::load(
        &config.retrieval.venues_path(),
        &config.retrieval.clients_path(),
    )
    .context("Failed to load reference catalog")?;
    let history = load_history(history_path).context("Failed to load event history")?;
    Ok(build_documents(&history, &catalog))
}
