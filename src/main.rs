//! RAG Gateway - Math Tutor AI Gateway
//!
//! Guardrailed knowledge-base / web-search answering for math and JEE
//! questions, with a reviewer feedback loop.
//!
//! # Usage
//!
//! ```bash
//! # Serve the HTTP API (default subcommand)
//! cargo run --release
//!
//! # One-off question
//! ./rag-gateway ask "Explain the chain rule with calculus" --level JEE
//!
//! # Refine a correction into a few-shot example
//! ./rag-gateway feedback --query "sum of first n numbers" --assessment COMPLEX \
//!     --correction "1. Use S = n(n+1)/2"
//!
//! # List refined examples
//! ./rag-gateway examples
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY`: text-generation API key (required for serve/ask/feedback)
//! - `TAVILY_API_KEY`: web-search API key (required for serve/ask)
//! - `GATEWAY_CONFIG`: path to the TOML config file
//! - `GATEWAY_CORS_ORIGINS`: comma-separated allowed CORS origins
//! - `RUST_LOG`: logging level (default: info)
//!
//! Variables may also be placed in a `.env` file in the working directory.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use rag_gateway::agents::{FewShotSource, KbResponder, RefinementAgent, WebResponder};
use rag_gateway::api::{create_app, AppState};
use rag_gateway::config::GatewayConfig;
use rag_gateway::context::{KnowledgeStore, StaticKnowledgeBase};
use rag_gateway::llm::{GeminiBackend, LlmBackend};
use rag_gateway::pipeline::Gateway;
use rag_gateway::router::SimilarityRouter;
use rag_gateway::search::{TavilyClient, WebSearch};
use rag_gateway::storage::RefinementStore;
use rag_gateway::types::{Assessment, FeedbackItem, GatewayRequest};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rag-gateway")]
#[command(about = "Math tutor AI gateway with guardrailed KB / web-search routing")]
#[command(version)]
struct CliArgs {
    /// Path to a gateway_config.toml (overrides $GATEWAY_CONFIG and ./gateway_config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8000")
    #[arg(short, long)]
    addr: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the HTTP API (default)
    Serve,

    /// Answer a single question and print the gateway response as JSON
    Ask {
        query: String,
        /// Difficulty tag, e.g. JEE
        #[arg(long)]
        level: Option<String>,
    },

    /// Refine one reviewer correction into a few-shot example
    Feedback {
        #[arg(long)]
        query: String,
        /// CORRECT, INCORRECT, COMPLEX or OFF_TOPIC
        #[arg(long)]
        assessment: Assessment,
        /// Human-provided gold answer
        #[arg(long, default_value = "")]
        correction: String,
    },

    /// Print the stored refined examples
    Examples,
}

// ============================================================================
// Setup
// ============================================================================

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stderr keeps stdout clean for CLI output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &CliArgs) -> Result<GatewayConfig> {
    let mut config = match &args.config {
        Some(path) => GatewayConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GatewayConfig::load(),
    };

    if let Some(addr) = &args.addr {
        config.server.addr.clone_from(addr);
    }
    config.validate().context("Invalid gateway configuration")?;
    Ok(config)
}

fn build_llm(config: &GatewayConfig) -> Result<Arc<dyn LlmBackend>> {
    let backend = GeminiBackend::from_env(&config.llm).context("Failed to initialize LLM backend")?;
    info!(model = backend.model(), "LLM backend ready");
    Ok(Arc::new(backend))
}

/// Wire every collaborator explicitly; nothing is a global.
fn build_gateway(
    config: &GatewayConfig,
    llm: &Arc<dyn LlmBackend>,
    examples: &Arc<RefinementStore>,
) -> Result<Gateway> {
    let search: Arc<dyn WebSearch> = Arc::new(
        TavilyClient::from_env(&config.web_search).context("Failed to initialize web search")?,
    );

    let store: Arc<dyn KnowledgeStore> = Arc::new(StaticKnowledgeBase::new());

    let few_shot = FewShotSource::new(Arc::clone(examples), config.refinement.few_shot_limit);
    let kb_responder = KbResponder::new(Arc::clone(llm)).with_few_shot(few_shot.clone());
    let web_responder = WebResponder::new(
        search,
        Arc::clone(llm),
        config.web_search.depth,
        config.web_search.max_results,
    )
    .with_few_shot(few_shot);

    Ok(Gateway::new(store, kb_responder, web_responder)
        .with_router(SimilarityRouter::new(config.routing.confidence_threshold))
        .with_top_k(config.routing.top_k))
}

// ============================================================================
// Subcommands
// ============================================================================

async fn run_server(config: &GatewayConfig, examples: Arc<RefinementStore>) -> Result<()> {
    let llm = build_llm(config)?;
    let gateway = Arc::new(build_gateway(config, &llm, &examples)?);
    let refinement = Arc::new(RefinementAgent::new(llm, examples));

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  RAG Gateway - Math Tutor");
    info!("  Threshold: {:.2} | Top-k: {}", config.routing.confidence_threshold, config.routing.top_k);
    info!("  Refined examples: {}", config.refinement.store_path.display());
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = AppState::new(gateway, refinement);
    let app = create_app(state.clone());
    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.addr))?;
    info!(addr = %config.server.addr, "🚀 HTTP API listening");

    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        warn!("Shutdown signal received");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await
        .context("HTTP server error")?;

    state.drain_background().await;
    info!("Server stopped");
    Ok(())
}

async fn run_ask(
    config: &GatewayConfig,
    examples: Arc<RefinementStore>,
    query: String,
    level: Option<String>,
) -> Result<()> {
    let llm = build_llm(config)?;
    let gateway = build_gateway(config, &llm, &examples)?;

    let response = gateway
        .process(&GatewayRequest {
            query,
            level,
            user_id: None,
        })
        .await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_feedback(
    config: &GatewayConfig,
    examples: Arc<RefinementStore>,
    item: FeedbackItem,
) -> Result<()> {
    let llm = build_llm(config)?;
    let agent = RefinementAgent::new(llm, examples);

    match agent.refine(&item).await.context("Refinement failed")? {
        Some(example) => println!("{}", serde_json::to_string_pretty(&example)?),
        None => println!("Assessment {} does not trigger refinement", item.assessment),
    }
    Ok(())
}

fn run_examples(examples: &RefinementStore) -> Result<()> {
    let stored = examples
        .load()
        .with_context(|| format!("Failed to read {}", examples.path().display()))?;
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let config = load_config(&args)?;
    let examples = Arc::new(RefinementStore::open(&config.refinement.store_path));

    match args.command.unwrap_or(SubCommand::Serve) {
        SubCommand::Serve => run_server(&config, examples).await,
        SubCommand::Ask { query, level } => run_ask(&config, examples, query, level).await,
        SubCommand::Feedback {
            query,
            assessment,
            correction,
        } => run_feedback(&config, examples, FeedbackItem::new(query, assessment, correction)).await,
        SubCommand::Examples => run_examples(&examples),
    }
}
