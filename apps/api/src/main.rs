mod analysis;
mod config;
mod errors;
mod generation;
mod llm_client;
mod matching;
mod models;
mod parser;
mod routes;
mod state;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::StructuredInfoGenerator;
use crate::llm_client::LlmClient;
use crate::matching::scorer::ResumeMatcher;
use crate::parser::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load and validate configuration first; bad weights abort startup.
    let config = Config::from_env()?;
    config.validate()?;

    // Initialize structured logging: stdout plus an append-only log file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file '{}'", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.log_level,
                &config.log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    info!("Starting Recruiter API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Model cache dir: {}, temp dir: {}",
        config.model_cache_dir.display(),
        config.temp_dir.display()
    );

    // The model itself is resolved lazily on the first generation request.
    let llm = LlmClient::new(
        config.llm_base_url.clone(),
        config.model_name.clone(),
        config.fallback_model_name.clone(),
    )?;
    info!(
        "LLM client initialized (server: {}, model: {}, fallback: {})",
        config.llm_base_url, config.model_name, config.fallback_model_name
    );

    let scorer = Arc::new(ResumeMatcher::new(config.weights));
    info!("Match weights: {:?}", config.weights);

    let state = AppState {
        config: config.clone(),
        parser: ResumeParser::new(),
        generator: StructuredInfoGenerator::new(Arc::new(llm)),
        scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("API_HOST/API_PORT must form a valid socket address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
