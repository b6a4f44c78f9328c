//! Derivation pipeline binary.
//!
//! Wires the configured storage backend to the pipeline and runs the
//! worker until shutdown. The HTTP tier constructs the same objects
//! in-process; this binary exists for running the worker standalone.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mblog_pipeline::{ImagePipeline, PipelineConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("mblog=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    info!("Starting mblog-pipeline");

    let provider = std::env::var("STORAGE_PROVIDER").unwrap_or_else(|_| "local".to_string());

    // Unknown provider is fatal at startup, never a per-request error.
    let store = match mblog_storage::make_store(&provider) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to configure storage backend: {}", e);
            std::process::exit(1);
        }
    };

    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let pipeline = Arc::new(ImagePipeline::new(store, config));
    pipeline.start();

    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal, queued work is dropped");
}
