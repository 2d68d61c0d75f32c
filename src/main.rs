//! GLOSA Worker - Green Light Optimal Speed Advisory service
//!
//! This worker connects to NATS and answers advisory requests from vehicles
//! and the control-centre dashboard.

mod cli;
mod config;
mod defaults;
mod error;
mod handlers;
mod services;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::cli::{Cli, Command};
use crate::services::glosa::GlosaService;
use crate::services::junctions::{create_registry, JunctionRegistry};
use crate::services::prediction::{create_predictor, create_predictor_with_health_check, PhasePredictor};
use crate::types::AdvisoryRequest;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs directory - use LOGS_DIR env var or default to ../logs (relative to worker)
    let logs_dir = std::env::var("LOGS_DIR")
        .unwrap_or_else(|_| "../logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &logs_dir,
        "glosa-worker.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Logs go to stderr so one-shot commands keep stdout clean for JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,glosa_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))  // file
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    let registry: Arc<dyn JunctionRegistry> = Arc::new(create_registry(config.junctions_file.as_deref())?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting GLOSA Worker...");

            let predictor: Arc<dyn PhasePredictor> = Arc::from(
                create_predictor_with_health_check(config.predictor_backend, config.predictor.clone()).await?
            );
            info!("Phase predictor initialized: {}", predictor.name());

            let service = Arc::new(GlosaService::new(registry, predictor, config.speed_bounds));

            // Connect to NATS (supports optional NATS_USER/NATS_PASSWORD auth).
            let nats_client = match (std::env::var("NATS_USER"), std::env::var("NATS_PASSWORD")) {
                (Ok(user), Ok(password)) if !user.is_empty() => {
                    async_nats::ConnectOptions::new()
                        .user_and_password(user, password)
                        .connect(&config.nats_url)
                        .await?
                }
                _ => async_nats::connect(&config.nats_url).await?,
            };
            info!("Connected to NATS at {}", config.nats_url);

            // Start message handlers
            let handler_result = handlers::start_handlers(nats_client, service).await;

            if let Err(e) = handler_result {
                error!("Handler error: {}", e);
                return Err(e);
            }
        }
        Command::Advise { junction, lat, lng, timestamp } => {
            let predictor: Arc<dyn PhasePredictor> = Arc::from(
                create_predictor(config.predictor_backend, config.predictor.clone())?
            );
            let service = GlosaService::new(registry, predictor, config.speed_bounds);

            let request = AdvisoryRequest { junction_id: junction, lat, lng, timestamp };
            let response = service.advisory(&request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Junctions => {
            let junctions = registry.list().await?;
            println!("{}", serde_json::to_string_pretty(&junctions)?);
        }
    }

    Ok(())
}
