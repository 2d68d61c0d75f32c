//! NATS message handlers

pub mod advisory;
pub mod junction;
pub mod ping;
pub mod stats;

use std::sync::Arc;
use anyhow::Result;
use async_nats::Client;
use tracing::{info, error};
use tokio::select;

use crate::services::glosa::GlosaService;

/// Start all message handlers
pub async fn start_handlers(client: Client, service: Arc<GlosaService>) -> Result<()> {
    info!("Starting message handlers...");

    // Subscribe to all subjects
    let ping_sub = client.subscribe("glosa.ping").await?;
    let junction_list_sub = client.subscribe("glosa.junction.list").await?;
    let junction_get_sub = client.subscribe("glosa.junction.get").await?;
    let advisory_sub = client.subscribe("glosa.advisory").await?;
    let stats_sub = client.subscribe("glosa.stats").await?;

    info!("Subscribed to NATS subjects");

    // Clone for each handler
    let client_ping = client.clone();
    let client_junction_list = client.clone();
    let client_junction_get = client.clone();
    let client_advisory = client.clone();
    let client_stats = client.clone();

    let service_junction_list = service.clone();
    let service_junction_get = service.clone();
    let service_advisory = service.clone();
    let service_stats = service;

    let ping_handle = tokio::spawn(async move {
        ping::handle_ping(client_ping, ping_sub).await
    });

    let junction_list_handle = tokio::spawn(async move {
        junction::handle_list(client_junction_list, junction_list_sub, service_junction_list).await
    });

    let junction_get_handle = tokio::spawn(async move {
        junction::handle_get(client_junction_get, junction_get_sub, service_junction_get).await
    });

    let advisory_handle = tokio::spawn(async move {
        advisory::handle_advisory(client_advisory, advisory_sub, service_advisory).await
    });

    let stats_handle = tokio::spawn(async move {
        stats::handle_stats(client_stats, stats_sub, service_stats).await
    });

    info!("All handlers started");

    // Wait for any handler to finish (which would indicate an error)
    select! {
        result = ping_handle => {
            error!("Ping handler finished: {:?}", result);
        }
        result = junction_list_handle => {
            error!("Junction list handler finished: {:?}", result);
        }
        result = junction_get_handle => {
            error!("Junction get handler finished: {:?}", result);
        }
        result = advisory_handle => {
            error!("Advisory handler finished: {:?}", result);
        }
        result = stats_handle => {
            error!("Stats handler finished: {:?}", result);
        }
    }

    Ok(())
}
