//! Dashboard statistics handler

use std::sync::Arc;
use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::services::glosa::GlosaService;
use crate::types::{EmptyPayload, ErrorResponse, Request, SuccessResponse};

/// Handle glosa.stats messages
pub async fn handle_stats(
    client: Client,
    mut subscriber: Subscriber,
    service: Arc<GlosaService>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received glosa.stats message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let request: Request<EmptyPayload> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = client.publish(reply, serde_json::to_vec(&error)?.into()).await;
                continue;
            }
        };

        let stats = service.stats().await;
        let success = SuccessResponse::new(request.id, stats);
        let _ = client.publish(reply, serde_json::to_vec(&success)?.into()).await;
    }

    Ok(())
}
