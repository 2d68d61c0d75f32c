//! Advisory message handler

use std::sync::Arc;
use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::GlosaError;
use crate::services::glosa::GlosaService;
use crate::types::{AdvisoryRequest, ErrorResponse, Request, SuccessResponse};

/// Handle glosa.advisory messages
pub async fn handle_advisory(
    client: Client,
    mut subscriber: Subscriber,
    service: Arc<GlosaService>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received glosa.advisory message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let response = process_advisory(&service, &msg.payload).await?;
        let _ = client.publish(reply, response.into()).await;
    }

    Ok(())
}

/// Parse, compute and serialize one advisory reply
pub(crate) async fn process_advisory(service: &GlosaService, payload: &[u8]) -> Result<Vec<u8>> {
    let request: Request<AdvisoryRequest> = match serde_json::from_slice(payload) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse advisory request: {}", e);
            let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
            return Ok(serde_json::to_vec(&error)?);
        }
    };

    match service.advisory(&request.payload).await {
        Ok(advisory) => {
            let success = SuccessResponse::new(request.id, advisory);
            Ok(serde_json::to_vec(&success)?)
        }
        Err(e) => {
            match &e {
                GlosaError::UpstreamUnavailable(_) => error!("Advisory unavailable: {}", e),
                _ => warn!("Advisory rejected: {}", e),
            }
            let error = ErrorResponse::from_error(request.id, &e);
            Ok(serde_json::to_vec(&error)?)
        }
    }
}
