//! Junction registry handlers

use std::sync::Arc;
use anyhow::Result;
use async_nats::{Client, Subscriber};
use futures::StreamExt;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::services::glosa::GlosaService;
use crate::types::{EmptyPayload, ErrorResponse, JunctionGetRequest, Request, SuccessResponse};

/// Handle glosa.junction.list messages
pub async fn handle_list(
    client: Client,
    mut subscriber: Subscriber,
    service: Arc<GlosaService>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received glosa.junction.list message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let response = process_list(&service, &msg.payload).await?;
        let _ = client.publish(reply, response.into()).await;
    }

    Ok(())
}

/// Handle glosa.junction.get messages
pub async fn handle_get(
    client: Client,
    mut subscriber: Subscriber,
    service: Arc<GlosaService>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received glosa.junction.get message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        let response = process_get(&service, &msg.payload).await?;
        let _ = client.publish(reply, response.into()).await;
    }

    Ok(())
}

pub(crate) async fn process_list(service: &GlosaService, payload: &[u8]) -> Result<Vec<u8>> {
    let request: Request<EmptyPayload> = match serde_json::from_slice(payload) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse request: {}", e);
            let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
            return Ok(serde_json::to_vec(&error)?);
        }
    };

    match service.junctions().await {
        Ok(junctions) => Ok(serde_json::to_vec(&SuccessResponse::new(request.id, junctions))?),
        Err(e) => {
            error!("Failed to list junctions: {}", e);
            Ok(serde_json::to_vec(&ErrorResponse::from_error(request.id, &e))?)
        }
    }
}

pub(crate) async fn process_get(service: &GlosaService, payload: &[u8]) -> Result<Vec<u8>> {
    let request: Request<JunctionGetRequest> = match serde_json::from_slice(payload) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse request: {}", e);
            let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
            return Ok(serde_json::to_vec(&error)?);
        }
    };

    match service.junction(&request.payload.junction_id).await {
        Ok(junction) => Ok(serde_json::to_vec(&SuccessResponse::new(request.id, junction))?),
        Err(e) => {
            warn!("Junction lookup failed: {}", e);
            Ok(serde_json::to_vec(&ErrorResponse::from_error(request.id, &e))?)
        }
    }
}
