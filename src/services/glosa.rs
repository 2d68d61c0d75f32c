//! Advisory orchestration
//!
//! Glues the collaborators to the pure core: validate the vehicle position,
//! look up the junction, measure the distance, ask the predictor for the
//! phase window and hand everything to the advisory calculator.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::GlosaError;
use crate::services::advisory::advise;
use crate::services::geo::haversine_distance;
use crate::services::junctions::JunctionRegistry;
use crate::services::prediction::PhasePredictor;
use crate::services::stats::AdvisoryStats;
use crate::types::{
    AdvisoryRequest, AdvisoryResponse, Coordinates, Junction, SpeedBounds, StatsResponse,
    SystemStatus,
};

pub struct GlosaService {
    registry: Arc<dyn JunctionRegistry>,
    predictor: Arc<dyn PhasePredictor>,
    /// Used when the junction carries no speed limits of its own
    default_bounds: SpeedBounds,
    stats: AdvisoryStats,
}

impl GlosaService {
    pub fn new(
        registry: Arc<dyn JunctionRegistry>,
        predictor: Arc<dyn PhasePredictor>,
        default_bounds: SpeedBounds,
    ) -> Self {
        Self {
            registry,
            predictor,
            default_bounds,
            stats: AdvisoryStats::new(),
        }
    }

    /// Compute the advisory for a vehicle approaching a junction
    pub async fn advisory(&self, request: &AdvisoryRequest) -> Result<AdvisoryResponse, GlosaError> {
        let result = self.compute_advisory(request).await;
        match &result {
            Ok(response) => self.stats.record_advisory(response.kind),
            Err(e) => self.stats.record_error(e),
        }
        result
    }

    async fn compute_advisory(&self, request: &AdvisoryRequest) -> Result<AdvisoryResponse, GlosaError> {
        let vehicle = Coordinates::new(request.lat, request.lng)?;
        let junction = self.junction(&request.junction_id).await?;

        let distance_m = haversine_distance(&vehicle, &junction.coordinates());
        let timestamp = request.timestamp.unwrap_or_else(now_unix_seconds);

        let window = self
            .predictor
            .predict(&junction.id, timestamp)
            .await
            .map_err(|e| {
                warn!("Phase prediction for {} via {} failed: {:#}", junction.id, self.predictor.name(), e);
                GlosaError::UpstreamUnavailable(format!("phase predictor: {}", e))
            })?;

        let bounds = junction.speed_limits.unwrap_or(self.default_bounds);
        let advisory = advise(distance_m, window.phase, window.seconds_to_change, &bounds);

        debug!(
            "Advisory for {} at {:.0} m: {:?} {:?} -> {:?}",
            junction.id, distance_m, window.phase, window.seconds_to_change, advisory.kind
        );

        Ok(AdvisoryResponse {
            junction: junction.name,
            junction_id: junction.id,
            distance: distance_m.round(),
            signal_status: window.phase,
            seconds_to_change: window.seconds_to_change,
            recommended_speed: advisory.recommended_speed_kmh,
            kind: advisory.kind,
            message: advisory.message,
        })
    }

    pub async fn junctions(&self) -> Result<Vec<Junction>, GlosaError> {
        self.registry.list().await.map_err(|e| {
            warn!("Junction registry {} failed to list: {:#}", self.registry.name(), e);
            GlosaError::UpstreamUnavailable(format!("junction registry: {}", e))
        })
    }

    pub async fn junction(&self, id: &str) -> Result<Junction, GlosaError> {
        let found = self.registry.find(id).await.map_err(|e| {
            warn!("Junction registry {} failed to look up {}: {:#}", self.registry.name(), id, e);
            GlosaError::UpstreamUnavailable(format!("junction registry: {}", e))
        })?;

        found.ok_or_else(|| GlosaError::JunctionNotFound(id.to_string()))
    }

    pub async fn stats(&self) -> StatsResponse {
        let registry_status = match self.registry.list().await {
            Ok(junctions) => format!("{} junctions", junctions.len()),
            Err(_) => "unavailable".to_string(),
        };

        self.stats.snapshot(vec![
            SystemStatus {
                label: "Phase Predictor".to_string(),
                status: self.predictor.name().to_string(),
            },
            SystemStatus {
                label: "Junction Registry".to_string(),
                status: registry_status,
            },
        ])
    }
}

fn now_unix_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
