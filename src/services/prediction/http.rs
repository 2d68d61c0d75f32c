//! HTTP client for the signal phase prediction service
//!
//! `POST {base_url}/predict` with `{"junction_id", "timestamp"}`, answered by
//! `{"current_status", "seconds_to_change"}`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{PhaseWindow, SignalPhase};
use super::PhasePredictor;

/// Prediction client configuration
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Base URL of the prediction service (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 5,
        }
    }
}

impl PredictorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Phase predictor backed by the prediction service
pub struct HttpPhasePredictor {
    client: Client,
    config: PredictorConfig,
}

impl HttpPhasePredictor {
    pub fn new(config: PredictorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PhasePredictor for HttpPhasePredictor {
    async fn predict(&self, junction_id: &str, timestamp: f64) -> Result<PhaseWindow> {
        let request = PredictRequest { junction_id, timestamp };
        let url = self.predict_url();

        debug!("Requesting phase prediction for junction {} at {}", junction_id, timestamp);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to phase predictor")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Phase predictor returned error {}: {}", status, body);
        }

        let prediction: PredictResponse = response
            .json()
            .await
            .context("Failed to parse phase predictor response")?;

        Ok(prediction.into_window())
    }

    fn name(&self) -> &str {
        "HttpPredictor"
    }
}

/// Check if the predictor is healthy by requesting its health endpoint
pub(super) async fn check_predictor_health(base_url: &str, timeout_seconds: u64) -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;

    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let response = client.get(&url).send().await?;

    if response.status().is_success() {
        Ok(())
    } else {
        anyhow::bail!("Phase predictor returned status {}", response.status())
    }
}

// Prediction API types

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    junction_id: &'a str,
    timestamp: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    current_status: Option<String>,
    #[serde(default)]
    seconds_to_change: Option<f64>,
}

impl PredictResponse {
    fn into_window(self) -> PhaseWindow {
        let phase = self
            .current_status
            .as_deref()
            .map(SignalPhase::from_status)
            .unwrap_or(SignalPhase::Idle);

        PhaseWindow::new(phase, self.seconds_to_change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_request_wire_format() {
        let request = PredictRequest { junction_id: "J001", timestamp: 1_700_000_000.5 };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["junction_id"], "J001");
        assert_eq!(json["timestamp"], 1_700_000_000.5);
    }

    #[test]
    fn test_predict_response_to_window() {
        let response: PredictResponse =
            serde_json::from_str(r#"{"current_status": "RED", "seconds_to_change": 12.5}"#).unwrap();
        assert_eq!(response.into_window(), PhaseWindow::new(SignalPhase::Red, Some(12.5)));
    }

    #[test]
    fn test_predict_response_missing_fields_is_idle() {
        let response: PredictResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_window(), PhaseWindow::new(SignalPhase::Idle, None));

        let response: PredictResponse =
            serde_json::from_str(r#"{"current_status": "GREEN", "seconds_to_change": null}"#).unwrap();
        assert_eq!(response.into_window(), PhaseWindow::new(SignalPhase::Green, None));
    }

    #[test]
    fn test_predict_response_keeps_negative_seconds_for_the_calculator() {
        let response: PredictResponse =
            serde_json::from_str(r#"{"current_status": "green", "seconds_to_change": -3}"#).unwrap();
        assert_eq!(response.into_window().seconds_to_change, Some(-3.0));
    }

    #[test]
    fn test_predict_url_trims_trailing_slash() {
        let predictor = HttpPhasePredictor::new(PredictorConfig::new("http://predictor:8000/")).unwrap();
        assert_eq!(predictor.predict_url(), "http://predictor:8000/predict");
    }

    #[tokio::test]
    async fn test_unreachable_predictor_is_an_error() {
        let config = PredictorConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
        };
        let predictor = HttpPhasePredictor::new(config).unwrap();

        assert!(predictor.predict("J001", 1_700_000_000.0).await.is_err());
    }

    #[tokio::test]
    #[ignore = "Requires running phase prediction service"]
    async fn test_live_predictor_returns_phase() {
        let predictor = HttpPhasePredictor::new(PredictorConfig::default()).unwrap();
        let window = predictor.predict("J001", 1_700_000_000.0).await.unwrap();
        assert!(window.seconds_to_change.is_some());
    }
}
