//! Signal phase prediction
//!
//! Uses the HTTP prediction service in production, a fixed-time plan for
//! development. The backend is always chosen explicitly: an unreachable
//! predictor surfaces as an error per request, never as made-up phases.

mod http;

pub use http::{HttpPhasePredictor, PredictorConfig};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::types::{PhaseWindow, SignalPhase};

/// Phase predictor trait for abstraction (HTTP service, fixed plan, etc.)
#[async_trait]
pub trait PhasePredictor: Send + Sync {
    /// Phase in force at `timestamp` (unix seconds) and seconds until it flips
    async fn predict(&self, junction_id: &str, timestamp: f64) -> Result<PhaseWindow>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Which predictor to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorBackend {
    Http,
    FixedCycle,
}

impl PredictorBackend {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(PredictorBackend::Http),
            "fixed-cycle" | "fixed_cycle" => Ok(PredictorBackend::FixedCycle),
            other => anyhow::bail!("Unknown predictor backend '{}' (expected http or fixed-cycle)", other),
        }
    }
}

/// Fixed-time signal plan: green, amber, red, repeat
///
/// Each junction gets a stable offset into the cycle derived from its id so
/// that neighbouring junctions do not all flip at once.
pub struct FixedCyclePredictor {
    green_secs: f64,
    amber_secs: f64,
    red_secs: f64,
}

impl Default for FixedCyclePredictor {
    fn default() -> Self {
        Self {
            green_secs: 30.0,
            amber_secs: 5.0,
            red_secs: 45.0,
        }
    }
}

impl FixedCyclePredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_durations(green_secs: f64, amber_secs: f64, red_secs: f64) -> Result<Self> {
        for (label, value) in [("green", green_secs), ("amber", amber_secs), ("red", red_secs)] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} duration must be a non-negative number, got {}", label, value);
            }
        }
        if green_secs + amber_secs + red_secs <= 0.0 {
            anyhow::bail!("Signal cycle must be longer than zero seconds");
        }

        Ok(Self {
            green_secs,
            amber_secs,
            red_secs,
        })
    }

    fn cycle_secs(&self) -> f64 {
        self.green_secs + self.amber_secs + self.red_secs
    }

    fn offset_secs(&self, junction_id: &str) -> f64 {
        let sum: u64 = junction_id.bytes().map(u64::from).sum();
        (sum as f64).rem_euclid(self.cycle_secs())
    }

    /// Phase at a position inside the cycle
    fn phase_at(&self, position: f64) -> PhaseWindow {
        let green_end = self.green_secs;
        let amber_end = green_end + self.amber_secs;

        if position < green_end {
            PhaseWindow::new(SignalPhase::Green, Some(green_end - position))
        } else if position < amber_end {
            PhaseWindow::new(SignalPhase::Amber, Some(amber_end - position))
        } else {
            PhaseWindow::new(SignalPhase::Red, Some(self.cycle_secs() - position))
        }
    }
}

#[async_trait]
impl PhasePredictor for FixedCyclePredictor {
    async fn predict(&self, junction_id: &str, timestamp: f64) -> Result<PhaseWindow> {
        if !timestamp.is_finite() {
            anyhow::bail!("Timestamp {} is not a finite number", timestamp);
        }
        let position = (timestamp + self.offset_secs(junction_id)).rem_euclid(self.cycle_secs());
        Ok(self.phase_at(position))
    }

    fn name(&self) -> &str {
        "FixedCycle"
    }
}

/// Create the predictor selected by configuration
pub fn create_predictor(
    backend: PredictorBackend,
    config: PredictorConfig,
) -> Result<Box<dyn PhasePredictor>> {
    match backend {
        PredictorBackend::Http => Ok(Box::new(HttpPhasePredictor::new(config)?)),
        PredictorBackend::FixedCycle => Ok(Box::new(FixedCyclePredictor::new())),
    }
}

/// Create the predictor and probe it once
///
/// An unhealthy HTTP predictor is kept: requests fail individually with
/// "advisory temporarily unavailable" until the service comes back.
pub async fn create_predictor_with_health_check(
    backend: PredictorBackend,
    config: PredictorConfig,
) -> Result<Box<dyn PhasePredictor>> {
    if backend == PredictorBackend::Http {
        let url = config.base_url.clone();
        match http::check_predictor_health(&url, config.timeout_seconds).await {
            Ok(()) => info!("Phase predictor available at {}", url),
            Err(e) => warn!("Phase predictor not reachable at {}: {}. Advisories will be unavailable until it responds.", url, e),
        }
    }

    create_predictor(backend, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!(PredictorBackend::parse("http").unwrap(), PredictorBackend::Http);
        assert_eq!(PredictorBackend::parse("Fixed-Cycle").unwrap(), PredictorBackend::FixedCycle);
        assert_eq!(PredictorBackend::parse("fixed_cycle").unwrap(), PredictorBackend::FixedCycle);
        assert!(PredictorBackend::parse("mock").is_err());
    }

    #[test]
    fn test_fixed_cycle_phase_boundaries() {
        let predictor = FixedCyclePredictor::with_durations(30.0, 5.0, 45.0).unwrap();

        assert_eq!(predictor.phase_at(0.0), PhaseWindow::new(SignalPhase::Green, Some(30.0)));
        assert_eq!(predictor.phase_at(29.5), PhaseWindow::new(SignalPhase::Green, Some(0.5)));
        assert_eq!(predictor.phase_at(30.0), PhaseWindow::new(SignalPhase::Amber, Some(5.0)));
        assert_eq!(predictor.phase_at(35.0), PhaseWindow::new(SignalPhase::Red, Some(45.0)));
        assert_eq!(predictor.phase_at(79.0), PhaseWindow::new(SignalPhase::Red, Some(1.0)));
    }

    #[tokio::test]
    async fn test_fixed_cycle_is_periodic() {
        let predictor = FixedCyclePredictor::new();

        let a = predictor.predict("J001", 1_700_000_000.0).await.unwrap();
        let b = predictor.predict("J001", 1_700_000_080.0).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_fixed_cycle_seconds_never_negative() {
        let predictor = FixedCyclePredictor::new();

        for step in 0..200 {
            let window = predictor.predict("J002", 1_700_000_000.0 + step as f64 * 0.7).await.unwrap();
            let seconds = window.seconds_to_change.unwrap();
            assert!(seconds > 0.0 && seconds <= 45.0, "got {}", seconds);
            assert_ne!(window.phase, SignalPhase::Idle);
        }
    }

    #[tokio::test]
    async fn test_fixed_cycle_rejects_non_finite_timestamp() {
        let predictor = FixedCyclePredictor::new();
        assert!(predictor.predict("J001", f64::NAN).await.is_err());
    }

    #[test]
    fn test_fixed_cycle_rejects_invalid_durations() {
        assert!(FixedCyclePredictor::with_durations(-1.0, 5.0, 45.0).is_err());
        assert!(FixedCyclePredictor::with_durations(0.0, 0.0, 0.0).is_err());
        assert!(FixedCyclePredictor::with_durations(30.0, f64::NAN, 45.0).is_err());
    }

    #[test]
    fn test_create_predictor_names() {
        let fixed = create_predictor(PredictorBackend::FixedCycle, PredictorConfig::default()).unwrap();
        assert_eq!(fixed.name(), "FixedCycle");

        let http = create_predictor(PredictorBackend::Http, PredictorConfig::default()).unwrap();
        assert_eq!(http.name(), "HttpPredictor");
    }

    #[tokio::test]
    async fn test_health_check_keeps_http_backend_when_unreachable() {
        let config = PredictorConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
        };
        let predictor = create_predictor_with_health_check(PredictorBackend::Http, config)
            .await
            .unwrap();
        assert_eq!(predictor.name(), "HttpPredictor");
    }
}
