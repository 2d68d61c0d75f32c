//! Configuration management

use std::path::PathBuf;

use anyhow::{self, Context, Result};

use crate::defaults::{
    DEFAULT_NATS_URL, DEFAULT_PREDICTOR_TIMEOUT_SECS, DEFAULT_PREDICTOR_URL,
    DEFAULT_SPEED_MAX_KMH, DEFAULT_SPEED_MIN_KMH,
};
use crate::services::prediction::{PredictorBackend, PredictorConfig};
use crate::types::SpeedBounds;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL
    pub nats_url: String,

    /// Which phase predictor to run
    pub predictor_backend: PredictorBackend,

    /// Phase prediction service URL and timeout
    pub predictor: PredictorConfig,

    /// JSON file with the junction registry (built-in seed when unset)
    pub junctions_file: Option<PathBuf>,

    /// Default approach speed band
    pub speed_bounds: SpeedBounds,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let nats_url = lookup("NATS_URL").unwrap_or_else(|| DEFAULT_NATS_URL.to_string());

        let predictor_backend = match lookup("PREDICTOR_BACKEND") {
            Some(value) => PredictorBackend::parse(&value)?,
            None => PredictorBackend::Http,
        };

        let base_url = lookup("PREDICTOR_URL")
            .or_else(|| lookup("AI_SERVICE_URL"))
            .unwrap_or_else(|| DEFAULT_PREDICTOR_URL.to_string());

        let timeout_seconds = match lookup("PREDICTOR_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("PREDICTOR_TIMEOUT_SECS must be whole seconds, got '{}'", value))?,
            None => DEFAULT_PREDICTOR_TIMEOUT_SECS,
        };
        if timeout_seconds == 0 {
            anyhow::bail!("PREDICTOR_TIMEOUT_SECS must be at least 1");
        }

        let junctions_file = lookup("JUNCTIONS_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let min_kmh = parse_speed(&lookup, "SPEED_MIN_KMH")?.unwrap_or(DEFAULT_SPEED_MIN_KMH);
        let max_kmh = parse_speed(&lookup, "SPEED_MAX_KMH")?.unwrap_or(DEFAULT_SPEED_MAX_KMH);

        let mut speed_bounds = SpeedBounds::new(min_kmh, max_kmh)
            .context("SPEED_MIN_KMH / SPEED_MAX_KMH do not form a valid band")?;
        if let Some(cruise) = parse_speed(&lookup, "CRUISE_SPEED_KMH")? {
            speed_bounds = speed_bounds
                .with_cruise(cruise)
                .context("CRUISE_SPEED_KMH is invalid")?;
        }

        Ok(Self {
            nats_url,
            predictor_backend,
            predictor: PredictorConfig {
                base_url,
                timeout_seconds,
            },
            junctions_file,
            speed_bounds,
        })
    }
}

fn parse_speed(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<f64>> {
    match lookup(key) {
        Some(value) => {
            let speed = value
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{} must be a number in km/h, got '{}'", key, value))?;
            Ok(Some(speed))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.nats_url, "nats://localhost:4222");
        assert_eq!(config.predictor_backend, PredictorBackend::Http);
        assert_eq!(config.predictor.base_url, "http://localhost:8000");
        assert_eq!(config.predictor.timeout_seconds, 5);
        assert!(config.junctions_file.is_none());
        assert_eq!(config.speed_bounds.min_kmh(), 10.0);
        assert_eq!(config.speed_bounds.max_kmh(), 60.0);
        assert_eq!(config.speed_bounds.cruise_kmh(), 35.0);
    }

    #[test]
    fn test_config_ai_service_url_alias() {
        let config = config_from(&[("AI_SERVICE_URL", "http://ai:8000")]).unwrap();
        assert_eq!(config.predictor.base_url, "http://ai:8000");

        let config = config_from(&[
            ("AI_SERVICE_URL", "http://ai:8000"),
            ("PREDICTOR_URL", "http://predictor:9000"),
        ])
        .unwrap();
        assert_eq!(config.predictor.base_url, "http://predictor:9000");
    }

    #[test]
    fn test_config_speed_band_and_cruise() {
        let config = config_from(&[
            ("SPEED_MIN_KMH", "20"),
            ("SPEED_MAX_KMH", "50"),
            ("CRUISE_SPEED_KMH", "45"),
        ])
        .unwrap();

        assert_eq!(config.speed_bounds.min_kmh(), 20.0);
        assert_eq!(config.speed_bounds.max_kmh(), 50.0);
        assert_eq!(config.speed_bounds.cruise_kmh(), 45.0);
    }

    #[test]
    fn test_config_rejects_inverted_band() {
        let result = config_from(&[("SPEED_MIN_KMH", "70"), ("SPEED_MAX_KMH", "50")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_malformed_numbers() {
        assert!(config_from(&[("SPEED_MAX_KMH", "fast")]).is_err());
        assert!(config_from(&[("PREDICTOR_TIMEOUT_SECS", "1.5")]).is_err());
        assert!(config_from(&[("PREDICTOR_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_config_fixed_cycle_backend() {
        let config = config_from(&[("PREDICTOR_BACKEND", "fixed-cycle")]).unwrap();
        assert_eq!(config.predictor_backend, PredictorBackend::FixedCycle);

        assert!(config_from(&[("PREDICTOR_BACKEND", "oracle")]).is_err());
    }

    #[test]
    fn test_config_junctions_file() {
        let config = config_from(&[("JUNCTIONS_FILE", "/etc/glosa/junctions.json")]).unwrap();
        assert_eq!(config.junctions_file, Some(PathBuf::from("/etc/glosa/junctions.json")));

        let config = config_from(&[("JUNCTIONS_FILE", "  ")]).unwrap();
        assert!(config.junctions_file.is_none());
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_from_env_reads_process_environment() {
        std::env::set_var("NATS_URL", "nats://broker:4222");

        let config = Config::from_env().unwrap();
        assert_eq!(config.nats_url, "nats://broker:4222");

        std::env::remove_var("NATS_URL");
    }
}
