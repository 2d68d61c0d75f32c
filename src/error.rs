//! Caller-visible error taxonomy
//!
//! Every variant maps to a stable wire code used in `ErrorResponse`.
//! Plumbing failures that never reach a caller stay in `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlosaError {
    /// Latitude/longitude outside the Earth-surface range or not finite
    #[error("invalid coordinate: lat {lat}, lng {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Speed band that cannot produce a valid recommendation
    #[error("invalid speed bounds: {0}")]
    InvalidSpeedBounds(String),

    #[error("junction {0} not found")]
    JunctionNotFound(String),

    /// Predictor or registry failed or timed out
    #[error("advisory temporarily unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl GlosaError {
    /// Error code sent back to the caller
    pub fn code(&self) -> &'static str {
        match self {
            GlosaError::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            GlosaError::InvalidSpeedBounds(_) => "INVALID_SPEED_BOUNDS",
            GlosaError::JunctionNotFound(_) => "JUNCTION_NOT_FOUND",
            GlosaError::UpstreamUnavailable(_) => "ADVISORY_UNAVAILABLE",
        }
    }
}
