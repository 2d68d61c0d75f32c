//! Advisory types

use serde::{Deserialize, Serialize};

use crate::error::GlosaError;
use super::SignalPhase;

/// Permitted approach speed band in km/h
///
/// Always valid once constructed: `0 <= min <= max`, `max > 0`, all finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSpeedBounds")]
pub struct SpeedBounds {
    min_kmh: f64,
    max_kmh: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cruise_kmh: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpeedBounds {
    min_kmh: f64,
    max_kmh: f64,
    #[serde(default)]
    cruise_kmh: Option<f64>,
}

impl TryFrom<RawSpeedBounds> for SpeedBounds {
    type Error = GlosaError;

    fn try_from(raw: RawSpeedBounds) -> Result<Self, Self::Error> {
        let bounds = SpeedBounds::new(raw.min_kmh, raw.max_kmh)?;
        match raw.cruise_kmh {
            Some(cruise) => bounds.with_cruise(cruise),
            None => Ok(bounds),
        }
    }
}

impl SpeedBounds {
    pub fn new(min_kmh: f64, max_kmh: f64) -> Result<Self, GlosaError> {
        if !min_kmh.is_finite() || !max_kmh.is_finite() {
            return Err(GlosaError::InvalidSpeedBounds(format!(
                "bounds must be finite (min {}, max {})",
                min_kmh, max_kmh
            )));
        }
        if min_kmh < 0.0 {
            return Err(GlosaError::InvalidSpeedBounds(format!(
                "minimum {} km/h is negative",
                min_kmh
            )));
        }
        if max_kmh <= 0.0 {
            return Err(GlosaError::InvalidSpeedBounds(format!(
                "maximum {} km/h must be positive",
                max_kmh
            )));
        }
        if min_kmh > max_kmh {
            return Err(GlosaError::InvalidSpeedBounds(format!(
                "minimum {} km/h exceeds maximum {} km/h",
                min_kmh, max_kmh
            )));
        }

        Ok(Self { min_kmh, max_kmh, cruise_kmh: None })
    }

    /// Set the comfortable cruising speed used when there is ample time
    pub fn with_cruise(self, cruise_kmh: f64) -> Result<Self, GlosaError> {
        if !cruise_kmh.is_finite() {
            return Err(GlosaError::InvalidSpeedBounds(format!(
                "cruising speed {} is not finite",
                cruise_kmh
            )));
        }
        Ok(Self { cruise_kmh: Some(cruise_kmh), ..self })
    }

    pub fn min_kmh(&self) -> f64 {
        self.min_kmh
    }

    pub fn max_kmh(&self) -> f64 {
        self.max_kmh
    }

    /// Cruising speed, defaulting to the band midpoint, always inside the band
    pub fn cruise_kmh(&self) -> f64 {
        let cruise = self.cruise_kmh.unwrap_or((self.min_kmh + self.max_kmh) / 2.0);
        self.clamp(cruise)
    }

    pub fn clamp(&self, speed_kmh: f64) -> f64 {
        speed_kmh.clamp(self.min_kmh, self.max_kmh)
    }

    pub fn contains(&self, speed_kmh: f64) -> bool {
        (self.min_kmh..=self.max_kmh).contains(&speed_kmh)
    }
}

/// Which advisory rule produced the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// No usable phase data yet
    Synchronizing,
    /// Green can be reached at a speed inside the band
    GreenWave,
    /// Green lasts longer than needed even at the band minimum
    AmpleTime,
    /// Green ends before arrival even at the band maximum
    ExpectStop,
    /// Phase is flipping right now
    SignalChanging,
    /// Red/amber: slow down to arrive as it turns green
    EaseOff,
    /// Red/amber: arrival before green is unavoidable
    PrepareToStop,
}

impl AdvisoryKind {
    pub const ALL: [AdvisoryKind; 7] = [
        AdvisoryKind::Synchronizing,
        AdvisoryKind::GreenWave,
        AdvisoryKind::AmpleTime,
        AdvisoryKind::ExpectStop,
        AdvisoryKind::SignalChanging,
        AdvisoryKind::EaseOff,
        AdvisoryKind::PrepareToStop,
    ];
}

/// Computed advisory, `recommended_speed_kmh` is `None` when unknown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisory {
    pub recommended_speed_kmh: Option<f64>,
    pub kind: AdvisoryKind,
    pub message: String,
}

/// Advisory request from a vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    pub junction_id: String,
    pub lat: f64,
    pub lng: f64,
    /// Unix seconds; current time when absent
    #[serde(default)]
    pub timestamp: Option<f64>,
}

/// Advisory reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryResponse {
    /// Junction display name
    pub junction: String,
    pub junction_id: String,
    /// Meters, rounded
    pub distance: f64,
    pub signal_status: SignalPhase,
    pub seconds_to_change: Option<f64>,
    /// km/h, `null` while unknown
    pub recommended_speed: Option<f64>,
    pub kind: AdvisoryKind,
    pub message: String,
}
