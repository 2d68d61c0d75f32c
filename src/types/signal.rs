//! Signal phase types

use serde::{Deserialize, Deserializer, Serialize};

/// Phase currently in force at a junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalPhase {
    Green,
    Red,
    Amber,
    /// No meaningful data yet
    Idle,
}

impl SignalPhase {
    /// Parse a predictor status string; anything unrecognized is `Idle`
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "GREEN" => SignalPhase::Green,
            "RED" => SignalPhase::Red,
            "AMBER" | "YELLOW" => SignalPhase::Amber,
            _ => SignalPhase::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalPhase::Green => "GREEN",
            SignalPhase::Red => "RED",
            SignalPhase::Amber => "AMBER",
            SignalPhase::Idle => "IDLE",
        }
    }
}

impl<'de> Deserialize<'de> for SignalPhase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = Option::<String>::deserialize(deserializer)?;
        Ok(status.as_deref().map(SignalPhase::from_status).unwrap_or(SignalPhase::Idle))
    }
}

/// Phase in force and how long until it flips
///
/// `seconds_to_change` stays an `Option` so a missing value from the
/// predictor reaches the advisory calculator as invalid data instead of
/// being defaulted here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseWindow {
    pub phase: SignalPhase,
    pub seconds_to_change: Option<f64>,
}

impl PhaseWindow {
    pub fn new(phase: SignalPhase, seconds_to_change: Option<f64>) -> Self {
        Self { phase, seconds_to_change }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_is_case_insensitive() {
        assert_eq!(SignalPhase::from_status("green"), SignalPhase::Green);
        assert_eq!(SignalPhase::from_status(" Red "), SignalPhase::Red);
        assert_eq!(SignalPhase::from_status("AMBER"), SignalPhase::Amber);
    }

    #[test]
    fn test_yellow_is_amber() {
        assert_eq!(SignalPhase::from_status("YELLOW"), SignalPhase::Amber);
    }

    #[test]
    fn test_unknown_status_is_idle() {
        assert_eq!(SignalPhase::from_status("IDLE"), SignalPhase::Idle);
        assert_eq!(SignalPhase::from_status("UNKNOWN"), SignalPhase::Idle);
        assert_eq!(SignalPhase::from_status(""), SignalPhase::Idle);
        assert_eq!(SignalPhase::from_status("FLASHING"), SignalPhase::Idle);
    }

    #[test]
    fn test_deserialize_null_is_idle() {
        let phase: SignalPhase = serde_json::from_str("null").unwrap();
        assert_eq!(phase, SignalPhase::Idle);

        let phase: SignalPhase = serde_json::from_str(r#""yellow""#).unwrap();
        assert_eq!(phase, SignalPhase::Amber);
    }

    #[test]
    fn test_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&SignalPhase::Green).unwrap(), r#""GREEN""#);
        assert_eq!(serde_json::to_string(&SignalPhase::Idle).unwrap(), r#""IDLE""#);
    }
}
