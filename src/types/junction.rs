//! Junction types

use serde::{Deserialize, Serialize};

use super::{Coordinates, SpeedBounds};

/// Signalized junction as stored in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Junction {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Overrides the configured speed band on this approach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_limits: Option<SpeedBounds>,
}

impl Junction {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.lat, lng: self.lng }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JunctionGetRequest {
    pub junction_id: String,
}
