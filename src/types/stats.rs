//! Dashboard statistics types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AdvisoryKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindCount {
    pub kind: AdvisoryKind,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub label: String,
    pub status: String,
}

/// Snapshot served on `glosa.stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub advisories_served: u64,
    pub by_kind: Vec<KindCount>,
    pub upstream_failures: u64,
    pub junction_not_found: u64,
    pub invalid_coordinates: u64,
    pub system_status: Vec<SystemStatus>,
    pub last_updated: DateTime<Utc>,
}
