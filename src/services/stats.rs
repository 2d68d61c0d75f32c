//! In-process advisory counters for the dashboard
//!
//! Counters reset on process restart. Safe to share via `Arc<AdvisoryStats>`
//! across handler tasks.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::error::GlosaError;
use crate::types::{AdvisoryKind, KindCount, StatsResponse, SystemStatus};

#[derive(Debug, Default)]
struct Counters {
    by_kind: HashMap<AdvisoryKind, u64>,
    upstream_failures: u64,
    junction_not_found: u64,
    invalid_coordinates: u64,
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct AdvisoryStats {
    counters: Mutex<Counters>,
}

impl AdvisoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_advisory(&self, kind: AdvisoryKind) {
        let mut counters = self.counters.lock();
        *counters.by_kind.entry(kind).or_default() += 1;
        counters.last_updated = Some(Utc::now());
    }

    pub fn record_error(&self, err: &GlosaError) {
        let mut counters = self.counters.lock();
        match err {
            GlosaError::UpstreamUnavailable(_) => counters.upstream_failures += 1,
            GlosaError::JunctionNotFound(_) => counters.junction_not_found += 1,
            GlosaError::InvalidCoordinate { .. } => counters.invalid_coordinates += 1,
            GlosaError::InvalidSpeedBounds(_) => {}
        }
        counters.last_updated = Some(Utc::now());
    }

    /// Snapshot with every advisory kind listed, zeros included
    pub fn snapshot(&self, system_status: Vec<SystemStatus>) -> StatsResponse {
        let counters = self.counters.lock();

        let by_kind: Vec<KindCount> = AdvisoryKind::ALL
            .iter()
            .map(|kind| KindCount {
                kind: *kind,
                count: counters.by_kind.get(kind).copied().unwrap_or(0),
            })
            .collect();

        StatsResponse {
            advisories_served: by_kind.iter().map(|k| k.count).sum(),
            by_kind,
            upstream_failures: counters.upstream_failures,
            junction_not_found: counters.junction_not_found,
            invalid_coordinates: counters.invalid_coordinates,
            system_status,
            last_updated: counters.last_updated.unwrap_or_else(Utc::now),
        }
    }
}
