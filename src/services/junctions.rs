//! Junction registry
//!
//! Lookup store keyed by junction id. The worker ships an in-memory
//! registry loaded from a JSON file (`JUNCTIONS_FILE`) or from the built-in
//! New Delhi pilot seed.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::types::Junction;

/// Registry trait - abstraction over wherever junctions are stored
#[async_trait]
pub trait JunctionRegistry: Send + Sync {
    /// All junctions, ordered by id
    async fn list(&self) -> Result<Vec<Junction>>;

    /// Look up a junction; `Ok(None)` when the id is unknown
    async fn find(&self, id: &str) -> Result<Option<Junction>>;

    /// Get the name of this registry implementation
    fn name(&self) -> &'static str;
}

/// Registry held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryJunctionRegistry {
    junctions: HashMap<String, Junction>,
}

impl InMemoryJunctionRegistry {
    pub fn new(junctions: Vec<Junction>) -> Self {
        Self {
            junctions: junctions.into_iter().map(|j| (j.id.clone(), j)).collect(),
        }
    }

    /// Load a JSON array of junctions
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read junctions file {}", path.display()))?;
        let junctions = Self::parse_json(&raw)
            .with_context(|| format!("Failed to parse junctions file {}", path.display()))?;
        Ok(Self::new(junctions))
    }

    fn parse_json(raw: &str) -> Result<Vec<Junction>> {
        let junctions: Vec<Junction> = serde_json::from_str(raw)?;
        for junction in &junctions {
            junction
                .coordinates()
                .validate()
                .with_context(|| format!("Junction {} has invalid coordinates", junction.id))?;
        }
        Ok(junctions)
    }

    /// New Delhi pilot corridor
    pub fn seeded() -> Self {
        Self::new(vec![
            Junction {
                id: "J001".to_string(),
                name: "Connaught Place Outer Circle".to_string(),
                lat: 28.6315,
                lng: 77.2167,
                speed_limits: None,
            },
            Junction {
                id: "J002".to_string(),
                name: "ITO Crossing".to_string(),
                lat: 28.6289,
                lng: 77.2405,
                speed_limits: None,
            },
            Junction {
                id: "J003".to_string(),
                name: "AIIMS Flyover".to_string(),
                lat: 28.5672,
                lng: 77.2100,
                speed_limits: None,
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }
}

#[async_trait]
impl JunctionRegistry for InMemoryJunctionRegistry {
    async fn list(&self) -> Result<Vec<Junction>> {
        let mut junctions: Vec<Junction> = self.junctions.values().cloned().collect();
        junctions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(junctions)
    }

    async fn find(&self, id: &str) -> Result<Option<Junction>> {
        Ok(self.junctions.get(id).cloned())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

/// Build the registry from configuration
pub fn create_registry(junctions_file: Option<&Path>) -> Result<InMemoryJunctionRegistry> {
    let registry = match junctions_file {
        Some(path) => InMemoryJunctionRegistry::from_json_file(path)?,
        None => InMemoryJunctionRegistry::seeded(),
    };
    info!("Junction registry loaded with {} junctions", registry.len());
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_registry_lists_sorted() {
        let registry = InMemoryJunctionRegistry::seeded();
        let junctions = registry.list().await.unwrap();

        let ids: Vec<&str> = junctions.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["J001", "J002", "J003"]);
    }

    #[test]
    fn test_find_known_and_unknown() {
        let registry = InMemoryJunctionRegistry::seeded();

        let found = tokio_test::block_on(registry.find("J002")).unwrap();
        assert_eq!(found.unwrap().name, "ITO Crossing");

        assert!(tokio_test::block_on(registry.find("J999")).unwrap().is_none());
    }

    #[test]
    fn test_seeded_coordinates_are_valid() {
        let registry = InMemoryJunctionRegistry::seeded();
        for junction in registry.junctions.values() {
            assert!(junction.coordinates().validate().is_ok());
        }
    }

    #[test]
    fn test_parse_json_rejects_invalid_coordinates() {
        let raw = r#"[{"id": "X", "name": "Nowhere", "lat": 123.0, "lng": 0.0}]"#;
        assert!(InMemoryJunctionRegistry::parse_json(raw).is_err());
    }

    #[test]
    fn test_from_json_file_missing_file() {
        let result = InMemoryJunctionRegistry::from_json_file(Path::new("/nonexistent/junctions.json"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_from_json_file_loads_speed_limits() {
        let path = std::env::temp_dir().join(format!("glosa-junctions-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"id": "K1", "name": "Test Cross", "lat": 12.97, "lng": 77.59,
                 "speedLimits": {"minKmh": 20, "maxKmh": 40}}]"#,
        )
        .unwrap();

        let registry = create_registry(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        let junction = registry.find("K1").await.unwrap().unwrap();
        assert_eq!(junction.speed_limits.unwrap().max_kmh(), 40.0);
    }
}
