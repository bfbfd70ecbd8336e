// crates/core/src/catalog.rs
//! Champion metadata lookup (names and artwork paths).
//!
//! Loads the Data Dragon `champion.json` layout:
//! `{"data": {"Nocturne": {"id": "Nocturne", "key": "56", "name": "Nocturne"}}}`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use pickban_types::Champion;

use crate::error::CatalogError;

/// Resolves champion ids referenced by snapshots.
pub trait ChampionCatalog: Send + Sync {
    fn champion(&self, id: i64) -> Option<Champion>;
}

#[derive(Deserialize)]
struct DataDragonFile {
    data: HashMap<String, DataDragonChampion>,
}

#[derive(Deserialize)]
struct DataDragonChampion {
    id: String,
    key: String,
    name: String,
}

/// In-memory catalog, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    by_id: HashMap<i64, Champion>,
}

impl StaticCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path, version: &str) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_data_dragon(&json, version)
    }

    pub fn from_data_dragon(json: &str, version: &str) -> Result<Self, CatalogError> {
        let file: DataDragonFile =
            serde_json::from_str(json).map_err(|e| CatalogError::MalformedJson {
                message: e.to_string(),
            })?;

        let mut catalog = Self::empty();
        for (alias, entry) in file.data {
            let Ok(id) = entry.key.parse::<i64>() else {
                warn!(alias = %alias, key = %entry.key, "skipping champion with non-numeric key");
                continue;
            };
            catalog.insert(Champion {
                id,
                name: entry.name,
                splash_centered_img: splash_path(version, &entry.id),
            });
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, champion: Champion) {
        self.by_id.insert(champion.id, champion);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl ChampionCatalog for StaticCatalog {
    fn champion(&self, id: i64) -> Option<Champion> {
        self.by_id.get(&id).cloned()
    }
}

fn splash_path(version: &str, alias: &str) -> String {
    format!("/cache/{version}/img/champion/centered/{alias}_0.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "champion",
        "data": {
            "Nocturne": {"id": "Nocturne", "key": "56", "name": "Nocturne", "title": "the Eternal Nightmare"},
            "MonkeyKing": {"id": "MonkeyKing", "key": "62", "name": "Wukong"},
            "Broken": {"id": "Broken", "key": "n/a", "name": "Broken"}
        }
    }"#;

    #[test]
    fn test_load_data_dragon() {
        let catalog = StaticCatalog::from_data_dragon(SAMPLE, "14.1.1").unwrap();
        assert_eq!(catalog.len(), 2);

        let wukong = catalog.champion(62).unwrap();
        assert_eq!(wukong.name, "Wukong");
        assert_eq!(
            wukong.splash_centered_img,
            "/cache/14.1.1/img/champion/centered/MonkeyKing_0.jpg"
        );
        assert!(catalog.champion(0).is_none());
    }

    #[test]
    fn test_malformed_json() {
        let err = StaticCatalog::from_data_dragon("{\"data\": 5}", "x").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedJson { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticCatalog::load(&dir.path().join("champion.json"), "x").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }
}
