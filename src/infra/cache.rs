use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::{CatalogSeries, SeriesSearchHit};

/// On-disk cache of catalog responses, one JSON file per cache directory.
/// Owned by the catalog client; the enrichment core never sees it.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ResponseCache {
    #[serde(skip)]
    path: PathBuf,
    /// series id -> series with full episode list
    series: HashMap<u32, CatalogSeries>,
    /// "<language>:<query>" -> search candidates, order preserved
    searches: HashMap<String, Vec<SeriesSearchHit>>,
}

impl ResponseCache {
    /// Load the cache from `cache_dir`, starting empty if the file is
    /// missing or unreadable.
    pub fn load(cache_dir: &Path) -> Self {
        let path = cache_dir.join("catalog-cache.json");
        let mut cache = Self::default();
        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(loaded) = serde_json::from_str::<ResponseCache>(&content) {
                    cache = loaded;
                }
            }
        }
        cache.path = path;
        cache
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get_series(&self, id: u32) -> Option<&CatalogSeries> {
        self.series.get(&id)
    }

    pub fn set_series(&mut self, series: CatalogSeries) {
        self.series.insert(series.id, series);
    }

    pub fn get_search(&self, key: &str) -> Option<&Vec<SeriesSearchHit>> {
        self.searches.get(key)
    }

    pub fn set_search(&mut self, key: String, hits: Vec<SeriesSearchHit>) {
        self.searches.insert(key, hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CatalogEpisode;

    fn sample_series() -> CatalogSeries {
        CatalogSeries {
            id: 73141,
            name: "American Dad!".to_string(),
            episodes: vec![CatalogEpisode {
                season_number: 1,
                episode_number: 1,
                absolute_number: Some(1),
                name: "Pilot".to_string(),
                aired: Some("2005-02-06".to_string()),
            }],
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = ResponseCache::load(dir.path());
        assert!(cache.get_series(73141).is_none());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut cache = ResponseCache::load(dir.path());
        cache.set_series(sample_series());
        cache.set_search(
            "eng:american dad".to_string(),
            vec![SeriesSearchHit {
                id: 73141,
                name: "American Dad!".to_string(),
            }],
        );
        cache.save().unwrap();

        let reloaded = ResponseCache::load(dir.path());
        assert_eq!(reloaded.get_series(73141).unwrap().name, "American Dad!");
        assert_eq!(reloaded.get_search("eng:american dad").unwrap()[0].id, 73141);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("catalog-cache.json"), "not json").unwrap();
        let cache = ResponseCache::load(dir.path());
        assert!(cache.get_search("eng:anything").is_none());
    }
}
