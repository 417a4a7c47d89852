use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use super::cache::ResponseCache;
use super::CatalogClient;
use crate::domain::errors::CatalogError;
use crate::domain::models::{CatalogEpisode, CatalogSeries, SeriesSearchHit};

const TVDB_API_BASE: &str = "https://api4.thetvdb.com/v4";

/// TVDB v4 client. Authenticates lazily, caches every response on disk so
/// repeated runs against the same series stay offline.
#[derive(Debug)]
pub struct TvdbClient {
    api_key: String,
    language: String,
    token: Option<String>,
    cache: ResponseCache,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<RawSearchResult>,
}

#[derive(Debug, Deserialize)]
struct RawSearchResult {
    tvdb_id: String,
    name: Option<String>,
    translations: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    data: SeriesData,
}

#[derive(Debug, Deserialize)]
struct SeriesData {
    name: String,
}

#[derive(Debug, Deserialize)]
struct EpisodesResponse {
    data: EpisodesData,
}

#[derive(Debug, Deserialize)]
struct EpisodesData {
    episodes: Vec<RawEpisode>,
}

#[derive(Debug, Deserialize)]
struct RawEpisode {
    #[serde(rename = "seasonNumber")]
    season_number: u32,
    #[serde(rename = "number")]
    episode_number: u32,
    #[serde(rename = "absoluteNumber")]
    absolute_number: Option<u32>,
    name: Option<String>,
    aired: Option<String>,
}

impl TvdbClient {
    pub fn new(api_key: String, language: String, cache_dir: &Path) -> Self {
        Self {
            api_key,
            language,
            token: None,
            cache: ResponseCache::load(cache_dir),
        }
    }

    fn login(&mut self) -> Result<(), CatalogError> {
        let client = reqwest::blocking::Client::new();
        let body = serde_json::json!({
            "apikey": self.api_key
        });
        let response = client
            .post(format!("{}/login", TVDB_API_BASE))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()?;

        if !response.status().is_success() {
            return Err(CatalogError::Unavailable(format!(
                "TVDB login failed: HTTP {}",
                response.status()
            )));
        }

        let login_resp: LoginResponse = serde_json::from_str(&response.text()?)?;
        self.token = Some(login_resp.data.token);
        Ok(())
    }

    fn ensure_authenticated(&mut self) -> Result<String, CatalogError> {
        if self.token.is_none() {
            self.login()?;
        }
        Ok(self.token.clone().unwrap_or_default())
    }

    fn save_cache(&self) {
        if let Err(e) = self.cache.save() {
            warn!("failed to save catalog cache: {e}");
        }
    }

    fn display_name(&self, raw: &RawSearchResult) -> String {
        raw.translations
            .as_ref()
            .and_then(|t| t.get(&self.language))
            .cloned()
            .or_else(|| raw.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn fetch_episodes(&self, token: &str, id: u32) -> Result<Vec<CatalogEpisode>, CatalogError> {
        let client = reqwest::blocking::Client::new();
        let mut page = 0;
        let mut episodes = Vec::new();

        loop {
            let url = format!("{}/series/{}/episodes/default", TVDB_API_BASE, id);
            let response = client
                .get(&url)
                .header("Authorization", format!("Bearer {token}"))
                .query(&[("page", page.to_string())])
                .send()?;

            let status = response.status();
            let response_text = response.text()?;

            if !status.is_success() {
                // TVDB signals past-the-end pages with a 404
                if status == 404 {
                    break;
                }
                return Err(CatalogError::Unavailable(format!(
                    "TVDB episodes lookup failed: HTTP {status}"
                )));
            }

            let episodes_resp: EpisodesResponse = serde_json::from_str(&response_text)?;
            let raw_episodes = episodes_resp.data.episodes;

            if raw_episodes.is_empty() {
                break;
            }

            episodes.extend(raw_episodes.into_iter().map(|raw| CatalogEpisode {
                season_number: raw.season_number,
                episode_number: raw.episode_number,
                absolute_number: raw.absolute_number,
                name: raw.name.unwrap_or_default(),
                aired: raw.aired,
            }));
            page += 1;
        }

        Ok(episodes)
    }
}

impl CatalogClient for TvdbClient {
    fn search_series(&mut self, title: &str) -> Result<Vec<SeriesSearchHit>, CatalogError> {
        let cache_key = format!("{}:{}", self.language, title);
        if let Some(hits) = self.cache.get_search(&cache_key) {
            debug!("search cache hit for {title:?}");
            return Ok(hits.clone());
        }

        let token = self.ensure_authenticated()?;
        let client = reqwest::blocking::Client::new();
        let response = client
            .get(format!("{}/search", TVDB_API_BASE))
            .header("Authorization", format!("Bearer {token}"))
            .query(&[("query", title), ("type", "series")])
            .send()?;

        if !response.status().is_success() {
            return Err(CatalogError::Unavailable(format!(
                "TVDB search failed: HTTP {}",
                response.status()
            )));
        }

        let search_resp: SearchResponse = serde_json::from_str(&response.text()?)?;
        let hits: Vec<SeriesSearchHit> = search_resp
            .data
            .iter()
            .filter_map(|raw| {
                // Non-numeric ids (movies, people) are not series candidates
                let id = raw.tvdb_id.parse().ok()?;
                Some(SeriesSearchHit {
                    id,
                    name: self.display_name(raw),
                })
            })
            .collect();

        self.cache.set_search(cache_key, hits.clone());
        self.save_cache();
        Ok(hits)
    }

    fn get_series(&mut self, id: u32, include_episodes: bool) -> Result<CatalogSeries, CatalogError> {
        if let Some(series) = self.cache.get_series(id) {
            debug!("series cache hit for {id}");
            return Ok(series.clone());
        }

        let token = self.ensure_authenticated()?;
        let client = reqwest::blocking::Client::new();
        let response = client
            .get(format!("{}/series/{}", TVDB_API_BASE, id))
            .header("Authorization", format!("Bearer {token}"))
            .send()?;

        if !response.status().is_success() {
            return Err(CatalogError::Unavailable(format!(
                "TVDB series lookup failed: HTTP {}",
                response.status()
            )));
        }

        let series_resp: SeriesResponse = serde_json::from_str(&response.text()?)?;

        let episodes = if include_episodes {
            self.fetch_episodes(&token, id)?
        } else {
            Vec::new()
        };

        let series = CatalogSeries {
            id,
            name: series_resp.data.name,
            episodes,
        };

        // Only cache full snapshots so a name-only fetch never shadows the
        // episode list.
        if include_episodes {
            self.cache.set_series(series.clone());
            self.save_cache();
        }
        Ok(series)
    }
}
