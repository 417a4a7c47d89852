use serde::{Deserialize, Serialize};

/// A locally-recorded guide program, as exported by the recorder.
///
/// The `resolved_*` fields and `enriched` are outputs: they start empty and
/// are written only by the enrichment applier. The resolver and matchers
/// treat the program as read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideProgram {
    pub title: String,
    #[serde(default)]
    pub sub_title: String,
    /// Broadcast (absolute) episode number, 0 when unknown.
    #[serde(default)]
    pub episode_number: u32,
    /// Season/episode code as recorded, e.g. "S02E02". May be empty.
    #[serde(default)]
    pub episode_code: String,
    #[serde(default)]
    pub resolved_season: Option<u32>,
    #[serde(default)]
    pub resolved_episode: Option<u32>,
    #[serde(default)]
    pub resolved_subtitle: Option<String>,
    #[serde(default)]
    pub enriched: bool,
}

impl GuideProgram {
    pub fn new(title: &str, sub_title: &str, episode_number: u32, episode_code: &str) -> Self {
        Self {
            title: title.to_string(),
            sub_title: sub_title.to_string(),
            episode_number,
            episode_code: episode_code.to_string(),
            resolved_season: None,
            resolved_episode: None,
            resolved_subtitle: None,
            enriched: false,
        }
    }
}

/// A catalog series together with its episode list, in catalog order
/// (season/episode ascending as the catalog supplies it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSeries {
    pub id: u32,
    pub name: String,
    pub episodes: Vec<CatalogEpisode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEpisode {
    /// Season 0 is reserved for specials.
    pub season_number: u32,
    pub episode_number: u32,
    pub absolute_number: Option<u32>,
    pub name: String,
    pub aired: Option<String>,
}

/// One candidate from a free-text series search, order preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSearchHit {
    pub id: u32,
    pub name: String,
}

/// A successful episode match, tagged with the matcher that produced it.
#[derive(Debug, Clone)]
pub struct EpisodeMatch {
    pub episode: CatalogEpisode,
    pub matched_by: &'static str,
}
