use regex::Regex;
use std::sync::LazyLock;

use super::EpisodeMatcher;
use crate::domain::models::{CatalogSeries, EpisodeMatch, GuideProgram};

static EPISODE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*s(\d{1,2})e(\d{1,3})\s*$").expect("invalid episode code pattern")
});

/// Parse a recorded "SxxExx" code into (season, episode-within-season).
pub fn parse_episode_code(code: &str) -> Option<(u32, u32)> {
    let caps = EPISODE_CODE.captures(code)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;
    Some((season, episode))
}

/// Matches on the recorded season/episode code, e.g. "S03E07". The most
/// precise signal, so it normally runs first in the chain.
pub struct EpisodeCodeMatcher;

impl EpisodeMatcher for EpisodeCodeMatcher {
    fn name(&self) -> &'static str {
        "episode-code"
    }

    fn try_match(&self, series: &CatalogSeries, program: &GuideProgram) -> Option<EpisodeMatch> {
        let (season, episode) = parse_episode_code(&program.episode_code)?;
        series
            .episodes
            .iter()
            .find(|ep| ep.season_number == season && ep.episode_number == episode)
            .map(|ep| EpisodeMatch {
                episode: ep.clone(),
                matched_by: self.name(),
            })
    }
}
