use log::{debug, info};

use crate::config::Config;
use crate::domain::errors::EnrichError;
use crate::domain::models::{EpisodeMatch, GuideProgram};
use crate::infra::CatalogClient;
use crate::workflows::matchers::episode_code::parse_episode_code;
use crate::workflows::matchers::MatcherChain;
use crate::workflows::overrides::{OverrideTable, OverrideTarget};

/// The enrichment pipeline: series resolution, episode matching, and the
/// write-back of canonical numbering onto the program record.
pub struct Enricher<C> {
    client: C,
    overrides: OverrideTable,
    chain: MatcherChain,
    update_subtitles: bool,
    update_matched_episodes: bool,
}

impl<C: CatalogClient> Enricher<C> {
    pub fn new(client: C, config: &Config, chain: MatcherChain) -> Self {
        Self {
            client,
            overrides: config.overrides.clone(),
            chain,
            update_subtitles: config.update_subtitles,
            update_matched_episodes: config.update_matched_episodes,
        }
    }

    /// Turn a locally-observed title into exactly one catalog series id.
    ///
    /// Overrides are consulted first: an exact-title entry beats a regex
    /// entry, and a direct `id=` target short-circuits the catalog search
    /// entirely. A replacement-title target restarts resolution once (a
    /// replacement that maps to yet another replacement is not followed, so
    /// override cycles cannot loop).
    pub fn resolve_series(&mut self, title: &str) -> Result<u32, EnrichError> {
        let mut effective = title.to_string();

        if let Some(target) = self.overrides.lookup(&effective) {
            match target {
                OverrideTarget::SeriesId(id) => {
                    debug!("override maps {title:?} directly to series {id}");
                    return Ok(*id);
                }
                OverrideTarget::Title(replacement) => {
                    debug!("override maps {title:?} to title {replacement:?}");
                    effective = replacement.clone();
                    if let Some(OverrideTarget::SeriesId(id)) = self.overrides.lookup(&effective) {
                        return Ok(*id);
                    }
                }
            }
        }

        let hits = self.client.search_series(&effective)?;
        match hits.first() {
            Some(hit) => {
                debug!("search for {effective:?} resolved to {} ({})", hit.name, hit.id);
                Ok(hit.id)
            }
            None => Err(EnrichError::SeriesNotFound(title.to_string())),
        }
    }

    /// Resolve the program's series, run the matcher chain over its episode
    /// list, and apply the result. Returns Ok(true) iff the program was
    /// enriched; a known series with no matching episode is Ok(false).
    pub fn resolve_and_enrich(&mut self, program: &mut GuideProgram) -> Result<bool, EnrichError> {
        let series_id = self.resolve_series(&program.title)?;
        let series = self.client.get_series(series_id, true)?;

        match self.chain.match_episode(&series, program) {
            Some(found) => {
                info!(
                    "matched {:?} to {} S{:02}E{:02} via {}",
                    program.title,
                    series.name,
                    found.episode.season_number,
                    found.episode.episode_number,
                    found.matched_by
                );
                self.apply(program, &found);
                Ok(program.enriched)
            }
            None => {
                info!("no episode match for {:?} in {}", program.title, series.name);
                Ok(false)
            }
        }
    }

    /// Write the matched episode's canonical numbering onto the program.
    /// Pure bookkeeping: the overwrite toggles come from configuration and
    /// no matching logic lives here.
    fn apply(&self, program: &mut GuideProgram, found: &EpisodeMatch) {
        let episode = &found.episode;

        let already_current = parse_episode_code(&program.episode_code)
            .map(|(s, e)| s == episode.season_number && e == episode.episode_number)
            .unwrap_or(false);
        if self.update_matched_episodes || !already_current {
            program.resolved_season = Some(episode.season_number);
            program.resolved_episode = Some(episode.episode_number);
        }

        if self.update_subtitles || program.sub_title.is_empty() {
            program.resolved_subtitle = Some(episode.name.clone());
        }

        program.enriched = true;
    }
}
