use anyhow::{bail, Result};
use log::debug;

use crate::domain::models::{CatalogSeries, EpisodeMatch, GuideProgram};

pub mod absolute_number;
pub mod episode_code;
pub mod subtitle;

use absolute_number::AbsoluteNumberMatcher;
use episode_code::EpisodeCodeMatcher;
use subtitle::SubtitleMatcher;

/// Default chain order, highest precision first.
pub const DEFAULT_ORDER: &[&str] = &["episode-code", "absolute-number", "subtitle"];

/// One episode-matching strategy. A matcher never fails: inability to match
/// is the `None` value, not an error.
pub trait EpisodeMatcher {
    fn name(&self) -> &'static str;

    fn try_match(&self, series: &CatalogSeries, program: &GuideProgram) -> Option<EpisodeMatch>;
}

/// An ordered set of matchers; the first `Some` wins. Order is injected at
/// construction, not hard-coded, so callers can put higher-precision
/// strategies before noisier ones.
pub struct MatcherChain {
    matchers: Vec<Box<dyn EpisodeMatcher>>,
}

impl MatcherChain {
    pub fn new(matchers: Vec<Box<dyn EpisodeMatcher>>) -> Self {
        Self { matchers }
    }

    /// Build a chain from configured matcher names, in the given order.
    pub fn from_names(names: &[String]) -> Result<Self> {
        let mut matchers: Vec<Box<dyn EpisodeMatcher>> = Vec::with_capacity(names.len());
        for name in names {
            match name.as_str() {
                "episode-code" => matchers.push(Box::new(EpisodeCodeMatcher)),
                "absolute-number" => matchers.push(Box::new(AbsoluteNumberMatcher)),
                "subtitle" => matchers.push(Box::new(SubtitleMatcher)),
                other => bail!(
                    "unknown matcher {other:?} in configuration (known: {})",
                    DEFAULT_ORDER.join(", ")
                ),
            }
        }
        Ok(Self::new(matchers))
    }

    pub fn match_episode(
        &self,
        series: &CatalogSeries,
        program: &GuideProgram,
    ) -> Option<EpisodeMatch> {
        for matcher in &self.matchers {
            if let Some(found) = matcher.try_match(series, program) {
                debug!(
                    "matcher {} found S{:02}E{:02} for {:?}",
                    matcher.name(),
                    found.episode.season_number,
                    found.episode.episode_number,
                    program.title
                );
                return Some(found);
            }
            debug!("matcher {} found nothing for {:?}", matcher.name(), program.title);
        }
        None
    }
}

impl Default for MatcherChain {
    fn default() -> Self {
        let names: Vec<String> = DEFAULT_ORDER.iter().map(|s| s.to_string()).collect();
        Self::from_names(&names).expect("default matcher order is valid")
    }
}
