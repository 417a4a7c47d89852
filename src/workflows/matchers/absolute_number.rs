use super::EpisodeMatcher;
use crate::domain::models::{CatalogSeries, EpisodeMatch, GuideProgram};

/// Matches on the broadcast (series-wide) episode number when the recorder
/// supplied one. Zero means unknown and never matches.
pub struct AbsoluteNumberMatcher;

impl EpisodeMatcher for AbsoluteNumberMatcher {
    fn name(&self) -> &'static str {
        "absolute-number"
    }

    fn try_match(&self, series: &CatalogSeries, program: &GuideProgram) -> Option<EpisodeMatch> {
        if program.episode_number == 0 {
            return None;
        }
        series
            .episodes
            .iter()
            .find(|ep| ep.absolute_number == Some(program.episode_number))
            .map(|ep| EpisodeMatch {
                episode: ep.clone(),
                matched_by: self.name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CatalogEpisode;

    fn episode(season: u32, number: u32, absolute: Option<u32>, name: &str) -> CatalogEpisode {
        CatalogEpisode {
            season_number: season,
            episode_number: number,
            absolute_number: absolute,
            name: name.to_string(),
            aired: None,
        }
    }

    fn sample_series() -> CatalogSeries {
        CatalogSeries {
            id: 75978,
            name: "Family Guy".to_string(),
            episodes: vec![
                episode(4, 22, Some(73), "Sibling Rivalry"),
                episode(4, 23, Some(74), "Deep Throats"),
                episode(0, 1, None, "A Very Special Special"),
            ],
        }
    }

    #[test]
    fn matches_on_absolute_number() {
        let program = GuideProgram::new("Family Guy", "", 74, "");
        let found = AbsoluteNumberMatcher.try_match(&sample_series(), &program).unwrap();
        assert_eq!(found.episode.season_number, 4);
        assert_eq!(found.episode.episode_number, 23);
        assert_eq!(found.matched_by, "absolute-number");
    }

    #[test]
    fn zero_means_unknown() {
        let program = GuideProgram::new("Family Guy", "", 0, "");
        assert!(AbsoluteNumberMatcher.try_match(&sample_series(), &program).is_none());
    }

    #[test]
    fn episodes_without_absolute_number_are_skipped() {
        let program = GuideProgram::new("Family Guy", "", 999, "");
        assert!(AbsoluteNumberMatcher.try_match(&sample_series(), &program).is_none());
    }
}
