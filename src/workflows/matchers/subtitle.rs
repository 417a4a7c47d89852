use regex::Regex;
use std::sync::LazyLock;

use super::EpisodeMatcher;
use crate::domain::models::{CatalogSeries, EpisodeMatch, GuideProgram};

static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("invalid parenthetical pattern"));

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+\s*$").expect("invalid numeric suffix pattern"));

/// Normalize an episode title for comparison: lowercase, trimmed, with
/// trailing parenthetical annotations and bare numeric suffixes stripped.
/// Local recordings often append the broadcast number to the subtitle,
/// e.g. "Deep Throats (74)".
fn normalize(title: &str) -> String {
    let mut current = title.trim().to_lowercase();
    loop {
        let without_paren = TRAILING_PAREN.replace(current.as_str(), "");
        let next = TRAILING_NUMBER
            .replace(without_paren.as_ref(), "")
            .trim()
            .to_string();
        if next.is_empty() || next == current {
            return current;
        }
        current = next;
    }
}

/// Matches the recorded subtitle against catalog episode titles under a
/// normalized comparison. The noisiest signal, so it normally runs last.
pub struct SubtitleMatcher;

impl EpisodeMatcher for SubtitleMatcher {
    fn name(&self) -> &'static str {
        "subtitle"
    }

    fn try_match(&self, series: &CatalogSeries, program: &GuideProgram) -> Option<EpisodeMatch> {
        if program.sub_title.is_empty() {
            return None;
        }
        let wanted = normalize(&program.sub_title);
        if wanted.is_empty() {
            return None;
        }
        series
            .episodes
            .iter()
            .find(|ep| !ep.name.is_empty() && normalize(&ep.name) == wanted)
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

    fn episode(season: u32, number: u32, name: &str) -> CatalogEpisode {
        CatalogEpisode {
            season_number: season,
            episode_number: number,
            absolute_number: None,
            name: name.to_string(),
            aired: None,
        }
    }

    fn sample_series() -> CatalogSeries {
        CatalogSeries {
            id: 75978,
            name: "Family Guy".to_string(),
            episodes: vec![
                episode(4, 19, "Brian Sings and Swings"),
                episode(4, 23, "Deep Throats"),
            ],
        }
    }

    #[test]
    fn strips_parenthetical_broadcast_number() {
        let program = GuideProgram::new("Family Guy", "Deep Throats (74)", 0, "");
        let found = SubtitleMatcher.try_match(&sample_series(), &program).unwrap();
        assert_eq!(found.episode.episode_number, 23);
        assert_eq!(found.matched_by, "subtitle");
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let program = GuideProgram::new("Family Guy", "brian sings and swings", 0, "");
        let found = SubtitleMatcher.try_match(&sample_series(), &program).unwrap();
        assert_eq!(found.episode.episode_number, 19);
    }

    #[test]
    fn strips_bare_numeric_suffix() {
        let program = GuideProgram::new("Family Guy", "Deep Throats 74", 0, "");
        let found = SubtitleMatcher.try_match(&sample_series(), &program).unwrap();
        assert_eq!(found.episode.episode_number, 23);
    }

    #[test]
    fn empty_subtitle_is_no_match() {
        let program = GuideProgram::new("Family Guy", "", 0, "");
        assert!(SubtitleMatcher.try_match(&sample_series(), &program).is_none());
    }

    #[test]
    fn unknown_subtitle_is_no_match() {
        let program = GuideProgram::new("Family Guy", "Road to Nowhere", 0, "");
        assert!(SubtitleMatcher.try_match(&sample_series(), &program).is_none());
    }

    #[test]
    fn numeric_only_subtitle_does_not_normalize_to_nothing() {
        // All-numeric subtitles must not collapse to an empty string and
        // accidentally match everything.
        let mut s = sample_series();
        s.episodes.push(episode(2, 10, "42"));
        let program = GuideProgram::new("Some Show", "42", 0, "");
        let found = SubtitleMatcher.try_match(&s, &program).unwrap();
        assert_eq!(found.episode.season_number, 2);
    }

    #[test]
    fn normalize_keeps_interior_parentheticals() {
        assert_eq!(normalize("The Fix (153)"), "the fix");
        assert_eq!(
            normalize("Chuck Versus the Last Details (83)"),
            "chuck versus the last details"
        );
        assert_eq!(normalize("(500) Days"), "(500) days");
    }
}
