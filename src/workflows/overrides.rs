use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

/// A raw override entry as it appears in the configuration file, before the
/// pattern and target forms are parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideEntry {
    pub pattern: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub enum OverridePattern {
    /// Verbatim, case-sensitive title match.
    Exact(String),
    /// Evaluated against the unmodified title, declaration order.
    Regex(Regex),
}

#[derive(Debug, Clone)]
pub enum OverrideTarget {
    /// Resolve directly to this catalog id, no search.
    SeriesId(u32),
    /// Re-resolve under this replacement title.
    Title(String),
}

#[derive(Debug, Clone)]
pub struct SeriesOverride {
    pub pattern: OverridePattern,
    pub target: OverrideTarget,
}

/// The user-configured title correction table. Entries are parsed once at
/// configuration load; lookups never re-inspect the raw string forms.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: Vec<SeriesOverride>,
}

impl OverrideTable {
    pub fn parse(raw: &[OverrideEntry]) -> Result<Self> {
        let mut entries = Vec::with_capacity(raw.len());
        for entry in raw {
            let pattern = match entry.pattern.strip_prefix("regex=") {
                Some(expr) => OverridePattern::Regex(
                    Regex::new(expr)
                        .with_context(|| format!("invalid series override regex {expr:?}"))?,
                ),
                None => OverridePattern::Exact(entry.pattern.clone()),
            };
            let target = match entry.target.strip_prefix("id=") {
                Some(id) => OverrideTarget::SeriesId(id.parse().with_context(|| {
                    format!("invalid series id in override target {:?}", entry.target)
                })?),
                None => OverrideTarget::Title(entry.target.clone()),
            };
            entries.push(SeriesOverride { pattern, target });
        }
        Ok(Self { entries })
    }

    /// Find the single override applying to `title`. Exact entries win over
    /// regex entries; among regex entries the first declared match wins.
    pub fn lookup(&self, title: &str) -> Option<&OverrideTarget> {
        for entry in &self.entries {
            if let OverridePattern::Exact(key) = &entry.pattern {
                if key == title {
                    return Some(&entry.target);
                }
            }
        }
        for entry in &self.entries {
            if let OverridePattern::Regex(re) = &entry.pattern {
                if re.is_match(title) {
                    return Some(&entry.target);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pattern: &str, target: &str) -> OverrideEntry {
        OverrideEntry {
            pattern: pattern.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn parses_direct_id_target() {
        let table = OverrideTable::parse(&[entry("Blue Bloods", "id=164981")]).unwrap();
        match table.lookup("Blue Bloods") {
            Some(OverrideTarget::SeriesId(id)) => assert_eq!(*id, 164981),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn parses_replacement_title_target() {
        let table =
            OverrideTable::parse(&[entry("Stargate Atlantis123", "Stargate Atlantis")]).unwrap();
        match table.lookup("Stargate Atlantis123") {
            Some(OverrideTarget::Title(t)) => assert_eq!(t, "Stargate Atlantis"),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn regex_entry_matches_unmodified_title() {
        let table =
            OverrideTable::parse(&[entry("regex=Stargate Atl.*", "Stargate Atlantis")]).unwrap();
        assert!(table.lookup("Stargate Atlantis123").is_some());
        assert!(table.lookup("Stargate Universe").is_none());
    }

    #[test]
    fn exact_entry_beats_regex_entry() {
        let table = OverrideTable::parse(&[
            entry("regex=Stargate.*", "id=1"),
            entry("Stargate Atlantis", "id=2"),
        ])
        .unwrap();
        match table.lookup("Stargate Atlantis") {
            Some(OverrideTarget::SeriesId(id)) => assert_eq!(*id, 2),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn first_declared_regex_wins() {
        let table = OverrideTable::parse(&[
            entry("regex=Stargate.*", "id=1"),
            entry("regex=Stargate Atl.*", "id=2"),
        ])
        .unwrap();
        match table.lookup("Stargate Atlantis") {
            Some(OverrideTarget::SeriesId(id)) => assert_eq!(*id, 1),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let table = OverrideTable::parse(&[entry("Blue Bloods", "id=164981")]).unwrap();
        assert!(table.lookup("blue bloods").is_none());
    }

    #[test]
    fn invalid_regex_is_rejected_at_parse() {
        assert!(OverrideTable::parse(&[entry("regex=(", "id=1")]).is_err());
    }

    #[test]
    fn invalid_id_target_is_rejected_at_parse() {
        assert!(OverrideTable::parse(&[entry("Blue Bloods", "id=not-a-number")]).is_err());
    }
}
