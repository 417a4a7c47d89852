use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::workflows::matchers;
use crate::workflows::overrides::{OverrideEntry, OverrideTable};

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    tvdb_api_key: Option<String>,
    language: Option<String>,
    cache_dir: Option<PathBuf>,
    update_subtitles: Option<bool>,
    update_matched_episodes: Option<bool>,
    matchers: Option<Vec<String>>,
    #[serde(default)]
    series_overrides: Vec<OverrideEntry>,
}

/// Loaded, validated configuration. Override patterns and targets are
/// parsed into their final forms here, never at lookup time.
#[derive(Debug, Clone)]
pub struct Config {
    pub tvdb_api_key: String,
    /// Three-letter catalog language code, forwarded opaquely to TVDB.
    pub language: String,
    pub cache_dir: PathBuf,
    /// Overwrite a subtitle the recorder already supplied.
    pub update_subtitles: bool,
    /// Rewrite numbering even when the recorded code already matches.
    pub update_matched_episodes: bool,
    /// Matcher chain order; see `matchers::DEFAULT_ORDER`.
    pub matchers: Vec<String>,
    pub overrides: OverrideTable,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => env::var("GUIDE_ENRICHER_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_config_path()),
        };

        let file = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        } else {
            ConfigFile::default()
        };

        Self::from_file(file, &path)
    }

    fn from_file(file: ConfigFile, path: &Path) -> Result<Self> {
        // Environment wins over the config file, same as the API key
        // handling in the original tool.
        let tvdb_api_key = match env::var("TVDB_API_KEY").ok().or(file.tvdb_api_key) {
            Some(key) => key,
            None => bail!(
                "TVDB API key not found. Set TVDB_API_KEY or add tvdb_api_key to {}",
                path.display()
            ),
        };

        let overrides = OverrideTable::parse(&file.series_overrides)?;

        let matcher_names = file.matchers.unwrap_or_else(|| {
            matchers::DEFAULT_ORDER.iter().map(|s| s.to_string()).collect()
        });
        // Surface a bad matcher name at load, not mid-run.
        matchers::MatcherChain::from_names(&matcher_names)?;

        Ok(Self {
            tvdb_api_key,
            language: file.language.unwrap_or_else(|| "eng".to_string()),
            cache_dir: file.cache_dir.unwrap_or_else(default_config_dir),
            update_subtitles: file.update_subtitles.unwrap_or(true),
            update_matched_episodes: file.update_matched_episodes.unwrap_or(true),
            matchers: matcher_names,
            overrides,
        })
    }
}

fn default_config_dir() -> PathBuf {
    xdir::config()
        .map(|path| path.join("guide-enricher"))
        // If the standard path could not be found (e.g. `$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}
