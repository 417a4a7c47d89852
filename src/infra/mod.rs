use crate::domain::errors::CatalogError;
use crate::domain::models::{CatalogSeries, SeriesSearchHit};

pub mod cache;
pub mod tvdb;

/// Capability surface of the episodic-metadata catalog. The enrichment core
/// only ever talks to this trait, so tests can substitute a deterministic
/// in-memory fake for the network-backed client.
pub trait CatalogClient {
    /// Free-text series search. An empty result is a normal outcome, not an
    /// error; candidate order is the catalog's ranking and is preserved.
    fn search_series(&mut self, title: &str) -> Result<Vec<SeriesSearchHit>, CatalogError>;

    /// Fetch one series by catalog identifier, optionally with its full
    /// episode list in catalog order.
    fn get_series(&mut self, id: u32, include_episodes: bool)
        -> Result<CatalogSeries, CatalogError>;
}
