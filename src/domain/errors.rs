use thiserror::Error;

/// The catalog's I/O failed (network, auth, malformed response). Retry
/// policy belongs to the catalog client; the core propagates this unchanged.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Unavailable(format!("malformed catalog response: {err}"))
    }
}

/// Hard failures of the enrichment pipeline. An episode that cannot be
/// matched within a known series is NOT an error; it is reported as a
/// `None` match and the program's `enriched` flag stays false.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("no catalog series found for title {0:?}")]
    SeriesNotFound(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
