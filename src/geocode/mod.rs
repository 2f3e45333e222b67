//! Free-text place resolution against a Nominatim-style search API.
//!
//! The service's own relevance ranking is trusted: the first candidate wins.
//! Zero candidates and unparseable coordinates both resolve to `None`; only
//! transport problems are errors.

mod nominatim;

pub use nominatim::{NominatimClient, SearchCandidate};

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::PlaceResult;

/// Geocoding transport failures.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Could not reach the service or read its body.
    #[error("Geocoding request for '{query}' failed: {source}")]
    Request {
        query: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-2xx status.
    #[error("Geocoding service returned {status} for '{query}'")]
    Status { query: String, status: u16 },

    /// Lookup did not finish within the allotted time.
    #[error("Geocoding timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// Resolves a place name to its best match.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Option<PlaceResult>, GeocodeError>;
}
