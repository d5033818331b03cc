//! The seam between location resolution and a concrete geocoding service.

use activecalls_core::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GeocodeError;

/// Structured address returned by reverse geocoding.
///
/// Only the fields the intersection heuristic reads are kept; anything else
/// in the service response is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressComponents {
    pub road: Option<String>,
    pub street: Option<String>,
    pub pedestrian: Option<String>,
    pub suburb: Option<String>,
}

/// A forward and reverse geocoding service.
///
/// Each method issues at most one request. Implementations do no throttling
/// of their own.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a free-text query to the best match, or `None` when the
    /// service has no match.
    async fn forward(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError>;

    /// Resolves coordinates to a structured address, or `None` when the
    /// service returns no address block.
    async fn reverse(&self, at: Coordinates) -> Result<Option<AddressComponents>, GeocodeError>;
}
