//! Upstream collaborator: fetches the active-calls page and extracts its
//! incident table into [`activecalls_core::IncidentRow`]s.

pub mod client;
pub mod error;
pub mod table;

pub use client::{fetch_incident_rows, FeedClient};
pub use error::FeedError;
pub use table::{parse_incident_rows, MIN_CELLS};
