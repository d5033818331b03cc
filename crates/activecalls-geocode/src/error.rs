use thiserror::Error;

/// Errors from a geocoding service call.
///
/// These never escape the resolvers in [`crate::resolve`]; they are logged
/// and converted to absent results there.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("geocoder returned an unusable coordinate: {0:?}")]
    InvalidCoordinate(String),

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Why an `LL(lon,lat)` location could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateParseError {
    #[error("no LL(lon,lat) tag in {0:?}")]
    NotTagged(String),

    #[error("malformed DMS value {value:?}: {reason}")]
    MalformedComponents { value: String, reason: String },
}
