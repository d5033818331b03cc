use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream page carrying the active-calls table.
    pub source_url: String,
    pub feed_timeout_secs: u64,
    /// Base URL of the Nominatim-compatible geocoding service.
    pub geocoder_url: String,
    pub geocoder_user_agent: String,
    pub geocode_timeout_secs: u64,
    /// Minimum gap between two geocoding requests, in milliseconds.
    pub geocode_delay_ms: u64,
    /// Appended to every forward-geocoding query, e.g. `"Richmond, VA"`.
    pub city_context: String,
    pub output_path: PathBuf,
    pub log_level: String,
}
