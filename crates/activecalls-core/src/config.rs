use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_SOURCE_URL: &str =
    "https://apps.richmondgov.com/applications/activecalls/Home/ActiveCalls";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_GEOCODER_USER_AGENT: &str = "richmond_incident_mapper_v1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// config pointed at the Richmond active-calls page and public Nominatim.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let non_blank = |var: &str, default: &str| -> Result<String, ConfigError> {
        let value = or_default(var, default);
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be blank".to_string(),
            });
        }
        Ok(value)
    };

    let source_url = non_blank("ACTIVECALLS_SOURCE_URL", DEFAULT_SOURCE_URL)?;
    let feed_timeout_secs = positive_u64("ACTIVECALLS_FEED_TIMEOUT_SECS", "10")?;

    let geocoder_url = non_blank("ACTIVECALLS_GEOCODER_URL", DEFAULT_GEOCODER_URL)?;
    // Nominatim's usage policy rejects requests without an identifying agent.
    let geocoder_user_agent =
        non_blank("ACTIVECALLS_GEOCODER_USER_AGENT", DEFAULT_GEOCODER_USER_AGENT)?;
    let geocode_timeout_secs = positive_u64("ACTIVECALLS_GEOCODE_TIMEOUT_SECS", "5")?;
    let geocode_delay_ms = parse_u64("ACTIVECALLS_GEOCODE_DELAY_MS", "1100")?;
    let city_context = non_blank("ACTIVECALLS_CITY_CONTEXT", "Richmond, VA")?;

    let output_path = PathBuf::from(non_blank("ACTIVECALLS_OUTPUT_PATH", "incidents.json")?);
    let log_level = or_default("ACTIVECALLS_LOG_LEVEL", "info");

    Ok(AppConfig {
        source_url,
        feed_timeout_secs,
        geocoder_url,
        geocoder_user_agent,
        geocode_timeout_secs,
        geocode_delay_ms,
        city_context,
        output_path,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
