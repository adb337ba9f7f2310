use crate::app_config::{AppConfig, GeocoderMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY").ok();

    let shopify_api_version = or_default("PICKUP_SHOPIFY_API_VERSION", "2024-10");
    let default_radius_km = parse_f64("PICKUP_DEFAULT_RADIUS_KM", "100")?;
    let geocoder_mode = parse_geocoder_mode(&or_default("PICKUP_GEOCODER_MODE", "auto"))?;
    let http_timeout_secs = parse_u64("PICKUP_HTTP_TIMEOUT_SECS", "20")?;
    let user_agent = or_default("PICKUP_USER_AGENT", "pickup/0.1 (click-and-collect)");
    let log_level = or_default("PICKUP_LOG_LEVEL", "info");

    Ok(AppConfig {
        google_maps_api_key,
        shopify_api_version,
        default_radius_km,
        geocoder_mode,
        http_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Parse a string into a `GeocoderMode` variant.
///
/// Unrecognized values are rejected rather than silently mapped to `Auto` —
/// a typo here would quietly change which providers get billed.
fn parse_geocoder_mode(s: &str) -> Result<GeocoderMode, ConfigError> {
    match s {
        "auto" => Ok(GeocoderMode::Auto),
        "google" => Ok(GeocoderMode::GoogleOnly),
        "nominatim" => Ok(GeocoderMode::NominatimOnly),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PICKUP_GEOCODER_MODE".to_string(),
            reason: format!("unknown mode \"{other}\" (expected auto, google, or nominatim)"),
        }),
    }
}
