/// Which geocoding providers the resolution chain is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocoderMode {
    /// Google first, Nominatim as fallback.
    Auto,
    /// Google only; a Google failure is surfaced instead of swallowed.
    GoogleOnly,
    /// Skip Google entirely and go straight to Nominatim.
    NominatimOnly,
}

impl std::fmt::Display for GeocoderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocoderMode::Auto => write!(f, "auto"),
            GeocoderMode::GoogleOnly => write!(f, "google"),
            GeocoderMode::NominatimOnly => write!(f, "nominatim"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub google_maps_api_key: Option<String>,
    pub shopify_api_version: String,
    pub default_radius_km: f64,
    pub geocoder_mode: GeocoderMode,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("shopify_api_version", &self.shopify_api_version)
            .field("default_radius_km", &self.default_radius_km)
            .field("geocoder_mode", &self.geocoder_mode)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
