//! Provider fallback chain for resolving postcodes and addresses.

use std::time::Duration;

use reqwest::Client;

use pickup_core::GeocoderMode;

use crate::classify::country_hint_for;
use crate::error::GeocodeError;
use crate::types::GeoPoint;
use crate::{google, nominatim};

const GOOGLE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Resolves free-text or postcode queries to coordinates.
///
/// Tries Google first (country-scoped when the input classifies as a
/// postcode), then Nominatim in structured postal mode, then Nominatim
/// freeform, short-circuiting on the first match. The mode switch can pin the
/// chain to a single provider; only then does a provider failure propagate —
/// inside the full chain a failed step just advances to the next strategy.
pub struct Geocoder {
    client: Client,
    api_key: Option<String>,
    mode: GeocoderMode,
    google_base_url: String,
    nominatim_base_url: String,
}

impl Geocoder {
    /// Creates a geocoder pointed at the production provider endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<String>,
        mode: GeocoderMode,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_key,
            mode,
            google_base_url: GOOGLE_BASE_URL.to_string(),
            nominatim_base_url: NOMINATIM_BASE_URL.to_string(),
        })
    }

    /// Repoints both providers at custom base URLs (for testing with wiremock).
    #[must_use]
    pub fn with_base_urls(mut self, google_base_url: &str, nominatim_base_url: &str) -> Self {
        self.google_base_url = google_base_url.to_string();
        self.nominatim_base_url = nominatim_base_url.to_string();
        self
    }

    /// Resolves a query to a [`GeoPoint`] through the provider chain.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NoResult`] — every permitted strategy exhausted
    ///   without a match.
    /// - Any provider error, verbatim, when the mode pins the chain to Google
    ///   only.
    pub async fn geocode(&self, query: &str) -> Result<GeoPoint, GeocodeError> {
        let query = query.trim();
        let hint = country_hint_for(query);

        if self.mode != GeocoderMode::NominatimOnly {
            let attempt = match hint {
                Some(h) => {
                    google::lookup_postal(
                        &self.client,
                        &self.google_base_url,
                        self.api_key.as_deref(),
                        query,
                        h,
                    )
                    .await
                }
                None => {
                    google::lookup_freeform(
                        &self.client,
                        &self.google_base_url,
                        self.api_key.as_deref(),
                        query,
                    )
                    .await
                }
            };
            match attempt {
                Ok(point) => return Ok(point),
                Err(err) if self.mode == GeocoderMode::GoogleOnly => return Err(err),
                Err(err) => {
                    tracing::debug!(query, error = %err, "google lookup failed; falling back");
                }
            }
        }

        if let Some(h) = hint {
            match nominatim::lookup_postal(&self.client, &self.nominatim_base_url, query, h).await
            {
                Ok(point) => return Ok(point),
                Err(err) => {
                    tracing::debug!(
                        query,
                        error = %err,
                        "nominatim postal lookup failed; trying freeform"
                    );
                }
            }
        }

        match nominatim::lookup_freeform(&self.client, &self.nominatim_base_url, query, hint).await
        {
            Ok(point) => return Ok(point),
            Err(err) => {
                tracing::debug!(query, error = %err, "nominatim freeform lookup failed");
            }
        }

        Err(GeocodeError::NoResult {
            query: query.to_string(),
        })
    }
}
