//! Primary provider: Google Maps Geocoding API.
//!
//! Responses carry a `status` string plus a `results` array; anything other
//! than `"OK"` with at least one result is treated as a step failure for the
//! chain to handle.

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::classify::CountryHint;
use crate::error::GeocodeError;
use crate::types::GeoPoint;

pub(crate) const PROVIDER: &str = "google";

/// Regional bias applied to freeform lookups. Structured postal lookups scope
/// by the classified country instead.
const FREEFORM_REGION: &str = "in";

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

/// Structured lookup for a classified postcode, scoped to its country.
pub(crate) async fn lookup_postal(
    client: &Client,
    base_url: &str,
    api_key: Option<&str>,
    postal_code: &str,
    hint: CountryHint,
) -> Result<GeoPoint, GeocodeError> {
    let components = format!("postal_code:{postal_code}|country:{}", hint.iso2);
    fetch(client, base_url, api_key, &[("components", components.as_str())]).await
}

/// Freeform address lookup with a light regional bias.
pub(crate) async fn lookup_freeform(
    client: &Client,
    base_url: &str,
    api_key: Option<&str>,
    query: &str,
) -> Result<GeoPoint, GeocodeError> {
    fetch(
        client,
        base_url,
        api_key,
        &[("address", query), ("region", FREEFORM_REGION)],
    )
    .await
}

async fn fetch(
    client: &Client,
    base_url: &str,
    api_key: Option<&str>,
    params: &[(&str, &str)],
) -> Result<GeoPoint, GeocodeError> {
    let Some(key) = api_key else {
        return Err(GeocodeError::Provider {
            provider: PROVIDER,
            reason: "GOOGLE_MAPS_API_KEY is not configured".to_string(),
        });
    };

    let mut url = Url::parse(base_url).map_err(|e| GeocodeError::Provider {
        provider: PROVIDER,
        reason: format!("invalid base URL '{base_url}': {e}"),
    })?;
    for &(name, value) in params {
        url.query_pairs_mut().append_pair(name, value);
    }
    url.query_pairs_mut().append_pair("key", key);

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(GeocodeError::Provider {
            provider: PROVIDER,
            reason: format!("unexpected HTTP status {}", status.as_u16()),
        });
    }

    let body = response.json::<serde_json::Value>().await?;
    let parsed: GoogleResponse =
        serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
            context: "google geocode response".to_string(),
            source: e,
        })?;

    if parsed.status != "OK" {
        let reason = match parsed.error_message {
            Some(message) => format!("{}: {message}", parsed.status),
            None => parsed.status,
        };
        return Err(GeocodeError::Provider {
            provider: PROVIDER,
            reason,
        });
    }

    let Some(first) = parsed.results.into_iter().next() else {
        return Err(GeocodeError::Provider {
            provider: PROVIDER,
            reason: "OK status with empty results".to_string(),
        });
    };

    Ok(GeoPoint {
        lat: first.geometry.location.lat,
        lng: first.geometry.location.lng,
        formatted: first.formatted_address,
    })
}
