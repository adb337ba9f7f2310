//! Secondary provider: OpenStreetMap Nominatim.
//!
//! Supports a structured postal-code search and a freeform text search.
//! Candidates arrive as an array of `{lat, lon, display_name}` with
//! string-encoded coordinates. Nominatim's usage policy wants an identifying
//! `User-Agent` (set client-wide) and we also send a locale preference so
//! display names come back in English.

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::classify::CountryHint;
use crate::error::GeocodeError;
use crate::types::GeoPoint;

pub(crate) const PROVIDER: &str = "nominatim";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Structured postal-code search, scoped to the classified country.
pub(crate) async fn lookup_postal(
    client: &Client,
    base_url: &str,
    postal_code: &str,
    hint: CountryHint,
) -> Result<GeoPoint, GeocodeError> {
    fetch(
        client,
        base_url,
        &[
            ("postalcode", postal_code),
            ("countrycodes", hint.nominatim),
        ],
    )
    .await
}

/// Freeform search; the country hint is applied only for numeric input.
pub(crate) async fn lookup_freeform(
    client: &Client,
    base_url: &str,
    query: &str,
    hint: Option<CountryHint>,
) -> Result<GeoPoint, GeocodeError> {
    match hint {
        Some(h) => fetch(client, base_url, &[("q", query), ("countrycodes", h.nominatim)]).await,
        None => fetch(client, base_url, &[("q", query)]).await,
    }
}

async fn fetch(
    client: &Client,
    base_url: &str,
    params: &[(&str, &str)],
) -> Result<GeoPoint, GeocodeError> {
    let mut url = Url::parse(base_url).map_err(|e| GeocodeError::Provider {
        provider: PROVIDER,
        reason: format!("invalid base URL '{base_url}': {e}"),
    })?;
    for &(name, value) in params {
        url.query_pairs_mut().append_pair(name, value);
    }
    url.query_pairs_mut()
        .append_pair("format", "json")
        .append_pair("limit", "1");

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT_LANGUAGE, "en")
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(GeocodeError::Provider {
            provider: PROVIDER,
            reason: format!("unexpected HTTP status {}", status.as_u16()),
        });
    }

    let body = response.json::<serde_json::Value>().await?;
    let places: Vec<NominatimPlace> =
        serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
            context: "nominatim search response".to_string(),
            source: e,
        })?;

    let Some(place) = places.into_iter().next() else {
        return Err(GeocodeError::Provider {
            provider: PROVIDER,
            reason: "no matching places".to_string(),
        });
    };

    let lat = place.lat.parse::<f64>();
    let lng = place.lon.parse::<f64>();
    let (Ok(lat), Ok(lng)) = (lat, lng) else {
        return Err(GeocodeError::Provider {
            provider: PROVIDER,
            reason: format!(
                "unparseable coordinates lat={} lon={}",
                place.lat, place.lon
            ),
        });
    };

    Ok(GeoPoint {
        lat,
        lng,
        formatted: place.display_name,
    })
}
