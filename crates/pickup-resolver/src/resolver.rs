//! Orchestration of the pickup-resolution pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;

use pickup_geo::{distance_km, GeoPoint, Geocoder};
use pickup_shopify::{FulfillmentLocation, PostalAddress, ShopifyGqlClient};

use crate::caches::{raw_geocode_key, PickupCaches};
use crate::error::PickupError;
use crate::types::{
    EnrichedAddress, EnrichedLocation, PickupInput, PickupRequest, PickupResult, StockStatus,
};

/// Hardcoded fallback when neither the request nor the configuration supplies
/// a usable radius.
const FALLBACK_RADIUS_KM: f64 = 100.0;

/// Resolves pickup requests for one shop.
///
/// Owns the per-request Shopify transport; the geocoder and cache service are
/// shared across requests and threaded in explicitly.
pub struct PickupResolver {
    geocoder: Arc<Geocoder>,
    shopify: ShopifyGqlClient,
    caches: Arc<PickupCaches>,
    default_radius_km: f64,
}

impl PickupResolver {
    #[must_use]
    pub fn new(
        geocoder: Arc<Geocoder>,
        shopify: ShopifyGqlClient,
        caches: Arc<PickupCaches>,
        default_radius_km: f64,
    ) -> Self {
        Self {
            geocoder,
            shopify,
            caches,
            default_radius_km,
        }
    }

    /// Runs the full pipeline: validate, geocode the pincode, fetch
    /// locations, join inventory, geocode every location concurrently,
    /// compute distances, and partition the result.
    ///
    /// # Errors
    ///
    /// - [`PickupError::InvalidPincode`] — pincode is not exactly 4 or 6
    ///   decimal digits after trimming.
    /// - Geocode errors for the customer pincode, verbatim.
    /// - Shopify errors from the location or inventory lookups, verbatim.
    ///
    /// Per-location geocode failures never error: the affected location is
    /// dropped from the output instead.
    pub async fn resolve_pickup(&self, request: &PickupRequest) -> Result<PickupResult, PickupError> {
        let pincode = validate_pincode(&request.pincode)?;
        let radius_km = self.effective_radius(request.radius_km);

        let origin = self.cached_geocode(&pincode).await?;
        let locations = self.active_locations().await?;

        // Inventory resolution and the per-location geocode fan-out are
        // independent; run them concurrently and join before assembling.
        let inventory_fut = async {
            match request.variant_id.as_deref() {
                Some(variant) => {
                    let item_id = self.shopify.resolve_inventory_item(variant).await?;
                    let quantities = self.shopify.quantities_by_location(&item_id).await?;
                    Ok::<_, PickupError>(Some((item_id, quantities)))
                }
                None => Ok(None),
            }
        };
        let coords_fut = join_all(
            locations
                .iter()
                .map(|location| self.location_coordinates(location)),
        );

        let (inventory, coords) = tokio::join!(inventory_fut, coords_fut);
        let inventory = inventory?;
        let quantities = inventory.as_ref().map(|(_, q)| q);

        let (in_radius, out_of_radius) =
            partition_by_radius(&origin, radius_km, &locations, coords, quantities);

        Ok(PickupResult {
            input: PickupInput {
                pincode,
                geocoded: origin,
                radius_km,
                variant_id: request.variant_id.clone(),
                inventory_item_id: inventory.map(|(id, _)| id),
            },
            in_radius,
            out_of_radius,
        })
    }

    fn effective_radius(&self, requested: Option<f64>) -> f64 {
        if let Some(radius) = requested {
            if radius.is_finite() {
                return radius;
            }
        }
        if self.default_radius_km.is_finite() {
            return self.default_radius_km;
        }
        FALLBACK_RADIUS_KM
    }

    /// Cache-first geocode. Only successful resolutions are stored, so a
    /// transient provider outage cannot poison the cache.
    async fn cached_geocode(&self, query: &str) -> Result<GeoPoint, PickupError> {
        let key = raw_geocode_key(query);
        if let Some(hit) = self.caches.geocode.get(&key).await {
            return Ok(hit);
        }
        let point = self.geocoder.geocode(query).await?;
        self.caches.geocode.insert(key, point.clone()).await;
        Ok(point)
    }

    /// Cache-first fetch of the shop's active locations.
    async fn active_locations(&self) -> Result<Vec<FulfillmentLocation>, PickupError> {
        let shop = self.shopify.shop().to_owned();
        if let Some(hit) = self.caches.location_lists.get(&shop).await {
            return Ok(hit);
        }
        let locations = self.shopify.list_active_locations().await?;
        self.caches
            .location_lists
            .insert(shop, locations.clone())
            .await;
        Ok(locations)
    }

    /// Resolves one location's coordinates, degrading to the unresolved
    /// sentinel instead of failing.
    ///
    /// Order: coordinate cache, composed address, bare postal code. The
    /// sentinel is cached too, so a store with a hopeless address doesn't
    /// re-trigger live lookups on every request.
    async fn location_coordinates(&self, location: &FulfillmentLocation) -> GeoPoint {
        if let Some(hit) = self.caches.location_coords.get(&location.id).await {
            return hit;
        }

        let composed = compose_address(&location.address);
        match self.cached_geocode(&composed).await {
            Ok(point) => {
                self.caches
                    .location_coords
                    .insert(location.id.clone(), point.clone())
                    .await;
                return point;
            }
            Err(err) => {
                tracing::debug!(
                    location_id = %location.id,
                    address = %composed,
                    error = %err,
                    "address geocode failed; retrying with postal code"
                );
            }
        }

        if let Some(zip) = location
            .address
            .zip
            .as_deref()
            .map(str::trim)
            .filter(|zip| !zip.is_empty())
        {
            match self.cached_geocode(zip).await {
                Ok(point) => {
                    self.caches
                        .location_coords
                        .insert(location.id.clone(), point.clone())
                        .await;
                    return point;
                }
                Err(err) => {
                    tracing::debug!(
                        location_id = %location.id,
                        zip,
                        error = %err,
                        "postal-code geocode failed"
                    );
                }
            }
        }

        tracing::warn!(
            location_id = %location.id,
            name = %location.name,
            "geocoding exhausted; location will be dropped from results"
        );
        let sentinel = GeoPoint::unresolved();
        self.caches
            .location_coords
            .insert(location.id.clone(), sentinel.clone())
            .await;
        sentinel
    }
}

/// Validates the customer-supplied pincode: exactly 4 or 6 decimal digits
/// after trimming.
fn validate_pincode(raw: &str) -> Result<String, PickupError> {
    let trimmed = raw.trim();
    let valid = matches!(trimmed.len(), 4 | 6) && trimmed.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(trimmed.to_owned())
    } else {
        Err(PickupError::InvalidPincode {
            pincode: raw.to_owned(),
        })
    }
}

/// Joins the non-empty address parts with commas for freeform geocoding.
fn compose_address(address: &PostalAddress) -> String {
    [
        address.address1.as_deref(),
        address.address2.as_deref(),
        address.city.as_deref(),
        address.province.as_deref(),
        address.country.as_deref(),
        address.zip.as_deref(),
    ]
    .iter()
    .filter_map(|part| part.map(str::trim))
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn stock_status(available: Option<i64>) -> StockStatus {
    match available {
        Some(quantity) if quantity > 0 => StockStatus::InStock,
        Some(_) => StockStatus::OutOfStock,
        None => StockStatus::Unknown,
    }
}

/// The distance/inventory join: drops unresolved locations, enriches the
/// rest, and splits them on the radius with each side ascending by distance.
fn partition_by_radius(
    origin: &GeoPoint,
    radius_km: f64,
    locations: &[FulfillmentLocation],
    coords: Vec<GeoPoint>,
    quantities: Option<&HashMap<String, i64>>,
) -> (Vec<EnrichedLocation>, Vec<EnrichedLocation>) {
    let mut in_radius = Vec::new();
    let mut out_of_radius = Vec::new();

    for (location, point) in locations.iter().zip(coords) {
        if point.is_unresolved() {
            continue;
        }

        let distance = round_two(distance_km(origin, &point));
        let available = quantities.and_then(|map| map.get(&location.id).copied());

        let enriched = EnrichedLocation {
            location_id: location.id.clone(),
            name: location.name.clone(),
            address: EnrichedAddress {
                postal: location.address.clone(),
                formatted: point.formatted.clone(),
            },
            coordinates: point,
            distance_km: distance,
            available,
            status: stock_status(available),
        };

        if distance <= radius_km {
            in_radius.push(enriched);
        } else {
            out_of_radius.push(enriched);
        }
    }

    let by_distance = |a: &EnrichedLocation, b: &EnrichedLocation| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    };
    in_radius.sort_by(by_distance);
    out_of_radius.sort_by(by_distance);

    (in_radius, out_of_radius)
}
