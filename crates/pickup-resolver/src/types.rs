//! Request and response types for pickup resolution.

use serde::{Deserialize, Serialize};

use pickup_geo::GeoPoint;
use pickup_shopify::PostalAddress;

/// One pickup-resolution request, as received from the transport layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRequest {
    pub pincode: String,
    pub variant_id: Option<String>,
    pub radius_km: Option<f64>,
}

/// Stock state of a location for the requested variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    #[serde(rename = "instock")]
    InStock,
    #[serde(rename = "outofstock")]
    OutOfStock,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Location address with the geocoder's display string merged in.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedAddress {
    #[serde(flatten)]
    pub postal: PostalAddress,
    pub formatted: String,
}

/// One pickup candidate in the response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLocation {
    pub location_id: String,
    pub name: String,
    pub address: EnrichedAddress,
    pub coordinates: GeoPoint,
    /// Great-circle distance from the customer's geocoded point, rounded to
    /// two decimals.
    pub distance_km: f64,
    pub available: Option<i64>,
    pub status: StockStatus,
}

/// Echo of the resolved request inputs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupInput {
    pub pincode: String,
    pub geocoded: GeoPoint,
    pub radius_km: f64,
    pub variant_id: Option<String>,
    pub inventory_item_id: Option<String>,
}

/// The final ranked response.
///
/// `in_radius` and `out_of_radius` together contain every successfully
/// geocoded active location, each list ascending by distance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupResult {
    pub input: PickupInput,
    pub in_radius: Vec<EnrichedLocation>,
    pub out_of_radius: Vec<EnrichedLocation>,
}
