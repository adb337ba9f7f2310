//! Domain types mirrored from the Shopify Admin GraphQL schema.

use serde::{Deserialize, Serialize};

/// A shop fulfillment location, as returned by the `locations` connection.
///
/// Read-only snapshot; held transiently in the location-list cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentLocation {
    /// Global id (`gid://shopify/Location/...`).
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub fulfills_online_orders: bool,
    #[serde(default)]
    pub address: PostalAddress,
}

/// Street address of a fulfillment location. Every field is optional —
/// merchants routinely leave parts blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}
