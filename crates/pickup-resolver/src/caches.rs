//! The three bounded caches backing pickup resolution.
//!
//! Constructed explicitly and passed into the resolver rather than living as
//! module-level singletons, so tests get isolated instances and ownership of
//! the shared state is visible at the call site. All three live for the
//! process lifetime and are never persisted.

use std::time::Duration;

use pickup_core::TtlCache;
use pickup_geo::GeoPoint;
use pickup_shopify::FulfillmentLocation;

/// Raw geocode results keyed by normalized query string.
const GEOCODE_CAPACITY: usize = 1000;
const GEOCODE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolved coordinates keyed by store-location id. Store addresses move
/// rarely, hence the long TTL.
const LOCATION_COORDS_CAPACITY: usize = 2000;
const LOCATION_COORDS_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Location lists keyed by shop domain. Merchants do add and deactivate
/// locations, so this one stays short.
const LOCATION_LISTS_CAPACITY: usize = 200;
const LOCATION_LISTS_TTL: Duration = Duration::from_secs(30 * 60);

/// Cache service holding the three independently-bounded caches.
pub struct PickupCaches {
    pub geocode: TtlCache<String, GeoPoint>,
    pub location_coords: TtlCache<String, GeoPoint>,
    pub location_lists: TtlCache<String, Vec<FulfillmentLocation>>,
}

impl PickupCaches {
    #[must_use]
    pub fn new() -> Self {
        Self {
            geocode: TtlCache::new(GEOCODE_CAPACITY, GEOCODE_TTL),
            location_coords: TtlCache::new(LOCATION_COORDS_CAPACITY, LOCATION_COORDS_TTL),
            location_lists: TtlCache::new(LOCATION_LISTS_CAPACITY, LOCATION_LISTS_TTL),
        }
    }
}

impl Default for PickupCaches {
    fn default() -> Self {
        Self::new()
    }
}

/// Namespaced key for the raw geocode cache.
#[must_use]
pub fn raw_geocode_key(query: &str) -> String {
    format!("geo:{}", query.trim())
}
