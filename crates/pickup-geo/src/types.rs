//! Domain types for geocoding results.

/// A geocoded point: coordinates plus the provider's display string.
///
/// Immutable once produced; cached by value in the geocode caches.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    /// Human-readable address or provider-supplied display name.
    pub formatted: String,
}

impl GeoPoint {
    /// The sentinel recorded for a location whose geocoding ultimately failed.
    ///
    /// Cached so repeated failures don't re-trigger live lookups; locations
    /// carrying it are dropped from resolver output instead of surfacing a
    /// misleading zero distance.
    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            formatted: String::new(),
        }
    }

    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}
