use serde_json::{json, Value};
use thiserror::Error;

use pickup_geo::GeocodeError;
use pickup_shopify::ShopifyError;

/// Top-level error for a pickup resolution request.
///
/// Wraps the per-component errors and exposes the boundary taxonomy
/// (`code`/`http_status`/`meta`) that the transport layer serializes into
/// its structured error response.
#[derive(Debug, Error)]
pub enum PickupError {
    #[error("invalid pincode \"{pincode}\": expected exactly 4 or 6 digits")]
    InvalidPincode { pincode: String },

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Shopify(#[from] ShopifyError),
}

impl PickupError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PickupError::InvalidPincode { .. } => "INVALID_PINCODE",
            PickupError::Geocode(GeocodeError::NoResult { .. }) => "GEOCODE_NO_RESULT",
            PickupError::Geocode(_) => "GEOCODE_PROVIDER_ERROR",
            PickupError::Shopify(ShopifyError::AuthMissing) => "AUTH_MISSING",
            PickupError::Shopify(ShopifyError::InventoryItemNotFound { .. }) => {
                "INVENTORY_ITEM_NOT_FOUND"
            }
            PickupError::Shopify(ShopifyError::Gql { .. }) => "SHOPIFY_GQL_ERROR",
            PickupError::Shopify(_) => "SHOPIFY_PROVIDER_ERROR",
        }
    }

    /// HTTP status the transport layer should map this error to.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            PickupError::InvalidPincode { .. } => 400,
            PickupError::Geocode(GeocodeError::NoResult { .. })
            | PickupError::Shopify(ShopifyError::InventoryItemNotFound { .. }) => 404,
            PickupError::Shopify(ShopifyError::AuthMissing) => 401,
            PickupError::Geocode(_) | PickupError::Shopify(_) => 502,
        }
    }

    /// Structured metadata for the error response body.
    #[must_use]
    pub fn meta(&self) -> Value {
        match self {
            PickupError::InvalidPincode { pincode } => json!({ "pincode": pincode }),
            PickupError::Geocode(GeocodeError::NoResult { query }) => json!({ "query": query }),
            PickupError::Geocode(GeocodeError::Provider { provider, reason }) => {
                json!({ "provider": provider, "reason": reason })
            }
            PickupError::Geocode(err) => json!({ "reason": err.to_string() }),
            PickupError::Shopify(ShopifyError::InventoryItemNotFound { variant }) => {
                json!({ "variant": variant })
            }
            PickupError::Shopify(ShopifyError::Gql { messages }) => {
                json!({ "messages": messages })
            }
            PickupError::Shopify(err) => json!({ "reason": err.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pincode_maps_to_400() {
        let err = PickupError::InvalidPincode {
            pincode: "12345".to_string(),
        };
        assert_eq!(err.code(), "INVALID_PINCODE");
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.meta()["pincode"], "12345");
    }

    #[test]
    fn geocode_no_result_maps_to_404() {
        let err = PickupError::Geocode(GeocodeError::NoResult {
            query: "000000".to_string(),
        });
        assert_eq!(err.code(), "GEOCODE_NO_RESULT");
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.meta()["query"], "000000");
    }

    #[test]
    fn provider_failure_maps_to_502() {
        let err = PickupError::Geocode(GeocodeError::Provider {
            provider: "google",
            reason: "REQUEST_DENIED".to_string(),
        });
        assert_eq!(err.code(), "GEOCODE_PROVIDER_ERROR");
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.meta()["provider"], "google");
    }

    #[test]
    fn auth_missing_maps_to_401() {
        let err = PickupError::Shopify(ShopifyError::AuthMissing);
        assert_eq!(err.code(), "AUTH_MISSING");
        assert_eq!(err.http_status(), 401);
    }

    #[test]
    fn gql_errors_carry_all_messages() {
        let err = PickupError::Shopify(ShopifyError::Gql {
            messages: vec!["Throttled".to_string(), "Bad field".to_string()],
        });
        assert_eq!(err.code(), "SHOPIFY_GQL_ERROR");
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.meta()["messages"][1], "Bad field");
    }
}
