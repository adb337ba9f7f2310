use thiserror::Error;

/// Errors returned by the Shopify Admin GraphQL client.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Shop domain or access token was absent when building the client.
    #[error("missing shop domain or access token")]
    AuthMissing,

    /// The GraphQL response carried a non-empty `errors` array.
    #[error("Shopify GraphQL error: {}", messages.join("; "))]
    Gql { messages: Vec<String> },

    /// The variant exists but has no associated inventory item.
    #[error("no inventory item found for variant {variant}")]
    InventoryItemNotFound { variant: String },

    /// Any non-2xx HTTP status from the Admin API.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Cursor pagination exceeded the cycle guard.
    #[error("pagination limit reached for {shop}: exceeded {max_pages} pages")]
    PaginationLimit { shop: String, max_pages: usize },

    /// The shop value could not be turned into a valid Admin API endpoint.
    #[error("invalid shop \"{shop}\": {reason}")]
    InvalidShop { shop: String, reason: String },
}
