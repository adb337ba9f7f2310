use thiserror::Error;

/// Errors produced by the geocoding provider chain.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Every provider and strategy was exhausted without a match.
    #[error("no geocoding result for \"{query}\"")]
    NoResult { query: String },

    /// A provider reported a failure (non-OK status, empty candidate list,
    /// malformed coordinates).
    #[error("geocoding provider {provider} failed: {reason}")]
    Provider {
        provider: &'static str,
        reason: String,
    },

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
}
