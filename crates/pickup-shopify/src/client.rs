//! Authenticated client for the Shopify Admin GraphQL API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::{json, Value};

use crate::error::ShopifyError;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for one shop's Admin GraphQL endpoint.
///
/// Speaks GraphQL as plain POSTed JSON (`{query, variables}`); responses are
/// checked for HTTP status and a GraphQL `errors` array before any data
/// extraction. Any error fails the whole call — there is no partial-page
/// retry and no backoff.
pub struct ShopifyGqlClient {
    pub(crate) client: Client,
    pub(crate) endpoint: Url,
    token: String,
    pub(crate) shop: String,
}

impl ShopifyGqlClient {
    /// Creates a client bound to one shop and access token.
    ///
    /// `shop` is normally a bare domain (`example.myshopify.com`); an
    /// `http(s)://` origin is used verbatim so tests can point at a mock
    /// server.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::AuthMissing`] — blank shop or access token.
    /// - [`ShopifyError::InvalidShop`] — shop value does not form a valid URL.
    /// - [`ShopifyError::Http`] — the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        shop: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        let shop = shop.trim();
        let access_token = access_token.trim();
        if shop.is_empty() || access_token.is_empty() {
            return Err(ShopifyError::AuthMissing);
        }

        let endpoint = admin_endpoint(shop, api_version)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: access_token.to_owned(),
            shop: shop.to_owned(),
        })
    }

    /// The shop identity this client is bound to, as given at construction.
    #[must_use]
    pub fn shop(&self) -> &str {
        &self.shop
    }

    /// Executes one GraphQL request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ShopifyError::Gql`] — a non-empty GraphQL `errors` array, with
    ///   every reported message collected.
    /// - [`ShopifyError::Http`] — network failure or timeout.
    pub(crate) async fn post_graphql(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Value, ShopifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.json::<Value>().await?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .map_or_else(|| e.to_string(), str::to_owned)
                    })
                    .collect();
                return Err(ShopifyError::Gql { messages });
            }
        }

        Ok(body)
    }
}

/// Builds the Admin GraphQL endpoint for a shop and API version.
///
/// A bare domain gets an `https://` scheme; an explicit `http(s)://` origin
/// is kept as-is with any trailing slash trimmed.
fn admin_endpoint(shop: &str, api_version: &str) -> Result<Url, ShopifyError> {
    let origin = if shop.starts_with("http://") || shop.starts_with("https://") {
        shop.trim_end_matches('/').to_owned()
    } else {
        format!("https://{shop}")
    };

    let raw = format!("{origin}/admin/api/{api_version}/graphql.json");
    Url::parse(&raw).map_err(|e| ShopifyError::InvalidShop {
        shop: shop.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https_scheme() {
        let url = admin_endpoint("example.myshopify.com", "2024-10").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.myshopify.com/admin/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn explicit_origin_is_used_verbatim() {
        let url = admin_endpoint("http://127.0.0.1:9999/", "2024-10").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9999/admin/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn blank_shop_is_auth_missing() {
        let result = ShopifyGqlClient::new("  ", "token", "2024-10", 5, "test");
        assert!(matches!(result, Err(ShopifyError::AuthMissing)));
    }

    #[test]
    fn blank_token_is_auth_missing() {
        let result = ShopifyGqlClient::new("example.myshopify.com", "", "2024-10", 5, "test");
        assert!(matches!(result, Err(ShopifyError::AuthMissing)));
    }
}
