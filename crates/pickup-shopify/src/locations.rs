//! Paginated retrieval of a shop's fulfillment locations.

use serde::Deserialize;
use serde_json::json;

use crate::client::ShopifyGqlClient;
use crate::error::ShopifyError;
use crate::types::FulfillmentLocation;

/// Edges requested per page of the `locations` connection.
const PAGE_SIZE: u32 = 100;

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops on cycling cursors.
const MAX_PAGES: usize = 50;

const LOCATIONS_QUERY: &str = "\
query Locations($first: Int!, $after: String) {
  locations(first: $first, after: $after) {
    pageInfo { hasNextPage }
    edges {
      cursor
      node {
        id
        name
        isActive
        fulfillsOnlineOrders
        address { address1 address2 city province country zip }
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
struct LocationsData {
    locations: LocationConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationConnection {
    page_info: PageInfo,
    edges: Vec<LocationEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct LocationEdge {
    cursor: String,
    node: FulfillmentLocation,
}

impl ShopifyGqlClient {
    /// Fetches every active fulfillment location for the shop.
    ///
    /// Pages through the `locations` connection [`PAGE_SIZE`] edges at a
    /// time, advancing the cursor to the last edge of each page while the
    /// server reports more pages exist. Only `isActive` locations are
    /// retained.
    ///
    /// **All-or-nothing semantics**: a failure on any page discards the
    /// locations collected from earlier pages and returns the error — a
    /// partial list would silently hide pickup locations from customers.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Gql`] — the response carried GraphQL errors.
    /// - [`ShopifyError::UnexpectedStatus`] / [`ShopifyError::Http`] —
    ///   transport-level failure.
    /// - [`ShopifyError::PaginationLimit`] — more than [`MAX_PAGES`] pages.
    pub async fn list_active_locations(&self) -> Result<Vec<FulfillmentLocation>, ShopifyError> {
        let mut locations: Vec<FulfillmentLocation> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ShopifyError::PaginationLimit {
                    shop: self.shop.clone(),
                    max_pages: MAX_PAGES,
                });
            }

            let body = self
                .post_graphql(LOCATIONS_QUERY, json!({ "first": PAGE_SIZE, "after": cursor }))
                .await?;

            let data = body.get("data").cloned().unwrap_or(serde_json::Value::Null);
            let parsed: LocationsData =
                serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                    context: format!("locations page {page_count} for {}", self.shop),
                    source: e,
                })?;

            let connection = parsed.locations;
            let has_next_page = connection.page_info.has_next_page;
            cursor = connection.edges.last().map(|edge| edge.cursor.clone());

            for edge in connection.edges {
                let node = edge.node;
                if !node.is_active {
                    continue;
                }
                // Known ambiguity: restricting pickup to locations that also
                // fulfill online orders changes which stores customers see,
                // so the filter stays off until product signs off on it.
                // if !node.fulfills_online_orders {
                //     continue;
                // }
                locations.push(node);
            }

            if !has_next_page || cursor.is_none() {
                break;
            }
        }

        tracing::debug!(
            shop = %self.shop,
            count = locations.len(),
            pages = page_count,
            "fetched active locations"
        );

        Ok(locations)
    }
}
