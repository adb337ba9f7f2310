//! Variant inventory-item resolution and per-location quantities.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;

use crate::client::ShopifyGqlClient;
use crate::error::ShopifyError;

const VARIANT_GID_PREFIX: &str = "gid://shopify/ProductVariant/";

/// Inventory levels fetched in one request. The Admin API caps a single
/// `inventoryLevels` page at 250; shops with more stocked locations than that
/// are out of scope for this feature, so no pagination here.
const INVENTORY_LEVELS_PAGE: u32 = 250;

const VARIANT_ITEM_QUERY: &str = "\
query VariantInventoryItem($id: ID!) {
  productVariant(id: $id) {
    id
    inventoryItem { id }
  }
}";

const INVENTORY_LEVELS_QUERY: &str = "\
query InventoryLevels($id: ID!, $first: Int!) {
  inventoryItem(id: $id) {
    inventoryLevels(first: $first) {
      edges {
        node {
          location { id }
          quantities(names: [\"available\"]) { name quantity }
        }
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantData {
    product_variant: Option<VariantNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantNode {
    inventory_item: Option<IdNode>,
}

#[derive(Debug, Deserialize)]
struct IdNode {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryItemData {
    inventory_item: Option<InventoryItemNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryItemNode {
    inventory_levels: LevelConnection,
}

#[derive(Debug, Deserialize)]
struct LevelConnection {
    edges: Vec<LevelEdge>,
}

#[derive(Debug, Deserialize)]
struct LevelEdge {
    node: LevelNode,
}

#[derive(Debug, Deserialize)]
struct LevelNode {
    location: IdNode,
    #[serde(default)]
    quantities: Vec<NamedQuantity>,
}

#[derive(Debug, Deserialize)]
struct NamedQuantity {
    name: String,
    quantity: i64,
}

impl ShopifyGqlClient {
    /// Resolves a product variant to its inventory item gid.
    ///
    /// `variant` may be a raw numeric/string id or a fully-qualified
    /// `gid://shopify/ProductVariant/...`; raw ids are normalized to the gid
    /// form before querying.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::InventoryItemNotFound`] — unknown variant, or a
    ///   variant with no associated inventory item.
    /// - Transport and GraphQL errors as for any call.
    pub async fn resolve_inventory_item(&self, variant: &str) -> Result<String, ShopifyError> {
        let gid = normalize_variant_gid(variant);
        let body = self
            .post_graphql(VARIANT_ITEM_QUERY, json!({ "id": gid }))
            .await?;

        let data = body.get("data").cloned().unwrap_or(serde_json::Value::Null);
        let parsed: VariantData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: format!("variant lookup for {gid}"),
                source: e,
            })?;

        parsed
            .product_variant
            .and_then(|node| node.inventory_item)
            .map(|item| item.id)
            .ok_or_else(|| ShopifyError::InventoryItemNotFound {
                variant: variant.to_owned(),
            })
    }

    /// Fetches available quantity per location for an inventory item.
    ///
    /// One page of up to [`INVENTORY_LEVELS_PAGE`] levels; each level
    /// contributes its `available` named quantity, defaulting to 0 when that
    /// name is absent from the level's quantity list. An inventory item the
    /// API no longer knows yields an empty map.
    ///
    /// # Errors
    ///
    /// Transport and GraphQL errors as for any call.
    pub async fn quantities_by_location(
        &self,
        inventory_item_id: &str,
    ) -> Result<HashMap<String, i64>, ShopifyError> {
        let body = self
            .post_graphql(
                INVENTORY_LEVELS_QUERY,
                json!({ "id": inventory_item_id, "first": INVENTORY_LEVELS_PAGE }),
            )
            .await?;

        let data = body.get("data").cloned().unwrap_or(serde_json::Value::Null);
        let parsed: InventoryItemData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: format!("inventory levels for {inventory_item_id}"),
                source: e,
            })?;

        let Some(item) = parsed.inventory_item else {
            tracing::debug!(inventory_item_id, "inventory item not found; empty quantity map");
            return Ok(HashMap::new());
        };

        Ok(item
            .inventory_levels
            .edges
            .into_iter()
            .map(|edge| {
                let level = edge.node;
                (level.location.id, available_quantity(&level.quantities))
            })
            .collect())
    }
}

/// Normalizes a variant identifier to the platform's global-id form.
fn normalize_variant_gid(variant: &str) -> String {
    let trimmed = variant.trim();
    if trimmed.starts_with("gid://") {
        trimmed.to_owned()
    } else {
        format!("{VARIANT_GID_PREFIX}{trimmed}")
    }
}

/// Extracts the `available` named quantity, defaulting to 0 when absent.
fn available_quantity(quantities: &[NamedQuantity]) -> i64 {
    quantities
        .iter()
        .find(|q| q.name == "available")
        .map_or(0, |q| q.quantity)
}
