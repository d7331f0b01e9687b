// src/inventory/scanner.rs
// Cursor-paginated catalog scan. Yields one VariantInventoryState at a time
// as a single-pass stream; a fresh scan always starts a new cursor chain.

use async_stream::try_stream;
use futures::Stream;
use serde_json::{json, Value};
use tracing::debug;

use super::{InventoryLevel, InventoryPolicy, VariantInventoryState};
use crate::shopify::gid::gid_to_id;
use crate::shopify::{AdminTransport, ShopifyError};

/// Nested page caps: 100 variants per product, 10 inventory levels per
/// variant. Variants or levels beyond these caps are not visible to a scan.
/// The `available` field was renamed `availableQuantity` in newer Admin API
/// versions; see [`extract_available`].
const FETCH_PRODUCTS_QUERY: &str = r#"
query FetchProducts($cursor: String, $query: String, $pageSize: Int!) {
  products(first: $pageSize, after: $cursor, query: $query) {
    edges {
      node {
        title
        variants(first: 100) {
          edges {
            node {
              id
              title
              sku
              inventoryPolicy
              inventoryItem {
                id
                inventoryLevels(first: 10) {
                  edges {
                    node {
                      availableQuantity
                      location {
                        id
                        name
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

/// Field names the Admin API has used for the available quantity, in lookup
/// order. Records carrying neither field count as zero.
const QUANTITY_FIELDS: [&str; 2] = ["available", "availableQuantity"];

pub(crate) fn extract_available(level_node: &Value) -> i64 {
    QUANTITY_FIELDS
        .iter()
        .find_map(|field| level_node.get(*field).and_then(Value::as_i64))
        .unwrap_or(0)
}

/// Stream every variant of every product matching `product_query`. The
/// stream is finite and non-restartable; continuation stops when the server
/// reports no further pages.
pub fn scan<'a>(
    transport: &'a dyn AdminTransport,
    product_query: &'a str,
    page_size: u32,
) -> impl Stream<Item = Result<VariantInventoryState, ShopifyError>> + 'a {
    try_stream! {
        let mut cursor: Option<String> = None;
        let mut page = 0u32;

        loop {
            let variables = json!({
                "cursor": cursor,
                "query": product_query,
                "pageSize": page_size,
            });
            let data = transport.graphql(FETCH_PRODUCTS_QUERY, variables).await?;

            page += 1;
            let products = &data["products"];
            debug!(
                "Catalog page {}: {} products",
                page,
                products["edges"].as_array().map_or(0, Vec::len)
            );

            for product_edge in products["edges"].as_array().into_iter().flatten() {
                let product = &product_edge["node"];
                let product_title = product["title"].as_str().unwrap_or_default();

                for variant_edge in product["variants"]["edges"]
                    .as_array()
                    .into_iter()
                    .flatten()
                {
                    yield variant_state(product_title, &variant_edge["node"]);
                }
            }

            let page_info = &products["pageInfo"];
            if !page_info["hasNextPage"].as_bool().unwrap_or(false) {
                break;
            }
            cursor = page_info["endCursor"].as_str().map(String::from);
        }
    }
}

fn variant_state(product_title: &str, variant: &Value) -> VariantInventoryState {
    let levels = variant["inventoryItem"]["inventoryLevels"]["edges"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|level_edge| {
            let node = &level_edge["node"];
            InventoryLevel {
                location_id: gid_to_id(node["location"]["id"].as_str().unwrap_or_default()),
                location_name: node["location"]["name"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
                available: extract_available(node),
            }
        })
        .collect();

    VariantInventoryState {
        variant_id: gid_to_id(variant["id"].as_str().unwrap_or_default()),
        sku: variant["sku"].as_str().unwrap_or_default().to_string(),
        product_title: product_title.to_string(),
        variant_title: variant["title"].as_str().unwrap_or_default().to_string(),
        inventory_policy: InventoryPolicy::parse(
            variant["inventoryPolicy"].as_str().unwrap_or_default(),
        ),
        inventory_item_id: gid_to_id(variant["inventoryItem"]["id"].as_str().unwrap_or_default()),
        levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_available_prefers_primary_field() {
        let node = json!({ "available": 7, "availableQuantity": 3 });
        assert_eq!(extract_available(&node), 7);
    }

    #[test]
    fn test_extract_available_falls_back_to_renamed_field() {
        let node = json!({ "availableQuantity": 3 });
        assert_eq!(extract_available(&node), 3);
    }

    #[test]
    fn test_extract_available_defaults_to_zero() {
        assert_eq!(extract_available(&json!({})), 0);
        assert_eq!(extract_available(&json!({ "available": null })), 0);
    }

    #[test]
    fn test_variant_state_decodes_gids_and_levels() {
        let variant = json!({
            "id": "gid://shopify/ProductVariant/111",
            "title": "M",
            "sku": "HOOD-M",
            "inventoryPolicy": "DENY",
            "inventoryItem": {
                "id": "gid://shopify/InventoryItem/222",
                "inventoryLevels": {
                    "edges": [
                        {
                            "node": {
                                "availableQuantity": 5,
                                "location": {
                                    "id": "gid://shopify/Location/333",
                                    "name": "Multiple locations"
                                }
                            }
                        }
                    ]
                }
            }
        });

        let state = variant_state("Hoodie", &variant);
        assert_eq!(state.variant_id, "111");
        assert_eq!(state.inventory_item_id, "222");
        assert_eq!(state.inventory_policy, InventoryPolicy::Deny);
        assert_eq!(state.levels.len(), 1);
        assert_eq!(state.levels[0].location_id, "333");
        assert_eq!(state.levels[0].location_name, "Multiple locations");
        assert_eq!(state.levels[0].available, 5);
    }

    #[test]
    fn test_variant_state_tolerates_missing_optional_fields() {
        let variant = json!({
            "id": "gid://shopify/ProductVariant/111",
            "inventoryPolicy": "CONTINUE",
            "inventoryItem": { "id": "222" }
        });

        let state = variant_state("Hoodie", &variant);
        assert_eq!(state.sku, "");
        assert_eq!(state.variant_title, "");
        assert!(state.levels.is_empty());
    }
}
