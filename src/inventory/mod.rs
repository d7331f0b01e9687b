// src/inventory/mod.rs
// Domain model for per-variant inventory snapshots.

pub mod executor;
pub mod locations;
pub mod planner;
pub mod run;
pub mod scanner;

/// A named fulfillment/warehouse site where stock can be tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// One variant's stock at one location at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLevel {
    pub location_id: String,
    pub location_name: String,
    pub available: i64,
}

/// Whether a variant can keep selling once reported stock reaches zero.
/// GraphQL reports the value uppercase (`CONTINUE`/`DENY`), REST writes it
/// lowercase; parsing is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryPolicy {
    Continue,
    Deny,
    Other(String),
}

impl InventoryPolicy {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "continue" => InventoryPolicy::Continue,
            "deny" => InventoryPolicy::Deny,
            _ => InventoryPolicy::Other(raw.to_string()),
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, InventoryPolicy::Continue)
    }
}

/// Snapshot of inventory information for a product variant. Produced fresh
/// by the scanner each run and never mutated; an updated view requires a
/// re-scan. Location ids within `levels` are unique per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantInventoryState {
    /// Numeric variant id (decoded from the GID).
    pub variant_id: String,
    pub sku: String,
    pub product_title: String,
    pub variant_title: String,
    pub inventory_policy: InventoryPolicy,
    /// Numeric inventory item id (decoded from the GID).
    pub inventory_item_id: String,
    pub levels: Vec<InventoryLevel>,
}

impl VariantInventoryState {
    /// Human-readable label used in logs.
    pub fn label(&self) -> String {
        let sku = if self.sku.is_empty() { "no SKU" } else { &self.sku };
        format!("{} — {} ({})", self.product_title, self.variant_title, sku)
    }
}
