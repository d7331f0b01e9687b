// src/inventory/locations.rs
// Resolves configured location names against the store's location list,
// fetched once per run.

use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use tracing::warn;

use super::Location;
use crate::shopify::{AdminTransport, ShopifyError};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The run cannot proceed without a valid destination.
    #[error("target location '{0}' not found in store locations")]
    TargetMissing(String),

    #[error(transparent)]
    Transport(#[from] ShopifyError),
}

/// Name→id maps the planner works against, resolved once per run.
#[derive(Debug, Clone)]
pub struct LocationMaps {
    pub target_id: String,
    pub target_name: String,
    /// Source name → id, restricted to the names that exist in the store.
    pub source_ids: HashMap<String, String>,
}

impl LocationMaps {
    /// False means there is nothing to migrate from and the run should
    /// terminate early as a no-op.
    pub fn has_sources(&self) -> bool {
        !self.source_ids.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct LocationsPayload {
    #[serde(default)]
    locations: Vec<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    id: serde_json::Number,
    name: String,
}

/// Fetch the store's flat location list via REST.
pub async fn fetch_locations(
    transport: &dyn AdminTransport,
) -> Result<Vec<Location>, ShopifyError> {
    let payload = transport.rest(Method::GET, "locations.json", None).await?;
    let parsed: LocationsPayload = serde_json::from_value(payload)?;

    Ok(parsed
        .locations
        .into_iter()
        .map(|raw| Location {
            id: raw.id.to_string(),
            name: raw.name,
        })
        .collect())
}

/// Build the name→id maps. A missing target is fatal; missing source names
/// are warned about and skipped.
pub fn resolve(
    locations: &[Location],
    target_name: &str,
    source_names: &[String],
) -> Result<LocationMaps, DirectoryError> {
    let by_name: HashMap<&str, &str> = locations
        .iter()
        .map(|location| (location.name.as_str(), location.id.as_str()))
        .collect();

    let Some(target_id) = by_name.get(target_name) else {
        return Err(DirectoryError::TargetMissing(target_name.to_string()));
    };

    let missing: Vec<&str> = source_names
        .iter()
        .map(String::as_str)
        .filter(|name| !by_name.contains_key(name))
        .collect();
    if !missing.is_empty() {
        warn!("Source locations missing from store: {}", missing.join(", "));
    }

    let source_ids = source_names
        .iter()
        .filter_map(|name| {
            by_name
                .get(name.as_str())
                .map(|id| (name.clone(), (*id).to_string()))
        })
        .collect();

    Ok(LocationMaps {
        target_id: (*target_id).to_string(),
        target_name: target_name.to_string(),
        source_ids,
    })
}
