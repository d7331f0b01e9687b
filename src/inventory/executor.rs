// src/inventory/executor.rs
// Applies one variant's planned actions against the Admin API, strictly in
// order. Conflict responses on connect/disconnect mean the remote side is
// already in the desired state and resolve as success.

use anyhow::{Context, Result};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use super::planner::{ActionKind, PlannedAction};
use super::VariantInventoryState;
use crate::shopify::AdminTransport;

/// How a single mutation landed on the remote side. Failure is the `Err`
/// branch of the surrounding `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    AlreadyInDesiredState,
}

/// Apply an ordered action list for one variant. In dry-run mode every
/// action is logged with its intended effect and no mutation is issued.
pub async fn apply(
    transport: &dyn AdminTransport,
    state: &VariantInventoryState,
    actions: &[PlannedAction],
    dry_run: bool,
) -> Result<()> {
    info!("Updating {}", state.label());

    for action in actions {
        match action.kind {
            ActionKind::Reassign => reassign(transport, state, action, dry_run).await,
            ActionKind::EnsureTarget => ensure_target(transport, state, action, dry_run).await,
            ActionKind::SetPolicy => set_policy(transport, state, dry_run).await,
        }
        .with_context(|| {
            format!(
                "failed to {} for {} at {} ({})",
                action.kind.as_str(),
                state.label(),
                action.location_name,
                action.location_id
            )
        })?;
    }

    Ok(())
}

async fn reassign(
    transport: &dyn AdminTransport,
    state: &VariantInventoryState,
    action: &PlannedAction,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        info!(
            "Dry-run: would clear {} units at {}",
            action.quantity, action.location_name
        );
        return Ok(());
    }

    if action.quantity != 0 {
        set_inventory_level(transport, &state.inventory_item_id, &action.location_id, 0).await?;
    }

    match disconnect_location(transport, &state.inventory_item_id, &action.location_id).await? {
        MutationOutcome::Applied => {}
        MutationOutcome::AlreadyInDesiredState => debug!(
            "Location {} already disconnected for inventory item {}",
            action.location_id, state.inventory_item_id
        ),
    }
    Ok(())
}

async fn ensure_target(
    transport: &dyn AdminTransport,
    state: &VariantInventoryState,
    action: &PlannedAction,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        info!(
            "Dry-run: would ensure {} has {} units",
            action.location_name, action.quantity
        );
        return Ok(());
    }

    match connect_location(transport, &state.inventory_item_id, &action.location_id).await? {
        MutationOutcome::Applied => {}
        MutationOutcome::AlreadyInDesiredState => debug!(
            "Location {} already connected for inventory item {}",
            action.location_id, state.inventory_item_id
        ),
    }

    set_inventory_level(
        transport,
        &state.inventory_item_id,
        &action.location_id,
        action.quantity,
    )
    .await
}

async fn set_policy(
    transport: &dyn AdminTransport,
    state: &VariantInventoryState,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        info!("Dry-run: would set inventory policy to CONTINUE");
        return Ok(());
    }

    let path = format!("variants/{}.json", state.variant_id);
    let body = json!({
        "variant": {
            "id": numeric_id(&state.variant_id)?,
            "inventory_policy": "continue",
        }
    });
    transport.rest(Method::PUT, &path, Some(body)).await?;
    Ok(())
}

async fn set_inventory_level(
    transport: &dyn AdminTransport,
    inventory_item_id: &str,
    location_id: &str,
    quantity: i64,
) -> Result<()> {
    let body = json!({
        "location_id": numeric_id(location_id)?,
        "inventory_item_id": numeric_id(inventory_item_id)?,
        "available": quantity,
    });
    transport
        .rest(Method::POST, "inventory_levels/set.json", Some(body))
        .await?;
    Ok(())
}

async fn disconnect_location(
    transport: &dyn AdminTransport,
    inventory_item_id: &str,
    location_id: &str,
) -> Result<MutationOutcome> {
    let body = json!({
        "location_id": numeric_id(location_id)?,
        "inventory_item_id": numeric_id(inventory_item_id)?,
    });
    match transport
        .rest(Method::DELETE, "inventory_levels/delete.json", Some(body))
        .await
    {
        Ok(_) => Ok(MutationOutcome::Applied),
        Err(err) if err.is_conflict() => Ok(MutationOutcome::AlreadyInDesiredState),
        Err(err) => Err(err.into()),
    }
}

async fn connect_location(
    transport: &dyn AdminTransport,
    inventory_item_id: &str,
    location_id: &str,
) -> Result<MutationOutcome> {
    let body = json!({
        "location_id": numeric_id(location_id)?,
        "inventory_item_id": numeric_id(inventory_item_id)?,
    });
    match transport
        .rest(Method::POST, "inventory_levels/connect.json", Some(body))
        .await
    {
        Ok(_) => Ok(MutationOutcome::Applied),
        Err(err) if err.is_conflict() => Ok(MutationOutcome::AlreadyInDesiredState),
        Err(err) => Err(err.into()),
    }
}

/// REST payloads carry ids as integers.
fn numeric_id(id: &str) -> Result<i64> {
    id.parse()
        .with_context(|| format!("identifier '{id}' is not numeric"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_parses_decoded_gids() {
        assert_eq!(numeric_id("123456").unwrap(), 123456);
        assert!(numeric_id("gid://shopify/Location/1").is_err());
    }
}
