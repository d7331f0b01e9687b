// src/inventory/planner.rs
// Pure plan computation: no I/O. Given a variant snapshot and the resolved
// location maps, produce the ordered actions that converge the variant's
// stock onto the target location. An empty plan means already converged,
// which is what makes repeated runs idempotent.

use super::locations::LocationMaps;
use super::VariantInventoryState;

/// Intended stock at the destination once a variant converges. A policy
/// sentinel meaning "effectively unconstrained", not a literal count.
pub const UNLIMITED_SENTINEL: i64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Zero out and disconnect a source location.
    Reassign,
    /// Connect the target location and stock it to the sentinel.
    EnsureTarget,
    /// Set the variant's inventory policy to `continue`.
    SetPolicy,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Reassign => "reassign",
            ActionKind::EnsureTarget => "ensure target",
            ActionKind::SetPolicy => "set inventory policy",
        }
    }
}

/// A single location mutation, generated per-variant and consumed once by
/// the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub kind: ActionKind,
    pub location_id: String,
    pub location_name: String,
    pub quantity: i64,
}

/// Compute the ordered action list for one variant.
///
/// All `Reassign` actions precede `EnsureTarget`, which precedes
/// `SetPolicy`: disconnecting a source before the target is established
/// would transiently leave the variant with no tracked location.
pub fn plan_actions(state: &VariantInventoryState, maps: &LocationMaps) -> Vec<PlannedAction> {
    let mut actions = Vec::new();
    let mut needs_target = true;

    for level in &state.levels {
        if level.location_id == maps.target_id {
            needs_target = false;
        } else if maps.source_ids.values().any(|id| *id == level.location_id) {
            actions.push(PlannedAction {
                kind: ActionKind::Reassign,
                location_id: level.location_id.clone(),
                location_name: level.location_name.clone(),
                quantity: level.available,
            });
        }
    }

    if !actions.is_empty() || needs_target {
        actions.push(PlannedAction {
            kind: ActionKind::EnsureTarget,
            location_id: maps.target_id.clone(),
            location_name: maps.target_name.clone(),
            quantity: UNLIMITED_SENTINEL,
        });
    }

    if !state.inventory_policy.is_continue() {
        actions.push(PlannedAction {
            kind: ActionKind::SetPolicy,
            location_id: maps.target_id.clone(),
            location_name: maps.target_name.clone(),
            quantity: UNLIMITED_SENTINEL,
        });
    }

    actions
}
