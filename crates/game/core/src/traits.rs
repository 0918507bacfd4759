//! Collaborator seams the engine calls out through.

use crate::drops::DropResult;

/// An item granted to the player's inventory by a collaborator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AddedItem {
    pub item_code: String,
    pub quantity: u32,
    /// Quantity owned after the grant, as reported by the inventory side.
    pub total_owned: u32,
}

/// Failure reported by the inventory collaborator.
///
/// Surfaced to the caller as-is; the engine never retries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("inventory apply failed: {0}")]
pub struct InventoryError(pub String);

/// Applies drop results to a player's owned items.
///
/// Called by the orchestrator only when drops occurred and the request did
/// not opt out. Implementations live outside the core (persistence side).
pub trait DropInventoryApplier: Send + Sync {
    fn apply_drops(&self, user_id: &str, drops: &[DropResult])
    -> Result<Vec<AddedItem>, InventoryError>;
}
