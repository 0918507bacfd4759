//! Errors surfaced while executing one action.

use crate::error::RegistryError;
use crate::traits::InventoryError;

/// Request-level failures; none are retryable by the engine itself.
///
/// Every error aborts the whole call: no logs are emitted and no state
/// mutation is observable by the caller.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The configured AP cost must be positive.
    #[error("invalid ap cost: {0} (must be > 0)")]
    InvalidApCost(i32),

    /// Not enough AP before (or after) the debit.
    #[error("insufficient ap: need {required}, have {available}")]
    InsufficientAp { required: i32, available: i32 },

    /// The configured drop table is missing from the injected registry.
    #[error("drop table '{0}' not found")]
    DropTableNotFound(String),

    /// Catalog defect detected while resolving the action (e.g. a table
    /// with no usable weight).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The inventory collaborator failed; surfaced as-is, never retried.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}
