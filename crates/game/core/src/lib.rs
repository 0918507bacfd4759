//! Deterministic dungeon progression engine.
//!
//! `delve-core` drives a turn-based progression simulation: each action
//! consumes AP, deterministically selects an event (battle, treasure,
//! rest, trap, forced move), computes the outcome against the player's
//! stats, mutates a versioned state snapshot, and emits an ordered,
//! replayable log of what happened. All state mutation flows through
//! [`engine::DungeonEngine`]; catalogs and configuration are injected as
//! immutable values, and the core performs no I/O of its own.

pub mod config;
pub mod drops;
pub mod effect;
pub mod engine;
pub mod error;
pub mod event;
pub mod log;
pub mod monster;
pub mod processor;
pub mod rng;
pub mod selector;
pub mod state;
pub mod traits;

pub use config::{
    BattleConfig, EngineConfig, EventWeights, ProgressConfig, RestConfig, ScalingConfig,
    TrapConfig, TreasureConfig,
};
pub use drops::{DropEntry, DropResult, DropTable, DropTableRegistry};
pub use effect::{AppliedEffect, Effect};
pub use engine::{DungeonEngine, EngineError, ExecuteRequest, ExecuteResult};
pub use error::RegistryError;
pub use event::{
    BattleOutcome, DeathCause, Delta, EventType, Extra, LogAction, LogStatus, LogStub, MoveReason,
    ProgressDelta, StatDelta,
};
pub use log::{CATEGORY_EXPLORATION, PersistedLogRecord};
pub use monster::{MonsterRegistry, MonsterTemplate, Rarity, ScaledMonsterStats};
pub use rng::SeededRng;
pub use state::{CurrentAction, EquipmentBonus, PlayerState};
pub use traits::{AddedItem, DropInventoryApplier, InventoryError};
