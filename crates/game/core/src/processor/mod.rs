//! Event processors: one state transition per event kind.
//!
//! Dispatch is an exhaustive `match` over [`EventType`], so an unhandled
//! event kind is a compile error rather than a runtime wiring defect.

mod battle;
mod empty;
mod movement;
mod rest;
mod trap;
mod treasure;

pub use battle::crit_chance;

use crate::config::EngineConfig;
use crate::drops::{DropResult, DropTableRegistry};
use crate::engine::EngineError;
use crate::event::{BattleOutcome, Delta, EventType, Extra, MoveReason};
use crate::monster::MonsterRegistry;
use crate::rng::SeededRng;
use crate::state::{EquipmentBonus, PlayerState};

/// Everything a processor may read or draw from while resolving an event.
pub struct EventContext<'a> {
    /// The selection roll; processors reuse it for their primary chance
    /// (elite promotion, treasure bonus).
    pub roll: f64,
    /// Stream for any further internal randomness.
    pub rng: &'a mut SeededRng,
    pub bonus: &'a EquipmentBonus,
    pub config: &'a EngineConfig,
    pub monsters: &'a MonsterRegistry,
    pub drop_tables: &'a DropTableRegistry,
}

/// Structured result of one processed event.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedEvent {
    pub delta: Delta,
    pub extra: Option<Extra>,
    /// EXP earned; the orchestrator applies it (and leveling) after the
    /// death check.
    pub exp_gained: u64,
    pub drops: Vec<DropResult>,
    /// Set by battles only; drives the death-cause taxonomy.
    pub outcome: Option<BattleOutcome>,
}

impl ProcessedEvent {
    fn new(delta: Delta) -> Self {
        Self {
            delta,
            extra: None,
            exp_gained: 0,
            drops: Vec::new(),
            outcome: None,
        }
    }
}

/// Resolve one event against the state.
pub fn process(
    event: EventType,
    state: &mut PlayerState,
    ctx: &mut EventContext<'_>,
) -> Result<ProcessedEvent, EngineError> {
    match event {
        EventType::Battle => battle::process(state, ctx),
        EventType::Treasure => treasure::process(state, ctx),
        EventType::Rest => Ok(rest::process(state, ctx)),
        EventType::Trap => Ok(trap::process(state, ctx)),
        EventType::Move => Ok(movement::process(state, MoveReason::Selected)),
        EventType::Empty => Ok(empty::process()),
    }
}

/// Resolve the engine-internal MOVE that follows progress saturation.
pub fn process_forced_move(state: &mut PlayerState) -> ProcessedEvent {
    movement::process(state, MoveReason::ProgressSaturated)
}
