//! Dungeon event orchestration.
//!
//! [`DungeonEngine`] is the authoritative reducer for [`PlayerState`]: one
//! call validates AP, selects an event, runs its processor, then applies
//! the universal post-processing (progress accrual, death and revival,
//! leveling, forced move) and renders the ordered log stream. The call
//! either returns a fully assembled result or fails without observable
//! state mutation; persistence and per-player serialization are the
//! caller's responsibility.

mod errors;

pub use errors::EngineError;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::{EngineConfig, EventWeights};
use crate::drops::{DropResult, DropTableRegistry};
use crate::event::{
    BattleOutcome, DeathCause, Delta, EventType, Extra, LogAction, LogStub, ProgressDelta,
    StatDelta,
};
use crate::log::{self, PersistedLogRecord};
use crate::monster::MonsterRegistry;
use crate::processor::{self, EventContext};
use crate::rng::SeededRng;
use crate::selector;
use crate::state::{CurrentAction, EquipmentBonus, PlayerState};
use crate::traits::{AddedItem, DropInventoryApplier};

/// Input contract for one action.
#[derive(Clone, Debug)]
pub struct ExecuteRequest {
    pub state: PlayerState,
    pub seed: String,
    /// Extends the seed as `"{seed}:{counter}"` so batch drivers can replay
    /// individual actions.
    pub action_counter: Option<u64>,
    /// Defaults to [`EngineConfig::DEFAULT_AP_COST`].
    pub ap_cost: Option<i32>,
    /// Overrides the configured selection weights for this call.
    pub weights: Option<EventWeights>,
    pub equipment_bonus: Option<EquipmentBonus>,
    pub skip_inventory_apply: bool,
}

impl ExecuteRequest {
    pub fn new(state: PlayerState, seed: impl Into<String>) -> Self {
        Self {
            state,
            seed: seed.into(),
            action_counter: None,
            ap_cost: None,
            weights: None,
            equipment_bonus: None,
            skip_inventory_apply: false,
        }
    }
}

/// Output contract: the sole surface persistence layers depend on.
#[derive(Clone, Debug)]
pub struct ExecuteResult {
    pub selected_event: EventType,
    /// Whether an internal MOVE follow-up ran after the event.
    pub forced_move: bool,
    pub state_before: PlayerState,
    pub state_after: PlayerState,
    pub raw_log_stubs: Vec<LogStub>,
    pub logs: Vec<PersistedLogRecord>,
    pub drops: Vec<DropResult>,
    /// Present when drops were applied through the inventory collaborator.
    pub inventory_adds: Option<Vec<AddedItem>>,
}

/// The dungeon event service.
///
/// Constructed once from immutable configuration and validated registries;
/// each [`execute`](Self::execute) call is an independent, deterministic
/// computation over the caller's state snapshot.
pub struct DungeonEngine {
    config: EngineConfig,
    monsters: MonsterRegistry,
    drop_tables: DropTableRegistry,
    inventory: Option<Box<dyn DropInventoryApplier>>,
}

impl DungeonEngine {
    pub fn new(
        config: EngineConfig,
        monsters: MonsterRegistry,
        drop_tables: DropTableRegistry,
    ) -> Self {
        Self {
            config,
            monsters,
            drop_tables,
            inventory: None,
        }
    }

    /// Attach the inventory collaborator drops are applied through.
    pub fn with_inventory_applier(mut self, applier: Box<dyn DropInventoryApplier>) -> Self {
        self.inventory = Some(applier);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute one action.
    ///
    /// Steps: AP check, event selection, processor, progress accrual,
    /// death check, leveling, forced move, finalize, log rendering. The
    /// version is incremented by exactly one regardless of how many
    /// internal sub-steps occurred.
    pub fn execute(&self, request: ExecuteRequest) -> Result<ExecuteResult, EngineError> {
        let ap_cost = request.ap_cost.unwrap_or(EngineConfig::DEFAULT_AP_COST);
        if ap_cost <= 0 {
            return Err(EngineError::InvalidApCost(ap_cost));
        }

        let state_before = request.state.clone();
        let mut state = request.state;
        if state.ap < ap_cost {
            return Err(EngineError::InsufficientAp {
                required: ap_cost,
                available: state.ap,
            });
        }

        let mut rng = match request.action_counter {
            Some(counter) => SeededRng::for_action(&request.seed, counter),
            None => SeededRng::new(&request.seed),
        };
        let roll = rng.next_f64();

        let weights = request.weights.unwrap_or(self.config.weights);
        let event = selector::select(state.floor_progress, roll, &weights);
        debug!(user = %state.user_id, event = %event, roll, "event selected");

        state.ap -= ap_cost;
        state.current_action = CurrentAction::Event(event);
        state.current_action_started_at = Some(Utc::now());

        let mut stubs = Vec::new();
        stubs.push(LogStub::started(event, started_delta(event, &state, ap_cost)));

        let bonus = request.equipment_bonus.unwrap_or_default();
        let processed = {
            let mut ctx = EventContext {
                roll,
                rng: &mut rng,
                bonus: &bonus,
                config: &self.config,
                monsters: &self.monsters,
                drop_tables: &self.drop_tables,
            };
            processor::process(event, &mut state, &mut ctx)?
        };

        // Floor-progress accrual; MOVE manages progress itself.
        let mut completed_delta = processed.delta.clone();
        if event != EventType::Move {
            let before = state.floor_progress;
            let gain = if event == EventType::Battle {
                self.config.progress.battle_gain
            } else {
                self.config.progress.other_gain
            };
            state.floor_progress = (before + gain).min(self.config.progress.cap);
            completed_delta = completed_delta.with_progress(ProgressDelta {
                before,
                after: state.floor_progress,
            });
        }

        let died = state.hp <= 0;
        if died {
            let cause = match (event, processed.outcome) {
                (EventType::Battle, Some(BattleOutcome::Defeat)) => DeathCause::PlayerDefeated,
                (EventType::Trap, _) => DeathCause::TrapDamage,
                _ => DeathCause::HpDepleted,
            };
            let floor_at_death = state.floor;
            let progress_at_death = state.floor_progress;
            state.floor = 1;
            state.floor_progress = 0;
            info!(user = %state.user_id, cause = %cause, floor = floor_at_death, "player died");

            // Progress is reported only on the DEATH record.
            stubs.push(LogStub::completed(
                event,
                completed_delta.without_progress(),
                processed.extra.clone(),
            ));
            stubs.push(
                LogStub::completed(
                    event,
                    Delta::Death {
                        cause,
                        floor_before: floor_at_death,
                        progress_before: progress_at_death,
                    },
                    Some(Extra::Death { cause }),
                )
                .with_action(LogAction::Death),
            );

            let revive_hp = state.max_hp + bonus.hp;
            let hp_delta = revive_hp - state.hp;
            state.hp = revive_hp;
            stubs.push(
                LogStub::completed(
                    event,
                    Delta::Revive {
                        stats: StatDelta {
                            hp: hp_delta,
                            ..StatDelta::default()
                        },
                    },
                    None,
                )
                .with_action(LogAction::Revive),
            );
        } else {
            stubs.push(LogStub::completed(
                event,
                completed_delta,
                processed.extra.clone(),
            ));

            if !processed.drops.is_empty() {
                stubs.push(
                    LogStub::completed(
                        event,
                        Delta::AcquireItem {
                            items: processed.drops.clone(),
                        },
                        None,
                    )
                    .with_action(LogAction::AcquireItem),
                );
            }

            // EXP is never granted on a death-causing action.
            if processed.exp_gained > 0 {
                state.exp += processed.exp_gained;
                while state.exp >= state.exp_threshold() {
                    state.exp -= state.exp_threshold();
                    let level_from = state.level;
                    state.level += 1;
                    state.level_up_points += 1;
                    info!(user = %state.user_id, level = state.level, "level up");
                    stubs.push(
                        LogStub::completed(
                            event,
                            Delta::LevelUp {
                                level_from,
                                level_to: state.level,
                                points: 1,
                            },
                            None,
                        )
                        .with_action(LogAction::LevelUp),
                    );
                }
            }
        }

        // Saturated progress forces exactly one internal MOVE follow-up.
        let mut forced_move = false;
        if state.floor_progress >= self.config.progress.cap && event != EventType::Move {
            forced_move = true;
            debug!(user = %state.user_id, floor = state.floor, "forced move");
            stubs.push(LogStub::started(
                EventType::Move,
                Delta::Move {
                    stats: StatDelta::default(),
                    floor_from: state.floor,
                    floor_to: state.floor + 1,
                    progress_before: state.floor_progress,
                },
            ));
            let moved = processor::process_forced_move(&mut state);
            stubs.push(
                LogStub::completed(EventType::Move, moved.delta, moved.extra)
                    .with_floor(state.floor),
            );
        }

        let inventory_adds = if processed.drops.is_empty() || request.skip_inventory_apply {
            None
        } else {
            match &self.inventory {
                Some(applier) => Some(applier.apply_drops(&state.user_id, &processed.drops)?),
                None => None,
            }
        };

        state.current_action = CurrentAction::Idle;
        state.current_action_started_at = None;
        state.version = state_before.version + 1;
        state.updated_at = Some(Utc::now());

        let logs = log::render(&state_before, &state, &stubs);
        Ok(ExecuteResult {
            selected_event: event,
            forced_move,
            state_before,
            state_after: state,
            raw_log_stubs: stubs,
            logs,
            drops: processed.drops,
            inventory_adds,
        })
    }
}

/// STARTED-side delta: the AP debit, plus the move fields when the event
/// itself is a saturation-selected MOVE.
fn started_delta(event: EventType, state: &PlayerState, ap_cost: i32) -> Delta {
    match event {
        EventType::Move => Delta::Move {
            stats: StatDelta::ap_debit(ap_cost),
            floor_from: state.floor,
            floor_to: state.floor + 1,
            progress_before: state.floor_progress,
        },
        _ => Delta::started(event, ap_cost),
    }
}
