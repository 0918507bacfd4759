//! Player progression state.
//!
//! The engine never owns a player: callers pass a [`PlayerState`] snapshot
//! into each invocation and receive a new snapshot back. Persistence and
//! concurrency control (per-player locking, optimistic version checks) are
//! entirely the caller's concern.

use chrono::{DateTime, Utc};

use crate::event::EventType;

/// Snapshot of one player's progression record.
///
/// # Invariants
///
/// - `floor_progress` stays in `[0, 100]`.
/// - `hp` stays in `[0, max_hp]` outside the single tick where it is
///   evaluated for death.
/// - `version` is monotonic and incremented by exactly one per completed
///   engine invocation, regardless of internal sub-steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerState {
    pub user_id: String,
    pub level: u32,
    pub exp: u64,
    /// Unspent points granted on level-up.
    pub level_up_points: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub atk: i32,
    pub def: i32,
    pub luck: i32,
    pub floor: u32,
    /// Highest floor ever reached.
    pub max_floor: u32,
    /// 0-100 meter; saturation forces a floor advance.
    pub floor_progress: u32,
    pub gold: i64,
    /// Action points debited by every invocation.
    pub ap: i32,
    pub current_action: CurrentAction,
    pub current_action_started_at: Option<DateTime<Utc>>,
    pub version: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PlayerState {
    /// Fresh level-1 record for the given user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            level: 1,
            exp: 0,
            level_up_points: 0,
            hp: 50,
            max_hp: 50,
            atk: 10,
            def: 5,
            luck: 1,
            floor: 1,
            max_floor: 1,
            floor_progress: 0,
            gold: 0,
            ap: 10,
            current_action: CurrentAction::Idle,
            current_action_started_at: None,
            version: 0,
            updated_at: None,
        }
    }

    /// EXP required to go from the current level to the next.
    pub fn exp_threshold(&self) -> u64 {
        u64::from(self.level) * 10
    }
}

/// What the player is doing right now.
///
/// Set to the in-flight event for the duration of one invocation and
/// restored to `Idle` before the result is returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrentAction {
    #[default]
    Idle,
    Event(EventType),
}

/// Additive stat bonus from equipped items, valid for one invocation only.
///
/// `hp` raises the effective maximum HP used for healing ceilings and
/// revival; the other fields raise the matching combat stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EquipmentBonus {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub luck: i32,
}
