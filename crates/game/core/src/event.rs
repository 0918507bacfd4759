//! Event vocabulary: event kinds, log stubs, and their typed payloads.
//!
//! A processed action is described by two payload halves: [`Delta`] is the
//! machine-readable state change, [`Extra`] is descriptive detail (which
//! monster was fought, why a move happened). Both are closed tagged unions
//! so each log can only carry the fields valid for its kind.

use crate::drops::DropResult;

/// Closed set of dungeon events.
///
/// `Move` is never picked by the weighted selector; it only occurs when
/// floor progress saturates (forced move) or as the death follow-up back
/// to floor 1.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Battle,
    Treasure,
    Rest,
    Trap,
    Move,
    Empty,
}

/// Whether a log marks the start or the completion of a step.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogStatus {
    Started,
    Completed,
}

/// Action name carried by a persisted log record.
///
/// Usually derived from the event type; death, revival, level-ups, and
/// item acquisition override it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    Battle,
    Treasure,
    Rest,
    Trap,
    Move,
    Empty,
    AcquireItem,
    Death,
    Revive,
    LevelUp,
}

impl From<EventType> for LogAction {
    fn from(event: EventType) -> Self {
        match event {
            EventType::Battle => LogAction::Battle,
            EventType::Treasure => LogAction::Treasure,
            EventType::Rest => LogAction::Rest,
            EventType::Trap => LogAction::Trap,
            EventType::Move => LogAction::Move,
            EventType::Empty => LogAction::Empty,
        }
    }
}

/// Why the player died.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeathCause {
    /// Lost a battle.
    PlayerDefeated,
    /// Trap damage finished the player off.
    TrapDamage,
    /// Any other path to zero HP.
    HpDepleted,
}

/// How a battle ended.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    TurnLimit,
}

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

/// Per-stat change actually applied to the state (post-clamp).
///
/// Zero fields are omitted from serialized records; in particular a
/// COMPLETED delta never carries `ap` (the debit is only visible on the
/// STARTED log).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatDelta {
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub hp: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub ap: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub atk: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub def: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub luck: i32,
}

impl StatDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Delta carrying only an AP debit, as reported on STARTED logs.
    pub fn ap_debit(cost: i32) -> Self {
        Self {
            ap: -cost,
            ..Self::default()
        }
    }
}

/// Floor-progress accrual applied after an event (before/after the clamp).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProgressDelta {
    pub before: u32,
    pub after: u32,
}

/// Machine-readable state change, one variant per originating event plus
/// the orchestrator-level DEATH / REVIVE / LEVEL_UP records.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Delta {
    Battle {
        stats: StatDelta,
        #[serde(default, skip_serializing_if = "is_zero_u64")]
        exp: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progress: Option<ProgressDelta>,
    },
    Treasure {
        #[serde(default, skip_serializing_if = "StatDelta::is_empty")]
        stats: StatDelta,
        #[serde(default, skip_serializing_if = "is_zero_i64")]
        gold: i64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        items: Vec<DropResult>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progress: Option<ProgressDelta>,
    },
    Rest {
        stats: StatDelta,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progress: Option<ProgressDelta>,
    },
    Trap {
        stats: StatDelta,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progress: Option<ProgressDelta>,
    },
    Move {
        #[serde(default, skip_serializing_if = "StatDelta::is_empty")]
        stats: StatDelta,
        floor_from: u32,
        floor_to: u32,
        progress_before: u32,
    },
    Empty {
        #[serde(default, skip_serializing_if = "StatDelta::is_empty")]
        stats: StatDelta,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        progress: Option<ProgressDelta>,
    },
    AcquireItem {
        items: Vec<DropResult>,
    },
    /// Never carries stat deltas, only the progress reset information.
    Death {
        cause: DeathCause,
        floor_before: u32,
        progress_before: u32,
    },
    Revive {
        stats: StatDelta,
    },
    LevelUp {
        level_from: u32,
        level_to: u32,
        points: u32,
    },
}

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

impl Delta {
    /// The STARTED-side delta for an event: the AP debit and nothing else.
    pub fn started(event: EventType, ap_cost: i32) -> Self {
        let stats = StatDelta::ap_debit(ap_cost);
        match event {
            EventType::Battle => Delta::Battle {
                stats,
                exp: 0,
                progress: None,
            },
            EventType::Treasure => Delta::Treasure {
                stats,
                gold: 0,
                items: Vec::new(),
                progress: None,
            },
            EventType::Rest => Delta::Rest {
                stats,
                progress: None,
            },
            EventType::Trap => Delta::Trap {
                stats,
                progress: None,
            },
            EventType::Move => Delta::Move {
                stats,
                floor_from: 0,
                floor_to: 0,
                progress_before: 0,
            },
            EventType::Empty => Delta::Empty {
                stats,
                progress: None,
            },
        }
    }

    /// Attach the progress accrual to an event-completion delta.
    ///
    /// Move deltas report progress through their own fields and the
    /// orchestrator-level records never accrue, so those are unchanged.
    pub fn with_progress(self, delta: ProgressDelta) -> Self {
        let progress = Some(delta);
        match self {
            Delta::Battle { stats, exp, .. } => Delta::Battle {
                stats,
                exp,
                progress,
            },
            Delta::Treasure {
                stats, gold, items, ..
            } => Delta::Treasure {
                stats,
                gold,
                items,
                progress,
            },
            Delta::Rest { stats, .. } => Delta::Rest { stats, progress },
            Delta::Trap { stats, .. } => Delta::Trap { stats, progress },
            Delta::Empty { stats, .. } => Delta::Empty { stats, progress },
            other => other,
        }
    }

    /// Remove the progress field again (used when death resets progress and
    /// the reset is reported on the DEATH record instead).
    pub fn without_progress(self) -> Self {
        match self {
            Delta::Battle { stats, exp, .. } => Delta::Battle {
                stats,
                exp,
                progress: None,
            },
            Delta::Treasure {
                stats, gold, items, ..
            } => Delta::Treasure {
                stats,
                gold,
                items,
                progress: None,
            },
            Delta::Rest { stats, .. } => Delta::Rest {
                stats,
                progress: None,
            },
            Delta::Trap { stats, .. } => Delta::Trap {
                stats,
                progress: None,
            },
            Delta::Empty { stats, .. } => Delta::Empty {
                stats,
                progress: None,
            },
            other => other,
        }
    }
}

/// Descriptive log detail; the human-readable half of a record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Extra {
    Battle {
        monster_code: String,
        monster_name: String,
        elite: bool,
        outcome: BattleOutcome,
        turns: u32,
    },
    Treasure {
        base_gold: i64,
        bonus_gold: i64,
    },
    Move {
        reason: MoveReason,
    },
    Death {
        cause: DeathCause,
    },
}

/// Why a MOVE event ran.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveReason {
    /// Floor progress reached 100.
    ProgressSaturated,
    /// Selected directly while progress was already saturated at entry.
    Selected,
}

/// In-flight log record emitted while an action is being processed.
///
/// Rendered into the persisted shape by the log builder once the final
/// state (and therefore the final version number) is known.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogStub {
    pub event: EventType,
    pub status: LogStatus,
    /// Overrides the action derived from `event` (DEATH, REVIVE, ...).
    pub action_override: Option<LogAction>,
    pub delta: Delta,
    pub extra: Option<Extra>,
    /// Floor to report instead of the snapshot floor, for sub-events that
    /// changed it mid-action.
    pub floor_override: Option<u32>,
}

impl LogStub {
    pub fn started(event: EventType, delta: Delta) -> Self {
        Self {
            event,
            status: LogStatus::Started,
            action_override: None,
            delta,
            extra: None,
            floor_override: None,
        }
    }

    pub fn completed(event: EventType, delta: Delta, extra: Option<Extra>) -> Self {
        Self {
            event,
            status: LogStatus::Completed,
            action_override: None,
            delta,
            extra,
            floor_override: None,
        }
    }

    pub fn with_action(mut self, action: LogAction) -> Self {
        self.action_override = Some(action);
        self
    }

    pub fn with_floor(mut self, floor: u32) -> Self {
        self.floor_override = Some(floor);
        self
    }

    /// Action name this stub renders as.
    pub fn action(&self) -> LogAction {
        self.action_override.unwrap_or_else(|| self.event.into())
    }
}
