//! Engine configuration: tunable balance parameters.
//!
//! The whole configuration is an explicitly constructed, immutable value
//! injected once at engine construction. Nothing in the core reads files
//! or global state; `delve-content` builds these from TOML catalogs.

use crate::effect::Effect;
use crate::event::EventType;

/// Relative selection weights for the four rollable events.
///
/// MOVE and EMPTY have no weight: MOVE only occurs through saturation and
/// EMPTY only through explicit requests.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EventWeights {
    pub battle: f64,
    pub treasure: f64,
    pub rest: f64,
    pub trap: f64,
}

impl EventWeights {
    pub fn total(&self) -> f64 {
        self.battle + self.treasure + self.rest + self.trap
    }

    /// Weight of one event; zero for the never-rolled kinds.
    pub fn get(&self, event: EventType) -> f64 {
        match event {
            EventType::Battle => self.battle,
            EventType::Treasure => self.treasure,
            EventType::Rest => self.rest,
            EventType::Trap => self.trap,
            EventType::Move | EventType::Empty => 0.0,
        }
    }
}

impl Default for EventWeights {
    fn default() -> Self {
        Self {
            battle: 50.0,
            treasure: 5.0,
            rest: 40.0,
            trap: 5.0,
        }
    }
}

/// Monster stat scaling parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// Floors at or below this never scale.
    pub base_floor: u32,
    /// Stat growth per floor above the base.
    pub floor_scale_rate: f64,
    pub elite_multiplier: f64,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            base_floor: 1,
            floor_scale_rate: 0.01,
            elite_multiplier: 1.3,
        }
    }
}

/// Battle resolution parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Chance the picked monster is promoted to its elite variant.
    pub elite_rate: f64,
    /// Base crit chance for every attack roll.
    pub crit_base: f64,
    /// Extra crit chance per point of luck.
    pub crit_luck_factor: f64,
    /// Combat ends without victory rewards once this many turns elapse.
    pub turn_limit: u32,
    /// EXP granted for a floor-1 victory; scales with the floor multiplier.
    pub exp_base: u64,
    pub elite_exp_multiplier: f64,
    /// Chance a victory rolls the drop table at all.
    pub drop_chance: f64,
    /// Multiplier on `drop_chance` for elite victories (capped at 1).
    pub elite_drop_chance_multiplier: f64,
    /// Table rolled on victorious battles and treasure finds.
    pub default_drop_table: String,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            elite_rate: 0.1,
            crit_base: 0.05,
            crit_luck_factor: 0.01,
            turn_limit: 30,
            exp_base: 5,
            elite_exp_multiplier: 1.5,
            drop_chance: 0.3,
            elite_drop_chance_multiplier: 2.0,
            default_drop_table: "default".to_string(),
        }
    }
}

/// Rest event parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// Healing applied on rest; must not damage.
    pub effect: Effect,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            effect: Effect {
                hp_ratio: 0.3,
                ..Effect::default()
            },
        }
    }
}

/// Trap event parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrapConfig {
    /// Damage applied on a sprung trap; must not heal.
    pub effect: Effect,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            effect: Effect {
                hp: -8,
                ..Effect::default()
            },
        }
    }
}

/// Treasure event parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TreasureConfig {
    /// Guaranteed gold; the RNG adds up to the same amount again.
    pub gold_base: i64,
    /// Chance the find also rolls the default drop table.
    pub drop_chance: f64,
}

impl Default for TreasureConfig {
    fn default() -> Self {
        Self {
            gold_base: 10,
            drop_chance: 0.5,
        }
    }
}

/// Floor-progress accrual rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub battle_gain: u32,
    /// Accrual for every non-battle, non-move event.
    pub other_gain: u32,
    pub cap: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            battle_gain: 20,
            other_gain: 10,
            cap: 100,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: EventWeights,
    pub battle: BattleConfig,
    pub rest: RestConfig,
    pub trap: TrapConfig,
    pub treasure: TreasureConfig,
    pub scaling: ScalingConfig,
    pub progress: ProgressConfig,
}

impl EngineConfig {
    /// Default AP debited per action.
    pub const DEFAULT_AP_COST: i32 = 1;
}
