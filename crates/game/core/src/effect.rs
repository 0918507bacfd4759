//! Generic, clamped application of stat and resource effects.
//!
//! Rest and Trap both go through [`apply`], which guarantees the reported
//! delta is what actually changed after clamping, never the requested
//! amount.

use crate::event::StatDelta;
use crate::state::PlayerState;

/// A stat/resource change request.
///
/// `hp` and `hp_ratio` combine: the flat amount plus the ratio of the
/// effective max HP, applied in one clamped step. Negative values damage,
/// positive values heal.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Effect {
    #[serde(default)]
    pub hp: i32,
    /// Fraction of (bonus-adjusted) max HP added to `hp`.
    #[serde(default)]
    pub hp_ratio: f64,
    #[serde(default)]
    pub ap: i32,
    #[serde(default)]
    pub atk: i32,
    #[serde(default)]
    pub def: i32,
    #[serde(default)]
    pub luck: i32,
    #[serde(default)]
    pub gold: i64,
}

/// The post-clamp outcome of applying an [`Effect`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppliedEffect {
    pub stats: StatDelta,
    pub gold: i64,
}

/// Apply `effect` to `state`, clamping every resource to its valid range.
///
/// `max_hp_override` is the healing ceiling; pass `max_hp + bonus.hp` when
/// an equipment bonus is in play, otherwise the state's own maximum.
/// The resulting HP stays in `[0, ceiling]`; AP, atk, def, luck, and gold
/// each floor at 0. Returns the deltas that were actually applied.
pub fn apply(state: &mut PlayerState, effect: &Effect, max_hp_override: Option<i32>) -> AppliedEffect {
    let max_hp = max_hp_override.unwrap_or(state.max_hp).max(0);

    let requested_hp = effect.hp + (effect.hp_ratio * f64::from(max_hp)).floor() as i32;
    let new_hp = (state.hp + requested_hp).clamp(0, max_hp);
    let hp_delta = new_hp - state.hp;
    state.hp = new_hp;

    let new_ap = (state.ap + effect.ap).max(0);
    let ap_delta = new_ap - state.ap;
    state.ap = new_ap;

    let new_atk = (state.atk + effect.atk).max(0);
    let atk_delta = new_atk - state.atk;
    state.atk = new_atk;

    let new_def = (state.def + effect.def).max(0);
    let def_delta = new_def - state.def;
    state.def = new_def;

    let new_luck = (state.luck + effect.luck).max(0);
    let luck_delta = new_luck - state.luck;
    state.luck = new_luck;

    let new_gold = (state.gold + effect.gold).max(0);
    let gold_delta = new_gold - state.gold;
    state.gold = new_gold;

    AppliedEffect {
        stats: StatDelta {
            hp: hp_delta,
            ap: ap_delta,
            atk: atk_delta,
            def: def_delta,
            luck: luck_delta,
        },
        gold: gold_delta,
    }
}
