//! Treasure: gold with an RNG-scaled bonus, plus an optional drop roll.

use super::{EventContext, ProcessedEvent};
use crate::drops;
use crate::engine::EngineError;
use crate::event::{Delta, Extra, StatDelta};
use crate::state::PlayerState;

pub(super) fn process(
    state: &mut PlayerState,
    ctx: &mut EventContext<'_>,
) -> Result<ProcessedEvent, EngineError> {
    let cfg = &ctx.config.treasure;

    let base = cfg.gold_base;
    let bonus_gold = (ctx.roll * base as f64) as i64;
    let gold_gained = base + bonus_gold;
    state.gold += gold_gained;

    let mut items = Vec::new();
    if ctx.rng.next_f64() < cfg.drop_chance {
        let table_id = &ctx.config.battle.default_drop_table;
        let table = ctx
            .drop_tables
            .get(table_id)
            .ok_or_else(|| EngineError::DropTableNotFound(table_id.clone()))?;
        items = drops::roll(table, ctx.rng, false, None)?;
    }

    let mut processed = ProcessedEvent::new(Delta::Treasure {
        stats: StatDelta::default(),
        gold: gold_gained,
        items: items.clone(),
        progress: None,
    });
    processed.extra = Some(Extra::Treasure {
        base_gold: base,
        bonus_gold,
    });
    processed.drops = items;
    Ok(processed)
}
