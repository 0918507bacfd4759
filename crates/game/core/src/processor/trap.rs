//! Trap: clamped damage; death handling belongs to the orchestrator.

use super::{EventContext, ProcessedEvent};
use crate::effect;
use crate::event::Delta;
use crate::state::PlayerState;

pub(super) fn process(state: &mut PlayerState, ctx: &mut EventContext<'_>) -> ProcessedEvent {
    let ceiling = state.max_hp + ctx.bonus.hp;
    let applied = effect::apply(state, &ctx.config.trap.effect, Some(ceiling));
    ProcessedEvent::new(Delta::Trap {
        stats: applied.stats,
        progress: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::drops::DropTableRegistry;
    use crate::monster::{MonsterRegistry, MonsterTemplate, Rarity};
    use crate::rng::SeededRng;
    use crate::state::EquipmentBonus;

    #[test]
    fn trap_damage_is_clamped_and_reported_post_clamp() {
        let mut state = PlayerState::new("u1");
        state.hp = 3;
        let config = EngineConfig::default();
        let monsters = MonsterRegistry::new([MonsterTemplate {
            code: "slime".into(),
            name: "Slime".into(),
            hp: 10,
            atk: 3,
            def: 1,
            rarity: Rarity::Normal,
            variant_of: None,
        }])
        .unwrap();
        let tables = DropTableRegistry::default();
        let mut rng = SeededRng::new("trap");
        let bonus = EquipmentBonus::default();
        let mut ctx = EventContext {
            roll: 0.5,
            rng: &mut rng,
            bonus: &bonus,
            config: &config,
            monsters: &monsters,
            drop_tables: &tables,
        };

        let result = process(&mut state, &mut ctx);
        // default trap hits for 8, but only 3 hp were there to lose
        assert_eq!(state.hp, 0);
        match result.delta {
            Delta::Trap { stats, .. } => assert_eq!(stats.hp, -3),
            other => panic!("unexpected delta: {other:?}"),
        }
    }
}
