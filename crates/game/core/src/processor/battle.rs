//! Battle resolution: elite roll, monster pick, scaled combat loop, rewards.

use super::{EventContext, ProcessedEvent};
use crate::config::BattleConfig;
use crate::drops;
use crate::engine::EngineError;
use crate::event::{BattleOutcome, Delta, Extra, StatDelta};
use crate::monster::{self, MonsterTemplate};
use crate::state::PlayerState;

/// Crit chance for one attack roll.
pub fn crit_chance(config: &BattleConfig, luck: i32) -> f64 {
    config.crit_base + f64::from(luck.max(0)) * config.crit_luck_factor
}

/// Round half up; EXP scaling uses the same rounding as monster stats.
fn round_half_up(value: f64) -> u64 {
    (value + 0.5).floor() as u64
}

pub(super) fn process(
    state: &mut PlayerState,
    ctx: &mut EventContext<'_>,
) -> Result<ProcessedEvent, EngineError> {
    let cfg = &ctx.config.battle;

    // The selection roll doubles as the elite roll.
    let elite_rolled = ctx.roll < cfg.elite_rate;
    let picked = ctx.monsters.pick_normal(ctx.rng);
    let (template, is_elite): (&MonsterTemplate, bool) = if elite_rolled {
        match ctx.monsters.elite_variant_of(&picked.code) {
            Some(elite) => (elite, true),
            None => (picked, false),
        }
    } else {
        (picked, false)
    };

    let scaled = monster::scale(template, state.floor, &ctx.config.scaling);

    // Equipment bonus raises effective stats for this computation only.
    let atk = state.atk + ctx.bonus.atk;
    let def = state.def + ctx.bonus.def;
    let luck = state.luck + ctx.bonus.luck;

    let mut player_hp = state.hp;
    let mut monster_hp = scaled.hp;
    let mut outcome = BattleOutcome::TurnLimit;
    let mut turns = 0;

    for turn in 1..=cfg.turn_limit {
        turns = turn;

        // Player strikes first.
        let crit = ctx.rng.next_f64() < crit_chance(cfg, luck);
        let mut damage = (atk - scaled.def).max(1);
        if crit {
            damage *= 2;
        }
        monster_hp -= damage;
        if monster_hp <= 0 {
            outcome = BattleOutcome::Victory;
            break;
        }

        let crit = ctx.rng.next_f64() < crit_chance(cfg, 0);
        let mut damage = (scaled.atk - def).max(1);
        if crit {
            damage *= 2;
        }
        player_hp -= damage;
        if player_hp <= 0 {
            outcome = BattleOutcome::Defeat;
            break;
        }
    }

    let clamped_hp = player_hp.max(0);
    let hp_delta = clamped_hp - state.hp;
    state.hp = clamped_hp;

    let mut exp_gained = 0;
    let mut drop_results = Vec::new();
    if outcome == BattleOutcome::Victory {
        exp_gained = round_half_up(cfg.exp_base as f64 * scaled.floor_multiplier);
        if is_elite {
            exp_gained = round_half_up(exp_gained as f64 * cfg.elite_exp_multiplier);
        }

        let mut chance = cfg.drop_chance;
        if is_elite {
            chance = (chance * cfg.elite_drop_chance_multiplier).min(1.0);
        }
        if ctx.rng.next_f64() < chance {
            let table = ctx
                .drop_tables
                .get(&cfg.default_drop_table)
                .ok_or_else(|| EngineError::DropTableNotFound(cfg.default_drop_table.clone()))?;
            drop_results = drops::roll(table, ctx.rng, is_elite, None)?;
        }
    }

    let mut processed = ProcessedEvent::new(Delta::Battle {
        stats: StatDelta {
            hp: hp_delta,
            ..StatDelta::default()
        },
        exp: exp_gained,
        progress: None,
    });
    processed.extra = Some(Extra::Battle {
        monster_code: template.code.clone(),
        monster_name: template.name.clone(),
        elite: is_elite,
        outcome,
        turns,
    });
    processed.exp_gained = exp_gained;
    processed.drops = drop_results;
    processed.outcome = Some(outcome);
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::drops::{DropEntry, DropTable, DropTableRegistry};
    use crate::monster::{MonsterRegistry, Rarity};
    use crate::rng::SeededRng;
    use crate::state::EquipmentBonus;

    fn registry() -> MonsterRegistry {
        MonsterRegistry::new([
            MonsterTemplate {
                code: "slime".into(),
                name: "Slime".into(),
                hp: 10,
                atk: 3,
                def: 1,
                rarity: Rarity::Normal,
                variant_of: None,
            },
            MonsterTemplate {
                code: "slime_king".into(),
                name: "Slime King".into(),
                hp: 20,
                atk: 5,
                def: 2,
                rarity: Rarity::Elite,
                variant_of: Some("slime".into()),
            },
        ])
        .unwrap()
    }

    fn drop_tables() -> DropTableRegistry {
        DropTableRegistry::new([DropTable {
            table_id: "default".into(),
            drops: vec![DropEntry {
                item_code: "potion".into(),
                weight: 1.0,
                min_quantity: 1,
                max_quantity: 1,
            }],
        }])
        .unwrap()
    }

    fn run(roll: f64, state: &mut PlayerState, config: &EngineConfig) -> ProcessedEvent {
        let monsters = registry();
        let tables = drop_tables();
        let mut rng = SeededRng::new("battle-test");
        let bonus = EquipmentBonus::default();
        let mut ctx = EventContext {
            roll,
            rng: &mut rng,
            bonus: &bonus,
            config,
            monsters: &monsters,
            drop_tables: &tables,
        };
        process(state, &mut ctx).unwrap()
    }

    #[test]
    fn overwhelming_player_wins_and_earns_exp() {
        let mut state = PlayerState::new("u1");
        state.atk = 100;
        let config = EngineConfig::default();
        let result = run(0.9, &mut state, &config);
        assert_eq!(result.outcome, Some(BattleOutcome::Victory));
        assert!(result.exp_gained > 0);
        assert!(state.hp > 0);
    }

    #[test]
    fn hopeless_player_is_defeated_and_left_at_zero_hp() {
        let mut state = PlayerState::new("u1");
        state.hp = 5;
        state.max_hp = 5;
        state.atk = 0;
        state.def = 0;
        let mut config = EngineConfig::default();
        config.battle.crit_base = 0.0;
        config.battle.crit_luck_factor = 0.0;
        let result = run(0.9, &mut state, &config);
        assert_eq!(result.outcome, Some(BattleOutcome::Defeat));
        assert_eq!(state.hp, 0);
        assert_eq!(result.exp_gained, 0);
        assert!(result.drops.is_empty());
    }

    #[test]
    fn turn_limit_ends_combat_without_rewards() {
        let mut state = PlayerState::new("u1");
        state.hp = 10_000;
        state.max_hp = 10_000;
        state.atk = 0;
        state.def = 1_000;
        let mut config = EngineConfig::default();
        config.battle.turn_limit = 3;
        config.battle.crit_base = 0.0;
        config.battle.crit_luck_factor = 0.0;
        let result = run(0.9, &mut state, &config);
        assert_eq!(result.outcome, Some(BattleOutcome::TurnLimit));
        assert_eq!(result.exp_gained, 0);
    }

    #[test]
    fn elite_roll_promotes_to_the_linked_variant() {
        let mut state = PlayerState::new("u1");
        state.atk = 100;
        let mut config = EngineConfig::default();
        config.battle.elite_rate = 0.5;
        let result = run(0.1, &mut state, &config);
        match result.extra {
            Some(Extra::Battle {
                monster_code,
                elite,
                ..
            }) => {
                assert_eq!(monster_code, "slime_king");
                assert!(elite);
            }
            other => panic!("unexpected extra: {other:?}"),
        }
    }

    #[test]
    fn minimum_damage_is_one_for_both_sides() {
        let mut config = EngineConfig::default();
        config.battle.crit_base = 0.0;
        config.battle.crit_luck_factor = 0.0;
        // Neither side can break through the other's defense.
        let mut state = PlayerState::new("u1");
        state.hp = 10_000;
        state.max_hp = 10_000;
        state.atk = 0;
        state.def = 1_000;
        let before = state.hp;
        let result = run(0.9, &mut state, &config);
        // Slime has 10 hp: ten player chips to win, nine monster chips taken.
        assert_eq!(result.outcome, Some(BattleOutcome::Victory));
        assert_eq!(state.hp, before - 9);
    }

    #[test]
    fn crit_chance_grows_with_luck() {
        let config = EngineConfig::default();
        let base = crit_chance(&config.battle, 0);
        let lucky = crit_chance(&config.battle, 10);
        assert!(lucky > base);
        assert_eq!(lucky, config.battle.crit_base + 10.0 * config.battle.crit_luck_factor);
    }
}
