//! Monster templates, the eligible-pool registry, and per-floor scaling.

use std::collections::BTreeMap;

use crate::config::ScalingConfig;
use crate::error::RegistryError;

/// Monster rarity tier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    #[default]
    Normal,
    Elite,
}

/// Static monster definition as loaded from the catalog.
///
/// Elite templates link back to their normal form through `variant_of`;
/// the battle processor promotes a picked normal monster to its elite
/// variant when the elite roll succeeds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MonsterTemplate {
    pub code: String,
    pub name: String,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub variant_of: Option<String>,
}

/// Validated, immutable monster catalog injected at engine construction.
///
/// The normal-rarity templates form the eligible pool the battle processor
/// picks from; elite templates are reachable only via promotion.
#[derive(Clone, Debug)]
pub struct MonsterRegistry {
    templates: BTreeMap<String, MonsterTemplate>,
    normal_pool: Vec<String>,
    /// normal code -> elite variant code
    elite_variants: BTreeMap<String, String>,
}

impl MonsterRegistry {
    pub fn new(templates: impl IntoIterator<Item = MonsterTemplate>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        let mut normal_pool = Vec::new();
        for template in templates {
            if map.contains_key(&template.code) {
                return Err(RegistryError::DuplicateMonsterCode {
                    code: template.code,
                });
            }
            if template.rarity == Rarity::Normal {
                normal_pool.push(template.code.clone());
            }
            map.insert(template.code.clone(), template);
        }

        if normal_pool.is_empty() {
            return Err(RegistryError::EmptyMonsterPool);
        }

        let mut elite_variants = BTreeMap::new();
        for template in map.values() {
            if let Some(base) = &template.variant_of {
                if !map.contains_key(base) {
                    return Err(RegistryError::UnknownVariantTarget {
                        code: template.code.clone(),
                        variant_of: base.clone(),
                    });
                }
                if template.rarity == Rarity::Elite {
                    elite_variants.insert(base.clone(), template.code.clone());
                }
            }
        }

        Ok(Self {
            templates: map,
            normal_pool,
            elite_variants,
        })
    }

    pub fn get(&self, code: &str) -> Option<&MonsterTemplate> {
        self.templates.get(code)
    }

    /// Eligible normal-rarity pool, in insertion order.
    pub fn normal_pool(&self) -> &[String] {
        &self.normal_pool
    }

    /// Pick one normal-rarity template uniformly from the pool.
    ///
    /// The pool is never empty (construction rejects that), so this always
    /// yields a template.
    pub fn pick_normal(&self, rng: &mut crate::rng::SeededRng) -> &MonsterTemplate {
        let code = &self.normal_pool[rng.next_index(self.normal_pool.len())];
        &self.templates[code]
    }

    /// The elite variant linked to a normal monster, if one exists.
    pub fn elite_variant_of(&self, code: &str) -> Option<&MonsterTemplate> {
        self.elite_variants
            .get(code)
            .and_then(|elite| self.templates.get(elite))
    }
}

/// Derived (never stored) stats of a monster scaled to a floor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaledMonsterStats {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub floor: u32,
    pub floor_multiplier: f64,
    pub rarity_multiplier: f64,
}

/// Round half up, the rounding the scaling formulas are specified with.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Scale a template's stats to a floor.
///
/// `floor_multiplier = 1 + max(0, floor - base_floor) * floor_scale_rate`;
/// floors below the base clamp to it and never scale down. Elite rarity
/// multiplies on top.
pub fn scale(template: &MonsterTemplate, floor: u32, config: &ScalingConfig) -> ScaledMonsterStats {
    let floors_above = floor.saturating_sub(config.base_floor);
    let floor_multiplier = 1.0 + f64::from(floors_above) * config.floor_scale_rate;
    let rarity_multiplier = match template.rarity {
        Rarity::Elite => config.elite_multiplier,
        Rarity::Normal => 1.0,
    };

    let combined = floor_multiplier * rarity_multiplier;
    ScaledMonsterStats {
        hp: round_half_up(f64::from(template.hp) * combined),
        atk: round_half_up(f64::from(template.atk) * combined),
        def: round_half_up(f64::from(template.def) * combined),
        floor,
        floor_multiplier,
        rarity_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(code: &str, rarity: Rarity, variant_of: Option<&str>) -> MonsterTemplate {
        MonsterTemplate {
            code: code.to_string(),
            name: code.to_string(),
            hp: 30,
            atk: 8,
            def: 3,
            rarity,
            variant_of: variant_of.map(str::to_string),
        }
    }

    #[test]
    fn registry_requires_a_normal_pool() {
        let err = MonsterRegistry::new([template("boss", Rarity::Elite, None)]).unwrap_err();
        assert_eq!(err, RegistryError::EmptyMonsterPool);
    }

    #[test]
    fn registry_rejects_dangling_variants() {
        let err = MonsterRegistry::new([
            template("slime", Rarity::Normal, None),
            template("slime_king", Rarity::Elite, Some("ghost")),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownVariantTarget { .. }));
    }

    #[test]
    fn elite_variant_lookup_follows_the_link() {
        let registry = MonsterRegistry::new([
            template("slime", Rarity::Normal, None),
            template("slime_king", Rarity::Elite, Some("slime")),
            template("bat", Rarity::Normal, None),
        ])
        .unwrap();

        assert_eq!(
            registry.elite_variant_of("slime").map(|t| t.code.as_str()),
            Some("slime_king")
        );
        assert!(registry.elite_variant_of("bat").is_none());
    }

    #[test]
    fn floor_one_is_unscaled() {
        let t = template("slime", Rarity::Normal, None);
        let scaled = scale(&t, 1, &ScalingConfig::default());
        assert_eq!(scaled.hp, 30);
        assert_eq!(scaled.atk, 8);
        assert_eq!(scaled.def, 3);
        assert_eq!(scaled.floor_multiplier, 1.0);
    }

    #[test]
    fn floors_below_base_never_scale_down() {
        let t = template("slime", Rarity::Normal, None);
        let config = ScalingConfig {
            base_floor: 5,
            ..ScalingConfig::default()
        };
        let scaled = scale(&t, 2, &config);
        assert_eq!(scaled.floor_multiplier, 1.0);
        assert_eq!(scaled.hp, 30);
    }

    #[test]
    fn scaling_rounds_half_up() {
        let mut t = template("slime", Rarity::Normal, None);
        t.hp = 25;
        // floor 11 with default 1% rate: 25 * 1.10 = 27.5 -> 28
        let scaled = scale(&t, 11, &ScalingConfig::default());
        assert_eq!(scaled.hp, 28);
    }

    #[test]
    fn elite_multiplier_compounds_with_floor() {
        let t = template("slime_king", Rarity::Elite, Some("slime"));
        // floor 11: 1.10 * 1.3 = 1.43; 30 * 1.43 = 42.9 -> 43
        let scaled = scale(&t, 11, &ScalingConfig::default());
        assert_eq!(scaled.hp, 43);
        assert_eq!(scaled.rarity_multiplier, 1.3);
    }
}
