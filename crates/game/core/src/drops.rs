//! Drop tables: weighted item selection with quantity rolls and merging.

use std::collections::BTreeMap;

use crate::error::RegistryError;
use crate::rng::SeededRng;

/// One weighted line in a drop table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DropEntry {
    pub item_code: String,
    pub weight: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

/// A named collection of weighted drops.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DropTable {
    pub table_id: String,
    pub drops: Vec<DropEntry>,
}

impl DropTable {
    fn total_weight(&self) -> f64 {
        self.drops.iter().map(|entry| entry.weight.max(0.0)).sum()
    }
}

/// One item grant produced by rolling a table.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DropResult {
    pub item_code: String,
    pub quantity: u32,
}

/// Validated, immutable set of drop tables injected at engine construction.
#[derive(Clone, Debug, Default)]
pub struct DropTableRegistry {
    tables: BTreeMap<String, DropTable>,
}

impl DropTableRegistry {
    /// Build a registry, rejecting tables whose usable weight sum is not
    /// positive. Configuration defects surface here, never at roll time.
    pub fn new(tables: impl IntoIterator<Item = DropTable>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for table in tables {
            if table.drops.is_empty() || table.total_weight() <= 0.0 {
                return Err(RegistryError::ZeroWeightTable {
                    table_id: table.table_id,
                });
            }
            for entry in &table.drops {
                if entry.min_quantity > entry.max_quantity {
                    return Err(RegistryError::InvalidQuantityRange {
                        table_id: table.table_id.clone(),
                        item_code: entry.item_code.clone(),
                    });
                }
            }
            map.insert(table.table_id.clone(), table);
        }
        Ok(Self { tables: map })
    }

    pub fn get(&self, table_id: &str) -> Option<&DropTable> {
        self.tables.get(table_id)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Extra rolls granted when the defeated monster was elite.
pub const DEFAULT_ELITE_BONUS_ROLLS: u32 = 1;

/// Roll a table and merge the results by item code.
///
/// Each individual roll picks one entry by cumulative weight (the last
/// entry absorbs floating-point rounding), then draws a quantity uniformly
/// from `[max(1, min), max]`. `rolls` defaults to 1; elite monsters add
/// `DEFAULT_ELITE_BONUS_ROLLS` on top. Same-item results are summed in
/// first-seen order, never duplicated.
pub fn roll(
    table: &DropTable,
    rng: &mut SeededRng,
    is_elite: bool,
    rolls: Option<u32>,
) -> Result<Vec<DropResult>, RegistryError> {
    let total_weight = table.total_weight();
    if total_weight <= 0.0 {
        // Registry construction already rejects this; kept as a hard stop
        // for tables built outside the registry.
        return Err(RegistryError::ZeroWeightTable {
            table_id: table.table_id.clone(),
        });
    }

    let base_rolls = rolls.unwrap_or(1);
    let total_rolls = base_rolls + if is_elite { DEFAULT_ELITE_BONUS_ROLLS } else { 0 };

    let mut merged: Vec<DropResult> = Vec::new();
    for _ in 0..total_rolls {
        let entry = pick_entry(table, total_weight, rng);

        let min = entry.min_quantity.max(1);
        let max = entry.max_quantity.max(min);
        let span = f64::from(max - min + 1);
        let quantity = min + (rng.next_f64() * span) as u32;
        let quantity = quantity.min(max);

        match merged.iter_mut().find(|r| r.item_code == entry.item_code) {
            Some(existing) => existing.quantity += quantity,
            None => merged.push(DropResult {
                item_code: entry.item_code.clone(),
                quantity,
            }),
        }
    }

    Ok(merged)
}

fn pick_entry<'t>(table: &'t DropTable, total_weight: f64, rng: &mut SeededRng) -> &'t DropEntry {
    let target = rng.next_f64() * total_weight;
    let mut cumulative = 0.0;
    for entry in &table.drops {
        cumulative += entry.weight.max(0.0);
        if target <= cumulative {
            return entry;
        }
    }
    // Fallback for floating rounding.
    table
        .drops
        .last()
        .expect("registry rejects empty tables")
}
