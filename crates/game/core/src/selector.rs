//! Weighted event selection.

use crate::config::EventWeights;
use crate::event::EventType;

/// Cumulative-band order. Fixed: changing it changes every replay.
const BAND_ORDER: [EventType; 4] = [
    EventType::Battle,
    EventType::Treasure,
    EventType::Rest,
    EventType::Trap,
];

/// Pick the event for one action.
///
/// Saturated floor progress (>= 100) forces [`EventType::Move`] without
/// consuming the roll. Otherwise `rng_value * total` is mapped onto
/// cumulative weight bands in the order BATTLE, TREASURE, REST, TRAP; the
/// first band whose cumulative upper bound reaches the scaled value wins,
/// with ties going to the earlier band. A non-positive weight total falls
/// back to BATTLE.
pub fn select(floor_progress: u32, rng_value: f64, weights: &EventWeights) -> EventType {
    if floor_progress >= 100 {
        return EventType::Move;
    }

    let total = weights.total();
    if total <= 0.0 {
        return EventType::Battle;
    }

    let scaled = rng_value * total;
    let mut cumulative = 0.0;
    for event in BAND_ORDER {
        cumulative += weights.get(event);
        if scaled <= cumulative {
            return event;
        }
    }

    // Floating rounding can leave `scaled` a hair above the last bound.
    EventType::Trap
}
