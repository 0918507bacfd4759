//! Floor advance: +1 floor, progress reset, max-floor bookkeeping.

use super::ProcessedEvent;
use crate::event::{Delta, Extra, MoveReason, StatDelta};
use crate::state::PlayerState;

pub(super) fn process(state: &mut PlayerState, reason: MoveReason) -> ProcessedEvent {
    let floor_from = state.floor;
    let progress_before = state.floor_progress;

    state.floor += 1;
    state.max_floor = state.max_floor.max(state.floor);
    state.floor_progress = 0;

    let mut processed = ProcessedEvent::new(Delta::Move {
        stats: StatDelta::default(),
        floor_from,
        floor_to: state.floor,
        progress_before,
    });
    processed.extra = Some(Extra::Move { reason });
    processed
}
