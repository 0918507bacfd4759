//! Rest: heal toward the bonus-adjusted maximum HP.

use super::{EventContext, ProcessedEvent};
use crate::effect;
use crate::event::Delta;
use crate::state::PlayerState;

pub(super) fn process(state: &mut PlayerState, ctx: &mut EventContext<'_>) -> ProcessedEvent {
    let ceiling = state.max_hp + ctx.bonus.hp;
    let applied = effect::apply(state, &ctx.config.rest.effect, Some(ceiling));
    ProcessedEvent::new(Delta::Rest {
        stats: applied.stats,
        progress: None,
    })
}
