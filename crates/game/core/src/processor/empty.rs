//! Empty: state passthrough.

use super::ProcessedEvent;
use crate::event::{Delta, StatDelta};

pub(super) fn process() -> ProcessedEvent {
    ProcessedEvent::new(Delta::Empty {
        stats: StatDelta::default(),
        progress: None,
    })
}
