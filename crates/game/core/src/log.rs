//! Log builder: renders in-flight stubs into the persisted log shape.

use chrono::{DateTime, Utc};

use crate::event::{Delta, Extra, LogAction, LogStatus, LogStub};
use crate::state::PlayerState;

/// Category stamped on every record this engine emits.
pub const CATEGORY_EXPLORATION: &str = "exploration";

/// Externally persisted log record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PersistedLogRecord {
    pub category: String,
    pub action: LogAction,
    pub status: LogStatus,
    pub floor: u32,
    /// 1-based position within this invocation's log sequence.
    pub turn_number: u32,
    pub state_version_before: u64,
    /// Present on COMPLETED records only.
    pub state_version_after: Option<u64>,
    pub delta: Delta,
    pub extra: Option<Extra>,
    pub created_at: DateTime<Utc>,
}

/// Render the accumulated stubs against the before/after snapshots.
///
/// Pure mapping, no side effects: STARTED records take the entry floor and
/// carry only the entry version; COMPLETED records take the final floor
/// (or the sub-event's own floor) and both version numbers.
pub fn render(
    state_before: &PlayerState,
    state_after: &PlayerState,
    stubs: &[LogStub],
) -> Vec<PersistedLogRecord> {
    let created_at = Utc::now();
    stubs
        .iter()
        .enumerate()
        .map(|(index, stub)| {
            let started = stub.status == LogStatus::Started;
            let default_floor = if started {
                state_before.floor
            } else {
                state_after.floor
            };
            PersistedLogRecord {
                category: CATEGORY_EXPLORATION.to_string(),
                action: stub.action(),
                status: stub.status,
                floor: stub.floor_override.unwrap_or(default_floor),
                turn_number: (index + 1) as u32,
                state_version_before: state_before.version,
                state_version_after: (!started).then_some(state_after.version),
                delta: stub.delta.clone(),
                extra: stub.extra.clone(),
                created_at,
            }
        })
        .collect()
}
