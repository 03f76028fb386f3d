//! Checklist item instance status enumeration.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Progress state of a checklist item instance.
///
/// These are the only legal states; anything else arriving over the wire
/// must be rejected before it reaches the store. Transitions are not
/// gated on dependency completion.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InstanceStatus {
    /// Work has not begun.
    #[default]
    NotStarted,

    /// Work is underway.
    InProgress,

    /// Work is finished.
    Completed,
}

impl InstanceStatus {
    /// Returns whether this status counts as finished.
    #[inline]
    pub const fn is_completed(&self) -> bool {
        matches!(self, InstanceStatus::Completed)
    }
}
