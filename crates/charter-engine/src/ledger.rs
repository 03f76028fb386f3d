//! Status assignment for checklist item instances.
//!
//! Status values arrive as strings from the outer layers and are parsed
//! against the closed legal set before anything reaches the store.
//! Transitions are not gated on dependency completion: any instance may
//! move to any legal status at any time, and re-assigning the current
//! status succeeds.

use std::str::FromStr;

use charter_core::{ChecklistItemInstance, InstanceStatus};

use crate::error::{EngineError, EngineResult};

/// Parses a status value, rejecting anything outside the legal set.
pub fn parse_status(value: &str) -> EngineResult<InstanceStatus> {
    InstanceStatus::from_str(value).map_err(|_| EngineError::InvalidStatus {
        value: value.to_owned(),
    })
}

/// Assigns a status to an instance, returning the previous status.
///
/// Idempotent: assigning the status the instance already has succeeds and
/// reports that same status as the previous one.
pub fn assign_status(
    instance: &mut ChecklistItemInstance,
    value: &str,
) -> EngineResult<InstanceStatus> {
    let status = parse_status(value)?;
    let previous = instance.status;
    instance.status = status;
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use charter_core::{ChecklistItemInstanceId, ChecklistItemTemplateId, WorkflowInstanceId};
    use jiff::Timestamp;

    use super::*;

    fn instance() -> ChecklistItemInstance {
        let now = Timestamp::UNIX_EPOCH;
        ChecklistItemInstance {
            id: ChecklistItemInstanceId::new(),
            workflow_instance_id: WorkflowInstanceId::new(),
            checklist_item_template_id: ChecklistItemTemplateId::new(),
            status: InstanceStatus::NotStarted,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_assign_reports_previous_status() {
        let mut instance = instance();
        let previous = assign_status(&mut instance, "in_progress").unwrap();
        assert_eq!(previous, InstanceStatus::NotStarted);
        assert_eq!(instance.status, InstanceStatus::InProgress);
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut instance = instance();
        assign_status(&mut instance, "completed").unwrap();
        let previous = assign_status(&mut instance, "completed").unwrap();
        assert_eq!(previous, InstanceStatus::Completed);
        assert_eq!(instance.status, InstanceStatus::Completed);
    }

    #[test]
    fn test_illegal_status_is_rejected_without_mutation() {
        let mut instance = instance();
        let err = assign_status(&mut instance, "archived").unwrap_err();
        assert!(matches!(err, EngineError::InvalidStatus { .. }));
        assert_eq!(instance.status, InstanceStatus::NotStarted);
    }

    #[test]
    fn test_no_dependency_gating() {
        // Jumping straight to completed is allowed; gating on dependency
        // completion is a caller-side policy if ever wanted.
        let mut instance = instance();
        let previous = assign_status(&mut instance, "completed").unwrap();
        assert_eq!(previous, InstanceStatus::NotStarted);
    }
}
