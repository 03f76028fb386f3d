//! External-dependency projection for workflow diagrams.
//!
//! A workflow diagram shows, next to the workflow's own items, the other
//! workflows those items directly depend on. Only direct (one-hop) edges
//! count here: the diagram answers "what does this stage wait on
//! elsewhere", not the full transitive closure.

use std::collections::{HashMap, HashSet};

use charter_core::{ChecklistItemTemplate, ChecklistItemTemplateId, WorkflowTemplateId};
use serde::{Deserialize, Serialize};

/// A workflow referenced from outside itself, with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalWorkflowRef {
    /// The referenced workflow.
    pub workflow_template_id: WorkflowTemplateId,
    /// The referenced workflow's name.
    pub name: String,
}

/// Render-ready projection of a workflow and its external dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramView {
    /// The workflow being rendered.
    pub workflow_template_id: WorkflowTemplateId,
    /// The workflow's own items, in order.
    pub items: Vec<ChecklistItemTemplate>,
    /// Externally-owned workflows the items directly depend on,
    /// deduplicated, sorted by name for stable rendering.
    pub external_workflows: Vec<ExternalWorkflowRef>,
}

/// Computes the set of foreign workflows that `workflow_id`'s items
/// directly depend on.
///
/// `items` is the full item set of the governance template;
/// `item_owners` maps every known item to its owning workflow. Dependency
/// ids missing from `item_owners` (deleted items) are silently skipped,
/// and the result is order-independent set output.
pub fn external_workflow_dependencies(
    workflow_id: WorkflowTemplateId,
    items: &[ChecklistItemTemplate],
    item_owners: &HashMap<ChecklistItemTemplateId, WorkflowTemplateId>,
) -> HashSet<WorkflowTemplateId> {
    let mut external = HashSet::new();
    for item in items.iter().filter(|i| i.workflow_template_id == workflow_id) {
        for dependency in &item.dependencies_requires {
            let Some(&owner) = item_owners.get(dependency) else {
                continue;
            };
            if owner != workflow_id {
                external.insert(owner);
            }
        }
    }
    external
}

/// Builds the owner map consumed by
/// [`external_workflow_dependencies`] from an item snapshot.
pub fn item_owner_map(
    items: &[ChecklistItemTemplate],
) -> HashMap<ChecklistItemTemplateId, WorkflowTemplateId> {
    items
        .iter()
        .map(|item| (item.id, item.workflow_template_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use charter_core::ItemKind;
    use jiff::Timestamp;

    use super::*;

    fn item(
        workflow: WorkflowTemplateId,
        order: i32,
        deps: Vec<ChecklistItemTemplateId>,
    ) -> ChecklistItemTemplate {
        let now = Timestamp::UNIX_EPOCH;
        ChecklistItemTemplate {
            id: ChecklistItemTemplateId::new(),
            workflow_template_id: workflow,
            name: format!("item {order}"),
            description: String::new(),
            kind: ItemKind::Task,
            order,
            dependencies_requires: deps,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_cross_workflow_dependency_is_projected() {
        let w1 = WorkflowTemplateId::new();
        let w2 = WorkflowTemplateId::new();
        let i1 = item(w1, 0, vec![]);
        let i2 = item(w2, 0, vec![i1.id]);
        let items = vec![i1, i2];
        let owners = item_owner_map(&items);

        assert_eq!(
            external_workflow_dependencies(w2, &items, &owners),
            HashSet::from([w1])
        );
        assert!(external_workflow_dependencies(w1, &items, &owners).is_empty());
    }

    #[test]
    fn test_same_workflow_dependencies_are_not_external() {
        let w = WorkflowTemplateId::new();
        let first = item(w, 0, vec![]);
        let second = item(w, 1, vec![first.id]);
        let items = vec![first, second];
        let owners = item_owner_map(&items);

        assert!(external_workflow_dependencies(w, &items, &owners).is_empty());
    }

    #[test]
    fn test_duplicate_targets_are_deduplicated() {
        let w1 = WorkflowTemplateId::new();
        let w2 = WorkflowTemplateId::new();
        let a = item(w1, 0, vec![]);
        let b = item(w1, 1, vec![]);
        let dependent_one = item(w2, 0, vec![a.id]);
        let dependent_two = item(w2, 1, vec![a.id, b.id]);
        let items = vec![a, b, dependent_one, dependent_two];
        let owners = item_owner_map(&items);

        assert_eq!(
            external_workflow_dependencies(w2, &items, &owners),
            HashSet::from([w1])
        );
    }

    #[test]
    fn test_dangling_dependency_is_skipped() {
        let w = WorkflowTemplateId::new();
        let deleted = ChecklistItemTemplateId::new();
        let orphaned = item(w, 0, vec![deleted]);
        let items = vec![orphaned];
        let owners = item_owner_map(&items);

        assert!(external_workflow_dependencies(w, &items, &owners).is_empty());
    }

    #[test]
    fn test_only_one_hop_is_followed() {
        // w3 -> w2 -> w1; from w3 only w2 is external, never w1.
        let w1 = WorkflowTemplateId::new();
        let w2 = WorkflowTemplateId::new();
        let w3 = WorkflowTemplateId::new();
        let base = item(w1, 0, vec![]);
        let middle = item(w2, 0, vec![base.id]);
        let top = item(w3, 0, vec![middle.id]);
        let items = vec![base, middle, top];
        let owners = item_owner_map(&items);

        assert_eq!(
            external_workflow_dependencies(w3, &items, &owners),
            HashSet::from([w2])
        );
    }
}
