//! Dependency resolution for instantiated projects.
//!
//! Two views are derived here: human-readable labels for an item's
//! dependency list (shown on the edit screen), and the
//! instance-to-instance dependency map for a project. Both must tolerate
//! references to items that were deleted after the dependency was
//! recorded, and references into workflows the project never selected;
//! those are omitted, never an error.

use std::collections::HashMap;

use charter_core::{
    ChecklistItemInstance, ChecklistItemInstanceId, ChecklistItemTemplate,
    ChecklistItemTemplateId, WorkflowTemplateId,
};
use serde::{Deserialize, Serialize};

/// Fallback shown when a referenced item has an empty name.
const UNNAMED_ITEM: &str = "Unnamed Item";

/// Fallback shown when a referenced item's workflow cannot be resolved.
const UNKNOWN_WORKFLOW: &str = "Unknown Workflow";

/// A resolved, display-ready dependency reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyLabel {
    /// The referenced checklist item template.
    pub id: ChecklistItemTemplateId,
    /// The referenced item's name.
    pub name: String,
    /// The name of the workflow owning the referenced item.
    pub workflow_name: String,
}

/// Resolves an item's dependency references to display labels.
///
/// `items_by_id` must span the entire governance template, not just the
/// item's own workflow, because dependencies may cross workflows. Output
/// order follows the stored dependency order; dangling references are
/// omitted.
pub fn resolve_dependency_labels(
    item: &ChecklistItemTemplate,
    items_by_id: &HashMap<ChecklistItemTemplateId, &ChecklistItemTemplate>,
    workflow_names: &HashMap<WorkflowTemplateId, String>,
) -> Vec<DependencyLabel> {
    item.dependencies_requires
        .iter()
        .filter_map(|dependency_id| {
            let dependency = items_by_id.get(dependency_id)?;
            let name = if dependency.name.is_empty() {
                UNNAMED_ITEM.to_owned()
            } else {
                dependency.name.clone()
            };
            let workflow_name = workflow_names
                .get(&dependency.workflow_template_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_WORKFLOW.to_owned());
            Some(DependencyLabel {
                id: *dependency_id,
                name,
                workflow_name,
            })
        })
        .collect()
}

/// Builds the template-item lookup consumed by
/// [`resolve_dependency_labels`].
pub fn items_by_id(
    items: &[ChecklistItemTemplate],
) -> HashMap<ChecklistItemTemplateId, &ChecklistItemTemplate> {
    items.iter().map(|item| (item.id, item)).collect()
}

/// Maps each checklist item instance to the instances realizing its
/// template's dependencies.
///
/// Dependencies whose template has no instance in the project — an
/// unselected workflow, or an item deleted from the template after
/// instantiation — are skipped. Instances whose own template is gone map
/// to an empty list.
pub fn bind_instance_dependencies(
    instances: &[ChecklistItemInstance],
    items: &[ChecklistItemTemplate],
) -> HashMap<ChecklistItemInstanceId, Vec<ChecklistItemInstanceId>> {
    let instance_by_template: HashMap<ChecklistItemTemplateId, ChecklistItemInstanceId> =
        instances
            .iter()
            .map(|instance| (instance.checklist_item_template_id, instance.id))
            .collect();
    let item_lookup = items_by_id(items);

    instances
        .iter()
        .map(|instance| {
            let dependencies = item_lookup
                .get(&instance.checklist_item_template_id)
                .map(|item| {
                    item.dependencies_requires
                        .iter()
                        .filter_map(|dependency| instance_by_template.get(dependency).copied())
                        .collect()
                })
                .unwrap_or_default();
            (instance.id, dependencies)
        })
        .collect()
}
