//! Template-side entity records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::id::{ChecklistItemTemplateId, GovernanceTemplateId, WorkflowTemplateId};
use crate::types::ItemKind;

/// A reusable definition of a multi-workflow governance process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceTemplate {
    /// Unique template identifier.
    pub id: GovernanceTemplateId,
    /// Human-readable template name.
    pub name: String,
    /// Free-form version label (displayed next to the name).
    pub version: String,
    /// Detailed description of the process this template defines.
    pub description: String,
    /// Timestamp when the template was created.
    pub created_at: Timestamp,
    /// Timestamp when the template was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new governance template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGovernanceTemplate {
    /// Template name.
    pub name: String,
    /// Version label.
    pub version: String,
    /// Template description.
    pub description: String,
}

/// An ordered stage within a governance template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    /// Unique workflow identifier.
    pub id: WorkflowTemplateId,
    /// Governance template this workflow belongs to.
    pub governance_template_id: GovernanceTemplateId,
    /// Human-readable workflow name.
    pub name: String,
    /// Detailed description of the stage.
    pub description: String,
    /// Position among sibling workflows; unique per governance template.
    pub order: i32,
    /// Timestamp when the workflow was created.
    pub created_at: Timestamp,
    /// Timestamp when the workflow was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new workflow template.
///
/// The order value is assigned by the engine (append-at-end), not by the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkflowTemplate {
    /// Governance template to attach the workflow to.
    pub governance_template_id: GovernanceTemplateId,
    /// Workflow name.
    pub name: String,
    /// Workflow description.
    pub description: String,
}

/// An ordered unit of work within a workflow template.
///
/// `dependencies_requires` lists the checklist items this item cannot
/// conceptually proceed without. Entries may reference items in other
/// workflows of the same governance template, and are kept in stored
/// (insertion) order because label resolution preserves that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItemTemplate {
    /// Unique checklist item identifier.
    pub id: ChecklistItemTemplateId,
    /// Workflow this item belongs to.
    pub workflow_template_id: WorkflowTemplateId,
    /// Human-readable item name.
    pub name: String,
    /// Detailed description of the work.
    pub description: String,
    /// Kind of work this item represents.
    pub kind: ItemKind,
    /// Position among sibling items; unique per workflow.
    pub order: i32,
    /// Checklist items this item requires, in stored order.
    #[serde(default)]
    pub dependencies_requires: Vec<ChecklistItemTemplateId>,
    /// Timestamp when the item was created.
    pub created_at: Timestamp,
    /// Timestamp when the item was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new checklist item template.
///
/// Items are always created with an empty dependency set; dependencies are
/// added afterwards through the engine so the graph invariants hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChecklistItemTemplate {
    /// Workflow to attach the item to.
    pub workflow_template_id: WorkflowTemplateId,
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Kind of work.
    pub kind: ItemKind,
}
