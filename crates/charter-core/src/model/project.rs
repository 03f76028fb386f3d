//! Project-side entity records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::id::{
    ChecklistItemInstanceId, ChecklistItemTemplateId, GovernanceTemplateId, ProjectId,
    WorkflowInstanceId, WorkflowTemplateId,
};
use crate::types::InstanceStatus;

/// An instantiation of a governance template against a selected subset of
/// its workflows.
///
/// The workflow selection is fixed at creation time and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Human-readable project name.
    pub name: String,
    /// Detailed description of the project.
    pub description: String,
    /// Governance template this project was instantiated from.
    pub governance_template_id: GovernanceTemplateId,
    /// The workflows chosen at creation time (the instantiated scope).
    pub selected_workflow_template_ids: Vec<WorkflowTemplateId>,
    /// Timestamp when the project was created.
    pub created_at: Timestamp,
    /// Timestamp when the project was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Template to instantiate.
    pub governance_template_id: GovernanceTemplateId,
    /// Workflows to instantiate; must belong to the template.
    pub selected_workflow_template_ids: Vec<WorkflowTemplateId>,
}

/// A per-project counterpart of a selected workflow template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowInstance {
    /// Unique workflow instance identifier.
    pub id: WorkflowInstanceId,
    /// Project this instance belongs to.
    pub project_id: ProjectId,
    /// Workflow template this instance was created from.
    pub workflow_template_id: WorkflowTemplateId,
    /// Timestamp when the instance was created.
    pub created_at: Timestamp,
}

/// A per-project counterpart of a checklist item template, carrying the
/// mutable progress status.
///
/// Instances live and die with their project; they are never deleted
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItemInstance {
    /// Unique checklist item instance identifier.
    pub id: ChecklistItemInstanceId,
    /// Workflow instance this item belongs to.
    pub workflow_instance_id: WorkflowInstanceId,
    /// Checklist item template this instance was created from.
    pub checklist_item_template_id: ChecklistItemTemplateId,
    /// Current progress state.
    pub status: InstanceStatus,
    /// Timestamp when the instance was created.
    pub created_at: Timestamp,
    /// Timestamp when the instance was last updated.
    pub updated_at: Timestamp,
}
