//! The governance store trait.

use charter_core::{
    ChecklistItemInstance, ChecklistItemInstanceId, ChecklistItemTemplate,
    ChecklistItemTemplateId, GovernanceTemplate, GovernanceTemplateId, InstanceStatus,
    NewChecklistItemTemplate, NewGovernanceTemplate, NewProject, NewWorkflowTemplate, Project,
    ProjectId, WorkflowInstance, WorkflowInstanceId, WorkflowTemplate, WorkflowTemplateId,
};

use crate::error::StoreResult;

/// Filter for checklist item template queries.
///
/// Items can be fetched per workflow (one stage) or per governance template
/// (the whole process — needed whenever cross-workflow dependencies are in
/// play).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    /// All items owned by one workflow template.
    ByWorkflow(WorkflowTemplateId),
    /// All items transitively owned by one governance template.
    ByTemplate(GovernanceTemplateId),
}

/// Request/response interface to the remote entity store.
///
/// Implementations persist plain records and nothing more. Order values,
/// dependency sets and statuses arrive already validated by the engine;
/// the store must not re-validate or reject them.
#[async_trait::async_trait]
pub trait GovernanceStore: Send + Sync {
    // --- reads -----------------------------------------------------------

    /// Fetches a governance template by id.
    async fn governance_template(
        &self,
        id: GovernanceTemplateId,
    ) -> StoreResult<GovernanceTemplate>;

    /// Lists all governance templates.
    async fn governance_templates(&self) -> StoreResult<Vec<GovernanceTemplate>>;

    /// Fetches the workflow templates of a governance template.
    async fn workflow_templates(
        &self,
        governance_template_id: GovernanceTemplateId,
    ) -> StoreResult<Vec<WorkflowTemplate>>;

    /// Fetches a single workflow template by id.
    async fn workflow_template(&self, id: WorkflowTemplateId) -> StoreResult<WorkflowTemplate>;

    /// Fetches checklist item templates matching the filter.
    async fn checklist_item_templates(
        &self,
        filter: ItemFilter,
    ) -> StoreResult<Vec<ChecklistItemTemplate>>;

    /// Fetches a single checklist item template by id.
    async fn checklist_item_template(
        &self,
        id: ChecklistItemTemplateId,
    ) -> StoreResult<ChecklistItemTemplate>;

    /// Fetches a project by id.
    async fn project(&self, id: ProjectId) -> StoreResult<Project>;

    /// Lists all projects.
    async fn projects(&self) -> StoreResult<Vec<Project>>;

    /// Fetches the workflow instances of a project.
    async fn workflow_instances(&self, project_id: ProjectId)
    -> StoreResult<Vec<WorkflowInstance>>;

    /// Fetches the checklist item instances of a workflow instance.
    async fn checklist_item_instances(
        &self,
        workflow_instance_id: WorkflowInstanceId,
    ) -> StoreResult<Vec<ChecklistItemInstance>>;

    /// Fetches a single checklist item instance by id.
    async fn checklist_item_instance(
        &self,
        id: ChecklistItemInstanceId,
    ) -> StoreResult<ChecklistItemInstance>;

    // --- writes ----------------------------------------------------------

    /// Creates a governance template.
    async fn create_governance_template(
        &self,
        new: NewGovernanceTemplate,
    ) -> StoreResult<GovernanceTemplate>;

    /// Creates a workflow template with the given order value.
    async fn create_workflow_template(
        &self,
        new: NewWorkflowTemplate,
        order: i32,
    ) -> StoreResult<WorkflowTemplate>;

    /// Creates a checklist item template with the given order value and an
    /// empty dependency set.
    async fn create_checklist_item_template(
        &self,
        new: NewChecklistItemTemplate,
        order: i32,
    ) -> StoreResult<ChecklistItemTemplate>;

    /// Creates a project together with one workflow instance per selected
    /// workflow and one checklist item instance per item of those
    /// workflows.
    async fn create_project(&self, new: NewProject) -> StoreResult<Project>;

    /// Updates the order value of a workflow template.
    async fn update_workflow_order(&self, id: WorkflowTemplateId, order: i32) -> StoreResult<()>;

    /// Updates the order value of a checklist item template.
    async fn update_item_order(&self, id: ChecklistItemTemplateId, order: i32) -> StoreResult<()>;

    /// Replaces the dependency list of a checklist item template.
    async fn update_item_dependencies(
        &self,
        id: ChecklistItemTemplateId,
        dependencies: Vec<ChecklistItemTemplateId>,
    ) -> StoreResult<()>;

    /// Updates the status of a checklist item instance.
    async fn update_instance_status(
        &self,
        id: ChecklistItemInstanceId,
        status: InstanceStatus,
    ) -> StoreResult<()>;

    /// Deletes a governance template record.
    ///
    /// Cascading to owned workflows and items is a store policy; the
    /// engine never relies on it.
    async fn delete_governance_template(&self, id: GovernanceTemplateId) -> StoreResult<()>;

    /// Deletes a workflow template record.
    async fn delete_workflow_template(&self, id: WorkflowTemplateId) -> StoreResult<()>;

    /// Deletes a checklist item template record.
    ///
    /// References to the deleted item may remain in other items'
    /// dependency lists; the engine treats them as absent.
    async fn delete_checklist_item_template(&self, id: ChecklistItemTemplateId) -> StoreResult<()>;

    /// Deletes a project and its instances.
    async fn delete_project(&self, id: ProjectId) -> StoreResult<()>;
}
