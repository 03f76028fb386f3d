//! Store-facing orchestration of the engine.
//!
//! Every operation follows the same shape: fetch an entity snapshot from
//! the store, run the pure engine computation over it, persist the
//! computed values. The service holds no state between calls, so two
//! concurrent read-modify-write sequences on the same sibling set can
//! still race at the store; serializing those is the responsibility of
//! whatever drives this service.

use std::collections::HashMap;

use charter_core::{
    ChecklistItemInstanceId, ChecklistItemTemplate, ChecklistItemTemplateId, GovernanceTemplateId,
    InstanceStatus, NewChecklistItemTemplate, NewProject, NewWorkflowTemplate, Project, ProjectId,
    WorkflowTemplate, WorkflowTemplateId,
};
use charter_dal::{GovernanceStore, ItemFilter};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET;
use crate::binder::{self, DependencyLabel};
use crate::diagram::{self, DiagramView, ExternalWorkflowRef};
use crate::error::{EngineError, EngineResult};
use crate::graph::DependencyGraph;
use crate::ledger;
use crate::order::{self, MoveDirection};

// Default limits; generous for per-template structures.
const DEFAULT_MAX_SIBLINGS: usize = 500;
const DEFAULT_MAX_DEPENDENCIES: usize = 100;

/// Configuration for the governance service with sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Maximum number of siblings under one parent (optional).
    pub max_siblings: Option<usize>,
    /// Maximum number of dependencies per checklist item (optional).
    pub max_dependencies: Option<usize>,
}

impl ServiceConfig {
    /// Creates a new service configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_siblings: None,
            max_dependencies: None,
        }
    }

    /// Returns the sibling limit, using the default if not set.
    #[inline]
    #[must_use]
    pub fn max_siblings(&self) -> usize {
        self.max_siblings.unwrap_or(DEFAULT_MAX_SIBLINGS)
    }

    /// Returns the dependency limit, using the default if not set.
    #[inline]
    #[must_use]
    pub fn max_dependencies(&self) -> usize {
        self.max_dependencies.unwrap_or(DEFAULT_MAX_DEPENDENCIES)
    }

    /// Sets the sibling limit.
    #[must_use]
    pub fn with_max_siblings(mut self, limit: usize) -> Self {
        self.max_siblings = Some(limit);
        self
    }

    /// Sets the dependency limit.
    #[must_use]
    pub fn with_max_dependencies(mut self, limit: usize) -> Self {
        self.max_dependencies = Some(limit);
        self
    }

    /// Validate the configuration and return any issues.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_siblings == Some(0) {
            return Err("Sibling limit cannot be zero".to_string());
        }
        if self.max_dependencies == Some(0) {
            return Err("Dependency limit cannot be zero".to_string());
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrates the ordering and dependency-graph engine against a
/// governance store.
#[derive(Debug, Clone)]
pub struct GovernanceService<S> {
    store: S,
    config: ServiceConfig,
}

impl<S: GovernanceStore> GovernanceService<S> {
    /// Creates a new service with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::new())
    }

    /// Creates a new service with custom configuration.
    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a workflow template, appended after its siblings.
    pub async fn create_workflow(
        &self,
        new: NewWorkflowTemplate,
    ) -> EngineResult<WorkflowTemplate> {
        let siblings = self
            .store
            .workflow_templates(new.governance_template_id)
            .await?;
        if siblings.len() >= self.config.max_siblings() {
            return Err(EngineError::LimitExceeded {
                what: "sibling",
                limit: self.config.max_siblings(),
            });
        }

        let order = order::initial_order(siblings.iter().map(|w| w.order));
        tracing::debug!(
            target: TRACING_TARGET,
            governance_template_id = %new.governance_template_id,
            order,
            "Creating workflow template"
        );
        Ok(self.store.create_workflow_template(new, order).await?)
    }

    /// Creates a checklist item template, appended after its siblings,
    /// with an empty dependency set.
    pub async fn create_checklist_item(
        &self,
        new: NewChecklistItemTemplate,
    ) -> EngineResult<ChecklistItemTemplate> {
        let siblings = self
            .store
            .checklist_item_templates(ItemFilter::ByWorkflow(new.workflow_template_id))
            .await?;
        if siblings.len() >= self.config.max_siblings() {
            return Err(EngineError::LimitExceeded {
                what: "sibling",
                limit: self.config.max_siblings(),
            });
        }

        let order = order::initial_order(siblings.iter().map(|i| i.order));
        tracing::debug!(
            target: TRACING_TARGET,
            workflow_template_id = %new.workflow_template_id,
            order,
            "Creating checklist item template"
        );
        Ok(self
            .store
            .create_checklist_item_template(new, order)
            .await?)
    }

    /// Moves a workflow one position up or down among its siblings.
    ///
    /// Returns `false` when the workflow was already at the boundary and
    /// nothing was persisted.
    pub async fn move_workflow(
        &self,
        id: WorkflowTemplateId,
        direction: MoveDirection,
    ) -> EngineResult<bool> {
        let workflow = self.store.workflow_template(id).await?;
        let siblings: Vec<(WorkflowTemplateId, i32)> = self
            .store
            .workflow_templates(workflow.governance_template_id)
            .await?
            .into_iter()
            .map(|w| (w.id, w.order))
            .collect();

        let Some(swap) = order::move_adjacent(&siblings, &id, direction)? else {
            return Ok(false);
        };

        tracing::info!(
            target: TRACING_TARGET,
            workflow_template_id = %id,
            direction = %direction,
            new_order = swap.moved.1,
            "Reordering workflow template"
        );
        self.store
            .update_workflow_order(swap.moved.0, swap.moved.1)
            .await?;
        self.store
            .update_workflow_order(swap.displaced.0, swap.displaced.1)
            .await?;
        Ok(true)
    }

    /// Moves a checklist item one position up or down among its siblings.
    ///
    /// Returns `false` when the item was already at the boundary.
    pub async fn move_checklist_item(
        &self,
        id: ChecklistItemTemplateId,
        direction: MoveDirection,
    ) -> EngineResult<bool> {
        let item = self.store.checklist_item_template(id).await?;
        let siblings: Vec<(ChecklistItemTemplateId, i32)> = self
            .store
            .checklist_item_templates(ItemFilter::ByWorkflow(item.workflow_template_id))
            .await?
            .into_iter()
            .map(|i| (i.id, i.order))
            .collect();

        let Some(swap) = order::move_adjacent(&siblings, &id, direction)? else {
            return Ok(false);
        };

        tracing::info!(
            target: TRACING_TARGET,
            checklist_item_template_id = %id,
            direction = %direction,
            new_order = swap.moved.1,
            "Reordering checklist item template"
        );
        self.store.update_item_order(swap.moved.0, swap.moved.1).await?;
        self.store
            .update_item_order(swap.displaced.0, swap.displaced.1)
            .await?;
        Ok(true)
    }

    /// Replaces a checklist item's dependency list after validating the
    /// result against the template-scoped dependency graph.
    ///
    /// Nothing is persisted unless the whole replacement is valid; the
    /// stored dependency order is the order given here.
    pub async fn update_item_dependencies(
        &self,
        id: ChecklistItemTemplateId,
        dependencies: Vec<ChecklistItemTemplateId>,
    ) -> EngineResult<()> {
        if dependencies.len() > self.config.max_dependencies() {
            return Err(EngineError::LimitExceeded {
                what: "dependency",
                limit: self.config.max_dependencies(),
            });
        }

        let item = self.store.checklist_item_template(id).await?;
        let workflow = self
            .store
            .workflow_template(item.workflow_template_id)
            .await?;
        let scope = workflow.governance_template_id;
        let workflows = self.store.workflow_templates(scope).await?;
        let items = self
            .store
            .checklist_item_templates(ItemFilter::ByTemplate(scope))
            .await?;

        let mut graph = DependencyGraph::from_snapshot(scope, &workflows, &items);
        graph.replace_dependencies(id, &dependencies)?;

        tracing::info!(
            target: TRACING_TARGET,
            checklist_item_template_id = %id,
            dependency_count = dependencies.len(),
            "Updating checklist item dependencies"
        );
        Ok(self.store.update_item_dependencies(id, dependencies).await?)
    }

    /// Builds the diagram projection for a workflow: its own items in
    /// order plus the named external workflows they directly depend on.
    pub async fn workflow_diagram(&self, id: WorkflowTemplateId) -> EngineResult<DiagramView> {
        let workflow = self.store.workflow_template(id).await?;
        let scope = workflow.governance_template_id;
        let workflows = self.store.workflow_templates(scope).await?;
        let all_items = self
            .store
            .checklist_item_templates(ItemFilter::ByTemplate(scope))
            .await?;

        let owners = diagram::item_owner_map(&all_items);
        let external = diagram::external_workflow_dependencies(id, &all_items, &owners);

        let mut external_workflows: Vec<ExternalWorkflowRef> = workflows
            .iter()
            .filter(|w| external.contains(&w.id))
            .map(|w| ExternalWorkflowRef {
                workflow_template_id: w.id,
                name: w.name.clone(),
            })
            .collect();
        external_workflows.sort_by(|a, b| a.name.cmp(&b.name));

        let mut items: Vec<ChecklistItemTemplate> = all_items
            .into_iter()
            .filter(|i| i.workflow_template_id == id)
            .collect();
        items.sort_by_key(|i| i.order);

        Ok(DiagramView {
            workflow_template_id: id,
            items,
            external_workflows,
        })
    }

    /// Resolves a checklist item's dependency references to display
    /// labels, spanning the whole governance template.
    pub async fn item_dependency_labels(
        &self,
        id: ChecklistItemTemplateId,
    ) -> EngineResult<Vec<DependencyLabel>> {
        let item = self.store.checklist_item_template(id).await?;
        let workflow = self
            .store
            .workflow_template(item.workflow_template_id)
            .await?;
        let scope = workflow.governance_template_id;
        let workflows = self.store.workflow_templates(scope).await?;
        let items = self
            .store
            .checklist_item_templates(ItemFilter::ByTemplate(scope))
            .await?;

        let workflow_names: HashMap<WorkflowTemplateId, String> =
            workflows.into_iter().map(|w| (w.id, w.name)).collect();
        Ok(binder::resolve_dependency_labels(
            &item,
            &binder::items_by_id(&items),
            &workflow_names,
        ))
    }

    /// Creates a project after checking every selected workflow belongs
    /// to the chosen governance template. Instantiation of workflow and
    /// item instances is the store's write.
    pub async fn create_project(&self, new: NewProject) -> EngineResult<Project> {
        let workflows = self
            .store
            .workflow_templates(new.governance_template_id)
            .await?;
        for selected in &new.selected_workflow_template_ids {
            if !workflows.iter().any(|w| w.id == *selected) {
                return Err(EngineError::UnknownWorkflow {
                    workflow: *selected,
                });
            }
        }

        tracing::info!(
            target: TRACING_TARGET,
            governance_template_id = %new.governance_template_id,
            selected_workflows = new.selected_workflow_template_ids.len(),
            "Creating project"
        );
        Ok(self.store.create_project(new).await?)
    }

    /// Maps each of a project's checklist item instances to the instances
    /// realizing its dependencies.
    pub async fn project_dependency_map(
        &self,
        id: ProjectId,
    ) -> EngineResult<HashMap<ChecklistItemInstanceId, Vec<ChecklistItemInstanceId>>> {
        let project = self.store.project(id).await?;
        let items = self
            .store
            .checklist_item_templates(ItemFilter::ByTemplate(project.governance_template_id))
            .await?;

        let mut instances = Vec::new();
        for workflow_instance in self.store.workflow_instances(id).await? {
            instances.extend(
                self.store
                    .checklist_item_instances(workflow_instance.id)
                    .await?,
            );
        }

        Ok(binder::bind_instance_dependencies(&instances, &items))
    }

    /// Sets the status of a checklist item instance, returning the
    /// previous status. The raw value is validated before anything is
    /// persisted.
    pub async fn set_instance_status(
        &self,
        id: ChecklistItemInstanceId,
        status: &str,
    ) -> EngineResult<InstanceStatus> {
        let mut instance = self.store.checklist_item_instance(id).await?;
        let previous = ledger::assign_status(&mut instance, status)?;

        tracing::info!(
            target: TRACING_TARGET,
            checklist_item_instance_id = %id,
            previous = %previous,
            status = %instance.status,
            "Updating instance status"
        );
        self.store
            .update_instance_status(id, instance.status)
            .await?;
        Ok(previous)
    }

    /// Deletes a governance template record. Owned workflows and items
    /// are the store's concern; no cascade is assumed here.
    pub async fn delete_governance_template(
        &self,
        id: GovernanceTemplateId,
    ) -> EngineResult<()> {
        Ok(self.store.delete_governance_template(id).await?)
    }

    /// Deletes a workflow template record.
    pub async fn delete_workflow(&self, id: WorkflowTemplateId) -> EngineResult<()> {
        Ok(self.store.delete_workflow_template(id).await?)
    }

    /// Deletes a checklist item template record.
    ///
    /// Dependency lists elsewhere may keep referencing the deleted item;
    /// every read path treats such references as absent.
    pub async fn delete_checklist_item(&self, id: ChecklistItemTemplateId) -> EngineResult<()> {
        Ok(self.store.delete_checklist_item_template(id).await?)
    }

    /// Deletes a project and its instances.
    pub async fn delete_project(&self, id: ProjectId) -> EngineResult<()> {
        Ok(self.store.delete_project(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = ServiceConfig::new();
        assert_eq!(config.max_siblings(), DEFAULT_MAX_SIBLINGS);
        assert_eq!(config.max_dependencies(), DEFAULT_MAX_DEPENDENCIES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ServiceConfig::new()
            .with_max_siblings(10)
            .with_max_dependencies(3);
        assert_eq!(config.max_siblings(), 10);
        assert_eq!(config.max_dependencies(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(ServiceConfig::new().with_max_siblings(0).validate().is_err());
        assert!(
            ServiceConfig::new()
                .with_max_dependencies(0)
                .validate()
                .is_err()
        );
    }
}
