//! In-memory reference store.
//!
//! A HashMap-backed [`GovernanceStore`] used by the engine's test suite and
//! for local experiments. Like any conforming store it holds records and
//! nothing more: no ordering or dependency invariants are enforced here,
//! and deleting a checklist item template leaves dangling references in
//! other items' dependency lists for the engine to tolerate.

use std::collections::HashMap;
use std::sync::RwLock;

use charter_core::{
    ChecklistItemInstance, ChecklistItemInstanceId, ChecklistItemTemplate,
    ChecklistItemTemplateId, GovernanceTemplate, GovernanceTemplateId, InstanceStatus,
    NewChecklistItemTemplate, NewGovernanceTemplate, NewProject, NewWorkflowTemplate, Project,
    ProjectId, WorkflowInstance, WorkflowInstanceId, WorkflowTemplate, WorkflowTemplateId,
};
use jiff::Timestamp;

use crate::error::{StoreError, StoreResult};
use crate::store::{GovernanceStore, ItemFilter};

#[derive(Debug, Default)]
struct Inner {
    governance_templates: HashMap<GovernanceTemplateId, GovernanceTemplate>,
    workflow_templates: HashMap<WorkflowTemplateId, WorkflowTemplate>,
    checklist_item_templates: HashMap<ChecklistItemTemplateId, ChecklistItemTemplate>,
    projects: HashMap<ProjectId, Project>,
    workflow_instances: HashMap<WorkflowInstanceId, WorkflowInstance>,
    checklist_item_instances: HashMap<ChecklistItemInstanceId, ChecklistItemInstance>,
}

/// HashMap-backed governance store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl GovernanceStore for MemoryStore {
    async fn governance_template(
        &self,
        id: GovernanceTemplateId,
    ) -> StoreResult<GovernanceTemplate> {
        self.read()
            .governance_templates
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("governance template", id))
    }

    async fn governance_templates(&self) -> StoreResult<Vec<GovernanceTemplate>> {
        let mut templates: Vec<_> = self.read().governance_templates.values().cloned().collect();
        templates.sort_by_key(|t| t.created_at);
        Ok(templates)
    }

    async fn workflow_templates(
        &self,
        governance_template_id: GovernanceTemplateId,
    ) -> StoreResult<Vec<WorkflowTemplate>> {
        let mut workflows: Vec<_> = self
            .read()
            .workflow_templates
            .values()
            .filter(|w| w.governance_template_id == governance_template_id)
            .cloned()
            .collect();
        workflows.sort_by_key(|w| w.order);
        Ok(workflows)
    }

    async fn workflow_template(&self, id: WorkflowTemplateId) -> StoreResult<WorkflowTemplate> {
        self.read()
            .workflow_templates
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("workflow template", id))
    }

    async fn checklist_item_templates(
        &self,
        filter: ItemFilter,
    ) -> StoreResult<Vec<ChecklistItemTemplate>> {
        let inner = self.read();
        let mut items: Vec<ChecklistItemTemplate> = match filter {
            ItemFilter::ByWorkflow(workflow_id) => inner
                .checklist_item_templates
                .values()
                .filter(|i| i.workflow_template_id == workflow_id)
                .cloned()
                .collect(),
            ItemFilter::ByTemplate(template_id) => inner
                .checklist_item_templates
                .values()
                .filter(|i| {
                    inner
                        .workflow_templates
                        .get(&i.workflow_template_id)
                        .is_some_and(|w| w.governance_template_id == template_id)
                })
                .cloned()
                .collect(),
        };
        items.sort_by_key(|i| (i.workflow_template_id, i.order));
        Ok(items)
    }

    async fn checklist_item_template(
        &self,
        id: ChecklistItemTemplateId,
    ) -> StoreResult<ChecklistItemTemplate> {
        self.read()
            .checklist_item_templates
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("checklist item template", id))
    }

    async fn project(&self, id: ProjectId) -> StoreResult<Project> {
        self.read()
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("project", id))
    }

    async fn projects(&self) -> StoreResult<Vec<Project>> {
        let mut projects: Vec<_> = self.read().projects.values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn workflow_instances(
        &self,
        project_id: ProjectId,
    ) -> StoreResult<Vec<WorkflowInstance>> {
        let mut instances: Vec<_> = self
            .read()
            .workflow_instances
            .values()
            .filter(|w| w.project_id == project_id)
            .cloned()
            .collect();
        instances.sort_by_key(|w| w.id);
        Ok(instances)
    }

    async fn checklist_item_instances(
        &self,
        workflow_instance_id: WorkflowInstanceId,
    ) -> StoreResult<Vec<ChecklistItemInstance>> {
        let mut instances: Vec<_> = self
            .read()
            .checklist_item_instances
            .values()
            .filter(|i| i.workflow_instance_id == workflow_instance_id)
            .cloned()
            .collect();
        instances.sort_by_key(|i| i.id);
        Ok(instances)
    }

    async fn checklist_item_instance(
        &self,
        id: ChecklistItemInstanceId,
    ) -> StoreResult<ChecklistItemInstance> {
        self.read()
            .checklist_item_instances
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("checklist item instance", id))
    }

    async fn create_governance_template(
        &self,
        new: NewGovernanceTemplate,
    ) -> StoreResult<GovernanceTemplate> {
        let now = Timestamp::now();
        let template = GovernanceTemplate {
            id: GovernanceTemplateId::new(),
            name: new.name,
            version: new.version,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        self.write()
            .governance_templates
            .insert(template.id, template.clone());
        Ok(template)
    }

    async fn create_workflow_template(
        &self,
        new: NewWorkflowTemplate,
        order: i32,
    ) -> StoreResult<WorkflowTemplate> {
        let now = Timestamp::now();
        let workflow = WorkflowTemplate {
            id: WorkflowTemplateId::new(),
            governance_template_id: new.governance_template_id,
            name: new.name,
            description: new.description,
            order,
            created_at: now,
            updated_at: now,
        };
        self.write()
            .workflow_templates
            .insert(workflow.id, workflow.clone());
        Ok(workflow)
    }

    async fn create_checklist_item_template(
        &self,
        new: NewChecklistItemTemplate,
        order: i32,
    ) -> StoreResult<ChecklistItemTemplate> {
        let now = Timestamp::now();
        let item = ChecklistItemTemplate {
            id: ChecklistItemTemplateId::new(),
            workflow_template_id: new.workflow_template_id,
            name: new.name,
            description: new.description,
            kind: new.kind,
            order,
            dependencies_requires: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.write()
            .checklist_item_templates
            .insert(item.id, item.clone());
        Ok(item)
    }

    async fn create_project(&self, new: NewProject) -> StoreResult<Project> {
        let now = Timestamp::now();
        let project = Project {
            id: ProjectId::new(),
            name: new.name,
            description: new.description,
            governance_template_id: new.governance_template_id,
            selected_workflow_template_ids: new.selected_workflow_template_ids.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut inner = self.write();
        for workflow_id in &new.selected_workflow_template_ids {
            let instance = WorkflowInstance {
                id: WorkflowInstanceId::new(),
                project_id: project.id,
                workflow_template_id: *workflow_id,
                created_at: now,
            };

            let item_ids: Vec<ChecklistItemTemplateId> = inner
                .checklist_item_templates
                .values()
                .filter(|i| i.workflow_template_id == *workflow_id)
                .map(|i| i.id)
                .collect();
            for item_id in item_ids {
                let item_instance = ChecklistItemInstance {
                    id: ChecklistItemInstanceId::new(),
                    workflow_instance_id: instance.id,
                    checklist_item_template_id: item_id,
                    status: InstanceStatus::NotStarted,
                    created_at: now,
                    updated_at: now,
                };
                inner
                    .checklist_item_instances
                    .insert(item_instance.id, item_instance);
            }

            inner.workflow_instances.insert(instance.id, instance);
        }
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_workflow_order(&self, id: WorkflowTemplateId, order: i32) -> StoreResult<()> {
        let mut inner = self.write();
        let workflow = inner
            .workflow_templates
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("workflow template", id))?;
        workflow.order = order;
        workflow.updated_at = Timestamp::now();
        Ok(())
    }

    async fn update_item_order(&self, id: ChecklistItemTemplateId, order: i32) -> StoreResult<()> {
        let mut inner = self.write();
        let item = inner
            .checklist_item_templates
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("checklist item template", id))?;
        item.order = order;
        item.updated_at = Timestamp::now();
        Ok(())
    }

    async fn update_item_dependencies(
        &self,
        id: ChecklistItemTemplateId,
        dependencies: Vec<ChecklistItemTemplateId>,
    ) -> StoreResult<()> {
        let mut inner = self.write();
        let item = inner
            .checklist_item_templates
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("checklist item template", id))?;
        item.dependencies_requires = dependencies;
        item.updated_at = Timestamp::now();
        Ok(())
    }

    async fn update_instance_status(
        &self,
        id: ChecklistItemInstanceId,
        status: InstanceStatus,
    ) -> StoreResult<()> {
        let mut inner = self.write();
        let instance = inner
            .checklist_item_instances
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("checklist item instance", id))?;
        instance.status = status;
        instance.updated_at = Timestamp::now();
        Ok(())
    }

    async fn delete_governance_template(&self, id: GovernanceTemplateId) -> StoreResult<()> {
        self.write()
            .governance_templates
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("governance template", id))
    }

    async fn delete_workflow_template(&self, id: WorkflowTemplateId) -> StoreResult<()> {
        self.write()
            .workflow_templates
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("workflow template", id))
    }

    async fn delete_checklist_item_template(&self, id: ChecklistItemTemplateId) -> StoreResult<()> {
        // Dependency lists pointing at the deleted item are left as-is.
        self.write()
            .checklist_item_templates
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("checklist item template", id))
    }

    async fn delete_project(&self, id: ProjectId) -> StoreResult<()> {
        let mut inner = self.write();
        inner
            .projects
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("project", id))?;
        let workflow_instance_ids: Vec<WorkflowInstanceId> = inner
            .workflow_instances
            .values()
            .filter(|w| w.project_id == id)
            .map(|w| w.id)
            .collect();
        inner.workflow_instances.retain(|_, w| w.project_id != id);
        inner
            .checklist_item_instances
            .retain(|_, i| !workflow_instance_ids.contains(&i.workflow_instance_id));
        Ok(())
    }
}
