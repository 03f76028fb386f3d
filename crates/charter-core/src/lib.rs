#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod id;
pub mod model;
pub mod types;

pub use id::{
    ChecklistItemInstanceId, ChecklistItemTemplateId, GovernanceTemplateId, ProjectId,
    WorkflowInstanceId, WorkflowTemplateId,
};
pub use model::{
    ChecklistItemInstance, ChecklistItemTemplate, GovernanceTemplate, NewChecklistItemTemplate,
    NewGovernanceTemplate, NewProject, NewWorkflowTemplate, Project, WorkflowInstance,
    WorkflowTemplate,
};
pub use types::{InstanceStatus, ItemKind};
