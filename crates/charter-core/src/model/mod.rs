//! Entity records for templates, projects and their runtime instances.
//!
//! Records here mirror what the remote store holds; they carry no behavior.
//! Ownership between entities is expressed as back-references only — the
//! engine never assumes the store cascades deletions.

mod project;
mod template;

pub use project::{ChecklistItemInstance, NewProject, Project, WorkflowInstance};
pub use template::{
    ChecklistItemTemplate, GovernanceTemplate, NewChecklistItemTemplate, NewGovernanceTemplate,
    NewWorkflowTemplate, WorkflowTemplate,
};
