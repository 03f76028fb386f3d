//! Engine error types.

use charter_core::{ChecklistItemTemplateId, GovernanceTemplateId, WorkflowTemplateId};
use charter_dal::StoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors produced by the ordering and dependency-graph engine.
///
/// Validation variants are never worth retrying: the same input
/// reproduces the same error. Only `Store` may carry a retryable cause
/// (a remote `Unavailable`), and retrying is the caller's call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A checklist item was asked to depend on itself.
    #[error("checklist item {item} cannot depend on itself")]
    SelfDependency {
        /// The offending item.
        item: ChecklistItemTemplateId,
    },

    /// A dependency edge crossed a governance template boundary.
    #[error("checklist item {item} belongs to a different governance template than {scope}")]
    CrossTemplate {
        /// The item owned by a foreign template.
        item: ChecklistItemTemplateId,
        /// The template the graph is scoped to.
        scope: GovernanceTemplateId,
    },

    /// Adding a dependency edge would close a cycle.
    #[error("dependency of {dependent} on {dependency} would create a cycle")]
    Cycle {
        /// The item that would gain the dependency.
        dependent: ChecklistItemTemplateId,
        /// The item that would be depended on.
        dependency: ChecklistItemTemplateId,
    },

    /// A reorder request referenced an entity absent from its sibling set.
    #[error("invalid move: {reason}")]
    InvalidMove {
        /// Why the move was rejected.
        reason: String,
    },

    /// A status value outside the legal set was supplied.
    #[error("invalid status {value:?}")]
    InvalidStatus {
        /// The rejected value.
        value: String,
    },

    /// An id was absent from the entity snapshot supplied to the engine.
    #[error("checklist item {item} is not part of the supplied snapshot")]
    UnknownItem {
        /// The unresolvable item id.
        item: ChecklistItemTemplateId,
    },

    /// An id was absent from the entity snapshot supplied to the engine.
    #[error("workflow {workflow} is not part of the supplied snapshot")]
    UnknownWorkflow {
        /// The unresolvable workflow id.
        workflow: WorkflowTemplateId,
    },

    /// A configured size limit was exceeded.
    #[error("{what} limit of {limit} exceeded")]
    LimitExceeded {
        /// What ran out, e.g. `"sibling"` or `"dependency"`.
        what: &'static str,
        /// The configured maximum.
        limit: usize,
    },

    /// The data-access collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
