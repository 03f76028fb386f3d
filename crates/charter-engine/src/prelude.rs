//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use charter_engine::prelude::*;
//! ```

pub use crate::binder::{DependencyLabel, bind_instance_dependencies, resolve_dependency_labels};
pub use crate::diagram::{DiagramView, ExternalWorkflowRef, external_workflow_dependencies};
pub use crate::error::{EngineError, EngineResult};
pub use crate::graph::{DependencyEdge, DependencyGraph};
pub use crate::ledger::{assign_status, parse_status};
pub use crate::order::{MoveDirection, OrderSwap, initial_order, move_adjacent};
pub use crate::service::{GovernanceService, ServiceConfig};
