//! Template-scoped dependency graph over checklist item templates.
//!
//! - [`DependencyGraph`]: directed "requires" graph with self-loop,
//!   cross-template and cycle rejection
//! - [`DependencyEdge`]: a single `(dependent, dependency)` pair

mod graph;

pub use graph::{DependencyEdge, DependencyGraph};
