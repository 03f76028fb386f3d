//! Dependency graph runtime representation.

use std::collections::{HashMap, HashSet};

use charter_core::{
    ChecklistItemTemplate, ChecklistItemTemplateId, GovernanceTemplateId, WorkflowTemplate,
};
use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};

use crate::error::{EngineError, EngineResult};

/// A directed "requires" edge between two checklist item templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    /// The item that requires the other.
    pub dependent: ChecklistItemTemplateId,
    /// The item being required.
    pub dependency: ChecklistItemTemplateId,
}

/// Directed dependency graph scoped to one governance template.
///
/// Nodes are the checklist item templates transitively owned by the scope
/// template; an edge `(dependent, dependency)` means the dependent cannot
/// conceptually proceed until the dependency is satisfied. Edges may cross
/// workflow boundaries but never template boundaries, and the graph is
/// kept acyclic by construction: every failed mutation leaves the graph
/// exactly as it was.
///
/// Internally uses petgraph's `DiGraph` for the edge structure.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// The governance template this graph is scoped to.
    scope: GovernanceTemplateId,
    /// The underlying directed graph, edges pointing dependent → dependency.
    graph: DiGraph<ChecklistItemTemplateId, ()>,
    /// Mapping from item id to petgraph's NodeIndex, scope-owned items only.
    node_indices: HashMap<ChecklistItemTemplateId, NodeIndex>,
    /// Owning template of every item known to this snapshot, including
    /// items owned by other templates (needed to tell a cross-template
    /// reference apart from an id missing from the snapshot).
    owners: HashMap<ChecklistItemTemplateId, GovernanceTemplateId>,
}

impl DependencyGraph {
    /// Creates an empty graph scoped to the given governance template.
    pub fn new(scope: GovernanceTemplateId) -> Self {
        Self {
            scope,
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    /// Builds a graph from an entity snapshot.
    ///
    /// Every item whose workflow belongs to `scope` becomes a node; items
    /// of foreign workflows are registered for cross-template detection
    /// only. Persisted dependency edges are replayed through the same
    /// validation as live insertions, so dangling references (deleted
    /// items) and any malformed edges the store may hold are dropped
    /// rather than poisoning the graph.
    pub fn from_snapshot(
        scope: GovernanceTemplateId,
        workflows: &[WorkflowTemplate],
        items: &[ChecklistItemTemplate],
    ) -> Self {
        let workflow_owners: HashMap<_, _> = workflows
            .iter()
            .map(|w| (w.id, w.governance_template_id))
            .collect();

        let mut graph = Self::new(scope);
        for item in items {
            let Some(owner) = workflow_owners.get(&item.workflow_template_id) else {
                continue;
            };
            graph.insert_item(item.id, *owner);
        }
        for item in items {
            for dependency in &item.dependencies_requires {
                let _ = graph.add_edge(item.id, *dependency);
            }
        }
        graph
    }

    /// Returns the governance template this graph is scoped to.
    #[inline]
    pub const fn scope(&self) -> GovernanceTemplateId {
        self.scope
    }

    /// Registers an item with its owning governance template.
    ///
    /// Items owned by the scope become graph nodes; foreign items are
    /// recorded so edges towards them can be rejected as cross-template
    /// rather than reported as unknown.
    pub fn insert_item(&mut self, id: ChecklistItemTemplateId, owner: GovernanceTemplateId) {
        self.owners.insert(id, owner);
        if owner == self.scope && !self.node_indices.contains_key(&id) {
            let index = self.graph.add_node(id);
            self.node_indices.insert(id, index);
        }
    }

    /// Returns whether an item is a node of this graph.
    pub fn contains_item(&self, id: ChecklistItemTemplateId) -> bool {
        self.node_indices.contains_key(&id)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Adds a dependency edge after validating it.
    ///
    /// Fails with [`EngineError::SelfDependency`] when both ends are the
    /// same item, [`EngineError::UnknownItem`] when either end is absent
    /// from the snapshot, [`EngineError::CrossTemplate`] when either end
    /// is owned by another governance template, and [`EngineError::Cycle`]
    /// when the dependency can already reach the dependent. On failure the
    /// graph is unchanged. Re-adding an existing edge is a no-op.
    pub fn add_edge(
        &mut self,
        dependent: ChecklistItemTemplateId,
        dependency: ChecklistItemTemplateId,
    ) -> EngineResult<()> {
        if dependent == dependency {
            return Err(EngineError::SelfDependency { item: dependent });
        }

        let dependent_index = self.scoped_index(dependent)?;
        let dependency_index = self.scoped_index(dependency)?;

        // Reachability check: if the dependency already reaches the
        // dependent, this edge would close a cycle.
        if has_path_connecting(&self.graph, dependency_index, dependent_index, None) {
            return Err(EngineError::Cycle {
                dependent,
                dependency,
            });
        }

        self.graph.update_edge(dependent_index, dependency_index, ());
        Ok(())
    }

    /// Removes a dependency edge. Removing an absent edge is a no-op.
    pub fn remove_edge(
        &mut self,
        dependent: ChecklistItemTemplateId,
        dependency: ChecklistItemTemplateId,
    ) {
        let (Some(&from), Some(&to)) = (
            self.node_indices.get(&dependent),
            self.node_indices.get(&dependency),
        ) else {
            return;
        };
        if let Some(edge) = self.graph.find_edge(from, to) {
            self.graph.remove_edge(edge);
        }
    }

    /// Replaces the outgoing dependencies of `dependent` with `new_deps`,
    /// all-or-nothing.
    ///
    /// The symmetric difference against the current edge set is applied to
    /// a working copy: edges no longer wanted are removed, new edges go
    /// through [`add_edge`](Self::add_edge). Only when every step succeeds
    /// is the working copy committed; otherwise the error of the failing
    /// addition is returned and the graph is exactly as before the call.
    pub fn replace_dependencies(
        &mut self,
        dependent: ChecklistItemTemplateId,
        new_deps: &[ChecklistItemTemplateId],
    ) -> EngineResult<()> {
        self.scoped_index(dependent)?;

        let current: HashSet<ChecklistItemTemplateId> =
            self.dependencies_of(dependent).into_iter().collect();
        let wanted: HashSet<ChecklistItemTemplateId> = new_deps.iter().copied().collect();

        let mut next = self.clone();
        for removed in current.difference(&wanted) {
            next.remove_edge(dependent, *removed);
        }
        for added in wanted.difference(&current) {
            next.add_edge(dependent, *added)?;
        }

        *self = next;
        Ok(())
    }

    /// Returns the direct dependencies of an item.
    pub fn dependencies_of(&self, id: ChecklistItemTemplateId) -> Vec<ChecklistItemTemplateId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Returns the items directly depending on an item.
    pub fn dependents_of(&self, id: ChecklistItemTemplateId) -> Vec<ChecklistItemTemplateId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Returns the transitive closure of dependencies reachable from an
    /// item.
    ///
    /// The start item is never part of its own closure: self-loops are
    /// rejected at insertion and every accepted edge preserves acyclicity.
    /// Unknown ids produce an empty set.
    pub fn reachable_from(
        &self,
        id: ChecklistItemTemplateId,
    ) -> HashSet<ChecklistItemTemplateId> {
        let Some(&start) = self.node_indices.get(&id) else {
            return HashSet::new();
        };

        let mut reachable = HashSet::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(index) = dfs.next(&self.graph) {
            if index != start {
                reachable.insert(self.graph[index]);
            }
        }
        reachable
    }

    /// Returns an iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge> + '_ {
        self.graph.edge_references().map(|edge_ref| DependencyEdge {
            dependent: self.graph[edge_ref.source()],
            dependency: self.graph[edge_ref.target()],
        })
    }

    fn neighbors(
        &self,
        id: ChecklistItemTemplateId,
        direction: Direction,
    ) -> Vec<ChecklistItemTemplateId> {
        let Some(&index) = self.node_indices.get(&id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(index, direction)
            .map(|neighbour| self.graph[neighbour])
            .collect()
    }

    /// Resolves an item id to its node index, classifying failures as
    /// unknown (absent from the snapshot) or cross-template (owned by a
    /// foreign template).
    fn scoped_index(&self, id: ChecklistItemTemplateId) -> EngineResult<NodeIndex> {
        match self.node_indices.get(&id) {
            Some(&index) => Ok(index),
            None => match self.owners.get(&id) {
                Some(_) => Err(EngineError::CrossTemplate {
                    item: id,
                    scope: self.scope,
                }),
                None => Err(EngineError::UnknownItem { item: id }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoped_graph(count: usize) -> (DependencyGraph, Vec<ChecklistItemTemplateId>) {
        let scope = GovernanceTemplateId::new();
        let mut graph = DependencyGraph::new(scope);
        let ids: Vec<_> = (0..count).map(|_| ChecklistItemTemplateId::new()).collect();
        for id in &ids {
            graph.insert_item(*id, scope);
        }
        (graph, ids)
    }

    #[test]
    fn test_self_dependency_rejected() {
        let (mut graph, ids) = scoped_graph(1);
        let err = graph.add_edge(ids[0], ids[0]).unwrap_err();
        assert!(matches!(err, EngineError::SelfDependency { .. }));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let (mut graph, ids) = scoped_graph(1);
        let ghost = ChecklistItemTemplateId::new();
        let err = graph.add_edge(ids[0], ghost).unwrap_err();
        assert!(matches!(err, EngineError::UnknownItem { .. }));
    }

    #[test]
    fn test_cross_template_rejected() {
        let (mut graph, ids) = scoped_graph(1);
        let foreign = ChecklistItemTemplateId::new();
        graph.insert_item(foreign, GovernanceTemplateId::new());
        let err = graph.add_edge(ids[0], foreign).unwrap_err();
        assert!(matches!(err, EngineError::CrossTemplate { .. }));
        assert!(!graph.contains_item(foreign));
    }

    #[test]
    fn test_direct_cycle_rejected_and_graph_unchanged() {
        let (mut graph, ids) = scoped_graph(2);
        graph.add_edge(ids[1], ids[0]).unwrap();

        // ids[1] already reaches ids[0]; the reverse edge closes a loop.
        let err = graph.add_edge(ids[0], ids[1]).unwrap_err();
        assert!(matches!(err, EngineError::Cycle { .. }));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.dependencies_of(ids[1]), vec![ids[0]]);
    }

    #[test]
    fn test_transitive_cycle_rejected() {
        let (mut graph, ids) = scoped_graph(3);
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.add_edge(ids[1], ids[2]).unwrap();
        let err = graph.add_edge(ids[2], ids[0]).unwrap_err();
        assert!(matches!(err, EngineError::Cycle { .. }));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let (mut graph, ids) = scoped_graph(2);
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.add_edge(ids[0], ids[1]).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_edge_is_idempotent() {
        let (mut graph, ids) = scoped_graph(2);
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.remove_edge(ids[0], ids[1]);
        graph.remove_edge(ids[0], ids[1]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_reachable_from_is_transitive_and_loop_free() {
        let (mut graph, ids) = scoped_graph(4);
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.add_edge(ids[1], ids[2]).unwrap();
        graph.add_edge(ids[0], ids[3]).unwrap();

        let closure = graph.reachable_from(ids[0]);
        assert_eq!(
            closure,
            HashSet::from([ids[1], ids[2], ids[3]]),
            "closure must span all hops"
        );
        assert!(!closure.contains(&ids[0]));
        assert!(graph.reachable_from(ids[2]).is_empty());
    }

    #[test]
    fn test_replace_dependencies_applies_symmetric_difference() {
        let (mut graph, ids) = scoped_graph(4);
        graph.add_edge(ids[0], ids[1]).unwrap();
        graph.add_edge(ids[0], ids[2]).unwrap();

        graph.replace_dependencies(ids[0], &[ids[2], ids[3]]).unwrap();

        let deps: HashSet<_> = graph.dependencies_of(ids[0]).into_iter().collect();
        assert_eq!(deps, HashSet::from([ids[2], ids[3]]));
    }

    #[test]
    fn test_replace_dependencies_is_idempotent() {
        let (mut graph, ids) = scoped_graph(3);
        let wanted = [ids[1], ids[2]];

        graph.replace_dependencies(ids[0], &wanted).unwrap();
        let first: HashSet<_> = graph.dependencies_of(ids[0]).into_iter().collect();

        graph.replace_dependencies(ids[0], &wanted).unwrap();
        let second: HashSet<_> = graph.dependencies_of(ids[0]).into_iter().collect();

        assert_eq!(first, wanted.iter().copied().collect());
        assert_eq!(first, second);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_replace_dependencies_rolls_back_entirely() {
        let (mut graph, ids) = scoped_graph(3);
        graph.add_edge(ids[0], ids[2]).unwrap();

        // ids[1] would be a valid new dependency on its own, but the set
        // also contains a self-reference, so nothing may change.
        let err = graph
            .replace_dependencies(ids[0], &[ids[1], ids[0]])
            .unwrap_err();
        assert!(matches!(err, EngineError::SelfDependency { .. }));

        // Untouched: the old edge survived, no partial additions.
        let deps = graph.dependencies_of(ids[0]);
        assert_eq!(deps, vec![ids[2]]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_replace_dependencies_cycle_rolls_back() {
        let (mut graph, ids) = scoped_graph(3);
        graph.add_edge(ids[1], ids[0]).unwrap();

        let err = graph.replace_dependencies(ids[0], &[ids[1]]).unwrap_err();
        assert!(matches!(err, EngineError::Cycle { .. }));
        assert!(graph.dependencies_of(ids[0]).is_empty());
        assert_eq!(graph.dependencies_of(ids[1]), vec![ids[0]]);
    }

    #[test]
    fn test_from_snapshot_skips_dangling_references() {
        use charter_core::{ItemKind, WorkflowTemplateId};
        use jiff::Timestamp;

        let scope = GovernanceTemplateId::new();
        let workflow_id = WorkflowTemplateId::new();
        let now = Timestamp::UNIX_EPOCH;
        let workflow = WorkflowTemplate {
            id: workflow_id,
            governance_template_id: scope,
            name: "W".into(),
            description: String::new(),
            order: 0,
            created_at: now,
            updated_at: now,
        };
        let deleted = ChecklistItemTemplateId::new();
        let survivor = ChecklistItemTemplate {
            id: ChecklistItemTemplateId::new(),
            workflow_template_id: workflow_id,
            name: "survivor".into(),
            description: String::new(),
            kind: ItemKind::Task,
            order: 0,
            dependencies_requires: vec![deleted],
            created_at: now,
            updated_at: now,
        };

        let graph = DependencyGraph::from_snapshot(scope, &[workflow], &[survivor.clone()]);
        assert!(graph.contains_item(survivor.id));
        assert_eq!(graph.edge_count(), 0);
    }
}
