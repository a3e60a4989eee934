//! Hierarchy graph model
//!
//! Scheduling units form what is expected to be a tree: every unit sits in
//! exactly one group, and groups nest. The model does not rely on that. It
//! stores the units as a general DAG so that a unit claimed by several groups
//! is representable and can be reported instead of corrupting the structure.
//!
//! ```text
//!   Discovery ──► classify ──► nodes ──► edges (group → child, weight = update order)
//!                                   │
//!                                   ├──► roots   (no incoming edges)
//!                                   └──► counts  (per category, computed once)
//! ```
//!
//! Parent links that loop back on themselves are kept as they are. Units
//! caught in a detached loop have no root above them, so a world can hold
//! nodes and still have no roots.
//!
//! The model is immutable once built. All queries are read-only projections
//! and are safe to call repeatedly.

pub mod known_unknowns;
pub mod node;

use log::{debug, warn};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::classification::classify_system;
use crate::domain::{HierarchyError, SystemHandle, UpdateOrder};
use crate::world::{Discovery, World};

pub use known_unknowns::KnownUnknowns;
pub use node::{SystemCounts, SystemNode, UNKNOWN_SYSTEM_TYPE};

/// Assembled snapshot of a world's scheduling hierarchy.
///
/// Borrows the world for its whole lifetime, so the world cannot change
/// between construction and the end of report generation.
pub struct Hierarchy<'w, W: ?Sized> {
    world: &'w W,
    graph: DiGraph<SystemNode, UpdateOrder>,
    by_handle: HashMap<SystemHandle, NodeIndex>,
    roots: Vec<NodeIndex>,
    counts: SystemCounts,
    known_unknowns: KnownUnknowns,
}

impl<'w, W: World + ?Sized> Hierarchy<'w, W> {
    /// Classify every discovered unit and wire it under its parent groups.
    ///
    /// # Errors
    /// - [`HierarchyError::DuplicateHandle`] if two units share a handle
    /// - [`HierarchyError::UnknownParent`] if a unit names a parent that was not discovered
    pub fn build(world: &'w W, discovery: Discovery) -> Result<Self, HierarchyError> {
        let Discovery { systems, known_unknowns } = discovery;

        let mut graph = DiGraph::with_capacity(systems.len(), systems.len());
        let mut by_handle = HashMap::with_capacity(systems.len());
        let mut counts = SystemCounts::default();

        for descriptor in &systems {
            let category = classify_system(descriptor.static_type.as_ref());
            counts.record(category);

            let index = graph.add_node(SystemNode {
                handle: descriptor.handle,
                type_name: descriptor.static_type.as_ref().map(|ty| ty.name.clone()),
                category,
            });

            if by_handle.insert(descriptor.handle, index).is_some() {
                return Err(HierarchyError::DuplicateHandle(descriptor.handle));
            }
        }

        for (position, descriptor) in systems.iter().enumerate() {
            let child = NodeIndex::new(position);

            for parent in &descriptor.parents {
                let group = *by_handle.get(&parent.group).ok_or(HierarchyError::UnknownParent {
                    child: descriptor.handle,
                    parent: parent.group,
                })?;

                if graph.contains_edge(group, child) {
                    warn!("{} declares parent {} more than once", descriptor.handle, parent.group);
                    continue;
                }

                let group_node = &graph[group];
                if group_node.category.is_leaf() {
                    warn!(
                        "{} declares {} ({}) as parent, which is not a group",
                        descriptor.handle,
                        group_node.type_label(),
                        group_node.category
                    );
                }

                graph.add_edge(group, child, parent.order);
            }
        }

        if let Err(cycle) = toposort(&graph, None) {
            warn!("Parent links loop back through {}", graph[cycle.node_id()].handle);
        }

        let roots: Vec<NodeIndex> = graph.externals(Direction::Incoming).collect();

        let hierarchy = Self { world, graph, by_handle, roots, counts, known_unknowns };

        debug!(
            "Assembled hierarchy for '{}': {} systems, {} roots, {} unknown",
            world.name(),
            hierarchy.node_count(),
            hierarchy.roots.len(),
            hierarchy.counts.unknown
        );

        let anomalies = hierarchy.find_nodes_with_multiple_parents().len();
        if anomalies > 0 {
            warn!("{anomalies} systems belong to more than one group");
        }

        Ok(hierarchy)
    }
}

impl<'w, W: ?Sized> Hierarchy<'w, W> {
    /// The world this hierarchy describes
    #[must_use]
    pub fn world(&self) -> &'w W {
        self.world
    }

    #[must_use]
    pub fn counts(&self) -> SystemCounts {
        self.counts
    }

    #[must_use]
    pub fn known_unknowns(&self) -> &KnownUnknowns {
        &self.known_unknowns
    }

    /// Nodes without parents.
    ///
    /// The order is not the update order and carries no meaning.
    #[must_use]
    pub fn root_nodes_unordered(&self) -> &[NodeIndex] {
        &self.roots
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// # Panics
    /// Panics if `index` does not belong to this hierarchy.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &SystemNode {
        &self.graph[index]
    }

    #[must_use]
    pub fn find_by_handle(&self, handle: SystemHandle) -> Option<NodeIndex> {
        self.by_handle.get(&handle).copied()
    }

    /// Groups that declare `index` as a child, in discovery order
    #[must_use]
    pub fn parents(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut parents: Vec<NodeIndex> =
            self.graph.neighbors_directed(index, Direction::Incoming).collect();
        parents.sort_unstable();
        parents
    }

    #[must_use]
    pub fn parent_count(&self, index: NodeIndex) -> usize {
        self.graph.neighbors_directed(index, Direction::Incoming).count()
    }

    /// Children of `index` in the group's update order.
    ///
    /// Units sharing an update slot keep their discovery order.
    #[must_use]
    pub fn children_ordered_for_update(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<(UpdateOrder, NodeIndex)> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        children.sort_unstable();
        children.into_iter().map(|(_, child)| child).collect()
    }

    /// Every node claimed by more than one group, in discovery order.
    #[must_use]
    pub fn find_nodes_with_multiple_parents(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().filter(|&index| self.parent_count(index) > 1).collect()
    }
}
