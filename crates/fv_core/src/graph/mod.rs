//! # Graph Module
//!
//! Sector transition graph stored as an arena.
//!
//! - Nodes live in a contiguous store in insertion order
//! - A `Sector → NodeId` index makes sector lookup O(1)
//! - Edges are `(from, to, weight)` index triples owned by their source node
//!
//! Edges are never deduplicated: a transition seen N times contributes N edges,
//! which is how frequent transitions gain proportionally more influence.

mod node;

pub use node::{Edge, Node, NodeId};

use fxhash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::field::{Sector, SectorTransition};

#[derive(Debug, Clone, Default, Serialize)]
pub struct SectorGraph {
    nodes: Vec<Node>,
    #[serde(skip)]
    index: FxHashMap<Sector, NodeId>,
}

impl SectorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from sector-tagged transitions: all completions first, then all turnovers.
    pub fn build(transitions: &[SectorTransition]) -> Self {
        let mut graph = Self::new();
        for t in transitions.iter().filter(|t| t.kind.is_completion()) {
            graph.add_transition(t);
        }
        for t in transitions.iter().filter(|t| !t.kind.is_completion()) {
            graph.add_transition(t);
        }
        debug!(nodes = graph.node_count(), edges = graph.edge_count(), "sector graph built");
        graph
    }

    /// Id of the node for `sector`, creating an empty node on first reference.
    pub fn node_or_insert(&mut self, sector: Sector) -> NodeId {
        if let Some(&id) = self.index.get(&sector) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(sector));
        self.index.insert(sector, id);
        id
    }

    /// Append a directed edge to the source node's edge list.
    pub fn add_edge(&mut self, from: Sector, to: Sector, weight: i32) -> NodeId {
        let from_id = self.node_or_insert(from);
        let to_id = self.node_or_insert(to);
        self.nodes[from_id.index()].edges.push(Edge { from: from_id, to: to_id, weight });
        from_id
    }

    pub fn add_transition(&mut self, transition: &SectorTransition) -> NodeId {
        self.add_edge(transition.source, transition.dest, transition.kind.weight())
    }

    pub fn id_of(&self, sector: Sector) -> Option<NodeId> {
        self.index.get(&sector).copied()
    }

    pub fn get(&self, sector: Sector) -> Option<&Node> {
        self.id_of(sector).map(|id| &self.nodes[id.index()])
    }

    pub fn value_of(&self, sector: Sector) -> Option<f64> {
        self.get(sector).map(|n| n.value)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current node values in insertion order.
    pub fn values(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.value).collect()
    }
}
