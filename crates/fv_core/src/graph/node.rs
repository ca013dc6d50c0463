use serde::{Deserialize, Serialize};

use crate::field::Sector;

/// Index of a node in the graph's node store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed transition from `from` to `to`.
///
/// `weight == 0` inherits the destination's current value; any other weight is a
/// fixed terminal reward (+1 score, -1 turnover).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: i32,
}

impl Edge {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.weight != 0
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Aggregate state of one sector: its outgoing edges and computed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub sector: Sector,
    /// Outgoing edges in construction order
    pub edges: Vec<Edge>,
    pub value: f64,
}

impl Node {
    pub fn new(sector: Sector) -> Self {
        Self { sector, edges: Vec::new(), value: 0.0 }
    }

    /// A node that is never a play's origin keeps its value forever.
    pub fn is_sink(&self) -> bool {
        self.edges.is_empty()
    }

    /// Non-terminal self-loops never contribute to the node's update.
    pub fn contributing_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.is_terminal() || !e.is_self_loop())
    }
}
