//! Paths through the network.

use serde::{Deserialize, Serialize};
use std::fmt;
use super::edge::Severance;
use super::node::NodeId;

/// Ordered node sequence from a source to a destination.
///
/// Consecutive nodes are joined by a link that existed when the path was
/// computed. Paths are never cached across turns.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<NodeId>);

impl Path {
    /// Create a path from its node sequence.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }

    /// Nodes in traversal order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    /// Number of nodes (not hops).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First node.
    pub fn source(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    /// Last node.
    pub fn destination(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    /// Append one hop.
    pub fn push(&mut self, node: NodeId) {
        self.0.push(node);
    }

    /// The link between the second-to-last and last node.
    ///
    /// `None` for paths with fewer than two nodes.
    pub fn final_hop(&self) -> Option<Severance> {
        match self.0.as_slice() {
            [.., near, exit] => Some(Severance::new(*near, *exit)),
            _ => None,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in &self.0 {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{}", node)?;
            first = false;
        }
        Ok(())
    }
}
