//! Node identifiers for the network.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the network.
///
/// Nodes are dense indices in `[0, N)` where `N` is fixed when the network
/// is built. Implements `Ord` so that adjacency sets, exits and paths
/// iterate in a deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Create a new NodeId from a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}
