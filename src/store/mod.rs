//! Graph storage for the network.

pub mod memory;

use crate::types::NodeId;

/// Read-only view of a network.
///
/// Implementations must return neighbors in ascending `NodeId` order so that
/// every search built on top of them is deterministic. Querying a node
/// outside `[0, node_count())` is a programming error and may panic.
pub trait GraphStore {
    /// Number of nodes, fixed for the lifetime of the store.
    fn node_count(&self) -> usize;

    /// Whether `node` is a valid identifier for this store.
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Current neighbors of `node` (ascending).
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether `node` is an exit gateway.
    fn is_exit(&self, node: NodeId) -> bool;

    /// All exit gateways (ascending).
    fn exits(&self) -> Vec<NodeId>;

    /// Number of live links from `node` to exits. Always 0 for exits.
    fn weight(&self, node: NodeId) -> u32;
}

pub use memory::{Network, StoreError, MAX_NODES};
