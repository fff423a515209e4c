//! In-memory network store.

use std::collections::BTreeSet;

use tracing::debug;

use crate::snapshot::NetworkSnapshot;
use crate::types::{Link, NodeId};
use super::GraphStore;

/// Largest network `Network::try_new` accepts.
pub const MAX_NODES: usize = 1 << 20;

/// Error type for network mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Node identifier outside `[0, N)`.
    #[error("Node {node} out of range (network has {node_count} nodes)")]
    NodeOutOfRange {
        /// Offending node.
        node: NodeId,
        /// Network size.
        node_count: usize,
    },
    /// Link from a node to itself.
    #[error("Self-loop on node {0}")]
    SelfLoop(NodeId),
    /// Requested node count exceeds `MAX_NODES`.
    #[error("Network of {requested} nodes exceeds the limit of {max}")]
    TooManyNodes {
        /// Requested node count.
        requested: usize,
        /// Limit.
        max: usize,
    },
}

/// Undirected network with exit gateways and per-node threat weights.
///
/// Owns all adjacency, exit and weight state. Adjacency uses `BTreeSet` for
/// deterministic iteration order.
///
/// ## Invariant
///
/// For every node `v`, `exit_links[v]` equals the number of live links from
/// `v` to an exit. It is maintained incrementally by `add_edge`,
/// `remove_edge` and `register_exit`.
#[derive(Debug, Clone)]
pub struct Network {
    adjacency: Vec<BTreeSet<NodeId>>,
    exits: BTreeSet<NodeId>,
    exit_links: Vec<u32>,
}

impl Network {
    /// Create a network of `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            exits: BTreeSet::new(),
            exit_links: vec![0; node_count],
        }
    }

    /// Create a network from an untrusted node count.
    ///
    /// Rejects counts above `MAX_NODES` instead of attempting the allocation.
    pub fn try_new(node_count: usize) -> Result<Self, StoreError> {
        if node_count > MAX_NODES {
            return Err(StoreError::TooManyNodes {
                requested: node_count,
                max: MAX_NODES,
            });
        }
        Ok(Self::new(node_count))
    }

    fn check(&self, node: NodeId) -> Result<(), StoreError> {
        if node.index() < self.adjacency.len() {
            Ok(())
        } else {
            Err(StoreError::NodeOutOfRange {
                node,
                node_count: self.adjacency.len(),
            })
        }
    }

    /// Insert the undirected link `u - v`.
    ///
    /// Returns `Ok(true)` if the link was new, `Ok(false)` if it already
    /// existed.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool, StoreError> {
        self.check(u)?;
        self.check(v)?;
        if u == v {
            return Err(StoreError::SelfLoop(u));
        }

        let inserted = self.adjacency[u.index()].insert(v);
        self.adjacency[v.index()].insert(u);

        if inserted {
            if self.exits.contains(&u) {
                self.exit_links[v.index()] += 1;
            }
            if self.exits.contains(&v) {
                self.exit_links[u.index()] += 1;
            }
        }
        Ok(inserted)
    }

    /// Remove the undirected link `u - v`.
    ///
    /// Removing an absent link is a no-op and returns `Ok(false)`.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool, StoreError> {
        self.check(u)?;
        self.check(v)?;

        let removed = self.adjacency[u.index()].remove(&v);
        self.adjacency[v.index()].remove(&u);

        if removed {
            if self.exits.contains(&u) {
                self.exit_links[v.index()] -= 1;
            }
            if self.exits.contains(&v) {
                self.exit_links[u.index()] -= 1;
            }
            debug!(%u, %v, "link removed");
        }
        Ok(removed)
    }

    /// Mark `node` as an exit gateway.
    ///
    /// Every current neighbor gains one unit of threat weight. Registering
    /// the same exit twice is a no-op. Exits are expected to be registered
    /// during setup, before the first turn.
    pub fn register_exit(&mut self, node: NodeId) -> Result<bool, StoreError> {
        self.check(node)?;
        if !self.exits.insert(node) {
            return Ok(false);
        }
        for neighbor in &self.adjacency[node.index()] {
            self.exit_links[neighbor.index()] += 1;
        }
        Ok(true)
    }

    /// Whether the link `u - v` is currently present.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency
            .get(u.index())
            .map(|set| set.contains(&v))
            .unwrap_or(false)
    }

    /// Number of live links.
    pub fn num_links(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// All live links in canonical order.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::with_capacity(self.num_links());
        for (index, neighbors) in self.adjacency.iter().enumerate() {
            let node = NodeId::new(index);
            for &other in neighbors.range(node..) {
                if other != node {
                    links.push(Link::new(node, other));
                }
            }
        }
        links
    }

    /// Capture the live state for fingerprinting.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            node_count: self.adjacency.len(),
            exits: self.exits.iter().copied().collect(),
            links: self.links(),
        }
    }
}

impl GraphStore for Network {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.adjacency[node.index()].iter().copied().collect()
    }

    fn is_exit(&self, node: NodeId) -> bool {
        self.exits.contains(&node)
    }

    fn exits(&self) -> Vec<NodeId> {
        self.exits.iter().copied().collect()
    }

    fn weight(&self, node: NodeId) -> u32 {
        if self.exits.contains(&node) {
            0
        } else {
            self.exit_links[node.index()]
        }
    }
}
