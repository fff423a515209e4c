//! Link types for the network.

use serde::{Deserialize, Serialize};
use std::fmt;
use super::node::NodeId;

/// Undirected link between two distinct nodes.
///
/// Stored in canonical form (`lo < hi`) so that `Link::new(a, b)` and
/// `Link::new(b, a)` compare equal and sort identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Lower endpoint.
    pub lo: NodeId,
    /// Higher endpoint.
    pub hi: NodeId,
}

impl Link {
    /// Create a canonical link from two endpoints in any order.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lo, self.hi)
    }
}

/// A link cut during a turn, oriented along the path that motivated it.
///
/// `near` is the second-to-last node of the winning path and `exit` the
/// gateway it leads into. Displays as `near exit`, which is the protocol
/// output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Severance {
    /// Endpoint on the adversary's side.
    pub near: NodeId,
    /// Endpoint on the exit side.
    pub exit: NodeId,
}

impl Severance {
    /// Create a new severance.
    pub fn new(near: NodeId, exit: NodeId) -> Self {
        Self { near, exit }
    }

    /// The undirected link this severance removes.
    pub fn link(&self) -> Link {
        Link::new(self.near, self.exit)
    }
}

impl fmt::Display for Severance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.near, self.exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeId {
        NodeId::new(i)
    }

    #[test]
    fn test_link_is_unordered() {
        assert_eq!(Link::new(n(3), n(1)), Link::new(n(1), n(3)));
        assert_eq!(Link::new(n(3), n(1)).lo, n(1));
    }

    #[test]
    fn test_link_ordering() {
        let l1 = Link::new(n(0), n(2));
        let l2 = Link::new(n(0), n(5));
        let l3 = Link::new(n(1), n(2));

        // Same lower endpoint, different upper
        assert!(l1 < l2);
        // Different lower endpoint
        assert!(l2 < l3);
    }

    #[test]
    fn test_severance_keeps_path_orientation() {
        let cut = Severance::new(n(7), n(2));
        assert_eq!(cut.to_string(), "7 2");
        assert_eq!(cut.link(), Link::new(n(2), n(7)));
        assert!(cut.link().touches(n(7)));
    }
}
