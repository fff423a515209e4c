//! Breadth-first shortest paths over a network.
//!
//! The traversal expands from a source node with unit edge cost. When exits
//! are excluded, every exit other than the destination is a dead end: it is
//! discovered (so it is visited at most once) but never expanded, because an
//! adversary that reaches another exit has already escaped through it.

use std::collections::VecDeque;

use tracing::trace;

use crate::store::GraphStore;
use crate::types::{NodeId, Path};

/// Sentinel distance for nodes the traversal never reached.
const UNREACHED: u32 = u32::MAX;

/// Distances recorded by one breadth-first traversal.
///
/// ## Algorithm
///
/// 1. Source at distance 0, all other nodes unreached
/// 2. Pop the frontier in FIFO order
/// 3. Skip expansion of dead-end exits
/// 4. A neighbor's distance is set on first discovery and never lowered
#[derive(Debug, Clone)]
pub struct Traversal {
    from: NodeId,
    target: NodeId,
    exclude_other_exits: bool,
    distance: Vec<u32>,
}

impl Traversal {
    /// Run a full traversal from `from`.
    ///
    /// `target` is the one exit allowed to be expanded through when
    /// `exclude_other_exits` is set; it has no effect otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `target` is outside the graph.
    pub fn run<G: GraphStore + ?Sized>(
        graph: &G,
        from: NodeId,
        target: NodeId,
        exclude_other_exits: bool,
    ) -> Self {
        let mut traversal = Self {
            from,
            target,
            exclude_other_exits,
            distance: vec![UNREACHED; graph.node_count()],
        };
        assert!(graph.contains(target), "target {target} outside graph");

        let mut frontier = VecDeque::new();
        traversal.distance[from.index()] = 0;
        frontier.push_back(from);

        while let Some(node) = frontier.pop_front() {
            if traversal.is_dead_end(graph, node) {
                continue;
            }
            let next_distance = traversal.distance[node.index()] + 1;
            for neighbor in graph.neighbors(node) {
                let slot = &mut traversal.distance[neighbor.index()];
                if *slot == UNREACHED {
                    *slot = next_distance;
                    frontier.push_back(neighbor);
                }
            }
        }

        traversal
    }

    fn is_dead_end<G: GraphStore + ?Sized>(&self, graph: &G, node: NodeId) -> bool {
        self.exclude_other_exits
            && node != self.from
            && node != self.target
            && graph.is_exit(node)
    }

    /// Hop count from the source, or `None` if unreached.
    pub fn distance(&self, node: NodeId) -> Option<u32> {
        match self.distance.get(node.index()) {
            Some(&d) if d != UNREACHED => Some(d),
            _ => None,
        }
    }

    /// Rebuild a shortest path to `to` by walking distances backward.
    ///
    /// At each step the lowest-id neighbor one hop closer to the source is
    /// taken. Dead-end exits are never chosen as predecessors.
    pub fn path_to<G: GraphStore + ?Sized>(&self, graph: &G, to: NodeId) -> Option<Path> {
        let mut current_distance = self.distance(to)?;
        let mut nodes = vec![to];
        let mut current = to;

        while current != self.from {
            let wanted = current_distance - 1;
            let previous = graph
                .neighbors(current)
                .into_iter()
                .find(|&k| self.distance(k) == Some(wanted) && !self.is_dead_end(graph, k))?;
            nodes.push(previous);
            current = previous;
            current_distance = wanted;
        }

        nodes.reverse();
        Some(Path::new(nodes))
    }
}

/// Shortest path from `from` to `to`, or `None` if `to` is unreachable.
///
/// With `exclude_other_exits` set, routes through any exit other than `to`
/// are not considered. Among equal-length shortest paths the one built from
/// lowest-id predecessors is returned.
///
/// # Panics
///
/// Panics if either node is outside the graph.
pub fn shortest_path<G: GraphStore + ?Sized>(
    graph: &G,
    from: NodeId,
    to: NodeId,
    exclude_other_exits: bool,
) -> Option<Path> {
    let traversal = Traversal::run(graph, from, to, exclude_other_exits);
    let path = traversal.path_to(graph, to);
    if path.is_none() {
        trace!(%from, %to, "no path");
    }
    path
}
