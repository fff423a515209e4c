//! Candidate path enumeration and ranking.
//!
//! For each exit the ranker builds one candidate per exit-adjacent node: the
//! shortest route to that node that avoids every other exit, extended by the
//! final hop into the exit. Candidates are then totally ordered by
//! [`ScoredPath`] and the minimum wins.

use tracing::debug;

use crate::pathfinder::shortest_path;
use crate::policy::{ScoredPath, Strategy};
use crate::store::GraphStore;
use crate::types::NodeId;

/// Ranks escape paths from the adversary's position against a graph snapshot.
pub struct PathRanker<'g, G: GraphStore + ?Sized> {
    graph: &'g G,
    strategy: Strategy,
}

impl<'g, G: GraphStore + ?Sized> PathRanker<'g, G> {
    /// Create a ranker over `graph`.
    pub fn new(graph: &'g G, strategy: Strategy) -> Self {
        Self { graph, strategy }
    }

    /// Get the strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Every admissible candidate from `from` into `exit`, unsorted.
    ///
    /// Empty when `from` is itself an exit: the adversary has already
    /// escaped and no cut can matter.
    pub fn candidates_to_exit(&self, from: NodeId, exit: NodeId) -> Vec<ScoredPath> {
        if self.graph.is_exit(from) {
            return Vec::new();
        }

        match self.strategy {
            Strategy::Nearest => shortest_path(self.graph, from, exit, true)
                .map(ScoredPath::unweighted)
                .into_iter()
                .collect(),
            Strategy::Weighted => self
                .graph
                .neighbors(exit)
                .into_iter()
                // An exit next to an exit is never an intermediate hop
                .filter(|&k| !self.graph.is_exit(k))
                .filter_map(|k| shortest_path(self.graph, from, k, true))
                .map(|mut path| {
                    path.push(exit);
                    ScoredPath::weighted(self.graph, path)
                })
                .collect(),
        }
    }

    /// Highest-ranked candidate into one exit.
    pub fn best_path_to_exit(&self, from: NodeId, exit: NodeId) -> Option<ScoredPath> {
        let best = self.candidates_to_exit(from, exit).into_iter().min();
        if let Some(candidate) = &best {
            debug!(
                %exit,
                path = %candidate.path,
                weight = candidate.weight_sum,
                priority = candidate.priority(),
                "best candidate for exit"
            );
        }
        best
    }

    /// Highest-ranked candidate across all exits.
    ///
    /// `None` means the adversary cannot reach any exit, or is already on
    /// one.
    pub fn best_path(&self, from: NodeId) -> Option<ScoredPath> {
        self.graph
            .exits()
            .into_iter()
            .filter_map(|exit| self.best_path_to_exit(from, exit))
            .min()
    }
}

/// Best weighted candidate from `from` into `exit`.
pub fn best_path_to_exit<G: GraphStore + ?Sized>(
    graph: &G,
    from: NodeId,
    exit: NodeId,
) -> Option<ScoredPath> {
    PathRanker::new(graph, Strategy::Weighted).best_path_to_exit(from, exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Network;
    use crate::types::Severance;

    fn n(i: usize) -> NodeId {
        NodeId::new(i)
    }

    fn build(node_count: usize, links: &[(usize, usize)], exits: &[usize]) -> Network {
        let mut net = Network::new(node_count);
        for &(u, v) in links {
            net.add_edge(n(u), n(v)).unwrap();
        }
        for &e in exits {
            net.register_exit(n(e)).unwrap();
        }
        net
    }

    #[test]
    fn test_linear_cuts_next_to_exit() {
        let net = build(4, &[(0, 1), (1, 2), (2, 3)], &[3]);
        let best = best_path_to_exit(&net, n(0), n(3)).unwrap();
        assert_eq!(best.severance(), Some(Severance::new(n(2), n(3))));
    }

    #[test]
    fn test_prefers_double_exit_node() {
        // 2 touches both exits (weight 2), 1 touches only exit 3
        let net = build(5, &[(0, 1), (1, 3), (0, 2), (2, 3), (2, 4)], &[3, 4]);
        assert_eq!(net.weight(n(2)), 2);
        assert_eq!(net.weight(n(1)), 1);

        let ranker = PathRanker::new(&net, Strategy::Weighted);
        let best = ranker.best_path(n(0)).unwrap();
        assert_eq!(best.severance().map(|s| s.near), Some(n(2)));
    }

    #[test]
    fn test_one_candidate_per_exit_neighbor() {
        let net = build(5, &[(0, 1), (1, 3), (0, 2), (2, 3), (2, 4)], &[3, 4]);
        let ranker = PathRanker::new(&net, Strategy::Weighted);
        assert_eq!(ranker.candidates_to_exit(n(0), n(3)).len(), 2);
        assert_eq!(ranker.candidates_to_exit(n(0), n(4)).len(), 1);
    }

    #[test]
    fn test_adversary_on_exit_has_no_candidates() {
        let net = build(3, &[(0, 1), (1, 2)], &[2]);
        let ranker = PathRanker::new(&net, Strategy::Weighted);
        assert!(ranker.best_path(n(2)).is_none());
    }

    #[test]
    fn test_isolated_adversary_has_no_candidates() {
        let net = build(4, &[(1, 2), (2, 3)], &[3]);
        for strategy in [Strategy::Weighted, Strategy::Nearest] {
            assert!(PathRanker::new(&net, strategy).best_path(n(0)).is_none());
        }
    }

    #[test]
    fn test_nearest_ignores_weights() {
        // Exit 5 is two hops away on a weight-1 route; exit 6 is also two
        // hops away via node 2 which touches both 6 and 7.
        let net = build(
            8,
            &[(0, 1), (1, 5), (0, 2), (2, 6), (2, 7)],
            &[5, 6, 7],
        );
        let nearest = PathRanker::new(&net, Strategy::Nearest).best_path(n(0)).unwrap();
        assert_eq!(nearest.severance(), Some(Severance::new(n(1), n(5))));

        let weighted = PathRanker::new(&net, Strategy::Weighted).best_path(n(0)).unwrap();
        assert_eq!(weighted.severance().map(|s| s.near), Some(n(2)));
    }

    #[test]
    fn test_routes_through_other_exits_are_ignored() {
        // Only route to exit 3 passes through exit 1
        let net = build(4, &[(0, 1), (1, 2), (2, 3)], &[1, 3]);
        let ranker = PathRanker::new(&net, Strategy::Weighted);
        assert!(ranker.best_path_to_exit(n(0), n(3)).is_none());
        let best = ranker.best_path(n(0)).unwrap();
        assert_eq!(best.severance(), Some(Severance::new(n(0), n(1))));
    }
}
