//! Scoring and ordering of candidate escape paths.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::store::GraphStore;
use crate::types::{Path, Severance};

/// Sum of threat weights over every node of `path`, exit included.
pub fn path_weight<G: GraphStore + ?Sized>(graph: &G, path: &Path) -> i64 {
    path.nodes()
        .iter()
        .map(|&node| i64::from(graph.weight(node)))
        .sum()
}

/// Candidate escape path with its score.
///
/// Formula:
/// ```text
/// score    = weight_sum - len
/// priority = len - score
/// ```
///
/// where `len` counts nodes. Lower priority means the path is a more urgent
/// target for severance: short routes through nodes that touch many exits
/// come first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPath {
    /// The path, ending at an exit.
    pub path: Path,
    /// Sum of threat weights along the path.
    pub weight_sum: i64,
    /// `weight_sum - len`.
    pub score: i64,
}

impl ScoredPath {
    /// Score `path` against the current weights of `graph`.
    pub fn weighted<G: GraphStore + ?Sized>(graph: &G, path: Path) -> Self {
        let weight_sum = path_weight(graph, &path);
        Self::with_weight(path, weight_sum)
    }

    /// Score `path` ignoring threat weights, so only its length counts.
    pub fn unweighted(path: Path) -> Self {
        Self::with_weight(path, 0)
    }

    fn with_weight(path: Path, weight_sum: i64) -> Self {
        let score = weight_sum - path.len() as i64;
        Self {
            path,
            weight_sum,
            score,
        }
    }

    /// Number of nodes in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Ranking key, `len - score`. Lower ranks first.
    pub fn priority(&self) -> i64 {
        self.len() as i64 - self.score
    }

    /// The link to cut: the last hop into the exit.
    pub fn severance(&self) -> Option<Severance> {
        self.path.final_hop()
    }
}

// Ordering is "most urgent first": `min()` over candidates picks the winner.
impl PartialEq for ScoredPath {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredPath {}

impl PartialOrd for ScoredPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredPath {
    fn cmp(&self, other: &Self) -> Ordering {
        // Primary: lower priority first
        // Secondary: shorter path first
        // Tertiary: node sequence for determinism
        self.priority()
            .cmp(&other.priority())
            .then_with(|| self.len().cmp(&other.len()))
            .then_with(|| self.path.cmp(&other.path))
    }
}
