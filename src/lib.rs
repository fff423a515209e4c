//! # link-severance
//!
//! Turn-by-turn link severance on an undirected network.
//!
//! An adversary walks one hop per turn toward a set of exit gateways. Each
//! turn this crate answers one question:
//!
//! > Given the adversary's node, which single link should be cut?
//!
//! ## Core Contract
//!
//! 1. Enumerate admissible escape paths from the adversary to every exit
//! 2. Rank them by threat weight and length, deterministically
//! 3. Cut the link that enters the exit on the winning path
//!
//! ## Architecture
//!
//! ```text
//! TurnController → PathRanker → shortest_path → GraphStore (read)
//!        ↓
//!     Network::remove_edge (mutate)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same network + same adversary position → same cut
//! - Neighbors iterate in ascending `NodeId` order
//! - Candidate ordering is total: priority, then length, then node sequence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod policy;
pub mod store;
pub mod pathfinder;
pub mod ranker;
pub mod protocol;
pub mod controller;
pub mod canonical;
pub mod snapshot;
pub mod config;
pub mod exit;

// Re-exports
pub use types::{NodeId, Link, Severance, Path};
pub use policy::{Strategy, ScoredPath, path_weight};
pub use store::{GraphStore, Network, StoreError};
pub use pathfinder::{shortest_path, Traversal};
pub use ranker::{best_path_to_exit, PathRanker};
pub use protocol::{ProtocolError, Setup, TokenReader};
pub use controller::{run_session, SessionError, SessionOutcome, TurnController, TurnOutcome};
pub use canonical::canonical_hash_hex;
pub use snapshot::NetworkSnapshot;
pub use config::{ConfigWarning, LogFormat, RunConfig};
pub use exit::SeverExit;

/// Schema version mixed into network fingerprints.
/// Increment on breaking changes to `NetworkSnapshot`.
pub const NETWORK_SCHEMA_VERSION: &str = "1.0.0";
