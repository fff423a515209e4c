//! Network snapshot identity.
//!
//! A `NetworkSnapshot` captures the live state of a network (node count,
//! exits, remaining links) so that a turn transcript can be tied to the exact
//! graph it was computed against.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::types::{Link, NodeId};
use crate::NETWORK_SCHEMA_VERSION;

/// Serializable picture of a network at one point in time.
///
/// `exits` and `links` are sorted, so two networks with the same live state
/// produce byte-identical encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Total number of nodes.
    pub node_count: usize,
    /// Exit gateways, ascending.
    pub exits: Vec<NodeId>,
    /// Live links in canonical order.
    pub links: Vec<Link>,
}

#[derive(Serialize)]
struct FingerprintInput<'a> {
    schema_version: &'a str,
    snapshot: &'a NetworkSnapshot,
}

impl NetworkSnapshot {
    /// Deterministic xxh64 fingerprint (16 hex chars).
    pub fn fingerprint(&self) -> String {
        let input = FingerprintInput {
            schema_version: NETWORK_SCHEMA_VERSION,
            snapshot: self,
        };
        // Plain integers and strings cannot fail to encode.
        canonical_hash_hex(&input).unwrap_or_default()
    }

    /// Number of live links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
