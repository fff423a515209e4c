//! Ranking strategy selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How candidate escape paths are ranked each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Rank by threat-weighted score, then length.
    Weighted,
    /// Cut on the shortest route to the nearest exit, ignoring weights.
    Nearest,
}

impl Strategy {
    /// Parse strategy from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weighted" | "" => Some(Self::Weighted),
            "nearest" => Some(Self::Nearest),
            _ => None,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Weighted
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weighted => write!(f, "weighted"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}
