//! Core types for the network.

pub mod node;
pub mod edge;
pub mod path;

pub use node::NodeId;
pub use edge::{Link, Severance};
pub use path::Path;
