//! Ranking policy definitions.

pub mod strategy;
pub mod scoring;

pub use strategy::Strategy;
pub use scoring::{path_weight, ScoredPath};
