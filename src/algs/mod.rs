//! Graph algorithms behind the Morse decomposition.

pub mod digraph;
pub mod map_graph;
pub mod morse_sets;
pub mod reachability;
pub mod scc;

pub use digraph::{AdjacencyGraph, Digraph};
pub use map_graph::{EvalStats, MapGraph};
pub use morse_sets::{MorseSets, compute_morse_sets, morse_graph_from_view};
pub use reachability::compute_reachability;
pub use scc::{StrongComponents, strong_components, strong_components_with_order};

#[cfg(test)]
mod tests;
