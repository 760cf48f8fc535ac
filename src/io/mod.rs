//! Persisted form of Morse graphs.
//!
//! A [`MorseGraphRecord`] is the exchange format handed to storage and export
//! layers: the vertex count, the edge list and the per-vertex cell sets and
//! payloads. Records are written as JSON with `serde_json`.

pub mod parameter;

pub use parameter::ParameterBoxRecord;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::grid::GridCell;
use crate::morse_error::MorseError;
use crate::morse_graph::MorseGraph;

const MORSE_GRAPH_FORMAT_VERSION: u32 = 1;

/// Serializable snapshot of a [`MorseGraph`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MorseGraphRecord<I> {
    /// Format version.
    pub version: u32,
    pub vertex_count: usize,
    /// Edges in lexicographic order.
    pub edges: Vec<(usize, usize)>,
    /// Cell handles per vertex.
    pub cell_sets: Vec<Vec<GridCell>>,
    /// Optional payload per vertex.
    pub invariants: Vec<Option<I>>,
}

impl<I: Clone> From<&MorseGraph<I>> for MorseGraphRecord<I> {
    fn from(graph: &MorseGraph<I>) -> Self {
        Self {
            version: MORSE_GRAPH_FORMAT_VERSION,
            vertex_count: graph.num_vertices(),
            edges: graph.edges().collect(),
            cell_sets: graph.vertices().map(|v| graph.cell_set(v).to_vec()).collect(),
            invariants: graph.vertices().map(|v| graph.invariant(v).cloned()).collect(),
        }
    }
}

impl<I> MorseGraphRecord<I> {
    /// Rebuild the graph, checking that the record is self-consistent.
    pub fn into_graph(self) -> Result<MorseGraph<I>, MorseError> {
        if self.version != MORSE_GRAPH_FORMAT_VERSION {
            return Err(MorseError::Serialization(format!(
                "unsupported Morse graph format version {}",
                self.version
            )));
        }
        if self.cell_sets.len() != self.vertex_count || self.invariants.len() != self.vertex_count {
            return Err(MorseError::Serialization(format!(
                "{} vertices but {} cell sets and {} payloads",
                self.vertex_count,
                self.cell_sets.len(),
                self.invariants.len()
            )));
        }
        let mut graph = MorseGraph::new();
        for (cells, invariant) in self.cell_sets.into_iter().zip(self.invariants) {
            let v = graph.add_vertex();
            *graph.cell_set_mut(v) = cells;
            if let Some(i) = invariant {
                graph.set_invariant(v, i)?;
            }
        }
        for (s, t) in self.edges {
            graph.add_edge(s, t)?;
        }
        Ok(graph)
    }
}

/// JSON text of `graph`.
pub fn to_json<I>(graph: &MorseGraph<I>) -> Result<String, MorseError>
where
    I: Serialize + Clone,
{
    Ok(serde_json::to_string_pretty(&MorseGraphRecord::from(graph))?)
}

/// Parse a graph written by [`to_json`].
pub fn from_json<I>(text: &str) -> Result<MorseGraph<I>, MorseError>
where
    I: DeserializeOwned,
{
    serde_json::from_str::<MorseGraphRecord<I>>(text)?.into_graph()
}

pub fn write_json<I>(path: impl AsRef<Path>, graph: &MorseGraph<I>) -> Result<(), MorseError>
where
    I: Serialize + Clone,
{
    let path = path.as_ref();
    let text = to_json(graph)?;
    fs::write(path, text)
        .map_err(|e| MorseError::Serialization(format!("{}: {e}", path.display())))
}

pub fn read_json<I>(path: impl AsRef<Path>) -> Result<MorseGraph<I>, MorseError>
where
    I: DeserializeOwned,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| MorseError::Serialization(format!("{}: {e}", path.display())))?;
    from_json(&text)
}
