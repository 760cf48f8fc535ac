//! Conley-Morse graph: recurrent sets and the reachability order between them.
//!
//! Vertices are dense ids `0..num_vertices()`. Each vertex owns the grid cells
//! of its Morse set and an optional invariant payload; the edge set is ordered
//! and de-duplicated. Edges encode reachability and are not transitively
//! reduced unless [`MorseGraph::transitive_reduction`] is asked for.

use std::collections::{BTreeSet, VecDeque};
use std::ops::Range;

use crate::debug_invariants::{DebugInvariants, check_disjoint};
use crate::grid::GridCell;
use crate::morse_error::MorseError;

/// Directed graph over Morse sets with per-vertex payload `I`.
#[derive(Clone, Debug, PartialEq)]
pub struct MorseGraph<I = ()> {
    edges: BTreeSet<(usize, usize)>,
    cell_sets: Vec<Vec<GridCell>>,
    invariants: Vec<Option<I>>,
}

impl<I> Default for MorseGraph<I> {
    fn default() -> Self {
        Self {
            edges: BTreeSet::new(),
            cell_sets: Vec::new(),
            invariants: Vec::new(),
        }
    }
}

impl<I> MorseGraph<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex with an empty cell set and no payload; returns its id.
    pub fn add_vertex(&mut self) -> usize {
        self.cell_sets.push(Vec::new());
        self.invariants.push(None);
        self.cell_sets.len() - 1
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.cell_sets.len()
    }

    #[inline]
    pub fn vertices(&self) -> Range<usize> {
        0..self.num_vertices()
    }

    fn check_vertex(&self, v: usize) -> Result<(), MorseError> {
        if v < self.num_vertices() {
            Ok(())
        } else {
            Err(MorseError::VertexOutOfRange {
                vertex: v,
                count: self.num_vertices(),
            })
        }
    }

    /// Insert `from -> to`. Returns `Ok(false)` if the edge was already present.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<bool, MorseError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        Ok(self.edges.insert((from, to)))
    }

    /// Remove `from -> to`; returns whether it was present.
    pub fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        self.edges.remove(&(from, to))
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges.contains(&(from, to))
    }

    /// All edges in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Targets of the edges leaving `v`, ascending.
    pub fn out_edges(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.range((v, 0)..=(v, usize::MAX)).map(|&(_, t)| t)
    }

    /// Sources of the edges entering `v`, ascending.
    pub fn in_edges(&self, v: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|&&(_, t)| t == v)
            .map(|&(s, _)| s)
            .collect()
    }

    /// Grid cells of the Morse set at `v`.
    ///
    /// # Panics
    /// If `v` is not a vertex.
    pub fn cell_set(&self, v: usize) -> &[GridCell] {
        &self.cell_sets[v]
    }

    pub fn cell_set_mut(&mut self, v: usize) -> &mut Vec<GridCell> {
        &mut self.cell_sets[v]
    }

    /// Drop all cell sets, keeping vertices, edges and payloads.
    pub fn clear_cell_sets(&mut self) {
        for cells in &mut self.cell_sets {
            *cells = Vec::new();
        }
    }

    pub fn invariant(&self, v: usize) -> Option<&I> {
        self.invariants.get(v).and_then(Option::as_ref)
    }

    pub fn set_invariant(&mut self, v: usize, invariant: I) -> Result<(), MorseError> {
        self.check_vertex(v)?;
        self.invariants[v] = Some(invariant);
        Ok(())
    }

    /// True if `to` is reachable from `from` along zero or more edges.
    pub fn path_exists(&self, from: usize, to: usize) -> bool {
        if from == to {
            return from < self.num_vertices();
        }
        let mut seen = vec![false; self.num_vertices()];
        let mut queue = VecDeque::from([from]);
        while let Some(u) = queue.pop_front() {
            for w in self.out_edges(u) {
                if w == to {
                    return true;
                }
                if !seen[w] {
                    seen[w] = true;
                    queue.push_back(w);
                }
            }
        }
        false
    }

    /// Induced subgraph over `vertices`, relabelled `0..k` in ascending order of
    /// the original ids. Repeated ids are taken once.
    pub fn subgraph<V>(&self, vertices: V) -> Result<Self, MorseError>
    where
        V: IntoIterator<Item = usize>,
        I: Clone,
    {
        let keep: BTreeSet<usize> = vertices.into_iter().collect();
        if let Some(&v) = keep.iter().next_back() {
            self.check_vertex(v)?;
        }
        let mut relabel = vec![usize::MAX; self.num_vertices()];
        let mut sub = Self::new();
        for &v in &keep {
            let id = sub.add_vertex();
            relabel[v] = id;
            sub.cell_sets[id] = self.cell_sets[v].clone();
            sub.invariants[id] = self.invariants[v].clone();
        }
        for &(s, t) in &self.edges {
            if relabel[s] != usize::MAX && relabel[t] != usize::MAX {
                sub.edges.insert((relabel[s], relabel[t]));
            }
        }
        Ok(sub)
    }

    /// Copy keeping only edges not implied by a longer path (the Hasse diagram
    /// when the graph is acyclic).
    pub fn transitive_reduction(&self) -> Self
    where
        I: Clone,
    {
        let mut reduced = self.clone();
        for &(s, t) in &self.edges {
            if s == t {
                reduced.edges.remove(&(s, t));
                continue;
            }
            let implied = self
                .out_edges(s)
                .filter(|&w| w != t && w != s)
                .any(|w| self.path_exists(w, t));
            if implied {
                reduced.edges.remove(&(s, t));
            }
        }
        reduced
    }
}

impl<I> DebugInvariants for MorseGraph<I> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "MorseGraph");
    }

    fn validate_invariants(&self) -> Result<(), MorseError> {
        if self.invariants.len() != self.cell_sets.len() {
            return Err(MorseError::InvariantViolation(format!(
                "{} payload slots for {} vertices",
                self.invariants.len(),
                self.cell_sets.len()
            )));
        }
        for &(s, t) in &self.edges {
            self.check_vertex(s)?;
            self.check_vertex(t)?;
        }
        check_disjoint(self.cell_sets.iter().map(|c| c.iter().copied()))
    }
}
