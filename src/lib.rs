#![cfg_attr(docsrs, feature(doc_cfg))]
//! # conley-morse
//!
//! conley-morse computes Morse decompositions and Conley-Morse graphs of
//! dynamical systems given as set-valued maps on adaptively refined grids.
//!
//! ## Pipeline
//! - A [`grid::SpatialGrid`] partitions phase space; [`grid::TreeGrid`] is the
//!   binary-tree implementation.
//! - A [`maps::PhaseMap`] sends a box to a box enclosing its image.
//! - [`algs::MapGraph`] presents the pair as a digraph without storing edges.
//! - [`algs::strong_components_with_order`] finds the recurrent components with
//!   an explicit-stack search, and [`algs::compute_reachability`] resolves which
//!   component reaches which, 64 components per sweep.
//! - [`refine::refine`] drives repeated bisection, drops spurious candidates
//!   and assembles the [`morse_graph::MorseGraph`].
//!
//! ## Usage
//! ```
//! use conley_morse::prelude::*;
//!
//! let mut grid = TreeGrid::new(Rect::new(vec![-1.0], vec![1.0]).unwrap());
//! let contraction = FnMap(|r: &Rect| Rect {
//!     lower: vec![0.4 * r.lower[0]],
//!     upper: vec![0.4 * r.upper[0]],
//! });
//! let limits = RefinementLimits { min_depth: 6, max_depth: 8, ..Default::default() };
//! let mg = compute_morse_graph(&mut grid, &contraction, &limits).unwrap();
//! assert_eq!(mg.num_vertices(), 1);
//! ```
//!
//! ## Determinism
//! Grids, digraph views and the decomposition are deterministic: identical
//! inputs give identical vertex numbering, cell handles and edges.
//!
//! ## Features
//! - `rayon`: process the boxes of a [`sweep::ParameterSweep`] in parallel.
//! - `strict-invariants`: run the structural invariant checks in release builds.

pub mod algs;
pub mod config;
pub mod conley;
pub mod debug_invariants;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod maps;
pub mod morse_error;
pub mod morse_graph;
pub mod refine;
pub mod sweep;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::{
        AdjacencyGraph, Digraph, MapGraph, compute_morse_sets, compute_reachability,
        strong_components, strong_components_with_order,
    };
    pub use crate::config::{Configuration, RefinementLimits};
    pub use crate::conley::{BoundingBox, InvariantComputer, NoInvariant};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::Rect;
    pub use crate::grid::{GridCell, SpatialGrid, TreeGrid};
    pub use crate::maps::{FnMap, Interval, LeslieMap, PhaseMap};
    pub use crate::morse_error::MorseError;
    pub use crate::morse_graph::MorseGraph;
    pub use crate::refine::{Refinement, RefinementSummary, compute_morse_graph, refine};
    pub use crate::sweep::ParameterSweep;
}
