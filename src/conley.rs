//! Attachment point for per-vertex invariants of the Morse graph.
//!
//! Homology-based Conley index computation lives outside this crate. The
//! controller only needs something that turns (grid, Morse set, map) into a
//! payload or an error; an error is logged and leaves the vertex without one.

use crate::geometry::Rect;
use crate::grid::{GridCell, SpatialGrid};
use crate::maps::PhaseMap;
use crate::morse_error::MorseError;

/// Computes an invariant for one Morse set.
pub trait InvariantComputer {
    type Invariant;

    fn compute<G, M>(&self, grid: &G, cells: &[GridCell], map: &M) -> Result<Self::Invariant, MorseError>
    where
        G: SpatialGrid + ?Sized,
        M: PhaseMap + ?Sized;
}

/// Attaches nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInvariant;

impl InvariantComputer for NoInvariant {
    type Invariant = ();

    fn compute<G, M>(&self, _grid: &G, _cells: &[GridCell], _map: &M) -> Result<(), MorseError>
    where
        G: SpatialGrid + ?Sized,
        M: PhaseMap + ?Sized,
    {
        Ok(())
    }
}

/// Smallest box containing the Morse set; a cheap geometric annotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundingBox;

impl InvariantComputer for BoundingBox {
    type Invariant = Rect;

    fn compute<G, M>(&self, grid: &G, cells: &[GridCell], _map: &M) -> Result<Rect, MorseError>
    where
        G: SpatialGrid + ?Sized,
        M: PhaseMap + ?Sized,
    {
        if let Some(&c) = cells.iter().find(|&&c| !grid.is_leaf(c)) {
            return Err(MorseError::UnknownCell(c));
        }
        let mut it = cells.iter();
        let first = it
            .next()
            .ok_or_else(|| MorseError::Invariant("empty Morse set".into()))?;
        Ok(it.fold(grid.geometry(*first), |acc, &c| acc.hull(&grid.geometry(c))))
    }
}
