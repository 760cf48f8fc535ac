//! Spatial grids: the phase-space partition the digraph is built on.
//!
//! The engine only talks to a grid through [`SpatialGrid`]; [`TreeGrid`] is the
//! binary-tree implementation used by the controller and the tests.

pub mod tree_grid;

pub use tree_grid::TreeGrid;

use crate::geometry::Rect;

/// Opaque handle naming one cell of a grid. Owned by the grid.
pub type GridCell = usize;

/// Capabilities the engine needs from a phase-space partition.
///
/// Handles stay valid until the cell is removed by [`SpatialGrid::coarsen`].
/// A subdivided cell keeps its handle but stops being a leaf; only leaves are
/// returned by [`SpatialGrid::cover`] and [`SpatialGrid::leaves`].
pub trait SpatialGrid {
    /// Number of leaf cells.
    fn size(&self) -> usize;

    /// Region covered by the whole grid.
    fn bounds(&self) -> Rect;

    /// Spatial dimension.
    fn dimension(&self) -> usize {
        self.bounds().dimension()
    }

    /// Closed box of `cell`.
    fn geometry(&self, cell: GridCell) -> Rect;

    /// All leaves whose closed box intersects the closed `region`.
    fn cover(&self, region: &Rect) -> Vec<GridCell>;

    /// Replace every leaf in `cells` by finer leaves and return the new leaves.
    fn subdivide(&mut self, cells: &[GridCell]) -> Vec<GridCell>;

    /// Drop all descendants of `cells`, turning each back into a leaf.
    fn coarsen(&mut self, cells: &[GridCell]);

    /// Current leaves in a deterministic order.
    fn leaves(&self) -> Vec<GridCell>;

    /// Number of leaves one call to `subdivide` produces per cell.
    fn refinement_factor(&self) -> usize;

    /// Exclusive upper bound on live handles. Sizes per-handle lookup tables.
    fn handle_bound(&self) -> usize;

    /// True if `cell` is a live leaf.
    fn is_leaf(&self, cell: GridCell) -> bool;
}
