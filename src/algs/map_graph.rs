//! Combinatorial map: the digraph induced by a grid and a set-valued map.
//!
//! Vertex `v` stands for one grid cell; its out-neighbours are the cells of the
//! indexed subset that meet the image of the cell's box. Edges are computed on
//! demand and never stored.

use std::cell::Cell;
use std::collections::HashMap;

use crate::algs::digraph::Digraph;
use crate::grid::{GridCell, SpatialGrid};
use crate::maps::PhaseMap;

/// Diagnostic counters for map evaluation, owned by one [`MapGraph`].
#[derive(Debug, Default)]
pub struct EvalStats {
    evaluations: Cell<u64>,
    covered: Cell<u64>,
    dropped: Cell<u64>,
}

impl EvalStats {
    /// Number of map images computed.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }
    /// Covering cells that landed inside the indexed subset.
    pub fn covered(&self) -> u64 {
        self.covered.get()
    }
    /// Covering cells discarded because they were outside the indexed subset.
    pub fn dropped(&self) -> u64 {
        self.dropped.get()
    }

    fn record(&self, covered: usize, dropped: usize) {
        self.evaluations.set(self.evaluations.get() + 1);
        self.covered.set(self.covered.get() + covered as u64);
        self.dropped.set(self.dropped.get() + dropped as u64);
    }
}

/// Digraph view of `(grid, map)` restricted to a subset of cells.
pub struct MapGraph<'a, G: ?Sized, M: ?Sized> {
    grid: &'a G,
    map: &'a M,
    lookup: Vec<GridCell>,
    index: HashMap<GridCell, usize>,
    stats: EvalStats,
}

impl<'a, G, M> MapGraph<'a, G, M>
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
{
    /// View over every leaf of `grid`.
    pub fn new(grid: &'a G, map: &'a M) -> Self {
        Self::with_cells(grid, map, grid.leaves())
    }

    /// View over the given cells. Repeated handles are indexed once.
    pub fn with_cells<I>(grid: &'a G, map: &'a M, cells: I) -> Self
    where
        I: IntoIterator<Item = GridCell>,
    {
        let cells = cells.into_iter();
        let mut lookup = Vec::with_capacity(cells.size_hint().0);
        let mut index = HashMap::with_capacity(cells.size_hint().0);
        for cell in cells {
            index.entry(cell).or_insert_with(|| {
                lookup.push(cell);
                lookup.len() - 1
            });
        }
        Self {
            grid,
            map,
            lookup,
            index,
            stats: EvalStats::default(),
        }
    }

    /// Vertex index of a grid cell, if it is part of the view.
    #[inline]
    pub fn index(&self, cell: GridCell) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    /// Grid cell behind vertex `v`.
    #[inline]
    pub fn lookup(&self, v: usize) -> GridCell {
        self.lookup[v]
    }

    /// Translate vertex indices back to grid cells.
    pub fn cells(&self, vertices: &[usize]) -> Vec<GridCell> {
        vertices.iter().map(|&v| self.lookup[v]).collect()
    }

    /// Evaluation counters accumulated so far.
    pub fn stats(&self) -> &EvalStats {
        &self.stats
    }

    /// Grid the view was built on.
    pub fn grid(&self) -> &G {
        self.grid
    }
}

impl<G, M> Digraph for MapGraph<'_, G, M>
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
{
    fn vertex_count(&self) -> usize {
        self.lookup.len()
    }

    fn out_neighbors(&self, v: usize) -> Vec<usize> {
        let image = self.map.image(&self.grid.geometry(self.lookup[v]));
        let cover = self.grid.cover(&image);
        let total = cover.len();
        let mut out: Vec<usize> = cover.into_iter().filter_map(|c| self.index(c)).collect();
        self.stats.record(out.len(), total - out.len());
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::grid::TreeGrid;
    use crate::maps::FnMap;

    fn shift(r: &Rect) -> Rect {
        Rect {
            lower: r.lower.iter().map(|x| x + 0.3).collect(),
            upper: r.upper.iter().map(|x| x + 0.3).collect(),
        }
    }

    #[test]
    fn neighbours_follow_the_image() {
        let grid = TreeGrid::uniform(Rect::new(vec![0.0], vec![1.0]).unwrap(), 2);
        let f = FnMap(shift);
        let g = MapGraph::new(&grid, &f);
        assert_eq!(g.vertex_count(), 4);
        // [0, .25] -> [.3, .55] meets cells 1 and 2.
        assert_eq!(g.out_neighbors(0), vec![1, 2]);
        // [.75, 1] -> [1.05, 1.3] leaves the domain.
        assert!(g.out_neighbors(3).is_empty());
        assert_eq!(g.stats().evaluations(), 2);
    }

    #[test]
    fn restricted_view_drops_outside_cells() {
        let grid = TreeGrid::uniform(Rect::new(vec![0.0], vec![1.0]).unwrap(), 2);
        let leaves = grid.leaves();
        let f = FnMap(shift);
        let g = MapGraph::with_cells(&grid, &f, [leaves[0], leaves[2], leaves[0]]);
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.index(leaves[2]), Some(1));
        assert_eq!(g.index(leaves[1]), None);
        assert_eq!(g.out_neighbors(0), vec![1]);
        assert_eq!(g.stats().dropped(), 1);
        assert_eq!(g.cells(&[1, 0]), vec![leaves[2], leaves[0]]);
    }
}
