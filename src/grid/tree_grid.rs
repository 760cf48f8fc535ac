//! Binary-tree adaptive grid.
//!
//! Every node is a closed box. Splitting a node at tree depth `d` bisects it along
//! axis `d % dim`, so `dim` consecutive subdivisions halve a cell in every
//! direction. Node storage is an arena of sibling pairs; blocks released by
//! [`SpatialGrid::coarsen`] are recycled.

use super::{GridCell, SpatialGrid};
use crate::debug_invariants::DebugInvariants;
use crate::geometry::Rect;
use crate::morse_error::MorseError;

const NONE: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct Node {
    parent: usize,
    /// Index of the left child; the right child is `left + 1`.
    left: usize,
    depth: u32,
    alive: bool,
}

impl Node {
    fn root() -> Self {
        Self {
            parent: NONE,
            left: NONE,
            depth: 0,
            alive: true,
        }
    }
}

/// Adaptive binary-tree partition of a box.
#[derive(Clone, Debug)]
pub struct TreeGrid {
    bounds: Rect,
    nodes: Vec<Node>,
    free_blocks: Vec<usize>,
    leaf_count: usize,
}

impl TreeGrid {
    /// A grid consisting of the single cell `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            nodes: vec![Node::root()],
            free_blocks: Vec::new(),
            leaf_count: 1,
        }
    }

    /// A grid uniformly bisected `levels` times (`2^levels` leaves).
    pub fn uniform(bounds: Rect, levels: u32) -> Self {
        let mut grid = Self::new(bounds);
        for _ in 0..levels {
            let leaves = grid.leaves();
            grid.subdivide(&leaves);
        }
        grid
    }

    /// Tree depth of `cell` (number of bisections from the root).
    pub fn depth(&self, cell: GridCell) -> u32 {
        self.nodes[cell].depth
    }

    /// Parent handle, or `None` for the root.
    pub fn parent(&self, cell: GridCell) -> Option<GridCell> {
        let p = self.nodes[cell].parent;
        (p != NONE).then_some(p)
    }

    fn axis(&self, depth: u32) -> usize {
        depth as usize % self.bounds.dimension().max(1)
    }

    fn alloc_block(&mut self, parent: usize) -> usize {
        let depth = self.nodes[parent].depth + 1;
        let child = Node {
            parent,
            left: NONE,
            depth,
            alive: true,
        };
        match self.free_blocks.pop() {
            Some(block) => {
                self.nodes[block] = child;
                self.nodes[block + 1] = child;
                block
            }
            None => {
                let block = self.nodes.len();
                self.nodes.push(child);
                self.nodes.push(child);
                block
            }
        }
    }

    fn split(&mut self, cell: GridCell) -> [GridCell; 2] {
        let block = self.alloc_block(cell);
        self.nodes[cell].left = block;
        self.leaf_count += 1;
        [block, block + 1]
    }

    fn release_subtree(&mut self, cell: GridCell) -> usize {
        let mut removed_leaves = 0;
        let mut stack = vec![self.nodes[cell].left];
        while let Some(block) = stack.pop() {
            for child in [block, block + 1] {
                let node = self.nodes[child];
                if node.left == NONE {
                    removed_leaves += 1;
                } else {
                    stack.push(node.left);
                }
                self.nodes[child].alive = false;
            }
            self.free_blocks.push(block);
        }
        self.nodes[cell].left = NONE;
        removed_leaves
    }
}

impl SpatialGrid for TreeGrid {
    fn size(&self) -> usize {
        self.leaf_count
    }

    fn bounds(&self) -> Rect {
        self.bounds.clone()
    }

    fn geometry(&self, cell: GridCell) -> Rect {
        assert!(self.nodes[cell].alive, "geometry of released cell {cell}");
        let mut path = Vec::with_capacity(self.nodes[cell].depth as usize);
        let mut n = cell;
        while self.nodes[n].parent != NONE {
            let p = self.nodes[n].parent;
            path.push(n != self.nodes[p].left);
            n = p;
        }
        let mut rect = self.bounds.clone();
        for (depth, is_right) in path.into_iter().rev().enumerate() {
            let (lo, hi) = rect.bisect(self.axis(depth as u32));
            rect = if is_right { hi } else { lo };
        }
        rect
    }

    fn cover(&self, region: &Rect) -> Vec<GridCell> {
        assert_eq!(
            region.dimension(),
            self.bounds.dimension(),
            "cover region has the wrong dimension"
        );
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self.bounds.clone())];
        while let Some((n, rect)) = stack.pop() {
            if !rect.intersects(region) {
                continue;
            }
            let node = self.nodes[n];
            if node.left == NONE {
                out.push(n);
                continue;
            }
            let (lo, hi) = rect.bisect(self.axis(node.depth));
            stack.push((node.left + 1, hi));
            stack.push((node.left, lo));
        }
        out
    }

    fn subdivide(&mut self, cells: &[GridCell]) -> Vec<GridCell> {
        let mut out = Vec::with_capacity(2 * cells.len());
        for &cell in cells {
            assert!(self.is_leaf(cell), "subdivide called on non-leaf cell {cell}");
            out.extend(self.split(cell));
        }
        out
    }

    fn coarsen(&mut self, cells: &[GridCell]) {
        for &cell in cells {
            let node = self.nodes[cell];
            if !node.alive || node.left == NONE {
                continue;
            }
            let removed = self.release_subtree(cell);
            self.leaf_count = self.leaf_count + 1 - removed;
        }
    }

    fn leaves(&self) -> Vec<GridCell> {
        let mut out = Vec::with_capacity(self.leaf_count);
        let mut stack = vec![0usize];
        while let Some(n) = stack.pop() {
            let left = self.nodes[n].left;
            if left == NONE {
                out.push(n);
            } else {
                stack.push(left + 1);
                stack.push(left);
            }
        }
        out
    }

    fn refinement_factor(&self) -> usize {
        2
    }

    fn handle_bound(&self) -> usize {
        self.nodes.len()
    }

    fn is_leaf(&self, cell: GridCell) -> bool {
        self.nodes
            .get(cell)
            .is_some_and(|n| n.alive && n.left == NONE)
    }
}

impl DebugInvariants for TreeGrid {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TreeGrid");
    }

    fn validate_invariants(&self) -> Result<(), MorseError> {
        let leaves = self.leaves();
        if leaves.len() != self.leaf_count {
            return Err(MorseError::InvariantViolation(format!(
                "leaf count {} disagrees with tree walk {}",
                self.leaf_count,
                leaves.len()
            )));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if !node.alive || node.left == NONE {
                continue;
            }
            for child in [node.left, node.left + 1] {
                let c = &self.nodes[child];
                if !c.alive || c.parent != i || c.depth != node.depth + 1 {
                    return Err(MorseError::InvariantViolation(format!(
                        "child {child} of {i} is inconsistent"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Rect {
        Rect::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn subdivision_alternates_axes() {
        let mut g = TreeGrid::new(unit_square());
        let halves = g.subdivide(&[0]);
        assert_eq!(halves.len(), 2);
        assert!((g.geometry(halves[0]).width(0) - 0.5).abs() < 1e-12);
        assert!((g.geometry(halves[0]).width(1) - 1.0).abs() < 1e-12);
        let quarters = g.subdivide(&halves);
        assert_eq!(quarters.len(), 4);
        assert_eq!(g.size(), 4);
        for k in &quarters {
            let r = g.geometry(*k);
            assert!((r.width(0) - 0.5).abs() < 1e-12);
            assert!((r.width(1) - 0.5).abs() < 1e-12);
            assert_eq!(g.depth(*k), 2);
        }
        g.validate_invariants().unwrap();
    }

    #[test]
    fn cover_counts_touching_cells() {
        let g = TreeGrid::uniform(unit_square(), 4);
        assert_eq!(g.size(), 16);
        // An interior point of one cell.
        assert_eq!(g.cover(&Rect::point(&[0.1, 0.1])).len(), 1);
        // A grid vertex touches four cells.
        assert_eq!(g.cover(&Rect::point(&[0.5, 0.5])).len(), 4);
        // Outside the bounds.
        assert!(g.cover(&Rect::point(&[2.0, 2.0])).is_empty());
    }

    #[test]
    fn coarsen_restores_leaf_and_recycles() {
        let mut g = TreeGrid::uniform(unit_square(), 2);
        let leaves = g.leaves();
        let target = leaves[0];
        let before = g.geometry(target);
        let fine = g.subdivide(&[target]);
        let fine = g.subdivide(&fine);
        assert_eq!(g.size(), 3 + 4);
        let nodes_before = g.handle_bound();
        g.coarsen(&[target]);
        assert_eq!(g.size(), 4);
        assert!(g.is_leaf(target));
        assert!(!g.is_leaf(fine[0]));
        assert_eq!(g.geometry(target), before);
        g.subdivide(&[target]);
        assert_eq!(g.handle_bound(), nodes_before);
        g.validate_invariants().unwrap();
    }

    #[test]
    fn one_dimensional_grid() {
        let g = TreeGrid::uniform(Rect::new(vec![-1.0], vec![1.0]).unwrap(), 3);
        assert_eq!(g.size(), 8);
        assert_eq!(g.refinement_factor(), 2);
        let leaves = g.leaves();
        let first = g.geometry(leaves[0]);
        assert_eq!(first.lower, vec![-1.0]);
        assert_eq!(first.upper, vec![-0.75]);
        assert_eq!(g.parent(leaves[0]).and_then(|p| g.parent(p)).map(|p| g.depth(p)), Some(1));
        assert_eq!(g.parent(0), None);
    }

    #[test]
    #[should_panic(expected = "subdivide called on non-leaf cell 0")]
    fn subdividing_a_split_cell_panics() {
        let mut g = TreeGrid::uniform(unit_square(), 2);
        g.subdivide(&[0]);
    }

    #[test]
    #[should_panic(expected = "cover region has the wrong dimension")]
    fn cover_rejects_wrong_dimension() {
        let g = TreeGrid::uniform(unit_square(), 2);
        g.cover(&Rect::point(&[0.5]));
    }
}
