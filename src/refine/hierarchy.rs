//! Record of the decomposition rounds.
//!
//! Every node is a candidate at one resolution. Decomposing a node splits its
//! cells into the components found in the node's own digraph view, bisects each
//! component and stores the results as children, together with the reachability
//! between those siblings. Sibling reachability is computed while the transient
//! cells that connect the siblings are still part of the view, which is what the
//! final Morse graph edges are assembled from.

use std::collections::{BTreeSet, HashMap};

use crate::algs::map_graph::MapGraph;
use crate::algs::morse_sets::compute_morse_sets;
use crate::algs::scc::strong_components;
use crate::debug_invariants::{DebugInvariants, check_disjoint};
use crate::grid::{GridCell, SpatialGrid};
use crate::maps::PhaseMap;
use crate::morse_error::MorseError;

/// Components of a cell set, expressed as grid cells.
#[derive(Debug, Default)]
pub(crate) struct CellDecomposition {
    pub components: Vec<Vec<GridCell>>,
    /// Empty unless reachability was requested.
    pub reach: Vec<Vec<usize>>,
    pub evaluations: u64,
}

/// Decompose the digraph view restricted to `cells`.
pub(crate) fn decompose_cells<G, M>(
    grid: &G,
    map: &M,
    cells: &[GridCell],
    with_reach: bool,
) -> CellDecomposition
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
{
    let view = MapGraph::with_cells(grid, map, cells.iter().copied());
    let (components, reach) = if with_reach {
        let sets = compute_morse_sets(&view);
        (sets.components, sets.reach)
    } else {
        (strong_components(&view), Vec::new())
    };
    CellDecomposition {
        components: components.iter().map(|c| view.cells(c)).collect(),
        reach,
        evaluations: view.stats().evaluations(),
    }
}

#[derive(Clone, Debug)]
pub(crate) struct HierarchyNode {
    pub parent: Option<usize>,
    pub depth: u32,
    pub cells: Vec<GridCell>,
    pub children: Vec<usize>,
    /// `sibling_reach[i]` lists the positions in `children` reached by child `i`.
    pub sibling_reach: Vec<Vec<usize>>,
}

#[derive(Clone, Debug)]
pub(crate) struct DecompositionHierarchy {
    nodes: Vec<HierarchyNode>,
}

impl DecompositionHierarchy {
    pub fn new(root_cells: Vec<GridCell>) -> Self {
        Self {
            nodes: vec![HierarchyNode {
                parent: None,
                depth: 0,
                cells: root_cells,
                children: Vec::new(),
                sibling_reach: Vec::new(),
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: usize) -> &HierarchyNode {
        &self.nodes[id]
    }

    /// Decompose `id`, bisect every component and attach the results as
    /// children. Returns the child ids and the number of map evaluations.
    pub fn decompose<G, M>(&mut self, id: usize, grid: &mut G, map: &M) -> (Vec<usize>, u64)
    where
        G: SpatialGrid + ?Sized,
        M: PhaseMap + ?Sized,
    {
        let found = decompose_cells(&*grid, map, &self.nodes[id].cells, true);
        let depth = self.nodes[id].depth + 1;
        let mut children = Vec::with_capacity(found.components.len());
        for component in &found.components {
            let cells = grid.subdivide(component);
            children.push(self.nodes.len());
            self.nodes.push(HierarchyNode {
                parent: Some(id),
                depth,
                cells,
                children: Vec::new(),
                sibling_reach: Vec::new(),
            });
        }
        let node = &mut self.nodes[id];
        node.children = children.clone();
        node.sibling_reach = found.reach;
        (children, found.evaluations)
    }

    /// Edges between Morse graph vertices implied by sibling reachability.
    ///
    /// `vertex_of` maps the retained nodes to their vertex ids. Nodes are
    /// created parent first, so a reverse sweep sees children before parents.
    pub fn sibling_edges(&self, vertex_of: &HashMap<usize, usize>) -> BTreeSet<(usize, usize)> {
        let mut under: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        let mut edges = BTreeSet::new();
        for id in (0..self.nodes.len()).rev() {
            if let Some(&v) = vertex_of.get(&id) {
                under[id] = vec![v];
                continue;
            }
            let node = &self.nodes[id];
            for (i, targets) in node.sibling_reach.iter().enumerate() {
                for &j in targets.iter().filter(|&&j| j != i) {
                    for &u in &under[node.children[i]] {
                        for &w in &under[node.children[j]] {
                            edges.insert((u, w));
                        }
                    }
                }
            }
            let mut gathered = Vec::new();
            for &child in &node.children {
                gathered.append(&mut under[child]);
            }
            under[id] = gathered;
        }
        edges
    }
}

impl DebugInvariants for DecompositionHierarchy {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "DecompositionHierarchy");
    }

    /// Candidates at the same depth never share a cell.
    fn validate_invariants(&self) -> Result<(), MorseError> {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        for depth in 0..=max_depth {
            check_disjoint(
                self.nodes
                    .iter()
                    .filter(|n| n.depth == depth)
                    .map(|n| n.cells.iter().copied()),
            )?;
        }
        for (id, node) in self.nodes.iter().enumerate() {
            if node.sibling_reach.len() != node.children.len() {
                return Err(MorseError::InvariantViolation(format!(
                    "node {id}: {} reach lists for {} children",
                    node.sibling_reach.len(),
                    node.children.len()
                )));
            }
            if node.children.iter().any(|&c| self.nodes[c].parent != Some(id)) {
                return Err(MorseError::InvariantViolation(format!(
                    "node {id} has a child pointing elsewhere"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::grid::TreeGrid;
    use crate::maps::FnMap;

    /// Repeller at 0, attractor at 0.4.
    fn two_fixed_points(x: f64) -> f64 {
        let p = 0.4;
        let s = 0.1;
        (3.0 * x).min(p + s * (x - p))
    }

    fn monotone(r: &Rect) -> Rect {
        Rect {
            lower: vec![two_fixed_points(r.lower[0])],
            upper: vec![two_fixed_points(r.upper[0])],
        }
    }

    #[test]
    fn siblings_inherit_reachability() {
        let mut grid = TreeGrid::uniform(Rect::new(vec![0.0], vec![1.0]).unwrap(), 2);
        let f = FnMap(monotone);
        let mut h = DecompositionHierarchy::new(grid.leaves());
        let (children, evals) = h.decompose(0, &mut grid, &f);
        // Four cells for the components, then the two recurrent cells again
        // for the reachability sweep.
        assert_eq!(evals, 6);
        // [0, .25] and [.25, .5] are separate recurrent cells; the first reaches
        // the second.
        assert_eq!(children.len(), 2);
        h.validate_invariants().unwrap();

        let first = children.iter().position(|&c| {
            h.node(c)
                .cells
                .iter()
                .any(|&cell| grid.geometry(cell).contains_point(&[0.0]))
        });
        let first = first.unwrap();
        let second = 1 - first;
        let vertex_of = HashMap::from([(children[first], 0), (children[second], 1)]);
        let edges = h.sibling_edges(&vertex_of);
        assert_eq!(edges.into_iter().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(h.len(), 3);
        assert_eq!(h.node(children[0]).depth, 1);
        assert_eq!(h.node(children[0]).cells.len(), 2);
    }

    #[test]
    fn decomposition_without_reach() {
        let grid = TreeGrid::uniform(Rect::new(vec![0.0], vec![1.0]).unwrap(), 3);
        let f = FnMap(monotone);
        let d = decompose_cells(&grid, &f, &grid.leaves(), false);
        assert!(d.reach.is_empty());
        assert_eq!(d.components.len(), 2);
        assert_eq!(d.evaluations, 8);
    }
}
