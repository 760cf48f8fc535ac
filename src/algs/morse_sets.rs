//! Components plus reachability in one call, and the single-resolution Morse
//! graph built from them.

use crate::algs::digraph::Digraph;
use crate::algs::map_graph::MapGraph;
use crate::algs::reachability::compute_reachability;
use crate::algs::scc::strong_components_with_order;
use crate::grid::{GridCell, SpatialGrid};
use crate::maps::PhaseMap;
use crate::morse_graph::MorseGraph;

/// Recurrent components of a digraph and the reachability between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MorseSets {
    /// Vertex indices of each component.
    pub components: Vec<Vec<usize>>,
    /// `reach[s]` lists the components `s` reaches, itself included.
    pub reach: Vec<Vec<usize>>,
}

impl MorseSets {
    /// Reachability pairs between distinct components.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.reach
            .iter()
            .enumerate()
            .flat_map(|(s, ts)| ts.iter().filter(move |&&t| t != s).map(move |&t| (s, t)))
    }
}

/// Decompose `g` and resolve reachability between its components.
pub fn compute_morse_sets<G: Digraph + ?Sized>(g: &G) -> MorseSets {
    let scc = strong_components_with_order(g);
    let reach = compute_reachability(&scc.components, g, &scc.topological_sort);
    MorseSets {
        components: scc.components,
        reach,
    }
}

/// Morse graph of the view at its current resolution, with cell sets given as
/// grid handles.
pub fn morse_graph_from_view<G, M, I>(view: &MapGraph<'_, G, M>) -> MorseGraph<I>
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
{
    let sets = compute_morse_sets(view);
    let mut mg = MorseGraph::new();
    for comp in &sets.components {
        let v = mg.add_vertex();
        let mut cells: Vec<GridCell> = view.cells(comp);
        cells.sort_unstable();
        *mg.cell_set_mut(v) = cells;
    }
    for (s, t) in sets.edges() {
        // Both ends are vertices just added.
        let _ = mg.add_edge(s, t);
    }
    mg
}
