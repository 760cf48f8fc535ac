//! Adaptive refinement controller.
//!
//! Drives the digraph view, the component decomposer and the reachability
//! resolver through repeated bisection of the grid:
//!
//! 1. The whole grid is the single initial candidate.
//! 2. `min_depth` floor rounds decompose every candidate in its own view and
//!    bisect the components unconditionally. Non-recurrent cells are left behind
//!    at the resolution where they dropped out.
//! 3. Every post-loop candidate below the complexity limit is probed: it is
//!    refined in isolation up to `max_depth`. A candidate that stops producing
//!    components is spurious and dropped. One that persists, or whose
//!    components outgrow the limit, is kept. The grid is coarsened back to the
//!    candidate's cells afterwards.
//! 4. Retained candidates become the Morse graph vertices. Edges combine the
//!    sibling reachability recorded in step 2 with a final reachability pass
//!    over the retained cells.

mod hierarchy;

use std::collections::{BTreeSet, HashMap};

use hierarchy::{DecompositionHierarchy, decompose_cells};

use crate::algs::map_graph::MapGraph;
use crate::algs::morse_sets::compute_morse_sets;
use crate::config::RefinementLimits;
use crate::conley::{InvariantComputer, NoInvariant};
use crate::debug_invariants::DebugInvariants;
use crate::grid::{GridCell, SpatialGrid};
use crate::maps::PhaseMap;
use crate::morse_error::MorseError;
use crate::morse_graph::MorseGraph;

/// Counters describing one controller run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefinementSummary {
    /// Candidates left after the floor rounds.
    pub floor_candidates: usize,
    /// Candidates refined further to test for spuriousness.
    pub probed: usize,
    /// Probed candidates that dissolved.
    pub spurious: usize,
    /// Candidates kept because of the complexity limit.
    pub frozen: usize,
    /// Map images computed over the whole run.
    pub evaluations: u64,
}

/// Morse graph plus the run summary.
#[derive(Clone, Debug)]
pub struct Refinement<I> {
    pub graph: MorseGraph<I>,
    pub summary: RefinementSummary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Probe {
    Dissolved,
    Persisted,
    Frozen,
}

/// Compute the Morse graph of `map` on `grid` without invariants.
pub fn compute_morse_graph<G, M>(
    grid: &mut G,
    map: &M,
    limits: &RefinementLimits,
) -> Result<MorseGraph, MorseError>
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
{
    Ok(refine(grid, map, limits, &NoInvariant)?.graph)
}

/// Run the controller. Invariants are attached with `conley` when
/// `limits.compute_invariants` is set.
pub fn refine<G, M, C>(
    grid: &mut G,
    map: &M,
    limits: &RefinementLimits,
    conley: &C,
) -> Result<Refinement<C::Invariant>, MorseError>
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
    C: InvariantComputer,
{
    limits.validate()?;
    let mut summary = RefinementSummary::default();

    let mut hierarchy = DecompositionHierarchy::new(grid.leaves());
    let mut active = vec![0usize];
    for depth in 0..limits.min_depth {
        let mut next = Vec::new();
        for &node in &active {
            let (children, evaluations) = hierarchy.decompose(node, grid, map);
            summary.evaluations += evaluations;
            next.extend(children);
        }
        active = next;
        log::debug!(
            "floor round {}: {} candidates, {} candidate cells, {} grid leaves",
            depth,
            active.len(),
            active
                .iter()
                .map(|&n| hierarchy.node(n).cells.len())
                .sum::<usize>(),
            grid.size()
        );
        if active.is_empty() {
            break;
        }
    }
    hierarchy.debug_assert_invariants();
    log::trace!("decomposition hierarchy holds {} nodes", hierarchy.len());
    summary.floor_candidates = active.len();

    let mut retained = Vec::with_capacity(active.len());
    for &node in &active {
        let cells = hierarchy.node(node).cells.clone();
        if cells.len() >= limits.complexity_limit {
            log::warn!(
                "candidate with {} cells is at the complexity limit {}; kept unprobed",
                cells.len(),
                limits.complexity_limit
            );
            summary.frozen += 1;
            retained.push(node);
            continue;
        }
        summary.probed += 1;
        let outcome = probe(grid, map, &cells, limits, &mut summary.evaluations);
        grid.coarsen(&cells);
        match outcome {
            Probe::Dissolved => {
                log::debug!("candidate with {} cells is spurious", cells.len());
                summary.spurious += 1;
            }
            Probe::Frozen => {
                log::warn!(
                    "candidate with {} cells outgrew the complexity limit while probing; kept",
                    cells.len()
                );
                summary.frozen += 1;
                retained.push(node);
            }
            Probe::Persisted => retained.push(node),
        }
    }

    let mut graph = MorseGraph::new();
    let mut vertex_of = HashMap::with_capacity(retained.len());
    for &node in &retained {
        let v = graph.add_vertex();
        let mut cells = hierarchy.node(node).cells.clone();
        cells.sort_unstable();
        *graph.cell_set_mut(v) = cells;
        vertex_of.insert(node, v);
    }
    for (u, w) in hierarchy.sibling_edges(&vertex_of) {
        graph.add_edge(u, w)?;
    }
    let (final_edges, evaluations) = final_pass_edges(&*grid, map, &graph);
    summary.evaluations += evaluations;
    for (u, w) in final_edges {
        graph.add_edge(u, w)?;
    }

    if limits.compute_invariants {
        for v in graph.vertices() {
            match conley.compute(&*grid, graph.cell_set(v), map) {
                Ok(invariant) => graph.set_invariant(v, invariant)?,
                Err(e) => log::warn!("invariant of Morse set {v} not attached: {e}"),
            }
        }
    }

    graph.debug_assert_invariants();
    log::info!(
        "Morse graph: {} vertices, {} edges ({} floor candidates, {} spurious, {} frozen, {} map evaluations)",
        graph.num_vertices(),
        graph.num_edges(),
        summary.floor_candidates,
        summary.spurious,
        summary.frozen,
        summary.evaluations
    );
    Ok(Refinement { graph, summary })
}

/// Refine `cells` in isolation from `min_depth` towards `max_depth`.
fn probe<G, M>(
    grid: &mut G,
    map: &M,
    cells: &[GridCell],
    limits: &RefinementLimits,
    evaluations: &mut u64,
) -> Probe
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
{
    let factor = grid.refinement_factor();
    let mut worklist = vec![cells.to_vec()];
    for depth in limits.min_depth..limits.max_depth {
        let mut next = Vec::new();
        for set in &worklist {
            let found = decompose_cells(&*grid, map, set, false);
            *evaluations += found.evaluations;
            for component in found.components {
                if component.len().saturating_mul(factor) > limits.complexity_limit {
                    return Probe::Frozen;
                }
                next.push(grid.subdivide(&component));
            }
        }
        log::trace!("probe depth {}: {} sub-candidates", depth, next.len());
        if next.is_empty() {
            return Probe::Dissolved;
        }
        worklist = next;
    }
    Probe::Persisted
}

/// Reachability between retained Morse sets through their own cells.
fn final_pass_edges<G, M, I>(
    grid: &G,
    map: &M,
    graph: &MorseGraph<I>,
) -> (BTreeSet<(usize, usize)>, u64)
where
    G: SpatialGrid + ?Sized,
    M: PhaseMap + ?Sized,
{
    let view = MapGraph::with_cells(
        grid,
        map,
        graph.vertices().flat_map(|v| graph.cell_set(v).iter().copied()),
    );
    let mut owner = vec![usize::MAX; view.grid().handle_bound()];
    for v in graph.vertices() {
        for &cell in graph.cell_set(v) {
            owner[cell] = v;
        }
    }
    let sets = compute_morse_sets(&view);
    let owners: Vec<BTreeSet<usize>> = sets
        .components
        .iter()
        .map(|comp| comp.iter().map(|&x| owner[view.lookup(x)]).collect())
        .collect();

    let mut edges = BTreeSet::new();
    for (s, targets) in sets.reach.iter().enumerate() {
        for &t in targets {
            for &a in &owners[s] {
                for &b in owners[t].iter().filter(|&&b| b != a) {
                    edges.insert((a, b));
                }
            }
        }
    }
    (edges, view.stats().evaluations())
}
