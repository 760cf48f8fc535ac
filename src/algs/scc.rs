//! Strongly connected components of a [`Digraph`] without recursion.
//!
//! Tarjan's algorithm driven by three explicit stacks: the traversal stack of
//! `(parent, vertex)` frames, the low-link stack and the component stack. A
//! frame is visited twice. The first visit numbers the vertex and pushes its
//! unexplored out-neighbours; the second visit (once every child frame above it
//! is gone) folds the children's low-links and closes a component if the vertex
//! is a root. Frames whose vertex was already numbered when they surface are
//! duplicates and are dropped.
//!
//! Only recurrent components are emitted: more than one vertex, or a single
//! vertex with a self-loop.

use crate::algs::digraph::Digraph;

const UNVISITED: usize = usize::MAX;

/// Components together with the order in which vertices finished.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrongComponents {
    /// Recurrent components, each a list of vertex indices.
    pub components: Vec<Vec<usize>>,
    /// Every vertex, in the order its traversal frame was retired. For an edge
    /// `u -> v` between different components, `v` comes before `u`.
    pub topological_sort: Vec<usize>,
}

/// Recurrent components of `g`.
pub fn strong_components<G: Digraph + ?Sized>(g: &G) -> Vec<Vec<usize>> {
    decompose(g, false).components
}

/// Recurrent components of `g` and a postorder of all its vertices, as needed by
/// [`crate::algs::reachability::compute_reachability`].
pub fn strong_components_with_order<G: Digraph + ?Sized>(g: &G) -> StrongComponents {
    decompose(g, true)
}

/// Drop every traversal frame except the topmost one per vertex. Lower frames
/// for the same vertex can only ever be duplicates.
fn compact(dfs: &mut Vec<(usize, usize)>, seen: &mut [bool]) {
    let mut kept = Vec::with_capacity(seen.len());
    for &frame in dfs.iter().rev() {
        if !seen[frame.1] {
            seen[frame.1] = true;
            kept.push(frame);
        }
    }
    for &(_, v) in &kept {
        seen[v] = false;
    }
    kept.reverse();
    *dfs = kept;
}

fn decompose<G: Digraph + ?Sized>(g: &G, want_order: bool) -> StrongComponents {
    let n = g.vertex_count();
    let mut index = vec![UNVISITED; n];
    let mut committed = vec![false; n];
    let mut compact_scratch = vec![false; n];

    let mut dfs: Vec<(usize, usize)> = Vec::new();
    // (vertex, low-link); a `UNVISITED` low-link marks a self-loop.
    let mut lowlink: Vec<(usize, usize)> = Vec::new();
    let mut pending: Vec<usize> = Vec::new();

    let mut out = StrongComponents::default();
    if want_order {
        out.topological_sort.reserve(n);
    }
    let mut next_index = 0usize;
    let mut edges_seen = 0usize;
    let mut compactions = 0usize;

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        dfs.push((UNVISITED, root));
        loop {
            if dfs.len() > 2 * n {
                compact(&mut dfs, &mut compact_scratch);
                compactions += 1;
            }
            let Some(&(parent, v)) = dfs.last() else {
                break;
            };

            if index[v] == UNVISITED {
                index[v] = next_index;
                let mut low = next_index;
                next_index += 1;
                pending.push(v);
                let neighbors = g.out_neighbors(v);
                edges_seen += neighbors.len();
                for w in neighbors {
                    if w == v {
                        lowlink.push((v, UNVISITED));
                    }
                    if index[w] == UNVISITED {
                        dfs.push((v, w));
                    } else if !committed[w] {
                        low = low.min(index[w]);
                    }
                }
                lowlink.push((v, low));
                continue;
            }

            if lowlink.last().is_none_or(|&(owner, _)| owner != v) {
                // Duplicate frame of a vertex that is already finished.
                dfs.pop();
                continue;
            }

            let mut low = index[v];
            let mut self_loop = false;
            while let Some(&(owner, l)) = lowlink.last() {
                if owner != v {
                    break;
                }
                lowlink.pop();
                if l == UNVISITED {
                    self_loop = true;
                } else {
                    low = low.min(l);
                }
            }

            if parent != UNVISITED {
                match lowlink.last_mut() {
                    Some(entry) if entry.0 == parent => entry.1 = entry.1.min(low),
                    _ => unreachable!("low-link stack lost the entry of vertex {parent}"),
                }
            }

            if low == index[v] {
                let mut component = Vec::new();
                while let Some(w) = pending.pop() {
                    committed[w] = true;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                if component.len() > 1 || self_loop {
                    out.components.push(component);
                }
            }

            if want_order {
                out.topological_sort.push(v);
            }
            dfs.pop();
        }
    }

    log::trace!(
        "scc: {} vertices, {} edges scanned, {} components, {} stack compactions",
        n,
        edges_seen,
        out.components.len(),
        compactions
    );
    out
}
