//! Component-to-component reachability by word-parallel sweeps.
//!
//! Components are processed in groups of 64. Within a group every vertex of the
//! `k`-th component starts with bit `k` set; sweeping the vertices against the
//! postorder (sources first) ORs each vertex's code into its out-neighbours and
//! into an accumulator per target component. The accumulator of `T` ends up
//! holding one bit for every source of the group that reaches `T`.
//!
//! A vertex of a recurrent component may be entered at any of its vertices, so
//! before propagating it also absorbs its component's accumulator. Every edge
//! entering a component from outside is swept before the first of the
//! component's own vertices, which makes this sufficient for transitivity.

use crate::algs::digraph::Digraph;

const WORD: usize = u64::BITS as usize;

/// For every component, the ascending list of components it reaches.
///
/// `topological_sort` must contain every vertex of `g` in the order produced by
/// [`crate::algs::scc::strong_components_with_order`]. A component appears in
/// its own list: recurrent components always reach themselves.
///
/// # Panics
/// If `g` yields an out-neighbour outside `0..g.vertex_count()`.
pub fn compute_reachability<G: Digraph + ?Sized>(
    components: &[Vec<usize>],
    g: &G,
    topological_sort: &[usize],
) -> Vec<Vec<usize>> {
    let m = components.len();
    let mut output = vec![Vec::new(); m];
    if m == 0 {
        return output;
    }
    let n = g.vertex_count();
    debug_assert_eq!(topological_sort.len(), n, "postorder must cover every vertex");

    // Component of each vertex; `m` for trivial vertices.
    let mut paint = vec![m; n];
    for (c, comp) in components.iter().enumerate() {
        for &v in comp {
            paint[v] = c;
        }
    }

    let mut code = vec![0u64; n];
    // One extra slot collects bits flowing into trivial vertices.
    let mut condensed = vec![0u64; m + 1];
    let mut propagations = 0usize;

    for group_start in (0..m).step_by(WORD) {
        let group_size = WORD.min(m - group_start);
        code.fill(0);
        condensed.fill(0);
        for (k, comp) in components[group_start..group_start + group_size].iter().enumerate() {
            for &v in comp {
                code[v] = 1 << k;
            }
        }

        for &v in topological_sort.iter().rev() {
            let c = paint[v];
            if c < m {
                code[v] |= condensed[c];
            }
            let bits = code[v];
            if bits == 0 {
                continue;
            }
            for w in g.out_neighbors(v) {
                code[w] |= bits;
                condensed[paint[w]] |= bits;
            }
            propagations += 1;
        }

        for (target, &word) in condensed[..m].iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                let k = bits.trailing_zeros() as usize;
                output[group_start + k].push(target);
                bits &= bits - 1;
            }
        }
    }

    log::trace!(
        "reachability: {} components in {} groups, {} vertex propagations",
        m,
        m.div_ceil(WORD),
        propagations
    );
    output
}
