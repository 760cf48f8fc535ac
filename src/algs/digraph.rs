//! Directed-graph abstraction consumed by the decomposition algorithms.
//!
//! The algorithms only need the vertex count and out-neighbours of a vertex, so
//! an implicitly defined graph (see [`crate::algs::map_graph::MapGraph`]) never
//! has to materialise its edge set.

/// Read-only digraph over dense vertices `0..vertex_count()`.
///
/// `out_neighbors` must be deterministic and return indices in
/// `0..vertex_count()`; anything else is a bug in the implementation and the
/// algorithms panic on it.
pub trait Digraph {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Out-neighbours of `v`. May contain `v` itself (a self-loop).
    fn out_neighbors(&self, v: usize) -> Vec<usize>;
}

impl<G: Digraph + ?Sized> Digraph for &G {
    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }
    fn out_neighbors(&self, v: usize) -> Vec<usize> {
        (**self).out_neighbors(v)
    }
}

/// CSR-style digraph with an explicit edge set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    /// CSR offsets into `adjncy` for each vertex.
    pub xadj: Vec<usize>,
    /// CSR adjacency list.
    pub adjncy: Vec<usize>,
}

impl AdjacencyGraph {
    /// Build from an edge list over `n` vertices. Duplicate edges are kept once.
    ///
    /// # Panics
    /// If an edge endpoint is `>= n`.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut neigh: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(u, v) in edges {
            assert!(v < n, "edge ({u}, {v}) out of range for {n} vertices");
            neigh[u].push(v);
        }
        let mut xadj = Vec::with_capacity(n + 1);
        let mut adjncy = Vec::with_capacity(edges.len());
        xadj.push(0);
        for mut list in neigh {
            list.sort_unstable();
            list.dedup();
            adjncy.extend(list);
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }

    /// Materialise any [`Digraph`].
    pub fn from_digraph<G: Digraph + ?Sized>(g: &G) -> Self {
        let n = g.vertex_count();
        let mut xadj = Vec::with_capacity(n + 1);
        let mut adjncy = Vec::new();
        xadj.push(0);
        for v in 0..n {
            adjncy.extend(g.out_neighbors(v));
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }

    /// Return the neighbor index slice for vertex `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.adjncy.len()
    }

    /// All edges `(u, v)` in CSR order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.vertex_count()).flat_map(move |u| self.neighbors(u).iter().map(move |&v| (u, v)))
    }
}

impl Digraph for AdjacencyGraph {
    fn vertex_count(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    fn out_neighbors(&self, v: usize) -> Vec<usize> {
        self.neighbors(v).to_vec()
    }
}
