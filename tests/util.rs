#![allow(dead_code)]
use std::collections::VecDeque;

use conley_morse::algs::AdjacencyGraph;
use conley_morse::geometry::Rect;
use conley_morse::grid::{GridCell, SpatialGrid, TreeGrid};
use conley_morse::morse_graph::MorseGraph;

/// Explicit digraph on `n` vertices.
pub fn graph(n: usize, edges: &[(usize, usize)]) -> AdjacencyGraph {
    AdjacencyGraph::from_edges(n, edges)
}

/// Components with their vertices sorted, in sorted order; order-agnostic comparison.
pub fn normalized(components: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut out: Vec<Vec<usize>> = components
        .iter()
        .map(|c| {
            let mut c = c.clone();
            c.sort_unstable();
            c
        })
        .collect();
    out.sort();
    out
}

/// Index of the component holding `v`.
pub fn component_of(components: &[Vec<usize>], v: usize) -> Option<usize> {
    components.iter().position(|c| c.contains(&v))
}

/// Brute-force `reach[u][w]` for paths of length >= 1.
pub fn reach_matrix(g: &AdjacencyGraph) -> Vec<Vec<bool>> {
    let n = g.xadj.len() - 1;
    let mut reach = vec![vec![false; n]; n];
    for (u, row) in reach.iter_mut().enumerate() {
        let mut queue = VecDeque::from([u]);
        while let Some(x) = queue.pop_front() {
            for &w in g.neighbors(x) {
                if !row[w] {
                    row[w] = true;
                    queue.push_back(w);
                }
            }
        }
    }
    reach
}

pub fn interval(a: f64, b: f64) -> Rect {
    Rect::new(vec![a], vec![b]).unwrap()
}

/// One-dimensional affine map `x -> k x + c`, exact on boxes.
pub fn affine(k: f64, c: f64) -> impl Fn(&Rect) -> Rect {
    move |r: &Rect| {
        let (a, b) = (k * r.lower[0] + c, k * r.upper[0] + c);
        Rect {
            lower: vec![a.min(b)],
            upper: vec![a.max(b)],
        }
    }
}

/// Monotone map on `[0, 1]` with a repelling fixed point at 0 and an
/// attracting one at 0.4.
pub fn repeller_attractor(r: &Rect) -> Rect {
    let f = |x: f64| (3.0 * x).min(0.4 + 0.1 * (x - 0.4));
    Rect {
        lower: vec![f(r.lower[0])],
        upper: vec![f(r.upper[0])],
    }
}

/// Vertex whose Morse set contains the point `p`.
pub fn vertex_containing<I>(grid: &TreeGrid, mg: &MorseGraph<I>, p: &[f64]) -> Option<usize> {
    mg.vertices().find(|&v| {
        mg.cell_set(v)
            .iter()
            .any(|&c: &GridCell| grid.geometry(c).contains_point(p))
    })
}
