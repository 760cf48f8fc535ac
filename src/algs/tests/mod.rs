use super::*;

#[test]
fn reexports_compose() {
    let g = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 0), (1, 2)]);
    let sets = compute_morse_sets(&g);
    assert_eq!(sets.components.len(), 1);
    assert_eq!(sets.reach, vec![vec![0]]);
    assert_eq!(strong_components(&g).len(), 1);
}
