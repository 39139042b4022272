//! The subdivider against the dense engine, and the walker invariants both rely on.

use gridalign::backtrack::{
    backtrack_segmentation_points, find_max_path, subdivide, BidiWalker, PathPart,
};
use gridalign::graph::{
    AlignmentGraph, ExtendedGapGraph, FittingGraph, GlobalGraph, LocalGraph, OverlapGraph,
};
use gridalign::{Edge, Measure, SimpleScorer};
use itertools::Itertools;

/// Check a recovered path end to end: every edge exists, consecutive edges connect, the
/// endpoints anchor at root and leaf, and the edge weights re-sum to `expected`.
fn assert_valid_path<G: AlignmentGraph>(graph: G, path: &[Edge], expected: G::K) {
    assert!(!path.is_empty());
    assert_eq!(path[0].source, graph.root_node());
    assert_eq!(path[path.len() - 1].destination, graph.leaf_node());
    let mut total = G::K::zero();
    for edge in path {
        assert!(graph.has_edge(edge), "bogus edge {edge}");
        total = total.accumulate(graph.edge_weight(edge));
    }
    for pair in path.windows(2) {
        assert_eq!(pair[0].destination, pair[1].source);
    }
    assert!(total == expected, "path re-sums to {total:?}, expected {expected:?}");
}

fn sliced_path<G>(graph: G) -> (Vec<Edge>, G::K)
where
    G: AlignmentGraph + Send,
    G::K: Send,
{
    let (path, weight) = subdivide(graph);
    (path.walk_forward().collect_vec(), weight)
}

#[test]
fn global_sliced_equals_dense() {
    let cases = [
        ("abcdefg", "abcZefg"),
        ("hello", "mellow"),
        ("a", "a"),
        ("a", "b"),
        ("", "abc"),
        ("abc", ""),
        ("mississippi", "misisipi"),
    ];
    for (v, w) in cases {
        let g = GlobalGraph::<_, _, _, _, f64>::new(
            v,
            w,
            SimpleScorer::substitution(1.0, -1.0),
            SimpleScorer::gap(-1.0),
        );
        let (dense_path, dense) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
        let (path, sliced) = sliced_path(&g);
        assert_eq!(dense, sliced, "{v} / {w}");
        if !dense_path.is_empty() {
            assert_valid_path(&g, &path, dense);
        }
    }
}

#[test]
fn free_riding_flavors_sliced_equal_dense() {
    let v = "gcatgcgcttaa";
    let w = "ttgcatcgaa";
    let sub = SimpleScorer::<f64>::substitution(1.0, -1.0);
    let gap = SimpleScorer::gap(-1.0);
    let free = SimpleScorer::freeride(0.0);

    let g = LocalGraph::new(v, w, sub, gap, free);
    let (_, dense) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
    let (path, sliced) = sliced_path(&g);
    assert_eq!(dense, sliced);
    assert_valid_path(&g, &path, dense);

    let g = FittingGraph::new(v, w, sub, gap, free);
    let (_, dense) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
    let (path, sliced) = sliced_path(&g);
    assert_eq!(dense, sliced);
    assert_valid_path(&g, &path, dense);

    let g = OverlapGraph::new(v, w, sub, gap, free);
    let (_, dense) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
    let (path, sliced) = sliced_path(&g);
    assert_eq!(dense, sliced);
    assert_valid_path(&g, &path, dense);
}

#[test]
fn extended_gap_sliced_equals_dense() {
    let g = ExtendedGapGraph::<_, _, _, _, _, f64>::new(
        "acgtacgtac",
        "acgacgtc",
        SimpleScorer::substitution(1.0, -1.0),
        SimpleScorer::gap(-3.0),
        SimpleScorer::gap(-1.0),
    );
    let (_, dense) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
    let (path, sliced) = sliced_path(&g);
    assert_eq!(dense, sliced);
    assert_valid_path(&g, &path, dense);
}

#[test]
fn bidi_row_sums_never_exceed_the_total() {
    let g = LocalGraph::<_, _, _, _, _, f64>::new(
        "gcatgcgcttaa",
        "ttgcatcgaa",
        SimpleScorer::substitution(1.0, -1.0),
        SimpleScorer::gap(-1.0),
        SimpleScorer::freeride(0.0),
    );
    let (_, total) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
    for mid in 0..(&g).grid_down_cnt() {
        let bidi = BidiWalker::new_converged(&g, mid);
        for node in (&g).row_nodes(mid) {
            let slots = bidi.find(node);
            let sum = slots.forward.weight.accumulate(slots.backward.weight);
            assert!(sum <= total, "row {mid} node {node} exceeds the optimum");
        }
        assert_eq!(bidi.find((&g).root_node()).forward.weight, 0.0);
    }
}

#[test]
fn free_ride_total_dominates_any_fixed_window_alignment() {
    // invariant: the local optimum is at least the weight of any diagonal-only stretch
    let v = "xxxabcyyy";
    let w = "zabczz";
    let g = LocalGraph::<_, _, _, _, _, f64>::new(
        v,
        w,
        SimpleScorer::substitution(1.0, -1.0),
        SimpleScorer::gap(-1.0),
        SimpleScorer::freeride(0.0),
    );
    let (_, total) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
    for start_v in 0..v.len() {
        for start_w in 0..w.len() {
            let len = (v.len() - start_v).min(w.len() - start_w);
            let mut diagonal = 0.0;
            for i in 0..len {
                diagonal += if v.as_bytes()[start_v + i] == w.as_bytes()[start_w + i] {
                    1.0
                } else {
                    -1.0
                };
                assert!(total >= diagonal);
            }
        }
    }
    assert_eq!(total, 3.0);
}

#[test]
fn large_random_grids_agree_across_backends() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..4 {
        let v: Vec<u8> = (0..rng.gen_range(40..70))
            .map(|_| b'a' + rng.gen_range(0..4))
            .collect();
        let w: Vec<u8> = (0..rng.gen_range(40..70))
            .map(|_| b'a' + rng.gen_range(0..4))
            .collect();
        let g = LocalGraph::<_, _, _, _, _, i64>::new(
            &v,
            &w,
            SimpleScorer::substitution(2, -3),
            SimpleScorer::gap(-1),
            SimpleScorer::freeride(0),
        );
        let (_, dense) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
        let (container, sliced) = subdivide(&g);
        assert_eq!(dense, sliced);
        let path = container.walk_forward().collect_vec();
        assert_valid_path(&g, &path, dense);
    }
}

#[test]
fn segmenter_parts_chain_into_the_reported_path() {
    let g = OverlapGraph::<_, _, _, _, _, f64>::new(
        "aaaaalmn",
        "lmnzzzzz",
        SimpleScorer::substitution(1.0, -1.0),
        SimpleScorer::gap(-1.0),
        SimpleScorer::freeride(0.0),
    );
    let (parts, total) = backtrack_segmentation_points(&g, 1e-9);
    assert_eq!(total, 3.0);
    // parts chain: each hop/segment starts where the previous one ended
    let mut cursor = (&g).root_node();
    for part in &parts {
        match *part {
            PathPart::Hop(edge) => {
                assert_eq!(edge.source, cursor);
                cursor = edge.destination;
            }
            PathPart::Segment { from, to } => {
                assert_eq!(from, cursor);
                cursor = to;
            }
        }
    }
    assert_eq!(cursor, (&g).leaf_node());
}
