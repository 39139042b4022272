use gridalign::{edges_to_element_pairs, Edge};

/// Render an alignment as two gap-padded lines, `'-'` on the gap side of each pair.
pub fn render(path: &[Edge], v: &str, w: &str) -> (String, String) {
    let mut top = String::new();
    let mut bottom = String::new();
    for (a, b) in edges_to_element_pairs(path, v, w) {
        top.push(a.map_or('-', |&b| b as char));
        bottom.push(b.map_or('-', |&b| b as char));
    }
    (top, bottom)
}

/// Sum a path's edge weights through a callback; used to cross-check reported totals.
pub fn resum<K, F>(path: &[Edge], mut weight: F) -> K
where
    K: gridalign::Measure,
    F: FnMut(&Edge) -> K,
{
    let mut total = K::zero();
    for edge in path {
        total = total.accumulate(weight(edge));
    }
    total
}
