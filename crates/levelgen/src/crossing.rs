//! Edge-crossing detection over the whole graph.
//!
//! Quadratic in the edge count. Graphs stay at tens of nodes, and nothing
//! bounds that size; this is a scaling assumption, not an enforced limit.

use crate::geometry::segment_intersection;
use crate::graph::{DirectedEdge, EdgePair, Graph};

/// Every pair of edges that do not share an endpoint and whose segments meet.
pub fn find_crossing_edges(graph: &Graph) -> Vec<EdgePair> {
    let mut crossings = Vec::new();
    for_each_crossing(graph, |pair| {
        crossings.push(pair);
        true
    });
    crossings
}

pub fn has_crossing_edges(graph: &Graph) -> bool {
    let mut found = false;
    for_each_crossing(graph, |_| {
        found = true;
        false
    });
    found
}

/// Visits crossings in edge order until `visit` returns `false`.
fn for_each_crossing(graph: &Graph, mut visit: impl FnMut(EdgePair) -> bool) {
    let edges = graph.all_edges();
    for (i, first) in edges.iter().enumerate() {
        for second in &edges[i + 1..] {
            if first.shares_endpoint_with(second) {
                continue;
            }
            if let Some(pair) = intersect(graph, first, second)
                && !visit(pair)
            {
                return;
            }
        }
    }
}

fn intersect(graph: &Graph, first: &DirectedEdge, second: &DirectedEdge) -> Option<EdgePair> {
    let (t1, t2) = segment_intersection(
        graph.pos(first.start),
        graph.pos(first.end),
        graph.pos(second.start),
        graph.pos(second.end),
    )?;
    Some(EdgePair::with_intersection(*first, *second, t1, t2))
}
