//! Graph-rewrite rules that replace one target node with a small subgraph.
//!
//! A template names its nodes. `In` and `Out` nodes stand for the target's
//! existing neighbours, matched in order against the target's incoming and
//! outgoing edges. `Internal` nodes are created fresh. The reserved
//! `<target>` record stands for the node being replaced: it can anchor
//! positions but never takes part in connections.

mod builder;

use std::f64::consts::TAU;

use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::crossing::has_crossing_edges;
use crate::geometry::XY;
use crate::graph::{Graph, NodeId};
use crate::random::unit_f64;

pub use builder::{NodePlacement, TemplateBuildError, TemplateBuilder};

/// Name of the record standing for the node being replaced.
pub const TARGET_NODE: &str = "<target>";

/// Positioning attempts per expansion before giving up on crossings.
const POSITION_ATTEMPTS: usize = 3;
/// Share of the vector to a towards/away-from reference applied to a new node.
const RELATIVE_STEP: f64 = 0.1;
/// Random offset for nudged nodes. Edge lengths and radii are on the order of 100.
const NUDGE_DISTANCE: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    In,
    Out,
    Internal,
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    on: usize,
    towards: Option<usize>,
    away_from: Option<usize>,
    nudge: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct NodeRecord {
    kind: NodeKind,
    name: String,
    codes: String,
    radius: f64,
    /// Present exactly for `Internal` records.
    placement: Option<Placement>,
}

#[derive(Clone, Debug, PartialEq)]
struct ConnectionRecord {
    from: usize,
    to: usize,
    min_length: f64,
    max_length: f64,
    half_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    name: String,
    codes: String,
    nodes: Vec<NodeRecord>,
    connections: Vec<ConnectionRecord>,
    num_in_nodes: usize,
    num_out_nodes: usize,
    num_internal_nodes: usize,
}

impl Template {
    pub fn connection_name(from: &str, to: &str) -> String {
        format!("{from}->{to}")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codes(&self) -> &str {
        &self.codes
    }

    pub fn num_in_nodes(&self) -> usize {
        self.num_in_nodes
    }

    pub fn num_out_nodes(&self) -> usize {
        self.num_out_nodes
    }

    pub fn num_internal_nodes(&self) -> usize {
        self.num_internal_nodes
    }

    pub fn num_connections(&self) -> usize {
        self.connections.len()
    }

    /// Net change in node count: every internal node is added, the target removed.
    pub fn nodes_added(&self) -> isize {
        self.num_internal_nodes as isize - 1
    }

    /// Replaces `target` with this template's subgraph.
    ///
    /// Returns `false` without touching the graph when the target's in/out
    /// degree does not match the template. Any other failure (unavoidable
    /// edge crossings, a template edge that would duplicate an existing one)
    /// returns `false` with the graph left part-way rewritten: callers must
    /// hold a restore point taken before the call and restore it on failure.
    /// The stepper executor does this for every frame.
    pub fn expand(&self, graph: &mut Graph, target: NodeId, rng: &mut ChaCha8Rng) -> bool {
        let in_edges = graph.in_edges(target);
        let out_edges = graph.out_edges(target);
        if in_edges.len() != self.num_in_nodes || out_edges.len() != self.num_out_nodes {
            return false;
        }

        let mut incoming = in_edges.iter();
        let mut outgoing = out_edges.iter();
        let mapping: Option<Vec<NodeId>> = self
            .nodes
            .iter()
            .map(|record| match record.kind {
                NodeKind::Target => Some(target),
                NodeKind::Internal => {
                    Some(graph.add_node(&record.name, &record.codes, &self.name, record.radius))
                }
                NodeKind::In => incoming.next().map(|edge| edge.start),
                NodeKind::Out => outgoing.next().map(|edge| edge.end),
            })
            .collect();
        // the arity check above means every In/Out record finds an edge
        let Some(mapping) = mapping else {
            return false;
        };

        for edge in in_edges.iter().chain(&out_edges) {
            graph.disconnect(edge.start, edge.end);
        }
        if !self.apply_connections(graph, &mapping) {
            return false;
        }

        for attempt in 0..POSITION_ATTEMPTS {
            self.position_internal_nodes(graph, &mapping, rng);
            if !has_crossing_edges(graph) {
                trace!(template = %self.name, attempt, "expansion positioned");
                // the target anchored positions until now; it has been fully replaced
                graph.remove_node(target);
                return true;
            }
            trace!(template = %self.name, attempt, "expansion produced crossing edges");
        }

        false
    }

    fn apply_connections(&self, graph: &mut Graph, mapping: &[NodeId]) -> bool {
        for connection in &self.connections {
            let from = mapping[connection.from];
            let to = mapping[connection.to];
            if graph.connects(from, to) {
                trace!(template = %self.name, "template edge duplicates an existing edge");
                return false;
            }
            graph.connect(
                from,
                to,
                connection.min_length,
                connection.max_length,
                connection.half_width,
            );
        }
        true
    }

    fn position_internal_nodes(&self, graph: &mut Graph, mapping: &[NodeId], rng: &mut ChaCha8Rng) {
        for (record, &node) in self.nodes.iter().zip(mapping) {
            let Some(placement) = record.placement else {
                continue;
            };

            let base = graph.pos(mapping[placement.on]);
            let mut pos = base;
            if let Some(towards) = placement.towards {
                pos = pos + (graph.pos(mapping[towards]) - base) * RELATIVE_STEP;
            }
            if let Some(away_from) = placement.away_from {
                pos = pos - (graph.pos(mapping[away_from]) - base) * RELATIVE_STEP;
            }
            if placement.nudge {
                let angle = unit_f64(rng) * TAU;
                pos = pos + XY::new(angle.sin(), angle.cos()) * NUDGE_DISTANCE;
            }

            graph.set_pos(node, pos);
        }
    }
}

#[cfg(test)]
mod tests;
