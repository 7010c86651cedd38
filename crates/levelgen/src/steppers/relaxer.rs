//! Force-directed relaxation, one pass per step.
//!
//! Three kinds of force act on node positions:
//! - edge springs pull or push each edge back into `[min_length, max_length]`;
//! - node discs push apart until their radii no longer overlap;
//! - a node pushes away from any edge it does not touch, by the edge's
//!   half-width plus its own radius, with the reaction shared by the edge ends.
//!
//! Every force is zero once its constraint holds, so a layout that satisfies
//! all constraints is a fixed point.

use slotmap::SecondaryMap;

use crate::config::RelaxConfig;
use crate::crossing::has_crossing_edges;
use crate::geometry::{XY, closest_point_on_segment};
use crate::graph::{Graph, NodeId};
use crate::stepper::{Status, StatusReport, StepContext, Stepper, unexpected_step_out};

/// Share of the summed force applied as movement in one pass.
const DAMPING: f64 = 0.5;
/// Separation direction used when two points coincide.
const FALLBACK_DIRECTION: XY = XY::new(1.0, 0.0);

/// Largest force and largest movement seen in one relaxation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RelaxPass {
    pub max_force: f64,
    pub max_move: f64,
}

pub struct RelaxerStepper {
    config: RelaxConfig,
    iterations: u32,
}

impl RelaxerStepper {
    pub fn new(config: RelaxConfig) -> Self {
        Self { config, iterations: 0 }
    }

    fn relax_once(&mut self, graph: &mut Graph) -> StatusReport {
        if self.iterations >= self.config.max_iterations {
            return StatusReport::failure(format!(
                "no convergence after {} iterations",
                self.iterations
            ));
        }
        self.iterations += 1;

        let pass = relax_pass(graph, &self.config);
        if pass.max_force >= self.config.force_target || pass.max_move >= self.config.move_target {
            return StatusReport::iterate(format!(
                "iteration {}: force {:.4}, move {:.4}",
                self.iterations, pass.max_force, pass.max_move
            ));
        }

        if has_crossing_edges(graph) {
            let iterations = self.iterations;
            StatusReport::failure(format!("converged with crossing edges after {iterations}"))
        } else {
            StatusReport::success(format!("converged after {} iterations", self.iterations))
        }
    }
}

impl Stepper for RelaxerStepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport {
        match status {
            Status::StepIn | Status::Iterate => self.relax_once(ctx.graph),
            Status::StepOutSuccess | Status::StepOutFailure => {
                unexpected_step_out("RelaxerStepper", status)
            }
        }
    }
}

/// Accumulates every force, then moves each node by its damped force,
/// capped at `config.max_move`.
pub fn relax_pass(graph: &mut Graph, config: &RelaxConfig) -> RelaxPass {
    let nodes = graph.all_nodes().to_vec();
    let mut forces: SecondaryMap<NodeId, XY> =
        nodes.iter().map(|&node| (node, XY::ZERO)).collect();

    add_edge_springs(graph, &mut forces);
    add_node_separation(graph, &nodes, &mut forces);
    add_edge_clearance(graph, &nodes, &mut forces);

    let mut pass = RelaxPass::default();
    for &node in &nodes {
        let force = forces[node];
        pass.max_force = pass.max_force.max(force.length());

        let mut movement = force * DAMPING;
        let distance = movement.length();
        if distance > config.max_move {
            movement = movement * (config.max_move / distance);
        }
        pass.max_move = pass.max_move.max(movement.length());

        let pos = graph.pos(node);
        graph.set_pos(node, pos + movement);
    }
    pass
}

fn add_edge_springs(graph: &Graph, forces: &mut SecondaryMap<NodeId, XY>) {
    for edge in graph.all_edges() {
        let offset = graph.pos(edge.end) - graph.pos(edge.start);
        let length = offset.length();
        let stretch = if length > edge.max_length {
            length - edge.max_length
        } else if length < edge.min_length {
            length - edge.min_length
        } else {
            continue;
        };
        let direction = offset.normalized().unwrap_or(FALLBACK_DIRECTION);

        // positive stretch pulls the ends together, negative pushes them apart
        let pull = direction * (stretch / 2.0);
        forces[edge.start] = forces[edge.start] + pull;
        forces[edge.end] = forces[edge.end] - pull;
    }
}

fn add_node_separation(graph: &Graph, nodes: &[NodeId], forces: &mut SecondaryMap<NodeId, XY>) {
    for (i, &first) in nodes.iter().enumerate() {
        for &second in &nodes[i + 1..] {
            let required = radius(graph, first) + radius(graph, second);
            let offset = graph.pos(second) - graph.pos(first);
            let distance = offset.length();
            if distance >= required {
                continue;
            }
            let direction = offset.normalized().unwrap_or(FALLBACK_DIRECTION);
            let push = direction * ((required - distance) / 2.0);
            forces[first] = forces[first] - push;
            forces[second] = forces[second] + push;
        }
    }
}

fn add_edge_clearance(graph: &Graph, nodes: &[NodeId], forces: &mut SecondaryMap<NodeId, XY>) {
    for edge in graph.all_edges() {
        let start = graph.pos(edge.start);
        let end = graph.pos(edge.end);
        for &node in nodes {
            if edge.connects(node) {
                continue;
            }
            let pos = graph.pos(node);
            let required = edge.half_width + radius(graph, node);
            let (closest, t) = closest_point_on_segment(pos, start, end);
            let offset = pos - closest;
            let distance = offset.length();
            if distance >= required {
                continue;
            }
            let direction = offset
                .normalized()
                .or_else(|| (end - start).rot90().normalized())
                .unwrap_or(FALLBACK_DIRECTION);
            let push = direction * ((required - distance) / 2.0);
            forces[node] = forces[node] + push;
            forces[edge.start] = forces[edge.start] - push * (1.0 - t);
            forces[edge.end] = forces[edge.end] - push * t;
        }
    }
}

fn radius(graph: &Graph, node: NodeId) -> f64 {
    graph.node(node).map_or(0.0, |n| n.radius)
}
