use std::rc::Rc;

use crate::factories::{GenerationPlan, StepperFactories};
use crate::graph::{DirectedEdge, Graph, NodeId};
use crate::stepper::{Status, StatusReport, StepContext, Stepper, unexpected_iterate};
use crate::template::Template;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    ExpandRelax,
    EdgeCorrection,
}

/// Applies one template, relaxes, then splits over-stretched edges one at a time.
pub struct TryTemplateExpandStepper {
    factories: Rc<StepperFactories>,
    node: NodeId,
    template: Rc<Template>,
    plan: Rc<GenerationPlan>,
    phase: Phase,
}

impl TryTemplateExpandStepper {
    pub fn new(
        factories: Rc<StepperFactories>,
        node: NodeId,
        template: Rc<Template>,
        plan: Rc<GenerationPlan>,
    ) -> Self {
        Self { factories, node, template, plan, phase: Phase::ExpandRelax }
    }

    fn expand(&mut self, ctx: &mut StepContext<'_>) -> StatusReport {
        if !self.template.expand(ctx.graph, self.node, ctx.rng) {
            return StatusReport::failure(format!(
                "template {} does not fit here",
                self.template.name()
            ));
        }

        self.phase = Phase::ExpandRelax;
        StatusReport::step_in(
            self.factories.make_relaxer(&self.plan.config.relax),
            format!("expanded {}, relaxing", self.template.name()),
        )
    }

    fn correct_edges(&mut self, ctx: &mut StepContext<'_>) -> StatusReport {
        self.phase = Phase::EdgeCorrection;
        match most_stressed_edge(ctx.graph, self.plan.config.stress_threshold) {
            Some(edge) => {
                let log = format!(
                    "splitting stressed edge {} -> {}",
                    node_name(ctx.graph, edge.start),
                    node_name(ctx.graph, edge.end)
                );
                StatusReport::step_in(self.factories.make_edge_adjuster(edge, &self.plan), log)
            }
            None => StatusReport::success(format!("{} applied", self.template.name())),
        }
    }
}

impl Stepper for TryTemplateExpandStepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport {
        match status {
            Status::StepIn => self.expand(ctx),
            // a relaxation and every edge adjustment both lead back to the stress check
            Status::StepOutSuccess => self.correct_edges(ctx),
            Status::StepOutFailure => {
                let stage = match self.phase {
                    Phase::ExpandRelax => "relaxation",
                    Phase::EdgeCorrection => "edge correction",
                };
                StatusReport::failure(format!("{} failed during {stage}", self.template.name()))
            }
            Status::Iterate => unexpected_iterate("TryTemplateExpandStepper"),
        }
    }
}

fn node_name(graph: &Graph, node: NodeId) -> &str {
    graph.node(node).map_or("?", |n| n.name.as_str())
}

/// The edge with the largest length-to-max-length ratio above `threshold`.
///
/// Ties go to the earliest edge in insertion order.
pub fn most_stressed_edge(graph: &Graph, threshold: f64) -> Option<DirectedEdge> {
    let mut worst = threshold;
    let mut found = None;
    for edge in graph.all_edges() {
        let stress = graph.edge_length(edge) / edge.max_length;
        if stress > worst {
            worst = stress;
            found = Some(*edge);
        }
    }
    found
}
