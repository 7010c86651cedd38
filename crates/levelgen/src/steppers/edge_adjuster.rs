use std::rc::Rc;

use crate::factories::{GenerationPlan, StepperFactories};
use crate::graph::DirectedEdge;
use crate::stepper::{Status, StatusReport, StepContext, Stepper, unexpected_iterate};

/// Source tag of nodes created by edge splits.
pub const EDGE_EXTEND_TAG: &str = "EdgeExtend";

/// Splits an over-long edge at its midpoint, then relaxes.
///
/// Both halves keep the original maximum length and width and take half the
/// minimum, so together they can never be shorter than the original edge allowed.
pub struct EdgeAdjusterStepper {
    factories: Rc<StepperFactories>,
    edge: DirectedEdge,
    plan: Rc<GenerationPlan>,
}

impl EdgeAdjusterStepper {
    pub fn new(
        factories: Rc<StepperFactories>,
        edge: DirectedEdge,
        plan: Rc<GenerationPlan>,
    ) -> Self {
        Self { factories, edge, plan }
    }

    fn split(&self, ctx: &mut StepContext<'_>) -> StatusReport {
        let DirectedEdge { start, end, min_length, max_length, half_width, colour } = self.edge;
        let graph = &mut *ctx.graph;

        let middle = graph.add_node("c", "", EDGE_EXTEND_TAG, half_width);
        graph.set_pos(middle, (graph.pos(start) + graph.pos(end)) / 2.0);
        graph.disconnect(start, end);
        graph.connect(start, middle, min_length / 2.0, max_length, half_width);
        graph.connect(middle, end, min_length / 2.0, max_length, half_width);
        graph.set_edge_colour(start, middle, colour);
        graph.set_edge_colour(middle, end, colour);

        StatusReport::step_in(
            self.factories.make_relaxer(&self.plan.config.edge_relax),
            "edge split, relaxing",
        )
    }
}

impl Stepper for EdgeAdjusterStepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport {
        match status {
            Status::StepIn => self.split(ctx),
            Status::StepOutSuccess => StatusReport::success("edge adjusted"),
            Status::StepOutFailure => StatusReport::failure("relaxation after edge split failed"),
            Status::Iterate => unexpected_iterate("EdgeAdjusterStepper"),
        }
    }
}
