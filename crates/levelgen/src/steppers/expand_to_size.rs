use std::rc::Rc;

use crate::factories::{GenerationPlan, StepperFactories};
use crate::stepper::{Status, StatusReport, StepContext, Stepper, unexpected_iterate};

/// Runs expansion passes until the graph reaches a node count.
///
/// A pass that succeeds without adding nodes fails the stepper; otherwise a
/// library of zero-growth templates would never terminate.
pub struct ExpandToSizeStepper {
    factories: Rc<StepperFactories>,
    target_node_count: usize,
    plan: Rc<GenerationPlan>,
    nodes_before_pass: usize,
    passes: usize,
}

impl ExpandToSizeStepper {
    pub fn new(
        factories: Rc<StepperFactories>,
        target_node_count: usize,
        plan: Rc<GenerationPlan>,
    ) -> Self {
        Self { factories, target_node_count, plan, nodes_before_pass: 0, passes: 0 }
    }

    fn start_pass(&mut self, nodes: usize) -> StatusReport {
        self.nodes_before_pass = nodes;
        self.passes += 1;
        StatusReport::step_in(
            self.factories.make_all_nodes(&self.plan),
            format!("pass {} at {nodes}/{} nodes", self.passes, self.target_node_count),
        )
    }
}

impl Stepper for ExpandToSizeStepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport {
        let nodes = ctx.graph.num_nodes();
        match status {
            Status::StepIn | Status::StepOutSuccess if nodes >= self.target_node_count => {
                StatusReport::success(format!("reached {nodes} nodes in {} pass(es)", self.passes))
            }
            Status::StepIn => self.start_pass(nodes),
            Status::StepOutSuccess if nodes <= self.nodes_before_pass => {
                StatusReport::failure(format!("pass {} did not grow the graph", self.passes))
            }
            Status::StepOutSuccess => self.start_pass(nodes),
            Status::StepOutFailure => {
                StatusReport::failure(format!("pass {} expanded nothing", self.passes))
            }
            Status::Iterate => unexpected_iterate("ExpandToSizeStepper"),
        }
    }
}
