use std::rc::Rc;

use crate::factories::{GenerationPlan, StepperFactories};
use crate::graph::NodeId;
use crate::stepper::{Status, StatusReport, StepContext, Stepper, unexpected_iterate};

/// One expansion pass: tries every node that existed when the pass began.
///
/// Nodes consumed by an earlier expansion in the same pass are skipped. Once
/// the list is exhausted the pass ends with the status of its last child; a
/// graph with no nodes fails.
pub struct TryAllNodesExpandStepper {
    factories: Rc<StepperFactories>,
    plan: Rc<GenerationPlan>,
    nodes: Vec<NodeId>,
    next: usize,
    last_child: Status,
}

impl TryAllNodesExpandStepper {
    pub fn new(factories: Rc<StepperFactories>, plan: Rc<GenerationPlan>) -> Self {
        Self { factories, plan, nodes: Vec::new(), next: 0, last_child: Status::StepOutFailure }
    }

    fn try_next_node(&mut self, ctx: &mut StepContext<'_>) -> StatusReport {
        while let Some(&node) = self.nodes.get(self.next) {
            self.next += 1;
            let Some(live) = ctx.graph.node(node) else {
                continue;
            };
            let log = format!("trying node {} ({} of {})", live.name, self.next, self.nodes.len());
            return StatusReport::step_in(self.factories.make_one_node(node, &self.plan), log);
        }

        match self.last_child {
            Status::StepOutSuccess => StatusReport::success("last node expanded"),
            _ if self.nodes.is_empty() => StatusReport::failure("no nodes to expand"),
            _ => StatusReport::failure("last node could not be expanded"),
        }
    }
}

impl Stepper for TryAllNodesExpandStepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport {
        match status {
            Status::StepIn => {
                self.nodes = ctx.graph.all_nodes().to_vec();
            }
            Status::StepOutSuccess | Status::StepOutFailure => self.last_child = status,
            Status::Iterate => unexpected_iterate("TryAllNodesExpandStepper"),
        }
        self.try_next_node(ctx)
    }
}
