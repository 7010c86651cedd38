use std::rc::Rc;

use crate::factories::{GenerationPlan, StepperFactories};
use crate::graph::NodeId;
use crate::random::shuffle;
use crate::stepper::{Status, StatusReport, StepContext, Stepper, unexpected_iterate};
use crate::template::Template;

/// Tries each template on one node, in an order shuffled on entry, until one sticks.
pub struct TryAllTemplatesOnOneNodeStepper {
    factories: Rc<StepperFactories>,
    node: NodeId,
    plan: Rc<GenerationPlan>,
    order: Vec<Rc<Template>>,
    next: usize,
}

impl TryAllTemplatesOnOneNodeStepper {
    pub fn new(factories: Rc<StepperFactories>, node: NodeId, plan: Rc<GenerationPlan>) -> Self {
        Self { factories, node, plan, order: Vec::new(), next: 0 }
    }

    fn try_next_template(&mut self) -> StatusReport {
        let Some(template) = self.order.get(self.next) else {
            return StatusReport::failure(format!("all {} template(s) failed", self.order.len()));
        };
        self.next += 1;

        let log = format!("trying template {}", template.name());
        let child = self.factories.make_try_template(self.node, Rc::clone(template), &self.plan);
        StatusReport::step_in(child, log)
    }
}

impl Stepper for TryAllTemplatesOnOneNodeStepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport {
        match status {
            Status::StepIn => {
                self.order = self.plan.templates.clone();
                shuffle(ctx.rng, &mut self.order);
                self.try_next_template()
            }
            Status::StepOutSuccess => StatusReport::success("template applied"),
            Status::StepOutFailure => self.try_next_template(),
            Status::Iterate => unexpected_iterate("TryAllTemplatesOnOneNodeStepper"),
        }
    }
}
