//! Shared test fixtures for the unit test suites.
//! Scripted steppers stand in for relaxers and children so executor and
//! driver tests can force any success/failure sequence.
//! It does not own production generation logic.

use std::cell::RefCell;
use std::rc::Rc;

use rand_chacha::ChaCha8Rng;

use crate::config::{GeneratorConfig, RelaxConfig};
use crate::expander::{ExpandReport, Expander};
use crate::factories::{GenerationPlan, StepperFactories};
use crate::graph::{DirectedEdge, Graph};
use crate::stepper::{Status, StatusReport, StepContext, Stepper, unexpected_iterate};
use crate::template::Template;

pub(crate) type StatusLog = Rc<RefCell<Vec<Status>>>;

enum Behaviour {
    Finish(bool),
    IterateThenFinish { remaining: usize },
    AddNodeThen(bool),
    AddNodeAndPush(Option<Box<dyn Stepper>>),
}

pub(crate) struct ScriptedStepper {
    behaviour: Behaviour,
    seen: StatusLog,
}

impl ScriptedStepper {
    fn boxed(behaviour: Behaviour) -> (Box<dyn Stepper>, StatusLog) {
        let seen = StatusLog::default();
        (Box::new(Self { behaviour, seen: Rc::clone(&seen) }), seen)
    }

    pub(crate) fn succeed() -> Box<dyn Stepper> {
        Self::boxed(Behaviour::Finish(true)).0
    }

    pub(crate) fn fail() -> Box<dyn Stepper> {
        Self::boxed(Behaviour::Finish(false)).0
    }

    pub(crate) fn finishing(success: bool) -> Box<dyn Stepper> {
        Self::boxed(Behaviour::Finish(success)).0
    }

    pub(crate) fn recording_success() -> (Box<dyn Stepper>, StatusLog) {
        Self::boxed(Behaviour::Finish(true))
    }

    pub(crate) fn iterate_then_succeed(iterations: usize) -> (Box<dyn Stepper>, StatusLog) {
        Self::boxed(Behaviour::IterateThenFinish { remaining: iterations })
    }

    pub(crate) fn add_node_then(success: bool) -> Box<dyn Stepper> {
        Self::boxed(Behaviour::AddNodeThen(success)).0
    }

    /// Adds a node and pushes `child` on entry; echoes the child's outcome.
    pub(crate) fn add_node_and_push(child: Box<dyn Stepper>) -> Box<dyn Stepper> {
        Self::boxed(Behaviour::AddNodeAndPush(Some(child))).0
    }
}

impl Stepper for ScriptedStepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport {
        self.seen.borrow_mut().push(status);
        match &mut self.behaviour {
            Behaviour::Finish(true) => StatusReport::success("scripted success"),
            Behaviour::Finish(false) => StatusReport::failure("scripted failure"),
            Behaviour::IterateThenFinish { remaining } => {
                if *remaining == 0 {
                    StatusReport::success("scripted iterations done")
                } else {
                    *remaining -= 1;
                    StatusReport::iterate("scripted iteration")
                }
            }
            Behaviour::AddNodeThen(success) => {
                ctx.graph.add_node("scripted", "", "test", 0.0);
                if *success {
                    StatusReport::success("added node")
                } else {
                    StatusReport::failure("added node, failing")
                }
            }
            Behaviour::AddNodeAndPush(child) => match status {
                Status::StepIn => {
                    ctx.graph.add_node("scripted-parent", "", "test", 0.0);
                    let child = child.take().expect("scripted parent entered twice");
                    StatusReport::step_in(child, "pushing scripted child")
                }
                Status::StepOutSuccess => StatusReport::success("child succeeded"),
                Status::StepOutFailure => StatusReport::failure("child failed"),
                Status::Iterate => unexpected_iterate("scripted parent"),
            },
        }
    }
}

pub(crate) fn run_to_completion(
    expander: &mut Expander,
    graph: &mut Graph,
    rng: &mut ChaCha8Rng,
) -> ExpandReport {
    let mut ctx = StepContext::new(graph, rng);
    loop {
        let report = expander.step(&mut ctx);
        if report.complete {
            return report;
        }
    }
}

/// Standard factories with relaxation and edge adjustment replaced by steppers
/// that finish immediately with the given outcomes.
pub(crate) fn factories_with_instant_children(
    relax_succeeds: bool,
    adjust_succeeds: bool,
) -> Rc<StepperFactories> {
    let mut factories = StepperFactories::standard();
    factories.relaxer = Box::new(move |_: &Rc<StepperFactories>, _: &RelaxConfig| {
        ScriptedStepper::finishing(relax_succeeds)
    });
    factories.edge_adjuster =
        Box::new(move |_: &Rc<StepperFactories>, _: DirectedEdge, _: &Rc<GenerationPlan>| {
            ScriptedStepper::finishing(adjust_succeeds)
        });
    Rc::new(factories)
}

pub(crate) fn plan_with(templates: Vec<Rc<Template>>) -> Rc<GenerationPlan> {
    Rc::new(GenerationPlan { config: GeneratorConfig::default(), templates })
}
