//! Constructor injection for steppers.
//!
//! Parent steppers never name their children's concrete types: they ask the
//! shared [`StepperFactories`] record for one. Tests swap single entries to
//! script a child's outcome.

use std::rc::Rc;

use crate::config::{GeneratorConfig, RelaxConfig};
use crate::graph::{DirectedEdge, NodeId};
use crate::stepper::Stepper;
use crate::steppers::{
    EdgeAdjusterStepper, ExpandToSizeStepper, RelaxerStepper, TryAllNodesExpandStepper,
    TryAllTemplatesOnOneNodeStepper, TryTemplateExpandStepper,
};
use crate::template::Template;

/// Everything a generation run reads but never changes.
#[derive(Clone, Debug)]
pub struct GenerationPlan {
    pub config: GeneratorConfig,
    pub templates: Vec<Rc<Template>>,
}

pub type RelaxerFactory = Box<dyn Fn(&Rc<StepperFactories>, &RelaxConfig) -> Box<dyn Stepper>>;
pub type AllNodesFactory =
    Box<dyn Fn(&Rc<StepperFactories>, &Rc<GenerationPlan>) -> Box<dyn Stepper>>;
pub type OneNodeFactory =
    Box<dyn Fn(&Rc<StepperFactories>, NodeId, &Rc<GenerationPlan>) -> Box<dyn Stepper>>;
pub type TryTemplateFactory = Box<
    dyn Fn(&Rc<StepperFactories>, NodeId, Rc<Template>, &Rc<GenerationPlan>) -> Box<dyn Stepper>,
>;
pub type EdgeAdjusterFactory =
    Box<dyn Fn(&Rc<StepperFactories>, DirectedEdge, &Rc<GenerationPlan>) -> Box<dyn Stepper>>;
pub type ExpandToSizeFactory =
    Box<dyn Fn(&Rc<StepperFactories>, usize, &Rc<GenerationPlan>) -> Box<dyn Stepper>>;

pub struct StepperFactories {
    pub relaxer: RelaxerFactory,
    pub all_nodes: AllNodesFactory,
    pub one_node: OneNodeFactory,
    pub try_template: TryTemplateFactory,
    pub edge_adjuster: EdgeAdjusterFactory,
    pub expand_to_size: ExpandToSizeFactory,
}

impl StepperFactories {
    pub fn standard() -> Self {
        Self {
            relaxer: Box::new(standard_relaxer),
            all_nodes: Box::new(standard_all_nodes),
            one_node: Box::new(standard_one_node),
            try_template: Box::new(standard_try_template),
            edge_adjuster: Box::new(standard_edge_adjuster),
            expand_to_size: Box::new(standard_expand_to_size),
        }
    }

    pub fn make_relaxer(self: &Rc<Self>, config: &RelaxConfig) -> Box<dyn Stepper> {
        (self.relaxer)(self, config)
    }

    pub fn make_all_nodes(self: &Rc<Self>, plan: &Rc<GenerationPlan>) -> Box<dyn Stepper> {
        (self.all_nodes)(self, plan)
    }

    pub fn make_one_node(
        self: &Rc<Self>,
        node: NodeId,
        plan: &Rc<GenerationPlan>,
    ) -> Box<dyn Stepper> {
        (self.one_node)(self, node, plan)
    }

    pub fn make_try_template(
        self: &Rc<Self>,
        node: NodeId,
        template: Rc<Template>,
        plan: &Rc<GenerationPlan>,
    ) -> Box<dyn Stepper> {
        (self.try_template)(self, node, template, plan)
    }

    pub fn make_edge_adjuster(
        self: &Rc<Self>,
        edge: DirectedEdge,
        plan: &Rc<GenerationPlan>,
    ) -> Box<dyn Stepper> {
        (self.edge_adjuster)(self, edge, plan)
    }

    pub fn make_expand_to_size(
        self: &Rc<Self>,
        target_node_count: usize,
        plan: &Rc<GenerationPlan>,
    ) -> Box<dyn Stepper> {
        (self.expand_to_size)(self, target_node_count, plan)
    }
}

fn standard_relaxer(_: &Rc<StepperFactories>, config: &RelaxConfig) -> Box<dyn Stepper> {
    Box::new(RelaxerStepper::new(config.clone()))
}

fn standard_all_nodes(
    factories: &Rc<StepperFactories>,
    plan: &Rc<GenerationPlan>,
) -> Box<dyn Stepper> {
    Box::new(TryAllNodesExpandStepper::new(Rc::clone(factories), Rc::clone(plan)))
}

fn standard_one_node(
    factories: &Rc<StepperFactories>,
    node: NodeId,
    plan: &Rc<GenerationPlan>,
) -> Box<dyn Stepper> {
    Box::new(TryAllTemplatesOnOneNodeStepper::new(Rc::clone(factories), node, Rc::clone(plan)))
}

fn standard_try_template(
    factories: &Rc<StepperFactories>,
    node: NodeId,
    template: Rc<Template>,
    plan: &Rc<GenerationPlan>,
) -> Box<dyn Stepper> {
    Box::new(TryTemplateExpandStepper::new(Rc::clone(factories), node, template, Rc::clone(plan)))
}

fn standard_edge_adjuster(
    factories: &Rc<StepperFactories>,
    edge: DirectedEdge,
    plan: &Rc<GenerationPlan>,
) -> Box<dyn Stepper> {
    Box::new(EdgeAdjusterStepper::new(Rc::clone(factories), edge, Rc::clone(plan)))
}

fn standard_expand_to_size(
    factories: &Rc<StepperFactories>,
    target_node_count: usize,
    plan: &Rc<GenerationPlan>,
) -> Box<dyn Stepper> {
    Box::new(ExpandToSizeStepper::new(Rc::clone(factories), target_node_count, Rc::clone(plan)))
}
