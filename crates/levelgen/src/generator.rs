//! Top-level generation run: a seeded graph, an RNG and an executor, advanced
//! one step per call so a caller can render between steps.

use std::rc::Rc;

use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::expander::{ExpandReport, Expander};
use crate::factories::{GenerationPlan, StepperFactories};
use crate::geometry::XY;
use crate::graph::Graph;
use crate::random::seeded_rng;
use crate::stepper::{Status, StepContext};
use crate::template::Template;

const SEED_SPACING: f64 = 100.0;
const SEED_RADIUS: f64 = 20.0;
const SEED_MIN_LENGTH: f64 = 60.0;
const SEED_MAX_LENGTH: f64 = 120.0;
const SEED_HALF_WIDTH: f64 = 8.0;

/// Source tag of the nodes every run starts from.
pub const SEED_TAG: &str = "seed";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Expanding,
    Succeeded,
    Failed,
}

pub struct LevelGenerator {
    graph: Graph,
    rng: ChaCha8Rng,
    expander: Expander,
    plan: Rc<GenerationPlan>,
    steps_taken: usize,
    terminal: Option<ExpandReport>,
}

impl LevelGenerator {
    pub fn new(
        factories: Rc<StepperFactories>,
        config: GeneratorConfig,
        templates: Vec<Rc<Template>>,
    ) -> Self {
        let graph = seed_graph();
        let rng = seeded_rng(config.seed);
        let plan = Rc::new(GenerationPlan { config, templates });
        let initial = match plan.config.target_node_count {
            Some(target) => factories.make_expand_to_size(target, &plan),
            None => factories.make_all_nodes(&plan),
        };
        let expander = Expander::new(initial, Some(&graph));
        Self { graph, rng, expander, plan, steps_taken: 0, terminal: None }
    }

    /// Advances generation by one executor step. Once complete, returns the
    /// terminal report again without stepping.
    pub fn step(&mut self) -> ExpandReport {
        if let Some(report) = &self.terminal {
            return report.clone();
        }

        let report = self.expander.step(&mut StepContext::new(&mut self.graph, &mut self.rng));
        self.steps_taken += 1;
        if report.complete {
            info!(
                status = %report.status,
                steps = self.steps_taken,
                nodes = self.graph.num_nodes(),
                edges = self.graph.num_edges(),
                "generation complete"
            );
            self.terminal = Some(report.clone());
        }
        report
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn phase(&self) -> Phase {
        match &self.terminal {
            None => Phase::Expanding,
            Some(report) if report.status == Status::StepOutSuccess => Phase::Succeeded,
            Some(_) => Phase::Failed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Frames currently on the executor stack.
    pub fn depth(&self) -> usize {
        self.expander.depth()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.plan.config
    }
}

/// Start, an expandable room, and End in a vertical line.
fn seed_graph() -> Graph {
    let mut graph = Graph::new();
    let start = graph.add_node("Start", "<", SEED_TAG, SEED_RADIUS);
    let expand = graph.add_node("Expand", "e", SEED_TAG, SEED_RADIUS);
    let end = graph.add_node("End", ">", SEED_TAG, SEED_RADIUS);
    graph.set_pos(start, XY::new(0.0, -SEED_SPACING));
    graph.set_pos(end, XY::new(0.0, SEED_SPACING));
    graph.connect(start, expand, SEED_MIN_LENGTH, SEED_MAX_LENGTH, SEED_HALF_WIDTH);
    graph.connect(expand, end, SEED_MIN_LENGTH, SEED_MAX_LENGTH, SEED_HALF_WIDTH);
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::factories_with_instant_children;

    fn names(graph: &Graph) -> Vec<&str> {
        graph.all_nodes().iter().filter_map(|&id| graph.node(id)).map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn starts_from_the_three_node_seed() {
        let generator = LevelGenerator::new(
            Rc::new(StepperFactories::standard()),
            GeneratorConfig::default(),
            Vec::new(),
        );
        let graph = generator.graph();
        assert_eq!(names(graph), ["Start", "Expand", "End"]);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(generator.phase(), Phase::Expanding);
        assert_eq!(generator.depth(), 1);
        assert_eq!(generator.config().seed, 85);
        graph.assert_invariants();
    }

    #[test]
    fn no_templates_fails_and_keeps_the_seed() {
        let mut generator = LevelGenerator::new(
            factories_with_instant_children(true, true),
            GeneratorConfig::default(),
            Vec::new(),
        );
        let before = generator.graph().clone();
        let mut report = generator.step();
        while !report.complete {
            report = generator.step();
        }

        assert_eq!(report.status, Status::StepOutFailure);
        assert_eq!(generator.phase(), Phase::Failed);
        assert_eq!(generator.graph(), &before);
    }

    #[test]
    fn stepping_after_completion_repeats_the_terminal_report() {
        let mut generator = LevelGenerator::new(
            factories_with_instant_children(true, true),
            GeneratorConfig::default(),
            Vec::new(),
        );
        let mut report = generator.step();
        while !report.complete {
            report = generator.step();
        }
        let steps = generator.steps_taken();

        assert_eq!(generator.step(), report);
        assert_eq!(generator.steps_taken(), steps);
        assert!(generator.is_complete());
    }
}
