use std::rc::Rc;

use anyhow::{Context, Result};
use levelgen::{
    ExpandReport, GeneratorConfig, LevelGenerator, Phase, StepperFactories, TemplateStore,
};
use serde::Serialize;

/// Builds a generator over the built-in template library.
pub fn standard_generator(config: GeneratorConfig) -> Result<LevelGenerator> {
    let store = TemplateStore::standard().context("built-in template library is invalid")?;
    Ok(LevelGenerator::new(
        Rc::new(StepperFactories::standard()),
        config,
        store.templates().to_vec(),
    ))
}

/// Steps until completion or until `max_steps` steps have been taken.
pub fn run_until_complete(
    generator: &mut LevelGenerator,
    max_steps: Option<usize>,
    mut on_step: impl FnMut(&LevelGenerator, &ExpandReport),
) {
    while !generator.is_complete() && max_steps.is_none_or(|max| generator.steps_taken() < max) {
        let report = generator.step();
        on_step(generator, &report);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub phase: &'static str,
    pub steps: usize,
    pub nodes: usize,
    pub edges: usize,
    pub fingerprint: String,
}

impl RunSummary {
    pub fn of(generator: &LevelGenerator) -> Self {
        let graph = generator.graph();
        Self {
            seed: generator.config().seed,
            phase: match generator.phase() {
                Phase::Expanding => "expanding",
                Phase::Succeeded => "succeeded",
                Phase::Failed => "failed",
            },
            steps: generator.steps_taken(),
            nodes: graph.num_nodes(),
            edges: graph.num_edges(),
            fingerprint: format!("{:016x}", graph.fingerprint()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_budget_stops_an_unfinished_run() {
        let mut generator =
            standard_generator(GeneratorConfig::default()).expect("generator builds");
        let mut seen = 0;
        run_until_complete(&mut generator, Some(3), |_, _| seen += 1);

        assert_eq!(seen, 3);
        let summary = RunSummary::of(&generator);
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.seed, 85);
        assert_eq!(summary.fingerprint.len(), 16);
    }

    #[test]
    fn summary_serializes_with_stable_field_names() {
        let generator =
            standard_generator(GeneratorConfig::with_seed(4)).expect("generator builds");
        let json = serde_json::to_value(RunSummary::of(&generator)).expect("summary serializes");

        assert_eq!(json["seed"], 4);
        assert_eq!(json["phase"], "expanding");
        assert_eq!(json["nodes"], 3);
        assert_eq!(json["edges"], 2);
    }
}
