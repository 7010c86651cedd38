pub mod config;
pub mod crossing;
pub mod expander;
pub mod factories;
pub mod generator;
pub mod geometry;
pub mod graph;
pub mod random;
pub mod stepper;
pub mod steppers;
pub mod template;
pub mod template_store;

#[cfg(test)]
mod test_support;

pub use config::{GeneratorConfig, RelaxConfig};
pub use expander::{ExpandReport, Expander};
pub use factories::{GenerationPlan, StepperFactories};
pub use generator::{LevelGenerator, Phase};
pub use geometry::{BoundingBox, XY};
pub use graph::{DirectedEdge, EdgePair, Graph, Node, NodeId, RestorePoint};
pub use stepper::{Status, StatusReport, StepContext, Stepper, Transition};
pub use template::{NodeKind, NodePlacement, Template, TemplateBuildError, TemplateBuilder};
pub use template_store::TemplateStore;
