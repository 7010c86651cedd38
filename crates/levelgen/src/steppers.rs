//! Concrete steppers driving template search, edge correction and relaxation.

mod all_nodes;
mod edge_adjuster;
mod expand_to_size;
mod one_node;
mod relaxer;
mod try_template;

pub use all_nodes::TryAllNodesExpandStepper;
pub use edge_adjuster::EdgeAdjusterStepper;
pub use expand_to_size::ExpandToSizeStepper;
pub use one_node::TryAllTemplatesOnOneNodeStepper;
pub use relaxer::{RelaxPass, RelaxerStepper, relax_pass};
pub use try_template::{TryTemplateExpandStepper, most_stressed_edge};
