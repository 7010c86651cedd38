//! The stepper protocol driven by [`crate::expander::Expander`].
//!
//! A stepper is resumable work. Each call to [`Stepper::step`] receives the
//! status of the previous executor step and answers with what should happen
//! next: run it again (`Iterate`), push a child (`StepIn`), or finish and hand
//! control back to the parent (`StepOutSuccess` / `StepOutFailure`).

use std::fmt;

use rand_chacha::ChaCha8Rng;

use crate::graph::Graph;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The current stepper asked to be run again.
    Iterate,
    /// A child stepper was pushed (or, for the first step, the stepper itself was entered).
    StepIn,
    /// The child finished and its graph changes were kept.
    StepOutSuccess,
    /// The child failed and its graph changes were rolled back.
    StepOutFailure,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Iterate => "Iterate",
            Self::StepIn => "StepIn",
            Self::StepOutSuccess => "StepOutSuccess",
            Self::StepOutFailure => "StepOutFailure",
        };
        f.write_str(label)
    }
}

/// What a stepper wants the executor to do next. Only `StepIn` carries a child.
pub enum Transition {
    Iterate,
    StepIn(Box<dyn Stepper>),
    StepOutSuccess,
    StepOutFailure,
}

impl Transition {
    pub fn status(&self) -> Status {
        match self {
            Self::Iterate => Status::Iterate,
            Self::StepIn(_) => Status::StepIn,
            Self::StepOutSuccess => Status::StepOutSuccess,
            Self::StepOutFailure => Status::StepOutFailure,
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status())
    }
}

#[derive(Debug)]
pub struct StatusReport {
    pub transition: Transition,
    pub log: String,
}

impl StatusReport {
    pub fn iterate(log: impl Into<String>) -> Self {
        Self { transition: Transition::Iterate, log: log.into() }
    }

    pub fn step_in(child: Box<dyn Stepper>, log: impl Into<String>) -> Self {
        Self { transition: Transition::StepIn(child), log: log.into() }
    }

    pub fn success(log: impl Into<String>) -> Self {
        Self { transition: Transition::StepOutSuccess, log: log.into() }
    }

    pub fn failure(log: impl Into<String>) -> Self {
        Self { transition: Transition::StepOutFailure, log: log.into() }
    }

    pub fn status(&self) -> Status {
        self.transition.status()
    }
}

/// Mutable generation state lent to the stepper on top of the stack for one step.
pub struct StepContext<'a> {
    pub graph: &'a mut Graph,
    pub rng: &'a mut ChaCha8Rng,
}

impl<'a> StepContext<'a> {
    pub fn new(graph: &'a mut Graph, rng: &'a mut ChaCha8Rng) -> Self {
        Self { graph, rng }
    }
}

pub trait Stepper {
    fn step(&mut self, ctx: &mut StepContext<'_>, status: Status) -> StatusReport;
}

/// Fails loudly for a stepper resumed with `Iterate` although it never asks for it.
#[track_caller]
pub fn unexpected_iterate(stepper: &str) -> ! {
    panic!("{stepper} received Iterate but never requests it; the stepper protocol was violated")
}

/// Fails loudly for a stepper that never pushes children but was resumed as a parent.
#[track_caller]
pub fn unexpected_step_out(stepper: &str, status: Status) -> ! {
    panic!("{stepper} received {status} but never steps into a child")
}
