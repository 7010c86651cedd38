//! Resumable backtracking executor.
//!
//! The executor keeps an explicit stack of `(stepper, restore point)` frames
//! instead of recursing, so generation can stop between any two steps (to draw
//! a frame, say) and pick up later with nothing held on the call stack.
//!
//! Every push snapshots the graph. A frame that steps out with failure restores
//! its snapshot, undoing everything it and its descendants did; a frame that
//! steps out with success is popped without restoring, leaving its changes to
//! the parent, which may itself still fail and roll them back.

use tracing::debug;

use crate::graph::{Graph, RestorePoint};
use crate::stepper::{Status, StepContext, Stepper, Transition};

/// Result of one [`Expander::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandReport {
    pub status: Status,
    pub log: String,
    /// The stack emptied on this step; `status` is then the terminal outcome.
    pub complete: bool,
}

struct Frame {
    stepper: Box<dyn Stepper>,
    restore: Option<RestorePoint>,
}

pub struct Expander {
    stack: Vec<Frame>,
    last_status: Status,
    snapshots: bool,
}

impl Expander {
    /// Starts with `initial` on the stack. With a graph, every frame gets a
    /// restore point; without one, failures roll nothing back.
    pub fn new(initial: Box<dyn Stepper>, graph: Option<&Graph>) -> Self {
        let restore = graph.map(Graph::create_restore_point);
        Self {
            stack: vec![Frame { stepper: initial, restore }],
            // the invoking code conceptually steps into the initial stepper
            last_status: Status::StepIn,
            snapshots: graph.is_some(),
        }
    }

    /// Runs exactly one step of the stepper on top of the stack.
    ///
    /// Panics when called after completion.
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> ExpandReport {
        let Some(frame) = self.stack.last_mut() else {
            panic!("Expander::step called with an empty stack; generation already completed");
        };

        let report = frame.stepper.step(ctx, self.last_status);
        let status = report.status();
        self.last_status = status;

        match report.transition {
            Transition::Iterate => {}
            Transition::StepIn(child) => {
                let restore = self.snapshots.then(|| ctx.graph.create_restore_point());
                self.stack.push(Frame { stepper: child, restore });
            }
            Transition::StepOutSuccess => {
                self.stack.pop();
            }
            Transition::StepOutFailure => {
                if let Some(Frame { restore: Some(point), .. }) = self.stack.pop() {
                    ctx.graph.restore(point);
                }
            }
        }

        let complete = self.stack.is_empty();
        debug!(%status, depth = self.stack.len(), complete, log = %report.log, "expander step");
        ExpandReport { status, log: report.log, complete }
    }

    /// Number of active frames.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn last_status(&self) -> Status {
        self.last_status
    }
}
