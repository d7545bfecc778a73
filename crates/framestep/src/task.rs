// task.rs
//
// Task identity, lifecycle, and the step-function contract.
// A task is a caller-supplied closure the scheduler resumes once per tick,
// paired with a liveness predicate that ties it to some external resource.

use crate::scheduler::StepContext;

/// Handle to a submitted task for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// What a step function reports after one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More work remains; resume on the next tick.
    Continue,
    /// The task is finished; remove it from the live set.
    Done,
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Submitted, never resumed yet.
    Pending,
    /// Inside its step function right now.
    Running,
    /// Between steps, waiting for the next tick.
    Suspended,
    /// Finished, cancelled, or its target went away. Terminal.
    Completed,
}

/// Boxed step function: one unit of work per call.
pub type StepFn = Box<dyn FnMut(&mut StepContext<'_>) -> StepOutcome>;

/// Boxed liveness predicate: does the task's target still exist?
pub type LivenessFn = Box<dyn Fn() -> bool>;

/// A task owned by the scheduler.
pub(crate) struct Task {
    pub(crate) handle: TaskHandle,
    pub(crate) state: TaskState,
    pub(crate) step: StepFn,
    pub(crate) is_alive: LivenessFn,
    pub(crate) cancelled: bool,
    /// Delta time accumulated across this task's resumptions.
    pub(crate) elapsed: f32,
    /// How many times the step function has run.
    pub(crate) steps: u64,
}

impl Task {
    pub(crate) fn new(handle: TaskHandle, step: StepFn, is_alive: LivenessFn) -> Self {
        Self {
            handle,
            state: TaskState::Pending,
            step,
            is_alive,
            cancelled: false,
            elapsed: 0.0,
            steps: 0,
        }
    }
}
