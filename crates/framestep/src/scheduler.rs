// scheduler.rs
//
// FrameScheduler: cooperative per-frame multitasking.
// One step per live task per tick, in submission order. A task leaves the
// live set when it finishes, and earlier if it is cancelled or its
// liveness predicate reports the target resource gone.
//
// Usage:
//   let mut sched = FrameScheduler::new();
//   let handle = sched.submit(|_ctx| StepOutcome::Continue, || true)?;
//   sched.tick(1.0 / 60.0);  // resumes every live task once
//   sched.cancel(handle);    // takes effect at the next resumption

use crate::clock::{FrameTime, TimeSample};
use crate::error::SchedulerError;
use crate::task::{StepOutcome, Task, TaskHandle, TaskState};

/// Counters describing one tick pass. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tasks whose step function ran this tick.
    pub stepped: usize,
    /// Tasks removed this tick: done, cancelled, or target gone.
    pub completed: usize,
    /// Tasks submitted from inside steps during the pass.
    pub submitted: usize,
    /// Live tasks remaining after the pass.
    pub live: usize,
}

/// Per-resumption view handed to a step function.
///
/// Carries the tick's timing, the task's own progress, and buffers for
/// re-entrant requests: a task submitted from inside a step joins the live
/// set after the current pass and is never resumed on the tick that
/// created it.
pub struct StepContext<'a> {
    /// Delta time of the current tick (0.0 inside a blocking run).
    pub dt: f32,
    /// Delta accumulated across this task's resumptions, current tick included.
    pub elapsed: f32,
    /// Zero-based index of this resumption.
    pub step: u64,
    backlog: &'a mut Backlog,
    next_handle: &'a mut u64,
    live: usize,
    max_tasks: Option<usize>,
}

impl StepContext<'_> {
    /// Submit a task from inside a step. It takes its first step on the
    /// next tick.
    ///
    /// On a bounded scheduler the limit counts tasks live at the start of
    /// the pass plus everything queued during it.
    pub fn submit(
        &mut self,
        step: impl FnMut(&mut StepContext<'_>) -> StepOutcome + 'static,
        is_alive: impl Fn() -> bool + 'static,
    ) -> Result<TaskHandle, SchedulerError> {
        if let Some(limit) = self.max_tasks {
            if self.live + self.backlog.submits.len() >= limit {
                return Err(SchedulerError::CapacityExceeded { limit });
            }
        }
        let handle = TaskHandle(*self.next_handle);
        *self.next_handle += 1;
        self.backlog
            .submits
            .push(Task::new(handle, Box::new(step), Box::new(is_alive)));
        log::debug!("task {} queued from step", handle.0);
        Ok(handle)
    }

    /// Request cancellation from inside a step. Applied after the current
    /// pass: a task later in the same pass still takes this tick's step and
    /// is removed at its next resumption.
    pub fn cancel(&mut self, handle: TaskHandle) {
        self.backlog.cancels.push(handle);
    }
}

/// Requests issued during a tick pass, joined to the live set afterwards.
#[derive(Default)]
struct Backlog {
    submits: Vec<Task>,
    cancels: Vec<TaskHandle>,
}

/// Cooperative per-frame task scheduler.
///
/// Owns the live task set and the scheduler clock. Nothing runs between
/// ticks; each `tick(dt)` resumes every live task exactly once.
pub struct FrameScheduler {
    tasks: Vec<Task>,
    backlog: Backlog,
    next_handle: u64,
    max_tasks: Option<usize>,
    time: FrameTime,
    now: f32,
    ticks: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    /// A scheduler with no limit on live tasks.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            backlog: Backlog::default(),
            next_handle: 0,
            max_tasks: None,
            time: FrameTime::default(),
            now: 0.0,
            ticks: 0,
        }
    }

    /// A scheduler that rejects submissions past `limit` live tasks.
    pub fn bounded(limit: usize) -> Self {
        Self {
            max_tasks: Some(limit),
            ..Self::new()
        }
    }

    /// A clone-on-read handle onto the scheduler clock, for tasks that
    /// measure time across suspension points.
    pub fn time(&self) -> FrameTime {
        self.time.clone()
    }

    /// Number of live tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are live.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Submit a task: a step function called once per tick, and a liveness
    /// predicate checked before every resumption. Returns a handle for
    /// cancellation and completion queries.
    pub fn submit(
        &mut self,
        step: impl FnMut(&mut StepContext<'_>) -> StepOutcome + 'static,
        is_alive: impl Fn() -> bool + 'static,
    ) -> Result<TaskHandle, SchedulerError> {
        if let Some(limit) = self.max_tasks {
            if self.tasks.len() >= limit {
                return Err(SchedulerError::CapacityExceeded { limit });
            }
        }
        let handle = self.alloc_handle();
        self.tasks
            .push(Task::new(handle, Box::new(step), Box::new(is_alive)));
        log::debug!("task {} submitted ({} live)", handle.0, self.tasks.len());
        Ok(handle)
    }

    /// Request cancellation. The task is removed at its next resumption,
    /// before its step function would run. Unknown or finished handles are
    /// a no-op.
    pub fn cancel(&mut self, handle: TaskHandle) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.handle == handle) {
            if !task.cancelled {
                task.cancelled = true;
                log::debug!("task {} cancel requested", handle.0);
            }
        }
    }

    /// Whether a handle refers to a task that was submitted and has since
    /// left the live set. Never-submitted handles report `false`.
    pub fn is_complete(&self, handle: TaskHandle) -> bool {
        handle.0 < self.next_handle
            && self.tasks.iter().all(|t| t.handle != handle)
            && self.backlog.submits.iter().all(|t| t.handle != handle)
    }

    /// Lifecycle state for a handle, or `None` if it was never submitted.
    pub fn state(&self, handle: TaskHandle) -> Option<TaskState> {
        if handle.0 >= self.next_handle {
            return None;
        }
        self.tasks
            .iter()
            .chain(self.backlog.submits.iter())
            .find(|t| t.handle == handle)
            .map(|t| t.state)
            .or(Some(TaskState::Completed))
    }

    /// Advance the clock by `dt` and resume every live task once, in
    /// submission order. Cancelled tasks and tasks whose target is gone are
    /// removed without being stepped. Calling this with no tasks live still
    /// advances the clock.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        self.ticks += 1;
        self.now += dt;
        self.time.publish(TimeSample {
            now: self.now,
            dt,
            tick: self.ticks,
        });

        let mut report = TickReport::default();

        // Field split: the pass iterates `tasks` while re-entrant requests
        // collect into `backlog`.
        let Self {
            tasks,
            backlog,
            next_handle,
            max_tasks,
            ..
        } = self;
        let live_at_start = tasks.len();

        tasks.retain_mut(|task| {
            if task.cancelled {
                task.state = TaskState::Completed;
                report.completed += 1;
                log::debug!("task {} removed: cancelled", task.handle.0);
                return false;
            }
            if !(task.is_alive)() {
                task.state = TaskState::Completed;
                report.completed += 1;
                log::debug!("task {} removed: target gone", task.handle.0);
                return false;
            }

            task.state = TaskState::Running;
            task.elapsed += dt;
            let mut ctx = StepContext {
                dt,
                elapsed: task.elapsed,
                step: task.steps,
                backlog: &mut *backlog,
                next_handle: &mut *next_handle,
                live: live_at_start,
                max_tasks: *max_tasks,
            };
            let outcome = (task.step)(&mut ctx);
            task.steps += 1;
            report.stepped += 1;

            match outcome {
                StepOutcome::Continue => {
                    task.state = TaskState::Suspended;
                    true
                }
                StepOutcome::Done => {
                    task.state = TaskState::Completed;
                    report.completed += 1;
                    log::debug!("task {} done after {} steps", task.handle.0, task.steps);
                    false
                }
            }
        });

        report.submitted = self.backlog.submits.len();
        self.drain_backlog();
        report.live = self.tasks.len();
        report
    }

    /// Drive a single step function to completion without yielding to the
    /// frame loop. Every step sees `dt == 0.0`: no frames elapse during a
    /// blocking drain, which is exactly why this mode starves frame-paced
    /// work and is meant for tests and tools, not per-frame code.
    ///
    /// The liveness predicate is checked before every step. Tasks submitted
    /// through the context join the scheduler and first run on the next
    /// real tick. Returns the number of steps executed.
    pub fn run_to_completion(
        &mut self,
        mut step: impl FnMut(&mut StepContext<'_>) -> StepOutcome,
        is_alive: impl Fn() -> bool,
    ) -> u64 {
        let mut steps = 0u64;
        {
            let Self {
                tasks,
                backlog,
                next_handle,
                max_tasks,
                ..
            } = self;
            let live_at_start = tasks.len();

            while is_alive() {
                let mut ctx = StepContext {
                    dt: 0.0,
                    elapsed: 0.0,
                    step: steps,
                    backlog: &mut *backlog,
                    next_handle: &mut *next_handle,
                    live: live_at_start,
                    max_tasks: *max_tasks,
                };
                let outcome = step(&mut ctx);
                steps += 1;
                if outcome == StepOutcome::Done {
                    break;
                }
            }
        }
        self.drain_backlog();
        log::debug!("blocking run finished after {} steps", steps);
        steps
    }

    fn alloc_handle(&mut self) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Join buffered submissions and apply buffered cancels.
    fn drain_backlog(&mut self) {
        let Self { tasks, backlog, .. } = self;
        let Backlog { submits, cancels } = backlog;
        for handle in cancels.drain(..) {
            if let Some(task) = tasks
                .iter_mut()
                .chain(submits.iter_mut())
                .find(|t| t.handle == handle)
            {
                task.cancelled = true;
            }
        }
        tasks.append(submits);
    }
}
