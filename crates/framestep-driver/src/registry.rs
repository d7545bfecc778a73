use std::collections::BTreeMap;

use framestep::{SchedulerError, TaskHandle};

use crate::runner::FrameDriver;

/// What launching a demo produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A task now live on the driver's scheduler.
    Task(TaskHandle),
    /// The demo ran blocking and finished before returning.
    Finished { steps: u64 },
}

/// A launch function: sets up whatever the demo needs and starts its task.
pub type LaunchFn = Box<dyn Fn(&mut FrameDriver) -> Result<LaunchOutcome, SchedulerError>>;

/// Explicit demo catalogue, iterated in name order.
///
/// Demos register themselves once at startup under a stable name; nothing
/// is discovered by scanning or reflection, so the launchable set is
/// auditable in one place and deterministic to walk.
#[derive(Default)]
pub struct DemoRegistry {
    entries: BTreeMap<String, LaunchFn>,
}

impl DemoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a demo under a name. Re-registering a name replaces the
    /// previous launch function.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        launch: impl Fn(&mut FrameDriver) -> Result<LaunchOutcome, SchedulerError> + 'static,
    ) {
        self.entries.insert(name.into(), Box::new(launch));
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Launch a demo by name. `None` if nothing is registered under it.
    pub fn launch(
        &self,
        name: &str,
        driver: &mut FrameDriver,
    ) -> Option<Result<LaunchOutcome, SchedulerError>> {
        let launch = self.entries.get(name)?;
        log::debug!("launching demo '{}'", name);
        Some(launch(driver))
    }
}
