use thiserror::Error;

/// Errors produced by task submission.
///
/// Everything else the scheduler does is total: cancelling or querying an
/// unknown handle is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A bounded scheduler has no room for another task.
    #[error("task capacity exceeded (limit {limit})")]
    CapacityExceeded { limit: usize },
}
