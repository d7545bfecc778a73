pub mod clock;
pub mod error;
pub mod future;
pub mod scheduler;
pub mod task;

// Re-export key types at crate root for convenience
pub use clock::{FrameClock, FrameTime, TimeSample};
pub use error::SchedulerError;
pub use future::{next_frame, Delay, NextFrame};
pub use scheduler::{FrameScheduler, StepContext, TickReport};
pub use task::{StepOutcome, TaskHandle, TaskState};
