pub mod registry;
pub mod runner;

// Re-export key types at crate root for convenience
pub use registry::{DemoRegistry, LaunchFn, LaunchOutcome};
pub use runner::FrameDriver;
