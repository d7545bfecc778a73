// clock.rs
//
// Frame timing: a fixed-timestep accumulator for drivers, and the shared
// clock sample the scheduler publishes to running tasks.

use std::cell::Cell;
use std::rc::Rc;

use crate::future::Delay;

/// Fixed timestep accumulator.
/// Converts variable frame deltas into a whole number of fixed ticks.
pub struct FrameClock {
    /// The fixed delta time per tick.
    fixed_dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Total fixed ticks handed out so far.
    ticks: u64,
}

impl FrameClock {
    /// Max backlog carried across one advance, in fixed steps.
    const MAX_CATCH_UP: f32 = 10.0;

    pub fn new(fixed_dt: f32) -> Self {
        Self {
            fixed_dt,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed ticks
    /// to run now. Capped to prevent a catch-up spiral after a long stall.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.fixed_dt * Self::MAX_CATCH_UP);
        let steps = (self.accumulator / self.fixed_dt) as u32;
        self.accumulator -= steps as f32 * self.fixed_dt;
        self.ticks += u64::from(steps);
        steps
    }

    /// The fixed delta time.
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Total fixed ticks handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time covered by the ticks handed out so far.
    pub fn elapsed(&self) -> f32 {
        self.ticks as f32 * self.fixed_dt
    }
}

/// One sample of the scheduler clock, refreshed at the start of every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeSample {
    /// Seconds of scheduler time since the scheduler was created.
    pub now: f32,
    /// Delta of the current tick.
    pub dt: f32,
    /// Index of the current tick (first tick is 1; 0 before any tick).
    pub tick: u64,
}

/// Cloneable read handle onto the scheduler clock.
///
/// Tasks capture one at submission time and read it across suspension
/// points; async tasks use it for [`FrameTime::delay`]. `Rc` keeps the
/// whole arrangement single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct FrameTime {
    inner: Rc<Cell<TimeSample>>,
}

impl FrameTime {
    /// Overwrite the current sample. Called by the scheduler each tick.
    pub(crate) fn publish(&self, sample: TimeSample) {
        self.inner.set(sample);
    }

    /// The full current sample.
    pub fn sample(&self) -> TimeSample {
        self.inner.get()
    }

    /// Seconds of scheduler time since the scheduler was created.
    pub fn now(&self) -> f32 {
        self.inner.get().now
    }

    /// Delta of the current tick.
    pub fn dt(&self) -> f32 {
        self.inner.get().dt
    }

    /// Index of the current tick.
    pub fn tick(&self) -> u64 {
        self.inner.get().tick
    }

    /// A future that stays pending until `secs` of scheduler time pass.
    /// The deadline is measured from the tick of the first poll.
    pub fn delay(&self, secs: f32) -> Delay {
        Delay::new(self.clone(), secs)
    }
}
