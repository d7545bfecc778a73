use framestep::{FrameClock, FrameScheduler};

/// Generic frame pump that wires a scheduler to a frame source.
///
/// The frontend (a render loop, a benchmark, a test) feeds variable frame
/// deltas into `pump`; the driver converts them into fixed-dt scheduler
/// ticks through a [`FrameClock`], so task pacing stays stable no matter
/// how uneven the frames arrive.
pub struct FrameDriver {
    scheduler: FrameScheduler,
    clock: FrameClock,
}

impl FrameDriver {
    pub fn new(fixed_dt: f32) -> Self {
        Self::with_scheduler(FrameScheduler::new(), fixed_dt)
    }

    /// Wrap an existing scheduler (e.g. a bounded one).
    pub fn with_scheduler(scheduler: FrameScheduler, fixed_dt: f32) -> Self {
        Self {
            scheduler,
            clock: FrameClock::new(fixed_dt),
        }
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Feed one frame's delta. Runs zero or more fixed ticks depending on
    /// the accumulator. Returns the number of ticks executed.
    pub fn pump(&mut self, frame_dt: f32) -> u32 {
        let steps = self.clock.advance(frame_dt);
        for _ in 0..steps {
            let report = self.scheduler.tick(self.clock.fixed_dt());
            log::trace!(
                "tick {}: {} stepped, {} completed, {} live",
                self.clock.ticks(),
                report.stepped,
                report.completed,
                report.live
            );
        }
        steps
    }

    /// Run `frames` synthetic frames at exactly the fixed rate.
    pub fn run_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.pump(self.clock.fixed_dt());
        }
    }

    /// Pump fixed-rate frames until the scheduler drains or the budget runs
    /// out. Returns the number of frames consumed.
    pub fn run_until_idle(&mut self, max_frames: u64) -> u64 {
        let mut frames = 0;
        while !self.scheduler.is_empty() && frames < max_frames {
            self.pump(self.clock.fixed_dt());
            frames += 1;
        }
        frames
    }
}
