// future.rs
//
// Async submission: a future driven at one poll per tick.
//
// Wakers are inert. The scheduler resumes every live task on every tick
// anyway, so readiness notification has no role here; `Pending` simply
// means "try again next tick". A future that parks itself waiting for a
// real waker would never be woken and does not belong on this scheduler.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use crate::clock::FrameTime;
use crate::error::SchedulerError;
use crate::scheduler::FrameScheduler;
use crate::task::{StepOutcome, TaskHandle};

impl FrameScheduler {
    /// Submit an async task. The future is polled exactly once per tick:
    /// `Pending` suspends it until the next tick, `Ready` completes the
    /// task. The liveness predicate is checked before every poll, same as
    /// for step functions.
    pub fn submit_future<F>(
        &mut self,
        future: F,
        is_alive: impl Fn() -> bool + 'static,
    ) -> Result<TaskHandle, SchedulerError>
    where
        F: Future<Output = ()> + 'static,
    {
        let mut future = Box::pin(future);
        self.submit(
            move |_ctx| match poll_once(future.as_mut()) {
                Poll::Ready(()) => StepOutcome::Done,
                Poll::Pending => StepOutcome::Continue,
            },
            is_alive,
        )
    }
}

/// Poll a future once with an inert waker.
fn poll_once<F: Future + ?Sized>(future: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    future.poll(&mut cx)
}

/// Suspend until the next tick. The frame-loop analogue of a bare yield.
pub fn next_frame() -> NextFrame {
    NextFrame { yielded: false }
}

/// Future returned by [`next_frame`]: pending exactly once.
#[derive(Debug)]
pub struct NextFrame {
    yielded: bool,
}

impl Future for NextFrame {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            Poll::Pending
        }
    }
}

/// Future returned by [`FrameTime::delay`]: pending until the scheduler
/// clock passes a deadline measured from the first poll.
#[derive(Debug)]
pub struct Delay {
    time: FrameTime,
    secs: f32,
    deadline: Option<f32>,
}

impl Delay {
    pub(crate) fn new(time: FrameTime, secs: f32) -> Self {
        Self {
            time,
            secs,
            deadline: None,
        }
    }
}

impl Future for Delay {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        let now = self.time.now();
        let secs = self.secs;
        let deadline = *self.deadline.get_or_insert(now + secs);
        if now >= deadline {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeSample;
    use std::cell::Cell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn next_frame_is_pending_exactly_once() {
        let mut fut = next_frame();
        assert_eq!(poll_once(Pin::new(&mut fut)), Poll::Pending);
        assert_eq!(poll_once(Pin::new(&mut fut)), Poll::Ready(()));
    }

    #[test]
    fn future_with_n_yields_completes_after_n_plus_one_ticks() {
        let mut sched = FrameScheduler::new();
        let handle = sched
            .submit_future(
                async {
                    next_frame().await;
                    next_frame().await;
                },
                || true,
            )
            .unwrap();

        sched.tick(DT);
        sched.tick(DT);
        assert!(!sched.is_complete(handle));
        sched.tick(DT);
        assert!(sched.is_complete(handle));
    }

    #[test]
    fn future_side_effects_land_once_per_tick() {
        let hits = Rc::new(Cell::new(0u32));
        let mut sched = FrameScheduler::new();
        let counter = Rc::clone(&hits);
        sched
            .submit_future(
                async move {
                    for _ in 0..3 {
                        counter.set(counter.get() + 1);
                        next_frame().await;
                    }
                },
                || true,
            )
            .unwrap();

        sched.tick(DT);
        assert_eq!(hits.get(), 1);
        sched.tick(DT);
        assert_eq!(hits.get(), 2);
        sched.tick(DT);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn dead_target_stops_the_future_between_polls() {
        let alive = Rc::new(Cell::new(true));
        let resumed = Rc::new(Cell::new(false));

        let mut sched = FrameScheduler::new();
        let flag = Rc::clone(&resumed);
        let alive_probe = Rc::clone(&alive);
        let handle = sched
            .submit_future(
                async move {
                    next_frame().await;
                    flag.set(true);
                },
                move || alive_probe.get(),
            )
            .unwrap();

        sched.tick(DT);
        alive.set(false);
        sched.tick(DT);

        assert!(!resumed.get(), "future must not resume after its target died");
        assert!(sched.is_complete(handle));
    }

    #[test]
    fn delay_holds_until_the_clock_passes_the_deadline() {
        let time = FrameTime::default();
        time.publish(TimeSample {
            now: 1.0,
            dt: 0.0,
            tick: 1,
        });

        let mut delay = time.delay(0.5);
        assert_eq!(poll_once(Pin::new(&mut delay)), Poll::Pending);

        time.publish(TimeSample {
            now: 1.4,
            dt: 0.0,
            tick: 2,
        });
        assert_eq!(poll_once(Pin::new(&mut delay)), Poll::Pending);

        time.publish(TimeSample {
            now: 1.5,
            dt: 0.0,
            tick: 3,
        });
        assert_eq!(poll_once(Pin::new(&mut delay)), Poll::Ready(()));
    }

    #[test]
    fn zero_delay_resolves_on_the_first_poll() {
        let time = FrameTime::default();
        let mut delay = time.delay(0.0);
        assert_eq!(poll_once(Pin::new(&mut delay)), Poll::Ready(()));
    }

    #[test]
    fn delay_measures_from_its_first_poll() {
        let mut sched = FrameScheduler::new();
        let time = sched.time();
        let done_tick = Rc::new(Cell::new(0u64));

        let report_tick = Rc::clone(&done_tick);
        let task_time = time.clone();
        sched
            .submit_future(
                async move {
                    task_time.delay(0.05).await;
                    report_tick.set(task_time.tick());
                },
                || true,
            )
            .unwrap();

        // dt 0.02: first poll at now=0.02 sets deadline 0.07, which the
        // clock passes on tick 4 (now=0.08).
        for _ in 0..4 {
            sched.tick(0.02);
        }
        assert_eq!(done_tick.get(), 4);
        assert!(sched.is_empty());
    }
}
