// demos.rs
//
// The same ball journey written three ways on the scheduler, plus the
// endless wander journey. Each demo renews or spawns its ball and ties
// its task's liveness to that ball, so destroying the ball retires the
// task without touching the scheduler.

use std::rc::Rc;

use glam::Vec2;

use framestep::{next_frame, SchedulerError, StepOutcome};
use framestep_driver::{DemoRegistry, FrameDriver, LaunchOutcome};

use crate::config::DemoConfig;
use crate::motion::{Journey, Sweep};
use crate::rng::Rng;
use crate::stage::{ball_alive, BallColor, SharedStage};

/// Tag shared by the sweep demos. Launching one renews the tag, which
/// destroys the previous sweep's ball and retires its task via liveness.
pub const SWEEP_TAG: &str = "sweep-ball";
/// The wander ball keeps its own tag so sweep renewals leave it alone.
pub const WANDER_TAG: &str = "wander-ball";

/// Register every demo. Launch functions capture the stage and config.
pub fn build_registry(config: &DemoConfig, stage: &SharedStage) -> DemoRegistry {
    let mut registry = DemoRegistry::new();

    {
        let config = config.clone();
        let stage = Rc::clone(stage);
        registry.insert("sweep-blocking", move |driver: &mut FrameDriver| {
            launch_sweep_blocking(driver, &config, &stage)
        });
    }
    {
        let config = config.clone();
        let stage = Rc::clone(stage);
        registry.insert("sweep-stepped", move |driver: &mut FrameDriver| {
            launch_sweep_stepped(driver, &config, &stage)
        });
    }
    {
        let config = config.clone();
        let stage = Rc::clone(stage);
        registry.insert("sweep-future", move |driver: &mut FrameDriver| {
            launch_sweep_future(driver, &config, &stage)
        });
    }
    {
        let config = config.clone();
        let stage = Rc::clone(stage);
        registry.insert("wander", move |driver: &mut FrameDriver| {
            launch_wander(driver, &config, &stage)
        });
    }

    registry
}

/// One `run_to_completion` call: the whole sweep happens before this
/// function returns, and no frames pass while it does.
fn launch_sweep_blocking(
    driver: &mut FrameDriver,
    config: &DemoConfig,
    stage: &SharedStage,
) -> Result<LaunchOutcome, SchedulerError> {
    let id = stage.borrow_mut().renew(SWEEP_TAG, Vec2::ZERO);
    log::info!("sweep-blocking: ball {} takes the whole journey in one call", id.0);

    let mut sweep = Sweep::new(config.begin_x, config.end_x, config.step_x);
    let step_stage = Rc::clone(stage);
    let steps = driver.scheduler_mut().run_to_completion(
        move |_ctx| match sweep.advance() {
            Some(x) => {
                step_stage.borrow_mut().set_position(id, Vec2::new(x, 0.0));
                StepOutcome::Continue
            }
            None => StepOutcome::Done,
        },
        ball_alive(stage, id),
    );
    log::info!("sweep-blocking: finished in {} blocking steps", steps);
    Ok(LaunchOutcome::Finished { steps })
}

/// A step closure resumed once per tick: one sweep position per frame.
fn launch_sweep_stepped(
    driver: &mut FrameDriver,
    config: &DemoConfig,
    stage: &SharedStage,
) -> Result<LaunchOutcome, SchedulerError> {
    let id = stage.borrow_mut().renew(SWEEP_TAG, Vec2::ZERO);
    log::info!("sweep-stepped: ball {} sweeps one step per frame", id.0);

    let mut sweep = Sweep::new(config.begin_x, config.end_x, config.step_x);
    let step_stage = Rc::clone(stage);
    let handle = driver.scheduler_mut().submit(
        move |ctx| match sweep.advance() {
            Some(x) => {
                step_stage.borrow_mut().set_position(id, Vec2::new(x, 0.0));
                StepOutcome::Continue
            }
            None => {
                log::info!("sweep-stepped: done after {} position updates", ctx.step);
                StepOutcome::Done
            }
        },
        ball_alive(stage, id),
    )?;
    Ok(LaunchOutcome::Task(handle))
}

/// The same sweep as an async body: every `next_frame().await` costs one
/// frame, so motion lands at the same per-frame pace as the stepped form.
fn launch_sweep_future(
    driver: &mut FrameDriver,
    config: &DemoConfig,
    stage: &SharedStage,
) -> Result<LaunchOutcome, SchedulerError> {
    let id = stage.borrow_mut().renew(SWEEP_TAG, Vec2::ZERO);
    log::info!("sweep-future: ball {} sweeps via an async body", id.0);

    let mut sweep = Sweep::new(config.begin_x, config.end_x, config.step_x);
    let fut_stage = Rc::clone(stage);
    let handle = driver.scheduler_mut().submit_future(
        async move {
            loop {
                next_frame().await;
                match sweep.advance() {
                    Some(x) => {
                        fut_stage.borrow_mut().set_position(id, Vec2::new(x, 0.0));
                    }
                    None => break,
                }
            }
            log::info!("sweep-future: done");
        },
        ball_alive(stage, id),
    )?;
    Ok(LaunchOutcome::Task(handle))
}

/// Endless journey loop: pick a random target in a disc, travel there at
/// fixed speed while blue, rest gray for a while, repeat. Runs until the
/// ball is destroyed or the task is cancelled.
fn launch_wander(
    driver: &mut FrameDriver,
    config: &DemoConfig,
    stage: &SharedStage,
) -> Result<LaunchOutcome, SchedulerError> {
    let id = stage.borrow_mut().spawn(WANDER_TAG, Vec2::ZERO);
    log::info!("wander: ball {} starts roaming", id.0);

    let time = driver.scheduler().time();
    let mut rng = Rng::new(config.seed);
    let speed = config.speed;
    let radius = config.wander_radius;
    let pause = config.pause_secs;
    let fut_stage = Rc::clone(stage);
    let handle = driver.scheduler_mut().submit_future(
        async move {
            next_frame().await;
            loop {
                let Some(start) = fut_stage.borrow().position(id) else {
                    return;
                };
                let target = rng.in_disc(radius);
                let journey = Journey::new(start, target, speed);
                fut_stage.borrow_mut().set_color(id, BallColor::Blue);
                log::info!("wander: heading for ({:.2}, {:.2})", target.x, target.y);

                let depart = time.now();
                while !journey.arrived(time.now() - depart) {
                    let pos = journey.position_at(time.now() - depart);
                    fut_stage.borrow_mut().set_position(id, pos);
                    next_frame().await;
                }

                {
                    let mut stage = fut_stage.borrow_mut();
                    stage.set_position(id, journey.target());
                    stage.set_color(id, BallColor::Gray);
                }
                log::info!("wander: arrived, resting {:.1}s", pause);
                time.delay(pause).await;
            }
        },
        ball_alive(stage, id),
    )?;
    Ok(LaunchOutcome::Task(handle))
}
