//! Headless runner for the ball-journey demos.
//!
//! Runs the demo named by the first process argument, or all of them in
//! name order. Demos that never finish on their own are cancelled once the
//! configured frame budget runs out.

use std::fs;
use std::io;

use anyhow::{anyhow, Context};
use framestep_driver::{DemoRegistry, FrameDriver, LaunchOutcome};

mod config;
mod demos;
mod motion;
mod rng;
mod stage;

use config::DemoConfig;
use stage::{SharedStage, Stage};

/// Optional config file looked up in the working directory.
const CONFIG_PATH: &str = "ball-journey.json";

fn main() -> anyhow::Result<()> {
    // Log to stderr, info level unless RUST_LOG overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let stage = Stage::shared();
    let registry = demos::build_registry(&config, &stage);

    match std::env::args().nth(1) {
        Some(name) => run_demo(&registry, &name, &config, &stage)?,
        None => {
            for name in registry.names() {
                run_demo(&registry, name, &config, &stage)?;
            }
        }
    }
    Ok(())
}

/// Launch one demo on a fresh driver and see it through: drive live tasks
/// to completion or cancel them at the frame budget.
fn run_demo(
    registry: &DemoRegistry,
    name: &str,
    config: &DemoConfig,
    stage: &SharedStage,
) -> anyhow::Result<()> {
    let mut driver = FrameDriver::new(config.fixed_dt);
    let launched = registry
        .launch(name, &mut driver)
        .ok_or_else(|| anyhow!("no demo named '{name}'"))?;
    let outcome = launched.with_context(|| format!("launching '{name}'"))?;

    match outcome {
        LaunchOutcome::Finished { steps } => {
            log::info!("{name}: ran to completion in {steps} blocking steps");
        }
        LaunchOutcome::Task(handle) => {
            let frames = driver.run_until_idle(config.max_frames);
            if driver.scheduler().is_complete(handle) {
                log::info!("{name}: completed after {frames} frames");
            } else {
                driver.scheduler_mut().cancel(handle);
                driver.pump(config.fixed_dt);
                log::info!(
                    "{name}: frame budget ({}) spent, task cancelled (complete: {})",
                    config.max_frames,
                    driver.scheduler().is_complete(handle)
                );
            }
        }
    }

    let balls = stage.borrow();
    if balls.is_empty() {
        log::info!("{name}: stage is empty");
    } else {
        log::info!("{name}: {} ball(s) on stage", balls.len());
        for ball in balls.iter() {
            log::info!(
                "{name}: ball {} rests {:?} at ({:.2}, {:.2})",
                ball.id.0,
                ball.color,
                ball.pos.x,
                ball.pos.y
            );
        }
    }
    Ok(())
}

/// Read the optional JSON config. A missing file means defaults; a
/// malformed one is an error worth surfacing.
fn load_config() -> anyhow::Result<DemoConfig> {
    match fs::read_to_string(CONFIG_PATH) {
        Ok(text) => DemoConfig::from_json(&text).with_context(|| format!("parsing {CONFIG_PATH}")),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(DemoConfig::default()),
        Err(err) => Err(err).with_context(|| format!("reading {CONFIG_PATH}")),
    }
}
