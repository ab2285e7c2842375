//! # engine_app — collision playground
//!
//! Runs the simulation core headlessly: a row of balls under gravity inside
//! the world box, driven by a fixed-timestep tick loop.
//!
//! ## Startup Sequence
//!
//! 1. Load the optional JSON config and apply command-line overrides.
//! 2. Build and initialise the playground scene.
//! 3. Run the tick loop, then clean the scene up.

mod config;
mod playground;
mod tick;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use tick::TickLoop;

#[derive(Parser)]
#[command(name = "engine_app", about = "Headless sphere collision playground")]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run (0 = unlimited)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Number of balls to spawn
    #[arg(short, long)]
    balls: Option<usize>,

    /// Pace ticks in wall-clock time
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.tick.max_ticks = ticks;
    }
    if let Some(balls) = args.balls {
        config.balls = balls;
    }
    config.tick.realtime |= args.realtime;
    config.validate()?;

    info!(
        balls = config.balls,
        gravity = ?config.physics.gravity,
        mass_model = ?config.physics.mass_model,
        "playground starting"
    );

    let (scene, collisions) = playground::build(config.balls, config.physics)?;
    let mut tick_loop = TickLoop::new(config.tick, scene);
    tick_loop.run()?;

    let ticks = tick_loop.tick_id();
    let t = tick_loop.elapsed();
    let mut scene = tick_loop.into_scene();
    scene.cleanup()?;

    info!(ticks, t, collisions = collisions.get(), "playground shut down");
    Ok(())
}
