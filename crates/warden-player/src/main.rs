//! Warden Player - headless player binary
//!
//! Replays an input script through the first-person controller and logs
//! where the player ended up.
//!
//! Usage:
//!   warden-player [--config <controller.toml>] [--script <script.toml>] [--frames <n>]

use anyhow::{Context, Result};
use clap::Parser;
use warden_controller::ControllerConfig;
use warden_player::{load_config, Script, Simulation};
use warden_runtime::{init_logging, InputConfig};

#[derive(Parser)]
#[command(name = "warden-player")]
#[command(about = "Warden player - replay input scripts through the first-person controller")]
struct Args {
    /// Controller config: [capabilities], [speeds], [input] and [actions] tables
    #[arg(long)]
    config: Option<String>,

    /// Input script to replay
    #[arg(long)]
    script: Option<String>,

    /// Run at least this many frames, idling after the script ends
    #[arg(long)]
    frames: Option<u64>,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log);

    let (config, input_config) = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load controller config: {}", path))?,
        None => (ControllerConfig::default(), InputConfig::default()),
    };

    let script = match &args.script {
        Some(path) => {
            Script::load(path).with_context(|| format!("Failed to load script: {}", path))?
        }
        None => Script::default(),
    };

    tracing::info!(
        steps = script.steps.len(),
        frames = script.frame_count(),
        actuators = script.actuators.len(),
        "Loaded script"
    );

    let mut sim = Simulation::new(config, &input_config, &script)
        .context("Failed to set up simulation")?;
    sim.run_script(&script, args.frame_dt)
        .context("Script replay failed")?;
    if let Some(frames) = args.frames {
        sim.run_idle_until(frames, args.frame_dt)?;
    }

    let report = sim.finish()?;
    tracing::info!(
        frames = report.frames,
        fixed_steps = report.fixed_steps,
        x = report.position.x,
        y = report.position.y,
        z = report.position.z,
        yaw = report.yaw,
        pitch = report.pitch,
        mode = ?report.mode,
        position_events = report.position_events,
        "Simulation finished"
    );
    if let Some((u, v)) = report.map_marker {
        tracing::info!(u, v, "Map marker");
    }
    for actuator in &report.actuators {
        tracing::info!(
            channel = %actuator.channel,
            open = actuator.is_open,
            plays = actuator.plays,
            "Actuator"
        );
    }

    Ok(())
}
