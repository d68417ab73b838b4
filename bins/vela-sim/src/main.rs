// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vela headless simulator (vela-sim)
//!
//! Builds one of the demo scenes, steps it for a fixed number of frames, and
//! logs positions, contacts, and trigger transitions.
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use vela_physics::{PhysicsSettings, Scene, StepReport};

mod scenarios;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// A crate dropped onto a floor until it rests.
    Drop,
    /// Two equal boxes colliding head-on.
    Bounce,
    /// A body gliding through a trigger volume.
    Triggers,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[clap(short, long, default_value_t = 240)]
    frames: u32,

    /// Frame delta time in seconds
    #[clap(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON file with physics settings (missing fields use defaults)
    #[clap(short, long)]
    settings: Option<PathBuf>,

    /// Demo scene to run
    #[clap(long, value_enum, default_value_t = Scenario::Drop)]
    scenario: Scenario,

    /// Maximum log level
    #[clap(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn load_settings(path: Option<&PathBuf>) -> Result<PhysicsSettings> {
    let Some(path) = path else {
        return Ok(PhysicsSettings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    PhysicsSettings::from_json_str(&json)
        .with_context(|| format!("parsing settings from {}", path.display()))
}

fn log_report(frame: u32, report: &StepReport) {
    for event in &report.entered {
        info!(frame, collider = %event.collider, other = %event.other, "enter");
    }
    for event in &report.exited {
        info!(frame, collider = %event.collider, other = %event.other, "exit");
    }
    for hit in &report.collisions {
        debug!(
            frame,
            body = %hit.body,
            other = %hit.other,
            normal = ?hit.normal.to_array(),
            resting = hit.resting,
            "contact"
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("setting default subscriber failed: {e}"))?;

    let settings = load_settings(args.settings.as_ref())?;
    info!(?settings, scenario = ?args.scenario, frames = args.frames, dt = args.dt, "starting");

    let mut scene = Scene::new(settings)?;
    let tracked = match args.scenario {
        Scenario::Drop => scenarios::drop_crate(&mut scene)?,
        Scenario::Bounce => scenarios::bounce(&mut scene)?,
        Scenario::Triggers => scenarios::triggers(&mut scene)?,
    };

    for frame in 0..args.frames {
        let report = scene.update(args.dt)?;
        log_report(frame, &report);
    }

    for id in tracked {
        let node = scene.node(id)?;
        let position = scene.global_position(id)?;
        let velocity = node.body().map(|b| b.velocity().to_array());
        info!(
            node = node.name(),
            position = ?position.to_array(),
            ?velocity,
            "final state"
        );
    }
    Ok(())
}
