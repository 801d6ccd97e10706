//! Headless dolly demo: records a three-checkpoint route and plays it back
//! at a fixed 60 Hz tick.
//!
//! Usage: `dollycam [options.toml]`. Set `RUST_LOG=debug` to see every
//! status snapshot.

use dollycam::engine::{CameraEngine, DollyCommand};
use dollycam::error::DollyError;
use dollycam::free_look::FreeLookInput;
use dollycam::options::Options;
use dollycam::pose::{Pose, UpdateMessage};
use dollycam::status::{LogStatus, StatusSnapshot};
use glam::{Quat, Vec3};

const TICK: f32 = 1.0 / 60.0;
const MAX_TICKS: usize = 60 * 600;

fn load_options(path: Option<&str>) -> Result<Options, DollyError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Options::from_toml_str(&content)
        }
        None => Ok(Options::default()),
    }
}

/// Place the camera at `pose` and record it with `command`.
fn record(engine: &mut CameraEngine, pose: Pose, command: DollyCommand) {
    engine.submit(UpdateMessage::free_look(pose));
    let _ = engine.tick(TICK, &FreeLookInput::default());
    engine.execute(command);
}

fn main() {
    env_logger::init();

    let options = match load_options(std::env::args().nth(1).as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Dolly speed {} ({}), {} samples per segment",
        options.dolly.speed,
        options.dolly.easing,
        options.dolly.samples_per_segment
    );

    let start = Pose::new(Vec3::new(0.0, 1.5, 0.0), Quat::IDENTITY, 60.0);
    let mut engine = CameraEngine::new(options, &start)
        .with_status_sink(Box::new(LogStatus));

    record(&mut engine, start.clone(), DollyCommand::SetStart);
    record(
        &mut engine,
        Pose::new(
            Vec3::new(8.0, 2.0, -6.0),
            Quat::from_rotation_y(45f32.to_radians()),
            50.0,
        )
        .with_focus_distance(6.0),
        DollyCommand::AddCheckpoint,
    );
    record(
        &mut engine,
        Pose::new(
            Vec3::new(12.0, 4.0, 2.0),
            Quat::from_rotation_y(100f32.to_radians())
                * Quat::from_rotation_x(-10f32.to_radians()),
            35.0,
        )
        .with_focus_distance(10.0)
        .with_lens(85.0, 2.0),
        DollyCommand::SetEnd,
    );

    // Back to the start, then let the dolly drive everything.
    engine.submit(UpdateMessage::free_look(start));
    engine.execute(DollyCommand::SetFollowRotation(true));
    engine.execute(DollyCommand::SetAutoFocus(true));
    engine.execute(DollyCommand::StartPlayback);

    let idle = FreeLookInput::default();
    let mut ticks = 0;
    while engine.is_playing() && ticks < MAX_TICKS {
        let _ = engine.tick(TICK, &idle);
        ticks += 1;
    }

    let status = StatusSnapshot::from_pose(engine.current_pose(), None, 1.0);
    log::info!(
        "Dolly finished after {ticks} ticks ({:.2} s)\n{status}",
        ticks as f32 * TICK
    );
}
