//! Top-level camera engine: one owner for the producers, the recorded route
//! and the compositor, advanced once per frame.

mod command;

use std::sync::Arc;

pub use command::DollyCommand;

use crate::checkpoint::CheckpointRecorder;
use crate::compositor::PriorityCompositor;
use crate::free_look::{FreeLook, FreeLookInput};
use crate::options::Options;
use crate::path::{PathGenerator, PathObserver};
use crate::playback::{PlaybackEngine, PlaybackSettings};
use crate::pose::{Pose, PriorityTag, UpdateMessage};
use crate::speed::{SharedSpeed, SpeedModifier};
use crate::status::StatusSink;

/// Wires free-look input, dolly playback and the compositor into a single
/// per-frame [`tick`](Self::tick).
pub struct CameraEngine {
    options: Options,
    speed: Arc<SpeedModifier>,
    free_look: FreeLook,
    recorder: CheckpointRecorder,
    generator: PathGenerator,
    playback: Option<PlaybackEngine>,
    compositor: PriorityCompositor,
    path_observer: Box<dyn PathObserver>,
}

impl CameraEngine {
    /// Engine at `initial`, configured by `options`.
    #[must_use]
    pub fn new(options: Options, initial: &Pose) -> Self {
        let speed = Arc::new(SpeedModifier::new(&options.speed));
        let shared: SharedSpeed = speed.clone();
        let free_look =
            FreeLook::new(options.free_look.clone(), Arc::clone(&shared));
        let generator = PathGenerator::new(
            options.dolly.samples_per_segment,
            options.dolly.rotation_policy(),
        );
        let compositor = PriorityCompositor::new(initial, &options.compositor)
            .with_speed(shared);

        Self {
            options,
            speed,
            free_look,
            recorder: CheckpointRecorder::new(),
            generator,
            playback: None,
            compositor,
            path_observer: Box::new(()),
        }
    }

    /// Push a status snapshot to `sink` every tick.
    #[must_use]
    pub fn with_status_sink(mut self, sink: Box<dyn StatusSink>) -> Self {
        self.compositor.set_status_sink(sink);
        self
    }

    /// Report every generated path to `observer`.
    #[must_use]
    pub fn with_path_observer(mut self, observer: Box<dyn PathObserver>) -> Self {
        self.path_observer = observer;
        self
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Apply a discrete operator command.
    pub fn execute(&mut self, command: DollyCommand) {
        log::debug!("command: {}", command.label());
        match command {
            DollyCommand::SetStart => {
                self.recorder.set_start(self.compositor.current());
                log::info!("Dolly start set, end follows the camera");
            }
            DollyCommand::AddCheckpoint => {
                self.recorder.add_checkpoint(self.compositor.current());
                log::info!(
                    "Dolly checkpoint {} added",
                    self.recorder.checkpoints().len()
                );
            }
            DollyCommand::SetEnd => {
                self.recorder.set_end(self.compositor.current());
                log::info!("Dolly end set");
            }
            DollyCommand::ClearCheckpoints => {
                self.recorder.clear();
                log::info!("Dolly route cleared");
            }
            DollyCommand::StartPlayback => self.start_playback(),
            DollyCommand::StopPlayback => self.stop_playback(),
            DollyCommand::SetSprint(held) => self.speed.set_sprinting(held),
            DollyCommand::SetSlow(held) => self.speed.set_slowing(held),
            DollyCommand::SetFollowRotation(on) => {
                self.compositor.set_follow_rotation(on);
            }
            DollyCommand::SetAutoFocus(on) => {
                self.compositor.set_auto_focus(on);
            }
        }
    }

    fn start_playback(&mut self) {
        let Some(route) = self.recorder.route() else {
            log::warn!("Dolly route needs a start, ignoring");
            return;
        };
        self.recorder.freeze_end();
        if self.playback.is_some() {
            self.stop_playback();
        }

        let settings = PlaybackSettings::from_options(&self.options.dolly);
        let speed: SharedSpeed = self.speed.clone();
        let engine = if let [start, end] = route.as_slice() {
            PlaybackEngine::direct(start, end, settings, speed)
        } else {
            let samples = self
                .generator
                .generate_observed(&route, self.path_observer.as_mut());
            PlaybackEngine::along_path(
                samples,
                self.generator.policy(),
                settings,
                speed,
            )
        };
        self.playback = Some(engine);
    }

    fn stop_playback(&mut self) {
        if let Some(mut engine) = self.playback.take() {
            engine.cancel();
        }
        let dropped = self.compositor.clear_tier(PriorityTag::Dolly);
        if dropped > 0 {
            log::debug!("Discarded {dropped} pending dolly updates");
        }
    }

    // ── Frame loop ──────────────────────────────────────────────────

    /// Queue an update from an external producer (e.g. a remote control
    /// placing the camera). It competes with the built-in producers on the
    /// next tick.
    pub fn submit(&mut self, message: UpdateMessage) {
        self.compositor.submit(message);
    }

    /// Advance one frame of `dt` seconds and return the resulting pose.
    ///
    /// Order: free-look producer, dolly playback step, compositor tick.
    /// While the route end is being tracked it then follows the new pose.
    pub fn tick(&mut self, dt: f32, input: &FreeLookInput) -> &Pose {
        if let Some(message) =
            self.free_look.apply(self.compositor.current(), input, dt)
        {
            self.compositor.submit(message);
        }

        if let Some(engine) = self.playback.as_mut() {
            match engine.step(dt) {
                Some(message) => self.compositor.submit(message),
                None => self.playback = None,
            }
        }

        let _ = self.compositor.tick();
        self.recorder.track(self.compositor.current());
        self.compositor.current()
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// The authoritative pose as of the last tick.
    #[must_use]
    pub fn current_pose(&self) -> &Pose {
        self.compositor.current()
    }

    /// Whether a dolly playback is in progress, including its last pose
    /// still waiting in the compositor.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|engine| !engine.is_finished())
            || self.compositor.pending(PriorityTag::Dolly) > 0
    }

    /// The recorded route.
    #[must_use]
    pub fn recorder(&self) -> &CheckpointRecorder {
        &self.recorder
    }

    /// The compositor owning the current pose.
    #[must_use]
    pub fn compositor(&self) -> &PriorityCompositor {
        &self.compositor
    }

    /// Shared sprint/slow modifier.
    #[must_use]
    pub fn speed(&self) -> &Arc<SpeedModifier> {
        &self.speed
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply new options.
    ///
    /// Free-look, speed modifiers, path generation and the compositor flags
    /// switch over immediately; held sprint/slow inputs stay held. A running
    /// playback keeps the speed and easing it started with.
    pub fn set_options(&mut self, options: Options) {
        let speed = Arc::new(SpeedModifier::new(&options.speed));
        speed.set_sprinting(self.speed.is_sprinting());
        speed.set_slowing(self.speed.is_slowing());
        let shared: SharedSpeed = speed.clone();

        self.free_look =
            FreeLook::new(options.free_look.clone(), Arc::clone(&shared));
        self.generator = PathGenerator::new(
            options.dolly.samples_per_segment,
            options.dolly.rotation_policy(),
        );
        self.compositor.set_speed(shared);
        self.compositor
            .set_follow_rotation(options.compositor.follow_rotation);
        self.compositor.set_auto_focus(options.compositor.auto_focus);
        self.speed = speed;
        self.options = options;
        log::info!("Options updated");
    }
}

impl std::fmt::Debug for CameraEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraEngine")
            .field("recorder", &self.recorder)
            .field("playback", &self.playback)
            .field("compositor", &self.compositor)
            .finish_non_exhaustive()
    }
}
