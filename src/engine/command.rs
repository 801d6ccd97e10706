//! The engine's complete operator vocabulary.
//!
//! Every operator action other than continuous free-look input, whether it
//! comes from a key press, a remote control or a script, is a
//! `DollyCommand` passed to
//! [`CameraEngine::execute`](super::CameraEngine::execute).

/// A discrete operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DollyCommand {
    // ── Route recording ─────────────────────────────────────────────
    /// Record the current pose as the route start, discarding
    /// intermediate checkpoints.
    SetStart,

    /// Append the current pose as an intermediate checkpoint.
    AddCheckpoint,

    /// Record the current pose as the route end.
    SetEnd,

    /// Forget the recorded route.
    ClearCheckpoints,

    // ── Playback ────────────────────────────────────────────────────
    /// Play the recorded route. Restarts if already playing.
    StartPlayback,

    /// Stop playback and discard its pending updates.
    StopPlayback,

    // ── Modifiers ───────────────────────────────────────────────────
    /// Sprint modifier held / released.
    SetSprint(bool),

    /// Slow modifier held / released.
    SetSlow(bool),

    /// Let dolly playback drive rotation.
    SetFollowRotation(bool),

    /// Let dolly playback drive focus and lens values.
    SetAutoFocus(bool),
}

impl DollyCommand {
    /// Short human-readable name, for logs and overlays.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SetStart => "set start",
            Self::AddCheckpoint => "add checkpoint",
            Self::SetEnd => "set end",
            Self::ClearCheckpoints => "clear checkpoints",
            Self::StartPlayback => "start playback",
            Self::StopPlayback => "stop playback",
            Self::SetSprint(_) => "sprint",
            Self::SetSlow(_) => "slow",
            Self::SetFollowRotation(_) => "follow rotation",
            Self::SetAutoFocus(_) => "auto focus",
        }
    }
}
