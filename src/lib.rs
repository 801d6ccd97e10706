// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera path and pose-compositing engine.
//!
//! Dollycam turns operator input (free-look deltas, recorded checkpoints)
//! into a single camera [`Pose`](pose::Pose) per tick, and can replay a
//! smooth dolly path through recorded checkpoints.
//!
//! # Key entry points
//!
//! - [`engine::CameraEngine`] - wires one tick together: free-look producer,
//!   dolly playback, compositor
//! - [`path::PathGenerator`] - Hermite-sampled dense path through checkpoints
//! - [`playback::PlaybackEngine`] - constant-speed, eased traversal of a path
//! - [`compositor::PriorityCompositor`] - per-tier arbitration of pose updates
//! - [`options::Options`] - runtime configuration (dolly, compositor,
//!   free-look, speed modifiers)
//!
//! # Architecture
//!
//! Everything runs on the caller's thread, advanced once per frame with a
//! variable delta time. Producers never touch the authoritative pose: they
//! submit [`UpdateMessage`](pose::UpdateMessage)s tagged with a
//! [`PriorityTag`](pose::PriorityTag), and the compositor applies at most one
//! per tick, highest precedence first. Playback is a plain
//! `step(dt) -> Option<_>` state machine; dropping or cancelling it is enough
//! to stop it.

pub mod checkpoint;
pub mod compositor;
pub mod engine;
pub mod error;
pub mod free_look;
pub mod options;
pub mod path;
pub mod playback;
pub mod pose;
pub mod speed;
pub mod status;
pub mod util;
