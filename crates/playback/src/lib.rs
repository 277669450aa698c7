#![forbid(unsafe_code)]
// Frame drawing converts small integer counts to pixel offsets.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::use_self)]

//! # Playback
//!
//! Animation lifecycle and dispatch for closed-form kinematics problems.
//!
//! Playback provides:
//! - **Visualizer**: loads a description onto a drawing surface, picks the
//!   model, fits the scale, and forwards transport calls and events
//! - **Animation**: the Stopped/Playing/Paused/Ended state machine, driven
//!   by an explicit [`Animation::tick`] from the host's refresh loop
//! - **Render pass**: grid, axes, trail, key points, velocity and force
//!   arrows, and the projectile results panel
//! - **normalize**: maps legacy payloads onto [`AnimationDescription`]
//! - **Simulator**: a headless frame loop for tests and batch rendering
//!
//! ## Example
//!
//! ```rust
//! use playback::{AnimationConfig, EndReason, Event, Visualizer};
//! use raster::RecordingSurface;
//! use serde_json::json;
//!
//! let mut vis = Visualizer::new(RecordingSurface::new(800, 600), AnimationConfig::default()).unwrap();
//! vis.load_value(&json!({
//!     "subtype": "projectile_motion",
//!     "parameters": { "v0": 15, "angle": 30 },
//!     "solution_steps": [{ "title": "Climb", "animation_time": [0, 0.5] }]
//! }))
//! .unwrap();
//!
//! vis.subscribe(|event| {
//!     if let Event::Ended { reason, .. } = event {
//!         assert_eq!(*reason, EndReason::Analytic);
//!     }
//! });
//!
//! vis.play_step(0).unwrap();
//! while vis.wants_frame() {
//!     vis.tick();
//! }
//! assert!((vis.readout().unwrap().time - 0.5).abs() < 1e-9);
//! ```

mod adapter;
mod animation;
mod clock;
mod config;
mod description;
mod error;
mod event;
mod readout;
mod render;
mod simulator;
mod visualizer;

pub use adapter::normalize;
pub use animation::{Animation, TickOutcome};
pub use clock::{AnimationClock, PlaybackState, Trail};
pub use config::AnimationConfig;
pub use description::{AnimationDescription, ResolvedParams, SolutionStep, parse_params};
pub use error::{Error, Result};
pub use event::{EndReason, Event, ListenerId, Listeners};
pub use readout::{CircularReading, Readout};
pub use render::{Frame, draw_frame, tick_step};
pub use simulator::{SimulationStats, Simulator};
pub use visualizer::{LoadOutcome, Visualizer};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::animation::{Animation, TickOutcome};
    pub use crate::clock::PlaybackState;
    pub use crate::config::AnimationConfig;
    pub use crate::description::{AnimationDescription, SolutionStep};
    pub use crate::event::{EndReason, Event};
    pub use crate::visualizer::Visualizer;
}
