#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::float_cmp)]
#![allow(clippy::struct_field_names)]

//! # Kinematics
//!
//! Closed-form models of idealized 2D motion, evaluated from elapsed time.
//!
//! Kinematics provides:
//! - **FreeFall**: a drop from rest, optionally bouncing with energy loss
//! - **Projectile**: an oblique throw from a launch height, with apex and landing facts
//! - **UniformVelocity**: straight-line motion at constant velocity
//! - **UniformAcceleration**: a pull against kinetic friction along a floor
//! - **UniformCircular**: constant-speed motion around a center, held by static friction
//!
//! Every model computes position, velocity and acceleration from the total
//! elapsed time, never by integrating frame deltas, so stepping and seeking
//! agree exactly and a reset run reproduces the same samples.
//!
//! ## Example
//!
//! ```rust
//! use kinematics::{fps, Model, MotionKind, MotionParams};
//!
//! let params: MotionParams = MotionParams::defaults(MotionKind::FreeFall);
//! let mut model = Model::from_params(params).unwrap();
//!
//! // Step at 60 FPS until the object lands
//! while !model.is_terminal() {
//!     model.advance(fps(60));
//! }
//!
//! let landed = model.object();
//! assert_eq!(landed.position.y, 0.0);
//! assert!(landed.velocity.y < -13.0);
//! ```
//!
//! ## Units
//!
//! Positions are meters with y pointing up, times are seconds, angles for
//! projectiles are degrees and angles for circular motion are radians.
//! Object glyph sizes are pixels.

mod error;
mod force;
mod model;
pub mod models;
mod object;
mod vector;

pub use error::{ParameterError, Result, UnknownMotionKind};
pub use force::{Force, ForceKind};
pub use model::{Decoration, Model, Motion, MotionKind, MotionParams, fps};
pub use models::{
    FreeFall, FreeFallParams, KeyPoint, KeyPointData, Kinematic, MotionState, Projectile,
    ProjectileParams, ProjectileSummary, STANDARD_GRAVITY, UniformAcceleration,
    UniformAccelerationParams, UniformCircular, UniformCircularParams, UniformVelocity,
    UniformVelocityParams,
};
pub use object::{Shape, SimulatedObject};
pub use vector::{Point, Vector};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::model::{Model, MotionKind, MotionParams, fps};
    pub use crate::models::Kinematic;
    pub use crate::vector::{Point, Vector};
}
