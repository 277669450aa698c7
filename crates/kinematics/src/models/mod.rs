//! The five closed-form kinematic models.
//!
//! Every model evaluates position, velocity and acceleration directly from
//! the total elapsed time, so stepping with any `dt` (or seeking) lands on
//! exactly the same state. Time past a model's terminal instant is clamped
//! to that instant.

mod free_fall;
mod projectile;
mod uniform;
mod uniform_acceleration;
mod uniform_circular;

pub use free_fall::{FreeFall, FreeFallParams, STOP_SPEED};
pub use projectile::{Projectile, ProjectileParams, ProjectileSummary};
pub use uniform::{UniformVelocity, UniformVelocityParams};
pub use uniform_acceleration::{UniformAcceleration, UniformAccelerationParams};
pub use uniform_circular::{UniformCircular, UniformCircularParams};

use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::object::SimulatedObject;
use crate::vector::Point;

/// Standard gravity in m/s², the default for every gravity-driven model.
pub const STANDARD_GRAVITY: f64 = 9.8;

/// Values recorded alongside a key point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPointData {
    /// Time at which the point is reached, in seconds.
    pub time: f64,
    /// Height above the ground, in meters.
    pub height: f64,
    /// Speed at the point, in m/s.
    pub speed: f64,
}

/// An annotated point on the trajectory, recorded at most once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub position: Point,
    pub label: String,
    pub data: KeyPointData,
}

/// Mutable state a model writes on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// The simulated object.
    pub object: SimulatedObject,
    /// Elapsed time the object state corresponds to, after clamping.
    pub elapsed: f64,
    /// Set once the model's own end condition holds.
    pub terminal: bool,
    /// Key points recorded so far.
    pub key_points: Vec<KeyPoint>,
}

impl MotionState {
    /// Fresh state at `t = 0`.
    pub const fn new(object: SimulatedObject) -> Self {
        Self {
            object,
            elapsed: 0.0,
            terminal: false,
            key_points: Vec::new(),
        }
    }

    /// Returns true if a key point with this label was already recorded.
    pub fn has_key_point(&self, label: &str) -> bool {
        self.key_points.iter().any(|k| k.label == label)
    }
}

/// Operations shared by every kinematic model.
pub trait Kinematic {
    /// The object at `t = 0`.
    fn initial_object(&self) -> SimulatedObject;

    /// Evaluates the closed form at absolute time `t` (seconds, `t >= 0`)
    /// and writes the result into `state`.
    ///
    /// Implementations clamp `t` to their terminal instant, set
    /// `state.terminal` once it is reached, and record key points they
    /// pass.
    fn evaluate(&self, t: f64, state: &mut MotionState);

    /// Forces acting on `object`, for force diagrams and readouts.
    fn forces(&self, object: &SimulatedObject) -> Vec<Force>;

    /// Trail sampling cadence in seconds, when the model needs a denser
    /// trail than the configured default.
    fn trail_cadence(&self) -> Option<f64> {
        None
    }
}
