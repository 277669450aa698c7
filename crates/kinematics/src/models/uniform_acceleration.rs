//! One-dimensional pull along a rough floor.

use raster::Color;
use serde::{Deserialize, Serialize};

use super::{Kinematic, MotionState, STANDARD_GRAVITY};
use crate::error::{Check, Result};
use crate::force::{Force, ForceKind};
use crate::object::SimulatedObject;
use crate::vector::{Point, Vector};

const BALL_RADIUS: f64 = 10.0;

/// Uniform acceleration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformAccelerationParams {
    /// Applied horizontal force in newtons.
    #[serde(rename = "F", alias = "force")]
    pub force: f64,
    /// Kinetic friction coefficient.
    pub mu: f64,
    pub mass: f64,
    pub g: f64,
    pub x0: f64,
    pub v0: f64,
    pub duration: f64,
}

impl Default for UniformAccelerationParams {
    fn default() -> Self {
        Self {
            force: 10.0,
            mu: 0.2,
            mass: 1.0,
            g: STANDARD_GRAVITY,
            x0: 0.0,
            v0: 0.0,
            duration: 10.0,
        }
    }
}

/// Uniform acceleration on a horizontal floor:
///
/// ```text
/// Fn = m g
/// f  = mu Fn
/// a  = (F - f) / m
/// x(t) = x0 + v0 t + a t² / 2
/// ```
///
/// The acceleration keeps its sign for the whole run; a friction force
/// larger than the pull decelerates the object without stopping it.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformAcceleration {
    params: UniformAccelerationParams,
    normal: f64,
    friction: f64,
    acceleration: f64,
}

impl UniformAcceleration {
    pub fn new(params: UniformAccelerationParams) -> Result<Self> {
        let check = Check("uniform_acceleration");
        check.finite("F", params.force)?;
        check.non_negative("mu", params.mu)?;
        check.positive("mass", params.mass)?;
        check.positive("g", params.g)?;
        check.finite("x0", params.x0)?;
        check.finite("v0", params.v0)?;
        check.positive("duration", params.duration)?;

        let normal = params.mass * params.g;
        let friction = params.mu * normal;
        Ok(Self {
            params,
            normal,
            friction,
            acceleration: (params.force - friction) / params.mass,
        })
    }

    pub const fn params(&self) -> &UniformAccelerationParams {
        &self.params
    }

    /// Normal force `Fn` in newtons.
    pub const fn normal_force(&self) -> f64 {
        self.normal
    }

    /// Friction force magnitude `f` in newtons.
    pub const fn friction_force(&self) -> f64 {
        self.friction
    }

    /// Net acceleration in m/s².
    pub const fn acceleration(&self) -> f64 {
        self.acceleration
    }
}

impl Kinematic for UniformAcceleration {
    fn initial_object(&self) -> SimulatedObject {
        SimulatedObject::circle(
            Point::new(self.params.x0, 0.0),
            self.params.mass,
            BALL_RADIUS,
            Color::PURPLE,
        )
        .with_velocity(Vector::new(self.params.v0, 0.0))
        .with_acceleration(Vector::new(self.acceleration, 0.0))
    }

    fn evaluate(&self, t: f64, state: &mut MotionState) {
        let t = t.clamp(0.0, self.params.duration);
        let (x0, v0, a) = (self.params.x0, self.params.v0, self.acceleration);
        state.object.position = Point::new(x0 + v0 * t + 0.5 * a * t * t, 0.0);
        state.object.velocity = Vector::new(v0 + a * t, 0.0);
        state.object.acceleration = Vector::new(a, 0.0);
        state.elapsed = t;
        state.terminal = t >= self.params.duration;
    }

    fn forces(&self, object: &SimulatedObject) -> Vec<Force> {
        vec![
            Force::new(ForceKind::Applied, Vector::new(self.params.force, 0.0)),
            Force::new(ForceKind::Friction, Vector::new(-self.friction, 0.0)),
            Force::new(ForceKind::Normal, Vector::new(0.0, self.normal)),
            Force::gravity(object.mass, self.params.g),
        ]
    }
}
