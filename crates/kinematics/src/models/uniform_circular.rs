//! Uniform circular motion on a flat, rough surface.

use raster::Color;
use serde::{Deserialize, Serialize};

use super::{Kinematic, MotionState, STANDARD_GRAVITY};
use crate::error::{Check, Result};
use crate::force::{Force, ForceKind};
use crate::object::SimulatedObject;
use crate::vector::{Point, Vector};

const BALL_RADIUS: f64 = 10.0;

/// Circular paths are sampled densely enough to look round.
const TRAIL_CADENCE: f64 = 0.05;

/// Uniform circular motion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformCircularParams {
    /// Path radius in meters.
    pub radius: f64,
    /// Angular velocity in rad/s; negative values run clockwise.
    pub omega: f64,
    pub mass: f64,
    /// Static friction coefficient supplying the centripetal force.
    pub mu: f64,
    pub g: f64,
    #[serde(alias = "centerX")]
    pub center_x: Option<f64>,
    #[serde(alias = "centerY")]
    pub center_y: Option<f64>,
    /// Starting angle in radians.
    #[serde(alias = "initialAngle")]
    pub initial_angle: f64,
    pub duration: f64,
}

impl Default for UniformCircularParams {
    fn default() -> Self {
        Self {
            radius: 5.0,
            omega: 1.0,
            mass: 1.0,
            mu: 0.5,
            g: STANDARD_GRAVITY,
            center_x: None,
            center_y: None,
            initial_angle: 0.0,
            duration: 10.0,
        }
    }
}

impl UniformCircularParams {
    /// Returns true when both center coordinates were given.
    pub const fn has_center(&self) -> bool {
        self.center_x.is_some() && self.center_y.is_some()
    }

    /// Fills in missing center coordinates.
    pub fn resolve_center(&mut self, default_x: f64, default_y: f64) {
        self.center_x.get_or_insert(default_x);
        self.center_y.get_or_insert(default_y);
    }
}

/// Uniform circular motion:
///
/// ```text
/// theta(t) = omega t + theta0
/// v  = r omega (tangential)
/// ac = v² / r (toward the center)
/// Fc = m v² / r, compared against f_max = mu m g
/// ```
///
/// A center left unresolved defaults to `(r, r)`, which keeps the whole
/// circle in the first quadrant.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformCircular {
    params: UniformCircularParams,
    center: Point,
    speed: f64,
    centripetal: f64,
    max_friction: f64,
}

impl UniformCircular {
    pub fn new(params: UniformCircularParams) -> Result<Self> {
        let check = Check("uniform_circular");
        check.positive("radius", params.radius)?;
        check.non_zero("omega", params.omega)?;
        check.positive("mass", params.mass)?;
        check.non_negative("mu", params.mu)?;
        check.positive("g", params.g)?;
        check.finite("initial_angle", params.initial_angle)?;
        check.positive("duration", params.duration)?;
        let center = Point::new(
            check.finite("center_x", params.center_x.unwrap_or(params.radius))?,
            check.finite("center_y", params.center_y.unwrap_or(params.radius))?,
        );

        let speed = params.radius * params.omega;
        Ok(Self {
            params,
            center,
            speed,
            centripetal: params.mass * speed * speed / params.radius,
            max_friction: params.mu * params.mass * params.g,
        })
    }

    pub const fn params(&self) -> &UniformCircularParams {
        &self.params
    }

    pub const fn center(&self) -> Point {
        self.center
    }

    pub const fn radius(&self) -> f64 {
        self.params.radius
    }

    /// Tangential speed `|r omega|`.
    pub fn speed(&self) -> f64 {
        self.speed.abs()
    }

    /// Required centripetal force `m v² / r`.
    pub const fn centripetal_force(&self) -> f64 {
        self.centripetal
    }

    /// Maximum static friction `mu m g`.
    pub const fn max_friction(&self) -> f64 {
        self.max_friction
    }

    /// Whether friction can supply the required centripetal force.
    pub fn is_sustainable(&self) -> bool {
        self.centripetal <= self.max_friction
    }

    fn angle_at(&self, t: f64) -> f64 {
        self.params.omega.mul_add(t, self.params.initial_angle)
    }
}

impl Kinematic for UniformCircular {
    fn initial_object(&self) -> SimulatedObject {
        let mut state = MotionState::new(SimulatedObject::circle(
            self.center,
            self.params.mass,
            BALL_RADIUS,
            Color::CYAN,
        ));
        self.evaluate(0.0, &mut state);
        state.object
    }

    fn evaluate(&self, t: f64, state: &mut MotionState) {
        let t = t.clamp(0.0, self.params.duration);
        let (sin, cos) = self.angle_at(t).sin_cos();
        let r = self.params.radius;
        let ac = self.speed * self.speed / r;
        state.object.position = self.center + Vector::new(r * cos, r * sin);
        state.object.velocity = Vector::new(-self.speed * sin, self.speed * cos);
        state.object.acceleration = Vector::new(-ac * cos, -ac * sin);
        state.elapsed = t;
        state.terminal = t >= self.params.duration;
    }

    fn forces(&self, object: &SimulatedObject) -> Vec<Force> {
        let inward = (self.center - object.position).normalized();
        let friction = self.centripetal.min(self.max_friction);
        let weight = object.mass * self.params.g;
        vec![
            Force::new(ForceKind::Centripetal, inward * self.centripetal),
            Force::new(ForceKind::Friction, inward * friction),
            Force::new(ForceKind::Normal, Vector::new(0.0, weight)),
            Force::gravity(object.mass, self.params.g),
        ]
    }

    fn trail_cadence(&self) -> Option<f64> {
        Some(TRAIL_CADENCE)
    }
}
