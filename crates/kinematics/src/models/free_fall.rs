//! Free fall from rest, with optional lossy bounces.

use raster::Color;
use serde::{Deserialize, Serialize};

use super::{Kinematic, MotionState, STANDARD_GRAVITY};
use crate::error::{Check, Result};
use crate::force::{Force, ForceKind};
use crate::object::SimulatedObject;
use crate::vector::{Point, Vector};

/// Rebound speed (m/s) below which a bouncing object comes to rest.
pub const STOP_SPEED: f64 = 0.5;

/// Upper bound on scheduled bounces; reached only for losses very near 1.
const MAX_BOUNCES: usize = 4096;

const BALL_RADIUS: f64 = 10.0;

/// Free fall parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeFallParams {
    /// Drop height in meters.
    #[serde(alias = "height")]
    pub h0: f64,
    pub g: f64,
    pub mass: f64,
    /// Horizontal position of the drop, in meters.
    pub x0: f64,
    pub bounce: bool,
    /// Fraction of the impact speed kept on each rebound.
    #[serde(alias = "bounceLoss")]
    pub bounce_loss: f64,
}

impl Default for FreeFallParams {
    fn default() -> Self {
        Self {
            h0: 10.0,
            g: STANDARD_GRAVITY,
            mass: 1.0,
            x0: 5.0,
            bounce: false,
            bounce_loss: 0.8,
        }
    }
}

/// One ballistic hop after a rebound.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Hop {
    start: f64,
    launch_speed: f64,
}

/// Free fall: `y(t) = h0 - g t² / 2`, `vy = -g t`.
///
/// With bouncing enabled the flight is a precomputed schedule of hops, each
/// launched at the previous impact speed times `bounce_loss`, so any time
/// can be evaluated in closed form.
///
/// # Example
///
/// ```rust
/// use kinematics::{FreeFall, FreeFallParams};
///
/// let model = FreeFall::new(FreeFallParams { h0: 20.0, ..Default::default() }).unwrap();
/// assert!((model.end_time() - 2.0203).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FreeFall {
    params: FreeFallParams,
    first_impact: f64,
    hops: Vec<Hop>,
    end_time: f64,
}

impl FreeFall {
    /// Validates the parameters and schedules the bounces.
    pub fn new(params: FreeFallParams) -> Result<Self> {
        let check = Check("free_fall");
        check.non_negative("h0", params.h0)?;
        check.positive("g", params.g)?;
        check.positive("mass", params.mass)?;
        check.finite("x0", params.x0)?;
        if params.bounce {
            check.unit_interval("bounce_loss", params.bounce_loss)?;
        }

        let g = params.g;
        let first_impact = (2.0 * params.h0 / g).sqrt();
        let mut hops = Vec::new();
        let mut end_time = first_impact;
        if params.bounce {
            let mut speed = g * first_impact * params.bounce_loss;
            while speed >= STOP_SPEED && hops.len() < MAX_BOUNCES {
                hops.push(Hop {
                    start: end_time,
                    launch_speed: speed,
                });
                end_time += 2.0 * speed / g;
                speed *= params.bounce_loss;
            }
        }

        Ok(Self {
            params,
            first_impact,
            hops,
            end_time,
        })
    }

    pub const fn params(&self) -> &FreeFallParams {
        &self.params
    }

    /// Time of the first ground contact.
    pub const fn first_impact_time(&self) -> f64 {
        self.first_impact
    }

    /// Time at which the object comes to rest.
    pub const fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Number of rebounds before coming to rest.
    pub fn bounce_count(&self) -> usize {
        self.hops.len()
    }

    /// Height and vertical velocity at time `t` (already clamped).
    fn vertical_state(&self, t: f64) -> (f64, f64) {
        let g = self.params.g;
        let hop = self
            .hops
            .iter()
            .rev()
            .find(|hop| t >= hop.start);
        match hop {
            Some(hop) => {
                let tau = t - hop.start;
                (
                    hop.launch_speed * tau - 0.5 * g * tau * tau,
                    hop.launch_speed - g * tau,
                )
            }
            None => (self.params.h0 - 0.5 * g * t * t, -g * t),
        }
    }
}

impl Kinematic for FreeFall {
    fn initial_object(&self) -> SimulatedObject {
        SimulatedObject::circle(
            Point::new(self.params.x0, self.params.h0),
            self.params.mass,
            BALL_RADIUS,
            Color::RED,
        )
        .with_acceleration(Vector::new(0.0, -self.params.g))
    }

    fn evaluate(&self, t: f64, state: &mut MotionState) {
        let t = t.clamp(0.0, self.end_time);
        let (y, vy) = self.vertical_state(t);
        state.object.position = Point::new(self.params.x0, y.max(0.0));
        state.object.velocity = Vector::new(0.0, vy);
        state.object.acceleration = Vector::new(0.0, -self.params.g);
        state.elapsed = t;
        state.terminal = t >= self.end_time;
    }

    fn forces(&self, object: &SimulatedObject) -> Vec<Force> {
        let mut forces = vec![Force::gravity(object.mass, self.params.g)];
        if object.position.y <= 0.0 {
            forces.push(Force::new(
                ForceKind::Normal,
                Vector::new(0.0, object.mass * self.params.g),
            ));
        }
        forces
    }
}
