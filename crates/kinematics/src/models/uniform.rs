//! Straight-line motion at constant velocity.

use raster::Color;
use serde::{Deserialize, Serialize};

use super::{Kinematic, MotionState, STANDARD_GRAVITY};
use crate::error::{Check, Result};
use crate::force::{Force, ForceKind};
use crate::object::SimulatedObject;
use crate::vector::{Point, Vector};

const BALL_RADIUS: f64 = 10.0;

/// Uniform velocity parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformVelocityParams {
    pub vx: f64,
    pub vy: f64,
    pub x0: f64,
    pub y0: f64,
    pub mass: f64,
    /// Gravity used for the weight/support balance in force diagrams.
    pub g: f64,
    /// Run length in seconds; the motion never ends on its own when absent.
    pub duration: Option<f64>,
}

impl Default for UniformVelocityParams {
    fn default() -> Self {
        Self {
            vx: 5.0,
            vy: 0.0,
            x0: 0.0,
            y0: 0.0,
            mass: 1.0,
            g: STANDARD_GRAVITY,
            duration: None,
        }
    }
}

/// Uniform velocity: `x = x0 + vx t`, `y = y0 + vy t`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformVelocity {
    params: UniformVelocityParams,
}

impl UniformVelocity {
    pub fn new(params: UniformVelocityParams) -> Result<Self> {
        let check = Check("uniform");
        check.finite("vx", params.vx)?;
        check.finite("vy", params.vy)?;
        check.finite("x0", params.x0)?;
        check.finite("y0", params.y0)?;
        check.positive("mass", params.mass)?;
        check.non_negative("g", params.g)?;
        if let Some(duration) = params.duration {
            check.positive("duration", duration)?;
        }
        Ok(Self { params })
    }

    pub const fn params(&self) -> &UniformVelocityParams {
        &self.params
    }

    pub const fn velocity(&self) -> Vector {
        Vector::new(self.params.vx, self.params.vy)
    }
}

impl Kinematic for UniformVelocity {
    fn initial_object(&self) -> SimulatedObject {
        SimulatedObject::circle(
            Point::new(self.params.x0, self.params.y0),
            self.params.mass,
            BALL_RADIUS,
            Color::GREEN,
        )
        .with_velocity(self.velocity())
    }

    fn evaluate(&self, t: f64, state: &mut MotionState) {
        let (t, terminal) = match self.params.duration {
            Some(duration) if t >= duration => (duration, true),
            _ => (t.max(0.0), false),
        };
        state.object.position = Point::new(self.params.x0, self.params.y0) + self.velocity() * t;
        state.object.velocity = self.velocity();
        state.object.acceleration = Vector::zero();
        state.elapsed = t;
        state.terminal = terminal;
    }

    fn forces(&self, object: &SimulatedObject) -> Vec<Force> {
        let weight = object.mass * self.params.g;
        vec![
            Force::gravity(object.mass, self.params.g),
            Force::new(ForceKind::Normal, Vector::new(0.0, weight)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_position() {
        let model = UniformVelocity::new(UniformVelocityParams {
            vx: 2.0,
            vy: -1.0,
            x0: 1.0,
            y0: 10.0,
            ..Default::default()
        })
        .unwrap();
        let mut state = MotionState::new(model.initial_object());
        model.evaluate(3.0, &mut state);
        assert_eq!(state.object.position, Point::new(7.0, 7.0));
        assert_eq!(state.object.acceleration, Vector::zero());
        assert!(!state.terminal);
    }

    #[test]
    fn test_duration_clamps() {
        let model = UniformVelocity::new(UniformVelocityParams {
            duration: Some(2.0),
            ..Default::default()
        })
        .unwrap();
        let mut state = MotionState::new(model.initial_object());
        model.evaluate(5.0, &mut state);
        assert!(state.terminal);
        assert_eq!(state.elapsed, 2.0);
        assert_eq!(state.object.position.x, 10.0);
    }

    #[test]
    fn test_forces_balance() {
        let model = UniformVelocity::new(UniformVelocityParams::default()).unwrap();
        let net = model
            .forces(&model.initial_object())
            .iter()
            .fold(Vector::zero(), |acc, f| acc + f.vector);
        assert_eq!(net, Vector::zero());
    }

    #[test]
    fn test_validation() {
        assert!(UniformVelocity::new(UniformVelocityParams { duration: Some(0.0), ..Default::default() }).is_err());
        assert!(UniformVelocity::new(UniformVelocityParams { vx: f64::NAN, ..Default::default() }).is_err());
        assert!(UniformVelocity::new(UniformVelocityParams { mass: -1.0, ..Default::default() }).is_err());
    }
}
