//! Oblique throw from a launch height.

use raster::Color;
use serde::{Deserialize, Serialize};

use super::{Kinematic, KeyPoint, KeyPointData, MotionState, STANDARD_GRAVITY};
use crate::error::{Check, Result};
use crate::force::Force;
use crate::object::SimulatedObject;
use crate::vector::{Point, Vector};

/// Label of the apex key point.
pub const APEX_LABEL: &str = "apex";

/// Default tolerance past the landing time before the run is forced to end.
pub const DEFAULT_LANDING_EPSILON: f64 = 0.1;

const BALL_RADIUS: f64 = 8.0;

/// Projectile parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileParams {
    /// Launch speed in m/s.
    pub v0: f64,
    /// Launch angle in degrees above the horizontal.
    pub angle: f64,
    /// Launch height in meters.
    pub h0: f64,
    pub g: f64,
    pub mass: f64,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            v0: 20.0,
            angle: 45.0,
            h0: 0.0,
            g: STANDARD_GRAVITY,
            mass: 1.0,
        }
    }
}

/// Analytic facts about a throw, shown once the run ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSummary {
    pub v0: f64,
    /// Launch angle in degrees.
    pub angle: f64,
    /// Maximum height.
    pub h_max: f64,
    /// Time of the apex (0 when launched level or downward).
    pub t_max: f64,
    /// Time of landing.
    pub t_land: f64,
    /// Horizontal distance at landing.
    pub range: f64,
}

/// Projectile motion:
///
/// ```text
/// x(t) = vx0 t
/// y(t) = h0 + vy0 t - g t² / 2
/// t_land = (vy0 + sqrt(vy0² + 2 g h0)) / g
/// ```
///
/// # Example
///
/// ```rust
/// use kinematics::{Projectile, ProjectileParams};
///
/// let model = Projectile::new(ProjectileParams { v0: 10.0, angle: 0.0, h0: 8.0, ..Default::default() }).unwrap();
/// let summary = model.summary();
/// assert!((summary.t_land - 1.278).abs() < 1e-3);
/// assert!((summary.range - 12.78).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    params: ProjectileParams,
    vx0: f64,
    vy0: f64,
    t_max: f64,
    h_max: f64,
    t_land: f64,
    landing_epsilon: f64,
}

impl Projectile {
    pub fn new(params: ProjectileParams) -> Result<Self> {
        let check = Check("projectile_motion");
        check.non_negative("v0", params.v0)?;
        check.finite("angle", params.angle)?;
        check.non_negative("h0", params.h0)?;
        check.positive("g", params.g)?;
        check.positive("mass", params.mass)?;

        let g = params.g;
        let launch = Vector::from_polar(params.v0, params.angle.to_radians());
        let (vx0, vy0) = (launch.x, launch.y);
        let (t_max, h_max) = if vy0 > 0.0 {
            (vy0 / g, params.h0 + vy0 * vy0 / (2.0 * g))
        } else {
            (0.0, params.h0)
        };
        let t_land = (vy0 + vy0.mul_add(vy0, 2.0 * g * params.h0).sqrt()) / g;

        Ok(Self {
            params,
            vx0,
            vy0,
            t_max,
            h_max,
            t_land,
            landing_epsilon: DEFAULT_LANDING_EPSILON,
        })
    }

    /// Sets how far past the landing time a run may go before it is ended.
    pub fn with_landing_epsilon(mut self, epsilon: f64) -> Self {
        if epsilon.is_finite() && epsilon >= 0.0 {
            self.landing_epsilon = epsilon;
        }
        self
    }

    pub const fn params(&self) -> &ProjectileParams {
        &self.params
    }

    /// Initial velocity components.
    pub const fn launch_velocity(&self) -> Vector {
        Vector::new(self.vx0, self.vy0)
    }

    pub const fn landing_time(&self) -> f64 {
        self.t_land
    }

    /// Horizontal distance covered at landing.
    pub fn range(&self) -> f64 {
        self.vx0 * self.t_land
    }

    pub fn summary(&self) -> ProjectileSummary {
        ProjectileSummary {
            v0: self.params.v0,
            angle: self.params.angle,
            h_max: self.h_max,
            t_max: self.t_max,
            t_land: self.t_land,
            range: self.range(),
        }
    }

    fn position_at(&self, t: f64) -> Point {
        Point::new(
            self.vx0 * t,
            self.params.h0 + self.vy0 * t - 0.5 * self.params.g * t * t,
        )
    }

    fn velocity_at(&self, t: f64) -> Vector {
        Vector::new(self.vx0, self.vy0 - self.params.g * t)
    }

    fn record_apex(&self, state: &mut MotionState) {
        if self.vy0 <= 0.0 || state.has_key_point(APEX_LABEL) {
            return;
        }
        let position = self.position_at(self.t_max);
        state.key_points.push(KeyPoint {
            position,
            label: APEX_LABEL.to_string(),
            data: KeyPointData {
                time: self.t_max,
                height: self.h_max,
                speed: self.velocity_at(self.t_max).magnitude(),
            },
        });
    }
}

impl Kinematic for Projectile {
    fn initial_object(&self) -> SimulatedObject {
        SimulatedObject::circle(
            Point::new(0.0, self.params.h0),
            self.params.mass,
            BALL_RADIUS,
            Color::RED,
        )
        .with_velocity(self.launch_velocity())
        .with_acceleration(Vector::new(0.0, -self.params.g))
    }

    fn evaluate(&self, t: f64, state: &mut MotionState) {
        let mut t = t.max(0.0);
        let landed = self.position_at(t).y < 0.0 || t > self.t_land + self.landing_epsilon;
        if landed {
            t = self.t_land;
        }

        let mut position = self.position_at(t);
        if landed {
            position = Point::new(self.range(), 0.0);
        }
        state.object.position = position;
        state.object.velocity = self.velocity_at(t);
        state.object.acceleration = Vector::new(0.0, -self.params.g);
        state.elapsed = t;
        state.terminal = landed;

        if t >= self.t_max {
            self.record_apex(state);
        }
    }

    fn forces(&self, object: &SimulatedObject) -> Vec<Force> {
        vec![Force::gravity(object.mass, self.params.g)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(model: &Projectile, t: f64) -> MotionState {
        let mut state = MotionState::new(model.initial_object());
        model.evaluate(t, &mut state);
        state
    }

    #[test]
    fn test_default_summary() {
        let model = Projectile::new(ProjectileParams::default()).unwrap();
        let s = model.summary();
        // v0 = 20 at 45°: range = v0² / g, h_max = v0² / 4g
        assert!((s.range - 400.0 / 9.8).abs() < 1e-9);
        assert!((s.h_max - 100.0 / 9.8).abs() < 1e-9);
        assert!((s.t_land - 2.0 * s.t_max).abs() < 1e-9);
    }

    #[test]
    fn test_apex_recorded_once() {
        let model = Projectile::new(ProjectileParams::default()).unwrap();
        let mut state = MotionState::new(model.initial_object());
        model.evaluate(0.5, &mut state);
        assert!(state.key_points.is_empty());
        model.evaluate(1.5, &mut state);
        model.evaluate(1.6, &mut state);
        assert_eq!(state.key_points.len(), 1);
        let apex = &state.key_points[0];
        assert_eq!(apex.label, APEX_LABEL);
        assert!((apex.data.height - model.summary().h_max).abs() < 1e-9);
        // Only horizontal speed remains at the apex.
        assert!((apex.data.speed - model.launch_velocity().x).abs() < 1e-9);
    }

    #[test]
    fn test_snaps_to_landing_point() {
        let model = Projectile::new(ProjectileParams::default()).unwrap();
        let state = run(&model, 60.0);
        assert!(state.terminal);
        assert_eq!(state.object.position.y, 0.0);
        assert!((state.object.position.x - model.range()).abs() < 1e-12);
        assert_eq!(state.elapsed, model.landing_time());
    }

    #[test]
    fn test_level_or_downward_launch_has_no_apex() {
        let model = Projectile::new(ProjectileParams {
            v0: 10.0,
            angle: -30.0,
            h0: 5.0,
            ..Default::default()
        })
        .unwrap();
        let s = model.summary();
        assert_eq!(s.t_max, 0.0);
        assert_eq!(s.h_max, 5.0);
        assert!(run(&model, 10.0).key_points.is_empty());
    }

    #[test]
    fn test_resting_on_ground_lands_immediately() {
        let model = Projectile::new(ProjectileParams {
            v0: 0.0,
            h0: 0.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(model.landing_time(), 0.0);
        let state = run(&model, 1.0 / 60.0);
        assert!(state.terminal);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(Projectile::new(ProjectileParams { v0: -1.0, ..Default::default() }).is_err());
        assert!(Projectile::new(ProjectileParams { h0: -0.1, ..Default::default() }).is_err());
        assert!(Projectile::new(ProjectileParams { g: -9.8, ..Default::default() }).is_err());
        assert!(Projectile::new(ProjectileParams { angle: f64::INFINITY, ..Default::default() }).is_err());
    }
}
