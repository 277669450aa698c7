//! Variant dispatch and the per-run model state.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, UnknownMotionKind};
use crate::force::Force;
use crate::models::{
    FreeFall, FreeFallParams, KeyPoint, Kinematic, MotionState, Projectile, ProjectileParams,
    UniformAcceleration, UniformAccelerationParams, UniformCircular, UniformCircularParams,
    UniformVelocity, UniformVelocityParams,
};
use crate::object::SimulatedObject;
use crate::vector::Point;

/// Extents smaller than this (meters) are treated as degenerate.
const MIN_EXTENT: f64 = 1e-6;

/// Returns a time delta for a given number of frames per second.
///
/// # Example
///
/// ```rust
/// use kinematics::fps;
///
/// assert_eq!(fps(50), 0.02);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n.max(1))
}

/// The kinematic model families, by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    FreeFall,
    #[serde(rename = "projectile_motion")]
    Projectile,
    Uniform,
    UniformAcceleration,
    UniformCircular,
}

impl MotionKind {
    pub const ALL: [Self; 5] = [
        Self::FreeFall,
        Self::Projectile,
        Self::Uniform,
        Self::UniformAcceleration,
        Self::UniformCircular,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FreeFall => "free_fall",
            Self::Projectile => "projectile_motion",
            Self::Uniform => "uniform",
            Self::UniformAcceleration => "uniform_acceleration",
            Self::UniformCircular => "uniform_circular",
        }
    }

    /// Whether the motion is drawn along a single horizontal axis.
    pub const fn is_one_dimensional(&self) -> bool {
        matches!(self, Self::UniformAcceleration)
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MotionKind {
    type Err = UnknownMotionKind;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownMotionKind(s.to_string()))
    }
}

/// Validated-on-build parameters for one model family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subtype", content = "parameters", rename_all = "snake_case")]
pub enum MotionParams {
    FreeFall(FreeFallParams),
    #[serde(rename = "projectile_motion")]
    Projectile(ProjectileParams),
    Uniform(UniformVelocityParams),
    UniformAcceleration(UniformAccelerationParams),
    UniformCircular(UniformCircularParams),
}

impl MotionParams {
    /// Default parameters for a family.
    pub fn defaults(kind: MotionKind) -> Self {
        match kind {
            MotionKind::FreeFall => Self::FreeFall(FreeFallParams::default()),
            MotionKind::Projectile => Self::Projectile(ProjectileParams::default()),
            MotionKind::Uniform => Self::Uniform(UniformVelocityParams::default()),
            MotionKind::UniformAcceleration => {
                Self::UniformAcceleration(UniformAccelerationParams::default())
            }
            MotionKind::UniformCircular => Self::UniformCircular(UniformCircularParams::default()),
        }
    }

    pub const fn kind(&self) -> MotionKind {
        match self {
            Self::FreeFall(_) => MotionKind::FreeFall,
            Self::Projectile(_) => MotionKind::Projectile,
            Self::Uniform(_) => MotionKind::Uniform,
            Self::UniformAcceleration(_) => MotionKind::UniformAcceleration,
            Self::UniformCircular(_) => MotionKind::UniformCircular,
        }
    }

    /// Physical extent `(x, y)` in meters the motion is expected to cover,
    /// for fitting the drawing scale. `None` when the family has no useful
    /// prediction or the extent is degenerate.
    pub fn predicted_extent(&self) -> Result<Option<(f64, f64)>> {
        let extent = match self {
            Self::Projectile(p) => {
                let summary = Projectile::new(*p)?.summary();
                Some((summary.range, summary.h_max))
            }
            Self::UniformCircular(p) => {
                let c = UniformCircular::new(*p)?;
                let r = c.radius();
                if p.has_center() {
                    let center = c.center();
                    Some((center.x + r, center.y + r))
                } else {
                    Some((2.0 * r, 2.0 * r))
                }
            }
            Self::FreeFall(p) => {
                FreeFall::new(*p)?;
                Some((2.0 * p.x0, p.h0))
            }
            Self::Uniform(_) | Self::UniformAcceleration(_) => None,
        };
        Ok(extent.filter(|&(x, y)| x > MIN_EXTENT && y > MIN_EXTENT))
    }

    /// Fills in a circular center that was not given explicitly.
    pub fn resolve_center(&mut self, default_x: f64, default_y: f64) {
        if let Self::UniformCircular(p) = self {
            p.resolve_center(default_x, default_y);
        }
    }

    /// Validates the parameters and builds the model.
    pub fn build(self) -> Result<Motion> {
        Ok(match self {
            Self::FreeFall(p) => Motion::FreeFall(FreeFall::new(p)?),
            Self::Projectile(p) => Motion::Projectile(Projectile::new(p)?),
            Self::Uniform(p) => Motion::Uniform(UniformVelocity::new(p)?),
            Self::UniformAcceleration(p) => {
                Motion::UniformAcceleration(UniformAcceleration::new(p)?)
            }
            Self::UniformCircular(p) => Motion::UniformCircular(UniformCircular::new(p)?),
        })
    }
}

/// Extra geometry a family draws besides the object and its trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    /// The circular path and a marker at its center.
    CirclePath { center: Point, radius: f64 },
}

/// A constructed model of one family.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    FreeFall(FreeFall),
    Projectile(Projectile),
    Uniform(UniformVelocity),
    UniformAcceleration(UniformAcceleration),
    UniformCircular(UniformCircular),
}

impl Motion {
    pub const fn kind(&self) -> MotionKind {
        match self {
            Self::FreeFall(_) => MotionKind::FreeFall,
            Self::Projectile(_) => MotionKind::Projectile,
            Self::Uniform(_) => MotionKind::Uniform,
            Self::UniformAcceleration(_) => MotionKind::UniformAcceleration,
            Self::UniformCircular(_) => MotionKind::UniformCircular,
        }
    }

    fn kinematic(&self) -> &dyn Kinematic {
        match self {
            Self::FreeFall(m) => m,
            Self::Projectile(m) => m,
            Self::Uniform(m) => m,
            Self::UniformAcceleration(m) => m,
            Self::UniformCircular(m) => m,
        }
    }

    /// Sets the landing tolerance of a projectile; other families ignore it.
    pub fn with_landing_epsilon(self, epsilon: f64) -> Self {
        match self {
            Self::Projectile(p) => Self::Projectile(p.with_landing_epsilon(epsilon)),
            other => other,
        }
    }

    pub fn decoration(&self) -> Option<Decoration> {
        match self {
            Self::UniformCircular(c) => Some(Decoration::CirclePath {
                center: c.center(),
                radius: c.radius(),
            }),
            _ => None,
        }
    }

    pub fn trail_cadence(&self) -> Option<f64> {
        self.kinematic().trail_cadence()
    }
}

/// A model instance together with its evolving state.
///
/// # Example
///
/// ```rust
/// use kinematics::{fps, Model, MotionParams, ProjectileParams};
///
/// let mut model = Model::from_params(MotionParams::Projectile(ProjectileParams::default())).unwrap();
/// while !model.is_terminal() {
///     model.advance(fps(60));
/// }
/// assert_eq!(model.object().position.y, 0.0);
/// assert_eq!(model.key_points().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    motion: Motion,
    state: MotionState,
}

impl Model {
    /// Wraps a constructed model, initialized at `t = 0`.
    pub fn new(motion: Motion) -> Self {
        let state = MotionState::new(motion.kinematic().initial_object());
        Self { motion, state }
    }

    /// Validates `params` and builds an initialized model.
    pub fn from_params(params: MotionParams) -> Result<Self> {
        Ok(Self::new(params.build()?))
    }

    /// Resets the object to its analytic state at `t = 0` and clears key
    /// points and the terminal flag.
    pub fn initialize(&mut self) {
        self.state = MotionState::new(self.motion.kinematic().initial_object());
    }

    /// Moves the elapsed time forward by `dt` seconds. No-op once terminal.
    pub fn advance(&mut self, dt: f64) {
        if self.state.terminal || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.evaluate(self.state.elapsed + dt);
    }

    /// Evaluates the model at absolute time `t`. Seeking backwards
    /// re-initializes first so key points and termination are recomputed.
    pub fn advance_to(&mut self, t: f64) {
        if !t.is_finite() {
            return;
        }
        let t = t.max(0.0);
        if t < self.state.elapsed {
            self.initialize();
        }
        self.evaluate(t);
    }

    fn evaluate(&mut self, t: f64) {
        self.motion.kinematic().evaluate(t, &mut self.state);
        trace!(
            model.kind = %self.motion.kind(),
            model.time = self.state.elapsed,
            object.x = self.state.object.position.x,
            object.y = self.state.object.position.y,
            model.terminal = self.state.terminal,
            "Model evaluated"
        );
    }

    pub fn is_terminal(&self) -> bool {
        self.state.terminal
    }

    /// Elapsed time of the current state, after terminal clamping.
    pub fn elapsed(&self) -> f64 {
        self.state.elapsed
    }

    pub fn object(&self) -> &SimulatedObject {
        &self.state.object
    }

    pub fn key_points(&self) -> &[KeyPoint] {
        &self.state.key_points
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn describe_forces(&self) -> Vec<Force> {
        self.motion.kinematic().forces(&self.state.object)
    }

    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    pub const fn kind(&self) -> MotionKind {
        self.motion.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in MotionKind::ALL {
            assert_eq!(kind.as_str().parse::<MotionKind>(), Ok(kind));
        }
        assert!("parabola".parse::<MotionKind>().is_err());
    }

    #[test]
    fn test_fps() {
        assert!((fps(60) - 1.0 / 60.0).abs() < f64::EPSILON);
        assert_eq!(fps(0), 1.0);
    }

    #[test]
    fn test_advance_is_noop_when_terminal() {
        let mut model = Model::from_params(MotionParams::FreeFall(FreeFallParams {
            h0: 1.0,
            ..Default::default()
        }))
        .unwrap();
        model.advance(5.0);
        assert!(model.is_terminal());
        let snapshot = model.state().clone();
        model.advance(1.0);
        assert_eq!(model.state(), &snapshot);
    }

    #[test]
    fn test_seek_backwards_reinitializes() {
        let mut model = Model::from_params(MotionParams::defaults(MotionKind::Projectile)).unwrap();
        model.advance_to(10.0);
        assert!(model.is_terminal());
        assert_eq!(model.key_points().len(), 1);

        model.advance_to(0.5);
        assert!(!model.is_terminal());
        assert!(model.key_points().is_empty());
        assert_eq!(model.elapsed(), 0.5);
    }

    #[test]
    fn test_stepping_matches_seeking() {
        let params = MotionParams::defaults(MotionKind::UniformCircular);
        let mut stepped = Model::from_params(params).unwrap();
        for _ in 0..120 {
            stepped.advance(0.25 / 30.0);
        }
        let mut seeked = Model::from_params(params).unwrap();
        seeked.advance_to(stepped.elapsed());
        let (a, b) = (stepped.object().position, seeked.object().position);
        assert!(a.distance(b) < 1e-9);
    }

    #[test]
    fn test_predicted_extent() {
        let projectile = MotionParams::defaults(MotionKind::Projectile);
        let (x, y) = projectile.predicted_extent().unwrap().unwrap();
        assert!((x - 400.0 / 9.8).abs() < 1e-9);
        assert!((y - 100.0 / 9.8).abs() < 1e-9);

        let vertical = MotionParams::Projectile(ProjectileParams {
            angle: 90.0,
            ..Default::default()
        });
        assert_eq!(vertical.predicted_extent().unwrap(), None);

        let mut circular = MotionParams::defaults(MotionKind::UniformCircular);
        assert_eq!(circular.predicted_extent().unwrap(), Some((10.0, 10.0)));
        circular.resolve_center(3.0, 4.0);
        assert_eq!(circular.predicted_extent().unwrap(), Some((8.0, 9.0)));

        let free_fall = MotionParams::defaults(MotionKind::FreeFall);
        assert_eq!(free_fall.predicted_extent().unwrap(), Some((10.0, 10.0)));
        assert_eq!(MotionParams::defaults(MotionKind::Uniform).predicted_extent().unwrap(), None);
    }

    #[test]
    fn test_decoration_only_for_circular() {
        let circular = MotionParams::defaults(MotionKind::UniformCircular).build().unwrap();
        assert!(matches!(circular.decoration(), Some(Decoration::CirclePath { radius, .. }) if radius == 5.0));
        assert_eq!(circular.trail_cadence(), Some(0.05));
        let projectile = MotionParams::defaults(MotionKind::Projectile).build().unwrap();
        assert!(projectile.decoration().is_none());
        assert!(projectile.trail_cadence().is_none());
    }
}
