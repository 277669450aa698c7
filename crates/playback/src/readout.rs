//! Serializable snapshot of the numbers a viewer reads off the screen.

use kinematics::{Force, KeyPoint, Motion, MotionKind, Point, ProjectileSummary, Vector};
use serde::Serialize;

use crate::animation::Animation;
use crate::clock::PlaybackState;
use crate::event::EndReason;

/// Derived values for a uniform circular run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircularReading {
    pub speed: f64,
    pub omega: f64,
    pub centripetal_force: f64,
    pub max_friction: f64,
    /// Friction actually supplied, capped at `max_friction`.
    pub friction: f64,
    /// Whether friction alone can hold the object on its path.
    pub sustainable: bool,
}

/// Everything displayed for the current frame, as plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub subtype: MotionKind,
    pub state: PlaybackState,
    pub time: f64,
    pub position: Point,
    pub velocity: Vector,
    pub speed: f64,
    pub acceleration: Vector,
    pub forces: Vec<Force>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<KeyPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<EndReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projectile: Option<ProjectileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circular: Option<CircularReading>,
    /// Pixels per meter in effect.
    pub scale: f64,
}

impl Readout {
    pub(crate) fn capture(anim: &Animation) -> Self {
        let model = anim.model();
        let object = model.object();
        let (projectile, circular) = match model.motion() {
            Motion::Projectile(p) => (Some(p.summary()), None),
            Motion::UniformCircular(c) => (
                None,
                Some(CircularReading {
                    speed: c.speed(),
                    omega: c.params().omega,
                    centripetal_force: c.centripetal_force(),
                    max_friction: c.max_friction(),
                    friction: c.centripetal_force().min(c.max_friction()),
                    sustainable: c.is_sustainable(),
                }),
            ),
            _ => (None, None),
        };

        Self {
            subtype: model.kind(),
            state: anim.state(),
            time: anim.elapsed(),
            position: object.position,
            velocity: object.velocity,
            speed: object.speed(),
            acceleration: object.acceleration,
            forces: model.describe_forces(),
            key_points: model.key_points().to_vec(),
            end_reason: anim.end_reason(),
            projectile,
            circular,
            scale: anim.transform().scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;
    use kinematics::{Model, MotionParams, UniformCircularParams};
    use raster::CoordinateTransform;

    #[test]
    fn test_circular_reading() {
        let params = MotionParams::UniformCircular(UniformCircularParams {
            radius: 2.0,
            omega: 3.0,
            mass: 1.0,
            mu: 0.5,
            ..Default::default()
        });
        let anim = Animation::new(
            Model::from_params(params).unwrap(),
            CoordinateTransform::new(800.0, 600.0),
            AnimationConfig::default(),
        );
        let readout = anim.readout();
        let circular = readout.circular.unwrap();
        assert!((circular.speed - 6.0).abs() < 1e-12);
        assert!((circular.centripetal_force - 18.0).abs() < 1e-12);
        assert!((circular.friction - 4.9).abs() < 1e-12);
        assert!(!circular.sustainable);
        assert!(readout.projectile.is_none());
        assert_eq!(readout.state, PlaybackState::Stopped);
    }

    #[test]
    fn test_optional_sections_are_omitted() {
        let anim = Animation::new(
            Model::from_params(MotionParams::defaults(MotionKind::FreeFall)).unwrap(),
            CoordinateTransform::new(800.0, 600.0),
            AnimationConfig::default(),
        );
        let json = serde_json::to_value(anim.readout()).unwrap();
        assert_eq!(json["subtype"], "free_fall");
        assert!(json.get("projectile").is_none());
        assert!(json.get("end_reason").is_none());
        assert!(json.get("key_points").is_none());
    }
}
