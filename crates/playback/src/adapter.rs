//! Normalization of legacy animation payloads.
//!
//! Older producers emit a flat instruction object (`type`, `initial_speed`,
//! `gravity`, ...), wrap the description in an `animation` field, or send a
//! bare array. [`normalize`] maps all of these onto an
//! [`AnimationDescription`].

use kinematics::MotionKind;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::description::AnimationDescription;

/// Maps a raw payload onto a description. Returns `None` when the payload
/// carries no animation (null, scalars, or a malformed description).
///
/// # Example
///
/// ```rust
/// use playback::normalize;
/// use serde_json::json;
///
/// let desc = normalize(&json!({ "type": "projectile", "initial_speed": 16, "angle": 50 })).unwrap();
/// assert_eq!(desc.subtype, "projectile_motion");
/// assert_eq!(desc.parameters["v0"], 16.0);
///
/// assert!(normalize(&json!(null)).is_none());
/// ```
pub fn normalize(raw: &Value) -> Option<AnimationDescription> {
    match raw {
        Value::Array(_) => Some(illustrative_default()),
        Value::Object(map) => normalize_object(map),
        _ => None,
    }
}

fn illustrative_default() -> AnimationDescription {
    AnimationDescription::new(MotionKind::Projectile).with_parameters(json!({
        "v0": 18.0,
        "angle": 55.0,
        "g": 9.8,
        "h0": 0.0,
        "mass": 1.0,
    }))
}

fn normalize_object(map: &Map<String, Value>) -> Option<AnimationDescription> {
    let has_subtype = truthy(map.get("subtype")) || truthy(map.get("sub_type"));
    if has_subtype && truthy(map.get("parameters")) {
        return serde_json::from_value(Value::Object(map.clone()))
            .map_err(|err| debug!(error = %err, "Description passthrough failed"))
            .ok();
    }
    if let Some(inner) = map.get("animation").filter(|v| truthy(Some(v))) {
        return normalize(inner);
    }
    Some(from_legacy(&Legacy(map)))
}

/// JavaScript-style truthiness, which legacy producers rely on.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn if_zero(value: f64, default: f64) -> f64 {
    if value == 0.0 { default } else { value }
}

/// Field lookup over a legacy instruction object.
struct Legacy<'a>(&'a Map<String, Value>);

impl Legacy<'_> {
    /// First numeric value among `keys`, or `default`.
    fn number(&self, keys: &[&str], default: f64) -> f64 {
        keys.iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_f64))
            .unwrap_or(default)
    }

    /// Numeric value treated as missing when zero.
    fn nonzero(&self, key: &str, default: f64) -> f64 {
        match self.0.get(key).and_then(Value::as_f64) {
            Some(v) if v != 0.0 => v,
            _ => default,
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }
}

fn from_legacy(raw: &Legacy<'_>) -> AnimationDescription {
    let motion_type = raw
        .text("motion_type_original")
        .or_else(|| raw.text("type"))
        .unwrap_or("projectile");

    let v0 = raw.number(&["initial_speed", "v0"], 20.0);
    let angle = raw.number(&["angle"], 45.0);
    let g = raw.number(&["gravity", "g"], 9.8);
    let h0 = raw.number(&["initial_y", "y0", "h0"], 0.0);
    let x0 = raw.number(&["initial_x"], 0.0);
    let mass = raw.number(&["mass"], 1.0);
    let duration = raw.number(&["duration"], 10.0);

    let (kind, parameters) = match motion_type {
        "free_fall" => (
            MotionKind::FreeFall,
            json!({
                "h0": if_zero(h0, 10.0),
                "g": g,
                "mass": mass,
                "bounce": truthy(raw.0.get("bounce")),
                "bounce_loss": raw.nonzero("bounceLoss", 0.8),
            }),
        ),
        "uniform" => {
            let theta = angle.to_radians();
            (
                MotionKind::Uniform,
                json!({
                    "vx": v0 * theta.cos(),
                    "vy": v0 * theta.sin(),
                    "x0": x0,
                    "y0": h0,
                    "mass": mass,
                    "duration": duration,
                    "g": 0.0,
                }),
            )
        }
        "uniform_acceleration" => (
            MotionKind::UniformAcceleration,
            json!({
                "F": raw.number(&["F"], 10.0),
                "mu": raw.number(&["mu"], 0.2),
                "mass": mass,
                "g": g,
                "x0": x0,
                "v0": v0,
                "duration": duration,
            }),
        ),
        "uniform_circular" => (
            MotionKind::UniformCircular,
            json!({
                "radius": raw.number(&["radius"], 5.0),
                "omega": raw.number(&["omega"], 1.0),
                "mass": mass,
                "mu": raw.number(&["mu"], 0.5),
                "g": g,
                "duration": duration,
            }),
        ),
        _ => (
            MotionKind::Projectile,
            json!({
                "v0": v0,
                "angle": angle,
                "g": g,
                "h0": h0,
                "mass": mass,
            }),
        ),
    };

    debug!(legacy.motion_type = motion_type, subtype = %kind, "Legacy payload mapped");
    let mut description = AnimationDescription::new(kind).with_parameters(parameters);
    description.scale = raw.0.get("scale").and_then(Value::as_f64);
    description
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_objects() {
        assert!(normalize(&Value::Null).is_none());
        assert!(normalize(&json!(42)).is_none());
        assert!(normalize(&json!("projectile")).is_none());
        assert!(normalize(&json!(false)).is_none());
    }

    #[test]
    fn test_array_gives_illustrative_projectile() {
        let desc = normalize(&json!([1, 2, 3])).unwrap();
        assert_eq!(desc.subtype, "projectile_motion");
        assert_eq!(desc.parameters["v0"], 18.0);
        assert_eq!(desc.parameters["angle"], 55.0);
    }

    #[test]
    fn test_passthrough_and_nesting() {
        let modern = json!({
            "sub_type": "uniform_circular",
            "parameters": { "radius": 3 },
            "solution_steps": [{ "title": "Turn", "animation_time": [0, 2] }]
        });
        let desc = normalize(&modern).unwrap();
        assert_eq!(desc.subtype, "uniform_circular");
        assert_eq!(desc.solution_steps.len(), 1);

        let nested = normalize(&json!({ "animation": modern })).unwrap();
        assert_eq!(nested, desc);
    }

    #[test]
    fn test_legacy_free_fall_defaults_height() {
        let desc = normalize(&json!({ "type": "free_fall", "initial_y": 0, "bounce": true })).unwrap();
        assert_eq!(desc.subtype, "free_fall");
        assert_eq!(desc.parameters["h0"], 10.0);
        assert_eq!(desc.parameters["bounce"], true);
        assert_eq!(desc.parameters["bounce_loss"], 0.8);
    }

    #[test]
    fn test_legacy_uniform_decomposes_speed() {
        let desc = normalize(&json!({
            "motion_type_original": "uniform",
            "type": "projectile",
            "v0": 10,
            "angle": 90,
            "initial_y": 2,
        }))
        .unwrap();
        assert_eq!(desc.subtype, "uniform");
        assert!(desc.parameters["vx"].as_f64().unwrap().abs() < 1e-9);
        assert!((desc.parameters["vy"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(desc.parameters["y0"], 2.0);
        assert_eq!(desc.parameters["g"], 0.0);
    }

    #[test]
    fn test_legacy_unknown_type_is_projectile_with_scale() {
        let desc = normalize(&json!({
            "type": "horizontal_projectile",
            "initial_speed": 16,
            "gravity": 10,
            "scale": 22,
        }))
        .unwrap();
        assert_eq!(desc.subtype, "projectile_motion");
        assert_eq!(desc.parameters["v0"], 16.0);
        assert_eq!(desc.parameters["g"], 10.0);
        assert_eq!(desc.scale, Some(22.0));
    }

    #[test]
    fn test_legacy_circular_and_acceleration() {
        let circ = normalize(&json!({ "type": "uniform_circular", "omega": 2 })).unwrap();
        assert_eq!(circ.parameters["mu"], 0.5);
        assert_eq!(circ.parameters["omega"], 2.0);
        let acc = normalize(&json!({ "type": "uniform_acceleration", "F": 4 })).unwrap();
        assert_eq!(acc.parameters["F"], 4.0);
        assert_eq!(acc.parameters["mu"], 0.2);
    }

    #[test]
    fn test_malformed_passthrough_is_none() {
        assert!(normalize(&json!({ "subtype": 5, "parameters": {} })).is_none());
    }
}
