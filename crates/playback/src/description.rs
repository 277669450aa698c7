//! Typed animation descriptions, as produced by the problem backend.

use kinematics::{MotionKind, MotionParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One solution step, optionally tied to a window of animation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StepRepr")]
pub struct SolutionStep {
    pub title: String,
    /// `[start, end]` in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_time: Option<(f64, f64)>,
}

impl SolutionStep {
    pub fn new(title: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            title: title.into(),
            animation_time: Some((start, end)),
        }
    }
}

/// Steps arrive either as bare strings or as full objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum StepRepr {
    Title(String),
    Full {
        #[serde(default)]
        title: String,
        #[serde(default)]
        animation_time: Option<(f64, f64)>,
    },
}

impl From<StepRepr> for SolutionStep {
    fn from(repr: StepRepr) -> Self {
        match repr {
            StepRepr::Title(title) => Self {
                title,
                animation_time: None,
            },
            StepRepr::Full {
                title,
                animation_time,
            } => Self {
                title,
                animation_time,
            },
        }
    }
}

/// A request to animate one kinematics problem.
///
/// # Example
///
/// ```rust
/// use playback::AnimationDescription;
///
/// let desc: AnimationDescription = serde_json::from_str(r#"{
///     "sub_type": "free_fall",
///     "parameters": { "height": 20 },
///     "solution_steps": [{ "title": "Fall", "animation_time": [0, 1] }]
/// }"#).unwrap();
/// assert_eq!(desc.subtype, "free_fall");
/// assert_eq!(desc.solution_steps.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDescription {
    /// Model family name; unknown names fall back to `projectile_motion`.
    #[serde(alias = "sub_type")]
    pub subtype: String,
    /// Family-specific parameters; omitted fields take their defaults.
    #[serde(default = "empty_object")]
    pub parameters: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solution_steps: Vec<SolutionStep>,
    /// Static scale hint in pixels per meter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Parameters resolved from a description.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub params: MotionParams,
    /// Set when the subtype was not recognized.
    pub warning: Option<String>,
}

impl AnimationDescription {
    /// Creates a description with default parameters for `kind`.
    pub fn new(kind: MotionKind) -> Self {
        Self {
            subtype: kind.as_str().to_string(),
            parameters: empty_object(),
            solution_steps: Vec::new(),
            scale: None,
        }
    }

    /// Replaces the parameter object.
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_steps(mut self, steps: Vec<SolutionStep>) -> Self {
        self.solution_steps = steps;
        self
    }

    /// The recognized model family, if any.
    pub fn kind(&self) -> Option<MotionKind> {
        self.subtype.parse().ok()
    }

    /// Deserializes the parameters for the described family, falling back
    /// to the projectile model for an unknown subtype.
    pub fn resolve(&self) -> Result<ResolvedParams> {
        let (kind, warning) = match self.subtype.parse::<MotionKind>() {
            Ok(kind) => (kind, None),
            Err(err) => (
                MotionKind::Projectile,
                Some(format!("{err}; using {}", MotionKind::Projectile)),
            ),
        };
        let params = parse_params(kind, &self.parameters)?;
        Ok(ResolvedParams { params, warning })
    }
}

/// Deserializes a parameter object for `kind`. `null` means all defaults.
pub fn parse_params(kind: MotionKind, value: &Value) -> Result<MotionParams> {
    let value = if value.is_null() { empty_object() } else { value.clone() };
    let malformed = |source| Error::MalformedParameters {
        subtype: kind.as_str(),
        source,
    };
    Ok(match kind {
        MotionKind::FreeFall => MotionParams::FreeFall(serde_json::from_value(value).map_err(malformed)?),
        MotionKind::Projectile => {
            MotionParams::Projectile(serde_json::from_value(value).map_err(malformed)?)
        }
        MotionKind::Uniform => MotionParams::Uniform(serde_json::from_value(value).map_err(malformed)?),
        MotionKind::UniformAcceleration => {
            MotionParams::UniformAcceleration(serde_json::from_value(value).map_err(malformed)?)
        }
        MotionKind::UniformCircular => {
            MotionParams::UniformCircular(serde_json::from_value(value).map_err(malformed)?)
        }
    })
}
