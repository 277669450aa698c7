//! Forces reported for force-diagram rendering and readouts.

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// The physical origin of a force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceKind {
    /// Weight, `m·g`, always downward.
    Gravity,
    /// Support force from the ground.
    Normal,
    /// Kinetic or static friction.
    Friction,
    /// An externally applied pull or push.
    Applied,
    /// Net force toward the center of a circular path.
    Centripetal,
}

impl ForceKind {
    /// Short symbol used when labelling force arrows.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Gravity => "G",
            Self::Normal => "Fn",
            Self::Friction => "f",
            Self::Applied => "F",
            Self::Centripetal => "Fc",
        }
    }
}

/// A force acting on the simulated object, in newtons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub kind: ForceKind,
    pub vector: Vector,
}

impl Force {
    pub const fn new(kind: ForceKind, vector: Vector) -> Self {
        Self { kind, vector }
    }

    /// Weight of a mass `m` under gravity `g`.
    pub fn gravity(mass: f64, g: f64) -> Self {
        Self::new(ForceKind::Gravity, Vector::new(0.0, -mass * g))
    }

    /// Force magnitude in newtons.
    pub fn magnitude(&self) -> f64 {
        self.vector.magnitude()
    }
}
