//! The simulated point-object and its rendering attributes.

use raster::Color;
use serde::{Deserialize, Serialize};

use crate::vector::{Point, Vector};

/// Glyph used to draw a simulated object. Sizes are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl Shape {
    /// Half-extent of the glyph along each raster axis.
    pub fn half_extent(&self) -> (f64, f64) {
        match *self {
            Self::Circle { radius } => (radius, radius),
            Self::Rectangle { width, height } => (width / 2.0, height / 2.0),
        }
    }
}

/// The single point-object a model owns and mutates every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedObject {
    /// Position in meters.
    pub position: Point,
    /// Velocity in m/s.
    pub velocity: Vector,
    /// Acceleration in m/s².
    pub acceleration: Vector,
    /// Mass in kg.
    pub mass: f64,
    /// Glyph drawn at the object's position.
    pub shape: Shape,
    /// Fill color.
    pub color: Color,
}

impl SimulatedObject {
    /// A circular object at rest.
    pub const fn circle(position: Point, mass: f64, radius: f64, color: Color) -> Self {
        Self {
            position,
            velocity: Vector::zero(),
            acceleration: Vector::zero(),
            mass,
            shape: Shape::Circle { radius },
            color,
        }
    }

    /// Sets the initial velocity.
    pub const fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the initial acceleration.
    pub const fn with_acceleration(mut self, acceleration: Vector) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Speed (velocity magnitude) in m/s.
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Returns true if every kinematic quantity is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_extent() {
        assert_eq!(Shape::Circle { radius: 8.0 }.half_extent(), (8.0, 8.0));
        assert_eq!(
            Shape::Rectangle {
                width: 20.0,
                height: 10.0
            }
            .half_extent(),
            (10.0, 5.0)
        );
    }

    #[test]
    fn test_builder_and_speed() {
        let obj = SimulatedObject::circle(Point::new(0.0, 1.0), 2.0, 10.0, Color::RED)
            .with_velocity(Vector::new(3.0, 4.0))
            .with_acceleration(Vector::new(0.0, -9.8));
        assert_eq!(obj.speed(), 5.0);
        assert!(obj.is_finite());
        assert_eq!(obj.mass, 2.0);
    }
}
