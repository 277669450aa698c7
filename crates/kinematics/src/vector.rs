//! Points and vectors in the 2D physical plane.
//!
//! Physical space is measured in meters, with the origin at the problem's
//! reference point and y increasing upward:
//!
//! ```text
//!   y
//!   │
//!   │
//!   └───── x
//! ```

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A position in the physical plane.
///
/// # Example
///
/// ```rust
/// use kinematics::{Point, Vector};
///
/// let start = Point::new(0.0, 10.0);
/// let moved = start + Vector::new(3.0, -4.0);
/// assert_eq!(moved, Point::new(3.0, 6.0));
/// assert_eq!((moved - start).magnitude(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in meters.
    pub x: f64,
    /// Y coordinate in meters.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin.
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).magnitude()
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vector) -> Point {
        Point {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl AddAssign<Vector> for Point {
    #[inline]
    fn add_assign(&mut self, v: Vector) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Point) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// A velocity, acceleration, or force in the physical plane.
///
/// # Example
///
/// ```rust
/// use kinematics::Vector;
///
/// let v = Vector::from_polar(10.0, 0.0);
/// assert_eq!(v, Vector::new(10.0, 0.0));
/// assert_eq!((v * 2.0).x, 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vector {
    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Creates a vector from a magnitude and an angle in radians measured
    /// counter-clockwise from +x.
    #[inline]
    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: magnitude * cos,
            y: magnitude * sin,
        }
    }

    /// Returns the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns a unit vector in the same direction, or the vector itself
    /// if it has zero length.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return *self;
        }
        Self {
            x: self.x / mag,
            y: self.y / mag,
        }
    }

    /// Returns true if both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, other: Vector) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Vector) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, scalar: f64) -> Vector {
        Vector {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_point_add_vector() {
        let p = Point::new(1.0, 2.0);
        let result = p + Vector::new(4.0, 5.0);
        assert!(approx_eq(result.x, 5.0));
        assert!(approx_eq(result.y, 7.0));
    }

    #[test]
    fn test_point_sub_point() {
        let v = Point::new(5.0, 7.0) - Point::new(1.0, 2.0);
        assert!(approx_eq(v.x, 4.0));
        assert!(approx_eq(v.y, 5.0));
    }

    #[test]
    fn test_vector_ops() {
        let v = Vector::new(1.0, -2.0);
        assert_eq!(v * 2.0, Vector::new(2.0, -4.0));
        assert_eq!(2.0 * v, Vector::new(2.0, -4.0));
        assert_eq!(-v, Vector::new(-1.0, 2.0));
        assert_eq!(v + v - v, v);
    }

    #[test]
    fn test_vector_magnitude_and_normalized() {
        let v = Vector::new(3.0, 4.0);
        assert!(approx_eq(v.magnitude(), 5.0));
        let n = v.normalized();
        assert!(approx_eq(n.magnitude(), 1.0));
        assert!(approx_eq(n.x, 0.6));
        assert_eq!(Vector::zero().normalized(), Vector::zero());
    }

    #[test]
    fn test_from_polar_quadrants() {
        let up = Vector::from_polar(2.0, core::f64::consts::FRAC_PI_2);
        assert!(approx_eq(up.x, 0.0));
        assert!(approx_eq(up.y, 2.0));
        let left = Vector::from_polar(1.0, core::f64::consts::PI);
        assert!(approx_eq(left.x, -1.0));
    }
}
