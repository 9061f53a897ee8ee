//! Geometric primitives shared by the projector and the annotation types.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the image
//! - x grows to the right, y grows downward
//! - Angles are in degrees, positive = counter-clockwise as seen on screen

use serde::{Deserialize, Serialize};

use crate::error::RotateError;

/// A 2D coordinate in either the source or the output frame.
///
/// Serialized as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from a 2-element slice.
    pub fn from_slice(values: &[f64]) -> Result<Self, RotateError> {
        match values {
            [x, y] => Ok(Self::new(*x, *y)),
            _ => Err(RotateError::invalid(format!(
                "a point needs 2 values, got {}",
                values.len()
            ))),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn validate(&self) -> Result<(), RotateError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(RotateError::invalid(format!(
                "point ({}, {}) is not finite",
                self.x, self.y
            )))
        }
    }

    #[inline]
    pub(crate) fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = RotateError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<Point> for Vec<f64> {
    fn from(p: Point) -> Self {
        vec![p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_from_slice() {
        assert_eq!(Point::from_slice(&[1.0, 2.0]).unwrap(), Point::new(1.0, 2.0));
        assert!(matches!(
            Point::from_slice(&[1.0]),
            Err(RotateError::InvalidConfig(_))
        ));
        assert!(Point::from_slice(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_point_validate_rejects_nan() {
        assert!(Point::new(f64::NAN, 0.0).validate().is_err());
        assert!(Point::new(0.0, f64::INFINITY).validate().is_err());
        assert!(Point::new(3.0, 4.0).validate().is_ok());
    }
}
