use serde::Serialize;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::check_finite;

/// A point or displacement in the real plane.
///
/// Both components are guaranteed finite when built through [`Vector2::new`].
/// The arithmetic operators are infallible; an overflow to infinity inside a
/// long iteration is caught later, when the point is mapped onto a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector2 {
    x0: f64,
    x1: f64,
}

/// Deserialization helper. Rejects non-finite components on load.
impl<'de> serde::Deserialize<'de> for Vector2 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            x0: f64,
            x1: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.x0, raw.x1).map_err(serde::de::Error::custom)
    }
}

impl Vector2 {
    pub const ZERO: Self = Self { x0: 0.0, x1: 0.0 };

    pub fn new(x0: f64, x1: f64) -> crate::Result<Self> {
        Ok(Self {
            x0: check_finite("x0", x0)?,
            x1: check_finite("x1", x1)?,
        })
    }

    /// Build from components already known to be finite.
    #[inline]
    pub(crate) const fn new_unchecked(x0: f64, x1: f64) -> Self {
        Self { x0, x1 }
    }

    #[inline]
    pub fn x0(self) -> f64 {
        self.x0
    }

    #[inline]
    pub fn x1(self) -> f64 {
        self.x1
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(self) -> f64 {
        self.x0.hypot(self.x1)
    }

    /// `true` if both components are still finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x0.is_finite() && self.x1.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x0: self.x0 + rhs.x0,
            x1: self.x1 + rhs.x1,
        }
    }
}

impl Sub for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x0: self.x0 - rhs.x0,
            x1: self.x1 - rhs.x1,
        }
    }
}

impl Neg for Vector2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x0: -self.x0,
            x1: -self.x1,
        }
    }
}

/// Scalar multiplication: `Vector2 * f64`.
impl Mul<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            x0: self.x0 * rhs,
            x1: self.x1 * rhs,
        }
    }
}

impl std::fmt::Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.x0, self.x1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    const EPSILON: f64 = 1e-12;

    fn v(x0: f64, x1: f64) -> Vector2 {
        Vector2::new(x0, x1).unwrap()
    }

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(matches!(
            Vector2::new(f64::NAN, 0.0),
            Err(CoreError::InvalidNumber { field: "x0", .. })
        ));
        assert!(matches!(
            Vector2::new(0.0, f64::INFINITY),
            Err(CoreError::InvalidNumber { field: "x1", .. })
        ));
        assert!(Vector2::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn addition_and_subtraction() {
        let a = v(1.0, 2.0);
        let b = v(3.0, -4.0);
        assert_eq!(a + b, v(4.0, -2.0));
        assert_eq!(a - b, v(-2.0, 6.0));
    }

    #[test]
    fn scalar_multiplication_and_negation() {
        let a = v(2.0, -3.0);
        assert_eq!(a * 2.0, v(4.0, -6.0));
        assert_eq!(-a, v(-2.0, 3.0));
    }

    #[test]
    fn length_is_euclidean() {
        assert!((v(3.0, 4.0).length() - 5.0).abs() < EPSILON);
        assert_eq!(Vector2::ZERO.length(), 0.0);
    }

    #[test]
    fn display_is_comma_separated() {
        assert_eq!(v(0.5, -1.0).to_string(), "0.5, -1");
    }
}
