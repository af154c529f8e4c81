use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::vector::Vector2;

/// A complex number sharing the two-component layout of [`Vector2`].
///
/// `re` is the first component and `im` the second. This is a separate type
/// rather than a vector with extra methods, so complex multiplication can
/// never be applied to a plain plane point by accident. Converting between
/// the two is free (`From` in both directions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vector2", into = "Vector2")]
pub struct ComplexNumber {
    re: f64,
    im: f64,
}

impl ComplexNumber {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> crate::Result<Self> {
        Vector2::new(re, im).map(Self::from)
    }

    #[inline]
    pub(crate) const fn new_unchecked(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn re(self) -> f64 {
        self.re
    }

    #[inline]
    pub fn im(self) -> f64 {
        self.im
    }

    /// Returns `re² + im²` without taking the square root.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Returns `√(re² + im²)`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// The principal square root, derived algebraically from polar form.
    ///
    /// ```text
    /// re' = √((|z| + re) / 2)
    /// im' = sign(im) · √((|z| − re) / 2)      sign(0) = +1
    /// ```
    ///
    /// The other root is the negation of the result. Total over finite input:
    /// when `|z|` itself overflows, the root is taken as `2·√(z/4)`.
    pub fn principal_sqrt(self) -> Self {
        let magnitude = self.re.hypot(self.im);
        if !magnitude.is_finite() && self.re.is_finite() && self.im.is_finite() {
            return (self * 0.25).principal_sqrt() * 2.0;
        }
        // Rounding can push `magnitude ∓ re` a hair below zero.
        let re = (magnitude / 2.0 + self.re / 2.0).max(0.0).sqrt();
        let im = (magnitude / 2.0 - self.re / 2.0).max(0.0).sqrt();
        let sign = if self.im < 0.0 { -1.0 } else { 1.0 };
        Self { re, im: sign * im }
    }
}

impl From<Vector2> for ComplexNumber {
    #[inline]
    fn from(v: Vector2) -> Self {
        Self {
            re: v.x0(),
            im: v.x1(),
        }
    }
}

impl From<ComplexNumber> for Vector2 {
    #[inline]
    fn from(z: ComplexNumber) -> Self {
        Vector2::new_unchecked(z.re, z.im)
    }
}

// -- Arithmetic operators --

impl Add for ComplexNumber {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for ComplexNumber {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

/// `(a + bi)(c + di) = (ac − bd) + (ad + bc)i`
impl Mul for ComplexNumber {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

/// Scalar multiplication: `ComplexNumber * f64`.
impl Mul<f64> for ComplexNumber {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl Neg for ComplexNumber {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl std::fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}
