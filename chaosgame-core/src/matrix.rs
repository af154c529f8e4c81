use serde::Serialize;

use crate::error::check_finite;
use crate::vector::Vector2;

/// A 2×2 real matrix, stored row by row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix2 {
    a00: f64,
    a01: f64,
    a10: f64,
    a11: f64,
}

impl<'de> serde::Deserialize<'de> for Matrix2 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            a00: f64,
            a01: f64,
            a10: f64,
            a11: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.a00, raw.a01, raw.a10, raw.a11).map_err(serde::de::Error::custom)
    }
}

impl Matrix2 {
    pub const IDENTITY: Self = Self {
        a00: 1.0,
        a01: 0.0,
        a10: 0.0,
        a11: 1.0,
    };

    pub fn new(a00: f64, a01: f64, a10: f64, a11: f64) -> crate::Result<Self> {
        Ok(Self {
            a00: check_finite("a00", a00)?,
            a01: check_finite("a01", a01)?,
            a10: check_finite("a10", a10)?,
            a11: check_finite("a11", a11)?,
        })
    }

    #[inline]
    pub(crate) const fn new_unchecked(a00: f64, a01: f64, a10: f64, a11: f64) -> Self {
        Self { a00, a01, a10, a11 }
    }

    /// Coefficients in row-major order: `[a00, a01, a10, a11]`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a00, self.a01, self.a10, self.a11]
    }

    /// Matrix–vector product `A · v`.
    #[inline]
    pub fn apply(&self, v: Vector2) -> Vector2 {
        Vector2::new_unchecked(
            self.a00 * v.x0() + self.a01 * v.x1(),
            self.a10 * v.x0() + self.a11 * v.x1(),
        )
    }
}
