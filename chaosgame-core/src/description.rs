use serde::{Deserialize, Serialize};

use crate::complex::ComplexNumber;
use crate::error::CoreError;
use crate::matrix::Matrix2;
use crate::transform::{AffineTransform, JuliaTransform, Transform};
use crate::vector::Vector2;

/// Everything needed to play the chaos game: plane bounds and the ordered
/// set of transforms to choose from.
///
/// `min < max` on both axes is expected but not checked here; degenerate
/// bounds are rejected when a pixel grid is derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FractalDescription {
    min: Vector2,
    max: Vector2,
    transforms: Vec<Transform>,
}

/// Deserialization helper. Enforces the non-empty transform list.
impl<'de> Deserialize<'de> for FractalDescription {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            min: Vector2,
            max: Vector2,
            transforms: Vec<Transform>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.min, raw.max, raw.transforms).map_err(serde::de::Error::custom)
    }
}

impl FractalDescription {
    pub fn new(min: Vector2, max: Vector2, transforms: Vec<Transform>) -> crate::Result<Self> {
        if transforms.is_empty() {
            return Err(CoreError::NoTransforms);
        }
        Ok(Self {
            min,
            max,
            transforms,
        })
    }

    /// Lower-left corner of the plane region.
    pub fn min(&self) -> Vector2 {
        self.min
    }

    /// Upper-right corner of the plane region.
    pub fn max(&self) -> Vector2 {
        self.max
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    // -- Presets --

    /// Sierpinski triangle on the unit square.
    pub fn sierpinski() -> Self {
        let transforms = [(0.0, 0.0), (0.25, 0.5), (0.5, 0.0)]
            .into_iter()
            .map(|(b0, b1)| Transform::Affine(affine([0.5, 0.0, 0.0, 0.5, b0, b1])))
            .collect();
        Self {
            min: Vector2::new_unchecked(0.0, 0.0),
            max: Vector2::new_unchecked(1.0, 1.0),
            transforms,
        }
    }

    /// Barnsley's fern with its four classic maps.
    pub fn barnsley_fern() -> Self {
        let transforms = [
            [0.0, 0.0, 0.0, 0.16, 0.0, 0.0],
            [0.85, 0.04, -0.04, 0.85, 0.0, 1.6],
            [0.2, -0.26, 0.23, 0.22, 0.0, 1.6],
            [-0.15, 0.28, 0.26, 0.24, 0.0, 0.44],
        ]
        .into_iter()
        .map(|c| Transform::Affine(affine(c)))
        .collect();
        Self {
            min: Vector2::new_unchecked(-2.65, 0.0),
            max: Vector2::new_unchecked(2.65, 10.0),
            transforms,
        }
    }

    /// The default constant for [`julia`](Self::julia): `c = -0.74543 + 0.11301i`.
    pub fn default_julia_c() -> ComplexNumber {
        ComplexNumber::new_unchecked(-0.74543, 0.11301)
    }

    /// Julia set for [`default_julia_c`](Self::default_julia_c).
    pub fn julia() -> Self {
        Self::julia_with(Self::default_julia_c())
    }

    /// Julia set for an arbitrary constant, sampled through both square-root
    /// branches over `[-1.6, 1.6] × [-1, 1]`.
    pub fn julia_with(c: ComplexNumber) -> Self {
        Self {
            min: Vector2::new_unchecked(-1.6, -1.0),
            max: Vector2::new_unchecked(1.6, 1.0),
            transforms: JuliaTransform::branches(c)
                .into_iter()
                .map(Transform::Julia)
                .collect(),
        }
    }
}

/// Preset coefficients are finite literals.
fn affine(c: [f64; 6]) -> AffineTransform {
    AffineTransform::new(
        Matrix2::new_unchecked(c[0], c[1], c[2], c[3]),
        Vector2::new_unchecked(c[4], c[5]),
    )
}
