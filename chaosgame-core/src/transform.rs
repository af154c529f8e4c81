use serde::{Deserialize, Serialize};

use crate::complex::ComplexNumber;
use crate::matrix::Matrix2;
use crate::vector::Vector2;

/// The file-format family a transform belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    Affine2D,
    Julia,
}

impl TransformKind {
    /// Type tag written on the first line of a description file.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Affine2D => "Affine2D",
            Self::Julia => "Julia",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Affine2D" => Some(Self::Affine2D),
            "Julia" => Some(Self::Julia),
            _ => None,
        }
    }
}

/// `x → Ax + b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    matrix: Matrix2,
    offset: Vector2,
}

impl AffineTransform {
    pub fn new(matrix: Matrix2, offset: Vector2) -> Self {
        Self { matrix, offset }
    }

    /// Build from the six coefficients in file order `a00, a01, a10, a11, b0, b1`.
    pub fn from_coefficients(c: [f64; 6]) -> crate::Result<Self> {
        Ok(Self {
            matrix: Matrix2::new(c[0], c[1], c[2], c[3])?,
            offset: Vector2::new(c[4], c[5])?,
        })
    }

    pub fn matrix(&self) -> Matrix2 {
        self.matrix
    }

    pub fn offset(&self) -> Vector2 {
        self.offset
    }

    #[inline]
    pub fn apply(&self, point: Vector2) -> Vector2 {
        self.matrix.apply(point) + self.offset
    }
}

/// Which square-root branch a [`JuliaTransform`] takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Normalize by signum. Zero maps to `Positive`.
    pub fn from_signum(sign: i32) -> Self {
        if sign < 0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// One branch of the inverse quadratic Julia map `z → ±√(z − c)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JuliaTransform {
    c: ComplexNumber,
    sign: Sign,
}

impl JuliaTransform {
    pub fn new(c: ComplexNumber, sign: i32) -> Self {
        Self::with_sign(c, Sign::from_signum(sign))
    }

    pub fn with_sign(c: ComplexNumber, sign: Sign) -> Self {
        Self { c, sign }
    }

    /// Both branches for `c`, positive first. Sampling the two uniformly
    /// covers the whole Julia set.
    pub fn branches(c: ComplexNumber) -> [Self; 2] {
        [
            Self::with_sign(c, Sign::Positive),
            Self::with_sign(c, Sign::Negative),
        ]
    }

    pub fn c(&self) -> ComplexNumber {
        self.c
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn apply(&self, point: Vector2) -> Vector2 {
        let z = ComplexNumber::from(point) - self.c;
        (z.principal_sqrt() * self.sign.factor()).into()
    }
}

/// A map from the plane to itself, applied at each chaos-game step.
///
/// `Display` produces the canonical one-line serialization used by the
/// description file format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Affine(AffineTransform),
    Julia(JuliaTransform),
}

impl Transform {
    #[inline]
    pub fn apply(&self, point: Vector2) -> Vector2 {
        match self {
            Self::Affine(t) => t.apply(point),
            Self::Julia(t) => t.apply(point),
        }
    }

    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Affine(_) => TransformKind::Affine2D,
            Self::Julia(_) => TransformKind::Julia,
        }
    }
}

impl From<AffineTransform> for Transform {
    fn from(t: AffineTransform) -> Self {
        Self::Affine(t)
    }
}

impl From<JuliaTransform> for Transform {
    fn from(t: JuliaTransform) -> Self {
        Self::Julia(t)
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Affine(t) => {
                let [a00, a01, a10, a11] = t.matrix.coefficients();
                write!(
                    f,
                    "{a00}, {a01}, {a10}, {a11}, {}, {}",
                    t.offset.x0(),
                    t.offset.x1()
                )
            }
            Self::Julia(t) => write!(f, "{}, {}", t.c.re(), t.c.im()),
        }
    }
}
