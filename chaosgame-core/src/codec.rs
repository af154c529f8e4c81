//! Line-oriented text format for [`FractalDescription`].
//!
//! ```text
//! Affine2D                      # type tag: Affine2D or Julia
//! 0, 0                          # min corner
//! 1, 1                          # max corner
//! 0.5, 0, 0, 0.5, 0, 0          # one transform per line
//! ```
//!
//! Everything after `#` is ignored and blank lines are skipped. A bad tag or
//! bounds line aborts decoding; a bad transform line is logged and skipped.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::complex::ComplexNumber;
use crate::description::FractalDescription;
use crate::error::CoreError;
use crate::transform::{AffineTransform, JuliaTransform, Sign, Transform, TransformKind};
use crate::vector::Vector2;

const COMMENT: char = '#';
const SEPARATOR: char = ',';

/// Parse a description from its text form.
pub fn decode(text: &str) -> crate::Result<FractalDescription> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, raw)| (i + 1, strip_comment(raw)))
        .filter(|(_, line)| !line.is_empty());

    let (tag_line, tag) = lines.next().ok_or(CoreError::Parse {
        line: 1,
        token: String::new(),
        reason: "missing type tag",
    })?;
    let kind = TransformKind::from_tag(tag).ok_or_else(|| CoreError::Parse {
        line: tag_line,
        token: tag.to_string(),
        reason: "unknown type tag",
    })?;

    let mut read_bounds = || -> crate::Result<Vector2> {
        let (line_no, line) = lines.next().ok_or(CoreError::Parse {
            line: tag_line,
            token: String::new(),
            reason: "unexpected end of input while reading bounds",
        })?;
        let [x0, x1] = parse_values::<2>(line_no, line)?;
        Vector2::new(x0, x1)
    };
    let min = read_bounds()?;
    let max = read_bounds()?;

    let mut transforms = Vec::new();
    for (line_no, line) in lines {
        match parse_transform(kind, line_no, line) {
            Ok(parsed) => transforms.extend(parsed),
            Err(e) => warn!("Skipping transform on line {line_no}: {e}"),
        }
    }

    debug!(
        "Decoded {} description with {} transforms",
        kind.tag(),
        transforms.len()
    );
    FractalDescription::new(min, max, transforms)
}

/// Read and decode a description file.
pub fn decode_file(path: impl AsRef<Path>) -> crate::Result<FractalDescription> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    debug!("Read description from {}", path.display());
    decode(&text)
}

/// Render a description in the text format.
///
/// The type tag comes from the first transform. The format itself would
/// accept a mixed list written under that tag, but this is stricter: any
/// transform of another kind fails with [`CoreError::UnsupportedType`].
///
/// A negative Julia branch directly following the positive branch of the same
/// constant shares its line, since decoding a line yields both branches.
pub fn encode(description: &FractalDescription) -> crate::Result<String> {
    let transforms = description.transforms();
    let kind = transforms
        .first()
        .map(Transform::kind)
        .ok_or(CoreError::NoTransforms)?;

    let mut out = String::new();
    out.push_str(kind.tag());
    out.push('\n');
    out.push_str(&format!("{}\n{}\n", description.min(), description.max()));

    let mut open_positive: Option<ComplexNumber> = None;
    for transform in transforms {
        if transform.kind() != kind {
            return Err(CoreError::UnsupportedType {
                expected: kind.tag(),
                found: transform.kind().tag(),
            });
        }
        if let Transform::Julia(julia) = transform {
            match julia.sign() {
                Sign::Positive => open_positive = Some(julia.c()),
                Sign::Negative => {
                    if open_positive.take() == Some(julia.c()) {
                        continue;
                    }
                }
            }
        }
        out.push_str(&format!("{transform}\n"));
    }
    Ok(out)
}

/// Encode a description and write it to `path`, replacing any existing file.
pub fn encode_file(description: &FractalDescription, path: impl AsRef<Path>) -> crate::Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(description)?)?;
    debug!("Wrote description to {}", path.display());
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

fn parse_transform(kind: TransformKind, line_no: usize, line: &str) -> crate::Result<Vec<Transform>> {
    match kind {
        TransformKind::Affine2D => {
            let coefficients = parse_values::<6>(line_no, line)?;
            Ok(vec![AffineTransform::from_coefficients(coefficients)?.into()])
        }
        TransformKind::Julia => {
            let [re, im] = parse_values::<2>(line_no, line)?;
            let c = ComplexNumber::new(re, im)?;
            Ok(JuliaTransform::branches(c).map(Transform::from).to_vec())
        }
    }
}

/// Split a line on commas into exactly `N` finite numbers.
fn parse_values<const N: usize>(line_no: usize, line: &str) -> crate::Result<[f64; N]> {
    let parse_error = |token: &str, reason| CoreError::Parse {
        line: line_no,
        token: token.to_string(),
        reason,
    };

    let tokens: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
    if tokens.len() != N {
        return Err(parse_error(line, "wrong number of values"));
    }

    let mut values = [0.0; N];
    for (slot, &token) in values.iter_mut().zip(&tokens) {
        if token.is_empty() {
            return Err(parse_error(token, "empty token"));
        }
        let value: f64 = token
            .parse()
            .map_err(|_| parse_error(token, "not a number"))?;
        if !value.is_finite() {
            return Err(parse_error(token, "not a finite number"));
        }
        *slot = value;
    }
    Ok(values)
}
