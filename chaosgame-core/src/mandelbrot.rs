use crate::complex::ComplexNumber;

/// Iteration cap used by the escape-time renderer unless overridden.
pub const DEFAULT_MAX_ITERATIONS: u32 = 40;

/// Squared bailout radius: the orbit has escaped once `|z|² ≥ 4`.
const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Returns `true` if `c` lies inside the main cardioid.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

/// Escape-time count for the Mandelbrot set: `z_{n+1} = z_n² + c`, `z₀ = 0`.
///
/// Returns the number of iterations performed before `|z|² ≥ 4`, or
/// `max_iterations` if the orbit never escaped.
pub fn escape_time(c: ComplexNumber, max_iterations: u32) -> u32 {
    // Points in the two largest components never escape.
    if in_cardioid(c.re(), c.im()) || in_period2_bulb(c.re(), c.im()) {
        return max_iterations;
    }

    let mut z = ComplexNumber::ZERO;
    let mut n = 0;
    while n < max_iterations && z.norm_sq() < ESCAPE_RADIUS_SQ {
        z = z * z + c;
        n += 1;
    }
    n
}
