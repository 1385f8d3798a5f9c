//! Interpolation and ramp-shaping primitives for the curve engine.

use crate::constants::TANH_RAMP_GAIN;

/// Linear interpolation of `x` from the range `[x1, x2]` onto `[y1, y2]`,
/// clamping `x` into the source range first.
///
/// `y1 > y2` is allowed and produces a descending mapping; the output is
/// always between the two endpoint targets.
pub fn lerp_clamped(x: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    if x2 <= x1 {
        return y1;
    }
    let x = x.clamp(x1, x2);
    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}

/// Rescale a day position in `[-1, 1]` onto `[low, high]`.
pub fn rescale_position(position: f64, low: f64, high: f64) -> f64 {
    low + (high - low) * (position + 1.0) / 2.0
}

/// Proportional transition ramp over `[-1, 1]`.
///
/// `x` is elapsed time through the transition window as a signed fraction;
/// the result saturates once a full window has elapsed on either side.
pub fn linear_ramp(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// Hyperbolic-tangent transition ramp over `(-1, 1)`.
///
/// Same elapsed-time fraction as [`linear_ramp`], shaped through tanh for a
/// softer approach to the asymptotes. Exactly 0 at the crossover.
pub fn tanh_ramp(x: f64) -> f64 {
    (TANH_RAMP_GAIN * x).tanh()
}

/// Round to the nearest multiple of `step`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
