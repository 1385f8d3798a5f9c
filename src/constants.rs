//! Shared numeric constants for curve shaping and output granularity.

/// Color temperatures derived from a lux reading are rounded to this step
/// in Kelvin. Downstream light drivers only resolve 5 K increments, so the
/// rounding is a hardware-granularity convention rather than a precision
/// artifact.
pub const KELVIN_STEP: f64 = 5.0;

/// Gain applied inside the tanh brightness ramp. With a gain of 2.0 the
/// shaped value reaches about 96% of its asymptote one full transition
/// window after the sunrise/sunset crossover.
pub const TANH_RAMP_GAIN: f64 = 2.0;

/// Day-position anchor at solar noon.
pub const ANCHOR_NOON: f64 = 1.0;

/// Day-position anchor at solar midnight.
pub const ANCHOR_MIDNIGHT: f64 = -1.0;

/// Day-position anchor at the horizon crossings (sunrise and sunset).
pub const ANCHOR_HORIZON: f64 = 0.0;
