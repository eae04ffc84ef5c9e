//! Numeric constants for filter synthesis and metering
//!
//! These constants fix the prototype dimensions and the thresholds used by
//! the design pipeline and the level meter.

/// Frequency at which the weighting curve is normalized to 0 dB.
pub const REFERENCE_FREQUENCY_HZ: f64 = 1000.0;

/// Degree of the analog prototype denominator: (s+p1)²(s+p2)(s+p3)(s+p4)².
pub const PROTOTYPE_ORDER: usize = 6;

/// Number of coefficients in a polynomial of prototype degree.
/// Also the length of the discrete `b` and `a` arrays.
pub const NUM_COEFFS: usize = PROTOTYPE_ORDER + 1;

/// Number of zeros at the origin of the analog prototype (numerator s⁴).
pub const ZEROS_AT_ORIGIN: usize = 4;

/// Magnitude below which a complex denominator is treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-300;

/// Offset added before taking logarithms of levels, avoids log(0).
pub const LEVEL_EPSILON: f64 = 1e-12;

/// Convergence threshold for the polynomial root finder.
pub const ROOT_TOLERANCE: f64 = 1e-14;

/// Iteration cap for the polynomial root finder.
pub const ROOT_MAX_ITERATIONS: usize = 2000;
