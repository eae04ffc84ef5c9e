//! Frequency-response analysis of designed filters.
//!
//! Evaluates discrete responses on the unit circle, the closed-form IEC 61672-1
//! A-weighting curve, and the deviation of a filter from the standard's table.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::Serialize;

use super::coefficients::FilterCoefficients;
use crate::config::PoleFrequencies;
use crate::constants::{LEVEL_EPSILON, REFERENCE_FREQUENCY_HZ};

/// IEC 61672-1 A-weighting reference values: (frequency Hz, weighting dB)
pub const STANDARD_CURVE: [(f64, f64); 10] = [
    (31.5, -39.4),
    (63.0, -26.2),
    (125.0, -16.1),
    (250.0, -8.6),
    (500.0, -3.2),
    (1000.0, 0.0),
    (2000.0, 1.2),
    (4000.0, 1.0),
    (8000.0, -1.1),
    (16000.0, -6.6),
];

/// One point of a response sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponsePoint {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
    pub phase_degrees: f64,
}

/// Filter response compared with one entry of [`STANDARD_CURVE`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConformancePoint {
    pub frequency_hz: f64,
    pub reference_db: f64,
    pub measured_db: f64,
    /// `measured_db - reference_db`
    pub error_db: f64,
}

/// `H(e^{jω})` for `b`, `a` in ascending powers of `z⁻¹`, `ω = 2π·f/fs`
pub fn frequency_response(b: &[f64], a: &[f64], frequency_hz: f64, sample_rate: f64) -> Complex64 {
    let z_inv = Complex64::from_polar(1.0, -2.0 * PI * frequency_hz / sample_rate);
    let eval = |coeffs: &[f64]| {
        coeffs
            .iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
    };
    eval(b) / eval(a)
}

/// Gain in dB, `-inf` for an exact zero
pub fn to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.log10()
}

/// Linear sweep of `points` frequencies strictly between DC and Nyquist
///
/// Both ends are excluded: the weighting has zeros at DC and the bilinear
/// image of the origin zeros sits at Nyquist.
pub fn sweep(coeffs: &FilterCoefficients, points: usize) -> Vec<ResponsePoint> {
    let nyquist = coeffs.sample_rate() / 2.0;
    (1..=points)
        .map(|k| {
            let frequency_hz = nyquist * k as f64 / (points + 1) as f64;
            let h = coeffs.response(frequency_hz);
            ResponsePoint {
                frequency_hz,
                magnitude_db: to_db(h.norm()),
                phase_degrees: h.arg().to_degrees(),
            }
        })
        .collect()
}

/// Closed-form A-weighting in dB, normalized to 0 dB at 1000 Hz
///
/// Evaluates `f4²·f⁴ / ((f²+f1²)·√(f²+f2²)·√(f²+f3²)·(f²+f4²))`, the
/// magnitude of the analog prototype on the jω axis. The tabulated
/// [`STANDARD_CURVE`] values are rounded to 0.1 dB and differ from it slightly.
pub fn theoretical_a_weighting_db(frequency_hz: f64, poles: &PoleFrequencies) -> f64 {
    let raw = |f: f64| {
        let f2 = f * f;
        let num = poles.f4 * poles.f4 * f2 * f2;
        let den = (f2 + poles.f1 * poles.f1)
            * (f2 + poles.f2 * poles.f2).sqrt()
            * (f2 + poles.f3 * poles.f3).sqrt()
            * (f2 + poles.f4 * poles.f4);
        to_db(num / den)
    };
    raw(frequency_hz) - raw(REFERENCE_FREQUENCY_HZ)
}

/// Compare a filter with [`STANDARD_CURVE`] at every tabulated frequency
/// below Nyquist
pub fn conformance(coeffs: &FilterCoefficients) -> Vec<ConformancePoint> {
    let nyquist = coeffs.sample_rate() / 2.0;
    STANDARD_CURVE
        .iter()
        .filter(|&&(f, _)| f < nyquist)
        .map(|&(frequency_hz, reference_db)| {
            let measured_db = to_db(coeffs.response(frequency_hz).norm() + LEVEL_EPSILON);
            ConformancePoint {
                frequency_hz,
                reference_db,
                measured_db,
                error_db: measured_db - reference_db,
            }
        })
        .collect()
}
