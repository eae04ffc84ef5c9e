use num_complex::Complex64;

use super::polynomial::Polynomial;
use super::response::{frequency_response, to_db};
use super::roots::polynomial_roots;
use super::transfer::{Domain, TransferFunction};
use crate::error::{Result, WeightingError};

/// Discrete recursive-filter coefficients
///
/// `b` and `a` are in ascending powers of `z⁻¹` and `a[0] = 1`. Immutable once
/// built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCoefficients {
    b: Polynomial,
    a: Polynomial,
    sample_rate: f64,
}

impl FilterCoefficients {
    /// Validate and wrap coefficient arrays
    ///
    /// # Errors
    /// Returns `WeightingError::InvalidCoefficients` if either array is empty,
    /// too long, contains non-finite values, or `a[0] != 1`, and
    /// `WeightingError::InvalidSampleRate` for a non-positive rate.
    pub fn new(b: &[f64], a: &[f64], sample_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(WeightingError::InvalidSampleRate {
                sample_rate,
                highest_pole_hz: 0.0,
            });
        }
        if b.iter().chain(a.iter()).any(|c| !c.is_finite()) {
            return Err(WeightingError::InvalidCoefficients(
                "coefficients must be finite".to_string(),
            ));
        }
        if a.first() != Some(&1.0) {
            return Err(WeightingError::InvalidCoefficients(format!(
                "a[0] must be 1, got {:?}",
                a.first()
            )));
        }
        let wrap = |coeffs: &[f64], name: &str| {
            Polynomial::new(coeffs).ok_or_else(|| {
                WeightingError::InvalidCoefficients(format!(
                    "{} has {} coefficients",
                    name,
                    coeffs.len()
                ))
            })
        };
        Ok(Self {
            b: wrap(b, "b")?,
            a: wrap(a, "a")?,
            sample_rate,
        })
    }

    /// Take `b` and `a` from a discrete transfer function
    pub fn from_transfer(tf: &TransferFunction, sample_rate: f64) -> Result<Self> {
        if tf.domain() != Domain::Discrete {
            return Err(WeightingError::InvalidCoefficients(
                "transfer function is not in the discrete domain".to_string(),
            ));
        }
        Self::new(
            tf.numerator().coeffs(),
            tf.denominator().coeffs(),
            sample_rate,
        )
    }

    /// Scale `b` so the response at `frequency_hz` has unit magnitude
    ///
    /// Only the gain changes; pole and zero locations stay where they are.
    pub fn with_unity_gain_at(&self, frequency_hz: f64) -> Result<Self> {
        let gain = self.response(frequency_hz).norm();
        if !gain.is_finite() || gain == 0.0 {
            return Err(WeightingError::DegenerateFilter(format!(
                "discrete gain {} at {} Hz cannot be normalized",
                gain, frequency_hz
            )));
        }
        log::debug!(
            "Discrete gain at {} Hz before trim: {:.9} ({:+.6} dB)",
            frequency_hz,
            gain,
            to_db(gain)
        );
        Ok(Self {
            b: self.b.scaled(1.0 / gain),
            ..*self
        })
    }

    /// Feed-forward coefficients
    pub fn b(&self) -> &[f64] {
        self.b.coeffs()
    }

    /// Feedback coefficients, `a[0] = 1`
    pub fn a(&self) -> &[f64] {
        self.a.coeffs()
    }

    pub fn order(&self) -> usize {
        self.a.degree()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn response(&self, frequency_hz: f64) -> Complex64 {
        frequency_response(self.b(), self.a(), frequency_hz, self.sample_rate)
    }

    pub fn magnitude_db(&self, frequency_hz: f64) -> f64 {
        to_db(self.response(frequency_hz).norm())
    }

    pub fn phase_degrees(&self, frequency_hz: f64) -> f64 {
        self.response(frequency_hz).arg().to_degrees()
    }

    /// Poles in the z-plane (roots of `a` read as a polynomial in `z`)
    pub fn poles(&self) -> Vec<Complex64> {
        polynomial_roots(self.a())
    }

    /// True when every pole lies strictly inside the unit circle
    pub fn is_stable(&self) -> bool {
        self.poles().iter().all(|p| p.norm() < 1.0)
    }
}
