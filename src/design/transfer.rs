use std::f64::consts::PI;

use num_complex::Complex64;

use super::polynomial::Polynomial;
use crate::config::PoleFrequencies;
use crate::constants::{DEGENERATE_EPSILON, ZEROS_AT_ORIGIN};
use crate::error::{Result, WeightingError};

/// Domain a transfer function is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Laplace variable `s`
    Continuous,
    /// Delay operator `z⁻¹`
    Discrete,
}

/// Rational transfer function `numerator / denominator`
///
/// The denominator is never the zero polynomial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferFunction {
    numerator: Polynomial,
    denominator: Polynomial,
    domain: Domain,
}

impl TransferFunction {
    /// # Errors
    /// Returns `WeightingError::DegenerateFilter` if the denominator is zero.
    pub fn new(numerator: Polynomial, denominator: Polynomial, domain: Domain) -> Result<Self> {
        if denominator.is_zero() {
            return Err(WeightingError::DegenerateFilter(
                "denominator is the zero polynomial".to_string(),
            ));
        }
        Ok(Self {
            numerator,
            denominator,
            domain,
        })
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Evaluate the rational function at a complex point
    ///
    /// # Errors
    /// Returns `WeightingError::DegenerateFilter` if the denominator vanishes there.
    pub fn evaluate(&self, x: Complex64) -> Result<Complex64> {
        let den = self.denominator.eval(x);
        if !(den.norm() > DEGENERATE_EPSILON) {
            return Err(WeightingError::DegenerateFilter(format!(
                "denominator vanishes at {}",
                x
            )));
        }
        Ok(self.numerator.eval(x) / den)
    }

    /// Analog frequency response at `frequency_hz` (`s = j·2π·f`)
    pub fn analog_response(&self, frequency_hz: f64) -> Result<Complex64> {
        self.evaluate(Complex64::new(0.0, 2.0 * PI * frequency_hz))
    }

    /// Scale the numerator so `|H(j·2π·f_ref)| = 1`
    ///
    /// # Errors
    /// Returns `WeightingError::DegenerateFilter` if the denominator is zero at
    /// the reference or the response there is zero or not finite.
    pub fn normalized_at(&self, reference_hz: f64) -> Result<Self> {
        let gain = self.analog_response(reference_hz)?.norm();
        if !gain.is_finite() || gain == 0.0 {
            return Err(WeightingError::DegenerateFilter(format!(
                "response magnitude {} at {} Hz cannot be normalized",
                gain, reference_hz
            )));
        }
        let k = 1.0 / gain;
        log::debug!(
            "Reference gain correction at {} Hz: k = {:e}",
            reference_hz,
            k
        );
        Ok(Self {
            numerator: self.numerator.scaled(k),
            ..*self
        })
    }
}

/// Build the analog A-weighting prototype
///
/// `H(s) = s⁴ / ((s+p1)²(s+p2)(s+p3)(s+p4)²)` with `pᵢ = 2π·fᵢ`. Every pole is
/// real and negative, so the prototype is stable for any positive frequencies.
///
/// # Errors
/// Returns `WeightingError::InvalidPole` if any frequency is not positive.
pub fn analog_prototype(poles: &PoleFrequencies) -> Result<TransferFunction> {
    poles.validate()?;

    let [p1, p2, p3, p4] = poles.as_array().map(|f| 2.0 * PI * f);

    let numerator = Polynomial::monomial(ZEROS_AT_ORIGIN).ok_or_else(|| {
        WeightingError::DegenerateFilter("numerator exceeds prototype order".to_string())
    })?;

    let factors: [&[f64]; 4] = [&[-p1, -p1], &[-p2], &[-p3], &[-p4, -p4]];
    let denominator = factors
        .iter()
        .try_fold(Polynomial::constant(1.0), |acc, roots| {
            acc.convolve(&Polynomial::from_roots(roots)?)
        })
        .ok_or_else(|| {
            WeightingError::DegenerateFilter("denominator exceeds prototype order".to_string())
        })?;

    log::debug!(
        "Analog prototype: poles {:?} Hz, denominator degree {}",
        poles.as_array(),
        denominator.degree()
    );

    TransferFunction::new(numerator, denominator, Domain::Continuous)
}
