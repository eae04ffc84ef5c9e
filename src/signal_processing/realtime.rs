use super::direct_form2::DirectForm2;
use super::filter::Filter;
use crate::design::{FilterCoefficients, design_filter};
use crate::error::{Result, WeightingError};

/// Real-time filter with an explicit bind step
///
/// Starts unbound; `bind` installs coefficients and a zeroed delay line, after
/// which `process` accepts samples indefinitely. Binding again replaces the
/// coefficients and starts from a clean delay line. `reset` clears the delay
/// line and is a no-op while unbound.
#[derive(Debug, Clone, Default)]
pub struct RealtimeFilter {
    bound: Option<DirectForm2>,
}

impl RealtimeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind raw coefficient arrays
    ///
    /// # Errors
    /// Returns `WeightingError::InvalidCoefficients` if the arrays are rejected
    /// by `DirectForm2::new`; the previous binding, if any, is kept.
    pub fn bind(&mut self, b: &[f64], a: &[f64]) -> Result<()> {
        self.bound = Some(DirectForm2::new(b, a)?);
        Ok(())
    }

    /// Bind coefficients produced by the design pipeline
    pub fn bind_coefficients(&mut self, coefficients: &FilterCoefficients) {
        self.bound = Some(DirectForm2::from_coefficients(coefficients));
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Filter one sample
    ///
    /// # Errors
    /// Returns `WeightingError::NotBound` before the first `bind`.
    #[inline]
    pub fn process(&mut self, sample: f64) -> Result<f64> {
        match self.bound {
            Some(ref mut filter) => Ok(filter.process(sample)),
            None => Err(WeightingError::NotBound),
        }
    }

    /// Filter a buffer in-place
    ///
    /// # Errors
    /// Returns `WeightingError::NotBound` before the first `bind`; the buffer
    /// is left untouched.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) -> Result<()> {
        let filter = self.bound.as_mut().ok_or(WeightingError::NotBound)?;
        filter.process_buffer(buffer);
        Ok(())
    }

    pub fn reset(&mut self) {
        if let Some(ref mut filter) = self.bound {
            filter.reset();
        }
    }
}

/// A-weighting filter designed and bound in one step
///
/// # Example
/// ```
/// use aweighting::signal_processing::{AWeightingFilter, Filter};
///
/// let mut filter = AWeightingFilter::new(48000.0).unwrap();
/// let first = filter.process(1.0);
/// assert_eq!(first, filter.coefficients().b()[0]);
/// ```
#[derive(Debug, Clone)]
pub struct AWeightingFilter {
    coefficients: FilterCoefficients,
    filter: DirectForm2,
}

impl AWeightingFilter {
    /// # Errors
    /// Returns the design errors of `design_filter`.
    pub fn new(sample_rate: f64) -> Result<Self> {
        let designed = design_filter(sample_rate)?;
        Ok(Self::from_coefficients(designed.coefficients))
    }

    pub fn from_coefficients(coefficients: FilterCoefficients) -> Self {
        Self {
            filter: DirectForm2::from_coefficients(&coefficients),
            coefficients,
        }
    }

    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coefficients
    }

    pub fn sample_rate(&self) -> f64 {
        self.coefficients.sample_rate()
    }
}

impl Filter for AWeightingFilter {
    #[inline]
    fn process(&mut self, sample: f64) -> f64 {
        self.filter.process(sample)
    }

    fn reset(&mut self) {
        self.filter.reset();
    }
}
