use super::filter::Filter;
use crate::design::FilterCoefficients;
use crate::error::{Result, WeightingError};

/// Direct Form II recursive filter with a single shared delay line
///
/// The delay line has `N = max(len(a), len(b))` entries and is allocated once,
/// at construction. `process` is O(len(a) + len(b)) with no allocation.
///
/// Each instance must be driven from one thread at a time; channels that are
/// filtered in parallel each get their own instance.
#[derive(Debug, Clone)]
pub struct DirectForm2 {
    b: Vec<f64>,
    a: Vec<f64>,
    w: Vec<f64>,
}

impl DirectForm2 {
    /// Create a filter from raw coefficient arrays
    ///
    /// All coefficients are divided by `a[0]` so the recursion can assume
    /// `a[0] = 1`; arrays with `a[0] = 1` are used bit-for-bit.
    ///
    /// # Errors
    /// Returns `WeightingError::InvalidCoefficients` if `b` or `a` is empty,
    /// any value is not finite, or `a[0]` is zero.
    pub fn new(b: &[f64], a: &[f64]) -> Result<Self> {
        if b.is_empty() || a.is_empty() {
            return Err(WeightingError::InvalidCoefficients(format!(
                "need at least one coefficient each, got len(b) = {}, len(a) = {}",
                b.len(),
                a.len()
            )));
        }
        if b.iter().chain(a.iter()).any(|c| !c.is_finite()) {
            return Err(WeightingError::InvalidCoefficients(
                "coefficients must be finite".to_string(),
            ));
        }
        let a0 = a[0];
        if a0 == 0.0 {
            return Err(WeightingError::InvalidCoefficients(
                "a[0] must be nonzero".to_string(),
            ));
        }

        let (b, a) = if a0 == 1.0 {
            (b.to_vec(), a.to_vec())
        } else {
            (
                b.iter().map(|c| c / a0).collect(),
                a.iter().map(|c| c / a0).collect(),
            )
        };
        let n = a.len().max(b.len());

        Ok(Self {
            b,
            a,
            w: vec![0.0; n],
        })
    }

    pub fn from_coefficients(coefficients: &FilterCoefficients) -> Self {
        let b = coefficients.b().to_vec();
        let a = coefficients.a().to_vec();
        let n = a.len().max(b.len());
        Self {
            b,
            a,
            w: vec![0.0; n],
        }
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Current delay-line contents, `w[0]` first
    pub fn delay_line(&self) -> &[f64] {
        &self.w
    }
}

impl Filter for DirectForm2 {
    fn process(&mut self, sample: f64) -> f64 {
        // Feedback from the pre-shift delay line
        let mut w0 = sample;
        for (a, w) in self.a.iter().zip(self.w.iter()).skip(1) {
            w0 -= a * w;
        }
        self.w[0] = w0;

        let mut output = 0.0;
        for (b, w) in self.b.iter().zip(self.w.iter()) {
            output += b * w;
        }

        let n = self.w.len();
        self.w.copy_within(0..n - 1, 1);

        output
    }

    fn reset(&mut self) {
        self.w.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fir_passthrough() {
        let mut filter = DirectForm2::new(&[1.0], &[1.0]).unwrap();
        for x in [0.5, -1.0, 3.0] {
            assert_eq!(filter.process(x), x);
        }
    }

    #[test]
    fn test_one_pole_impulse() {
        // y[n] = x[n] + 0.5·y[n-1] → 1, 0.5, 0.25, ...
        let mut filter = DirectForm2::new(&[1.0], &[1.0, -0.5]).unwrap();
        let out: Vec<f64> = [1.0, 0.0, 0.0, 0.0]
            .iter()
            .map(|&x| filter.process(x))
            .collect();
        assert_eq!(out, vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_delay_line_shift() {
        let mut filter = DirectForm2::new(&[0.0, 0.0, 1.0], &[1.0]).unwrap();
        assert_eq!(filter.process(1.0), 0.0);
        assert_eq!(filter.delay_line(), &[1.0, 1.0, 0.0]);
        assert_eq!(filter.process(2.0), 0.0);
        assert_eq!(filter.delay_line(), &[2.0, 2.0, 1.0]);
        // Two-sample delay
        assert_eq!(filter.process(3.0), 1.0);
    }

    #[test]
    fn test_normalizes_by_a0() {
        let filter = DirectForm2::new(&[2.0, 4.0], &[2.0, -1.0]).unwrap();
        assert_eq!(filter.b(), &[1.0, 2.0]);
        assert_eq!(filter.a(), &[1.0, -0.5]);
    }

    #[test]
    fn test_rejects_invalid_coefficients() {
        assert!(DirectForm2::new(&[], &[1.0]).is_err());
        assert!(DirectForm2::new(&[1.0], &[]).is_err());
        assert!(DirectForm2::new(&[1.0], &[0.0, 1.0]).is_err());
        assert!(DirectForm2::new(&[f64::INFINITY], &[1.0]).is_err());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = DirectForm2::new(&[1.0], &[1.0, -0.9]).unwrap();
        filter.process(1.0);
        filter.process(1.0);
        filter.reset();
        assert!(filter.delay_line().iter().all(|&w| w == 0.0));
        assert_eq!(filter.process(1.0), 1.0);
    }

    #[test]
    fn test_process_buffer() {
        let mut filter = DirectForm2::new(&[0.5, 0.5], &[1.0]).unwrap();
        let mut buffer = [2.0, 4.0, 6.0];
        filter.process_buffer(&mut buffer);
        assert_eq!(buffer, [1.0, 3.0, 5.0]);
    }
}
