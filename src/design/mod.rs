//! A-weighting filter synthesis.
//!
//! Pole frequencies → analog prototype → reference normalization → bilinear
//! transform → discrete reference trim. Every input is validated before the
//! first polynomial is built, so a design either completes or produces nothing.

pub mod bilinear;
pub mod coefficients;
pub mod polynomial;
pub mod response;
pub mod roots;
pub mod transfer;

pub use bilinear::bilinear;
pub use coefficients::FilterCoefficients;
pub use polynomial::Polynomial;
pub use response::{ConformancePoint, ResponsePoint, STANDARD_CURVE, conformance, sweep};
pub use transfer::{Domain, TransferFunction, analog_prototype};

use crate::config::{DesignConfig, PoleFrequencies};
use crate::constants::REFERENCE_FREQUENCY_HZ;
use crate::error::{Result, WeightingError};

/// Output of a design run: the discrete coefficients and the poles they came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignedFilter {
    pub coefficients: FilterCoefficients,
    pub poles: PoleFrequencies,
}

impl DesignedFilter {
    pub fn b(&self) -> &[f64] {
        self.coefficients.b()
    }

    pub fn a(&self) -> &[f64] {
        self.coefficients.a()
    }
}

/// Design the IEC 61672-1 A-weighting filter for `sample_rate` Hz
///
/// Deterministic: the same rate always yields bit-identical coefficients.
///
/// # Example
/// ```
/// use aweighting::design::design_filter;
///
/// let filter = design_filter(48000.0).unwrap();
/// assert_eq!(filter.a().len(), 7);
/// assert_eq!(filter.a()[0], 1.0);
/// ```
///
/// # Errors
/// Returns `WeightingError::InvalidSampleRate` unless `sample_rate` exceeds
/// twice the highest pole frequency.
pub fn design_filter(sample_rate: f64) -> Result<DesignedFilter> {
    design_filter_with(&PoleFrequencies::IEC_61672, sample_rate)
}

/// Design from a loaded configuration
pub fn design_from_config(config: &DesignConfig) -> Result<DesignedFilter> {
    design_filter_with(&config.poles, config.sample_rate)
}

/// Design with an explicit pole set
///
/// # Errors
/// Returns `WeightingError::InvalidPole` for a non-positive pole,
/// `WeightingError::InvalidSampleRate` for a rate at or below twice the highest
/// pole, and `WeightingError::DegenerateFilter` when the response cannot be
/// normalized at 1000 Hz.
pub fn design_filter_with(poles: &PoleFrequencies, sample_rate: f64) -> Result<DesignedFilter> {
    let coefficients =
        bilinear_design(poles, sample_rate)?.with_unity_gain_at(REFERENCE_FREQUENCY_HZ)?;

    log::debug!(
        "Designed order-{} A-weighting filter at {} Hz: b = {:?}, a = {:?}",
        coefficients.order(),
        sample_rate,
        coefficients.b(),
        coefficients.a()
    );

    Ok(DesignedFilter {
        coefficients,
        poles: *poles,
    })
}

/// Design the IEC 61672-1 filter without the discrete 1 kHz trim
///
/// The coefficients are the plain bilinear transform of the analog prototype
/// normalized at 1 kHz. The denominator is identical to [`design_filter`]; the
/// numerator is larger by the bilinear gain error at 1 kHz (about 1.0005 at
/// 48 kHz).
///
/// # Errors
/// Same as [`design_filter`].
pub fn design_filter_untrimmed(sample_rate: f64) -> Result<DesignedFilter> {
    let poles = PoleFrequencies::IEC_61672;
    let coefficients = bilinear_design(&poles, sample_rate)?;
    log::debug!(
        "Designed untrimmed A-weighting filter at {} Hz: b = {:?}",
        sample_rate,
        coefficients.b()
    );
    Ok(DesignedFilter {
        coefficients,
        poles,
    })
}

/// Validate, build the normalized analog prototype and map it to `z`
fn bilinear_design(poles: &PoleFrequencies, sample_rate: f64) -> Result<FilterCoefficients> {
    poles.validate()?;
    check_sample_rate(poles, sample_rate)?;

    let analog = analog_prototype(poles)?.normalized_at(REFERENCE_FREQUENCY_HZ)?;
    let discrete = bilinear(&analog, sample_rate)?;
    FilterCoefficients::from_transfer(&discrete, sample_rate)
}

fn check_sample_rate(poles: &PoleFrequencies, sample_rate: f64) -> Result<()> {
    let highest_pole_hz = poles.highest();
    if !sample_rate.is_finite() || sample_rate <= 2.0 * highest_pole_hz {
        return Err(WeightingError::InvalidSampleRate {
            sample_rate,
            highest_pole_hz,
        });
    }
    if REFERENCE_FREQUENCY_HZ >= sample_rate / 2.0 {
        return Err(WeightingError::DegenerateFilter(format!(
            "reference frequency {} Hz is not below Nyquist at {} Hz",
            REFERENCE_FREQUENCY_HZ, sample_rate
        )));
    }
    if highest_pole_hz > 0.75 * sample_rate / 2.0 {
        log::warn!(
            "Highest pole {} Hz is above 75% of Nyquist; the response will be compressed near {} Hz",
            highest_pole_hz,
            sample_rate / 2.0
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_shape() {
        let filter = design_filter(48000.0).unwrap();
        assert_eq!(filter.b().len(), 7);
        assert_eq!(filter.a().len(), 7);
        assert_eq!(filter.coefficients.order(), 6);
        assert_eq!(filter.a()[0], 1.0);
        assert_eq!(filter.poles, PoleFrequencies::IEC_61672);
    }

    #[test]
    fn test_design_is_deterministic() {
        let first = design_filter(44100.0).unwrap();
        let second = design_filter(44100.0).unwrap();
        assert_eq!(first.b(), second.b());
        assert_eq!(first.a(), second.a());
    }

    #[test]
    fn test_sample_rate_below_twice_highest_pole() {
        // 2 × 12194 = 24388 Hz
        assert!(matches!(
            design_filter(22050.0),
            Err(WeightingError::InvalidSampleRate { .. })
        ));
        assert!(design_filter(24388.0).is_err());
        assert!(design_filter(24389.0).is_ok());
        assert!(design_filter(0.0).is_err());
        assert!(design_filter(-48000.0).is_err());
        assert!(design_filter(f64::INFINITY).is_err());
    }

    #[test]
    fn test_pole_checked_before_sample_rate() {
        let poles = PoleFrequencies {
            f4: 0.0,
            ..PoleFrequencies::IEC_61672
        };
        assert!(matches!(
            design_filter_with(&poles, 0.0),
            Err(WeightingError::InvalidPole { index: 4, .. })
        ));
    }

    #[test]
    fn test_untrimmed_differs_only_by_numerator_scale() {
        let trimmed = design_filter(96000.0).unwrap();
        let untrimmed = design_filter_untrimmed(96000.0).unwrap();
        assert_eq!(trimmed.a(), untrimmed.a());
        let scale = trimmed.b()[0] / untrimmed.b()[0];
        for (t, u) in trimmed.b().iter().zip(untrimmed.b()) {
            assert!((t - u * scale).abs() < 1e-12);
        }
        assert!(untrimmed.coefficients.magnitude_db(1000.0).abs() > 1e-6);
    }

    #[test]
    fn test_design_from_config() {
        let config = DesignConfig {
            sample_rate: 96000.0,
            ..DesignConfig::default()
        };
        let filter = design_from_config(&config).unwrap();
        assert_eq!(filter.coefficients.sample_rate(), 96000.0);
    }

    #[test]
    fn test_low_poles_reference_above_nyquist() {
        let poles = PoleFrequencies {
            f1: 10.0,
            f2: 50.0,
            f3: 100.0,
            f4: 400.0,
        };
        assert!(matches!(
            design_filter_with(&poles, 1600.0),
            Err(WeightingError::DegenerateFilter(_))
        ));
    }
}
