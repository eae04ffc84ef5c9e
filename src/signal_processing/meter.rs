use super::filter::Filter;
use super::realtime::AWeightingFilter;
use crate::constants::LEVEL_EPSILON;
use crate::error::Result;

/// Peak and RMS accumulator for level metering
///
/// Levels are reported in dB relative to a full-scale amplitude of 1.0.
#[derive(Debug, Clone, Default)]
pub struct LevelMeter {
    peak: f64,
    sum_squares: f64,
    sample_count: u64,
}

impl LevelMeter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, sample: f64) {
        self.peak = self.peak.max(sample.abs());
        self.sum_squares += sample * sample;
        self.sample_count += 1;
    }

    pub fn add_buffer(&mut self, buffer: &[f64]) {
        for &sample in buffer {
            self.add(sample);
        }
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// RMS over every sample seen, zero before the first one
    pub fn rms(&self) -> f64 {
        if self.sample_count == 0 {
            0.0
        } else {
            (self.sum_squares / self.sample_count as f64).sqrt()
        }
    }

    /// RMS level in dB, `-inf` before the first sample
    pub fn rms_db(&self) -> f64 {
        if self.sample_count == 0 {
            return f64::NEG_INFINITY;
        }
        20.0 * (self.rms() + LEVEL_EPSILON).log10()
    }

    /// Peak level in dB, `-inf` before the first sample
    pub fn peak_db(&self) -> f64 {
        if self.sample_count == 0 {
            return f64::NEG_INFINITY;
        }
        20.0 * (self.peak + LEVEL_EPSILON).log10()
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A-weighting filter followed by a level meter
///
/// # Example
/// ```
/// use aweighting::signal_processing::WeightedLevelMeter;
///
/// let mut meter = WeightedLevelMeter::new(48000.0).unwrap();
/// meter.process(0.5);
/// assert_eq!(meter.meter().sample_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedLevelMeter {
    filter: AWeightingFilter,
    meter: LevelMeter,
}

impl WeightedLevelMeter {
    pub fn new(sample_rate: f64) -> Result<Self> {
        Ok(Self {
            filter: AWeightingFilter::new(sample_rate)?,
            meter: LevelMeter::new(),
        })
    }

    /// Weight one sample, record it, and return it
    #[inline]
    pub fn process(&mut self, sample: f64) -> f64 {
        let weighted = self.filter.process(sample);
        self.meter.add(weighted);
        weighted
    }

    /// Weight a buffer in-place and record every output
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn meter(&self) -> &LevelMeter {
        &self.meter
    }

    /// Clear statistics but keep the filter running
    pub fn reset_statistics(&mut self) {
        self.meter.reset();
    }

    /// Clear statistics and filter state
    pub fn reset(&mut self) {
        self.meter.reset();
        self.filter.reset();
    }
}
