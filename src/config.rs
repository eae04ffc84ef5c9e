//! Configuration for the A-weighting filter design.
//!
//! ## Pole Frequencies
//!
//! The analog prototype is fixed by four corner frequencies. The standard set
//! is available as the constant [`PoleFrequencies::IEC_61672`]; a TOML file can
//! override it for experiments:
//!
//! ```toml
//! sample_rate = 96000
//!
//! [poles]
//! f1 = 20.6
//! f2 = 107.7
//! f3 = 737.9
//! f4 = 12194.0
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeightingError};

/// Sample rate in Hz
///
/// Parsed from command-line text. Useful when rates are written the way audio
/// people write them.
///
/// # Parsing formats
/// - `48000` - rate in Hz (no suffix)
/// - `48000hz` or `48000Hz` - rate in Hz (explicit)
/// - `48k`, `44.1kHz` - rate in kHz
///
/// # Example
/// ```
/// use aweighting::config::SampleRate;
///
/// let rate: SampleRate = "44.1kHz".parse().unwrap();
/// assert!((rate.as_hz() - 44100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate(f64);

impl SampleRate {
    /// Create from a rate in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    /// Get rate in Hz
    pub fn as_hz(&self) -> f64 {
        self.0
    }

    /// Rate rounded to whole Hz, as stored in WAV headers and exports
    pub fn as_whole_hz(&self) -> u32 {
        self.0.round() as u32
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(48000.0)
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.0)
    }
}

impl FromStr for SampleRate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        let (num, scale) = if let Some(num) = lower.strip_suffix("khz") {
            (num, 1000.0)
        } else if let Some(num) = lower.strip_suffix('k') {
            (num, 1000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid sample rate: {}", s))?;
        let hz = value * scale;
        if !hz.is_finite() || hz <= 0.0 {
            return Err("sample rate must be positive".to_string());
        }
        Ok(Self::from_hz(hz))
    }
}

/// Corner frequencies of the analog prototype in Hz
///
/// The prototype is `s⁴ / ((s+p1)²(s+p2)(s+p3)(s+p4)²)` with `pᵢ = 2π·fᵢ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoleFrequencies {
    /// Low double pole
    pub f1: f64,
    /// Lower single pole
    pub f2: f64,
    /// Upper single pole
    pub f3: f64,
    /// High double pole
    pub f4: f64,
}

impl PoleFrequencies {
    /// Pole frequencies defined by IEC 61672-1
    pub const IEC_61672: Self = Self {
        f1: 20.60,
        f2: 107.7,
        f3: 737.9,
        f4: 12194.0,
    };

    /// Frequencies in declaration order
    pub fn as_array(&self) -> [f64; 4] {
        [self.f1, self.f2, self.f3, self.f4]
    }

    /// Largest of the four frequencies
    pub fn highest(&self) -> f64 {
        self.as_array()
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Reject non-positive or non-finite frequencies
    ///
    /// # Errors
    /// Returns `WeightingError::InvalidPole` naming the first offending pole
    /// (1-based, matching `f1`..`f4`).
    pub fn validate(&self) -> Result<()> {
        for (i, &hz) in self.as_array().iter().enumerate() {
            if !hz.is_finite() || hz <= 0.0 {
                return Err(WeightingError::InvalidPole {
                    index: i + 1,
                    frequency_hz: hz,
                });
            }
        }
        Ok(())
    }
}

impl Default for PoleFrequencies {
    fn default() -> Self {
        Self::IEC_61672
    }
}

/// Filter design configuration
///
/// Use `DesignConfig::default()` for the standard pole set at 48 kHz.
///
/// # Example
/// ```
/// use aweighting::config::DesignConfig;
///
/// let config = DesignConfig::from_toml_str("sample_rate = 96000").unwrap();
/// assert_eq!(config.sample_rate, 96000.0);
/// assert_eq!(config.poles.f4, 12194.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Target sample rate in Hz
    pub sample_rate: f64,
    /// Analog prototype corner frequencies
    pub poles: PoleFrequencies,
}

impl DesignConfig {
    /// Parse a configuration from TOML text; absent fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WeightingError::Config(e.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| WeightingError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            poles: PoleFrequencies::IEC_61672,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rate_plain() {
        let rate: SampleRate = "48000".parse().unwrap();
        assert_eq!(rate.as_hz(), 48000.0);
    }

    #[test]
    fn test_sample_rate_hz_suffix() {
        let rate: SampleRate = "44100hz".parse().unwrap();
        assert_eq!(rate.as_hz(), 44100.0);

        let rate: SampleRate = "96000Hz".parse().unwrap();
        assert_eq!(rate.as_hz(), 96000.0);
    }

    #[test]
    fn test_sample_rate_khz() {
        let rate: SampleRate = "48k".parse().unwrap();
        assert_eq!(rate.as_hz(), 48000.0);

        let rate: SampleRate = "44.1kHz".parse().unwrap();
        assert!((rate.as_hz() - 44100.0).abs() < 1e-9);
        assert_eq!(rate.as_whole_hz(), 44100);
    }

    #[test]
    fn test_sample_rate_invalid() {
        assert!("abc".parse::<SampleRate>().is_err());
        assert!("-48000".parse::<SampleRate>().is_err());
        assert!("0k".parse::<SampleRate>().is_err());
    }

    #[test]
    fn test_standard_poles_valid() {
        assert!(PoleFrequencies::IEC_61672.validate().is_ok());
        assert_eq!(PoleFrequencies::IEC_61672.highest(), 12194.0);
    }

    #[test]
    fn test_invalid_pole_reports_index() {
        let poles = PoleFrequencies {
            f3: 0.0,
            ..PoleFrequencies::IEC_61672
        };
        match poles.validate() {
            Err(WeightingError::InvalidPole { index, .. }) => assert_eq!(index, 3),
            other => panic!("expected InvalidPole, got {:?}", other),
        }

        let poles = PoleFrequencies {
            f1: f64::NAN,
            ..PoleFrequencies::IEC_61672
        };
        assert!(poles.validate().is_err());
    }

    #[test]
    fn test_config_from_toml_overrides() {
        let config = DesignConfig::from_toml_str(
            r#"
            sample_rate = 44100

            [poles]
            f1 = 20.6
            f2 = 107.7
            f3 = 737.9
            f4 = 12000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.poles.f4, 12000.0);
    }

    #[test]
    fn test_config_empty_toml_is_default() {
        let config = DesignConfig::from_toml_str("").unwrap();
        assert_eq!(config, DesignConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        assert!(matches!(
            DesignConfig::from_toml_str("sample_rate = \"fast\""),
            Err(WeightingError::Config(_))
        ));
    }
}
