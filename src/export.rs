//! Coefficient export record.
//!
//! A self-describing JSON document carrying the designed coefficients for
//! consumers outside this crate (firmware tables, other implementations):
//!
//! ```json
//! {
//!   "filter_type": "A-weighting IEC 61672-1",
//!   "sample_rate": 48000,
//!   "order": 6,
//!   "numerator_coeffs": [0.2342, ...],
//!   "denominator_coeffs": [1.0, ...]
//! }
//! ```
//!
//! Coefficients are written with shortest round-trip formatting and parsed
//! back exactly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::design::FilterCoefficients;
use crate::error::{Result, WeightingError};

/// Identifier written into every export
pub const FILTER_TYPE: &str = "A-weighting IEC 61672-1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientExport {
    pub filter_type: String,
    pub sample_rate: u32,
    pub order: usize,
    pub numerator_coeffs: Vec<f64>,
    pub denominator_coeffs: Vec<f64>,
}

impl CoefficientExport {
    pub fn from_coefficients(coefficients: &FilterCoefficients) -> Self {
        Self {
            filter_type: FILTER_TYPE.to_string(),
            sample_rate: coefficients.sample_rate().round() as u32,
            order: coefficients.order(),
            numerator_coeffs: coefficients.b().to_vec(),
            denominator_coeffs: coefficients.a().to_vec(),
        }
    }

    /// Rebuild coefficients, checking the record is self-consistent
    ///
    /// # Errors
    /// Returns `WeightingError::Export` if `order` disagrees with the
    /// denominator length, and the validation errors of
    /// `FilterCoefficients::new` otherwise.
    pub fn to_coefficients(&self) -> Result<FilterCoefficients> {
        if self.denominator_coeffs.len() != self.order + 1 {
            return Err(WeightingError::Export(format!(
                "order {} does not match {} denominator coefficients",
                self.order,
                self.denominator_coeffs.len()
            )));
        }
        FilterCoefficients::new(
            &self.numerator_coeffs,
            &self.denominator_coeffs,
            self.sample_rate as f64,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| WeightingError::Export(e.to_string()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| WeightingError::Export(e.to_string()))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .map_err(|e| WeightingError::Export(format!("{}: {}", path.display(), e)))?;
        log::debug!("Coefficients exported to {}", path.display());
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| WeightingError::Export(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}
