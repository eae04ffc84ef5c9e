pub mod config;
pub mod constants;
pub mod design;
pub mod error;
pub mod export;
pub mod signal_processing;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{DesignConfig, PoleFrequencies, SampleRate};
pub use design::{DesignedFilter, FilterCoefficients, design_filter, design_filter_untrimmed};
pub use error::{Result, WeightingError};
pub use export::CoefficientExport;
pub use signal_processing::{AWeightingFilter, Filter, RealtimeFilter};
pub use wav::{read_wav, save_wav};
