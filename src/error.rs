use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeightingError {
    #[error("Invalid pole frequency f{index}: {frequency_hz} Hz (must be positive)")]
    InvalidPole { index: usize, frequency_hz: f64 },

    #[error(
        "Invalid sample rate {sample_rate} Hz: must exceed twice the highest pole ({highest_pole_hz} Hz)"
    )]
    InvalidSampleRate {
        sample_rate: f64,
        highest_pole_hz: f64,
    },

    #[error("Degenerate filter: {0}")]
    DegenerateFilter(String),

    #[error("Filter has no coefficients bound")]
    NotBound,

    #[error("Invalid filter coefficients: {0}")]
    InvalidCoefficients(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Coefficient export failed: {0}")]
    Export(String),

    #[error("Signal generation failed: {0}")]
    Signal(String),

    #[error("WAV I/O error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, WeightingError>;
