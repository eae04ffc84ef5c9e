/// Root-mean-square of a signal, zero when empty
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64).sqrt()
}

/// Output-over-input RMS gain in dB, ignoring the first `skip` samples
///
/// Skipping lets the filter transient die out before measuring.
pub fn gain_db(input: &[f64], output: &[f64], skip: usize) -> f64 {
    let input_rms = rms(input.get(skip..).unwrap_or(&[]));
    let output_rms = rms(output.get(skip..).unwrap_or(&[]));
    20.0 * (output_rms / input_rms).log10()
}

/// Largest absolute value after the first `skip` samples
pub fn steady_state_amplitude(signal: &[f64], skip: usize) -> f64 {
    signal
        .iter()
        .skip(skip)
        .fold(0.0, |peak: f64, &x| peak.max(x.abs()))
}
