use std::f64::consts::PI;

/// Sine tone sampled at `sample_rate`, starting at phase zero
pub fn sine(frequency_hz: f64, amplitude: f64, duration_secs: f64, sample_rate: f64) -> Vec<f64> {
    let num_samples = (duration_secs * sample_rate) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            amplitude * (2.0 * PI * frequency_hz * t).sin()
        })
        .collect()
}

/// Sum of equal-amplitude tones, each scaled by `1 / frequencies.len()`
pub fn multitone(frequencies: &[f64], duration_secs: f64, sample_rate: f64) -> Vec<f64> {
    let num_samples = (duration_secs * sample_rate) as usize;
    if frequencies.is_empty() {
        return vec![0.0; num_samples];
    }
    let amplitude = 1.0 / frequencies.len() as f64;
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            frequencies
                .iter()
                .map(|&f| amplitude * (2.0 * PI * f * t).sin())
                .sum()
        })
        .collect()
}

/// Unit impulse: 1 followed by `len - 1` zeros
pub fn impulse(len: usize) -> Vec<f64> {
    let mut samples = vec![0.0; len];
    if let Some(first) = samples.first_mut() {
        *first = 1.0;
    }
    samples
}
