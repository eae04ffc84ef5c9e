/// Common trait for sample-by-sample filters
///
/// Implemented by `DirectForm2` and `AWeightingFilter`. `process` must not
/// allocate; it runs once per sample inside the audio loop.
pub trait Filter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f64) -> f64;

    /// Clear internal state without touching coefficients
    fn reset(&mut self);

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
