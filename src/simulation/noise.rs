use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, WeightingError};

/// Add zero-mean Gaussian noise in-place
///
/// The same seed always produces the same noise sequence.
pub fn add_gaussian_noise(signal: &mut [f64], std_dev: f64, seed: u64) -> Result<()> {
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| WeightingError::Signal(format!("invalid noise std dev {}: {}", std_dev, e)))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for sample in signal.iter_mut() {
        *sample += normal.sample(&mut rng);
    }
    Ok(())
}
