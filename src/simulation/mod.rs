mod measure;
mod noise;
mod signal;

pub use measure::{gain_db, rms, steady_state_amplitude};
pub use noise::add_gaussian_noise;
pub use signal::{impulse, multitone, sine};
