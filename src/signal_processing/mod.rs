pub mod direct_form2;
pub mod filter;
pub mod lfilter;
pub mod meter;
pub mod realtime;

pub use direct_form2::DirectForm2;
pub use filter::Filter;
pub use lfilter::lfilter;
pub use meter::{LevelMeter, WeightedLevelMeter};
pub use realtime::{AWeightingFilter, RealtimeFilter};
