//! Connect-time configuration: feature gates, smoothing and debounce tuning, and the
//! throttle lever calibration.

mod feature_gates;
mod model_configuration;
mod source;
#[cfg(test)]
mod tests;

pub use feature_gates::{FeatureGates, Subsystem};
pub use model_configuration::{ConfigError, ModelConfiguration};
pub use source::{ConfigSource, IniFileSource};
