//! Configuration for capture operations.
//!
//! [`CaptureConfig`] carries every tunable of the pipeline: pool width,
//! retry policy, page timeouts, consent-dismissal windows, and browser
//! launch options. Construct one through [`CaptureConfig::builder`].

mod builder;
mod getters;
mod types;

pub use builder::CaptureConfigBuilder;
pub use types::CaptureConfig;
