//! Calibration and normalization of accelerometer samples.
//!
//! [`OrientationEngine`] subscribes to a [`level_sensor::SensorSource`],
//! subtracts the zero reference captured by the most recent calibration,
//! divides by the sensor's range and hands the result to an
//! [`OrientationListener`].

pub mod calibration;
pub mod engine;
pub mod error;
pub mod listener;

pub use calibration::{normalize, Calibrator};
pub use engine::OrientationEngine;
pub use error::EngineError;
pub use level_config::NormalizationPolicy;
pub use listener::OrientationListener;
