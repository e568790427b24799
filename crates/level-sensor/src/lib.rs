//! Accelerometer sources for the spirit level.
//!
//! A [`SensorSource`] resolves a single tri-axis accelerometer on `start` and
//! delivers [`Sample`]s to one [`SampleSubscriber`] until `stop`.

pub mod hub;
pub mod manual;
pub mod simulator;
pub mod source;
pub mod types;

pub use hub::{SampleFeeder, SensorHub};
pub use manual::ManualSource;
pub use simulator::{SimulatedAccelerometer, SimulationParams};
pub use source::{SampleSubscriber, SensorError, SensorSource, SubscriberSlot};
pub use types::{Sample, SensorInfo};
