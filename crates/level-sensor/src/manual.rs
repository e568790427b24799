use crate::source::{SampleSubscriber, SensorError, SensorSource, SubscriberSlot};
use crate::types::Sample;
use glam::Vec3;
use std::sync::Arc;

/// Source whose samples are pushed by the caller and delivered inline.
///
/// Useful for tests and for hosts that already own a sensor callback and
/// only need to forward it.
pub struct ManualSource {
    available: bool,
    slot: SubscriberSlot,
}

impl ManualSource {
    pub fn new() -> Self {
        Self {
            available: true,
            slot: SubscriberSlot::new(),
        }
    }

    /// A source that reports no accelerometer.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            slot: SubscriberSlot::new(),
        }
    }

    /// Deliver a reading on the caller's thread. Returns whether a
    /// subscriber received it.
    pub fn deliver(&self, values: Vec3, max_range: f32) -> bool {
        self.slot.dispatch(&Sample::new(values, max_range))
    }

    pub fn is_started(&self) -> bool {
        self.slot.is_registered()
    }
}

impl Default for ManualSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for ManualSource {
    fn start(&self, subscriber: Arc<dyn SampleSubscriber>) -> Result<(), SensorError> {
        if !self.available {
            return Err(SensorError::Unavailable);
        }
        self.slot.register(subscriber);
        Ok(())
    }

    fn stop(&self) {
        self.slot.clear();
    }
}
