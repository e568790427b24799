use crate::types::Sample;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("No accelerometer available")]
    Unavailable,
}

/// Receives samples from a [`SensorSource`].
///
/// Called on the source's delivery context. Implementations must not call
/// [`SensorSource::stop`] on the delivering source from inside `on_sample`.
pub trait SampleSubscriber: Send + Sync {
    fn on_sample(&self, sample: &Sample);
}

/// A single tri-axis accelerometer that can be subscribed to.
pub trait SensorSource: Send + Sync {
    /// Register `subscriber` for sample delivery, replacing any previous one.
    ///
    /// Returns [`SensorError::Unavailable`] when the source has no
    /// accelerometer. Nothing is ever delivered in that case.
    fn start(&self, subscriber: Arc<dyn SampleSubscriber>) -> Result<(), SensorError>;

    /// Deregister the current subscriber. Once this returns the subscriber
    /// is not invoked again, even if a delivery was in flight.
    fn stop(&self);
}

/// Registration cell shared by source implementations.
///
/// Dispatch holds the lock for the duration of the subscriber call, so
/// [`SubscriberSlot::clear`] waits out an in-flight delivery.
#[derive(Default)]
pub struct SubscriberSlot {
    current: Mutex<Option<Arc<dyn SampleSubscriber>>>,
}

impl SubscriberSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, subscriber: Arc<dyn SampleSubscriber>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(subscriber);
    }

    /// Remove the subscriber. Returns whether one was registered.
    pub fn clear(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    pub fn is_registered(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Deliver `sample` to the registered subscriber, if any.
    pub fn dispatch(&self, sample: &Sample) -> bool {
        let guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(subscriber) => {
                subscriber.on_sample(sample);
                true
            }
            None => false,
        }
    }
}
