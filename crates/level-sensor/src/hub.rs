use crate::source::{SampleSubscriber, SensorError, SensorSource, SubscriberSlot};
use crate::types::{Sample, SensorInfo};
use glam::Vec3;
use std::sync::Arc;
use tokio::sync::mpsc;

/// In-process sensor subsystem with a single optional accelerometer.
///
/// Readings pushed through a [`SampleFeeder`] are stamped with the sensor's
/// range and handed to the registered subscriber by a background dispatch
/// task, in the order they were pushed.
pub struct SensorHub {
    sensor: Option<SensorInfo>,
    slot: Arc<SubscriberSlot>,
    reading_tx: mpsc::UnboundedSender<Vec3>,
    _task: Option<tokio::task::JoinHandle<()>>,
}

impl SensorHub {
    /// Create the hub and spawn its dispatch task. Must be called from
    /// within a tokio runtime.
    pub fn new(sensor: Option<SensorInfo>) -> Self {
        let slot = Arc::new(SubscriberSlot::new());
        let (reading_tx, reading_rx) = mpsc::unbounded_channel();

        let task = match &sensor {
            Some(info) => {
                tracing::info!(name = %info.name, max_range = info.max_range, "Accelerometer found");
                Some(tokio::spawn(dispatch_loop(
                    reading_rx,
                    slot.clone(),
                    info.max_range,
                )))
            }
            None => {
                tracing::warn!("No accelerometer on this device");
                None
            }
        };

        Self {
            sensor,
            slot,
            reading_tx,
            _task: task,
        }
    }

    /// A hub with no accelerometer.
    pub fn without_sensor() -> Self {
        Self::new(None)
    }

    pub fn sensor(&self) -> Option<&SensorInfo> {
        self.sensor.as_ref()
    }

    /// Handle for the driver side to push raw readings.
    pub fn feeder(&self) -> SampleFeeder {
        SampleFeeder {
            reading_tx: self.reading_tx.clone(),
        }
    }
}

impl SensorSource for SensorHub {
    fn start(&self, subscriber: Arc<dyn SampleSubscriber>) -> Result<(), SensorError> {
        if self.sensor.is_none() {
            return Err(SensorError::Unavailable);
        }
        self.slot.register(subscriber);
        tracing::debug!("Subscriber registered");
        Ok(())
    }

    fn stop(&self) {
        if self.slot.clear() {
            tracing::debug!("Subscriber removed");
        }
    }
}

/// Driver-side handle feeding raw readings into a [`SensorHub`].
#[derive(Clone)]
pub struct SampleFeeder {
    reading_tx: mpsc::UnboundedSender<Vec3>,
}

impl SampleFeeder {
    /// Queue a reading for dispatch. Returns `false` once the hub is gone or
    /// has no accelerometer to report it.
    pub fn push(&self, values: Vec3) -> bool {
        self.reading_tx.send(values).is_ok()
    }
}

/// Background task: drain queued readings and deliver them to the subscriber.
async fn dispatch_loop(
    mut reading_rx: mpsc::UnboundedReceiver<Vec3>,
    slot: Arc<SubscriberSlot>,
    max_range: f32,
) {
    let mut sample_count: u64 = 0;

    while let Some(values) = reading_rx.recv().await {
        let sample = Sample::new(values, max_range);
        if !slot.dispatch(&sample) {
            tracing::trace!(?values, "No subscriber, reading dropped");
            continue;
        }

        sample_count += 1;
        if sample_count % 1000 == 0 {
            tracing::debug!(sample_count, "Accelerometer samples dispatched");
        }
    }

    tracing::debug!(sample_count, "Sensor hub dispatch stopped");
}
