use crate::calibration::Calibrator;
use crate::error::EngineError;
use crate::listener::OrientationListener;
use glam::Vec3;
use level_config::NormalizationPolicy;
use level_sensor::{Sample, SampleSubscriber, SensorSource};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Calibrates and normalizes accelerometer samples from one source and
/// forwards them to one listener.
///
/// Sample delivery and `calibrate()` may run on different threads; the
/// calibration state is guarded by a mutex that is never held while the
/// listener runs.
pub struct OrientationEngine<S, L> {
    source: S,
    shared: Arc<Shared<L>>,
}

struct Shared<L> {
    state: Mutex<State>,
    listener: L,
}

struct State {
    calibrator: Calibrator,
    /// Set after a degenerate range has been reported, cleared by the next
    /// sample that normalizes.
    range_warned: bool,
}

impl<S, L> OrientationEngine<S, L>
where
    S: SensorSource,
    L: OrientationListener + 'static,
{
    pub fn new(source: S, policy: NormalizationPolicy, listener: L) -> Self {
        Self {
            source,
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    calibrator: Calibrator::new(policy),
                    range_warned: false,
                }),
                listener,
            }),
        }
    }

    /// Use the next delivered sample as the zero reference.
    pub fn calibrate(&self) {
        self.shared.lock().calibrator.request();
        tracing::debug!("Calibration requested");
    }

    /// Subscribe to the sensor source.
    ///
    /// A missing accelerometer is reported here once and is not fatal: the
    /// engine stays usable and the listener simply receives nothing.
    pub fn start(&self) -> Result<(), EngineError> {
        match self.source.start(self.shared.clone()) {
            Ok(()) => {
                tracing::info!("Orientation engine started");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%e, "Orientation engine started without a sensor");
                Err(e.into())
            }
        }
    }

    /// Unsubscribe from the sensor source. The listener is not invoked
    /// after this returns. Calibration state is kept.
    pub fn stop(&self) {
        self.source.stop();
        tracing::info!("Orientation engine stopped");
    }

    pub fn calibration_offset(&self) -> Vec3 {
        self.shared.lock().calibrator.offset()
    }

    pub fn is_calibration_pending(&self) -> bool {
        self.shared.lock().calibrator.is_pending()
    }

    #[cfg(test)]
    fn range_warned(&self) -> bool {
        self.shared.lock().range_warned
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn listener(&self) -> &L {
        &self.shared.listener
    }
}

impl<L> Shared<L> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<L: OrientationListener> SampleSubscriber for Shared<L> {
    fn on_sample(&self, sample: &Sample) {
        let normalized = {
            let mut state = self.lock();
            match state.calibrator.apply(sample) {
                Ok(normalized) => {
                    state.range_warned = false;
                    normalized
                }
                Err(e) => {
                    if state.range_warned {
                        tracing::debug!(%e, "Sample skipped");
                    } else {
                        tracing::warn!(%e, "Sample skipped");
                        state.range_warned = true;
                    }
                    return;
                }
            }
        };

        self.listener
            .on_orientation_changed(normalized.x, normalized.y, normalized.z);
    }
}
