use crate::error::EngineError;
use glam::Vec3;
use level_config::NormalizationPolicy;
use level_sensor::Sample;

/// Calibration state and normalization for one accelerometer stream.
///
/// A calibration request is captured lazily: the next sample passed to
/// [`Calibrator::apply`] becomes the zero reference, so that sample itself
/// normalizes to exactly zero.
#[derive(Debug, Clone)]
pub struct Calibrator {
    offset: Vec3,
    pending: bool,
    policy: NormalizationPolicy,
}

impl Calibrator {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self {
            offset: Vec3::ZERO,
            pending: false,
            policy,
        }
    }

    /// Capture the next sample as the zero reference.
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Raw reading captured at the most recent calibration point.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Process one sample: capture it if a calibration is pending, then
    /// normalize it against the current offset.
    ///
    /// Capture happens even when the sample's range makes normalization
    /// impossible.
    pub fn apply(&mut self, sample: &Sample) -> Result<Vec3, EngineError> {
        if self.pending {
            self.offset = sample.values;
            self.pending = false;
            tracing::info!(
                offset_x = self.offset.x,
                offset_y = self.offset.y,
                offset_z = self.offset.z,
                "Calibration captured"
            );
        }
        normalize(self.policy, sample.values - self.offset, sample.max_range)
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(NormalizationPolicy::default())
    }
}

/// Scale a calibrated reading by the sensor range under `policy`.
pub fn normalize(
    policy: NormalizationPolicy,
    calibrated: Vec3,
    max_range: f32,
) -> Result<Vec3, EngineError> {
    if !max_range.is_finite() || max_range <= 0.0 {
        return Err(EngineError::NormalizationUnavailable { max_range });
    }

    let scaled = match policy {
        NormalizationPolicy::Plain => calibrated,
        NormalizationPolicy::Quantized { step } if step > 0.0 && step.is_finite() => {
            Vec3::from_array(calibrated.to_array().map(|c| (c / step).trunc() * step))
        }
        // A degenerate step quantizes nothing.
        NormalizationPolicy::Quantized { .. } => calibrated,
    };
    Ok(scaled / max_range)
}
