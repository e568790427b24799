use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Accelerometer source configuration.
    pub sensor: SensorConfig,
    /// Calibration and normalization.
    pub engine: EngineConfig,
    /// Bubble indicator mapping.
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Whether an accelerometer is present. `false` simulates a device without one.
    pub enabled: bool,
    /// Reported sensor name.
    pub name: String,
    /// Maximum magnitude the sensor can report, in its native unit (m/s^2).
    pub max_range: f32,
    /// Delivery interval hint in milliseconds.
    pub sample_interval_ms: u64,
    /// Constant offset added to every simulated reading, like a device lying
    /// on a slightly uneven surface.
    #[serde(with = "vec3_serde")]
    pub mounting_bias: Vec3,
    /// Peak simulated tilt in degrees.
    pub tilt_amplitude_deg: f32,
    /// Period of one simulated tilt oscillation in seconds.
    pub tilt_period_secs: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "Simulated 3-axis accelerometer".into(),
            max_range: 19.6133,
            // Matches the platform's "normal" delay of ~200ms.
            sample_interval_ms: 200,
            mounting_bias: Vec3::new(0.15, -0.1, 0.0),
            tilt_amplitude_deg: 1.5,
            tilt_period_secs: 12.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub normalization: NormalizationPolicy,
}

/// How a calibrated reading is mapped onto the sensor's range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// `(raw - offset) / max_range`.
    #[default]
    Plain,
    /// Truncate `raw - offset` toward zero to a multiple of `step` before
    /// dividing. Produces a dead zone of width `step` around level.
    Quantized { step: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Amplification applied to normalized values before positioning the bubble.
    /// Small tilts would otherwise barely move it.
    pub scale: f32,
    /// Capture a fresh zero reference every time the level becomes visible.
    pub recalibrate_on_resume: bool,
    /// Number of character cells used to draw one tube.
    pub tube_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            recalibrate_on_resume: true,
            tube_length: 21,
        }
    }
}

// Stored as a plain `[x, y, z]` array in TOML.
mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Vec3, s: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y, v.z].serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec3, D::Error> {
        let [x, y, z] = <[f32; 3]>::deserialize(d)?;
        Ok(Vec3::new(x, y, z))
    }
}
