use glam::Vec3;

/// Raw accelerometer reading as delivered by a sensor source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Acceleration on x, y and z in the sensor's native unit.
    pub values: Vec3,
    /// Maximum magnitude the sensor can report. Constant per sensor but
    /// carried on every sample, the way the platform reports it.
    pub max_range: f32,
}

impl Sample {
    pub fn new(values: Vec3, max_range: f32) -> Self {
        Self { values, max_range }
    }
}

/// Description of the accelerometer a source resolved on `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorInfo {
    pub name: String,
    pub max_range: f32,
}

impl SensorInfo {
    pub fn new(name: impl Into<String>, max_range: f32) -> Self {
        Self {
            name: name.into(),
            max_range,
        }
    }
}
