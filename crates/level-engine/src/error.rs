use level_sensor::SensorError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Accelerometer unavailable; orientation will not update")]
    SensorUnavailable,
    #[error("Cannot normalize against sensor range {max_range}")]
    NormalizationUnavailable { max_range: f32 },
}

impl From<SensorError> for EngineError {
    fn from(err: SensorError) -> Self {
        match err {
            SensorError::Unavailable => EngineError::SensorUnavailable,
        }
    }
}
