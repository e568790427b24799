use crate::hub::SampleFeeder;
use glam::{Quat, Vec3};
use std::time::Duration;

/// Standard gravity in m/s^2.
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// Parameters for [`SimulatedAccelerometer`].
#[derive(Debug, Clone, Copy)]
pub struct SimulationParams {
    pub interval: Duration,
    /// Constant offset added to every reading.
    pub bias: Vec3,
    /// Peak tilt about each axis, in degrees.
    pub amplitude_deg: f32,
    /// Duration of one full tilt oscillation, in seconds.
    pub period_secs: f32,
}

/// Generates readings of a device lying roughly flat and slowly rocking.
///
/// The x and y tilts run a quarter period apart so both bubbles move.
pub struct SimulatedAccelerometer {
    _task: tokio::task::JoinHandle<()>,
}

impl SimulatedAccelerometer {
    /// Start feeding readings into `feeder`. Stops on its own once the hub
    /// stops accepting readings.
    pub fn spawn(feeder: SampleFeeder, params: SimulationParams) -> Self {
        let task = tokio::spawn(simulation_loop(feeder, params));
        Self { _task: task }
    }
}

/// Reading at `elapsed` seconds into the simulation.
pub fn reading_at(params: &SimulationParams, elapsed: f32) -> Vec3 {
    let phase = if params.period_secs > 0.0 {
        elapsed / params.period_secs * std::f32::consts::TAU
    } else {
        0.0
    };
    let amplitude = params.amplitude_deg.to_radians();

    let tilt = Quat::from_rotation_x(amplitude * phase.sin())
        * Quat::from_rotation_y(amplitude * phase.cos());
    tilt * (Vec3::Z * STANDARD_GRAVITY) + params.bias
}

async fn simulation_loop(feeder: SampleFeeder, params: SimulationParams) {
    let mut ticker = tokio::time::interval(params.interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let start = tokio::time::Instant::now();

    tracing::info!(interval_ms = params.interval.as_millis() as u64, "Simulated accelerometer running");

    loop {
        ticker.tick().await;
        let reading = reading_at(&params, start.elapsed().as_secs_f32());
        if !feeder.push(reading) {
            tracing::info!("Sensor hub closed, simulation stopped");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParams {
        SimulationParams {
            interval: Duration::from_millis(10),
            bias: Vec3::new(0.2, -0.1, 0.0),
            amplitude_deg: 2.0,
            period_secs: 8.0,
        }
    }

    #[test]
    fn reading_keeps_gravity_magnitude() {
        let p = SimulationParams {
            bias: Vec3::ZERO,
            ..params()
        };
        for t in [0.0, 1.3, 2.0, 5.5] {
            let r = reading_at(&p, t);
            assert!((r.length() - STANDARD_GRAVITY).abs() < 1e-3);
        }
    }

    #[test]
    fn tilt_stays_within_amplitude() {
        let p = params();
        let max_lateral = STANDARD_GRAVITY * p.amplitude_deg.to_radians().sin() + 0.25;
        for step in 0..80 {
            let r = reading_at(&p, step as f32 * 0.1);
            assert!(r.x.abs() <= max_lateral);
            assert!(r.y.abs() <= max_lateral);
            assert!(r.z > 9.0);
        }
    }

    #[test]
    fn zero_period_is_static() {
        let p = SimulationParams {
            period_secs: 0.0,
            ..params()
        };
        assert_eq!(reading_at(&p, 0.0), reading_at(&p, 42.0));
    }
}
