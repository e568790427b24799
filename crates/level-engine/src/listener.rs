/// Receives normalized orientation updates from an
/// [`OrientationEngine`](crate::OrientationEngine).
///
/// Values are nominally in `[-1.0, 1.0]`; `0.0` on an axis means level
/// relative to the last calibration. Called once per accepted sample on the
/// sensor's delivery context.
pub trait OrientationListener: Send + Sync {
    fn on_orientation_changed(&self, x: f32, y: f32, z: f32);
}

impl<F> OrientationListener for F
where
    F: Fn(f32, f32, f32) + Send + Sync,
{
    fn on_orientation_changed(&self, x: f32, y: f32, z: f32) {
        self(x, y, z)
    }
}
