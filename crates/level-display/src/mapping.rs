/// Bubble position that denotes a level axis.
pub const LEVEL_POSITION: f32 = 0.5;

/// Default amplification applied to normalized values.
pub const DEFAULT_SCALE: f32 = 10.0;

/// Map a normalized axis value onto a bubble position.
///
/// The result is not clamped; values outside `[0.0, 1.0]` are left for the
/// indicator to reject.
pub fn bubble_offset(axis: f32, scale: f32) -> f32 {
    LEVEL_POSITION - axis * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_maps_to_center() {
        assert_eq!(bubble_offset(0.0, DEFAULT_SCALE), LEVEL_POSITION);
    }

    #[test]
    fn tilt_moves_bubble_against_the_axis() {
        assert!((bubble_offset(0.02, DEFAULT_SCALE) - 0.3).abs() < 1e-6);
        assert!((bubble_offset(-0.02, DEFAULT_SCALE) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn large_tilt_leaves_the_tube() {
        assert!((bubble_offset(0.3, DEFAULT_SCALE) - -2.5).abs() < 1e-6);
    }
}
