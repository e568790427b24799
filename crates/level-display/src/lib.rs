pub mod indicator;
pub mod mapping;

pub use indicator::{BubbleIndicator, TubeOrientation};
pub use mapping::{bubble_offset, DEFAULT_SCALE, LEVEL_POSITION};

use level_engine::OrientationListener;
use tokio::sync::watch;

/// Current state of both tubes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubblePositions {
    /// Driven by the x axis.
    pub horizontal: BubbleIndicator,
    /// Driven by the y axis.
    pub vertical: BubbleIndicator,
}

impl Default for BubblePositions {
    fn default() -> Self {
        Self {
            horizontal: BubbleIndicator::new(TubeOrientation::Horizontal),
            vertical: BubbleIndicator::new(TubeOrientation::Vertical),
        }
    }
}

impl BubblePositions {
    /// Apply one normalized reading. Returns whether either bubble moved.
    pub fn apply(&mut self, x: f32, y: f32, scale: f32) -> bool {
        let horizontal = self.horizontal.set_position(bubble_offset(x, scale));
        let vertical = self.vertical.set_position(bubble_offset(y, scale));
        horizontal || vertical
    }
}

/// Orientation listener that drives a pair of bubble tubes and publishes
/// them for rendering.
pub struct LevelDisplay {
    scale: f32,
    positions_tx: watch::Sender<BubblePositions>,
}

impl LevelDisplay {
    pub fn new(scale: f32) -> (Self, watch::Receiver<BubblePositions>) {
        let (positions_tx, positions_rx) = watch::channel(BubblePositions::default());
        (
            Self {
                scale,
                positions_tx,
            },
            positions_rx,
        )
    }

    /// Latest bubble positions (non-blocking).
    pub fn positions(&self) -> BubblePositions {
        *self.positions_tx.borrow()
    }
}

impl OrientationListener for LevelDisplay {
    fn on_orientation_changed(&self, x: f32, y: f32, _z: f32) {
        let scale = self.scale;
        let moved = self
            .positions_tx
            .send_if_modified(|positions| positions.apply(x, y, scale));
        if !moved {
            tracing::trace!(x, y, "Bubbles unchanged");
        }
    }
}
