use crate::mapping::LEVEL_POSITION;

/// Direction in which a tube is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TubeOrientation {
    #[default]
    Vertical,
    Horizontal,
}

impl TubeOrientation {
    /// Resolve a stored index, falling back to `Vertical` for unknown values.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => TubeOrientation::Horizontal,
            _ => TubeOrientation::Vertical,
        }
    }
}

/// One bubble tube. Position 0.0 is the top (or left) end, 1.0 the bottom
/// (or right) end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleIndicator {
    orientation: TubeOrientation,
    position: f32,
}

impl BubbleIndicator {
    pub fn new(orientation: TubeOrientation) -> Self {
        Self {
            orientation,
            position: LEVEL_POSITION,
        }
    }

    pub fn orientation(&self) -> TubeOrientation {
        self.orientation
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Move the bubble. Positions outside `[0.0, 1.0]` (and NaN) are ignored
    /// and the bubble stays where it was. Returns whether the bubble moved.
    pub fn set_position(&mut self, position: f32) -> bool {
        if !(0.0..=1.0).contains(&position) {
            return false;
        }
        let moved = self.position != position;
        self.position = position;
        moved
    }

    /// Draw the tube as text, `cells` characters long, with the bubble
    /// marked `O` and the center marked `|`.
    pub fn render(&self, cells: usize) -> String {
        let cells = cells.max(3);
        let last = (cells - 1) as f32;
        let bubble = (self.position * last).round() as usize;
        let center = (LEVEL_POSITION * last).round() as usize;

        let body: String = (0..cells)
            .map(|i| match i {
                i if i == bubble => 'O',
                i if i == center => '|',
                _ => '-',
            })
            .collect();

        match self.orientation {
            TubeOrientation::Horizontal => format!("[{body}]"),
            TubeOrientation::Vertical => body
                .chars()
                .map(|c| match c {
                    '-' => ':',
                    '|' => '=',
                    other => other,
                })
                .collect(),
        }
    }
}
