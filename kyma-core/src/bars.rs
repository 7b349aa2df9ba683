//! Scrolling bar-graph state.

use crate::smooth::smooth;

/// Number of bar columns across the display (128 px wide, 2 px per bar)
pub const BAR_COLUMNS: usize = 64;

/// Tallest bar in pixels (display height minus one)
pub const MAX_BAR_HEIGHT: u8 = 63;

/// Scale a 0-255 volume byte to a clamped bar height
pub fn scale_volume(volume: u8) -> u8 {
    let height = volume as u16 * MAX_BAR_HEIGHT as u16 / 255;
    height.min(MAX_BAR_HEIGHT as u16) as u8
}

/// Left-scrolling history of smoothed bar heights.
///
/// Each update smooths the incoming target against the most recent bar,
/// drops the oldest column, and appends the result on the right.
#[derive(Debug, Clone)]
pub struct BarGraph {
    heights: [u8; BAR_COLUMNS],
}

impl Default for BarGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BarGraph {
    /// Create an empty bar graph
    pub const fn new() -> Self {
        Self {
            heights: [0; BAR_COLUMNS],
        }
    }

    /// Push a new target height; returns the smoothed height appended
    pub fn push(&mut self, target: u8) -> u8 {
        let last = self.heights[BAR_COLUMNS - 1];
        let next = smooth(last, target);
        self.heights.copy_within(1.., 0);
        self.heights[BAR_COLUMNS - 1] = next;
        next
    }

    /// Current column heights, oldest first
    pub fn heights(&self) -> &[u8; BAR_COLUMNS] {
        &self.heights
    }
}
