//! Item shapes and grid orientation.
//!
//! A shape is the item's intrinsic footprint in grid cells; orientation
//! decides whether that footprint is placed as-is or turned on its side.

use serde::{Deserialize, Serialize};

/// Which way an item lies on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Natural footprint: width columns across, height cells down.
    Vertical,
    /// Turned on its side: width and height swapped.
    Horizontal,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// Intrinsic item footprint in grid cells. Immutable from the grid's
/// perspective; the placed width/height always derive from this plus an
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Columns the item spans in its natural orientation.
    pub width: usize,
    /// Cells the item spans down a column in its natural orientation.
    pub height: usize,
}

impl Shape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Placed (width, height) under the given orientation.
    pub fn oriented(&self, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Vertical => (self.width, self.height),
            Orientation::Horizontal => (self.height, self.width),
        }
    }

    /// Cells the footprint covers regardless of orientation.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
