//! Grid constants shared by the sheet layer and the headless harness.
//!
//! Plain `usize` constants with no dependencies. The grid's column count is
//! fixed system-wide; per-character capacity comes from the owning document.

/// Number of columns every inventory grid is laid out with.
pub const COLUMN_COUNT: usize = 4;

/// Starting carry capacity (in grid cells) for a fresh character.
pub const DEFAULT_MAX_BULK: usize = 8;

/// Upper bound on configurable capacity. Keeps sheet layouts renderable.
pub const MAX_GRID_CAPACITY: usize = 256;

/// Largest width or height item shapes use. Matches [`COLUMN_COUNT`] so every
/// shape stays placeable in at least one orientation of a standard grid.
pub const MAX_ITEM_EXTENT: usize = 4;
