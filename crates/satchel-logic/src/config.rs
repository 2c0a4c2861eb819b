//! Grid configuration and validation.
//!
//! The sheet layer builds a [`GridConfig`] from the owning document before
//! constructing a grid; validation returns every problem found rather than
//! stopping at the first.

use serde::{Deserialize, Serialize};

use crate::constants::{COLUMN_COUNT, DEFAULT_MAX_BULK, MAX_GRID_CAPACITY};

/// Grid dimensions as configured on an owning document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Columns the grid is laid out with.
    pub columns: usize,
    /// Total cell capacity (the character's carry limit in bulk points).
    pub max_bulk: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: COLUMN_COUNT,
            max_bulk: DEFAULT_MAX_BULK,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A grid needs at least one column.
    NoColumns,
    /// Zero capacity leaves nothing to place on.
    NoCapacity,
    /// Capacity beyond what a sheet can sensibly render.
    CapacityTooLarge(usize),
}

/// Validate a grid configuration, returning all errors found.
pub fn validate_config(config: &GridConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.columns == 0 {
        errors.push(ConfigError::NoColumns);
    }
    if config.max_bulk == 0 {
        errors.push(ConfigError::NoCapacity);
    }
    if config.max_bulk > MAX_GRID_CAPACITY {
        errors.push(ConfigError::CapacityTooLarge(config.max_bulk));
    }

    errors
}
