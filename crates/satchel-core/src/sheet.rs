//! Character-sheet session over the inventory grid.
//!
//! A session is built fresh every time a sheet opens: the loader rebuilds the
//! grid from the document's persisted records, drift is logged and retained
//! for the sheet to surface, and UI operations then call straight into the
//! grid. Nothing persists until [`SheetSession::synchronize`] pushes the grid
//! back through the store port.

use satchel_logic::config::{validate_config, GridConfig};
use satchel_logic::constants::COLUMN_COUNT;
use satchel_logic::grid::{GridItem, ItemGrid};
use satchel_logic::loader::load_grid;
use satchel_logic::shape::Orientation;

use crate::document::{Character, SheetStore, StoreError};

/// One open character sheet's grid state.
#[derive(Debug)]
pub struct SheetSession {
    pub character: Character,
    pub grid: ItemGrid,
    /// Items that lost their place during the load.
    pub dropped: Vec<GridItem>,
    /// Ids from persisted state that resolve to no item.
    pub errors: Vec<String>,
}

impl SheetSession {
    /// Open a sheet: rebuild the grid from the character's persisted records
    /// and report drift. Dropped items and dangling ids stay available on the
    /// session so the sheet can warn the player.
    pub fn open(character: Character) -> Self {
        let config = GridConfig {
            columns: COLUMN_COUNT,
            max_bulk: character.assets.max_bulk,
        };
        // Advisory only: a degenerate capacity still loads (and drops
        // everything), it just gets flagged for the sheet's log.
        for error in validate_config(&config) {
            log::warn!("{}'s grid configuration: {:?}", character.name, error);
        }

        let collection = character.grid_collection();
        let outcome = load_grid(
            config.columns,
            config.max_bulk,
            &character.assets.grid_indices,
            &collection,
            &character.assets.on_person,
        );

        for item in &outcome.dropped {
            log::warn!(
                "'{}' no longer fits on {}'s grid and was dropped",
                item.name,
                character.name
            );
        }
        for id in &outcome.errors {
            log::warn!(
                "{}'s grid references missing item {}",
                character.name,
                id
            );
        }

        Self {
            character,
            grid: outcome.grid,
            dropped: outcome.dropped,
            errors: outcome.errors,
        }
    }

    /// Whether the load had to adjust anything worth re-persisting.
    pub fn dirty_after_load(&self) -> bool {
        !self.dropped.is_empty() || !self.errors.is_empty()
    }

    /// Auto-place an owned item. False when the id is unknown, the item is
    /// already placed, or nothing fits.
    pub fn add_item(&mut self, id: &str) -> bool {
        match self.character.item(id) {
            Some(item) => self.grid.add(&item.grid_item(), None),
            None => false,
        }
    }

    /// Place an owned item at an explicit position.
    pub fn add_item_at(&mut self, id: &str, x: usize, y: usize, orientation: Orientation) -> bool {
        match self.character.item(id) {
            Some(item) => self.grid.add_at(&item.grid_item(), x, y, orientation),
            None => false,
        }
    }

    /// Take an item off the grid.
    pub fn remove_item(&mut self, id: &str) -> bool {
        self.grid.remove(id)
    }

    /// Move a placed item.
    pub fn move_item(&mut self, id: &str, x: usize, y: usize, orientation: Orientation) -> bool {
        self.grid.move_to(id, x, y, orientation)
    }

    /// Rotate a placed item in place; `None` toggles.
    pub fn rotate_item(&mut self, id: &str, orientation: Option<Orientation>) -> bool {
        self.grid.rotate(id, orientation)
    }

    /// Write the grid through the store port and mirror it onto the held
    /// document. Store failures propagate unmodified; the in-memory grid is
    /// not rolled back, so a failed write leaves memory ahead of the store.
    pub fn synchronize(&mut self, store: &mut dyn SheetStore, render: bool) -> Result<(), StoreError> {
        let grid = self.grid.occupancy();
        let indices = self.grid.indices().to_vec();
        store.write_grid(&self.character.id, &grid, &indices, render)?;
        self.character.assets.grid = grid;
        self.character.assets.grid_indices = indices;
        log::info!(
            "synchronized {} placements for {}",
            self.character.assets.grid_indices.len(),
            self.character.name
        );
        Ok(())
    }
}
