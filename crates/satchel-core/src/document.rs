//! Owner document model and the host persistence port.
//!
//! The host platform owns document storage; this module gives the engine a
//! typed view of the one document it cares about (a character with carried
//! items) and a port, [`SheetStore`], through which grid state is written
//! back. The engine never retries a failed write and never rolls back its
//! in-memory state: memory and store may diverge until the next successful
//! synchronize or reload.

use std::collections::HashMap;

use satchel_logic::constants::DEFAULT_MAX_BULK;
use satchel_logic::grid::{GridItem, PlacementIndex};
use serde::{Deserialize, Serialize};

use crate::item::Item;

/// The persisted inventory block of a character document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    /// Carry capacity in grid cells.
    pub max_bulk: usize,
    /// Authoritative placement records, one per placed item.
    pub grid_indices: Vec<PlacementIndex>,
    /// Denormalized id-per-cell snapshot for renderers. Rebuilt on every
    /// synchronize; never read back by the loader.
    pub grid: Vec<Vec<Option<String>>>,
    /// Ids of items the character carries on person (grid membership).
    pub on_person: Vec<String>,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            max_bulk: DEFAULT_MAX_BULK,
            grid_indices: Vec::new(),
            grid: Vec::new(),
            on_person: Vec::new(),
        }
    }
}

/// A character document: identity, inventory block, owned items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub assets: Assets,
    pub items: Vec<Item>,
}

impl Character {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            assets: Assets::default(),
            items: Vec::new(),
        }
    }

    /// Look an owned item up by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The full item collection projected down to grid data.
    pub fn grid_collection(&self) -> Vec<GridItem> {
        self.items.iter().map(Item::grid_item).collect()
    }

    /// Add an item to the document and carry it on person.
    pub fn carry(&mut self, item: Item) {
        self.assets.on_person.push(item.id.clone());
        self.items.push(item);
    }
}

/// Store-side failure, raised by [`SheetStore`] implementations.
#[derive(Debug)]
pub enum StoreError {
    /// The store has no document with this id.
    MissingCharacter(String),
    /// Whatever the backing platform raised, as text.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::MissingCharacter(id) => write!(f, "no character document {}", id),
            StoreError::Backend(message) => write!(f, "store backend: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Port through which grid state reaches the host's document storage.
///
/// `render` asks the host to re-render the owning sheet after the write; a
/// store without a renderer ignores it.
pub trait SheetStore {
    fn write_grid(
        &mut self,
        character_id: &str,
        grid: &[Vec<Option<String>>],
        indices: &[PlacementIndex],
        render: bool,
    ) -> Result<(), StoreError>;
}

/// In-process store used by the harness and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: HashMap<String, (Vec<Vec<Option<String>>>, Vec<PlacementIndex>)>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement records last written for a character, if any.
    pub fn saved_indices(&self, character_id: &str) -> Option<&[PlacementIndex]> {
        self.saved
            .get(character_id)
            .map(|(_, indices)| indices.as_slice())
    }

    /// Cell snapshot last written for a character, if any.
    pub fn saved_grid(&self, character_id: &str) -> Option<&[Vec<Option<String>>]> {
        self.saved.get(character_id).map(|(grid, _)| grid.as_slice())
    }

    /// Total writes accepted.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SheetStore for MemoryStore {
    fn write_grid(
        &mut self,
        character_id: &str,
        grid: &[Vec<Option<String>>],
        indices: &[PlacementIndex],
        _render: bool,
    ) -> Result<(), StoreError> {
        self.saved
            .insert(character_id.to_string(), (grid.to_vec(), indices.to_vec()));
        self.writes += 1;
        Ok(())
    }
}
