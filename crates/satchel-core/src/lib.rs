//! Satchel Core - Character-Sheet Session Layer
//!
//! Ties the pure grid logic to the world the host platform provides: a
//! character document with carried items, a store port for persisting grid
//! state, binary snapshots, and sample-data generation.
//!
//! # Example
//!
//! ```rust
//! use satchel_core::prelude::*;
//! use satchel_logic::shape::Shape;
//!
//! let mut character = Character::new("c1", "Wren");
//! character.carry(Item::new("rope", "Rope", Shape::new(1, 2)));
//!
//! let mut session = SheetSession::open(character);
//! let mut store = MemoryStore::new();
//! session.synchronize(&mut store, false).expect("in-memory write");
//! ```

pub mod document;
pub mod generation;
pub mod item;
pub mod persistence;
pub mod sheet;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::document::{Character, MemoryStore, SheetStore, StoreError};
    pub use crate::item::Item;
    pub use crate::sheet::SheetSession;
}
