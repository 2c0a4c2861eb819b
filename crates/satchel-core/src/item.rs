//! Domain items carried by characters.

use satchel_logic::grid::GridItem;
use satchel_logic::shape::Shape;
use serde::{Deserialize, Serialize};

/// An item as the owning document stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Intrinsic footprint on the inventory grid.
    pub shape: Shape,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            shape,
        }
    }

    /// Carry weight in bulk points: one grid cell is one bulk.
    pub fn bulk(&self) -> usize {
        self.shape.cell_count()
    }

    /// Projection down to the minimal data the grid works with.
    pub fn grid_item(&self) -> GridItem {
        GridItem {
            id: self.id.clone(),
            name: self.name.clone(),
            shape: self.shape,
        }
    }
}
