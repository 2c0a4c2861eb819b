//! The inventory grid: placement, removal, movement, rotation, fit search.
//!
//! An [`ItemGrid`] owns three parallel collections that must stay consistent:
//! the placement records (`indices`), the items they belong to (`items`, same
//! order and cardinality), and a dense per-column cell array where every
//! occupied cell holds the arena handle of its occupying record. Handles make
//! removal O(footprint): clearing an item touches exactly its own cells.
//!
//! All fit and placement failures are returned values, never panics. Callers
//! probe with [`ItemGrid::can_fit_at`] / [`ItemGrid::can_fit`], then act.

use serde::{Deserialize, Serialize};

use crate::shape::{Orientation, Shape};

/// Minimal item data the grid needs. The sheet layer projects its richer
/// document items down to this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: String,
    pub name: String,
    pub shape: Shape,
}

/// Persisted record of one placed item: top-left origin, placed footprint,
/// owning item id, orientation. `w`/`h` always derive from the item's shape
/// plus `orientation`; callers never set them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementIndex {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
    pub id: String,
    pub orientation: Orientation,
}

impl PlacementIndex {
    /// Whether this record's footprint covers the given cell.
    pub fn covers(&self, x: usize, y: usize) -> bool {
        self.x <= x && x < self.x + self.w && self.y <= y && y < self.y + self.h
    }
}

/// Outcome of a fit probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementTest {
    /// Placement is possible at this origin and orientation.
    Fits {
        x: usize,
        y: usize,
        orientation: Orientation,
        /// Occupants whose entire footprint lies inside the candidate
        /// rectangle. The caller may relocate them before committing;
        /// partially intersecting occupants reject the probe instead.
        enveloped: Vec<PlacementIndex>,
    },
    /// No valid placement. Carries no position.
    Rejected,
}

impl PlacementTest {
    pub fn fits(&self) -> bool {
        matches!(self, PlacementTest::Fits { .. })
    }
}

/// One occupant intersecting a queried rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapHit {
    /// Arena handle into the grid's index list. Stale after any mutation.
    pub handle: usize,
    /// True when the occupant's footprint extends outside the rectangle.
    pub partial: bool,
}

/// A fixed-capacity 2D inventory grid.
///
/// Capacity need not be a multiple of the column count; trailing columns are
/// then one cell shorter, and every bounds check accounts for the per-column
/// length.
#[derive(Debug, Clone)]
pub struct ItemGrid {
    columns: usize,
    capacity: usize,
    /// Per-column cell lists. `cells[x][y]` holds the handle of the occupying
    /// record, or None.
    cells: Vec<Vec<Option<usize>>>,
    indices: Vec<PlacementIndex>,
    items: Vec<GridItem>,
}

impl ItemGrid {
    /// Build an empty grid with `capacity` cells spread over `columns`
    /// columns. Cells are dealt out one per column with a wrapping counter,
    /// so column `c` ends up with every `c + k * columns`-th cell.
    pub fn new(columns: usize, capacity: usize) -> Self {
        assert!(columns > 0, "grid needs at least one column");
        let mut cells: Vec<Vec<Option<usize>>> = vec![Vec::new(); columns];
        let mut col = 0;
        for _ in 0..capacity {
            cells[col].push(None);
            col += 1;
            if col == columns {
                col = 0;
            }
        }
        Self {
            columns,
            capacity,
            cells,
            indices: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length of the tallest column.
    pub fn rows(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Placement records, one per placed item. Order is not meaningful.
    pub fn indices(&self) -> &[PlacementIndex] {
        &self.indices
    }

    /// Placed items, parallel to [`ItemGrid::indices`].
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    /// Columns actually addressable: a grid smaller than one full row is
    /// narrower than its column count.
    fn usable_width(&self) -> usize {
        self.columns.min(self.capacity)
    }

    /// Whether the item with this id is placed.
    pub fn contains(&self, id: &str) -> bool {
        self.indices.iter().any(|index| index.id == id)
    }

    /// The placement record for this id, if placed.
    pub fn index_of(&self, id: &str) -> Option<&PlacementIndex> {
        self.indices.iter().find(|index| index.id == id)
    }

    /// The record occupying a cell, if any. Out-of-range cells are empty.
    pub fn occupant_at(&self, x: usize, y: usize) -> Option<&PlacementIndex> {
        let slot = *self.cells.get(x)?.get(y)?;
        slot.map(|handle| &self.indices[handle])
    }

    /// Id-per-cell snapshot of the grid, in column order. This is what the
    /// owner document persists for renderers; records stay authoritative.
    pub fn occupancy(&self) -> Vec<Vec<Option<String>>> {
        self.cells
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|&slot| slot.map(|handle| self.indices[handle].id.clone()))
                    .collect()
            })
            .collect()
    }

    // ── Fit probes ──────────────────────────────────────────────────────

    /// Probe whether `item` fits with its top-left cell at `(x, y)` in the
    /// given orientation.
    ///
    /// With `allow_overlap`, occupants fully enveloped by the candidate
    /// rectangle do not reject the probe; they are reported so the caller can
    /// relocate them. A partially intersecting occupant always rejects:
    /// partial overlap cannot be resolved by moving the occupant elsewhere.
    pub fn can_fit_at(
        &self,
        item: &GridItem,
        x: usize,
        y: usize,
        orientation: Orientation,
        allow_overlap: bool,
    ) -> PlacementTest {
        // An item already sitting exactly there trivially fits.
        if let Some(index) = self.index_of(&item.id) {
            if index.x == x && index.y == y && index.orientation == orientation {
                return PlacementTest::Fits {
                    x,
                    y,
                    orientation,
                    enveloped: Vec::new(),
                };
            }
        }

        let (w, h) = item.shape.oriented(orientation);
        if w == 0 || h == 0 {
            return PlacementTest::Rejected;
        }
        let right = x + w - 1;
        let bottom = y + h - 1;

        if right + 1 > self.usable_width() {
            return PlacementTest::Rejected;
        }
        // Trailing columns may be short; check each one in range.
        for cx in x..=right {
            if self.cells[cx].len() < bottom + 1 {
                return PlacementTest::Rejected;
            }
        }

        let hits: Vec<OverlapHit> = self
            .items_within(x, y, w, h)
            .into_iter()
            .filter(|hit| self.indices[hit.handle].id != item.id)
            .collect();

        if !allow_overlap && !hits.is_empty() {
            return PlacementTest::Rejected;
        }
        if hits.iter().any(|hit| hit.partial) {
            return PlacementTest::Rejected;
        }

        PlacementTest::Fits {
            x,
            y,
            orientation,
            enveloped: hits
                .iter()
                .map(|hit| self.indices[hit.handle].clone())
                .collect(),
        }
    }

    /// Find the first free placement for `item`, scanning positions in
    /// row-major order. At each position a given orientation is tried alone;
    /// otherwise vertical first, then horizontal. An already placed item
    /// reports its current placement.
    pub fn can_fit(&self, item: &GridItem, orientation: Option<Orientation>) -> PlacementTest {
        if let Some(index) = self.index_of(&item.id) {
            return PlacementTest::Fits {
                x: index.x,
                y: index.y,
                orientation: index.orientation,
                enveloped: Vec::new(),
            };
        }

        let trials: &[Orientation] = match orientation {
            Some(ref fixed) => std::slice::from_ref(fixed),
            None => &[Orientation::Vertical, Orientation::Horizontal],
        };

        for y in 0..self.rows() {
            for x in 0..self.usable_width() {
                for &trial in trials {
                    let probe = self.can_fit_at(item, x, y, trial, false);
                    if probe.fits() {
                        return probe;
                    }
                }
            }
        }
        PlacementTest::Rejected
    }

    // ── Mutators ────────────────────────────────────────────────────────

    /// Place `item` with its top-left cell at `(x, y)`. False when the item
    /// is already placed or the position doesn't fit; the grid is unchanged
    /// on failure.
    pub fn add_at(&mut self, item: &GridItem, x: usize, y: usize, orientation: Orientation) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        match self.can_fit_at(item, x, y, orientation, false) {
            PlacementTest::Fits { x, y, orientation, .. } => {
                self.commit(item, x, y, orientation);
                true
            }
            PlacementTest::Rejected => false,
        }
    }

    /// Place `item` at the first free position found by [`ItemGrid::can_fit`].
    pub fn add(&mut self, item: &GridItem, orientation: Option<Orientation>) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        match self.can_fit(item, orientation) {
            PlacementTest::Fits { x, y, orientation, .. } => {
                self.commit(item, x, y, orientation);
                true
            }
            PlacementTest::Rejected => false,
        }
    }

    /// Remove the item with this id. False when it isn't placed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(handle) = self.indices.iter().position(|index| index.id == id) else {
            return false;
        };

        let removed = self.indices[handle].clone();
        for cx in removed.x..removed.x + removed.w {
            for cy in removed.y..removed.y + removed.h {
                self.cells[cx][cy] = None;
            }
        }

        self.indices.swap_remove(handle);
        self.items.swap_remove(handle);

        // The record swapped into the freed slot still has cells pointing at
        // its old handle; rewrite its footprint.
        if handle < self.indices.len() {
            let moved = self.indices[handle].clone();
            for cx in moved.x..moved.x + moved.w {
                for cy in moved.y..moved.y + moved.h {
                    self.cells[cx][cy] = Some(handle);
                }
            }
        }
        true
    }

    /// Move a placed item to a new origin and orientation. False when the
    /// item isn't placed or the destination doesn't fit.
    ///
    /// Occupants fully enveloped at the destination are not relocated; a
    /// destination holding any other item simply rejects the move.
    pub fn move_to(&mut self, id: &str, x: usize, y: usize, orientation: Orientation) -> bool {
        let Some(handle) = self.indices.iter().position(|index| index.id == id) else {
            return false;
        };
        let item = self.items[handle].clone();
        if !self.can_fit_at(&item, x, y, orientation, false).fits() {
            return false;
        }
        self.remove(id);
        self.commit(&item, x, y, orientation);
        true
    }

    /// Rotate a placed item about its origin. With `orientation` omitted the
    /// current orientation is toggled. False when the item isn't placed or
    /// the turned footprint doesn't fit at the same origin.
    pub fn rotate(&mut self, id: &str, orientation: Option<Orientation>) -> bool {
        let (x, y, current, handle) = match self.indices.iter().position(|index| index.id == id) {
            Some(handle) => {
                let index = &self.indices[handle];
                (index.x, index.y, index.orientation, handle)
            }
            None => return false,
        };
        let next = orientation.unwrap_or_else(|| current.toggled());
        let item = self.items[handle].clone();
        if !self.can_fit_at(&item, x, y, next, false).fits() {
            return false;
        }
        self.remove(id);
        self.commit(&item, x, y, next);
        true
    }

    /// Occupants intersecting the rectangle with top-left `(x, y)` and size
    /// `w × h`, deduplicated in first-seen cell order. `partial` marks
    /// occupants extending outside the rectangle on any side. Cells outside
    /// the grid contribute nothing.
    pub fn items_within(&self, x: usize, y: usize, w: usize, h: usize) -> Vec<OverlapHit> {
        let mut hits: Vec<OverlapHit> = Vec::new();
        for cx in x..x + w {
            let Some(column) = self.cells.get(cx) else {
                break;
            };
            for cy in y..y + h {
                let Some(&slot) = column.get(cy) else {
                    break;
                };
                let Some(handle) = slot else {
                    continue;
                };
                if hits.iter().any(|hit| hit.handle == handle) {
                    continue;
                }
                let index = &self.indices[handle];
                let partial = index.x < x
                    || index.y < y
                    || index.x + index.w > x + w
                    || index.y + index.h > y + h;
                hits.push(OverlapHit { handle, partial });
            }
        }
        hits
    }

    /// The only code path that mutates records, items, and cells together.
    /// Every public mutator funnels through here (after a remove, for move
    /// and rotate), so the three collections never disagree observably.
    fn commit(&mut self, item: &GridItem, x: usize, y: usize, orientation: Orientation) {
        let (w, h) = item.shape.oriented(orientation);
        let handle = self.indices.len();
        self.indices.push(PlacementIndex {
            x,
            y,
            w,
            h,
            id: item.id.clone(),
            orientation,
        });
        self.items.push(item.clone());
        for cx in x..x + w {
            for cy in y..y + h {
                self.cells[cx][cy] = Some(handle);
            }
        }
    }

    // ── Consistency audit ───────────────────────────────────────────────

    /// Check every structural invariant, returning a description of each
    /// violation found. An empty result means the grid is consistent. Used
    /// by the harness after randomized operation sequences.
    pub fn audit(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.indices.len() != self.items.len() {
            problems.push(format!(
                "{} records but {} items",
                self.indices.len(),
                self.items.len()
            ));
        }
        for (index, item) in self.indices.iter().zip(&self.items) {
            if index.id != item.id {
                problems.push(format!(
                    "record for {} paired with item {}",
                    index.id, item.id
                ));
            }
        }

        // Every record's footprint cells must point back at it.
        for (handle, index) in self.indices.iter().enumerate() {
            for cx in index.x..index.x + index.w {
                for cy in index.y..index.y + index.h {
                    match self.cells.get(cx).and_then(|column| column.get(cy)) {
                        Some(Some(found)) if *found == handle => {}
                        _ => problems.push(format!(
                            "cell ({}, {}) does not point at record for {}",
                            cx, cy, index.id
                        )),
                    }
                }
            }
        }

        // Every occupied cell must hold a live handle whose footprint covers it.
        for (x, column) in self.cells.iter().enumerate() {
            for (y, slot) in column.iter().enumerate() {
                let Some(handle) = slot else {
                    continue;
                };
                if *handle >= self.indices.len() {
                    problems.push(format!("cell ({}, {}) holds dead handle {}", x, y, handle));
                } else if !self.indices[*handle].covers(x, y) {
                    problems.push(format!(
                        "cell ({}, {}) points at {} whose footprint excludes it",
                        x, y, self.indices[*handle].id
                    ));
                }
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, width: usize, height: usize) -> GridItem {
        GridItem {
            id: id.to_string(),
            name: format!("test {}", id),
            shape: Shape::new(width, height),
        }
    }

    #[test]
    fn test_wrap_fill_column_lengths() {
        let grid = ItemGrid::new(4, 10);
        let lengths: Vec<usize> = grid.occupancy().iter().map(Vec::len).collect();
        // 10 cells over 4 columns: two columns of 3, two of 2.
        assert_eq!(lengths, vec![3, 3, 2, 2]);
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn test_vertical_item_fills_column_cells() {
        let mut grid = ItemGrid::new(4, 8);
        let item = make_item("rope", 1, 2);
        assert!(grid.add_at(&item, 0, 0, Orientation::Vertical));
        assert_eq!(grid.occupant_at(0, 0).map(|i| i.id.as_str()), Some("rope"));
        assert_eq!(grid.occupant_at(0, 1).map(|i| i.id.as_str()), Some("rope"));
        assert!(grid.occupant_at(1, 0).is_none());
    }

    #[test]
    fn test_auto_add_lands_in_first_free_cell() {
        let mut grid = ItemGrid::new(4, 8);
        assert!(grid.add_at(&make_item("tall", 1, 2), 0, 0, Orientation::Vertical));
        assert!(grid.add(&make_item("coin", 1, 1), None));
        let index = grid.index_of("coin").unwrap();
        assert_eq!((index.x, index.y), (1, 0));
    }

    #[test]
    fn test_right_edge_bound_rejects() {
        let mut grid = ItemGrid::new(4, 8);
        // 3 wide at x=2 would reach column 4 on a 4-column grid.
        assert!(!grid.add_at(&make_item("staff", 3, 1), 2, 0, Orientation::Vertical));
        assert!(grid.add_at(&make_item("staff", 3, 1), 1, 0, Orientation::Vertical));
    }

    #[test]
    fn test_short_trailing_column_rejects_tall_item() {
        // 6 cells over 4 columns: columns 2 and 3 have a single cell.
        let mut grid = ItemGrid::new(4, 6);
        let tall = make_item("polearm", 1, 2);
        assert!(!grid.add_at(&tall, 2, 0, Orientation::Vertical));
        assert!(grid.add_at(&tall, 0, 0, Orientation::Vertical));
    }

    #[test]
    fn test_usable_width_capped_by_capacity() {
        let mut grid = ItemGrid::new(4, 2);
        assert!(!grid.add_at(&make_item("coin", 1, 1), 2, 0, Orientation::Vertical));
        assert!(grid.add_at(&make_item("coin", 1, 1), 1, 0, Orientation::Vertical));
    }

    #[test]
    fn test_partial_envelopment_rejects_even_with_overlap_allowed() {
        let mut grid = ItemGrid::new(4, 8);
        assert!(grid.add_at(&make_item("tent", 2, 2), 0, 0, Orientation::Vertical));
        let probe = grid.can_fit_at(&make_item("coin", 1, 1), 0, 0, Orientation::Vertical, true);
        assert_eq!(probe, PlacementTest::Rejected);
    }

    #[test]
    fn test_full_envelopment_reported_as_displacement_candidate() {
        let mut grid = ItemGrid::new(4, 8);
        assert!(grid.add_at(&make_item("coin", 1, 1), 0, 0, Orientation::Vertical));
        let tent = make_item("tent", 2, 2);
        match grid.can_fit_at(&tent, 0, 0, Orientation::Vertical, true) {
            PlacementTest::Fits { enveloped, .. } => {
                assert_eq!(enveloped.len(), 1);
                assert_eq!(enveloped[0].id, "coin");
            }
            PlacementTest::Rejected => panic!("enveloping placement should fit"),
        }
        // Without overlap allowed the same probe rejects.
        assert!(!grid.can_fit_at(&tent, 0, 0, Orientation::Vertical, false).fits());
    }

    #[test]
    fn test_probe_is_idempotent() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("tent", 2, 2), 0, 0, Orientation::Vertical);
        let item = make_item("coin", 1, 1);
        let first = grid.can_fit_at(&item, 2, 0, Orientation::Vertical, false);
        let second = grid.can_fit_at(&item, 2, 0, Orientation::Vertical, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_probe_on_own_position_trivially_fits() {
        let mut grid = ItemGrid::new(4, 8);
        let item = make_item("tent", 2, 2);
        grid.add_at(&item, 1, 0, Orientation::Vertical);
        let probe = grid.can_fit_at(&item, 1, 0, Orientation::Vertical, false);
        match probe {
            PlacementTest::Fits { x, y, enveloped, .. } => {
                assert_eq!((x, y), (1, 0));
                assert!(enveloped.is_empty());
            }
            PlacementTest::Rejected => panic!("own position should fit"),
        }
    }

    #[test]
    fn test_can_fit_returns_current_placement_when_placed() {
        let mut grid = ItemGrid::new(4, 8);
        let item = make_item("tent", 2, 2);
        grid.add_at(&item, 2, 0, Orientation::Vertical);
        match grid.can_fit(&item, None) {
            PlacementTest::Fits { x, y, .. } => assert_eq!((x, y), (2, 0)),
            PlacementTest::Rejected => panic!("placed item must report its placement"),
        }
    }

    #[test]
    fn test_add_twice_fails() {
        let mut grid = ItemGrid::new(4, 8);
        let item = make_item("coin", 1, 1);
        assert!(grid.add(&item, None));
        assert!(!grid.add(&item, None));
        assert!(!grid.add_at(&item, 3, 1, Orientation::Vertical));
        assert_eq!(grid.indices().len(), 1);
    }

    #[test]
    fn test_auto_add_prefers_vertical() {
        let mut grid = ItemGrid::new(4, 8);
        assert!(grid.add(&make_item("rod", 1, 2), None));
        assert_eq!(grid.index_of("rod").unwrap().orientation, Orientation::Vertical);
    }

    #[test]
    fn test_auto_add_falls_back_to_horizontal() {
        // One row of 4: nothing 2 tall fits vertically.
        let mut grid = ItemGrid::new(4, 4);
        assert!(grid.add(&make_item("rod", 1, 2), None));
        let index = grid.index_of("rod").unwrap();
        assert_eq!(index.orientation, Orientation::Horizontal);
        assert_eq!((index.w, index.h), (2, 1));
    }

    #[test]
    fn test_full_grid_rejects() {
        let mut grid = ItemGrid::new(2, 4);
        assert!(grid.add(&make_item("a", 2, 2), None));
        assert!(!grid.add(&make_item("b", 1, 1), None));
        assert_eq!(grid.can_fit(&make_item("b", 1, 1), None), PlacementTest::Rejected);
    }

    #[test]
    fn test_remove_absent_is_false_and_harmless() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("coin", 1, 1), 0, 0, Orientation::Vertical);
        assert!(!grid.remove("ghost"));
        assert_eq!(grid.indices().len(), 1);
        assert!(grid.audit().is_empty());
    }

    #[test]
    fn test_remove_clears_footprint() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("tent", 2, 2), 0, 0, Orientation::Vertical);
        assert!(grid.remove("tent"));
        assert!(grid.occupant_at(0, 0).is_none());
        assert!(grid.occupant_at(1, 1).is_none());
        assert!(grid.indices().is_empty());
        assert!(grid.items().is_empty());
    }

    #[test]
    fn test_remove_first_of_many_keeps_handles_consistent() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("a", 1, 1), 0, 0, Orientation::Vertical);
        grid.add_at(&make_item("b", 1, 2), 1, 0, Orientation::Vertical);
        grid.add_at(&make_item("c", 2, 1), 2, 0, Orientation::Vertical);
        assert!(grid.remove("a"));
        assert!(grid.audit().is_empty(), "{:?}", grid.audit());
        assert_eq!(grid.occupant_at(1, 1).map(|i| i.id.as_str()), Some("b"));
        assert_eq!(grid.occupant_at(3, 0).map(|i| i.id.as_str()), Some("c"));
    }

    #[test]
    fn test_move_to_free_area() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("tent", 2, 2), 0, 0, Orientation::Vertical);
        assert!(grid.move_to("tent", 2, 0, Orientation::Vertical));
        assert!(grid.occupant_at(0, 0).is_none());
        assert_eq!(grid.occupant_at(2, 1).map(|i| i.id.as_str()), Some("tent"));
        assert!(grid.audit().is_empty());
    }

    #[test]
    fn test_move_onto_own_footprint() {
        let mut grid = ItemGrid::new(4, 12);
        grid.add_at(&make_item("rod", 1, 2), 0, 0, Orientation::Vertical);
        // Destination shares cell (0, 1) with the current footprint; the item
        // never blocks itself.
        assert!(grid.move_to("rod", 0, 1, Orientation::Vertical));
        let index = grid.index_of("rod").unwrap();
        assert_eq!((index.x, index.y), (0, 1));
        assert!(grid.occupant_at(0, 0).is_none());
        assert!(grid.audit().is_empty());
    }

    #[test]
    fn test_move_onto_other_item_fails() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("tent", 2, 2), 0, 0, Orientation::Vertical);
        grid.add_at(&make_item("coin", 1, 1), 3, 0, Orientation::Vertical);
        assert!(!grid.move_to("coin", 0, 0, Orientation::Vertical));
        assert_eq!(grid.index_of("coin").unwrap().x, 3);
    }

    #[test]
    fn test_move_unplaced_fails() {
        let mut grid = ItemGrid::new(4, 8);
        assert!(!grid.move_to("ghost", 0, 0, Orientation::Vertical));
    }

    #[test]
    fn test_rotate_toggles_and_swaps_footprint() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("rod", 1, 2), 0, 0, Orientation::Vertical);
        assert!(grid.rotate("rod", None));
        let index = grid.index_of("rod").unwrap();
        assert_eq!(index.orientation, Orientation::Horizontal);
        assert_eq!((index.w, index.h), (2, 1));
        assert_eq!((index.x, index.y), (0, 0));
        assert!(grid.occupant_at(1, 0).is_some());
        assert!(grid.occupant_at(0, 1).is_none());
    }

    #[test]
    fn test_rotate_blocked_by_neighbor() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("rod", 1, 2), 0, 0, Orientation::Vertical);
        grid.add_at(&make_item("coin", 1, 1), 1, 0, Orientation::Vertical);
        assert!(!grid.rotate("rod", None));
        assert_eq!(grid.index_of("rod").unwrap().orientation, Orientation::Vertical);
    }

    #[test]
    fn test_rotate_blocked_at_edge() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("rod", 1, 2), 3, 0, Orientation::Vertical);
        // Horizontal would reach column 4.
        assert!(!grid.rotate("rod", None));
    }

    #[test]
    fn test_rotate_to_explicit_current_orientation_is_noop() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("rod", 1, 2), 0, 0, Orientation::Vertical);
        assert!(grid.rotate("rod", Some(Orientation::Vertical)));
        assert_eq!(grid.index_of("rod").unwrap().orientation, Orientation::Vertical);
        assert!(grid.audit().is_empty());
    }

    #[test]
    fn test_rotate_unplaced_fails() {
        let mut grid = ItemGrid::new(4, 8);
        assert!(!grid.rotate("ghost", None));
    }

    #[test]
    fn test_items_within_dedupes_and_flags_partial() {
        let mut grid = ItemGrid::new(4, 8);
        grid.add_at(&make_item("tent", 2, 2), 0, 0, Orientation::Vertical);
        grid.add_at(&make_item("coin", 1, 1), 2, 0, Orientation::Vertical);

        // Query covers all of coin but only half of tent.
        let hits = grid.items_within(1, 0, 2, 2);
        assert_eq!(hits.len(), 2);
        let tent_hit = hits
            .iter()
            .find(|hit| grid.indices()[hit.handle].id == "tent")
            .unwrap();
        let coin_hit = hits
            .iter()
            .find(|hit| grid.indices()[hit.handle].id == "coin")
            .unwrap();
        assert!(tent_hit.partial);
        assert!(!coin_hit.partial);
    }

    #[test]
    fn test_no_overlap_between_distinct_items() {
        let mut grid = ItemGrid::new(4, 12);
        let specs = [("a", 2, 2), ("b", 1, 2), ("c", 2, 1), ("d", 1, 1)];
        for (id, w, h) in specs {
            assert!(grid.add(&make_item(id, w, h), None), "{} should fit", id);
        }
        let mut seen = std::collections::HashSet::new();
        for index in grid.indices() {
            for cx in index.x..index.x + index.w {
                for cy in index.y..index.y + index.h {
                    assert!(seen.insert((cx, cy)), "cell ({}, {}) doubly occupied", cx, cy);
                }
            }
        }
        assert!(grid.audit().is_empty());
    }

    #[test]
    fn test_occupancy_snapshot_matches_cells() {
        let mut grid = ItemGrid::new(4, 6);
        grid.add_at(&make_item("rod", 1, 2), 1, 0, Orientation::Vertical);
        let snapshot = grid.occupancy();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot[1][0].as_deref(), Some("rod"));
        assert_eq!(snapshot[1][1].as_deref(), Some("rod"));
        assert_eq!(snapshot[0][0], None);
        // Short trailing columns shrink the snapshot too.
        assert_eq!(snapshot[2].len(), 1);
    }
}
