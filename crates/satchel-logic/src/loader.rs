//! Grid reconstruction from persisted placement records.
//!
//! Persisted positions are authoritative when they still work, but membership
//! truth is the live item collection: items join and leave a character outside
//! the grid's control, capacities shrink, and records can outlive their items.
//! The loader restores what it can and reports the rest as two value lists —
//! drift never raises an error.

use crate::grid::{GridItem, ItemGrid, PlacementIndex};

/// Result of rebuilding a grid from persisted state.
#[derive(Debug)]
pub struct LoadOutcome {
    pub grid: ItemGrid,
    /// Items that no longer fit and lost their place.
    pub dropped: Vec<GridItem>,
    /// Ids whose record or membership entry resolves to no item.
    pub errors: Vec<String>,
}

/// Rebuild a grid in two phases: restore every saved record whose item still
/// resolves, then auto-place carried items that have no surviving record.
///
/// A record pointing at a missing item goes to `errors` and never enters the
/// grid. A record whose position no longer works (capacity shrank, shape
/// changed, another record claimed the cells) drops its item instead. Items
/// dropped in phase one are not retried in phase two.
pub fn load_grid(
    columns: usize,
    capacity: usize,
    saved: &[PlacementIndex],
    collection: &[GridItem],
    carried: &[String],
) -> LoadOutcome {
    let mut grid = ItemGrid::new(columns, capacity);
    let mut dropped: Vec<GridItem> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for record in saved {
        let Some(item) = collection.iter().find(|item| item.id == record.id) else {
            errors.push(record.id.clone());
            continue;
        };
        if !grid.add_at(item, record.x, record.y, record.orientation) {
            dropped.push(item.clone());
        }
    }

    for id in carried {
        let Some(item) = collection.iter().find(|item| &item.id == id) else {
            errors.push(id.clone());
            continue;
        };
        if dropped.iter().any(|lost| lost.id == item.id) || grid.contains(&item.id) {
            continue;
        }
        if !grid.add(item, None) {
            dropped.push(item.clone());
        }
    }

    LoadOutcome { grid, dropped, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Orientation, Shape};

    fn make_item(id: &str, width: usize, height: usize) -> GridItem {
        GridItem {
            id: id.to_string(),
            name: format!("test {}", id),
            shape: Shape::new(width, height),
        }
    }

    fn saved_grid(items: &[(&str, usize, usize)]) -> (Vec<PlacementIndex>, Vec<GridItem>) {
        let mut grid = ItemGrid::new(4, 8);
        let mut collection = Vec::new();
        for &(id, w, h) in items {
            let item = make_item(id, w, h);
            assert!(grid.add(&item, None));
            collection.push(item);
        }
        (grid.indices().to_vec(), collection)
    }

    #[test]
    fn test_round_trip_restores_identical_records() {
        let (saved, collection) = saved_grid(&[("a", 2, 2), ("b", 1, 2), ("c", 1, 1)]);
        let carried: Vec<String> = collection.iter().map(|item| item.id.clone()).collect();

        let outcome = load_grid(4, 8, &saved, &collection, &carried);
        assert!(outcome.dropped.is_empty());
        assert!(outcome.errors.is_empty());
        let mut restored = outcome.grid.indices().to_vec();
        let mut original = saved.clone();
        restored.sort_by(|a, b| a.id.cmp(&b.id));
        original.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(restored, original);
        assert!(outcome.grid.audit().is_empty());
    }

    #[test]
    fn test_missing_item_goes_to_errors_and_leaves_cells_free() {
        let record = PlacementIndex {
            x: 0,
            y: 0,
            w: 2,
            h: 2,
            id: "vanished".to_string(),
            orientation: Orientation::Vertical,
        };
        let outcome = load_grid(4, 8, &[record], &[], &[]);
        assert_eq!(outcome.errors, vec!["vanished".to_string()]);
        assert!(outcome.grid.indices().is_empty());
        assert!(outcome.grid.occupant_at(0, 0).is_none());
    }

    #[test]
    fn test_shrunken_capacity_drops_item() {
        let (saved, collection) = saved_grid(&[("a", 2, 2), ("b", 1, 2)]);
        let carried: Vec<String> = collection.iter().map(|item| item.id.clone()).collect();

        // Reload onto a single-row grid: nothing two cells tall keeps its
        // saved place, and dropped items are not retried in phase two.
        let outcome = load_grid(4, 4, &saved, &collection, &carried);
        assert!(outcome.errors.is_empty());
        assert!(outcome.dropped.iter().any(|item| item.id == "a"));
        for item in &outcome.dropped {
            assert!(!outcome.grid.contains(&item.id));
        }
        assert!(outcome.grid.audit().is_empty());
    }

    #[test]
    fn test_unindexed_carried_item_is_auto_placed() {
        let (saved, mut collection) = saved_grid(&[("a", 1, 1)]);
        collection.push(make_item("new", 1, 2));
        let carried: Vec<String> = collection.iter().map(|item| item.id.clone()).collect();

        let outcome = load_grid(4, 8, &saved, &collection, &carried);
        assert!(outcome.dropped.is_empty());
        assert!(outcome.grid.contains("new"));
    }

    #[test]
    fn test_carried_id_without_item_goes_to_errors() {
        let outcome = load_grid(4, 8, &[], &[], &["phantom".to_string()]);
        assert_eq!(outcome.errors, vec!["phantom".to_string()]);
    }

    #[test]
    fn test_duplicate_record_drops_second_copy() {
        let item = make_item("a", 1, 1);
        let record = PlacementIndex {
            x: 0,
            y: 0,
            w: 1,
            h: 1,
            id: "a".to_string(),
            orientation: Orientation::Vertical,
        };
        let twice = vec![record.clone(), PlacementIndex { x: 1, ..record }];
        let outcome = load_grid(4, 8, &twice, &[item], &[]);
        assert_eq!(outcome.grid.indices().len(), 1);
        assert_eq!(outcome.dropped.len(), 1);
    }

    #[test]
    fn test_colliding_records_keep_first_drop_second() {
        let a = make_item("a", 2, 2);
        let b = make_item("b", 2, 2);
        let collide = vec![
            PlacementIndex { x: 0, y: 0, w: 2, h: 2, id: "a".into(), orientation: Orientation::Vertical },
            PlacementIndex { x: 1, y: 0, w: 2, h: 2, id: "b".into(), orientation: Orientation::Vertical },
        ];
        let collection = vec![a, b];
        let outcome = load_grid(4, 8, &collide, &collection, &[]);
        assert!(outcome.grid.contains("a"));
        assert!(!outcome.grid.contains("b"));
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].id, "b");
    }
}
