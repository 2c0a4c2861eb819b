//! Satchel Headless Validation Harness
//!
//! Exercises the grid engine and the sheet layer without a host platform.
//! Runs entirely in-process — no documents, no rendering, no UI.
//!
//! Usage:
//!   cargo run -p satchel-simtest
//!   cargo run -p satchel-simtest -- --verbose

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use satchel_core::document::MemoryStore;
use satchel_core::generation::generate_character;
use satchel_core::item::Item;
use satchel_core::persistence::{load_character, save_character};
use satchel_core::sheet::SheetSession;
use satchel_logic::constants::COLUMN_COUNT;
use satchel_logic::grid::{GridItem, ItemGrid, PlacementIndex, PlacementTest};
use satchel_logic::loader::load_grid;
use satchel_logic::shape::{Orientation, Shape};
use serde::Deserialize;

// ── Item catalog (sample compendium data) ───────────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/item_catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogItem {
    slug: String,
    name: String,
    width: usize,
    height: usize,
}

impl CatalogItem {
    fn item(&self) -> Item {
        Item::new(self.slug.clone(), self.name.clone(), Shape::new(self.width, self.height))
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Satchel Grid Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog sanity
    results.extend(validate_catalog(verbose));

    // 2. Placement basics
    results.extend(validate_placement(verbose));

    // 3. Rotation behavior
    results.extend(validate_rotation(verbose));

    // 4. Overlap & envelopment semantics
    results.extend(validate_envelopment(verbose));

    // 5. Loader drift recovery
    results.extend(validate_loader_drift(verbose));

    // 6. Sheet session & store round-trip
    results.extend(validate_store_round_trip(verbose));

    // 7. Randomized operation fuzz
    results.extend(validate_random_operations(verbose));

    // 8. Snapshot save/load
    results.extend(validate_snapshots(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Item Catalog ─────────────────────────────────────────────────────

fn validate_catalog(_verbose: bool) -> Vec<TestResult> {
    println!("--- Item Catalog ---");
    let mut results = Vec::new();

    let catalog: Vec<CatalogItem> = match serde_json::from_str(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(check(
                "catalog_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };

    results.push(check(
        "catalog_not_empty",
        catalog.len() >= 10,
        format!("{} items loaded", catalog.len()),
    ));

    let bad_dims: Vec<&CatalogItem> = catalog
        .iter()
        .filter(|item| item.width == 0 || item.height == 0)
        .collect();
    results.push(check(
        "catalog_positive_dimensions",
        bad_dims.is_empty(),
        if bad_dims.is_empty() {
            "all shapes have positive dimensions".to_string()
        } else {
            format!("{} items with a zero dimension", bad_dims.len())
        },
    ));

    // Everything must be placeable on an otherwise empty standard grid in
    // at least one orientation.
    let unplaceable: Vec<&str> = catalog
        .iter()
        .filter(|entry| {
            let mut grid = ItemGrid::new(COLUMN_COUNT, COLUMN_COUNT * 4);
            !grid.add(&entry.item().grid_item(), None)
        })
        .map(|entry| entry.name.as_str())
        .collect();
    results.push(check(
        "catalog_placeable",
        unplaceable.is_empty(),
        if unplaceable.is_empty() {
            "every item fits an empty grid".to_string()
        } else {
            format!("unplaceable: {}", unplaceable.join(", "))
        },
    ));

    let mut slugs: Vec<&str> = catalog.iter().map(|entry| entry.slug.as_str()).collect();
    slugs.sort_unstable();
    let before = slugs.len();
    slugs.dedup();
    results.push(check(
        "catalog_unique_slugs",
        slugs.len() == before,
        format!("{} unique slugs", slugs.len()),
    ));

    results
}

// ── 2. Placement ────────────────────────────────────────────────────────

fn grid_item(id: &str, width: usize, height: usize) -> GridItem {
    GridItem {
        id: id.to_string(),
        name: id.to_string(),
        shape: Shape::new(width, height),
    }
}

fn validate_placement(_verbose: bool) -> Vec<TestResult> {
    println!("--- Placement ---");
    let mut results = Vec::new();

    // Two rows of four; a tall item then an auto-placed coin.
    let mut grid = ItemGrid::new(4, 8);
    let tall = grid_item("tall", 1, 2);
    let coin = grid_item("coin", 1, 1);
    let placed = grid.add_at(&tall, 0, 0, Orientation::Vertical);
    results.push(check(
        "explicit_placement",
        placed && grid.occupant_at(0, 1).is_some(),
        "2-tall item covers (0,0) and (0,1)".to_string(),
    ));

    grid.add(&coin, None);
    let coin_at = grid.index_of("coin").map(|index| (index.x, index.y));
    results.push(check(
        "auto_placement_first_free",
        coin_at == Some((1, 0)),
        format!("auto-placed at {:?}", coin_at),
    ));

    let wide = grid_item("wide", 3, 1);
    let out_of_bounds = grid.can_fit_at(&wide, 2, 0, Orientation::Vertical, false);
    results.push(check(
        "right_edge_bound",
        out_of_bounds == PlacementTest::Rejected,
        "3-wide at x=2 rejected on a 4-column grid".to_string(),
    ));

    // Partial trailing column: 6 cells over 4 columns.
    let mut short = ItemGrid::new(4, 6);
    let fits_short = short.add_at(&grid_item("tall2", 1, 2), 2, 0, Orientation::Vertical);
    results.push(check(
        "partial_column_bound",
        !fits_short,
        "2-tall item rejected on a 1-cell column".to_string(),
    ));

    let audit = grid.audit();
    results.push(check(
        "placement_invariants",
        audit.is_empty(),
        format!("{} violations", audit.len()),
    ));

    results
}

// ── 3. Rotation ─────────────────────────────────────────────────────────

fn validate_rotation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Rotation ---");
    let mut results = Vec::new();

    let mut grid = ItemGrid::new(4, 8);
    let rod = grid_item("rod", 1, 2);
    grid.add_at(&rod, 0, 0, Orientation::Vertical);

    let rotated = grid.rotate("rod", None);
    let index = grid.index_of("rod").cloned();
    let footprint_swapped = matches!(
        index,
        Some(PlacementIndex { w: 2, h: 1, x: 0, y: 0, orientation: Orientation::Horizontal, .. })
    );
    results.push(check(
        "rotate_toggles_footprint",
        rotated && footprint_swapped,
        format!("after toggle: {:?}", grid.index_of("rod")),
    ));

    // Blocked rotation leaves the item untouched.
    let mut crowded = ItemGrid::new(4, 8);
    crowded.add_at(&rod, 0, 0, Orientation::Vertical);
    crowded.add_at(&grid_item("block", 1, 1), 1, 0, Orientation::Vertical);
    let blocked = crowded.rotate("rod", None);
    results.push(check(
        "rotate_blocked_by_neighbor",
        !blocked && crowded.index_of("rod").map(|i| i.orientation) == Some(Orientation::Vertical),
        "blocked toggle keeps vertical placement".to_string(),
    ));

    results.push(check(
        "rotate_unplaced_rejected",
        !grid.rotate("ghost", None),
        "rotating an unplaced id returns false".to_string(),
    ));

    results
}

// ── 4. Envelopment ──────────────────────────────────────────────────────

fn validate_envelopment(_verbose: bool) -> Vec<TestResult> {
    println!("--- Envelopment ---");
    let mut results = Vec::new();

    let mut grid = ItemGrid::new(4, 8);
    grid.add_at(&grid_item("tent", 2, 2), 0, 0, Orientation::Vertical);

    // A 1×1 probe inside the tent only partially envelops it.
    let partial = grid.can_fit_at(&grid_item("coin", 1, 1), 0, 0, Orientation::Vertical, true);
    results.push(check(
        "partial_envelopment_rejected",
        partial == PlacementTest::Rejected,
        "1x1 over a 2x2 occupant rejected even with overlap allowed".to_string(),
    ));

    // A 2×2 probe over a 1×1 occupant fully envelops it.
    let mut small = ItemGrid::new(4, 8);
    small.add_at(&grid_item("coin", 1, 1), 1, 0, Orientation::Vertical);
    let enveloping = small.can_fit_at(&grid_item("tent", 2, 2), 1, 0, Orientation::Vertical, true);
    let reported = match &enveloping {
        PlacementTest::Fits { enveloped, .. } => {
            enveloped.len() == 1 && enveloped[0].id == "coin"
        }
        PlacementTest::Rejected => false,
    };
    results.push(check(
        "full_envelopment_reported",
        reported,
        "enveloped occupant returned as displacement candidate".to_string(),
    ));

    let strict = small.can_fit_at(&grid_item("tent", 2, 2), 1, 0, Orientation::Vertical, false);
    results.push(check(
        "overlap_disallowed_rejects",
        strict == PlacementTest::Rejected,
        "same probe without overlap allowance rejected".to_string(),
    ));

    results
}

// ── 5. Loader drift ─────────────────────────────────────────────────────

fn validate_loader_drift(_verbose: bool) -> Vec<TestResult> {
    println!("--- Loader Drift ---");
    let mut results = Vec::new();

    // A record whose item vanished from the collection.
    let dangling = PlacementIndex {
        x: 0,
        y: 0,
        w: 1,
        h: 1,
        id: "vanished".to_string(),
        orientation: Orientation::Vertical,
    };
    let outcome = load_grid(4, 8, &[dangling], &[], &[]);
    results.push(check(
        "dangling_record_reported",
        outcome.errors == vec!["vanished".to_string()] && outcome.grid.indices().is_empty(),
        format!("errors: {:?}", outcome.errors),
    ));

    // Capacity shrank below a saved placement.
    let tall = grid_item("tall", 1, 2);
    let record = PlacementIndex {
        x: 0,
        y: 0,
        w: 1,
        h: 2,
        id: "tall".to_string(),
        orientation: Orientation::Vertical,
    };
    let shrunk = load_grid(4, 4, &[record], &[tall.clone()], &["tall".to_string()]);
    results.push(check(
        "shrunken_capacity_drops",
        shrunk.dropped.len() == 1 && !shrunk.grid.contains("tall"),
        format!("dropped: {:?}", shrunk.dropped.iter().map(|i| &i.id).collect::<Vec<_>>()),
    ));

    // An unindexed carried item is auto-placed.
    let fresh = load_grid(4, 8, &[], &[tall], &["tall".to_string()]);
    results.push(check(
        "unindexed_item_auto_placed",
        fresh.grid.contains("tall") && fresh.dropped.is_empty(),
        "carried item without a record found a slot".to_string(),
    ));

    results
}

// ── 6. Store round-trip ─────────────────────────────────────────────────

fn validate_store_round_trip(verbose: bool) -> Vec<TestResult> {
    println!("--- Store Round-Trip ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(0x5a7c);
    let character = generate_character(&mut rng, 6);
    let mut session = SheetSession::open(character);
    let placed_before = session.grid.indices().len();
    if verbose {
        println!(
            "  generated {} items, placed {}",
            session.character.items.len(),
            placed_before
        );
    }

    let mut store = MemoryStore::new();
    let synced = session.synchronize(&mut store, false).is_ok();
    results.push(check(
        "synchronize_writes_store",
        synced && store.writes() == 1,
        format!("{} records written", placed_before),
    ));

    let reopened = SheetSession::open(session.character.clone());
    // Same capacity, same items: the reload reproduces the synchronized grid
    // exactly, and anything dropped at first open drops again, nothing new.
    let clean = reopened.errors.is_empty() && reopened.dropped.len() == session.dropped.len();
    let mut restored = reopened.grid.indices().to_vec();
    let mut original = session.grid.indices().to_vec();
    restored.sort_by(|a, b| a.id.cmp(&b.id));
    original.sort_by(|a, b| a.id.cmp(&b.id));
    results.push(check(
        "reopen_restores_records",
        clean && restored == original,
        format!("{} records restored", restored.len()),
    ));

    results
}

// ── 7. Randomized operations ────────────────────────────────────────────

fn validate_random_operations(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Operations ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(0xbead);
    let character = generate_character(&mut rng, 8);
    let ids: Vec<String> = character.items.iter().map(|item| item.id.clone()).collect();
    let mut session = SheetSession::open(character);

    let mut violations = 0usize;
    let mut applied = 0usize;
    for step in 0..500 {
        let id = &ids[rng.gen_range(0..ids.len())];
        let orientation = if rng.gen_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        let x = rng.gen_range(0..session.grid.columns());
        let y = rng.gen_range(0..session.grid.rows().max(1));
        let changed = match rng.gen_range(0..5) {
            0 => session.add_item(id),
            1 => session.add_item_at(id, x, y, orientation),
            2 => session.remove_item(id),
            3 => session.move_item(id, x, y, orientation),
            _ => session.rotate_item(id, if rng.gen_bool(0.5) { None } else { Some(orientation) }),
        };
        if changed {
            applied += 1;
        }
        let audit = session.grid.audit();
        if !audit.is_empty() {
            violations += 1;
            if verbose {
                println!("  step {}: {:?}", step, audit);
            }
        }
    }

    results.push(check(
        "fuzz_invariants_hold",
        violations == 0,
        format!(
            "{} mutations on a {}x{} grid ({} cells), {} audit violations",
            applied,
            session.grid.columns(),
            session.grid.rows(),
            session.grid.capacity(),
            violations
        ),
    ));

    // Footprints of distinct items never intersect.
    let mut seen = std::collections::HashSet::new();
    let mut doubled = 0usize;
    for index in session.grid.indices() {
        for cx in index.x..index.x + index.w {
            for cy in index.y..index.y + index.h {
                if !seen.insert((cx, cy)) {
                    doubled += 1;
                }
            }
        }
    }
    results.push(check(
        "fuzz_no_overlap",
        doubled == 0,
        format!("{} cells doubly claimed", doubled),
    ));

    results
}

// ── 8. Snapshots ────────────────────────────────────────────────────────

fn validate_snapshots(_verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshots ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(0xfeed);
    let character = generate_character(&mut rng, 5);
    let session = SheetSession::open(character);
    let mut snapshot_source = session.character.clone();
    snapshot_source.assets.grid_indices = session.grid.indices().to_vec();
    snapshot_source.assets.grid = session.grid.occupancy();

    let mut buffer = Vec::new();
    let saved = save_character(&mut buffer, &snapshot_source).is_ok();
    let loaded = load_character(&buffer[..]);
    let round_trips = matches!(&loaded, Ok(loaded) if *loaded == snapshot_source);
    results.push(check(
        "snapshot_round_trip",
        saved && round_trips,
        format!("{} bytes", buffer.len()),
    ));

    results
}
