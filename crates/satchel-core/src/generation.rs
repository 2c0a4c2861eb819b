//! Random character and item generation for harnesses and tests.

use rand::Rng;
use satchel_logic::constants::{DEFAULT_MAX_BULK, MAX_ITEM_EXTENT};
use satchel_logic::shape::Shape;

use crate::document::Character;
use crate::item::Item;

/// Generate a random item with a shape that fits some orientation of a
/// standard grid.
pub fn generate_item(rng: &mut impl Rng) -> Item {
    let name = ITEM_NAMES[rng.gen_range(0..ITEM_NAMES.len())];
    let width = rng.gen_range(1..=2);
    let height = rng.gen_range(1..=MAX_ITEM_EXTENT.min(3));
    let id = format!("item-{:012x}", rng.gen::<u64>() & 0xffff_ffff_ffff);
    Item::new(id, name, Shape::new(width, height))
}

/// Generate a character carrying `item_count` random items on person, with
/// enough carry capacity that everything finds a place.
pub fn generate_character(rng: &mut impl Rng, item_count: usize) -> Character {
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    let id = format!("char-{:012x}", rng.gen::<u64>() & 0xffff_ffff_ffff);
    let mut character = Character::new(id, given);
    for _ in 0..item_count {
        character.carry(generate_item(rng));
    }
    let total_bulk: usize = character.items.iter().map(Item::bulk).sum();
    character.assets.max_bulk = (total_bulk * 2).max(DEFAULT_MAX_BULK);
    character
}

// Sample name lists - would come from a compendium in a real world
static GIVEN_NAMES: &[&str] = &[
    "Wren", "Kestrel", "Bram", "Isolde", "Tamsin", "Edric", "Maren", "Osric",
    "Liesl", "Corvin", "Petra", "Aldous",
];

static ITEM_NAMES: &[&str] = &[
    "Rope (50 ft)",
    "Hooded lantern",
    "Bedroll",
    "Tent",
    "Rations",
    "Waterskin",
    "Crowbar",
    "Grappling hook",
    "Healer's kit",
    "Torch bundle",
    "Shovel",
    "Cook pot",
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_shapes_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let item = generate_item(&mut rng);
            assert!((1..=2).contains(&item.shape.width));
            assert!((1..=3).contains(&item.shape.height));
        }
    }

    #[test]
    fn test_generated_character_carries_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let character = generate_character(&mut rng, 5);
        assert_eq!(character.items.len(), 5);
        assert_eq!(character.assets.on_person.len(), 5);
        for id in &character.assets.on_person {
            assert!(character.item(id).is_some());
        }
        let total_bulk: usize = character.items.iter().map(Item::bulk).sum();
        assert!(character.assets.max_bulk >= total_bulk);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let character = generate_character(&mut rng, 20);
        let mut ids: Vec<&str> = character.items.iter().map(|item| item.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
