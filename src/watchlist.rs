// Watchlist - ordered, duplicate-free collection of looked-up creatures
//
// Insertion order is display order. Mutated only on the render thread, so
// no locking is needed. The only mutations are append-if-absent and
// clear-all; single entries are never removed or replaced.

use crate::model::CreatureRecord;

#[derive(Debug, Default)]
pub struct Watchlist {
    entries: Vec<CreatureRecord>,
}

impl Watchlist {
    pub fn new() -> Self {
        Watchlist::default()
    }

    /// Append `record` unless an entry with the same id already exists.
    /// Returns whether it was added. A duplicate lookup never replaces the
    /// existing entry. O(n) scan, fine for the expected tens of entries.
    pub fn try_add(&mut self, record: CreatureRecord) -> bool {
        if self.entries.iter().any(|r| r.id == record.id) {
            return false;
        }
        self.entries.push(record);
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read-only view in insertion order.
    pub fn all(&self) -> &[CreatureRecord] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CreatureRecord> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry with `id`, if present.
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.entries.iter().position(|r| r.id == id)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str) -> CreatureRecord {
        CreatureRecord {
            id,
            name: name.to_string(),
            weight: 10,
            height: 5,
            base_experience: 64,
            primary_ability: "overgrow".to_string(),
            primary_move: "tackle".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_add_new_entry() {
        let mut watchlist = Watchlist::new();
        assert!(watchlist.try_add(record(25, "pikachu")));
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn test_duplicate_add_is_idempotent() {
        let mut watchlist = Watchlist::new();
        assert!(watchlist.try_add(record(25, "pikachu")));
        assert!(!watchlist.try_add(record(25, "pikachu")));
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn test_duplicate_never_replaces_existing() {
        let mut watchlist = Watchlist::new();
        watchlist.try_add(record(25, "pikachu"));
        watchlist.try_add(record(25, "raichu-imposter"));
        assert_eq!(watchlist.get(0).unwrap().name, "pikachu");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut watchlist = Watchlist::new();
        watchlist.try_add(record(4, "charmander"));
        watchlist.try_add(record(1, "bulbasaur"));
        watchlist.try_add(record(7, "squirtle"));

        let ids: Vec<u32> = watchlist.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 1, 7]);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut watchlist = Watchlist::new();
        watchlist.try_add(record(25, "pikachu"));
        watchlist.try_add(record(133, "eevee"));
        watchlist.clear();
        assert!(watchlist.is_empty());
        assert!(watchlist.all().is_empty());
    }

    #[test]
    fn test_position_of() {
        let mut watchlist = Watchlist::new();
        watchlist.try_add(record(25, "pikachu"));
        watchlist.try_add(record(133, "eevee"));
        assert_eq!(watchlist.position_of(133), Some(1));
        assert_eq!(watchlist.position_of(6), None);
    }
}
