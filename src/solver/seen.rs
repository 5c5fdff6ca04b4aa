use std::collections::HashMap;

use super::state::{StateArena, StateId};
use crate::klotski::prelude::*;

/// The dedup table over packed boards. The CRC-32 fingerprint keys a
/// bucket; byte equality of the whole field decides membership, so a
/// fingerprint collision costs one comparison and nothing else.
#[derive(Clone, Debug, Default)]
pub struct SeenSet {
    buckets: HashMap<u32, Vec<StateId>>,
}

impl SeenSet {
    /// Whether a byte-identical field was recorded before.
    pub fn contains(&self, crc: u32, field: &Field, arena: &StateArena) -> bool {
        self.buckets
            .get(&crc)
            .is_some_and(|bucket| bucket.iter().any(|&id| arena.get(id).field == *field))
    }

    /// Records a committed state under its fingerprint.
    pub fn insert(&mut self, crc: u32, id: StateId) {
        self.buckets.entry(crc).or_default().push(id);
    }

    /// Number of recorded states.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::StateNode;

    #[test]
    fn dedups_by_bytes() {
        let geom = Geometry::new(2, 1);
        let mut arena = StateArena::default();
        let mut seen = SeenSet::default();

        let mut field = Field::empty(geom);
        field.set(0, 1);
        let crc = field.fingerprint();
        assert!(!seen.contains(crc, &field, &arena));

        let id = arena.push(StateNode { field: field.clone(), tiles: Box::new([]), parent: None });
        seen.insert(crc, id);
        assert!(seen.contains(crc, &field, &arena));
        assert_eq!(seen.len(), 1);

        let mut other = Field::empty(geom);
        other.set(1, 1);
        assert!(!seen.contains(other.fingerprint(), &other, &arena));
    }
}
