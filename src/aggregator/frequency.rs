//! Per-address repeat counts and their merge.
//!
//! The stored value for an address is the number of sightings *beyond the
//! first*: the first sighting inserts the address with 0. Merging adds the
//! stored values, so an address seen once by each of two workers ends up at
//! 0 + 0 = 0 even though it occurred twice overall. This keeps results
//! identical to the established tool output; use [`AddressFrequencyMap::occurrences`]
//! for a single-worker total.

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

/// Address -> repeat count, ordered by address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFrequencyMap {
    counts: BTreeMap<i64, u64>,
}

impl AddressFrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note one sighting of `address`
    pub fn record(&mut self, address: i64) {
        match self.counts.entry(address) {
            Entry::Vacant(slot) => {
                slot.insert(0);
            }
            Entry::Occupied(mut slot) => *slot.get_mut() += 1,
        }
    }

    /// Insert `repeats` for `address`, or add it to the existing count
    pub fn add(&mut self, address: i64, repeats: u64) {
        *self.counts.entry(address).or_insert(0) += repeats;
    }

    /// Fold another map into this one, consuming it
    pub fn absorb(&mut self, other: AddressFrequencyMap) {
        for (address, repeats) in other.counts {
            self.add(address, repeats);
        }
    }

    /// Stored repeat count
    pub fn repeats(&self, address: i64) -> Option<u64> {
        self.counts.get(&address).copied()
    }

    /// Repeats plus the implicit first sighting
    pub fn occurrences(&self, address: i64) -> Option<u64> {
        self.repeats(address).map(|r| r + 1)
    }

    /// Number of distinct addresses
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in ascending address order
    pub fn iter(&self) -> btree_map::Iter<'_, i64, u64> {
        self.counts.iter()
    }
}

impl FromIterator<(i64, u64)> for AddressFrequencyMap {
    fn from_iter<I: IntoIterator<Item = (i64, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AddressFrequencyMap {
    type Item = (i64, u64);
    type IntoIter = btree_map::IntoIter<i64, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Merge worker maps into one
///
/// Worker 0's map is the accumulator; every later map is folded into it in
/// order. Ownership of all maps moves into the merge.
pub fn merge_maps(maps: Vec<AddressFrequencyMap>) -> AddressFrequencyMap {
    let mut maps = maps.into_iter();
    let mut merged = maps.next().unwrap_or_default();
    for map in maps {
        merged.absorb(map);
    }
    merged
}
