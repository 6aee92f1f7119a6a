//! Open-addressing hash table keyed by owned strings.
//!
//! Entries live directly in a power-of-two slot array. Collisions are
//! resolved by linear probing with wraparound, and the table doubles only
//! when every slot is occupied. Keys can never be removed, so empty slots
//! always terminate a probe and no tombstones are needed.

use std::fmt;
use std::iter::{FusedIterator, repeat_with};
use std::mem;
use std::slice;
use std::vec;

use tracing::debug;

use crate::hash::hash_key;

/// Slot count of a map created with [`StringMap::new`].
pub const INITIAL_CAPACITY: usize = 2048;

struct Entry<V> {
    key: Box<str>,
    value: V,
}

impl<V> Entry<V> {
    fn new(key: &str, value: V) -> Self {
        Self {
            key: Box::from(key),
            value,
        }
    }
}

/// Hash table from text keys to values of type `V`.
///
/// Keys are copied into the map on insertion and owned by it; values are
/// moved in and dropped together with the map.
///
/// # Invariants
///
/// - `len() <= capacity()` and `capacity()` is a power of two.
/// - No key is stored twice.
/// - Probing from an occupied key's hash origin reaches that key before any
///   empty slot.
pub struct StringMap<V> {
    slots: Vec<Option<Entry<V>>>,
    len: usize,
}

impl<V> StringMap<V> {
    /// Creates an empty map with [`INITIAL_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty map with at least `capacity` slots.
    ///
    /// The slot count is rounded up to the next power of two, with a
    /// minimum of one slot.
    ///
    /// # Panics
    ///
    /// Panics with `capacity overflow` when the rounded slot count does not
    /// fit in `usize`, as [`Vec::with_capacity`] does.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let Some(slots) = capacity.max(1).checked_next_power_of_two() else {
            panic!("capacity overflow");
        };
        Self {
            slots: empty_slots(slots),
            len: 0,
        }
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the map holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current slot count.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// A completely full table is doubled before probing, so there is
    /// always an empty slot to land in. When `key` is already present its
    /// value is swapped in place and the stored key is reused; the
    /// previous value is handed back so the caller can release it.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let index = self.claim(key);
        self.place(index, key, value)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "claimed indices are masked into the slot array"
    )]
    fn place(&mut self, index: usize, key: &str, value: V) -> Option<V> {
        match &mut self.slots[index] {
            Some(entry) => Some(mem::replace(&mut entry.value, value)),
            slot @ None => {
                *slot = Some(Entry::new(key, value));
                self.len += 1;
                None
            }
        }
    }

    /// Returns the value stored under `key`.
    #[expect(
        clippy::indexing_slicing,
        reason = "probe indices are masked into the slot array"
    )]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.position(key)?;
        self.slots[index].as_ref().map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[expect(
        clippy::indexing_slicing,
        reason = "probe indices are masked into the slot array"
    )]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.position(key)?;
        self.slots[index].as_mut().map(|entry| &mut entry.value)
    }

    /// Returns whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the value under `key`, inserting `make()` first if absent.
    ///
    /// Growth follows [`StringMap::insert`]: a full table is doubled before a
    /// new key is stored. Looking up a present key never grows the table.
    #[expect(
        clippy::indexing_slicing,
        reason = "probe indices are masked into the slot array"
    )]
    pub fn get_or_insert_with<F>(&mut self, key: &str, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let index = match self.position(key) {
            Some(found) if self.slots[found].is_some() => found,
            _ => self.claim(key),
        };
        let slot = &mut self.slots[index];
        if slot.is_none() {
            self.len += 1;
        }
        &mut slot.get_or_insert_with(|| Entry::new(key, make())).value
    }

    /// Doubles the slot count and re-homes every entry.
    ///
    /// Entries are moved, not copied: each stored key keeps its allocation
    /// and is placed at the first empty slot along its probe sequence in the
    /// new table.
    #[expect(
        clippy::indexing_slicing,
        reason = "probe indices are masked into the slot array"
    )]
    pub fn resize(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2);
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        let mask = new_capacity.wrapping_sub(1);

        for entry in old_slots.into_iter().flatten() {
            let mut index = hash_key(&entry.key) & mask;
            while self.slots[index].is_some() {
                index = index.wrapping_add(1) & mask;
            }
            self.slots[index] = Some(entry);
        }

        debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "grew string map"
        );
    }

    /// Returns an iterator over `(key, value)` pairs in slot order.
    ///
    /// Slot order depends on key hashes and the growth history; it is
    /// neither insertion order nor sorted.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Index of the slot holding `key`, or of the empty slot where it would
    /// go, growing the table until such a slot exists.
    fn claim(&mut self, key: &str) -> usize {
        if self.len == self.capacity() {
            self.resize();
        }
        loop {
            if let Some(index) = self.position(key) {
                return index;
            }
            self.resize();
        }
    }

    /// First slot along the probe sequence of `key` that either holds
    /// `key` or is empty. `None` only when the table is full and `key` is
    /// absent.
    #[expect(
        clippy::indexing_slicing,
        reason = "probe indices are masked into the slot array"
    )]
    fn position(&self, key: &str) -> Option<usize> {
        let mask = self.capacity().wrapping_sub(1);
        let origin = hash_key(key) & mask;
        (0..self.capacity())
            .map(|step| origin.wrapping_add(step) & mask)
            .find(|&index| {
                self.slots[index]
                    .as_ref()
                    .is_none_or(|entry| *entry.key == *key)
            })
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Option<Entry<V>>> {
    repeat_with(|| None).take(capacity).collect()
}

impl<V> Default for StringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for StringMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a [`StringMap`], in slot order.
pub struct Iter<'a, V> {
    slots: slice::Iter<'a, Option<Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .find_map(Option::as_ref)
            .map(|entry| (&*entry.key, &entry.value))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a StringMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over a [`StringMap`], in slot order.
pub struct IntoIter<V> {
    slots: vec::IntoIter<Option<Entry<V>>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .find_map(|slot| slot)
            .map(|entry| (entry.key.into_string(), entry.value))
    }
}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for StringMap<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
        }
    }
}
