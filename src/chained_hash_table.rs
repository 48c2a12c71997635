//! ChainedHashTable: string-keyed buckets of entries with full-rehash growth.

use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::key::{hash_folded, keys_match, Keyed};
use core::hash::{BuildHasher, Hasher};
use hashbrown::hash_map::DefaultHashBuilder;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

type Bucket<V> = Vec<Entry<V>>;
type Slots<V> = Vec<Option<Bucket<V>>>;

fn empty_slots<V>(capacity: usize) -> Slots<V> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Slot for `key` in a table of `capacity` slots. A zero capacity maps
/// every key to 0.
fn slot_for<S: BuildHasher>(hasher: &S, key: &str, capacity: usize) -> usize {
    let mut state = hasher.build_hasher();
    hash_folded(key, &mut state);
    state.finish().checked_rem(capacity as u64).unwrap_or(0) as usize
}

/// Rebuild every entry of `old` into a fresh array of `capacity` slots,
/// placing each by its value's own key.
fn rehash<V: Keyed, S: BuildHasher>(hasher: &S, old: Slots<V>, capacity: usize) -> Slots<V> {
    let mut slots = empty_slots(capacity);
    for Entry { value, .. } in old.into_iter().flatten().flatten() {
        let key = value.key().to_owned();
        let index = slot_for(hasher, &key, capacity);
        slots[index]
            .get_or_insert_with(Vec::new)
            .push(Entry { key, value });
    }
    slots
}

fn require_key(key: Option<&str>) -> Result<&str> {
    key.ok_or(TableError::InvalidKey)
}

/// A hash table from case-insensitive string keys to values, resolving
/// collisions by chaining entries in per-slot buckets.
///
/// Capacity only grows: once `num_keys / capacity` reaches the load factor
/// threshold, the next insert rebuilds the table with `2 * capacity + 1`
/// slots.
#[derive(Clone)]
pub struct ChainedHashTable<V, S = DefaultHashBuilder> {
    hasher: S,
    slots: Slots<V>,
    load_factor_threshold: f64,
    num_keys: usize,
}

impl<V> ChainedHashTable<V> {
    pub fn new() -> Self {
        Self::from_config(TableConfig::default())
    }

    pub fn with_capacity_and_threshold(initial_capacity: usize, load_factor_threshold: f64) -> Self {
        Self::from_config(TableConfig {
            initial_capacity,
            load_factor_threshold,
        })
    }

    pub fn from_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<V> Default for ChainedHashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> ChainedHashTable<V, S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            slots: empty_slots(config.initial_capacity),
            load_factor_threshold: config.load_factor_threshold,
            num_keys: 0,
        }
    }

    /// Slot index of `key` under the current capacity, in `[0, capacity)`.
    ///
    /// Keys that match case-insensitively always share an index.
    pub fn hash(&self, key: &str) -> usize {
        slot_for(&self.hasher, key, self.capacity())
    }

    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    pub fn len(&self) -> usize {
        self.num_keys
    }

    pub fn is_empty(&self) -> bool {
        self.num_keys == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Current ratio of keys to slots; 0.0 for an empty slot array.
    pub fn load_factor(&self) -> f64 {
        match self.capacity() {
            0 => 0.0,
            capacity => self.num_keys as f64 / capacity as f64,
        }
    }

    fn bucket(&self, key: &str) -> Option<&Bucket<V>> {
        self.slots.get(self.hash(key))?.as_ref()
    }

    fn bucket_mut(&mut self, key: &str) -> Option<&mut Bucket<V>> {
        let index = self.hash(key);
        self.slots.get_mut(index)?.as_mut()
    }

    /// Stored value for `key`.
    ///
    /// Fails with `InvalidKey` for `None` and `KeyNotFound` when no entry
    /// matches.
    pub fn get<'k>(&self, key: impl Into<Option<&'k str>>) -> Result<&V> {
        let key = require_key(key.into())?;
        self.bucket(key)
            .and_then(|bucket| bucket.iter().find(|e| keys_match(&e.key, key)))
            .map(|e| &e.value)
            .ok_or(TableError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.bucket(key)
            .is_some_and(|bucket| bucket.iter().any(|e| keys_match(&e.key, key)))
    }

    /// Remove the entry for `key`, reporting whether one existed.
    ///
    /// A missing key is `Ok(false)`, not an error.
    pub fn remove<'k>(&mut self, key: impl Into<Option<&'k str>>) -> Result<bool> {
        self.take(key).map(|value| value.is_some())
    }

    /// Remove the entry for `key` and return its value.
    pub fn take<'k>(&mut self, key: impl Into<Option<&'k str>>) -> Result<Option<V>> {
        let key = require_key(key.into())?;
        let Some(bucket) = self.bucket_mut(key) else {
            return Ok(None);
        };
        let Some(pos) = bucket.iter().position(|e| keys_match(&e.key, key)) else {
            return Ok(None);
        };
        // Vec::remove keeps the rest of the chain in insertion order.
        let entry = bucket.remove(pos);
        self.num_keys -= 1;
        trace!(key, num_keys = self.num_keys, "removed entry");
        Ok(Some(entry.value))
    }

    /// Unordered iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter().flatten().flatten(),
            remaining: self.num_keys,
        }
    }

    #[cfg(test)]
    pub(crate) fn bucket_lengths(&self) -> Vec<usize> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map_or(0, Vec::len))
            .collect()
    }

    /// Panics unless the count, placement, and uniqueness invariants hold.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut total = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(bucket) = slot else { continue };
            for (i, e) in bucket.iter().enumerate() {
                assert_eq!(self.hash(&e.key), index, "entry {:?} misplaced", e.key);
                assert!(
                    !bucket[..i].iter().any(|p| keys_match(&p.key, &e.key)),
                    "duplicate key {:?}",
                    e.key
                );
            }
            total += bucket.len();
        }
        assert_eq!(total, self.num_keys);
    }
}

impl<V, S> ChainedHashTable<V, S>
where
    V: Keyed,
    S: BuildHasher,
{
    /// Insert `value` under `key`.
    ///
    /// The key is validated first, then the table grows if it is at its
    /// load factor threshold, and only then is the target bucket searched
    /// for a case-insensitive duplicate.
    ///
    /// `key` must match `value.key()` case-insensitively: a resize rebuilds
    /// every entry from its value's own key. Debug builds panic on a
    /// mismatch before touching the table.
    pub fn insert<'k>(&mut self, key: impl Into<Option<&'k str>>, value: V) -> Result<()> {
        let key = require_key(key.into())?;
        debug_assert!(
            keys_match(key, value.key()),
            "key {:?} does not match the value's own key {:?}",
            key,
            value.key()
        );
        self.check_capacity();

        let index = self.hash(key);
        let slot = &mut self.slots[index];
        if let Some(bucket) = slot.as_ref() {
            if bucket.iter().any(|e| keys_match(&e.key, key)) {
                return Err(TableError::DuplicateKey);
            }
        }
        slot.get_or_insert_with(Vec::new).push(Entry {
            key: key.to_owned(),
            value,
        });
        self.num_keys += 1;
        trace!(key, index, num_keys = self.num_keys, "inserted entry");
        Ok(())
    }

    fn needs_resize(&self) -> bool {
        match self.capacity() {
            0 => true,
            capacity => self.num_keys as f64 / capacity as f64 >= self.load_factor_threshold,
        }
    }

    fn check_capacity(&mut self) {
        if !self.needs_resize() {
            return;
        }
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2).saturating_add(1);
        let old = std::mem::take(&mut self.slots);
        self.slots = rehash(&self.hasher, old, new_capacity);
        debug!(
            old_capacity,
            new_capacity,
            num_keys = self.num_keys,
            "resized table"
        );
    }
}

impl<V: core::fmt::Debug, S> core::fmt::Debug for ChainedHashTable<V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(
                self.slots
                    .iter()
                    .flatten()
                    .flatten()
                    .map(|e| (&e.key, &e.value)),
            )
            .finish()
    }
}

/// Iterator over the entries of a `ChainedHashTable`, in slot order.
pub struct Iter<'a, V> {
    it: core::iter::Flatten<core::iter::Flatten<core::slice::Iter<'a, Option<Bucket<V>>>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.next()?;
        self.remaining -= 1;
        Some((e.key.as_str(), &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V, S> IntoIterator for &'a ChainedHashTable<V, S>
where
    S: BuildHasher,
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
