//! Fixed-slot hash maps.

use super::hash::SlotHash;
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use displaydoc::Display;
use thiserror::Error;

/// A read-only hash map with caller-guaranteed collision-free slots.
///
/// The complete entry set is supplied once, up front. Construction allocates a slot array whose
/// length is the smallest power of two that fits the entry count and stores each pair at
/// `slot_hash(key) & (capacity - 1)`; a lookup recomputes that slot and inspects it. There is no
/// probing, no chaining, and no rehashing, which is what makes the worst case a single hash, mask,
/// and array read.
///
/// The flip side is a precondition the map cannot enforce for free: **no two supplied keys may
/// resolve to the same slot** under the chosen capacity. Integer keys hash to themselves (see
/// [`SlotHash`]), so e.g. any subset of `0..capacity` is safe. The unchecked constructor trusts
/// the caller in release builds and fails fast under `debug_assertions`; the `try_` constructors
/// validate unconditionally.
///
/// Once built, the map never changes: every method takes `&self`, and the mutation surface of
/// [`MutableMap`](crate::MutableMap) is implemented as unconditional
/// [`Unsupported`](crate::Unsupported) errors. A `&FixedSlotMap` can be shared across threads
/// freely once construction has returned; concurrent readers need no synchronization.
#[derive(Clone)]
pub struct FixedSlotMap<K, V> {
    /// The slots, indexed by `slot_hash(key) & (slots.len() - 1)`.
    ///
    /// The length is the capacity: a power of two, at least 1, fixed at construction and never
    /// derived from occupancy. `None` marks an empty slot.
    slots: Box<[Option<(K, V)>]>,
}

/// Construction failures reported by the checked constructors.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    /// two keys resolve to slot {slot} of {capacity}
    SlotCollision {
        /// Slot index both keys resolve to.
        slot: usize,
        /// Capacity the slots were computed against.
        capacity: usize,
    },

    /// capacity {capacity} is not a power of two
    CapacityNotPowerOfTwo {
        /// The rejected capacity.
        capacity: usize,
    },

    /// capacity {capacity} cannot hold {len} entries
    CapacityTooSmall {
        /// The rejected capacity.
        capacity: usize,
        /// Number of supplied entries.
        len: usize,
    },
}

/// Slot for `key` in a table of `capacity` cells, which must be a power of two.
#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the mask keeps the hash below the capacity"
)]
fn slot_index<Q: ?Sized + SlotHash>(key: &Q, capacity: usize) -> usize {
    #[expect(clippy::arithmetic_side_effects, reason = "capacity is at least 1")]
    let mask = capacity as u64 - 1;
    (key.slot_hash() & mask) as usize
}

impl<K: SlotHash, V> FixedSlotMap<K, V> {
    /// Build a map from its complete entry list.
    ///
    /// The capacity becomes the smallest power of two that fits `entries.len()`, minimum 1, and
    /// each pair is scattered into its slot. The caller guarantees that no two keys resolve to
    /// the same slot; release builds do not verify that. On violating input the mechanism is
    /// still deterministic (the later pair overwrites the slot and the earlier key becomes
    /// unreachable), but such a map is a caller bug, and builds with `debug_assertions` panic on
    /// it. Use [`try_from_entries`](Self::try_from_entries) to validate unconditionally.
    #[inline]
    #[must_use]
    pub fn from_entries(entries: Vec<(K, V)>) -> Self {
        let supplied = entries.len();
        let map = Self::scatter(entries, supplied.next_power_of_two());
        debug_assert!(
            map.len() == supplied,
            "slot collision: two keys resolve to the same slot"
        );
        map
    }

    /// Build a map, verifying the collision-free precondition.
    ///
    /// Exactly like [`from_entries`](Self::from_entries), except that violations of the
    /// collision-free precondition are reported instead of being silently collapsed. Prefer this
    /// when the keys come from data you do not control.
    ///
    /// # Errors
    ///
    /// [`BuildError::SlotCollision`] if two keys resolve to the same slot.
    #[inline]
    pub fn try_from_entries(entries: Vec<(K, V)>) -> Result<Self, BuildError> {
        let capacity = entries.len().next_power_of_two();
        Self::scatter_checked(entries, capacity)
    }

    /// Build a map over a caller-chosen capacity.
    ///
    /// A table larger than [`from_entries`](Self::from_entries) would allocate spreads the same
    /// keys over more slots, which can clear accidental collisions at the cost of memory.
    ///
    /// # Errors
    ///
    /// [`BuildError::CapacityNotPowerOfTwo`] and [`BuildError::CapacityTooSmall`] for a capacity
    /// the slot arithmetic cannot work with, [`BuildError::SlotCollision`] as in
    /// [`try_from_entries`](Self::try_from_entries).
    #[inline]
    pub fn try_with_capacity(entries: Vec<(K, V)>, capacity: usize) -> Result<Self, BuildError> {
        if !capacity.is_power_of_two() {
            return Err(BuildError::CapacityNotPowerOfTwo { capacity });
        }
        if capacity < entries.len() {
            return Err(BuildError::CapacityTooSmall {
                capacity,
                len: entries.len(),
            });
        }
        Self::scatter_checked(entries, capacity)
    }

    /// Move every pair into its slot, last write winning on a collision.
    fn scatter(entries: Vec<(K, V)>, capacity: usize) -> Self {
        let mut slots: Vec<Option<(K, V)>> = (0..capacity).map(|_| None).collect();
        for (key, value) in entries {
            let slot = slot_index(&key, capacity);
            slots[slot] = Some((key, value));
        }
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    /// Move every pair into its slot, reporting the first slot claimed twice.
    fn scatter_checked(entries: Vec<(K, V)>, capacity: usize) -> Result<Self, BuildError> {
        let mut slots: Vec<Option<(K, V)>> = (0..capacity).map(|_| None).collect();
        for (key, value) in entries {
            let slot = slot_index(&key, capacity);
            if slots[slot].is_some() {
                return Err(BuildError::SlotCollision { slot, capacity });
            }
            slots[slot] = Some((key, value));
        }
        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }
}

impl<K, V> FixedSlotMap<K, V> {
    /// Create an empty map.
    ///
    /// The empty map still owns a single empty slot, so the slot mask stays total and the
    /// power-of-two capacity invariant holds unconditionally.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None].into_boxed_slice(),
        }
    }

    /// Get a key-value pair by key.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + SlotHash + Eq,
    {
        // SAFETY: the index is masked below `slots.len()`, which is a power of two.
        unsafe { self.slots.get_unchecked(slot_index(key, self.slots.len())) }
            .as_ref()
            .filter(|(k, _)| k.borrow() == key)
            .map(|(k, v)| (k, v))
    }

    /// Get a value by key.
    ///
    /// Computes `slot_hash(key) & (capacity - 1)` against the capacity fixed at construction and
    /// inspects that slot only, returning `None` when the slot is empty or holds another key.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + SlotHash + Eq,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Check if the map contains a key.
    ///
    /// A slot lookup plus one equality test, never a scan.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + SlotHash + Eq,
    {
        self.get_key_value(key).is_some()
    }

    /// Check if some entry's value equals `value`.
    ///
    /// No index exists over values, so this is a full scan of the slot array.
    #[inline]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|candidate| candidate == value)
    }

    /// Get the number of entries.
    ///
    /// Occupancy is not cached anywhere: the slot array is the single source of truth, and this
    /// counts its occupied slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check if the map has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the slot count.
    ///
    /// Always a power of two, at least 1, fixed at construction.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate through entries.
    ///
    /// Entries come out in slot order, which is fixed for the life of the map.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Iterate through keys, in slot order.
    ///
    /// Each key appears exactly once: a slot holds at most one pair, and the construction
    /// precondition keeps distinct keys in distinct slots.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate through values, in slot order.
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V> Default for FixedSlotMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for FixedSlotMap<K, V> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: SlotHash, V> FromIterator<(K, V)> for FixedSlotMap<K, V> {
    /// Collect entries through [`FixedSlotMap::from_entries`]; the collision-free precondition
    /// applies unchanged.
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

impl<'a, K, V> IntoIterator for &'a FixedSlotMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Iterator over a map's entries, in slot order.
#[derive(Clone, Debug)]
pub struct Iter<'a, K, V> {
    /// Remaining slots, occupied or not.
    slots: core::slice::Iter<'a, Option<(K, V)>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .find_map(|slot| slot.as_ref().map(|(k, v)| (k, v)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len()))
    }
}
