//! Capability traits separating map reading from map mutation.
//!
//! The classic map interface bundles lookups and mutation into one type, which forces read-only
//! containers to answer mutation calls anyway. These traits split the two capabilities: code that
//! only reads takes [`ReadOnlyMap`], code that intends to mutate takes [`MutableMap`], and a
//! read-only container reached through the mutable interface reports [`Unsupported`] at the call
//! site without touching its contents.

#![allow(
    clippy::same_name_method,
    reason = "the trait surface deliberately mirrors the inherent one"
)]

use super::hash::SlotHash;
use super::map::FixedSlotMap;
#[cfg(feature = "std")]
use core::hash::{BuildHasher, Hash};
use displaydoc::Display;
#[cfg(feature = "std")]
use std::collections::HashMap;
use thiserror::Error;

/// Read access to an associative container.
///
/// Only [`get`](Self::get), [`len`](Self::len), and [`iter`](Self::iter) are required; the rest
/// of the read surface is derived from them. Returned iterators are opaque per implementation,
/// so the trait is not dyn-compatible; take it as a generic bound.
pub trait ReadOnlyMap<K, V> {
    /// Get a value by key.
    fn get(&self, key: &K) -> Option<&V>;

    /// Get the number of entries.
    fn len(&self) -> usize;

    /// Iterate through entries, in the container's fixed order.
    ///
    /// The explicit lifetime ties the yielded references to the borrow of `self`; a generic
    /// trait gets no implied `K: 'a` from the receiver, so the bounds are spelled out.
    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a;

    /// Check if the map contains a key.
    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Check if some entry's value equals `value`.
    #[inline]
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, candidate)| candidate == value)
    }

    /// Check if the map has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate through keys.
    #[inline]
    fn keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
        V: 'a,
    {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate through values.
    #[inline]
    fn values<'a>(&'a self) -> impl Iterator<Item = &'a V>
    where
        K: 'a,
        V: 'a,
    {
        self.iter().map(|(_, v)| v)
    }
}

/// Write access to an associative container.
///
/// Every operation is fallible: a container that does not support mutation implements this trait
/// by returning [`Unsupported`] from each method, which keeps the rejection at the call site
/// instead of hiding it behind a panic.
pub trait MutableMap<K, V>: ReadOnlyMap<K, V> {
    /// Insert a pair, returning the value previously held by the key.
    ///
    /// # Errors
    ///
    /// [`Unsupported`] if the container rejects insertion.
    fn put(&mut self, key: K, value: V) -> Result<Option<V>, Unsupported>;

    /// Insert every pair yielded by `entries`.
    ///
    /// # Errors
    ///
    /// [`Unsupported`] if the container rejects insertion. A container that rejects mutation
    /// rejects the empty batch too: the failure is about the operation, not about the payload.
    fn put_all<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) -> Result<(), Unsupported>;

    /// Remove a key, returning its value.
    ///
    /// # Errors
    ///
    /// [`Unsupported`] if the container rejects removal.
    fn remove(&mut self, key: &K) -> Result<Option<V>, Unsupported>;

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// [`Unsupported`] if the container rejects clearing.
    fn clear(&mut self) -> Result<(), Unsupported>;
}

/// mutation `{operation}` is not supported by this read-only map
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[non_exhaustive]
pub struct Unsupported {
    /// Name of the rejected operation.
    pub operation: &'static str,
}

impl Unsupported {
    /// Report `operation` as unsupported.
    #[inline]
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

impl<K: SlotHash + Eq, V> ReadOnlyMap<K, V> for FixedSlotMap<K, V> {
    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        FixedSlotMap::get(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        FixedSlotMap::len(self)
    }

    #[inline]
    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        FixedSlotMap::iter(self)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        FixedSlotMap::contains_key(self, key)
    }
}

/// The mutable interface exists so that a `FixedSlotMap` can flow through code written against
/// [`MutableMap`]; every operation fails with [`Unsupported`] and leaves the slots untouched.
impl<K: SlotHash + Eq, V> MutableMap<K, V> for FixedSlotMap<K, V> {
    #[inline]
    fn put(&mut self, _key: K, _value: V) -> Result<Option<V>, Unsupported> {
        Err(Unsupported::new("put"))
    }

    #[inline]
    fn put_all<I: IntoIterator<Item = (K, V)>>(&mut self, _entries: I) -> Result<(), Unsupported> {
        Err(Unsupported::new("put_all"))
    }

    #[inline]
    fn remove(&mut self, _key: &K) -> Result<Option<V>, Unsupported> {
        Err(Unsupported::new("remove"))
    }

    #[inline]
    fn clear(&mut self) -> Result<(), Unsupported> {
        Err(Unsupported::new("clear"))
    }
}

#[cfg(feature = "std")]
impl<K: Eq + Hash, V, S: BuildHasher> ReadOnlyMap<K, V> for HashMap<K, V, S> {
    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        Self::iter(self)
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }
}

#[cfg(feature = "std")]
impl<K: Eq + Hash, V, S: BuildHasher> MutableMap<K, V> for HashMap<K, V, S> {
    #[inline]
    fn put(&mut self, key: K, value: V) -> Result<Option<V>, Unsupported> {
        Ok(self.insert(key, value))
    }

    #[inline]
    fn put_all<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) -> Result<(), Unsupported> {
        self.extend(entries);
        Ok(())
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Result<Option<V>, Unsupported> {
        Ok(Self::remove(self, key))
    }

    #[inline]
    fn clear(&mut self) -> Result<(), Unsupported> {
        Self::clear(self);
        Ok(())
    }
}
