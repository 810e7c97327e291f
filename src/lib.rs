//! Fixed-capacity, read-only hash maps for collision-free key sets.
//!
//! [`FixedSlotMap`] trades generality for latency. The complete entry set is supplied once, at
//! construction: each pair lands in slot `slot_hash(key) & (capacity - 1)` of a power-of-two
//! array, and a lookup is a single hash, mask, and array read. Nothing resolves collisions at
//! lookup time; the caller promises that no two keys share a slot, which is exactly the work an
//! ordinary hash map spends most of its machinery on.
//!
//! # Usage
//!
//! Integer keys hash to themselves, so dense key ranges fill the table without collisions:
//!
//! ```rust
//! use fixmap::FixedSlotMap;
//!
//! let statuses = FixedSlotMap::from_entries(vec![
//!     (200u32, "OK"),
//!     (201, "Created"),
//!     (202, "Accepted"),
//!     (203, "Non-Authoritative Information"),
//! ]);
//! assert_eq!(statuses.get(&201), Some(&"Created"));
//! assert_eq!(statuses.get(&404), None);
//! ```
//!
//! When the keys are not under your control, validate instead of promising:
//!
//! ```rust
//! use fixmap::{BuildError, FixedSlotMap};
//!
//! let entries = vec![(1u64, "one"), (9, "nine")];
//! assert!(matches!(
//!     FixedSlotMap::try_from_entries(entries.clone()),
//!     Err(BuildError::SlotCollision { .. })
//! ));
//!
//! // A wider table separates these keys.
//! let map = FixedSlotMap::try_with_capacity(entries, 16)?;
//! assert_eq!(map.get(&9), Some(&"nine"));
//! # Ok::<(), BuildError>(())
//! ```
//!
//! The read and write halves of the classic map interface are split into capability traits:
//! [`ReadOnlyMap`] for lookups and iteration, [`MutableMap`] for insertion and removal.
//! [`FixedSlotMap`] implements both, with every mutation failing as [`Unsupported`]; under the
//! `std` feature, [`HashMap`](std::collections::HashMap) implements both with mutations that
//! succeed. Code written against the traits accepts either container and discovers the
//! difference through `Result`, not through a panic.
//!
//! # Features
//!
//! - `std` (default): implements the capability traits for [`std::collections::HashMap`].
//!   Disable for `no_std` use; the maps themselves only need `alloc`.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(unsafe_op_in_unsafe_fn)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod hash;
mod map;
mod traits;

pub use map::{BuildError, FixedSlotMap, Iter};
pub use traits::{MutableMap, ReadOnlyMap, Unsupported};

#[cfg(test)]
mod tests;
