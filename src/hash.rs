//! Slot hashing.
//!
//! A [`FixedSlotMap`](crate::FixedSlotMap) places every entry at
//! `slot_hash(key) & (capacity - 1)` and recomputes that same slot on lookup, so the hash must be
//! a pure function of the key: deterministic across runs and platforms, and total over the key
//! domain. The [`Hash`](core::hash::Hash) trait guarantees neither, which is why this crate
//! defines [`SlotHash`] instead.
//!
//! There is one major difference from the standard hashing API. Instead of funnelling every type
//! through a general-purpose [`Hasher`], the type-specific [`SlotHash::slot_hash`] method produces
//! the slot-selection hash directly and can be overloaded per type. For integers it is the
//! identity, so densely packed integer keys occupy consecutive slots and are collision-free
//! whenever they fit the capacity. Composite types fall back to rapidhash under a fixed seed.

use core::hash::Hasher;

/// Seed for the rapidhash fallback path.
///
/// Hexadecimal digits of pi. Fixed so that hashes, and therefore slot assignments, never vary
/// between runs.
const RAPID_SEED: u64 = 0x1319_8a2e_0370_7344;

/// Deterministic, portable hash used for slot selection.
///
/// # Requirements
///
/// - Much like with [`core::hash::Hash`], `Eq`-equal objects must produce equal hashes. If
///   `T: Borrow<U>` and both `T` and `U` implement [`SlotHash`], the hashes of a value and its
///   borrowed counterpart must match; the implementation for
///   [`String`](alloc::string::String) forwards to the one for [`str`] for exactly this reason.
///
/// - The hash must be deterministic and total: any value of the type hashes, the result depends
///   only on the value, and it is stable across runs and platforms. Do not write
///   platform-dependent data (such as raw `usize` bytes) into the hasher.
///
/// - When hashing two objects that compare unequal, the data fed to the hasher must differ, and
///   no object's byte string may be a prefix of another's. The [`str`] implementation appends a
///   terminator byte to stay prefix-free.
///
/// Implementations decide slot placement outright: a map built over keys `0..n` puts key `i` in
/// slot `i` because the integer implementations hash to the value itself. Override
/// [`slot_hash`](SlotHash::slot_hash) when your key type has a cheaper or better-spreading hash
/// than the streaming fallback.
pub trait SlotHash {
    /// Write the value into a streaming hasher.
    ///
    /// This is the portable encoding of the value, used by the default
    /// [`slot_hash`](SlotHash::slot_hash) and by implementations for aggregate types such as
    /// slices.
    fn hash<H: Hasher>(&self, state: &mut H);

    /// Write a slice of values into the hasher.
    ///
    /// Semantically equivalent to calling [`SlotHash::hash`] for each element in order. This does
    /// not write the slice length, so variable-length containers must emit their length first, as
    /// the `[T]` implementation does.
    #[inline]
    fn hash_slice<H: Hasher>(data: &[Self], state: &mut H)
    where
        Self: Sized,
    {
        for piece in data {
            piece.hash(state);
        }
    }

    /// Compute the full hash used for slot selection.
    ///
    /// The low bits of this value, masked by the map capacity, are the key's slot index. The
    /// default runs [`hash`](SlotHash::hash) through rapidhash with a fixed seed; overloads for
    /// scalars return the value itself so that slot assignment is predictable for integer keys.
    #[inline]
    fn slot_hash(&self) -> u64 {
        let mut state = rapidhash::RapidHasher::new(RAPID_SEED);
        self.hash(&mut state);
        state.finish()
    }
}

impl<T: ?Sized + SlotHash> SlotHash for &T {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }

    #[inline]
    fn slot_hash(&self) -> u64 {
        (**self).slot_hash()
    }
}

impl<T: ?Sized + SlotHash> SlotHash for &mut T {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }

    #[inline]
    fn slot_hash(&self) -> u64 {
        (**self).slot_hash()
    }
}

/// Implement [`SlotHash`] for integers up to 64 bits wide.
///
/// `slot_hash` is the identity (sign-extending for signed types), matching the container contract
/// that sequentially numbered keys land in sequential slots.
macro_rules! impl_int {
    ($($ty:ty => $method:ident,)*) => {
        $(
            impl SlotHash for $ty {
                #[inline]
                fn hash<H: Hasher>(&self, state: &mut H) {
                    state.$method(*self);
                }

                #[inline]
                #[allow(
                    clippy::cast_lossless,
                    clippy::cast_sign_loss,
                    clippy::unnecessary_cast,
                    reason = "the macro instantiates every width and signedness"
                )]
                fn slot_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}
impl_int! {
    u8 => write_u8,
    u16 => write_u16,
    u32 => write_u32,
    u64 => write_u64,
    i8 => write_i8,
    i16 => write_i16,
    i32 => write_i32,
    i64 => write_i64,
}

/// Implement [`SlotHash`] for 128-bit integers.
///
/// The high half is folded into the low half, so values that fit in 64 bits hash to themselves
/// and the hash is invariant under zero-extension with `as u128`.
macro_rules! impl_int128 {
    ($($ty:ty => $method:ident,)*) => {
        $(
            impl SlotHash for $ty {
                #[inline]
                fn hash<H: Hasher>(&self, state: &mut H) {
                    state.$method(*self);
                }

                #[inline]
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "the high half is folded in explicitly"
                )]
                fn slot_hash(&self) -> u64 {
                    (*self as u64) ^ ((*self >> 64i32) as u64)
                }
            }
        )*
    };
}
impl_int128! {
    u128 => write_u128,
    i128 => write_i128,
}

impl SlotHash for usize {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(*self as u64);
    }

    #[inline]
    fn slot_hash(&self) -> u64 {
        *self as u64
    }
}

impl SlotHash for isize {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(*self as i64);
    }

    #[inline]
    #[expect(clippy::cast_sign_loss, reason = "negative keys still get a fixed slot")]
    fn slot_hash(&self) -> u64 {
        *self as u64
    }
}

impl SlotHash for bool {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(u8::from(*self));
    }

    #[inline]
    fn slot_hash(&self) -> u64 {
        u64::from(*self)
    }
}

impl SlotHash for char {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(*self as u32);
    }

    #[inline]
    fn slot_hash(&self) -> u64 {
        u64::from(*self)
    }
}

// Floats don't implement `Eq`, so they can't be keys and don't implement `SlotHash`.

impl SlotHash for str {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.as_bytes());
        // Terminator keeps the encoding prefix-free; 0xff never occurs in UTF-8.
        state.write(&[0xff]);
    }
}

impl SlotHash for alloc::string::String {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        <str as SlotHash>::hash(self, state);
    }

    #[inline]
    fn slot_hash(&self) -> u64 {
        <str as SlotHash>::slot_hash(self)
    }
}

impl<T: SlotHash> SlotHash for [T] {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.len() as u64);
        T::hash_slice(self, state);
    }
}

impl<T: SlotHash> SlotHash for alloc::vec::Vec<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        <[T] as SlotHash>::hash(self, state);
    }

    #[inline]
    fn slot_hash(&self) -> u64 {
        <[T] as SlotHash>::slot_hash(self)
    }
}

/// The hash of `None` is unspecified but fixed; a map may use `Option<T>` keys to give the
/// "absent" key a slot of its own.
impl<T: SlotHash> SlotHash for Option<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            None => state.write_u8(0),
            Some(value) => {
                state.write_u8(1);
                value.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn integers_hash_to_themselves() {
        assert_eq!(0u8.slot_hash(), 0);
        assert_eq!(7u32.slot_hash(), 7);
        assert_eq!(7usize.slot_hash(), 7);
        assert_eq!(0xdead_beefu64.slot_hash(), 0xdead_beef);
        assert_eq!(7i64.slot_hash(), 7);
        assert_eq!((-1i8).slot_hash(), u64::MAX);
        assert_eq!((-1isize).slot_hash(), u64::MAX);
    }

    #[test]
    fn wide_integers_extend_narrow_ones() {
        assert_eq!(5u128.slot_hash(), 5u64.slot_hash());
        assert_eq!(5i128.slot_hash(), 5i64.slot_hash());
        assert_ne!((5u128 << 64i32).slot_hash(), 0, "high half must be folded in");
    }

    #[test]
    fn scalars() {
        assert_eq!(false.slot_hash(), 0);
        assert_eq!(true.slot_hash(), 1);
        assert_eq!('A'.slot_hash(), 65);
    }

    #[test]
    fn references_are_transparent() {
        assert_eq!((&7u32).slot_hash(), 7u32.slot_hash());
        assert_eq!((&"meow").slot_hash(), "meow".slot_hash());
    }

    #[test]
    fn borrow_consistency() {
        assert_eq!(String::from("meow").slot_hash(), "meow".slot_hash());
        assert_eq!(vec![1u32, 2, 3].slot_hash(), [1u32, 2, 3][..].slot_hash());
    }

    #[test]
    fn strings_are_spread() {
        // Not a collision-resistance proof, just a guard against a degenerate fallback.
        assert_ne!("a".slot_hash(), "b".slot_hash());
        assert_ne!("a".slot_hash(), "ab".slot_hash());
        assert_ne!("".slot_hash(), "a".slot_hash());
    }

    #[test]
    fn options_are_total() {
        let none: Option<u32> = None;
        assert_ne!(none.slot_hash(), Some(0u32).slot_hash());
        assert_eq!(none.slot_hash(), None::<u32>.slot_hash());
    }
}
