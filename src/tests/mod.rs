use super::{BuildError, FixedSlotMap};
use alloc::string::String;
use alloc::{vec, vec::Vec};
use rapidhash::RapidRng;

#[test]
fn borrow() {
    let map: FixedSlotMap<&u64, usize> = FixedSlotMap::from_entries(vec![(&123, 0), (&456, 1)]);
    assert_eq!(map.get(&123), Some(&0));
    assert_eq!(map.get(&456), Some(&1));
}

#[test]
fn build_100k_integers() {
    let entries: Vec<(u64, usize)> = (0..100_000u64).map(|k| (k, k as usize)).collect();

    let map = FixedSlotMap::from_entries(entries);
    assert_eq!(map.capacity(), 131_072);
    assert_eq!(map.len(), 100_000);
    assert_eq!(map.get(&0), Some(&0));
    assert_eq!(map.get(&99_999), Some(&99_999));
    // Slots past the dense range stay empty.
    assert_eq!(map.get(&100_000), None);
    assert_eq!(map.get(&131_071), None);
}

#[test]
fn random_keys_across_fixed_slots() {
    let mut rng = RapidRng::new(0xa409_3822_299f_31d0);
    let capacity = 1024u64;

    // At most one key per slot: adding a multiple of the capacity never changes the slot, so
    // this set is collision-free by construction no matter what the rng produces.
    let mut entries: Vec<(u64, u64)> = Vec::new();
    for slot in 0..capacity {
        if rng.next() & 1 == 0 {
            entries.push((slot + capacity * (rng.next() % 1000), slot));
        }
    }

    let len = entries.len();
    let map = FixedSlotMap::try_with_capacity(entries.clone(), 1024).unwrap();
    assert_eq!(map.capacity(), 1024);
    assert_eq!(map.len(), len);

    for &(key, slot) in &entries {
        assert_eq!(map.get(&key), Some(&slot), "key {key} must resolve to slot {slot}");
        // Another key with the same residue reaches the same slot but fails the equality check.
        assert_eq!(map.get(&(key + capacity * 1000)), None);
    }
}

#[test]
fn string_keys_fit_with_enough_slots() {
    let words = [
        "apple",
        "banana",
        "cherry",
        "dragonfruit",
        "elderberry",
        "fig",
        "grape",
        "huckleberry",
    ];

    // String hashes spread statistically rather than by residue, so widen the table until the
    // sample set happens to be collision-free.
    let mut capacity = words.len().next_power_of_two();
    let map = loop {
        let entries: Vec<(String, usize)> =
            words.iter().map(|word| String::from(*word)).zip(0..).collect();
        match FixedSlotMap::try_with_capacity(entries, capacity) {
            Ok(map) => break map,
            Err(BuildError::SlotCollision { .. }) => capacity *= 2,
            Err(err) => panic!("unexpected error: {err}"),
        }
    };

    assert_eq!(map.len(), words.len());
    for (i, word) in words.iter().enumerate() {
        assert_eq!(map.get(*word), Some(&i));
    }
    assert_eq!(map.get("durian"), None);
    assert_eq!(map.get(""), None);
}

#[cfg(feature = "std")]
#[test]
fn agrees_with_hash_map_on_dense_ranges() {
    use std::collections::HashMap;

    let mut rng = RapidRng::new(0x082e_fa98_ec4e_6c89);
    for len in [0usize, 1, 2, 3, 5, 8, 100, 257] {
        let entries: Vec<(u64, u64)> = (0..len as u64).map(|k| (k, rng.next())).collect();
        let model: HashMap<u64, u64> = entries.iter().copied().collect();
        let map = FixedSlotMap::try_from_entries(entries).unwrap();

        assert_eq!(map.len(), model.len());
        assert_eq!(map.capacity(), len.next_power_of_two());
        for key in 0..(2 * len as u64 + 2) {
            assert_eq!(map.get(&key), model.get(&key), "lookup of {key} diverged at len {len}");
        }

        // Dense integer ranges come out of iteration in key order, because the slot is the key.
        let keys: Vec<u64> = map.keys().copied().collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[cfg(feature = "std")]
#[test]
fn concurrent_reads_need_no_locks() {
    let map: FixedSlotMap<u32, u32> =
        (0..64u32).map(|k| (k, k.wrapping_mul(0x9e37_79b9))).collect();

    std::thread::scope(|scope| {
        for worker in 0..4u32 {
            let map = &map;
            scope.spawn(move || {
                for round in 0..1000u32 {
                    let key = (worker + round) % 64;
                    assert_eq!(map.get(&key), Some(&key.wrapping_mul(0x9e37_79b9)));
                }
                assert_eq!(map.len(), 64);
            });
        }
    });
}
