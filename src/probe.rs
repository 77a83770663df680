//! The probing and sizing algorithm shared by [`HashTable`] and
//! [`ScalarTable`].
//!
//! Both tables keep a power-of-two slot array and resolve collisions by
//! linear probing. Nothing here touches slot contents directly: callers hand
//! in a closure or a [`ShiftSlots`] view that reads or moves slots, so the
//! generic and scalar storage layouts run the exact same placement, lookup
//! and deletion logic.
//!
//! [`HashTable`]: crate::HashTable
//! [`ScalarTable`]: crate::ScalarTable

use cfg_if::cfg_if;

/// Smallest table length. A single-slot table could never keep an empty slot
/// around to terminate probes.
pub const MIN_LEN: usize = 2;

/// The bucket-selection parameters of one table allocation.
///
/// A key's ideal slot is `(hash * multiplier) >> shift`: the high bits of a
/// multiplicative hash, which stay well distributed even when the input hash
/// only varies in a few bits. The multiplier is odd, drawn per allocation,
/// and therefore differs between instances and between generations of the
/// same instance, so a set of keys that collides in one table rarely
/// collides in the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    multiplier: u64,
    shift: u32,
    mask: usize,
}

impl Spread {
    /// Spread for a table of `len` slots with a freshly drawn multiplier.
    pub(crate) fn new(len: usize) -> Self {
        debug_assert!(len.is_power_of_two() && len >= MIN_LEN);
        Self {
            multiplier: next_multiplier(),
            shift: u64::BITS - len.trailing_zeros(),
            mask: len - 1,
        }
    }

    /// Ideal slot for a key with the given hash.
    #[inline(always)]
    pub fn place(&self, hash: u64) -> usize {
        (hash.wrapping_mul(self.multiplier) >> self.shift) as usize
    }

    /// `len() - 1`.
    #[inline(always)]
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Number of slots in the table this spread belongs to.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.mask + 1
    }

    /// Always `false`: a table has at least [`MIN_LEN`] slots.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The odd multiplier applied to every hash.
    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// Right shift keeping `log2(len())` high bits of the product.
    pub fn shift(&self) -> u32 {
        self.shift
    }
}

cfg_if! {
    if #[cfg(feature = "std")] {
        use core::cell::RefCell;

        use rand::RngCore;
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        std::thread_local! {
            static MULTIPLIERS: RefCell<SmallRng> = RefCell::new(SmallRng::seed_from_u64(seed()));
        }

        /// Draws an odd multiplier from a thread-local generator seeded once
        /// per thread from process-random state.
        pub(crate) fn next_multiplier() -> u64 {
            MULTIPLIERS.with(|rng| rng.borrow_mut().next_u64()) | 1
        }
    } else {
        use core::sync::atomic::AtomicU64;
        use core::sync::atomic::Ordering;

        use rand::RngCore;
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        static DRAWS: AtomicU64 = AtomicU64::new(0);

        /// Draws an odd multiplier. Without `std` there is no thread-local
        /// storage, so each draw reseeds from the random state mixed with a
        /// global draw counter.
        pub(crate) fn next_multiplier() -> u64 {
            let draw = DRAWS.fetch_add(1, Ordering::Relaxed);
            SmallRng::seed_from_u64(seed() ^ draw).next_u64() | 1
        }
    }
}

fn seed() -> u64 {
    use core::hash::BuildHasher;

    foldhash::fast::RandomState::default().hash_one(0x9e37_79b9_7f4a_7c15_u64)
}

/// Walks slots from `start`, stepping by one modulo the table length.
///
/// `visit` reports `None` for an empty slot, `Some(true)` for the key being
/// looked for and `Some(false)` for any other key. Returns `Ok(index)` of the
/// match or `Err(index)` of the first empty slot, which is where the key
/// would be inserted.
///
/// The table must hold at least one empty slot or a miss never terminates;
/// [`threshold`] guarantees that.
#[inline]
pub(crate) fn probe(
    start: usize,
    mask: usize,
    mut visit: impl FnMut(usize) -> Option<bool>,
) -> Result<usize, usize> {
    let mut index = start & mask;
    loop {
        match visit(index) {
            None => return Err(index),
            Some(true) => return Ok(index),
            Some(false) => index = (index + 1) & mask,
        }
    }
}

/// Slot storage as seen by [`shift_back`].
pub(crate) trait ShiftSlots {
    /// Ideal slot of the key stored at `index`, or `None` if it is empty.
    fn ideal(&self, index: usize) -> Option<usize>;

    /// Moves the entry at `from` into the empty slot `to`, leaving `from`
    /// empty.
    fn relocate(&mut self, from: usize, to: usize);
}

/// Backward-shift deletion.
///
/// The caller has already emptied `gap`. Every key that follows it in the
/// same cluster and whose ideal slot does not lie strictly between the gap
/// and its current slot is moved into the gap, which then moves to where
/// that key came from. The scan stops at the first empty slot, so no
/// tombstones are left and every key stays reachable from its ideal slot.
///
/// Returns the slot left empty at the end; it differs from `gap` exactly when
/// some key was moved into `gap`.
pub(crate) fn shift_back(slots: &mut impl ShiftSlots, gap: usize, mask: usize) -> usize {
    let mut gap = gap;
    let mut next = (gap + 1) & mask;
    while let Some(home) = slots.ideal(next) {
        let displacement = next.wrapping_sub(home) & mask;
        let distance_to_gap = gap.wrapping_sub(home) & mask;
        if displacement > distance_to_gap {
            slots.relocate(next, gap);
            gap = next;
        }
        next = (next + 1) & mask;
    }
    gap
}

/// Index of some empty slot, used as a starting point for a walk that must
/// never see a cluster wrap around its start.
pub(crate) fn empty_slot(len: usize, mut is_empty: impl FnMut(usize) -> bool) -> usize {
    (0..len)
        .find(|&index| is_empty(index))
        .expect("a table always keeps at least one empty slot")
}

/// Table length for a requested capacity: the next power of two, at least
/// [`MIN_LEN`].
pub(crate) fn table_len(capacity: usize) -> usize {
    capacity
        .max(MIN_LEN)
        .checked_next_power_of_two()
        .unwrap_or_else(|| capacity_overflow())
}

/// Number of keys a table of `len` slots accepts before it must grow. Always
/// leaves at least one slot empty, even with a load factor of one.
pub(crate) fn threshold(len: usize, load_factor: f32) -> usize {
    ((len as f64 * load_factor as f64) as usize).min(len - 1)
}

/// Smallest table length whose threshold admits `count` keys.
pub(crate) fn len_for(count: usize, load_factor: f32) -> usize {
    // Float-to-int casts saturate, so an estimate past `usize::MAX` reaches
    // the overflow check in `table_len`. Truncation is corrected below.
    let estimate = count as f64 / load_factor as f64;
    let mut len = table_len(estimate as usize);
    while threshold(len, load_factor) < count {
        len = grown_len(len);
    }
    len
}

/// Length after one doubling.
pub(crate) fn grown_len(len: usize) -> usize {
    len.checked_mul(2).unwrap_or_else(|| capacity_overflow())
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("hash table capacity overflow")
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn multipliers_are_odd_and_vary() {
        let first = Spread::new(16);
        let mut saw_different = false;
        for _ in 0..8 {
            let spread = Spread::new(16);
            assert_eq!(spread.multiplier() & 1, 1);
            saw_different |= spread.multiplier() != first.multiplier();
        }
        assert!(saw_different);
    }

    #[test]
    fn place_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        for bits in 1..20 {
            let spread = Spread::new(1 << bits);
            for _ in 0..64 {
                assert!(spread.place(rng.random()) < spread.len());
            }
            assert!(!spread.is_empty());
        }
    }

    #[test]
    fn sizing() {
        assert_eq!(table_len(1), 2);
        assert_eq!(table_len(8), 8);
        assert_eq!(table_len(9), 16);
        assert_eq!(threshold(8, 0.75), 6);
        assert_eq!(threshold(8, 1.0), 7);
        assert_eq!(threshold(2, 0.1), 0);
        assert_eq!(len_for(7, 0.75), 16);
        assert_eq!(len_for(6, 0.75), 8);
        assert_eq!(len_for(100, 0.5), 256);
        assert_eq!(len_for(0, 0.75), 2);
        assert_eq!(len_for(3, 0.1), 32);
        assert_eq!(len_for(1, 1.0), 2);
    }

    /// A bare slot array of `(key, home)` pairs driven through `probe` and
    /// `shift_back` exactly as the tables drive them.
    struct Toy {
        slots: Vec<Option<(u32, usize)>>,
    }

    impl ShiftSlots for Toy {
        fn ideal(&self, index: usize) -> Option<usize> {
            self.slots[index].map(|(_, home)| home)
        }

        fn relocate(&mut self, from: usize, to: usize) {
            debug_assert!(self.slots[to].is_none());
            self.slots[to] = self.slots[from].take();
        }
    }

    impl Toy {
        fn new(len: usize) -> Self {
            Self {
                slots: vec![None; len],
            }
        }

        fn mask(&self) -> usize {
            self.slots.len() - 1
        }

        fn locate(&self, key: u32, home: usize) -> Result<usize, usize> {
            probe(home, self.mask(), |i| self.slots[i].map(|(k, _)| k == key))
        }

        fn insert(&mut self, key: u32, home: usize) {
            if let Err(slot) = self.locate(key, home) {
                self.slots[slot] = Some((key, home));
            }
        }

        fn remove(&mut self, key: u32, home: usize) -> bool {
            let Ok(slot) = self.locate(key, home) else {
                return false;
            };
            self.slots[slot] = None;
            let mask = self.mask();
            let left = shift_back(self, slot, mask);
            assert!(self.slots[left].is_none());
            true
        }
    }

    #[test]
    fn shift_back_pulls_displaced_keys_past_undisplaced_ones() {
        // Slot 5 holds a key at home, slot 6 a key whose home is 6, slot 7 a
        // key whose home is 5. Deleting the key in slot 5 must still bring
        // the key in slot 7 back, even though slot 6 cannot move.
        let mut toy = Toy::new(8);
        toy.insert(1, 5);
        toy.insert(2, 6);
        toy.insert(3, 5);
        assert_eq!(toy.locate(3, 5), Ok(7));

        assert!(toy.remove(1, 5));
        assert_eq!(toy.locate(3, 5), Ok(5));
        assert_eq!(toy.locate(2, 6), Ok(6));
        assert!(toy.slots[7].is_none());
    }

    #[test]
    fn shift_back_across_wraparound() {
        let mut toy = Toy::new(8);
        toy.insert(1, 7);
        toy.insert(2, 7);
        toy.insert(3, 0);
        assert_eq!(toy.locate(2, 7), Ok(0));
        assert_eq!(toy.locate(3, 0), Ok(1));

        assert!(toy.remove(1, 7));
        assert_eq!(toy.locate(2, 7), Ok(7));
        assert_eq!(toy.locate(3, 0), Ok(0));
    }

    #[test]
    fn removing_the_last_key_of_a_cluster_moves_nothing() {
        let mut toy = Toy::new(8);
        toy.insert(1, 2);
        toy.insert(2, 3);
        assert!(toy.remove(2, 3));
        assert!(!toy.remove(2, 3));
        assert_eq!(toy.locate(1, 2), Ok(2));
    }

    #[test]
    fn randomized_removals_keep_every_key_reachable() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let len = 1 << rng.random_range(1..6);
            let mut toy = Toy::new(len);
            let mut live: Vec<(u32, usize)> = Vec::new();
            for step in 0..200u32 {
                let insert = live.len() + 1 < len && rng.random_bool(0.6);
                if insert {
                    // Few distinct homes to force long clusters.
                    let home = rng.random_range(0..len.min(3));
                    toy.insert(step, home);
                    live.push((step, home));
                } else if !live.is_empty() {
                    let at = rng.random_range(0..live.len());
                    let (key, home) = live.swap_remove(at);
                    assert!(toy.remove(key, home));
                }
                for &(key, home) in &live {
                    assert!(toy.locate(key, home).is_ok(), "{key} stranded");
                }
                let occupied = toy.slots.iter().filter(|s| s.is_some()).count();
                assert_eq!(occupied, live.len());
            }
        }
    }
}
