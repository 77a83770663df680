//! Hashing and equality strategies.
//!
//! A table never hashes or compares keys itself. It asks its [`Strategy`]
//! where a key belongs and whether two keys are the same, which lets one
//! probing engine back plain, case-insensitive, filtered and identity
//! containers.

use core::hash::BuildHasher;
use core::hash::Hash;

use crate::probe::Spread;

/// Hasher used by the built-in strategies unless another one is supplied.
///
/// It is deterministic so that equal containers hash equally across
/// instances; flooding resistance comes from the per-table multiplier
/// applied on top of it.
pub type DefaultHashBuilder = foldhash::fast::FixedState;

/// Defines what "the same key" means for a table.
///
/// Implementations must keep `place` consistent with `equate`: whenever
/// `equate(a, b)` holds, `place(a, spread) == place(b, spread)` must hold for
/// every spread, or lookups will silently miss keys that are present.
///
/// A strategy may be implemented for several key types at once (for example
/// both `String` and `str`); borrowed lookups rely on those implementations
/// agreeing for values related through [`Borrow`](core::borrow::Borrow).
pub trait Strategy<K: ?Sized> {
    /// Hash of `key`, before the table's multiplier is applied.
    fn hash(&self, key: &K) -> u64;

    /// Whether `left` and `right` are the same key.
    fn equate(&self, left: &K, right: &K) -> bool;

    /// Ideal slot of `key`. Defaults to spreading [`Strategy::hash`] with the
    /// table's multiplier.
    #[inline]
    fn place(&self, key: &K, spread: &Spread) -> usize {
        spread.place(self.hash(key))
    }
}

/// The key type's own `Hash` and `Eq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Natural<H = DefaultHashBuilder> {
    hasher: H,
}

impl<H> Natural<H> {
    /// Uses `hasher` instead of the default hasher.
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }
}

impl<K, H> Strategy<K> for Natural<H>
where
    K: Hash + Eq + ?Sized,
    H: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn equate(&self, left: &K, right: &K) -> bool {
        left == right
    }
}
