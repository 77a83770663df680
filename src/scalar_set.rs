use core::fmt::Debug;
use core::hash::Hash;

use crate::config::TableConfig;
use crate::error::Result;
use crate::scalar::Scalar;
use crate::scalar_table;
use crate::scalar_table::ScalarCursor;
use crate::scalar_table::ScalarTable;

/// A set of primitive values backed by a [`ScalarTable`].
///
/// # Examples
///
/// ```rust
/// use probe_hash::ScalarSet;
///
/// let mut set: ScalarSet<f32> = ScalarSet::new();
/// set.insert(0.0);
/// set.insert(-0.0);
/// set.insert(f32::NAN);
///
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(f32::NAN));
/// ```
#[derive(Clone)]
pub struct ScalarSet<K: Scalar> {
    table: ScalarTable<K, ()>,
}

impl<K: Scalar> Default for ScalarSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Scalar> PartialEq for ScalarSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<K: Scalar> Eq for ScalarSet<K> {}

impl<K: Scalar> Hash for ScalarSet<K> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        state.write_u64(self.table.key_hash_sum());
    }
}

impl<K: Scalar> Debug for ScalarSet<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Scalar> ScalarSet<K> {
    /// Creates an empty set with the default configuration.
    pub fn new() -> Self {
        Self {
            table: ScalarTable::new(),
        }
    }

    /// Creates an empty set sized by `config`.
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            table: ScalarTable::with_config(config),
        }
    }

    /// Number of elements, including zero.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of non-zero elements accepted before the table doubles.
    pub fn threshold(&self) -> usize {
        self.table.threshold()
    }

    /// The configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// The hash multiplier of the current allocation.
    pub fn multiplier(&self) -> u64 {
        self.table.multiplier()
    }

    /// The backing table.
    pub fn table(&self) -> &ScalarTable<K, ()> {
        &self.table
    }

    /// Adds `key`. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.table.insert(key, ()).is_none()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: K) -> bool {
        self.table.contains_key(key)
    }

    /// Removes `key`. Returns `true` if it was present.
    pub fn remove(&mut self, key: K) -> bool {
        self.table.remove(key).is_some()
    }

    /// Removes every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Reserves room for `additional` more elements.
    pub fn ensure_capacity(&mut self, additional: usize) {
        self.table.ensure_capacity(additional);
    }

    /// Shrinks the backing table toward `capacity` slots.
    pub fn shrink_to(&mut self, capacity: usize) {
        self.table.shrink_to(capacity);
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(K) -> bool) {
        self.table.retain(|k, ()| keep(k));
    }

    /// Iterates over the elements, zero first.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Removes and yields every element.
    pub fn drain(&mut self) -> IntoIter<K> {
        IntoIter {
            inner: self.table.drain(),
        }
    }

    /// A cursor that can remove elements while walking the set.
    pub fn cursor(&mut self) -> ScalarSetCursor<'_, K> {
        ScalarSetCursor {
            inner: self.table.cursor(),
        }
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &ScalarSet<K>) -> bool {
        self.len() <= other.len() && self.iter().all(|k| other.contains(k))
    }

    /// Returns `true` if the sets share no element.
    pub fn is_disjoint(&self, other: &ScalarSet<K>) -> bool {
        self.iter().all(|k| !other.contains(k))
    }

    /// Counts elements by their distance from their ideal slot.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        self.table.probe_histogram()
    }
}

/// A removal-capable walk over a [`ScalarSet`].
pub struct ScalarSetCursor<'a, K> {
    inner: ScalarCursor<'a, K, ()>,
}

impl<K: Scalar> ScalarSetCursor<'_, K> {
    /// Advances to the next element.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    /// Removes the element last returned by [`next`](Self::next).
    pub fn remove(&mut self) -> Result<K> {
        self.inner.remove().map(|(k, ())| k)
    }
}

/// An iterator over the elements of a [`ScalarSet`].
pub struct Iter<'a, K> {
    inner: scalar_table::Iter<'a, K, ()>,
}

impl<K: Scalar> Iterator for Iter<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Scalar> ExactSizeIterator for Iter<'_, K> {}

/// An owning iterator over the elements of a [`ScalarSet`].
pub struct IntoIter<K> {
    inner: scalar_table::IntoIter<K, ()>,
}

impl<K: Scalar> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Scalar> ExactSizeIterator for IntoIter<K> {}

impl<K: Scalar> IntoIterator for ScalarSet<K> {
    type IntoIter = IntoIter<K>;
    type Item = K;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K: Scalar> IntoIterator for &'a ScalarSet<K> {
    type IntoIter = Iter<'a, K>;
    type Item = K;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Scalar> FromIterator<K> for ScalarSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Scalar> Extend<K> for ScalarSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.table.extend(iter.into_iter().map(|k| (k, ())));
    }
}
