use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::Hash;

use crate::config::TableConfig;
use crate::error::Result;
use crate::hash_table;
use crate::hash_table::HashTable;
use crate::hash_table::TableCursor;
use crate::strategy::DefaultHashBuilder;
use crate::strategy::Natural;
use crate::strategy::Strategy;

/// A hash set backed by a linear-probing [`HashTable`].
///
/// Membership is decided by the strategy `S`. With the default [`Natural`]
/// strategy this is the element's own `Hash` and `Eq`; the
/// [`CaseInsensitiveSet`](crate::CaseInsensitiveSet),
/// [`FilteredStringSet`](crate::FilteredStringSet) and
/// [`IdentitySet`](crate::IdentitySet) aliases swap in other notions of
/// sameness.
///
/// # Performance Characteristics
///
/// - **Memory**: one `Option<K>` per slot.
#[derive(Clone)]
pub struct HashSet<K, S = Natural<DefaultHashBuilder>> {
    table: HashTable<K, (), S>,
}

impl<K, S> PartialEq for HashSet<K, S>
where
    S: Strategy<K>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|k| other.contains(k))
    }
}

impl<K, S> Eq for HashSet<K, S> where S: Strategy<K> {}

impl<K, S> Hash for HashSet<K, S>
where
    S: Strategy<K>,
{
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        state.write_u64(self.table.key_hash_sum());
    }
}

impl<K, S> Debug for HashSet<K, S>
where
    K: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, S> HashSet<K, S> {
    /// Creates an empty set that decides membership with `strategy`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::CaseInsensitive;
    /// use probe_hash::HashSet;
    ///
    /// let mut set = HashSet::with_strategy(CaseInsensitive::new());
    /// set.insert("Hello");
    /// assert!(set.contains("HELLO"));
    /// ```
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            table: HashTable::with_strategy(strategy),
        }
    }

    /// Creates an empty set sized by `config` using `strategy`.
    pub fn with_config_and_strategy(config: TableConfig, strategy: S) -> Self {
        Self {
            table: HashTable::with_config_and_strategy(config, strategy),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of elements accepted before the backing table doubles.
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

    /// The membership strategy.
    pub fn strategy(&self) -> &S {
        self.table.strategy()
    }

    /// Clears the set and replaces its strategy, returning the old one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::CharFilter;
    /// use probe_hash::Filtered;
    /// use probe_hash::FilteredStringSet;
    ///
    /// let mut set = FilteredStringSet::new();
    /// set.insert("a-b".to_string());
    ///
    /// let letters = CharFilter::with_predicate("Letters", char::is_alphabetic);
    /// set.set_strategy(Filtered::new(letters));
    /// assert!(set.is_empty());
    /// set.insert("a-b".to_string());
    /// assert!(set.contains("ab"));
    /// ```
    pub fn set_strategy(&mut self, strategy: S) -> S {
        self.table.set_strategy(strategy)
    }

    /// Removes every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// The backing table.
    pub fn table(&self) -> &HashTable<K, (), S> {
        &self.table
    }

    /// An iterator visiting all elements in slot order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Removes and yields every element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = (1..=3).collect();
    /// let mut drained: Vec<_> = set.drain().collect();
    /// drained.sort();
    /// assert_eq!(drained, [1, 2, 3]);
    /// assert!(set.is_empty());
    /// ```
    pub fn drain(&mut self) -> IntoIter<K> {
        IntoIter {
            inner: self.table.drain(),
        }
    }
}

impl<K, S> HashSet<K, S>
where
    S: Default,
{
    /// Creates an empty set with the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    /// Creates an empty set sized by `config`.
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            table: HashTable::with_config(config),
        }
    }
}

impl<K, S> Default for HashSet<K, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> HashSet<K, S>
where
    S: Strategy<K>,
{
    /// Adds `key`. Returns `true` if it was not already present; an equal
    /// element already in the set is left in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        match self.table.locate(&key) {
            Ok(_) => false,
            Err(index) => {
                self.table.occupy(index, key, ());
                true
            }
        }
    }

    /// Adds `key`, replacing and returning an equal element if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::CaseInsensitiveSet;
    ///
    /// let mut set: CaseInsensitiveSet<String> = CaseInsensitiveSet::new();
    /// set.insert("abc".to_string());
    /// assert_eq!(set.replace("ABC".to_string()), Some("abc".to_string()));
    /// assert_eq!(set.get("abc"), Some(&"ABC".to_string()));
    /// ```
    pub fn replace(&mut self, key: K) -> Option<K> {
        let previous = self.table.remove(&key).map(|(k, ())| k);
        self.table.insert(key, ());
        previous
    }

    /// Returns `true` if the set contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.contains_key(key)
    }

    /// Returns the stored element equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.get_key_value(key).map(|(k, ())| k)
    }

    /// Removes `key`. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.remove(key).is_some()
    }

    /// Removes and returns the stored element equal to `key`.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.remove(key).map(|(k, ())| k)
    }

    /// Reserves room for `additional` more elements.
    pub fn ensure_capacity(&mut self, additional: usize) {
        self.table.ensure_capacity(additional);
    }

    /// Shrinks the backing table toward `capacity` slots.
    pub fn shrink_to(&mut self, capacity: usize) {
        self.table.shrink_to(capacity);
    }

    /// Retains only the elements for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = (1..=4).collect();
    /// set.retain(|&x| x % 2 == 0);
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(&2));
    /// assert!(set.contains(&4));
    /// ```
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.table.retain(|k, ()| keep(k));
    }

    /// A cursor that can remove elements while walking the set.
    pub fn cursor(&mut self) -> SetCursor<'_, K, S> {
        SetCursor {
            inner: self.table.cursor(),
        }
    }

    /// Returns `true` if `self` has no elements in common with `other`.
    pub fn is_disjoint(&self, other: &HashSet<K, S>) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().all(|k| !large.contains(k))
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &HashSet<K, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|k| other.contains(k))
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &HashSet<K, S>) -> bool {
        other.is_subset(self)
    }

    /// An iterator over the elements of `self` followed by the elements of
    /// `other` not in `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashSet;
    ///
    /// let a: HashSet<i32> = [1, 2].into_iter().collect();
    /// let b: HashSet<i32> = [2, 3].into_iter().collect();
    ///
    /// assert_eq!(a.union(&b).count(), 3);
    /// assert_eq!(a.intersection(&b).copied().collect::<Vec<_>>(), [2]);
    /// assert_eq!(a.difference(&b).copied().collect::<Vec<_>>(), [1]);
    /// assert_eq!(a.symmetric_difference(&b).count(), 2);
    /// ```
    pub fn union<'a>(&'a self, other: &'a HashSet<K, S>) -> Union<'a, K, S> {
        Union {
            iter: self.iter(),
            rest: other.difference(self),
        }
    }

    /// An iterator over the elements in both `self` and `other`.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<K, S>) -> Intersection<'a, K, S> {
        if self.len() <= other.len() {
            Intersection {
                iter: self.iter(),
                other,
            }
        } else {
            Intersection {
                iter: other.iter(),
                other: self,
            }
        }
    }

    /// An iterator over the elements of `self` not in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<K, S>) -> Difference<'a, K, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// An iterator over the elements in exactly one of the two sets.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<K, S>,
    ) -> SymmetricDifference<'a, K, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }

    /// Counts elements by their distance from their ideal slot.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Summarizes occupancy and probe lengths.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        self.table.debug_stats()
    }
}

/// A removal-capable walk over a [`HashSet`].
pub struct SetCursor<'a, K, S> {
    inner: TableCursor<'a, K, (), S>,
}

impl<K, S> SetCursor<'_, K, S>
where
    S: Strategy<K>,
{
    /// Advances to the next element.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&K> {
        self.inner.next().map(|(k, _)| k)
    }

    /// Removes the element last returned by [`next`](Self::next).
    pub fn remove(&mut self) -> Result<K> {
        self.inner.remove().map(|(k, ())| k)
    }
}

/// An iterator over the elements of a [`HashSet`].
pub struct Iter<'a, K> {
    inner: hash_table::Iter<'a, K, ()>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An owning iterator over the elements of a [`HashSet`].
pub struct IntoIter<K> {
    inner: hash_table::IntoIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<K, S> IntoIterator for HashSet<K, S> {
    type IntoIter = IntoIter<K>;
    type Item = K;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, S> IntoIterator for &'a HashSet<K, S> {
    type IntoIter = Iter<'a, K>;
    type Item = &'a K;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, S> FromIterator<K> for HashSet<K, S>
where
    S: Strategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, S> Extend<K> for HashSet<K, S>
where
    S: Strategy<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.ensure_capacity(iter.size_hint().0);
        for key in iter {
            self.insert(key);
        }
    }
}

/// A lazy iterator producing elements in the union of two sets.
pub struct Union<'a, K, S> {
    iter: Iter<'a, K>,
    rest: Difference<'a, K, S>,
}

impl<'a, K, S> Iterator for Union<'a, K, S>
where
    S: Strategy<K>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().or_else(|| self.rest.next())
    }
}

/// A lazy iterator producing elements in the intersection of two sets.
pub struct Intersection<'a, K, S> {
    iter: Iter<'a, K>,
    other: &'a HashSet<K, S>,
}

impl<'a, K, S> Iterator for Intersection<'a, K, S>
where
    S: Strategy<K>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.by_ref().find(|k| other.contains(*k))
    }
}

/// A lazy iterator producing elements in the difference of two sets.
pub struct Difference<'a, K, S> {
    iter: Iter<'a, K>,
    other: &'a HashSet<K, S>,
}

impl<'a, K, S> Iterator for Difference<'a, K, S>
where
    S: Strategy<K>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.by_ref().find(|k| !other.contains(*k))
    }
}

/// A lazy iterator producing elements in the symmetric difference of two
/// sets.
pub struct SymmetricDifference<'a, K, S> {
    iter: core::iter::Chain<Difference<'a, K, S>, Difference<'a, K, S>>,
}

impl<'a, K, S> Iterator for SymmetricDifference<'a, K, S>
where
    S: Strategy<K>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;
    use crate::case_insensitive::CaseInsensitive;
    use crate::filtered::CharFilter;
    use crate::filtered::Filtered;
    use crate::identity::Identity;

    #[test]
    fn contains_iff_added_and_not_removed() {
        let mut set: HashSet<u64> = HashSet::new();
        for i in 0..1000 {
            assert!(set.insert(i * 7));
        }
        for i in 0..500 {
            assert!(set.remove(&(i * 14)));
        }
        for i in 0..1000u64 {
            let expected = i % 2 == 1;
            assert_eq!(set.contains(&(i * 7)), expected, "{}", i * 7);
        }
        assert_eq!(set.len(), 500);
    }

    #[test]
    fn case_insensitive_membership() {
        let mut set: HashSet<String, CaseInsensitive> = HashSet::new();
        assert!(set.insert("Key".to_string()));
        assert!(!set.insert("KEY".to_string()));
        assert!(set.contains("key"));
        assert_eq!(set.get("kEY"), Some(&"Key".to_string()));
        assert_eq!(set.take("KEY"), Some("Key".to_string()));
        assert!(set.is_empty());
    }

    #[test]
    fn filtered_membership() {
        let letters = CharFilter::new("LettersUpper", char::is_alphabetic, |c| {
            c.to_ascii_uppercase()
        });
        let mut set = HashSet::with_strategy(Filtered::new(letters));
        set.insert("Hello, World!");
        assert!(set.contains("HELLOWORLD"));
        assert!(set.contains("hello world"));
        assert!(!set.contains("Hello"));
    }

    #[test]
    fn identity_membership() {
        let a = Rc::new(1);
        let b = Rc::new(1);
        let mut set: HashSet<Rc<i32>, Identity> = HashSet::new();
        assert!(set.insert(a.clone()));
        assert!(set.insert(b.clone()));
        assert!(!set.insert(a.clone()));
        assert!(set.contains(&a));
        assert!(set.remove(&b));
        assert!(!set.contains(&b));
        assert!(set.contains(&a));
    }

    #[test]
    fn set_relations() {
        let a: HashSet<i32> = (0..10).collect();
        let b: HashSet<i32> = (5..15).collect();
        let c: HashSet<i32> = (0..5).collect();
        assert!(c.is_subset(&a));
        assert!(a.is_superset(&c));
        assert!(!a.is_subset(&b));
        assert!(c.is_disjoint(&b));
        assert!(!a.is_disjoint(&b));

        let mut union: Vec<_> = a.union(&b).copied().collect();
        union.sort_unstable();
        assert_eq!(union, (0..15).collect::<Vec<_>>());
        let mut sym: Vec<_> = a.symmetric_difference(&b).copied().collect();
        sym.sort_unstable();
        assert_eq!(sym, [0, 1, 2, 3, 4, 10, 11, 12, 13, 14]);
    }

    #[test]
    fn replace_keeps_new_element() {
        let mut set: HashSet<String, CaseInsensitive> = HashSet::new();
        assert_eq!(set.replace("one".to_string()), None);
        assert_eq!(set.replace("ONE".to_string()), Some("one".to_string()));
        assert_eq!(set.iter().next(), Some(&"ONE".to_string()));
    }

    #[test]
    fn cursor_removes() {
        let mut set: HashSet<u32> = (0..64).collect();
        let mut cursor = set.cursor();
        while let Some(&k) = cursor.next() {
            if k % 4 != 0 {
                assert_eq!(cursor.remove(), Ok(k));
            }
        }
        assert_eq!(set.len(), 16);
        assert!(set.iter().all(|k| k % 4 == 0));
    }

    #[test]
    fn equal_sets_hash_equal() {
        use core::hash::BuildHasher;

        let a: HashSet<u32> = (0..100).collect();
        let b: HashSet<u32> = (0..100).rev().collect();
        assert_eq!(a, b);
        let builder = DefaultHashBuilder::default();
        assert_eq!(builder.hash_one(&a), builder.hash_one(&b));
    }
}
