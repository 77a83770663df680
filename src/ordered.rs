//! Insertion-ordered containers.
//!
//! [`Ordered`] pairs a hash table with an [`OrderSeq`] holding the same keys.
//! Membership questions go to the table; iteration and positional access go
//! to the sequence. Every mutator updates both or neither, so
//! `order().len() == len()` holds whenever control returns to the caller.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::Hash;

use crate::config::TableConfig;
use crate::error::Error;
use crate::error::Result;
use crate::error::check_index;
use crate::hash_table::HashTable;
use crate::order_seq;
use crate::order_seq::OrderSeq;
use crate::order_seq::OrderType;
use crate::scalar::Scalar;
use crate::scalar_table::ScalarTable;
use crate::strategy::Strategy;

const DESYNC: &str = "order and table hold the same keys";

type HashOrdered<K, S> = Ordered<HashTable<K, (), S>>;
type ScalarOrdered<K> = Ordered<ScalarTable<K, ()>>;

/// The table operations the ordered layer needs.
pub trait KeyTable {
    /// Stored key type.
    type Key;
    /// Stored value type; `()` for sets.
    type Value;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the table holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots.
    fn capacity(&self) -> usize;

    /// Inserts or replaces, returning the replaced value.
    fn put(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Makes room for `additional` more entries.
    fn reserve(&mut self, additional: usize);

    /// Removes every entry.
    fn clear(&mut self);
}

/// Lookups by a borrowed key form `Q`.
pub trait KeyLookup<Q: ?Sized>: KeyTable {
    /// The value stored for `key`.
    fn find(&self, key: &Q) -> Option<&Self::Value>;

    /// The value stored for `key`, mutably.
    fn find_mut(&mut self, key: &Q) -> Option<&mut Self::Value>;

    /// Removes `key`, returning the stored pair.
    fn delete(&mut self, key: &Q) -> Option<(Self::Key, Self::Value)>;

    /// Whether a stored key is the same key as `key` for this table.
    fn matches(&self, stored: &Self::Key, key: &Q) -> bool;
}

impl<K, V, S> KeyTable for HashTable<K, V, S>
where
    S: Strategy<K>,
{
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        HashTable::len(self)
    }

    fn capacity(&self) -> usize {
        HashTable::capacity(self)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn reserve(&mut self, additional: usize) {
        self.ensure_capacity(additional);
    }

    fn clear(&mut self) {
        HashTable::clear(self);
    }
}

impl<K, V, S, Q> KeyLookup<Q> for HashTable<K, V, S>
where
    K: Borrow<Q>,
    Q: ?Sized,
    S: Strategy<K> + Strategy<Q>,
{
    fn find(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }

    fn find_mut(&mut self, key: &Q) -> Option<&mut V> {
        self.get_mut(key)
    }

    fn delete(&mut self, key: &Q) -> Option<(K, V)> {
        self.remove(key)
    }

    fn matches(&self, stored: &K, key: &Q) -> bool {
        self.equate::<Q>(stored.borrow(), key)
    }
}

impl<K: Scalar, V> KeyTable for ScalarTable<K, V> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        ScalarTable::len(self)
    }

    fn capacity(&self) -> usize {
        ScalarTable::capacity(self)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn reserve(&mut self, additional: usize) {
        self.ensure_capacity(additional);
    }

    fn clear(&mut self) {
        ScalarTable::clear(self);
    }
}

impl<K: Scalar, V> KeyLookup<K> for ScalarTable<K, V> {
    fn find(&self, key: &K) -> Option<&V> {
        self.get(*key)
    }

    fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        self.get_mut(*key)
    }

    fn delete(&mut self, key: &K) -> Option<(K, V)> {
        self.remove(*key).map(|value| (*key, value))
    }

    fn matches(&self, stored: &K, key: &K) -> bool {
        stored.same(*key)
    }
}

/// A map that remembers an order for its keys.
///
/// New keys are appended; [`insert_at`](Self::insert_at) places or moves a
/// key at a given position. With [`OrderType::Bag`] removals swap the last
/// key into the hole, so order is only stable under appends.
///
/// Usually reached through [`OrderedMap`](crate::OrderedMap) or
/// [`OrderedScalarMap`](crate::OrderedScalarMap).
///
/// # Examples
///
/// ```rust
/// use probe_hash::OrderedMap;
///
/// let mut map: OrderedMap<&str, u32> = OrderedMap::new();
/// map.insert("c", 3);
/// map.insert("a", 1);
/// map.insert("b", 2);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["c", "a", "b"]);
///
/// map.insert_at(0, "b", 20)?;
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "c", "a"]);
/// assert_eq!(map.get("b"), Some(&20));
///
/// map.sort();
/// assert_eq!(map.first(), Some((&"a", &1)));
/// # Ok::<(), probe_hash::Error>(())
/// ```
pub struct Ordered<T: KeyTable> {
    table: T,
    order: OrderSeq<T::Key>,
}

impl<T> Clone for Ordered<T>
where
    T: KeyTable + Clone,
    T::Key: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            order: self.order.clone(),
        }
    }
}

impl<K, V, S> Ordered<HashTable<K, V, S>>
where
    S: Strategy<K>,
{
    /// Creates an empty map with list order and the default configuration.
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::with_parts(TableConfig::default(), OrderType::List, S::default())
    }

    /// Creates an empty map with the given order layout.
    pub fn with_order(order: OrderType) -> Self
    where
        S: Default,
    {
        Self::with_parts(TableConfig::default(), order, S::default())
    }

    /// Creates an empty list-ordered map sized by `config`.
    pub fn with_config(config: TableConfig) -> Self
    where
        S: Default,
    {
        Self::with_parts(config, OrderType::List, S::default())
    }

    /// Creates an empty list-ordered map using `strategy`.
    pub fn with_strategy(strategy: S) -> Self {
        Self::with_parts(TableConfig::default(), OrderType::List, strategy)
    }

    /// Creates an empty map from every construction parameter.
    pub fn with_parts(config: TableConfig, order: OrderType, strategy: S) -> Self {
        Self {
            table: HashTable::with_config_and_strategy(config, strategy),
            order: OrderSeq::new(order),
        }
    }

    /// The key strategy.
    pub fn strategy(&self) -> &S {
        self.table.strategy()
    }

    /// Clears the map and replaces its strategy.
    pub fn set_strategy(&mut self, strategy: S) -> S {
        self.order.clear();
        self.table.set_strategy(strategy)
    }
}

impl<K, V, S> Default for Ordered<HashTable<K, V, S>>
where
    S: Strategy<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Scalar, V> Ordered<ScalarTable<K, V>> {
    /// Creates an empty map with list order and the default configuration.
    pub fn new() -> Self {
        Self::with_parts(TableConfig::default(), OrderType::List)
    }

    /// Creates an empty map with the given order layout.
    pub fn with_order(order: OrderType) -> Self {
        Self::with_parts(TableConfig::default(), order)
    }

    /// Creates an empty list-ordered map sized by `config`.
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_parts(config, OrderType::List)
    }

    /// Creates an empty map from every construction parameter.
    pub fn with_parts(config: TableConfig, order: OrderType) -> Self {
        Self {
            table: ScalarTable::with_config(config),
            order: OrderSeq::new(order),
        }
    }
}

impl<K: Scalar, V> Default for Ordered<ScalarTable<K, V>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: KeyTable> Ordered<T> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.table.len(), self.order.len());
        self.order.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.table.is_empty(), self.order.is_empty());
        self.table.is_empty()
    }

    /// Number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// The order layout chosen at construction.
    pub fn order_type(&self) -> OrderType {
        self.order.order_type()
    }

    /// The keys in order.
    pub fn order(&self) -> &OrderSeq<T::Key> {
        &self.order
    }

    /// The backing table.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.table.clear();
        self.order.clear();
    }

    /// Reserves room for `additional` more entries in both structures.
    pub fn ensure_capacity(&mut self, additional: usize) {
        self.table.reserve(additional);
        self.order.reserve(additional);
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> order_seq::Iter<'_, T::Key> {
        self.order.iter()
    }

    /// Swaps the positions of two keys.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        check_index(a, self.order.len())?;
        check_index(b, self.order.len())?;
        self.order.swap(a, b);
        Ok(())
    }

    /// Stable sort of the order by a key comparator.
    pub fn sort_by(&mut self, compare: impl FnMut(&T::Key, &T::Key) -> Ordering) {
        self.order.sort_by(compare);
    }

    /// Stable sort of the order by an extracted sort key.
    pub fn sort_by_key<B: Ord>(&mut self, mut f: impl FnMut(&T::Key) -> B) {
        self.order.sort_by(|a, b| f(a).cmp(&f(b)));
    }

    /// Sorts the order by the keys' natural ordering.
    pub fn sort(&mut self)
    where
        T::Key: Ord,
    {
        self.order.sort_by(Ord::cmp);
    }
}

impl<T> Ordered<T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
{
    /// Inserts a key-value pair. A new key is appended to the order; an
    /// existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: T::Key, value: T::Value) -> Option<T::Value> {
        let copy = key.clone();
        let previous = self.table.put(key, value);
        if previous.is_none() {
            self.order.push(copy);
        }
        previous
    }

    /// Puts `key` at position `index`.
    ///
    /// An existing key is moved there and gets the new value; `Ok(false)` is
    /// returned and `index` must be `< len()`. A new key is inserted there;
    /// `Ok(true)` is returned and `index` may equal `len()`.
    ///
    /// With [`OrderType::Bag`] the key previously at `index` moves to the
    /// end (new key) or to the vacated position (existing key).
    pub fn insert_at(&mut self, index: usize, key: T::Key, value: T::Value) -> Result<bool> {
        let len = self.order.len();
        match self.position_of(&key) {
            Some(current) => {
                check_index(index, len)?;
                if let Some(stored) = self.table.find_mut(&key) {
                    *stored = value;
                }
                self.order.move_to(current, index);
                Ok(false)
            }
            None => {
                if index > len {
                    return Err(Error::IndexOutOfBounds { index, len });
                }
                self.order.insert(index, key.clone());
                self.table.put(key, value);
                Ok(true)
            }
        }
    }

    /// Removes the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<(T::Key, T::Value)> {
        check_index(index, self.order.len())?;
        let key = self.order.remove_at(index).expect(DESYNC);
        Ok(self.table.delete(&key).expect(DESYNC))
    }

    /// Removes and returns the last entry.
    pub fn pop(&mut self) -> Option<(T::Key, T::Value)> {
        let key = self.order.pop()?;
        Some(self.table.delete(&key).expect(DESYNC))
    }

    /// Keeps the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        for key in self.order.iter().skip(len) {
            self.table.delete(key).expect(DESYNC);
        }
        self.order.truncate(len);
    }

    /// Replaces the key at `index` with `after`, keeping its position and
    /// value. Returns `Ok(false)` without changes if `after` is already
    /// present.
    pub fn alter_at(&mut self, index: usize, after: T::Key) -> Result<bool> {
        check_index(index, self.order.len())?;
        if self.table.find(&after).is_some() {
            return Ok(false);
        }
        let (_, value) = self.table.delete(&self.order[index]).expect(DESYNC);
        self.table.put(after.clone(), value);
        self.order.set(index, after);
        Ok(true)
    }

    /// The entry at `index`.
    pub fn get_at(&self, index: usize) -> Option<(&T::Key, &T::Value)> {
        let key = self.order.get(index)?;
        self.table.find(key).map(|value| (key, value))
    }

    /// The entry at `index` with a mutable value.
    pub fn get_at_mut(&mut self, index: usize) -> Option<(&T::Key, &mut T::Value)> {
        let key = self.order.get(index)?;
        self.table.find_mut(key).map(|value| (key, value))
    }

    /// Replaces the value at `index`, returning the old one.
    pub fn set_at(&mut self, index: usize, value: T::Value) -> Result<T::Value> {
        check_index(index, self.order.len())?;
        let (_, stored) = self.get_at_mut(index).expect(DESYNC);
        Ok(core::mem::replace(stored, value))
    }

    /// The first entry in order.
    pub fn first(&self) -> Option<(&T::Key, &T::Value)> {
        self.get_at(0)
    }

    /// The last entry in order.
    pub fn last(&self) -> Option<(&T::Key, &T::Value)> {
        self.get_at(self.order.len().checked_sub(1)?)
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            keys: self.order.iter(),
            table: &self.table,
        }
    }

    /// Iterates over the values in key order.
    pub fn values(&self) -> impl Iterator<Item = &T::Value> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Keeps only the entries for which `keep` returns `true`, preserving the
    /// order of the survivors.
    pub fn retain(&mut self, mut keep: impl FnMut(&T::Key, &mut T::Value) -> bool) {
        let table = &mut self.table;
        self.order.retain(|key| {
            let value = table.find_mut(key).expect(DESYNC);
            if keep(key, value) {
                true
            } else {
                table.delete(key);
                false
            }
        });
    }

    /// A cursor walking the entries in order that can remove them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::OrderType;
    /// use probe_hash::OrderedMap;
    ///
    /// let mut map: OrderedMap<u32, u32> = OrderedMap::with_order(OrderType::Bag);
    /// for i in 0..10 {
    ///     map.insert(i, i * i);
    /// }
    /// let mut cursor = map.cursor();
    /// while let Some((_, square)) = cursor.next() {
    ///     if *square % 2 == 1 {
    ///         cursor.remove()?;
    ///     }
    /// }
    /// assert_eq!(map.len(), 5);
    /// assert!(map.iter().all(|(k, _)| k % 2 == 0));
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn cursor(&mut self) -> OrderCursor<'_, T> {
        OrderCursor {
            ordered: self,
            next: 0,
            current: None,
        }
    }

    fn position_of(&self, key: &T::Key) -> Option<usize> {
        self.table.find(key)?;
        let position = self.order.position(|stored| self.table.matches(stored, key));
        debug_assert!(position.is_some(), "{DESYNC}");
        position
    }
}

impl<T: KeyTable> Ordered<T> {
    /// The value stored for `key`.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&T::Value>
    where
        T: KeyLookup<Q>,
    {
        self.table.find(key)
    }

    /// The value stored for `key`, mutably.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut T::Value>
    where
        T: KeyLookup<Q>,
    {
        self.table.find_mut(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        T: KeyLookup<Q>,
    {
        self.table.find(key).is_some()
    }

    /// Position of `key` in the order.
    pub fn index_of<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        T: KeyLookup<Q>,
    {
        self.table.find(key)?;
        self.order.position(|stored| self.table.matches(stored, key))
    }

    /// Removes `key` from the table and the order. With [`OrderType::Bag`]
    /// the last key takes its position.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(T::Key, T::Value)>
    where
        T: KeyLookup<Q>,
    {
        let entry = self.table.delete(key)?;
        let table = &self.table;
        self.order
            .remove_first(|stored| table.matches(stored, key))
            .expect(DESYNC);
        Some(entry)
    }

    /// Replaces the key `before` with `after` in place, keeping position and
    /// value. Returns `false` without changes if `before` is absent or
    /// `after` is already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::OrderedMap;
    ///
    /// let mut map: OrderedMap<String, u32> = OrderedMap::new();
    /// map.insert("draft".to_string(), 1);
    /// map.insert("other".to_string(), 2);
    ///
    /// assert!(map.alter("draft", "final".to_string()));
    /// assert!(!map.alter("other", "final".to_string()));
    /// assert_eq!(map.first(), Some((&"final".to_string(), &1)));
    /// ```
    pub fn alter<Q: ?Sized>(&mut self, before: &Q, after: <T as KeyTable>::Key) -> bool
    where
        T: KeyLookup<Q> + KeyLookup<<T as KeyTable>::Key>,
        <T as KeyTable>::Key: Clone,
    {
        if KeyLookup::<<T as KeyTable>::Key>::find(&self.table, &after).is_some() {
            return false;
        }
        let Some(index) = self.index_of(before) else {
            return false;
        };
        let (_, value) = KeyLookup::<Q>::delete(&mut self.table, before).expect(DESYNC);
        self.table.put(after.clone(), value);
        self.order.set(index, after);
        true
    }
}

impl<T> Debug for Ordered<T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
    T::Key: Debug + Clone,
    T::Value: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two ordered containers are equal when their tables are: the same entries
/// regardless of order.
impl<T> PartialEq for Ordered<T>
where
    T: KeyTable + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<T> Eq for Ordered<T> where T: KeyTable + Eq {}

impl<T> Hash for Ordered<T>
where
    T: KeyTable + Hash,
{
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.table.hash(state);
    }
}

impl<T> Extend<(T::Key, T::Value)> for Ordered<T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
{
    fn extend<I: IntoIterator<Item = (T::Key, T::Value)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.ensure_capacity(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T> FromIterator<(T::Key, T::Value)> for Ordered<T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
    Self: Default,
{
    fn from_iter<I: IntoIterator<Item = (T::Key, T::Value)>>(iter: I) -> Self {
        let mut ordered = Self::default();
        ordered.extend(iter);
        ordered
    }
}

impl<T> IntoIterator for Ordered<T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
{
    type IntoIter = IntoIter<T>;
    type Item = (T::Key, T::Value);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            keys: self.order.into_iter(),
            table: self.table,
        }
    }
}

impl<'a, T> IntoIterator for &'a Ordered<T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
{
    type IntoIter = Iter<'a, T>;
    type Item = (&'a T::Key, &'a T::Value);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates over an [`Ordered`] container's entries in order.
pub struct Iter<'a, T: KeyTable> {
    keys: order_seq::Iter<'a, T::Key>,
    table: &'a T,
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
{
    type Item = (&'a T::Key, &'a T::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some((key, self.table.find(key).expect(DESYNC)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        Some((key, self.table.find(key).expect(DESYNC)))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> where T: KeyLookup<<T as KeyTable>::Key> {}

/// Owning iterator over an [`Ordered`] container's entries in order.
pub struct IntoIter<T: KeyTable> {
    keys: order_seq::IntoIter<T::Key>,
    table: T,
}

impl<T> Iterator for IntoIter<T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
{
    type Item = (T::Key, T::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(self.table.delete(&key).expect(DESYNC))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> where T: KeyLookup<<T as KeyTable>::Key> {}

/// A walk over an [`Ordered`] container in order that can remove the entry
/// it is on.
///
/// After a removal the walk continues with whatever now occupies the removed
/// position, which for every layout is the next entry not yet visited.
pub struct OrderCursor<'a, T: KeyTable> {
    ordered: &'a mut Ordered<T>,
    next: usize,
    current: Option<usize>,
}

impl<T> OrderCursor<'_, T>
where
    T: KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
{
    /// Advances to the next entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&T::Key, &mut T::Value)> {
        let index = self.next;
        let Some(key) = self.ordered.order.get(index) else {
            self.current = None;
            return None;
        };
        self.current = Some(index);
        self.next = index + 1;
        let value = self.ordered.table.find_mut(key).expect(DESYNC);
        Some((key, value))
    }

    /// Position of the entry last returned by [`next`](Self::next).
    pub fn index(&self) -> Option<usize> {
        self.current
    }

    /// Removes the entry last returned by [`next`](Self::next).
    pub fn remove(&mut self) -> Result<(T::Key, T::Value)> {
        let index = self.current.take().ok_or(Error::NoCurrentElement)?;
        let entry = self.ordered.remove_at(index)?;
        self.next = index;
        Ok(entry)
    }
}

/// A set that remembers an order for its elements.
///
/// Usually reached through [`OrderedSet`](crate::OrderedSet) or
/// [`OrderedScalarSet`](crate::OrderedScalarSet).
///
/// # Examples
///
/// ```rust
/// use probe_hash::OrderType;
/// use probe_hash::OrderedSet;
///
/// let mut set: OrderedSet<u32> = OrderedSet::with_order(OrderType::Bag);
/// for i in 1..=5 {
///     set.insert(i);
/// }
/// assert!(set.remove(&3));
/// assert_eq!(set.len(), 4);
/// assert!([1, 2, 4, 5].iter().all(|k| set.contains(k)));
/// assert_eq!(set.order().len(), 4);
/// ```
pub struct OrderedKeys<T: KeyTable<Value = ()>> {
    inner: Ordered<T>,
}

impl<T> Clone for OrderedKeys<T>
where
    T: KeyTable<Value = ()> + Clone,
    T::Key: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, S> OrderedKeys<HashTable<K, (), S>>
where
    S: Strategy<K>,
{
    /// Creates an empty set with list order and the default configuration.
    pub fn new() -> Self
    where
        S: Default,
    {
        Self {
            inner: HashOrdered::<K, S>::new(),
        }
    }

    /// Creates an empty set with the given order layout.
    pub fn with_order(order: OrderType) -> Self
    where
        S: Default,
    {
        Self {
            inner: HashOrdered::<K, S>::with_order(order),
        }
    }

    /// Creates an empty list-ordered set sized by `config`.
    pub fn with_config(config: TableConfig) -> Self
    where
        S: Default,
    {
        Self {
            inner: HashOrdered::<K, S>::with_config(config),
        }
    }

    /// Creates an empty list-ordered set using `strategy`.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            inner: HashOrdered::<K, S>::with_strategy(strategy),
        }
    }

    /// Creates an empty set from every construction parameter.
    pub fn with_parts(config: TableConfig, order: OrderType, strategy: S) -> Self {
        Self {
            inner: HashOrdered::<K, S>::with_parts(config, order, strategy),
        }
    }

    /// The membership strategy.
    pub fn strategy(&self) -> &S {
        self.inner.strategy()
    }

    /// Clears the set and replaces its strategy.
    pub fn set_strategy(&mut self, strategy: S) -> S {
        self.inner.set_strategy(strategy)
    }
}

impl<K, S> Default for OrderedKeys<HashTable<K, (), S>>
where
    S: Strategy<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Scalar> OrderedKeys<ScalarTable<K, ()>> {
    /// Creates an empty set with list order and the default configuration.
    pub fn new() -> Self {
        Self {
            inner: ScalarOrdered::<K>::new(),
        }
    }

    /// Creates an empty set with the given order layout.
    pub fn with_order(order: OrderType) -> Self {
        Self {
            inner: ScalarOrdered::<K>::with_order(order),
        }
    }

    /// Creates an empty list-ordered set sized by `config`.
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            inner: ScalarOrdered::<K>::with_config(config),
        }
    }

    /// Creates an empty set from every construction parameter.
    pub fn with_parts(config: TableConfig, order: OrderType) -> Self {
        Self {
            inner: ScalarOrdered::<K>::with_parts(config, order),
        }
    }
}

impl<K: Scalar> Default for OrderedKeys<ScalarTable<K, ()>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: KeyTable<Value = ()>> OrderedKeys<T> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// The order layout chosen at construction.
    pub fn order_type(&self) -> OrderType {
        self.inner.order_type()
    }

    /// The elements in order.
    pub fn order(&self) -> &OrderSeq<T::Key> {
        self.inner.order()
    }

    /// The backing table.
    pub fn table(&self) -> &T {
        self.inner.table()
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> order_seq::Iter<'_, T::Key> {
        self.inner.keys()
    }

    /// The element at `index`.
    pub fn get_at(&self, index: usize) -> Option<&T::Key> {
        self.inner.order.get(index)
    }

    /// The first element.
    pub fn first(&self) -> Option<&T::Key> {
        self.inner.order.first()
    }

    /// The last element.
    pub fn last(&self) -> Option<&T::Key> {
        self.inner.order.last()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Reserves room for `additional` more elements.
    pub fn ensure_capacity(&mut self, additional: usize) {
        self.inner.ensure_capacity(additional);
    }

    /// Swaps the positions of two elements.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.inner.swap(a, b)
    }

    /// Stable sort by a comparator.
    pub fn sort_by(&mut self, compare: impl FnMut(&T::Key, &T::Key) -> Ordering) {
        self.inner.sort_by(compare);
    }

    /// Stable sort by an extracted sort key.
    pub fn sort_by_key<B: Ord>(&mut self, f: impl FnMut(&T::Key) -> B) {
        self.inner.sort_by_key(f);
    }

    /// Sorts by the elements' natural ordering.
    pub fn sort(&mut self)
    where
        T::Key: Ord,
    {
        self.inner.sort();
    }

    /// Returns `true` if `key` is present.
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
    where
        T: KeyLookup<Q>,
    {
        self.inner.contains_key(key)
    }

    /// Position of `key` in the order.
    pub fn index_of<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        T: KeyLookup<Q>,
    {
        self.inner.index_of(key)
    }

    /// Removes `key`. Returns `true` if it was present.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> bool
    where
        T: KeyLookup<Q>,
    {
        self.inner.remove(key).is_some()
    }

    /// Removes and returns the stored element equal to `key`.
    pub fn take<Q: ?Sized>(&mut self, key: &Q) -> Option<T::Key>
    where
        T: KeyLookup<Q>,
    {
        self.inner.remove(key).map(|(k, ())| k)
    }

    /// Replaces `before` with `after` in place. Returns `false` without
    /// changes if `before` is absent or `after` is already present.
    pub fn alter<Q: ?Sized>(&mut self, before: &Q, after: T::Key) -> bool
    where
        T: KeyLookup<Q> + KeyLookup<<T as KeyTable>::Key>,
        T::Key: Clone,
    {
        self.inner.alter(before, after)
    }
}

impl<T> OrderedKeys<T>
where
    T: KeyTable<Value = ()> + KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
{
    /// Appends `key` if absent. Returns `true` if it was added.
    pub fn insert(&mut self, key: T::Key) -> bool {
        self.inner.insert(key, ()).is_none()
    }

    /// Puts `key` at position `index`: moves it there if present
    /// (`Ok(false)`, `index < len()`), inserts it there otherwise
    /// (`Ok(true)`, `index <= len()`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::OrderedSet;
    ///
    /// let mut set: OrderedSet<char> = "abc".chars().collect();
    /// assert_eq!(set.insert_at(0, 'c'), Ok(false));
    /// assert_eq!(set.insert_at(3, 'z'), Ok(true));
    /// assert!(set.insert_at(9, 'q').is_err());
    /// assert_eq!(set.iter().collect::<String>(), "cabz");
    /// ```
    pub fn insert_at(&mut self, index: usize, key: T::Key) -> Result<bool> {
        self.inner.insert_at(index, key, ())
    }

    /// Removes the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T::Key> {
        self.inner.remove_at(index).map(|(k, ())| k)
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T::Key> {
        self.inner.pop().map(|(k, ())| k)
    }

    /// Keeps the first `len` elements.
    pub fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }

    /// Replaces the element at `index` with `after`. Returns `Ok(false)`
    /// without changes if `after` is already present.
    pub fn alter_at(&mut self, index: usize, after: T::Key) -> Result<bool> {
        self.inner.alter_at(index, after)
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T::Key) -> bool) {
        self.inner.retain(|k, ()| keep(k));
    }

    /// A cursor walking the elements in order that can remove them.
    pub fn cursor(&mut self) -> KeysCursor<'_, T> {
        KeysCursor {
            inner: self.inner.cursor(),
        }
    }
}

/// A removal-capable walk over an [`OrderedKeys`] set.
pub struct KeysCursor<'a, T: KeyTable<Value = ()>> {
    inner: OrderCursor<'a, T>,
}

impl<T> KeysCursor<'_, T>
where
    T: KeyTable<Value = ()> + KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
{
    /// Advances to the next element.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T::Key> {
        self.inner.next().map(|(k, _)| k)
    }

    /// Removes the element last returned by [`next`](Self::next).
    pub fn remove(&mut self) -> Result<T::Key> {
        self.inner.remove().map(|(k, ())| k)
    }
}

impl<T> Debug for OrderedKeys<T>
where
    T: KeyTable<Value = ()>,
    T::Key: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for OrderedKeys<T>
where
    T: KeyTable<Value = ()> + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for OrderedKeys<T> where T: KeyTable<Value = ()> + Eq {}

impl<T> Hash for OrderedKeys<T>
where
    T: KeyTable<Value = ()> + Hash,
{
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T> Extend<T::Key> for OrderedKeys<T>
where
    T: KeyTable<Value = ()> + KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
{
    fn extend<I: IntoIterator<Item = T::Key>>(&mut self, iter: I) {
        self.inner.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<T> FromIterator<T::Key> for OrderedKeys<T>
where
    T: KeyTable<Value = ()> + KeyLookup<<T as KeyTable>::Key>,
    T::Key: Clone,
    Self: Default,
{
    fn from_iter<I: IntoIterator<Item = T::Key>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T> IntoIterator for OrderedKeys<T>
where
    T: KeyTable<Value = ()>,
{
    type IntoIter = order_seq::IntoIter<T::Key>;
    type Item = T::Key;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.order.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedKeys<T>
where
    T: KeyTable<Value = ()>,
{
    type IntoIter = order_seq::Iter<'a, T::Key>;
    type Item = &'a T::Key;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::case_insensitive::CaseInsensitive;

    type Map<K, V> = Ordered<HashTable<K, V>>;
    type Set<K> = OrderedKeys<HashTable<K, ()>>;
    type ScalarMap<K, V> = Ordered<ScalarTable<K, V>>;

    const ORDERS: [OrderType; 3] = [OrderType::List, OrderType::Bag, OrderType::Deque];

    fn keys<T: KeyTable>(ordered: &Ordered<T>) -> Vec<T::Key>
    where
        T::Key: Clone,
    {
        ordered.keys().cloned().collect()
    }

    #[test]
    fn insert_appends_and_keeps_position_on_replace() {
        for order in ORDERS {
            let mut map: Map<u32, &str> = Map::with_order(order);
            assert_eq!(map.insert(3, "c"), None);
            assert_eq!(map.insert(1, "a"), None);
            assert_eq!(map.insert(3, "C"), Some("c"));
            assert_eq!(keys(&map), [3, 1]);
            assert_eq!(map.get(&3), Some(&"C"));
            assert_eq!(map.order().len(), map.len());
        }
    }

    #[test]
    fn insert_at_new_and_existing() {
        let mut map: Map<char, u32> = Map::new();
        for (i, c) in "abcd".chars().enumerate() {
            map.insert(c, i as u32);
        }

        assert_eq!(map.insert_at(1, 'z', 26), Ok(true));
        assert_eq!(keys(&map), ['a', 'z', 'b', 'c', 'd']);

        assert_eq!(map.insert_at(0, 'd', 30), Ok(false));
        assert_eq!(keys(&map), ['d', 'a', 'z', 'b', 'c']);
        assert_eq!(map.get(&'d'), Some(&30));

        assert_eq!(map.insert_at(5, 'e', 4), Ok(true));
        assert_eq!(map.last(), Some((&'e', &4)));

        assert_eq!(
            map.insert_at(6, 'a', 0),
            Err(Error::IndexOutOfBounds { index: 6, len: 6 })
        );
        assert_eq!(
            map.insert_at(7, 'q', 0),
            Err(Error::IndexOutOfBounds { index: 7, len: 6 })
        );
        assert!(!map.contains_key(&'q'));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn bag_insert_at_moves_displaced_key_to_end() {
        let mut map: Map<u32, ()> = Map::with_order(OrderType::Bag);
        for k in [10, 20, 30] {
            map.insert(k, ());
        }
        map.insert_at(0, 40, ()).unwrap();
        assert_eq!(keys(&map), [40, 20, 30, 10]);
    }

    #[test]
    fn bag_removal_fills_hole_from_the_end() {
        let mut set: Set<u32> = Set::with_order(OrderType::Bag);
        for k in 1..=5 {
            set.insert(k);
        }
        assert!(set.remove(&3));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 5, 4]);
        assert_eq!(set.len(), 4);
        assert!(!set.contains(&3));
    }

    #[test]
    fn list_and_deque_removal_preserve_order() {
        for order in [OrderType::List, OrderType::Deque] {
            let mut set: Set<u32> = Set::with_order(order);
            set.extend(1..=5);
            assert_eq!(set.remove_at(2), Ok(3));
            assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 4, 5]);
            assert_eq!(set.remove_at(4), Err(Error::IndexOutOfBounds { index: 4, len: 4 }));
        }
    }

    #[test]
    fn removal_under_a_strategy_finds_the_stored_key() {
        let mut map = Ordered::<HashTable<String, u32, CaseInsensitive>>::with_strategy(
            CaseInsensitive::new(),
        );
        map.insert("Alpha".to_string(), 1);
        map.insert("Beta".to_string(), 2);
        assert_eq!(map.index_of("BETA"), Some(1));
        assert_eq!(map.remove("alpha"), Some(("Alpha".to_string(), 1)));
        assert_eq!(keys(&map), ["Beta".to_string()]);
    }

    #[test]
    fn alter_replaces_key_in_place() {
        let mut map: Map<String, u32> = Map::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("c".to_string(), 3);

        assert!(map.alter("b", "x".to_string()));
        assert_eq!(keys(&map), ["a", "x", "c"]);
        assert_eq!(map.get("x"), Some(&2));
        assert!(!map.contains_key("b"));

        assert!(!map.alter("missing", "y".to_string()));
        assert!(!map.alter("a", "c".to_string()));
        assert_eq!(map.alter_at(2, "z".to_string()), Ok(true));
        assert_eq!(map.alter_at(0, "z".to_string()), Ok(false));
        assert_eq!(keys(&map), ["a", "x", "z"]);
        assert_eq!(map.get("z"), Some(&3));
    }

    #[test]
    fn positional_access() {
        let mut map: ScalarMap<i64, &str> = ScalarMap::new();
        map.insert(0, "zero");
        map.insert(-5, "neg");
        assert_eq!(map.get_at(0), Some((&0, &"zero")));
        assert_eq!(map.set_at(1, "minus five"), Ok("neg"));
        assert_eq!(map.get(&-5), Some(&"minus five"));
        assert_eq!(map.set_at(2, "x"), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));
        if let Some((_, v)) = map.get_at_mut(0) {
            *v = "nil";
        }
        assert_eq!(map.first(), Some((&0, &"nil")));
        assert_eq!(map.get_at(2), None);
    }

    #[test]
    fn cursor_removes_every_other_entry_in_every_layout() {
        for order in ORDERS {
            let mut map: Map<u32, u32> = Map::with_order(order);
            for k in 0..50 {
                map.insert(k, k);
            }
            let mut seen = Vec::new();
            let mut cursor = map.cursor();
            while let Some((k, _)) = cursor.next() {
                let k = *k;
                seen.push(k);
                if k % 2 == 0 {
                    assert_eq!(cursor.remove().map(|(k, _)| k), Ok(k));
                    assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
                }
            }
            seen.sort_unstable();
            assert_eq!(seen, (0..50).collect::<Vec<_>>(), "{order:?}");
            assert_eq!(map.len(), 25);
            assert!(map.keys().all(|k| k % 2 == 1));
            assert_eq!(map.order().len(), map.len());
        }
    }

    #[test]
    fn sort_swap_truncate_pop() {
        let mut set: Set<i32> = [5, 3, 9, 1].into_iter().collect();
        set.sort();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 9]);
        set.sort_by_key(|k| -k);
        assert_eq!(set.first(), Some(&9));
        set.swap(0, 3).unwrap();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 5, 3, 9]);
        assert!(set.swap(0, 4).is_err());

        assert_eq!(set.pop(), Some(9));
        set.truncate(1);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1]);
        assert!(!set.contains(&5));
        assert_eq!(set.table().len(), 1);
        set.truncate(0);
        assert!(set.is_empty());
        assert!(set.table().is_empty());
    }

    #[test]
    fn retain_keeps_survivor_order() {
        let mut map: Map<u32, u32> = Map::with_order(OrderType::Deque);
        for k in (0..20).rev() {
            map.insert(k, k * 10);
        }
        map.retain(|k, v| {
            *v += 1;
            k % 3 == 0
        });
        assert_eq!(keys(&map), [18, 15, 12, 9, 6, 3, 0]);
        assert_eq!(map.get(&9), Some(&91));
        assert_eq!(map.table().len(), 7);
    }

    #[test]
    fn equality_ignores_order() {
        let a: Set<u32> = vec![1, 2, 3].into_iter().collect();
        let b: Set<u32> = vec![3, 2, 1].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, Set::new());
    }

    #[test]
    fn owning_iteration_follows_order() {
        let mut map: Map<&str, u32> = Map::new();
        map.insert("b", 2);
        map.insert("a", 1);
        let pairs: Vec<_> = map.clone().into_iter().collect();
        assert_eq!(pairs, [("b", 2), ("a", 1)]);
        assert_eq!(map.iter().rev().map(|(k, _)| *k).collect::<String>(), "ab");
        assert_eq!(map.values().sum::<u32>(), 3);
    }

    #[test]
    fn debug_lists_in_order() {
        let mut map: Map<u32, char> = Map::new();
        map.insert(2, 'b');
        map.insert(1, 'a');
        assert_eq!(alloc::format!("{map:?}"), "{2: 'b', 1: 'a'}");

        let set: OrderedKeys<ScalarTable<u8, ()>> = [3u8, 0, 7].into_iter().collect();
        assert_eq!(alloc::format!("{set:?}"), "{3, 0, 7}");
    }
}
