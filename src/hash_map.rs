use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::Hash;
use core::ops::Index;

use crate::config::TableConfig;
use crate::error::Result;
use crate::hash_table::HashTable;
use crate::hash_table::IntoIter;
use crate::hash_table::Iter;
use crate::hash_table::IterMut;
use crate::hash_table::TableCursor;
use crate::strategy::DefaultHashBuilder;
use crate::strategy::Natural;
use crate::strategy::Strategy;

/// A hash map backed by a linear-probing [`HashTable`].
///
/// Keys are hashed and compared by the strategy `S`, which defaults to the
/// key's own `Hash` and `Eq`. Lookups accept any borrowed form of the key the
/// strategy is implemented for.
///
/// # Examples
///
/// ```rust
/// use probe_hash::HashMap;
///
/// let mut map: HashMap<String, u32> = HashMap::new();
/// map.insert("one".to_string(), 1);
/// map.insert("two".to_string(), 2);
///
/// assert_eq!(map["one"], 1);
/// assert_eq!(map.remove("two"), Some(2));
/// assert!(!map.contains_key("two"));
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = Natural<DefaultHashBuilder>> {
    table: HashTable<K, V, S>,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.table.fmt(f)
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    S: Default,
{
    /// Creates an empty map with the default configuration.
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    /// Creates an empty map sized by `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    /// use probe_hash::TableConfig;
    ///
    /// let map: HashMap<u32, u32> = HashMap::with_config(TableConfig::with_capacity(100)?);
    /// assert_eq!(map.capacity(), 128);
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            table: HashTable::with_config(config),
        }
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map using `strategy` for its keys.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            table: HashTable::with_strategy(strategy),
        }
    }

    /// Creates an empty map sized by `config` using `strategy`.
    pub fn with_config_and_strategy(config: TableConfig, strategy: S) -> Self {
        Self {
            table: HashTable::with_config_and_strategy(config, strategy),
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of entries accepted before the backing table doubles.
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

    /// The key strategy.
    pub fn strategy(&self) -> &S {
        self.table.strategy()
    }

    /// Clears the map and replaces its strategy, returning the old one.
    pub fn set_strategy(&mut self, strategy: S) -> S {
        self.table.set_strategy(strategy)
    }

    /// Removes every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// The backing table.
    pub fn table(&self) -> &HashTable<K, V, S> {
        &self.table
    }

    /// Iterates over the entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// Iterates over the entries with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.table.iter(),
        }
    }

    /// Iterates over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.table.iter(),
        }
    }

    /// Iterates over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Removes and yields every entry.
    pub fn drain(&mut self) -> IntoIter<K, V> {
        self.table.drain()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    S: Strategy<K>,
{
    /// Inserts a key-value pair, returning the previous value for an equal
    /// key. The key already stored is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut map: HashMap<u32, &str> = HashMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key, value)
    }

    /// Returns the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.get(key)
    }

    /// Returns the stored key and the value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.get_key_value(key)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.get_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.remove(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and its value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.table.remove(key)
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashMap;
    ///
    /// let mut words: HashMap<&str, usize> = HashMap::new();
    /// for word in "the cat saw the dog".split(' ') {
    ///     *words.entry(word).or_default() += 1;
    /// }
    /// assert_eq!(words["the"], 2);
    /// assert_eq!(words["dog"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        match self.table.locate(&key) {
            Ok(index) => Entry::Occupied(OccupiedEntry {
                table: &mut self.table,
                index,
            }),
            Err(index) => Entry::Vacant(VacantEntry {
                table: &mut self.table,
                index,
                key,
            }),
        }
    }

    /// Reserves room for `additional` more entries.
    pub fn ensure_capacity(&mut self, additional: usize) {
        self.table.ensure_capacity(additional);
    }

    /// Shrinks the backing table toward `capacity` slots.
    pub fn shrink_to(&mut self, capacity: usize) {
        self.table.shrink_to(capacity);
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(keep);
    }

    /// A cursor that can remove entries while walking the map.
    pub fn cursor(&mut self) -> MapCursor<'_, K, V, S> {
        MapCursor {
            inner: self.table.cursor(),
        }
    }

    /// Counts entries by their distance from their ideal slot.
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

/// A removal-capable walk over a [`HashMap`].
pub struct MapCursor<'a, K, V, S> {
    inner: TableCursor<'a, K, V, S>,
}

impl<K, V, S> MapCursor<'_, K, V, S>
where
    S: Strategy<K>,
{
    /// Advances to the next entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&K, &mut V)> {
        self.inner.next()
    }

    /// Removes the entry last returned by [`next`](Self::next).
    pub fn remove(&mut self) -> Result<(K, V)> {
        self.inner.remove()
    }
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Borrow<Q>,
    Q: ?Sized,
    S: Strategy<K> + Strategy<Q>,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found in map")
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    S: Strategy<K>,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    S: Strategy<K>,
    V: Eq,
{
}

impl<K, V, S> Hash for HashMap<K, V, S>
where
    S: Strategy<K>,
    V: Hash,
{
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.table.hash(state);
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    S: Strategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            table: HashTable::from_iter(iter),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    S: Strategy<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.table.extend(iter);
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V, S> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, S>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S>),
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    S: Strategy<K>,
{
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    S: Strategy<K>,
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V, S> {
    table: &'a mut HashTable<K, V, S>,
    index: usize,
    key: K,
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S>
where
    S: Strategy<K>,
{
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let index = table.occupy(self.index, self.key, value);
        table.entry_at_mut(index).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V, S> {
    table: &'a mut HashTable<K, V, S>,
    index: usize,
}

impl<'a, K, V, S> OccupiedEntry<'a, K, V, S>
where
    S: Strategy<K>,
{
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        self.slot().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.slot().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.table.entry_at_mut(self.index).1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        let table = self.table;
        table.entry_at_mut(self.index).1
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.table.remove_slot(self.index).0
    }

    fn slot(&self) -> (&K, &V) {
        self.table
            .slot(self.index)
            .expect("occupied entry refers to an occupied slot")
    }
}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`HashMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
