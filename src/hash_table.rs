use alloc::boxed::Box;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::Hash;
use core::hash::Hasher;

use crate::config::TableConfig;
use crate::error::Error;
use crate::error::Result;
use crate::probe;
use crate::probe::ShiftSlots;
use crate::probe::Spread;
use crate::strategy::DefaultHashBuilder;
use crate::strategy::Natural;
use crate::strategy::Strategy;

type Slot<K, V> = Option<(K, V)>;

fn empty_slots<K, V>(len: usize) -> Box<[Slot<K, V>]> {
    (0..len).map(|_| None).collect()
}

/// An open-addressing hash table with linear probing.
///
/// `HashTable<K, V, S>` stores key-value pairs in a single power-of-two slot
/// array. Keys are hashed and compared only through the strategy `S`, so the
/// same table serves natural, case-insensitive, filtered and identity keys.
/// Sets use `V = ()`.
///
/// Deletion shifts displaced successors backwards instead of leaving
/// tombstones, so every lookup stops at the first empty slot and the table
/// never degrades under churn. Each allocation draws a fresh odd hash
/// multiplier; see [`Spread`].
///
/// ## Performance Characteristics
///
/// - **Memory**: one `Option<(K, V)>` per slot, with at least one slot in
///   `1 / load_factor` empty.
/// - **Resize**: doubles the slot array; amortized O(1) per insertion.
///
/// ## Example
///
/// ```rust
/// use probe_hash::HashTable;
///
/// let mut table: HashTable<String, u32> = HashTable::new();
/// table.insert("alpha".to_string(), 1);
/// table.insert("beta".to_string(), 2);
///
/// assert_eq!(table.get("alpha"), Some(&1));
/// assert_eq!(table.insert("alpha".to_string(), 10), Some(1));
/// assert_eq!(table.remove("beta"), Some(("beta".to_string(), 2)));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = Natural<DefaultHashBuilder>> {
    slots: Box<[Slot<K, V>]>,
    len: usize,
    threshold: usize,
    load_factor: f32,
    spread: Spread,
    strategy: S,
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    S: Default,
{
    /// Creates an empty table with the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let table: HashTable<u64, u64> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_config_and_strategy(TableConfig::default(), S::default())
    }

    /// Creates an empty table sized by `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    /// use probe_hash::TableConfig;
    ///
    /// let table: HashTable<u64, ()> = HashTable::with_config(TableConfig::new(100, 0.5)?);
    /// assert_eq!(table.capacity(), 128);
    /// assert_eq!(table.threshold(), 64);
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_strategy(config, S::default())
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table with the default configuration and the given
    /// strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self::with_config_and_strategy(TableConfig::default(), strategy)
    }

    /// Creates an empty table sized by `config` using `strategy`.
    pub fn with_config_and_strategy(config: TableConfig, strategy: S) -> Self {
        let len = probe::table_len(config.capacity());
        Self {
            slots: empty_slots(len),
            len: 0,
            threshold: probe::threshold(len, config.load_factor()),
            load_factor: config.load_factor(),
            spread: Spread::new(len),
            strategy,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of entries the table accepts before it doubles.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The load factor this table was configured with.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// The hash multiplier of the current allocation.
    pub fn multiplier(&self) -> u64 {
        self.spread.multiplier()
    }

    /// The placement parameters of the current allocation.
    pub fn spread(&self) -> &Spread {
        &self.spread
    }

    /// The strategy deciding key placement and equality.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Replaces the strategy, returning the old one.
    ///
    /// Existing placements are meaningless under a different strategy, so
    /// the table is cleared first.
    pub fn set_strategy(&mut self, strategy: S) -> S {
        if !self.is_empty() {
            log::debug!("clearing {} entries to replace the table strategy", self.len);
        }
        self.clear();
        core::mem::replace(&mut self.strategy, strategy)
    }

    /// The entry stored in slot `index`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, &str> = HashTable::new();
    /// table.insert(7, "seven");
    /// let slot = table.locate(&7).unwrap();
    /// assert_eq!(table.slot(slot), Some((&7, &"seven")));
    /// ```
    pub fn slot(&self, index: usize) -> Option<(&K, &V)> {
        self.slots
            .get(index)
            .and_then(|slot| slot.as_ref())
            .map(|(k, v)| (k, v))
    }

    /// The entry in an occupied slot.
    pub(crate) fn entry_at_mut(&mut self, index: usize) -> (&K, &mut V) {
        self.slots[index]
            .as_mut()
            .map(|(k, v)| (&*k, v))
            .expect("slot index refers to an occupied slot")
    }

    /// Removes every entry, keeping the allocation.
    pub fn clear(&mut self) {
        if self.len > 0 {
            self.slots.iter_mut().for_each(|slot| *slot = None);
            self.len = 0;
        }
    }

    /// Returns an iterator over the entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Returns an iterator with mutable access to the values, in slot order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    /// Removes every entry and yields it. The allocation size is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let mut table: HashTable<u8, u8> = HashTable::new();
    /// table.insert(1, 10);
    /// table.insert(2, 20);
    ///
    /// let mut drained: Vec<_> = table.drain().collect();
    /// drained.sort();
    /// assert_eq!(drained, [(1, 10), (2, 20)]);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> IntoIter<K, V> {
        let len = self.slots.len();
        let slots = core::mem::replace(&mut self.slots, empty_slots(len));
        let remaining = core::mem::take(&mut self.len);
        IntoIter {
            slots: slots.into_vec().into_iter(),
            remaining,
        }
    }
}

struct Shifter<'a, K, V, S> {
    slots: &'a mut [Slot<K, V>],
    strategy: &'a S,
    spread: &'a Spread,
}

impl<K, V, S> ShiftSlots for Shifter<'_, K, V, S>
where
    S: Strategy<K>,
{
    #[inline]
    fn ideal(&self, index: usize) -> Option<usize> {
        self.slots[index]
            .as_ref()
            .map(|(key, _)| self.strategy.place(key, self.spread) & self.spread.mask())
    }

    #[inline]
    fn relocate(&mut self, from: usize, to: usize) {
        debug_assert!(self.slots[to].is_none());
        self.slots[to] = self.slots[from].take();
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    S: Strategy<K>,
{
    /// Ideal slot of `key` in the current allocation.
    #[inline]
    pub fn place<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        S: Strategy<Q>,
    {
        Strategy::<Q>::place(&self.strategy, key, &self.spread) & self.spread.mask()
    }

    /// Whether the strategy considers `left` and `right` the same key.
    #[inline]
    pub fn equate<Q>(&self, left: &Q, right: &Q) -> bool
    where
        Q: ?Sized,
        S: Strategy<Q>,
    {
        Strategy::<Q>::equate(&self.strategy, left, right)
    }

    /// Probes for `key`.
    ///
    /// Returns `Ok(slot)` if the key is present, or `Err(slot)` with the
    /// empty slot an insertion would use, in the style of
    /// [`slice::binary_search`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let mut table: HashTable<&str, ()> = HashTable::new();
    /// let vacant = table.locate("k").unwrap_err();
    /// table.insert("k", ());
    /// assert_eq!(table.locate("k"), Ok(vacant));
    /// ```
    #[inline]
    pub fn locate<Q>(&self, key: &Q) -> core::result::Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        probe::probe(self.place(key), self.spread.mask(), |index| {
            self.slots[index]
                .as_ref()
                .map(|(stored, _)| Strategy::<Q>::equate(&self.strategy, stored.borrow(), key))
        })
    }

    /// Returns `true` if the table contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.locate(key).is_ok()
    }

    /// Returns the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    ///
    /// Under a non-natural strategy the stored key may differ from the one
    /// looked up, e.g. in letter case.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        let index = self.locate(key).ok()?;
        self.slot(index)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        let index = self.locate(key).ok()?;
        self.slots[index].as_mut().map(|(_, v)| v)
    }

    /// Inserts `value` for `key`.
    ///
    /// If an equal key is present its value is replaced and the old value
    /// returned; the stored key is kept. Otherwise the pair is added, growing
    /// the table once the threshold is exceeded.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            Ok(index) => self.slots[index]
                .as_mut()
                .map(|(_, stored)| core::mem::replace(stored, value)),
            Err(index) => {
                self.occupy(index, key, value);
                None
            }
        }
    }

    /// Returns the value for `key`, inserting the result of `default` first
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let mut counts: HashTable<char, usize> = HashTable::new();
    /// for c in "hello".chars() {
    ///     *counts.get_or_insert_with(c, || 0) += 1;
    /// }
    /// assert_eq!(counts.get(&'l'), Some(&2));
    /// ```
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.locate(&key) {
            Ok(index) => index,
            Err(index) => self.occupy(index, key, default()),
        };
        self.entry_at_mut(index).1
    }

    /// Stores a new entry in the empty slot `index`, first growing the table
    /// if the entry would push it past its threshold. Growth goes straight to
    /// the smallest length whose threshold admits the new entry, which may
    /// take more than one doubling for small load factors. Returns the slot
    /// used.
    pub(crate) fn occupy(&mut self, index: usize, key: K, value: V) -> usize {
        let index = if self.len >= self.threshold {
            self.resize(probe::len_for(self.len + 1, self.load_factor));
            match self.locate(&key) {
                Ok(index) | Err(index) => index,
            }
        } else {
            index
        };
        debug_assert!(self.slots[index].is_none());
        self.slots[index] = Some((key, value));
        self.len += 1;
        index
    }

    /// Removes `key`, returning the stored pair.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        S: Strategy<Q>,
    {
        let index = self.locate(key).ok()?;
        Some(self.remove_slot(index).0)
    }

    /// Empties slot `index` and closes the gap by backward shifting. Returns
    /// the removed entry and the slot that ends up empty.
    pub(crate) fn remove_slot(&mut self, index: usize) -> ((K, V), usize) {
        let entry = self.slots[index]
            .take()
            .expect("removing an occupied slot");
        self.len -= 1;
        let mask = self.spread.mask();
        let mut shifter = Shifter {
            slots: &mut self.slots,
            strategy: &self.strategy,
            spread: &self.spread,
        };
        let left_empty = probe::shift_back(&mut shifter, index, mask);
        (entry, left_empty)
    }

    /// Makes room for at least `additional` more entries without growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, ()> = HashTable::new();
    /// table.ensure_capacity(100);
    /// let capacity = table.capacity();
    /// for i in 0..100 {
    ///     table.insert(i, ());
    /// }
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn ensure_capacity(&mut self, additional: usize) {
        let required = self.len.saturating_add(additional);
        if required > self.threshold {
            self.resize(probe::len_for(required, self.load_factor));
        }
    }

    /// Shrinks the slot array to the smallest power of two that is at least
    /// `capacity` and still holds every entry under the load factor. Does
    /// nothing if that is not smaller than the current allocation.
    pub fn shrink_to(&mut self, capacity: usize) {
        let len = probe::table_len(capacity).max(probe::len_for(self.len, self.load_factor));
        if len < self.slots.len() {
            log::debug!("shrinking table from {} to {} slots", self.slots.len(), len);
            self.resize(len);
        }
    }

    /// Reallocates with `len` slots and a fresh multiplier, reinserting every
    /// entry.
    fn resize(&mut self, len: usize) {
        log::trace!(
            "resizing table from {} to {} slots holding {} entries",
            self.slots.len(),
            len,
            self.len
        );
        let old = core::mem::replace(&mut self.slots, empty_slots(len));
        self.spread = Spread::new(len);
        self.threshold = probe::threshold(len, self.load_factor);
        let mask = self.spread.mask();
        for (key, value) in old.into_vec().into_iter().flatten() {
            let start = self.strategy.place(&key, &self.spread) & mask;
            let slots = &self.slots;
            let index = probe::probe(start, mask, |i| slots[i].as_ref().map(|_| false))
                .expect_err("a freshly sized table has room for every entry");
            self.slots[index] = Some((key, value));
        }
    }

    /// Keeps only the entries for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, u32> = (0..10).map(|i| (i, i * i)).collect();
    /// table.retain(|k, v| {
    ///     *v += 1;
    ///     k % 2 == 0
    /// });
    /// assert_eq!(table.len(), 5);
    /// assert_eq!(table.get(&4), Some(&17));
    /// ```
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &mut V) -> bool) {
        let mut cursor = self.cursor();
        while let Some((key, value)) = cursor.next() {
            if !keep(key, value) {
                cursor.take_current();
            }
        }
    }

    /// Returns a cursor that can remove entries while walking the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::HashTable;
    ///
    /// let mut table: HashTable<u32, ()> = (0..100).map(|i| (i, ())).collect();
    /// let mut cursor = table.cursor();
    /// while let Some((key, _)) = cursor.next() {
    ///     if key % 3 != 0 {
    ///         cursor.remove()?;
    ///     }
    /// }
    /// assert_eq!(table.len(), 34);
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn cursor(&mut self) -> TableCursor<'_, K, V, S> {
        let start = probe::empty_slot(self.slots.len(), |i| self.slots[i].is_none()) + 1;
        TableCursor {
            table: self,
            start,
            step: 0,
            current: None,
        }
    }

    /// Order-independent hash of the keys under the table's strategy.
    pub(crate) fn key_hash_sum(&self) -> u64 {
        self.iter()
            .fold(0u64, |sum, (k, _)| sum.wrapping_add(self.strategy.hash(k)))
    }
}

/// A removal-capable walk over a [`HashTable`].
///
/// The walk starts just past an empty slot. Backward shifting only ever moves
/// entries from later in the walk to earlier, and only inside a cluster, so
/// removing through the cursor never makes it skip or repeat an entry.
///
/// Created by [`HashTable::cursor`].
pub struct TableCursor<'a, K, V, S> {
    table: &'a mut HashTable<K, V, S>,
    start: usize,
    step: usize,
    current: Option<usize>,
}

impl<K, V, S> TableCursor<'_, K, V, S>
where
    S: Strategy<K>,
{
    /// Advances to the next entry. Returns `None` once every slot has been
    /// visited.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&K, &mut V)> {
        let mask = self.table.spread.mask();
        while self.step < self.table.slots.len() {
            let index = (self.start + self.step) & mask;
            self.step += 1;
            if self.table.slots[index].is_some() {
                self.current = Some(index);
                return self.table.slots[index].as_mut().map(|(k, v)| (&*k, v));
            }
        }
        self.current = None;
        None
    }

    /// Removes the entry last returned by [`next`](Self::next).
    ///
    /// Fails with [`Error::NoCurrentElement`] if `next` has not returned an
    /// entry since the last removal.
    pub fn remove(&mut self) -> Result<(K, V)> {
        self.take_current().ok_or(Error::NoCurrentElement)
    }

    pub(crate) fn take_current(&mut self) -> Option<(K, V)> {
        let index = self.current.take()?;
        let (entry, left_empty) = self.table.remove_slot(index);
        if left_empty != index {
            // A later entry moved into `index`; visit it next.
            self.step -= 1;
        }
        Some(entry)
    }
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    S: Strategy<K>,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|other_v| v == other_v))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    S: Strategy<K>,
    V: Eq,
{
}

impl<K, V, S> Hash for HashTable<K, V, S>
where
    S: Strategy<K>,
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        use core::hash::BuildHasher;

        let values = DefaultHashBuilder::default();
        let sum = self.iter().fold(0u64, |sum, (k, v)| {
            sum.wrapping_add(self.strategy.hash(k) ^ values.hash_one(v))
        });
        state.write_usize(self.len);
        state.write_u64(sum);
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    S: Strategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    S: Strategy<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.ensure_capacity(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.len,
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`HashTable`], in slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = self.slots.find_map(|slot| slot.as_ref())?;
        self.remaining -= 1;
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// A mutable iterator over the entries of a [`HashTable`].
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = self.slots.find_map(|slot| slot.as_mut())?;
        self.remaining -= 1;
        Some((&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`HashTable`].
pub struct IntoIter<K, V> {
    slots: alloc::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(|slot| slot)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(feature = "stats")]
impl<K, V, S> HashTable<K, V, S>
where
    S: Strategy<K>,
{
    /// Counts entries by their distance from their ideal slot.
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        let mask = self.spread.mask();
        crate::stats::ProbeHistogram::from_displacements(
            self.slots.iter().enumerate().filter_map(|(index, slot)| {
                slot.as_ref().map(|(key, _)| {
                    index.wrapping_sub(self.place(key)) & mask
                })
            }),
        )
    }

    /// Summarizes occupancy and probe lengths.
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        crate::stats::DebugStats::new(
            self.len,
            self.slots.len(),
            self.threshold,
            &self.probe_histogram(),
            core::mem::size_of::<Slot<K, V>>() * self.slots.len(),
        )
    }
}
