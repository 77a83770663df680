use alloc::boxed::Box;
use core::fmt::Debug;
use core::hash::Hash;
use core::hash::Hasher;

use crate::config::TableConfig;
use crate::error::Error;
use crate::error::Result;
use crate::probe;
use crate::probe::ShiftSlots;
use crate::probe::Spread;
use crate::scalar::Scalar;

/// A linear-probing table keyed by primitive values.
///
/// Keys live directly in the slot array with [`Scalar::ZERO`] marking an empty
/// slot, so there is no per-slot occupancy flag to check. The zero key itself
/// is stored out of band. Placement is `Spread::place(key.to_bits())`, using
/// the same probing, backward-shift deletion and per-resize multiplier as
/// [`HashTable`](crate::HashTable).
///
/// The threshold counts only keys in the slot array; the zero key never
/// triggers a resize.
///
/// ## Example
///
/// ```rust
/// use probe_hash::ScalarTable;
///
/// let mut table: ScalarTable<i32, &str> = ScalarTable::new();
/// table.insert(0, "zero");
/// table.insert(-5, "minus five");
///
/// assert_eq!(table.get(0), Some(&"zero"));
/// assert!(table.has_zero_key());
/// assert_eq!(table.remove(-5), Some("minus five"));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct ScalarTable<K, V> {
    keys: Box<[K]>,
    values: Box<[Option<V>]>,
    zero: Option<V>,
    resident: usize,
    threshold: usize,
    load_factor: f32,
    spread: Spread,
}

fn zeroed<K: Scalar, V>(len: usize) -> (Box<[K]>, Box<[Option<V>]>) {
    (
        (0..len).map(|_| K::ZERO).collect(),
        (0..len).map(|_| None).collect(),
    )
}

impl<K, V> Debug for ScalarTable<K, V>
where
    K: Scalar,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Scalar, V> Default for ScalarTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

struct Shifter<'a, K, V> {
    keys: &'a mut [K],
    values: &'a mut [Option<V>],
    spread: &'a Spread,
}

impl<K: Scalar, V> ShiftSlots for Shifter<'_, K, V> {
    #[inline]
    fn ideal(&self, index: usize) -> Option<usize> {
        let key = self.keys[index];
        (!key.is_zero()).then(|| self.spread.place(key.to_bits()))
    }

    #[inline]
    fn relocate(&mut self, from: usize, to: usize) {
        self.keys[to] = core::mem::replace(&mut self.keys[from], K::ZERO);
        self.values[to] = self.values[from].take();
    }
}

impl<K: Scalar, V> ScalarTable<K, V> {
    /// Creates an empty table with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty table sized by `config`.
    pub fn with_config(config: TableConfig) -> Self {
        let len = probe::table_len(config.capacity());
        let (keys, values) = zeroed(len);
        Self {
            keys,
            values,
            zero: None,
            resident: 0,
            threshold: probe::threshold(len, config.load_factor()),
            load_factor: config.load_factor(),
            spread: Spread::new(len),
        }
    }

    /// Number of entries, including the zero key.
    pub fn len(&self) -> usize {
        self.resident + usize::from(self.zero.is_some())
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// Number of non-zero keys accepted before the table doubles.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// The hash multiplier of the current allocation.
    pub fn multiplier(&self) -> u64 {
        self.spread.multiplier()
    }

    /// Whether the zero key is present.
    pub fn has_zero_key(&self) -> bool {
        self.zero.is_some()
    }

    /// Ideal slot of `key`.
    #[inline]
    pub fn place(&self, key: K) -> usize {
        self.spread.place(key.to_bits())
    }

    /// Probes for a non-zero `key`: `Ok(slot)` if present, else `Err(slot)` of
    /// the empty slot an insertion would use.
    #[inline]
    pub fn locate(&self, key: K) -> core::result::Result<usize, usize> {
        debug_assert!(!key.is_zero());
        probe::probe(self.place(key), self.spread.mask(), |index| {
            let stored = self.keys[index];
            (!stored.is_zero()).then(|| stored.same(key))
        })
    }

    /// The entry in slot `index`, if any. The zero key is never in a slot.
    pub fn slot(&self, index: usize) -> Option<(K, &V)> {
        let key = *self.keys.get(index)?;
        if key.is_zero() {
            return None;
        }
        self.values[index].as_ref().map(|v| (key, v))
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: K) -> bool {
        if key.is_zero() {
            self.zero.is_some()
        } else {
            self.locate(key).is_ok()
        }
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: K) -> Option<&V> {
        if key.is_zero() {
            return self.zero.as_ref();
        }
        let index = self.locate(key).ok()?;
        self.values[index].as_ref()
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        if key.is_zero() {
            return self.zero.as_mut();
        }
        let index = self.locate(key).ok()?;
        self.values[index].as_mut()
    }

    /// Inserts `value` for `key`, returning the previous value if the key was
    /// present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if key.is_zero() {
            return self.zero.replace(value);
        }
        match self.locate(key) {
            Ok(index) => self.values[index].replace(value),
            Err(index) => {
                self.occupy(index, key, value);
                None
            }
        }
    }

    /// Returns the value for `key`, inserting the result of `default` first
    /// if the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        if key.is_zero() {
            return self.zero.get_or_insert_with(default);
        }
        let index = match self.locate(key) {
            Ok(index) => index,
            Err(index) => self.occupy(index, key, default()),
        };
        self.value_at_mut(index)
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> &mut V {
        self.values[index]
            .as_mut()
            .expect("slot index refers to an occupied slot")
    }

    fn occupy(&mut self, index: usize, key: K, value: V) -> usize {
        let index = if self.resident >= self.threshold {
            self.resize(probe::len_for(self.resident + 1, self.load_factor));
            match self.locate(key) {
                Ok(index) | Err(index) => index,
            }
        } else {
            index
        };
        self.keys[index] = key;
        self.values[index] = Some(value);
        self.resident += 1;
        index
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: K) -> Option<V> {
        if key.is_zero() {
            return self.zero.take();
        }
        let index = self.locate(key).ok()?;
        Some(self.remove_slot(index).0)
    }

    /// Empties slot `index` and shifts its cluster back. Returns the value
    /// and the slot left empty.
    pub(crate) fn remove_slot(&mut self, index: usize) -> (V, usize) {
        self.keys[index] = K::ZERO;
        let value = self.values[index]
            .take()
            .expect("removing an occupied slot");
        self.resident -= 1;
        let mask = self.spread.mask();
        let mut shifter = Shifter {
            keys: &mut self.keys,
            values: &mut self.values,
            spread: &self.spread,
        };
        (value, probe::shift_back(&mut shifter, index, mask))
    }

    /// Removes every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.zero = None;
        if self.resident > 0 {
            self.keys.iter_mut().for_each(|k| *k = K::ZERO);
            self.values.iter_mut().for_each(|v| *v = None);
            self.resident = 0;
        }
    }

    /// Makes room for `additional` more keys without growing.
    pub fn ensure_capacity(&mut self, additional: usize) {
        let required = self.resident.saturating_add(additional);
        if required > self.threshold {
            self.resize(probe::len_for(required, self.load_factor));
        }
    }

    /// Shrinks the slot array toward `capacity`, never below what the
    /// resident keys need.
    pub fn shrink_to(&mut self, capacity: usize) {
        let len = probe::table_len(capacity).max(probe::len_for(self.resident, self.load_factor));
        if len < self.keys.len() {
            log::debug!("shrinking scalar table from {} to {} slots", self.keys.len(), len);
            self.resize(len);
        }
    }

    fn resize(&mut self, len: usize) {
        log::trace!(
            "resizing scalar table from {} to {} slots holding {} keys",
            self.keys.len(),
            len,
            self.resident
        );
        let (keys, values) = zeroed(len);
        let old_keys = core::mem::replace(&mut self.keys, keys);
        let old_values = core::mem::replace(&mut self.values, values);
        self.spread = Spread::new(len);
        self.threshold = probe::threshold(len, self.load_factor);
        let mask = self.spread.mask();
        for (key, value) in old_keys.iter().zip(old_values.into_vec()) {
            let Some(value) = value else { continue };
            let keys = &self.keys;
            let index = probe::probe(self.spread.place(key.to_bits()), mask, |i| {
                (!keys[i].is_zero()).then_some(false)
            })
            .expect_err("a freshly sized table has room for every key");
            self.keys[index] = *key;
            self.values[index] = Some(value);
        }
    }

    /// Iterates over the entries: the zero key first, then slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            zero: self.zero.as_ref(),
            keys: self.keys.iter(),
            values: self.values.iter(),
            remaining: self.len(),
        }
    }

    /// Iterates over the entries with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len();
        IterMut {
            zero: self.zero.as_mut(),
            keys: self.keys.iter(),
            values: self.values.iter_mut(),
            remaining,
        }
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Removes every entry and yields it.
    pub fn drain(&mut self) -> IntoIter<K, V> {
        let len = self.keys.len();
        let (keys, values) = zeroed(len);
        let remaining = self.len();
        self.resident = 0;
        IntoIter {
            zero: self.zero.take(),
            keys: core::mem::replace(&mut self.keys, keys).into_vec().into_iter(),
            values: core::mem::replace(&mut self.values, values)
                .into_vec()
                .into_iter(),
            remaining,
        }
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(K, &mut V) -> bool) {
        let mut cursor = self.cursor();
        while let Some((key, value)) = cursor.next() {
            if !keep(key, value) {
                cursor.take_current();
            }
        }
    }

    /// A cursor that can remove entries while walking the table. The zero key
    /// is visited first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::ScalarTable;
    ///
    /// let mut table: ScalarTable<u16, ()> = (0..50).map(|k| (k, ())).collect();
    /// let mut cursor = table.cursor();
    /// while let Some((key, _)) = cursor.next() {
    ///     if key < 25 {
    ///         cursor.remove()?;
    ///     }
    /// }
    /// assert_eq!(table.len(), 25);
    /// assert!(!table.has_zero_key());
    /// # Ok::<(), probe_hash::Error>(())
    /// ```
    pub fn cursor(&mut self) -> ScalarCursor<'_, K, V> {
        let start = probe::empty_slot(self.keys.len(), |i| self.keys[i].is_zero()) + 1;
        ScalarCursor {
            table: self,
            start,
            step: 0,
            zero_pending: true,
            current: None,
        }
    }

    /// Order-independent hash of the keys.
    pub(crate) fn key_hash_sum(&self) -> u64 {
        self.keys()
            .fold(0u64, |sum, k| sum.wrapping_add(k.to_bits().wrapping_mul(0x9e37_79b9_7f4a_7c15)))
    }

    /// Counts resident keys by their distance from their ideal slot. The zero
    /// key is not counted.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        let mask = self.spread.mask();
        crate::stats::ProbeHistogram::from_displacements(
            self.keys
                .iter()
                .enumerate()
                .filter(|(_, key)| !key.is_zero())
                .map(|(index, key)| index.wrapping_sub(self.place(*key)) & mask),
        )
    }

    /// Summarizes occupancy and probe lengths.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        crate::stats::DebugStats::new(
            self.resident,
            self.keys.len(),
            self.threshold,
            &self.probe_histogram(),
            (core::mem::size_of::<K>() + core::mem::size_of::<Option<V>>()) * self.keys.len(),
        )
    }
}

#[derive(Clone, Copy)]
enum Visited {
    Zero,
    Slot(usize),
}

/// A removal-capable walk over a [`ScalarTable`].
pub struct ScalarCursor<'a, K, V> {
    table: &'a mut ScalarTable<K, V>,
    start: usize,
    step: usize,
    zero_pending: bool,
    current: Option<Visited>,
}

impl<K: Scalar, V> ScalarCursor<'_, K, V> {
    /// Advances to the next entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(K, &mut V)> {
        if core::mem::take(&mut self.zero_pending) && self.table.zero.is_some() {
            self.current = Some(Visited::Zero);
            return self.table.zero.as_mut().map(|v| (K::ZERO, v));
        }
        let mask = self.table.spread.mask();
        while self.step < self.table.keys.len() {
            let index = (self.start + self.step) & mask;
            self.step += 1;
            let key = self.table.keys[index];
            if !key.is_zero() {
                self.current = Some(Visited::Slot(index));
                return Some((key, self.table.value_at_mut(index)));
            }
        }
        self.current = None;
        None
    }

    /// Removes the entry last returned by [`next`](Self::next).
    pub fn remove(&mut self) -> Result<(K, V)> {
        self.take_current().ok_or(Error::NoCurrentElement)
    }

    pub(crate) fn take_current(&mut self) -> Option<(K, V)> {
        match self.current.take()? {
            Visited::Zero => self.table.zero.take().map(|v| (K::ZERO, v)),
            Visited::Slot(index) => {
                let key = self.table.keys[index];
                let (value, left_empty) = self.table.remove_slot(index);
                if left_empty != index {
                    self.step -= 1;
                }
                Some((key, value))
            }
        }
    }
}

impl<K: Scalar, V: PartialEq> PartialEq for ScalarTable<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Scalar, V: Eq> Eq for ScalarTable<K, V> {}

impl<K: Scalar, V: Hash> Hash for ScalarTable<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use core::hash::BuildHasher;

        let values = crate::strategy::DefaultHashBuilder::default();
        let sum = self.iter().fold(0u64, |sum, (k, v)| {
            sum.wrapping_add(k.to_bits().wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ values.hash_one(v))
        });
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<K: Scalar, V> FromIterator<(K, V)> for ScalarTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Scalar, V> Extend<(K, V)> for ScalarTable<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.ensure_capacity(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Scalar, V> IntoIterator for ScalarTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        IntoIter {
            zero: self.zero,
            keys: self.keys.into_vec().into_iter(),
            values: self.values.into_vec().into_iter(),
            remaining,
        }
    }
}

impl<'a, K: Scalar, V> IntoIterator for &'a ScalarTable<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`ScalarTable`].
pub struct Iter<'a, K, V> {
    zero: Option<&'a V>,
    keys: core::slice::Iter<'a, K>,
    values: core::slice::Iter<'a, Option<V>>,
    remaining: usize,
}

impl<'a, K: Scalar, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.zero.take() {
            Some(v) => (K::ZERO, v),
            None => self
                .keys
                .by_ref()
                .zip(self.values.by_ref())
                .find_map(|(k, v)| v.as_ref().map(|v| (*k, v)))?,
        };
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Scalar, V> ExactSizeIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`ScalarTable`].
pub struct IterMut<'a, K, V> {
    zero: Option<&'a mut V>,
    keys: core::slice::Iter<'a, K>,
    values: core::slice::IterMut<'a, Option<V>>,
    remaining: usize,
}

impl<'a, K: Scalar, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.zero.take() {
            Some(v) => (K::ZERO, v),
            None => self
                .keys
                .by_ref()
                .zip(self.values.by_ref())
                .find_map(|(k, v)| v.as_mut().map(|v| (*k, v)))?,
        };
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Scalar, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`ScalarTable`].
pub struct IntoIter<K, V> {
    zero: Option<V>,
    keys: alloc::vec::IntoIter<K>,
    values: alloc::vec::IntoIter<Option<V>>,
    remaining: usize,
}

impl<K: Scalar, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.zero.take() {
            Some(v) => (K::ZERO, v),
            None => self
                .keys
                .by_ref()
                .zip(self.values.by_ref())
                .find_map(|(k, v)| v.map(|v| (k, v)))?,
        };
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Scalar, V> ExactSizeIterator for IntoIter<K, V> {}
