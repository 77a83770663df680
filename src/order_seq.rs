//! The sequence an ordered container keeps next to its table.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::Index;

/// How an ordered container lays out its order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// A vector keeping insertion order. Removal shifts later elements down.
    #[default]
    List,
    /// A vector where removal moves the last element into the hole. Cheapest
    /// removal, but order only survives appends.
    Bag,
    /// A ring buffer. Removal near either end is cheap.
    Deque,
}

/// A sequence backed by one of the [`OrderType`] layouts.
#[derive(Debug, Clone)]
pub enum OrderSeq<T> {
    /// See [`OrderType::List`].
    List(Vec<T>),
    /// See [`OrderType::Bag`].
    Bag(Vec<T>),
    /// See [`OrderType::Deque`].
    Deque(VecDeque<T>),
}

impl<T> Default for OrderSeq<T> {
    fn default() -> Self {
        Self::new(OrderType::default())
    }
}

impl<T> OrderSeq<T> {
    /// An empty sequence of the given kind.
    pub fn new(kind: OrderType) -> Self {
        Self::with_capacity(kind, 0)
    }

    /// An empty sequence with room for `capacity` elements.
    pub fn with_capacity(kind: OrderType, capacity: usize) -> Self {
        match kind {
            OrderType::List => Self::List(Vec::with_capacity(capacity)),
            OrderType::Bag => Self::Bag(Vec::with_capacity(capacity)),
            OrderType::Deque => Self::Deque(VecDeque::with_capacity(capacity)),
        }
    }

    /// The layout of this sequence.
    pub fn order_type(&self) -> OrderType {
        match self {
            Self::List(_) => OrderType::List,
            Self::Bag(_) => OrderType::Bag,
            Self::Deque(_) => OrderType::Deque,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::List(v) | Self::Bag(v) => v.len(),
            Self::Deque(d) => d.len(),
        }
    }

    /// Returns `true` if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            Self::List(v) | Self::Bag(v) => v.get(index),
            Self::Deque(d) => d.get(index),
        }
    }

    /// The first element.
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// The last element.
    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterates front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        match self {
            Self::List(v) | Self::Bag(v) => Iter::Slice(v.iter()),
            Self::Deque(d) => Iter::Ring(d.iter()),
        }
    }

    /// Position of the first element matching `pred`.
    pub fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        match self {
            Self::List(v) | Self::Bag(v) => v.iter().position(pred),
            Self::Deque(d) => d.iter().position(pred),
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self {
            Self::List(v) | Self::Bag(v) => v.get_mut(index),
            Self::Deque(d) => d.get_mut(index),
        }
    }

    pub(crate) fn push(&mut self, value: T) {
        match self {
            Self::List(v) | Self::Bag(v) => v.push(value),
            Self::Deque(d) => d.push_back(value),
        }
    }

    /// Places `value` at `index`, `index <= len`. A bag moves the element it
    /// displaces to the end instead of shifting everything after it.
    pub(crate) fn insert(&mut self, index: usize, value: T) {
        match self {
            Self::List(v) => v.insert(index, value),
            Self::Bag(v) => {
                v.push(value);
                let last = v.len() - 1;
                v.swap(index, last);
            }
            Self::Deque(d) => d.insert(index, value),
        }
    }

    /// Removes the element at `index`. A bag fills the hole with its last
    /// element.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<T> {
        match self {
            Self::List(v) => (index < v.len()).then(|| v.remove(index)),
            Self::Bag(v) => (index < v.len()).then(|| v.swap_remove(index)),
            Self::Deque(d) => d.remove(index),
        }
    }

    /// Removes the first element matching `pred`.
    pub(crate) fn remove_first(&mut self, pred: impl FnMut(&T) -> bool) -> Option<(usize, T)> {
        let index = self.position(pred)?;
        self.remove_at(index).map(|value| (index, value))
    }

    /// Replaces the element at `index`, returning the old one.
    pub(crate) fn set(&mut self, index: usize, value: T) -> Option<T> {
        self.get_mut(index)
            .map(|slot| core::mem::replace(slot, value))
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        match self {
            Self::List(v) | Self::Bag(v) => v.pop(),
            Self::Deque(d) => d.pop_back(),
        }
    }

    /// Moves the element at `from` so it ends up at `to`. Both indices must
    /// be in bounds.
    pub(crate) fn move_to(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        match self {
            Self::List(v) => {
                if from < to {
                    v[from..=to].rotate_left(1);
                } else {
                    v[to..=from].rotate_right(1);
                }
            }
            Self::Bag(v) => v.swap(from, to),
            Self::Deque(d) => {
                if let Some(value) = d.remove(from) {
                    d.insert(to, value);
                }
            }
        }
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        match self {
            Self::List(v) | Self::Bag(v) => v.swap(a, b),
            Self::Deque(d) => d.swap(a, b),
        }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        match self {
            Self::List(v) | Self::Bag(v) => v.truncate(len),
            Self::Deque(d) => d.truncate(len),
        }
    }

    /// Stable sort.
    pub(crate) fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> Ordering) {
        match self {
            Self::List(v) | Self::Bag(v) => v.sort_by(compare),
            Self::Deque(d) => d.make_contiguous().sort_by(compare),
        }
    }

    pub(crate) fn clear(&mut self) {
        match self {
            Self::List(v) | Self::Bag(v) => v.clear(),
            Self::Deque(d) => d.clear(),
        }
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        match self {
            Self::List(v) | Self::Bag(v) => v.reserve(additional),
            Self::Deque(d) => d.reserve(additional),
        }
    }

    /// Keeps the elements for which `keep` returns `true`, preserving their
    /// relative order for every layout.
    pub(crate) fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        match self {
            Self::List(v) | Self::Bag(v) => v.retain(keep),
            Self::Deque(d) => d.retain(keep),
        }
    }
}

impl<T> Index<usize> for OrderSeq<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self {
            Self::List(v) | Self::Bag(v) => &v[index],
            Self::Deque(d) => &d[index],
        }
    }
}

impl<T> IntoIterator for OrderSeq<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::List(v) | Self::Bag(v) => IntoIter::Vec(v.into_iter()),
            Self::Deque(d) => IntoIter::Ring(d.into_iter()),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderSeq<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A borrowing iterator over an [`OrderSeq`].
#[derive(Debug, Clone)]
pub enum Iter<'a, T> {
    /// List or bag.
    Slice(core::slice::Iter<'a, T>),
    /// Deque.
    Ring(alloc::collections::vec_deque::Iter<'a, T>),
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self {
            Self::Slice(it) => it.next(),
            Self::Ring(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Slice(it) => it.size_hint(),
            Self::Ring(it) => it.size_hint(),
        }
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Self::Slice(it) => it.next_back(),
            Self::Ring(it) => it.next_back(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// An owning iterator over an [`OrderSeq`].
#[derive(Debug)]
pub enum IntoIter<T> {
    /// List or bag.
    Vec(alloc::vec::IntoIter<T>),
    /// Deque.
    Ring(alloc::collections::vec_deque::IntoIter<T>),
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            Self::Vec(it) => it.next(),
            Self::Ring(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Vec(it) => it.size_hint(),
            Self::Ring(it) => it.size_hint(),
        }
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        match self {
            Self::Vec(it) => it.next_back(),
            Self::Ring(it) => it.next_back(),
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
