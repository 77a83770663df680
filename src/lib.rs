#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Case-insensitive string keys.
pub mod case_insensitive;

/// Table sizing parameters.
pub mod config;

/// Errors reported by fallible container operations.
pub mod error;

/// String keys compared after a per-char filter.
pub mod filtered;

/// A key-value map over [`HashTable`].
///
/// This module provides a `HashMap` that wraps the `HashTable` and offers the
/// usual map interface, including the entry API, with any [`Strategy`].
pub mod hash_map;

/// The general open-addressing table every hashed container is built on.
pub mod hash_table;

/// A hash set over [`HashTable`].
///
/// This module provides a `HashSet` that wraps the `HashTable` and offers
/// membership, set relations, and set algebra with any [`Strategy`].
pub mod hash_set;

/// Keys compared by the address they point to.
pub mod identity;

pub mod order_seq;
pub mod ordered;
pub mod probe;
pub mod scalar;

/// A set of primitive values.
pub mod scalar_set;

/// An open-addressing table specialized for primitive keys.
pub mod scalar_table;

#[cfg(feature = "stats")]
pub mod stats;

pub mod strategy;

pub use case_insensitive::CaseInsensitive;
pub use config::TableConfig;
pub use error::Error;
pub use error::Result;
pub use filtered::CharFilter;
pub use filtered::Filtered;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_map::MapCursor;
pub use hash_map::OccupiedEntry;
pub use hash_map::VacantEntry;
pub use hash_set::HashSet;
pub use hash_set::SetCursor;
pub use hash_table::HashTable;
pub use hash_table::TableCursor;
pub use identity::Identity;
pub use order_seq::OrderSeq;
pub use order_seq::OrderType;
pub use ordered::KeyLookup;
pub use ordered::KeyTable;
pub use ordered::KeysCursor;
pub use ordered::OrderCursor;
pub use ordered::Ordered;
pub use ordered::OrderedKeys;
pub use probe::Spread;
pub use scalar::Scalar;
pub use scalar_set::ScalarSet;
pub use scalar_set::ScalarSetCursor;
pub use scalar_table::ScalarCursor;
pub use scalar_table::ScalarTable;
#[cfg(feature = "stats")]
pub use stats::DebugStats;
#[cfg(feature = "stats")]
pub use stats::ProbeHistogram;
pub use strategy::DefaultHashBuilder;
pub use strategy::Natural;
pub use strategy::Strategy;

/// A map from primitive keys to values.
pub type ScalarMap<K, V> = ScalarTable<K, V>;

/// An insertion-ordered map.
pub type OrderedMap<K, V, S = Natural<DefaultHashBuilder>> = Ordered<HashTable<K, V, S>>;

/// An insertion-ordered set.
pub type OrderedSet<K, S = Natural<DefaultHashBuilder>> = OrderedKeys<HashTable<K, (), S>>;

/// An insertion-ordered map from primitive keys to values.
pub type OrderedScalarMap<K, V> = Ordered<ScalarTable<K, V>>;

/// An insertion-ordered set of primitive values.
pub type OrderedScalarSet<K> = OrderedKeys<ScalarTable<K, ()>>;

/// A set of strings ignoring case.
pub type CaseInsensitiveSet<K> = HashSet<K, CaseInsensitive>;

/// A map with string keys ignoring case.
pub type CaseInsensitiveMap<K, V> = HashMap<K, V, CaseInsensitive>;

/// An insertion-ordered set of strings ignoring case.
pub type CaseInsensitiveOrderedSet<K> = OrderedSet<K, CaseInsensitive>;

/// An insertion-ordered map with string keys ignoring case.
pub type CaseInsensitiveOrderedMap<K, V> = OrderedMap<K, V, CaseInsensitive>;

/// A set of strings compared after a [`CharFilter`].
pub type FilteredStringSet = HashSet<alloc::string::String, Filtered>;

/// A map with string keys compared after a [`CharFilter`].
pub type FilteredStringMap<V> = HashMap<alloc::string::String, V, Filtered>;

/// An insertion-ordered set of strings compared after a [`CharFilter`].
pub type FilteredStringOrderedSet = OrderedSet<alloc::string::String, Filtered>;

/// An insertion-ordered map with string keys compared after a [`CharFilter`].
pub type FilteredStringOrderedMap<V> = OrderedMap<alloc::string::String, V, Filtered>;

/// A set of pointers compared by address.
pub type IdentitySet<P> = HashSet<P, Identity>;

/// A map keyed by pointer address.
pub type IdentityMap<P, V> = HashMap<P, V, Identity>;

/// An insertion-ordered set of pointers compared by address.
pub type IdentityOrderedSet<P> = OrderedSet<P, Identity>;

/// An insertion-ordered map keyed by pointer address.
pub type IdentityOrderedMap<P, V> = OrderedMap<P, V, Identity>;
