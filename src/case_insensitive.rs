use core::hash::BuildHasher;
use core::hash::Hasher;

use crate::strategy::DefaultHashBuilder;
use crate::strategy::Strategy;

/// Case-insensitive hashing and equality for string-like keys.
///
/// Every `char` is folded to its simple uppercase mapping before it is hashed
/// or compared. Characters whose uppercase form expands to several chars
/// (`'ß'` becomes `"SS"`) are kept as they are.
///
/// This is a single-direction, per-char fold, chosen because it needs no
/// allocation and no lookahead. It is not full Unicode case folding: case
/// pairs that only meet under a lowercase mapping stay distinct, such as
/// the Kelvin sign `'K'` and `'K'`, or `'ẞ'` and `'ß'`. Dual-case Georgian
/// text (Mkhedruli and Mtavruli) falls under the same limitation and is not
/// guaranteed to compare equal across cases.
///
/// # Examples
///
/// ```rust
/// use probe_hash::CaseInsensitiveMap;
///
/// let mut map: CaseInsensitiveMap<String, i32> = CaseInsensitiveMap::new();
/// map.insert("Key".to_string(), 7);
/// assert_eq!(map.get("KEY"), Some(&7));
/// assert_eq!(map.get("key"), Some(&7));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitive<H = DefaultHashBuilder> {
    hasher: H,
}

impl CaseInsensitive {
    /// Case-insensitive strategy with the default hasher.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H> CaseInsensitive<H> {
    /// Uses `hasher` for the folded chars.
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }
}

/// Simple uppercase mapping of `c`, or `c` itself when the mapping is not a
/// single char.
#[inline]
pub fn fold(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_uppercase();
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Hashes a sequence of chars so that two sequences yielding the same chars
/// hash the same regardless of how they were encoded.
pub(crate) fn hash_chars(hasher: &impl BuildHasher, chars: impl Iterator<Item = char>) -> u64 {
    let mut state = hasher.build_hasher();
    let mut count = 0u64;
    for c in chars {
        state.write_u32(c as u32);
        count += 1;
    }
    state.write_u64(count);
    state.finish()
}

impl<K, H> Strategy<K> for CaseInsensitive<H>
where
    K: AsRef<str> + ?Sized,
    H: BuildHasher,
{
    fn hash(&self, key: &K) -> u64 {
        hash_chars(&self.hasher, key.as_ref().chars().map(fold))
    }

    fn equate(&self, left: &K, right: &K) -> bool {
        let (left, right) = (left.as_ref(), right.as_ref());
        left == right || left.chars().map(fold).eq(right.chars().map(fold))
    }
}
