use core::fmt::Debug;
use core::hash::BuildHasher;

use crate::case_insensitive::hash_chars;
use crate::strategy::DefaultHashBuilder;
use crate::strategy::Strategy;

/// Decides which chars of a string key take part in hashing and equality,
/// and how each surviving char is rewritten first.
///
/// Filters are identified by name: two filters with the same name are
/// considered the same rule.
///
/// # Examples
///
/// ```rust
/// use probe_hash::CharFilter;
///
/// let letters = CharFilter::new("LettersUpper", char::is_alphabetic, |c| c.to_ascii_uppercase());
/// let kept: String = letters.apply("Hello, World!").collect();
/// assert_eq!(kept, "HELLOWORLD");
/// ```
#[derive(Clone, Copy)]
pub struct CharFilter {
    name: &'static str,
    predicate: fn(char) -> bool,
    editor: fn(char) -> char,
}

fn keep_every(_: char) -> bool {
    true
}

fn unchanged(c: char) -> char {
    c
}

impl CharFilter {
    /// Keeps every char unchanged.
    pub const IDENTITY: CharFilter = CharFilter::new("Identity", keep_every, unchanged);

    /// Creates a named filter from a predicate and an editor.
    pub const fn new(
        name: &'static str,
        predicate: fn(char) -> bool,
        editor: fn(char) -> char,
    ) -> Self {
        Self {
            name,
            predicate,
            editor,
        }
    }

    /// Filter with the given predicate and no editing.
    pub const fn with_predicate(name: &'static str, predicate: fn(char) -> bool) -> Self {
        Self::new(name, predicate, unchanged)
    }

    /// Filter that keeps every char and rewrites it with `editor`.
    pub const fn with_editor(name: &'static str, editor: fn(char) -> char) -> Self {
        Self::new(name, keep_every, editor)
    }

    /// The name this filter is identified by.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether `c` takes part in hashing and equality.
    #[inline]
    pub fn accepts(&self, c: char) -> bool {
        (self.predicate)(c)
    }

    /// How `c` is rewritten before hashing and equality.
    #[inline]
    pub fn edit(&self, c: char) -> char {
        (self.editor)(c)
    }

    /// The chars of `text` as the filter sees them.
    pub fn apply<'a>(&self, text: &'a str) -> impl Iterator<Item = char> + 'a {
        let (predicate, editor) = (self.predicate, self.editor);
        text.chars().filter(move |&c| predicate(c)).map(editor)
    }
}

impl Default for CharFilter {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for CharFilter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CharFilter {}

impl Debug for CharFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CharFilter").field(&self.name).finish()
    }
}

/// Hashing and equality over the chars a [`CharFilter`] keeps.
///
/// Replacing the filter of a populated container invalidates every slot
/// placement, so containers only accept a new strategy through
/// `set_strategy`, which clears them first.
///
/// # Examples
///
/// ```rust
/// use probe_hash::CharFilter;
/// use probe_hash::Filtered;
/// use probe_hash::FilteredStringSet;
///
/// let filter = CharFilter::new("LettersUpper", char::is_alphabetic, |c| c.to_ascii_uppercase());
/// let mut set = FilteredStringSet::with_strategy(Filtered::new(filter));
/// set.insert("Hello, World!".to_string());
/// assert!(set.contains("HELLOWORLD"));
/// assert!(!set.contains("HELL"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Filtered<H = DefaultHashBuilder> {
    filter: CharFilter,
    hasher: H,
}

impl Filtered {
    /// Strategy for `filter` with the default hasher.
    pub fn new(filter: CharFilter) -> Self {
        Self::with_hasher(filter, DefaultHashBuilder::default())
    }
}

impl<H> Filtered<H> {
    /// Strategy for `filter` hashing with `hasher`.
    pub fn with_hasher(filter: CharFilter, hasher: H) -> Self {
        Self { filter, hasher }
    }

    /// The active filter.
    pub fn filter(&self) -> &CharFilter {
        &self.filter
    }
}

impl<K, H> Strategy<K> for Filtered<H>
where
    K: AsRef<str> + ?Sized,
    H: BuildHasher,
{
    fn hash(&self, key: &K) -> u64 {
        hash_chars(&self.hasher, self.filter.apply(key.as_ref()))
    }

    fn equate(&self, left: &K, right: &K) -> bool {
        self.filter
            .apply(left.as_ref())
            .eq(self.filter.apply(right.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case_insensitive::fold;

    const LETTERS_UPPER: CharFilter = CharFilter::new("LettersUpper", char::is_alphabetic, fold);

    fn equate(filter: CharFilter, a: &str, b: &str) -> bool {
        let strategy = Filtered::new(filter);
        let equal = Strategy::<str>::equate(&strategy, a, b);
        if equal {
            assert_eq!(
                Strategy::<str>::hash(&strategy, a),
                Strategy::<str>::hash(&strategy, b)
            );
        }
        equal
    }

    #[test]
    fn letters_uppercased() {
        assert!(equate(LETTERS_UPPER, "Hello, World!", "HELLOWORLD"));
        assert!(!equate(LETTERS_UPPER, "Hello", "Hell"));
        assert!(equate(LETTERS_UPPER, "a-b-c", "ABC"));
    }

    #[test]
    fn identity_filter_is_plain_equality() {
        assert!(equate(CharFilter::IDENTITY, "abc", "abc"));
        assert!(!equate(CharFilter::IDENTITY, "abc", "ABC"));
        assert!(!equate(CharFilter::IDENTITY, "a b", "ab"));
    }

    #[test]
    fn predicate_only_and_editor_only() {
        let digits = CharFilter::with_predicate("Digits", |c| c.is_ascii_digit());
        assert!(equate(digits, "(555) 010-2233", "5550102233"));

        let upper = CharFilter::with_editor("Upper", fold);
        assert!(equate(upper, "MiXeD", "mixed"));
        assert!(!equate(upper, "mixed ", "mixed"));
    }

    #[test]
    fn filters_compare_by_name() {
        let a = CharFilter::with_predicate("Same", char::is_alphabetic);
        let b = CharFilter::with_predicate("Same", char::is_numeric);
        assert_eq!(a, b);
        assert_ne!(a, CharFilter::IDENTITY);
        assert_eq!(CharFilter::default(), CharFilter::IDENTITY);
    }
}
