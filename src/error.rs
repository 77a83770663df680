use thiserror::Error;

/// Errors reported by container configuration and index- or cursor-based
/// mutators.
///
/// Lookups that can simply miss return `Option` instead; these variants are
/// reserved for calls the caller should not have made.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A table was requested with zero slots.
    #[error("capacity must be positive")]
    ZeroCapacity,

    /// The load factor was NaN or outside `(0, 1]`.
    #[error("load factor must be in (0, 1], got {0}")]
    InvalidLoadFactor(f32),

    /// The requested capacity does not fit in a power-of-two `usize`.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// An index-based operation addressed a position past the end.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The rejected index
        index: usize,
        /// The length it was checked against
        len: usize,
    },

    /// A cursor was asked to remove before `next` returned an element, or
    /// twice for the same element.
    #[error("no current element; call next() before remove()")]
    NoCurrentElement,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        assert_eq!(
            Error::IndexOutOfBounds { index: 4, len: 2 }.to_string(),
            "index 4 out of bounds for length 2"
        );
        assert_eq!(
            Error::InvalidLoadFactor(1.5).to_string(),
            "load factor must be in (0, 1], got 1.5"
        );
    }

    #[test]
    fn check_index_is_exclusive() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(Error::IndexOutOfBounds { index: 1, len: 1 })
        );
    }
}
