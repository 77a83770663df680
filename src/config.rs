use crate::error::Error;
use crate::error::Result;

/// Table length used by `new()` constructors.
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used by `new()` constructors.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Validated sizing parameters shared by every container.
///
/// `capacity` is the requested number of slots; tables round it up to the
/// next power of two. `load_factor` bounds how full a table may get before it
/// doubles.
///
/// # Examples
///
/// ```rust
/// use probe_hash::Error;
/// use probe_hash::TableConfig;
///
/// let config = TableConfig::new(100, 0.5).unwrap();
/// assert_eq!(config.capacity(), 100);
///
/// assert_eq!(TableConfig::new(0, 0.5), Err(Error::ZeroCapacity));
/// assert_eq!(
///     TableConfig::new(8, 1.5),
///     Err(Error::InvalidLoadFactor(1.5))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    capacity: usize,
    load_factor: f32,
}

impl TableConfig {
    /// Creates a configuration, rejecting a zero capacity, a capacity whose
    /// power-of-two rounding overflows, and any load factor outside `(0, 1]`.
    pub fn new(capacity: usize, load_factor: f32) -> Result<Self> {
        let config = Self {
            capacity: validate_capacity(capacity)?,
            load_factor: validate_load_factor(load_factor)?,
        };
        Ok(config)
    }

    /// Default load factor with the given capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Default capacity with the given load factor.
    pub fn with_load_factor(load_factor: f32) -> Result<Self> {
        Self::new(DEFAULT_CAPACITY, load_factor)
    }

    /// Requested slot count, before power-of-two rounding.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum occupancy ratio before a table grows.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

pub(crate) fn validate_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(Error::ZeroCapacity);
    }
    capacity
        .checked_next_power_of_two()
        .ok_or(Error::CapacityOverflow)?;
    Ok(capacity)
}

pub(crate) fn validate_load_factor(load_factor: f32) -> Result<f32> {
    // NaN fails both comparisons.
    if load_factor > 0.0 && load_factor <= 1.0 {
        Ok(load_factor)
    } else {
        Err(Error::InvalidLoadFactor(load_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = TableConfig::default();
        assert_eq!(
            TableConfig::new(config.capacity(), config.load_factor()),
            Ok(config)
        );
    }

    #[test]
    fn rejects_bad_load_factors() {
        for lf in [0.0, -0.25, 1.01, f32::INFINITY] {
            assert_eq!(
                TableConfig::with_load_factor(lf),
                Err(Error::InvalidLoadFactor(lf))
            );
        }
        assert!(matches!(
            TableConfig::with_load_factor(f32::NAN),
            Err(Error::InvalidLoadFactor(_))
        ));
        assert!(TableConfig::with_load_factor(1.0).is_ok());
    }

    #[test]
    fn rejects_bad_capacities() {
        assert_eq!(TableConfig::with_capacity(0), Err(Error::ZeroCapacity));
        assert_eq!(
            TableConfig::with_capacity(usize::MAX),
            Err(Error::CapacityOverflow)
        );
        assert!(TableConfig::with_capacity(1).is_ok());
    }
}
