use core::ops::Deref;

use crate::probe::Spread;
use crate::strategy::Strategy;

/// Identity hashing and equality for pointer-like keys.
///
/// Two keys are the same exactly when they point at the same place in
/// memory, regardless of what they point at. `&T`, `Rc<T>`, `Arc<T>` and
/// `Box<T>` all qualify. Since placement comes straight from the address,
/// the table's multiplier has no effect under this strategy.
///
/// Zero-sized pointees may share an address, in which case they are one key.
///
/// # Examples
///
/// ```rust
/// use std::rc::Rc;
///
/// use probe_hash::IdentitySet;
///
/// let a = Rc::new(String::from("same"));
/// let b = Rc::new(String::from("same"));
///
/// let mut set: IdentitySet<Rc<String>> = IdentitySet::new();
/// assert!(set.insert(Rc::clone(&a)));
/// assert!(set.insert(Rc::clone(&b)));
/// assert!(!set.insert(Rc::clone(&a)));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

#[inline(always)]
fn address<P: Deref>(pointer: &P) -> usize {
    (&**pointer as *const P::Target).cast::<()>() as usize
}

impl<P: Deref> Strategy<P> for Identity {
    #[inline]
    fn hash(&self, key: &P) -> u64 {
        let address = address(key) as u64;
        // Fold the always-zero alignment bits into the low bits.
        address ^ (address >> 4) ^ (address >> 16)
    }

    #[inline]
    fn equate(&self, left: &P, right: &P) -> bool {
        address(left) == address(right)
    }

    #[inline]
    fn place(&self, key: &P, spread: &Spread) -> usize {
        self.hash(key) as usize & spread.mask()
    }
}
