//! Slot keys.
//!
//! Containers built on an arena link their nodes with keys, not pointers. A
//! key is a plain unsigned integer naming a slot; its type's maximum value
//! is held back as [`Key::NONE`], the empty link at the end of a list or
//! below a tree leaf. Narrow key types shrink every node, at the price of a
//! lower slot ceiling (`u8` keys address at most 255 slots).

/// Unsigned slot index with a reserved empty-link value.
///
/// ```
/// use pooled_arena::Key;
///
/// let link: u16 = 7;
/// assert_eq!(link.into_option(), Some(7));
/// assert_eq!(u16::NONE.into_option(), None);
/// assert_eq!(u16::from_usize(7).as_usize(), 7);
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug + 'static {
    /// The empty link. No arena slot ever has this key.
    const NONE: Self;

    /// Key of slot `val`.
    fn from_usize(val: usize) -> Self;

    /// Slot named by this key.
    fn as_usize(self) -> usize;

    /// `true` for the empty link.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// `true` for a key that names a slot.
    #[inline]
    fn is_some(self) -> bool {
        self != Self::NONE
    }

    /// `None` for the empty link, `Some(self)` otherwise.
    #[inline]
    fn into_option(self) -> Option<Self> {
        (self != Self::NONE).then_some(self)
    }
}

macro_rules! unsigned_keys {
    ($($ty:ty),*) => {$(
        impl Key for $ty {
            const NONE: Self = <$ty>::MAX;

            #[inline]
            fn from_usize(val: usize) -> Self {
                val as $ty
            }

            #[inline]
            fn as_usize(self) -> usize {
                self as usize
            }
        }
    )*};
}

unsigned_keys!(u8, u16, u32, u64, usize);
