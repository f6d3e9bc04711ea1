//! The allocator seam between node containers and their memory.
//!
//! A container asks its storage for a slot when it creates a node and hands
//! the slot back when the node dies. The key it gets in between is the only
//! way the container refers to the node, so every link in a list or tree is
//! a key into the storage that produced it.

use crate::Key;

/// Slot allocator handing out stable keys.
///
/// Node containers call [`try_insert`](Storage::try_insert) to allocate a
/// node and [`remove`](Storage::remove) to free it. Between the two the key
/// addresses the same value, however many other slots come and go.
///
/// # Safety
///
/// Containers dereference keys with the unchecked accessors, trusting the
/// storage to honour this contract. An implementation must guarantee:
///
/// - a key returned by `try_insert` stays occupied, and keeps addressing the
///   inserted value, until it is removed
/// - `try_insert` never returns [`Key::NONE`] and never returns a key that
///   is already occupied
/// - `get`/`get_mut`/`remove` return `Some` exactly for occupied keys
/// - the unchecked accessors behave like their checked counterparts for
///   every occupied key
///
/// A storage that is out of room reports it through `Err`; it must not
/// hand out an unbacked key.
///
/// Implementing the trait therefore takes `unsafe impl`:
///
/// ```compile_fail
/// use pooled_arena::Storage;
///
/// struct Never;
///
/// impl Storage<u8> for Never {
///     type Key = u32;
///     type Error = ();
///
///     fn try_insert(&mut self, _: u8) -> Result<u32, ()> { Err(()) }
///     fn remove(&mut self, _: u32) -> Option<u8> { None }
///     fn get(&self, _: u32) -> Option<&u8> { None }
///     fn get_mut(&mut self, _: u32) -> Option<&mut u8> { None }
///     fn len(&self) -> usize { 0 }
///     fn capacity(&self) -> usize { 0 }
///     unsafe fn get_unchecked(&self, _: u32) -> &u8 { unreachable!() }
///     unsafe fn get_unchecked_mut(&mut self, _: u32) -> &mut u8 { unreachable!() }
///     unsafe fn remove_unchecked(&mut self, _: u32) -> u8 { unreachable!() }
/// }
/// ```
///
/// # Implementations
///
/// - [`Arena<T, K>`](crate::Arena) - fixed slot count, no growth
/// - `slab::Slab<T>` - reallocates on demand (feature `slab`)
pub unsafe trait Storage<T> {
    /// Handle for an occupied slot.
    type Key: Key;

    /// Why an allocation was refused. [`Full<T>`](crate::Full) for the
    /// arena; growable storage never refuses.
    type Error;

    /// Allocates a slot holding `value`.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Self::Error>;

    /// Frees the slot at `key` and returns its value. `None` if vacant.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Value at `key`, if occupied.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Mutable value at `key`, if occupied.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Occupied slots.
    fn len(&self) -> usize;

    /// Slots that can be occupied before an allocation is refused or the
    /// storage grows.
    fn capacity(&self) -> usize;

    /// Returns `true` if nothing is allocated.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `key` without the occupancy check.
    ///
    /// # Safety
    ///
    /// `key` must be occupied.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Mutable value at `key` without the occupancy check.
    ///
    /// # Safety
    ///
    /// `key` must be occupied.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;

    /// Frees `key` without the occupancy check.
    ///
    /// # Safety
    ///
    /// `key` must be occupied.
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T;
}

// =============================================================================
// Growable storage
// =============================================================================

// Safety: slab keys are vacant-list indices that stay put until removed, and
// a slab allocates by growing, so it never reaches `usize::MAX` entries.
#[cfg(feature = "slab")]
unsafe impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;
    type Error = core::convert::Infallible;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Self::Error> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, key: Self::Key) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: Self::Key) -> Option<&T> {
        slab::Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T> {
        slab::Slab::get_mut(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        slab::Slab::capacity(self)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T {
        unsafe { slab::Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, key) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T {
        slab::Slab::remove(self, key)
    }
}
