//! Fixed-capacity arena with bitmap occupancy and a LIFO free stack.

use core::fmt;
use core::marker::PhantomData;
use core::mem::MaybeUninit;

use crate::{ArenaBuilder, Key, Storage};

/// Error returned when a fixed-capacity arena has no free slot.
///
/// Carries the rejected value so the caller can recover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arena is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Fixed-capacity slot arena.
///
/// Everything is allocated once at construction:
/// - Entry array (`MaybeUninit<T>`)
/// - Occupancy bitmap (`u64` words)
/// - Free stack (keys)
///
/// Slots are uninitialized until a value is inserted; only slots whose
/// occupancy bit is set are ever read or dropped. Capacity is exact, and one
/// key value (`K::NONE`) is reserved as the null link.
///
/// # Example
///
/// ```
/// use pooled_arena::{Arena, Storage};
///
/// let mut arena: Arena<u64> = Arena::with_capacity(2);
/// let a = arena.try_insert(1).unwrap();
/// let _b = arena.try_insert(2).unwrap();
/// assert_eq!(arena.try_insert(3).unwrap_err().into_inner(), 3);
///
/// assert_eq!(arena.remove(a), Some(1));
/// assert_eq!(arena.try_insert(4).unwrap(), a); // slot reused
/// ```
pub struct Arena<T, K: Key = u32> {
    entries: Box<[MaybeUninit<T>]>,
    occupied: Box<[u64]>,
    free: Box<[K]>,
    /// Number of keys on the free stack.
    free_len: usize,
    _marker: PhantomData<K>,
}

impl<T, K: Key> Arena<T, K> {
    /// Creates an arena with exactly `capacity` slots.
    ///
    /// Use [`ArenaBuilder`] for a non-panicking constructor.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the key type.
    pub fn with_capacity(capacity: usize) -> Self {
        match ArenaBuilder::new().capacity(capacity).build() {
            Ok(arena) => arena,
            Err(e) => panic!("invalid arena capacity: {e}"),
        }
    }

    /// Allocates the slot array, bitmap and free stack. Capacity is validated
    /// by the builder.
    pub(crate) fn allocate(capacity: usize) -> Self {
        let entries = (0..capacity).map(|_| MaybeUninit::uninit()).collect();
        let occupied = vec![0u64; bitmap_words(capacity)].into_boxed_slice();
        // Reverse order so the first insert pops slot 0.
        let free = (0..capacity)
            .rev()
            .map(K::from_usize)
            .collect::<Vec<_>>()
            .into_boxed_slice();

        tracing::trace!(capacity, slot_size = core::mem::size_of::<T>(), "arena allocated");

        Self {
            entries,
            occupied,
            free,
            free_len: capacity,
            _marker: PhantomData,
        }
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.capacity() - self.free_len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free_len == self.capacity()
    }

    /// Returns `true` if all slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_len == 0
    }

    /// Returns `true` if `key` refers to an occupied slot.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        let i = key.as_usize();
        i < self.capacity() && self.is_occupied(i)
    }

    /// Drops every stored value and makes all slots available again.
    ///
    /// Keys held by containers built on this arena become dangling; only
    /// call this after those containers have forgotten their keys.
    pub fn clear(&mut self) {
        for i in 0..self.capacity() {
            if self.is_occupied(i) {
                // Safety: slot is occupied
                unsafe { self.entries[i].assume_init_drop() };
            }
        }

        self.occupied.fill(0);

        let capacity = self.capacity();
        for (slot, i) in self.free.iter_mut().zip((0..capacity).rev()) {
            *slot = K::from_usize(i);
        }
        self.free_len = capacity;
    }

    #[inline]
    fn is_occupied(&self, idx: usize) -> bool {
        (self.occupied[idx / 64] & (1 << (idx % 64))) != 0
    }

    #[inline]
    fn set_occupied(&mut self, idx: usize) {
        self.occupied[idx / 64] |= 1 << (idx % 64);
    }

    #[inline]
    fn set_vacant(&mut self, idx: usize) {
        self.occupied[idx / 64] &= !(1 << (idx % 64));
    }
}

// Safety: keys come only from the free stack, which holds each vacant slot
// once and never holds `K::NONE`; the bitmap tracks occupancy for the checked
// accessors.
unsafe impl<T, K: Key> Storage<T> for Arena<T, K> {
    type Key = K;
    type Error = Full<T>;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        if self.free_len == 0 {
            tracing::debug!(capacity = self.capacity(), "arena exhausted");
            return Err(Full(value));
        }

        self.free_len -= 1;
        let key = self.free[self.free_len];
        let i = key.as_usize();

        self.entries[i].write(value);
        self.set_occupied(i);

        Ok(key)
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        if !self.contains(key) {
            return None;
        }

        // Safety: occupancy checked above
        Some(unsafe { self.remove_unchecked(key) })
    }

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        if !self.contains(key) {
            return None;
        }

        // Safety: occupancy checked above
        Some(unsafe { self.entries[key.as_usize()].assume_init_ref() })
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        if !self.contains(key) {
            return None;
        }

        // Safety: occupancy checked above
        Some(unsafe { self.entries[key.as_usize()].assume_init_mut() })
    }

    #[inline]
    fn len(&self) -> usize {
        Arena::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        Arena::capacity(self)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        unsafe { self.entries.get_unchecked(key.as_usize()).assume_init_ref() }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        unsafe {
            self.entries
                .get_unchecked_mut(key.as_usize())
                .assume_init_mut()
        }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: K) -> T {
        let i = key.as_usize();

        self.set_vacant(i);
        let value = unsafe { self.entries[i].assume_init_read() };

        self.free[self.free_len] = key;
        self.free_len += 1;

        value
    }
}

impl<T, K: Key> Drop for Arena<T, K> {
    fn drop(&mut self) {
        for i in 0..self.capacity() {
            if self.is_occupied(i) {
                // Safety: slot is occupied
                unsafe { self.entries[i].assume_init_drop() };
            }
        }
    }
}

impl<T, K: Key> fmt::Debug for Arena<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

#[inline]
const fn bitmap_words(capacity: usize) -> usize {
    capacity.div_ceil(64)
}
