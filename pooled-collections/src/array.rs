//! Fixed-capacity contiguous buffer.
//!
//! The backing store is either owned (allocated once by
//! [`Array::with_capacity`]) or borrowed from the caller
//! ([`Array::attach`]). Either way the capacity never changes; elements
//! `[0, len)` are the logical contents.
//!
//! ```
//! use pooled_collections::Array;
//!
//! let mut arr = Array::with_capacity(10);
//! arr.append(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 0])?;
//! arr.sort();
//! assert_eq!(arr.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! assert_eq!(arr.search_ord(&7), Some(&7));
//! assert_eq!(arr.search_ord(&55), None);
//! # Ok::<(), pooled_collections::Error>(())
//! ```

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::{Comparator, Error, Result, algo};

/// Where the elements live.
enum Backing<'a, T> {
    Owned(Box<[T]>),
    Borrowed(&'a mut [T]),
}

impl<T> Deref for Backing<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        match self {
            Backing::Owned(boxed) => &boxed[..],
            Backing::Borrowed(slice) => &slice[..],
        }
    }
}

impl<T> DerefMut for Backing<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        match self {
            Backing::Owned(boxed) => &mut boxed[..],
            Backing::Borrowed(slice) => &mut slice[..],
        }
    }
}

/// Fixed-capacity buffer over an owned or borrowed slice.
///
/// Dereferences to the live elements `[0, len)`, so every slice method
/// works on it directly.
pub struct Array<'a, T> {
    backing: Backing<'a, T>,
    count: usize,
}

impl<'a, T: Default> Array<'a, T> {
    /// Allocates `capacity` default-initialized slots. The array starts empty.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| T::default()).collect();
        Self {
            backing: Backing::Owned(slots),
            count: 0,
        }
    }
}

impl<'a, T> Array<'a, T> {
    /// Wraps caller-owned memory without allocating.
    ///
    /// Capacity is the slice length and the array starts empty. The memory
    /// is handed back by [`detach`](Self::detach).
    ///
    /// ```
    /// use pooled_collections::Array;
    ///
    /// let mut storage = [0u8; 4];
    /// let mut arr = Array::attach(&mut storage);
    /// arr.push(7)?;
    /// let raw = arr.detach().ok().unwrap();
    /// assert_eq!(raw, &[7, 0, 0, 0]);
    /// # Ok::<(), pooled_collections::Error>(())
    /// ```
    pub fn attach(buffer: &'a mut [T]) -> Self {
        Self {
            backing: Backing::Borrowed(buffer),
            count: 0,
        }
    }

    /// Releases the wrapper and returns the caller's slice.
    ///
    /// An array that owns its storage is returned unchanged in `Err`.
    pub fn detach(self) -> core::result::Result<&'a mut [T], Self> {
        match self.backing {
            Backing::Borrowed(slice) => Ok(slice),
            owned @ Backing::Owned(_) => Err(Self {
                backing: owned,
                count: self.count,
            }),
        }
    }

    /// Returns `true` if the storage belongs to the caller.
    #[inline]
    pub fn is_attached(&self) -> bool {
        matches!(self.backing, Backing::Borrowed(_))
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.backing.len()
    }

    /// Slots left for appending.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.count
    }

    /// Returns `true` if no slots are left for appending.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.backing[..self.count]
    }

    /// Live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.backing[..self.count]
    }

    /// Forgets every element. Slots keep their values until overwritten.
    #[inline]
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Appends one element.
    pub fn push(&mut self, value: T) -> Result<()> {
        self.reserve(1)?;
        self.backing[self.count] = value;
        self.count += 1;
        Ok(())
    }

    /// Element at `index`, which must be below [`len`](Self::len).
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(Error::OutOfBounds {
            index,
            bound: self.count,
        })
    }

    /// Mutable element at `index`, which must be below [`len`](Self::len).
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let bound = self.count;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfBounds { index, bound })
    }

    /// Overwrites the slot at `index`.
    ///
    /// The bound is the capacity, not the length: writing past the live
    /// elements is allowed and does not change [`len`](Self::len). A later
    /// append overwrites such slots.
    pub fn set(&mut self, value: T, index: usize) -> Result<()> {
        let bound = self.capacity();
        let slot = self
            .backing
            .get_mut(index)
            .ok_or(Error::OutOfBounds { index, bound })?;
        *slot = value;
        Ok(())
    }

    /// Sorts the live elements under a strict ordering predicate.
    pub fn sort_by_less<F>(&mut self, less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        algo::sort_by_less(self.as_mut_slice(), less);
    }

    /// Sorts the live elements under a comparator.
    pub fn sort_by<C>(&mut self, cmp: &C)
    where
        C: Comparator<T> + ?Sized,
    {
        algo::sort_by(self.as_mut_slice(), cmp);
    }

    /// Binary search of the live elements, which must be sorted under `cmp`.
    pub fn search<C>(&self, target: &T, cmp: &C) -> Option<&T>
    where
        C: Comparator<T> + ?Sized,
    {
        algo::search_all(self.as_slice(), target, cmp).map(|i| &self.as_slice()[i])
    }

    /// Binary search returning the index of a match.
    pub fn position<C>(&self, target: &T, cmp: &C) -> Option<usize>
    where
        C: Comparator<T> + ?Sized,
    {
        algo::search_all(self.as_slice(), target, cmp)
    }

    /// Writes `func(&src[i], &mut self[i])` for every live element.
    ///
    /// Fails if `src` holds fewer elements than `self`.
    pub fn transform<S, F>(&mut self, src: &[S], func: F) -> Result<()>
    where
        F: FnMut(&S, &mut T),
    {
        if src.len() < self.count {
            return Err(Error::LengthMismatch {
                expected: self.count,
                actual: src.len(),
            });
        }
        algo::transform(self.as_mut_slice(), src, func);
        Ok(())
    }

    /// Replaces every live element with `func(&element)`.
    pub fn transform_in_place<F>(&mut self, func: F)
    where
        F: FnMut(&T) -> T,
    {
        algo::transform_in_place(self.as_mut_slice(), func);
    }

    /// Applies `func` to every live element.
    pub fn modify<F>(&mut self, func: F)
    where
        F: FnMut(&mut T),
    {
        algo::modify(self.as_mut_slice(), func);
    }

    /// Calls `func` on every live element in order.
    pub fn visit<F>(&self, func: F)
    where
        F: FnMut(&T),
    {
        algo::visit(self.as_slice(), func);
    }

    fn reserve(&self, requested: usize) -> Result<()> {
        let remaining = self.remaining();
        if requested > remaining {
            tracing::debug!(requested, remaining, "array capacity exceeded");
            return Err(Error::CapacityExceeded {
                requested,
                remaining,
            });
        }
        Ok(())
    }
}

impl<T: Clone> Array<'_, T> {
    /// Appends clones of `data`.
    ///
    /// All or nothing: fails without writing if `data` does not fit.
    pub fn append(&mut self, data: &[T]) -> Result<()> {
        self.reserve(data.len())?;
        let end = self.count + data.len();
        self.backing[self.count..end].clone_from_slice(data);
        self.count = end;
        Ok(())
    }
}

impl<T: Ord> Array<'_, T> {
    /// Sorts the live elements by `Ord`.
    pub fn sort(&mut self) {
        algo::sort(self.as_mut_slice());
    }

    /// Binary search by `Ord`.
    pub fn search_ord(&self, target: &T) -> Option<&T> {
        self.search(target, &crate::Natural)
    }
}

impl<T> Deref for Array<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Array<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Array<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'s, T> IntoIterator for &'s Array<'_, T> {
    type Item = &'s T;
    type IntoIter = core::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("capacity", &self.capacity())
            .field("attached", &self.is_attached())
            .field("elements", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Natural;

    #[test]
    fn fresh_array_is_empty() {
        let arr: Array<'_, i32> = Array::with_capacity(10);
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.capacity(), 10);
        assert_eq!(arr.remaining(), 10);
        assert!(arr.is_empty());
        assert!(!arr.is_attached());
    }

    #[test]
    fn append_sort_search() {
        let mut arr = Array::with_capacity(10);
        arr.append(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
        assert!(arr.is_full());

        arr.sort();
        assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(arr.search_ord(&7), Some(&7));
        assert_eq!(arr.position(&7, &Natural), Some(7));
        assert_eq!(arr.search_ord(&55), None);
    }

    #[test]
    fn append_past_capacity_is_rejected_whole() {
        let mut arr = Array::with_capacity(3);
        arr.append(&[1, 2]).unwrap();

        let err = arr.append(&[3, 4]).unwrap_err();
        assert_eq!(
            err,
            Error::CapacityExceeded {
                requested: 2,
                remaining: 1
            }
        );
        assert_eq!(arr.len(), 2);

        arr.push(3).unwrap();
        assert!(arr.push(4).is_err());
    }

    #[test]
    fn at_checks_count() {
        let mut arr = Array::with_capacity(4);
        arr.append(&[10, 20]).unwrap();

        assert_eq!(arr.at(1), Ok(&20));
        assert_eq!(arr.at(2), Err(Error::OutOfBounds { index: 2, bound: 2 }));

        *arr.at_mut(0).unwrap() = 11;
        assert_eq!(arr[0], 11);
    }

    #[test]
    fn set_checks_capacity_not_count() {
        let mut arr = Array::with_capacity(4);
        arr.push(1).unwrap();

        arr.set(9, 3).unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(
            arr.set(9, 4),
            Err(Error::OutOfBounds { index: 4, bound: 4 })
        );

        // the tail write is overwritten by a later append
        arr.append(&[2, 3, 4]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn attach_and_detach() {
        let mut storage = [0i64; 5];
        {
            let mut arr = Array::attach(&mut storage);
            assert!(arr.is_attached());
            assert_eq!(arr.capacity(), 5);
            arr.append(&[3, 1, 2]).unwrap();
            arr.sort();
            let raw = arr.detach().ok().unwrap();
            assert_eq!(raw, &[1, 2, 3, 0, 0]);
        }
        assert_eq!(storage, [1, 2, 3, 0, 0]);
    }

    #[test]
    fn detach_owned_gives_array_back() {
        let mut arr = Array::with_capacity(2);
        arr.push("x").unwrap();
        let arr = arr.detach().unwrap_err();
        assert_eq!(arr.as_slice(), &["x"]);
    }

    #[test]
    fn strings_and_custom_order() {
        let mut arr = Array::with_capacity(5);
        arr.append(&["zero", "one", "two", "three", "four"]).unwrap();
        arr.sort_by_less(|a, b| a < b);
        assert_eq!(arr.as_slice(), &["four", "one", "three", "two", "zero"]);

        arr.sort_by(&|a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));
        assert_eq!(arr.as_slice(), &["one", "two", "four", "zero", "three"]);
    }

    #[test]
    fn transform_requires_long_enough_source() {
        let mut arr = Array::with_capacity(4);
        arr.append(&[0u32; 3]).unwrap();

        let err = arr.transform(&[1u8, 2], |s, d| *d = u32::from(*s)).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );

        arr.transform(&[1u8, 2, 3, 4], |s, d| *d = u32::from(*s) * 100)
            .unwrap();
        assert_eq!(arr.as_slice(), &[100, 200, 300]);
    }

    #[test]
    fn modify_visit_transform_in_place() {
        let mut arr = Array::with_capacity(3);
        arr.append(&[1, 2, 3]).unwrap();
        arr.modify(|v| *v *= 2);
        arr.transform_in_place(|v| v + 1);

        let mut seen = Vec::new();
        arr.visit(|v| seen.push(*v));
        assert_eq!(seen, [3, 5, 7]);
        assert_eq!(arr.iter().sum::<i32>(), 15);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut arr = Array::with_capacity(2);
        arr.append(&[1, 2]).unwrap();
        arr.clear();
        assert!(arr.is_empty());
        assert_eq!(arr.remaining(), 2);
    }
}
