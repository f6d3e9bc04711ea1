//! Generic algorithm engine over contiguous element ranges.
//!
//! Every bulk operation of [`Array`](crate::Array) and
//! [`PolyArray`](crate::PolyArray) is a thin adapter over the functions
//! here. They work on any slice, so they can also be used directly on
//! caller-owned buffers.
//!
//! ```
//! use pooled_collections::algo;
//! use pooled_collections::Natural;
//!
//! let mut values = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
//! algo::sort_by_less(&mut values, |a, b| a < b);
//! assert_eq!(values, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
//!
//! assert_eq!(algo::search(&values, &7, 0, 9, &Natural), Some(7));
//! assert_eq!(algo::search(&values, &55, 0, 9, &Natural), None);
//! ```

use core::cmp::Ordering;
use core::iter::{Product, Sum};
use core::ops::Mul;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::Comparator;

// =============================================================================
// Core primitives: sort, search, transform, modify
// =============================================================================

/// Sorts into non-descending order by `Ord`. Not stable.
#[inline]
pub fn sort<T: Ord>(buf: &mut [T]) {
    buf.sort_unstable();
}

/// Sorts into non-descending order under a comparator. Not stable.
#[inline]
pub fn sort_by<T, C>(buf: &mut [T], cmp: &C)
where
    C: Comparator<T> + ?Sized,
{
    buf.sort_unstable_by(|a, b| cmp.compare(a, b));
}

/// Sorts into non-descending order under a strict "less than" predicate.
/// Not stable.
///
/// `less` must be a strict weak ordering; equivalence is derived as
/// `!less(a, b) && !less(b, a)`.
pub fn sort_by_less<T, F>(buf: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    buf.sort_unstable_by(|a, b| {
        if less(a, b) {
            Ordering::Less
        } else if less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
}

/// Bounded binary search over the inclusive index range `[low, high]`.
///
/// `buf[low..=high]` must be sorted under `cmp`. Returns the index of an
/// element comparing equal to `target`, or `None`. An empty range
/// (`low > high`) or an empty buffer is `None`; `high` past the end is
/// clamped to the last element.
pub fn search<T, C>(buf: &[T], target: &T, low: usize, high: usize, cmp: &C) -> Option<usize>
where
    C: Comparator<T> + ?Sized,
{
    let last = buf.len().checked_sub(1)?;
    let high = high.min(last);
    if low > high {
        return None;
    }

    // Half-open [lo, hi) from here on.
    let mut lo = low;
    let mut hi = high + 1;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match cmp.compare(target, &buf[mid]) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => hi = mid,
            Ordering::Greater => lo = mid + 1,
        }
    }

    None
}

/// Binary search over the whole buffer.
#[inline]
pub fn search_all<T, C>(buf: &[T], target: &T, cmp: &C) -> Option<usize>
where
    C: Comparator<T> + ?Sized,
{
    search(buf, target, 0, buf.len().saturating_sub(1), cmp)
}

/// Applies `func(&src[i], &mut dest[i])` element-wise.
///
/// Processes `min(dest.len(), src.len())` elements and returns that count.
pub fn transform<S, D, F>(dest: &mut [D], src: &[S], mut func: F) -> usize
where
    F: FnMut(&S, &mut D),
{
    let n = dest.len().min(src.len());
    for (s, d) in src.iter().zip(dest.iter_mut()) {
        func(s, d);
    }
    n
}

/// Replaces every element with `func(&element)`.
///
/// The in-place form of [`transform`], where source and destination are the
/// same buffer.
pub fn transform_in_place<T, F>(buf: &mut [T], mut func: F)
where
    F: FnMut(&T) -> T,
{
    for value in buf.iter_mut() {
        let next = func(value);
        *value = next;
    }
}

/// Applies `func` to every element in place.
#[inline]
pub fn modify<T, F>(buf: &mut [T], func: F)
where
    F: FnMut(&mut T),
{
    buf.iter_mut().for_each(func);
}

// =============================================================================
// Read-only walks and reductions
// =============================================================================

/// Calls `func` on every element in order.
#[inline]
pub fn visit<T, F>(buf: &[T], func: F)
where
    F: FnMut(&T),
{
    buf.iter().for_each(func);
}

/// Sum of `project(element)` over the buffer.
#[inline]
pub fn accumulate<T, N, F>(buf: &[T], project: F) -> N
where
    F: FnMut(&T) -> N,
    N: Sum,
{
    buf.iter().map(project).sum()
}

/// Product of `project(element)` over the buffer.
#[inline]
pub fn product<T, N, F>(buf: &[T], project: F) -> N
where
    F: FnMut(&T) -> N,
    N: Product,
{
    buf.iter().map(project).product()
}

/// `sum(project(a[i]) * project(b[i]))` over the common prefix.
pub fn inner_product<T, N, F>(a: &[T], b: &[T], mut project: F) -> N
where
    F: FnMut(&T) -> N,
    N: Mul<Output = N> + Sum,
{
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let lhs = project(x);
            let rhs = project(y);
            lhs * rhs
        })
        .sum()
}

/// Number of elements satisfying `pred`.
pub fn count_if<T, F>(buf: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    buf.iter().filter(|v| pred(v)).count()
}

/// `true` if both buffers have the same length and every pair compares equal.
pub fn equal<T, C>(a: &[T], b: &[T], cmp: &C) -> bool
where
    C: Comparator<T> + ?Sized,
{
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| cmp.compare(x, y) == Ordering::Equal)
}

// =============================================================================
// Mutating helpers
// =============================================================================

/// Overwrites every element equal to `old` with a clone of `new`.
///
/// Returns the number of elements replaced.
pub fn replace<T, C>(buf: &mut [T], old: &T, new: &T, cmp: &C) -> usize
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    replace_if(buf, new, |v| cmp.compare(v, old) == Ordering::Equal)
}

/// Overwrites every element satisfying `pred` with a clone of `new`.
///
/// Returns the number of elements replaced.
pub fn replace_if<T, F>(buf: &mut [T], new: &T, mut pred: F) -> usize
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let mut replaced = 0;
    for value in buf.iter_mut() {
        if pred(value) {
            value.clone_from(new);
            replaced += 1;
        }
    }
    replaced
}

/// Reverses the buffer in place.
#[inline]
pub fn reverse<T>(buf: &mut [T]) {
    buf.reverse();
}

/// Exchanges the first `min(a.len(), b.len())` elements of the two buffers.
///
/// Returns the number of elements exchanged.
pub fn swap_ranges<T>(a: &mut [T], b: &mut [T]) -> usize {
    let n = a.len().min(b.len());
    a[..n].swap_with_slice(&mut b[..n]);
    n
}

/// Copies `src` into the front of `dest`, last element first.
///
/// Returns the number of elements copied, `min(dest.len(), src.len())`.
pub fn copy_backward<T: Clone>(dest: &mut [T], src: &[T]) -> usize {
    let n = dest.len().min(src.len());
    for i in (0..n).rev() {
        dest[i].clone_from(&src[i]);
    }
    n
}

/// Merges two runs sorted under `less` into `dest`.
///
/// Elements of `a` win ties. Stops when `dest` is full; returns the number of
/// elements written.
pub fn merge<T, F>(dest: &mut [T], a: &[T], b: &[T], mut less: F) -> usize
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let (mut i, mut j) = (0, 0);
    let mut written = 0;

    while written < dest.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(x), Some(y)) if less(y, x) => {
                j += 1;
                y
            }
            (Some(x), _) => {
                i += 1;
                x
            }
            (None, Some(y)) => {
                j += 1;
                y
            }
            (None, None) => break,
        };
        dest[written].clone_from(next);
        written += 1;
    }

    written
}

/// Uniformly shuffles the buffer using `rng`.
#[inline]
pub fn shuffle<T, R>(buf: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    buf.shuffle(rng);
}
