//! Fixed-capacity buffer that carries its own element behaviour.

use core::fmt;
use core::ops::{Deref, DerefMut};
use std::io;

use crate::{Array, ElementOps, IntOps, StrOps, algo};

/// An [`Array`] bundled with the [`ElementOps`] that sort, search and print
/// it.
///
/// Every [`Array`] operation is reachable through `Deref`; `sort`, `search`
/// and printing need no behaviour arguments. Like [`Array`], the buffer is
/// either owned or attached to caller memory for `'a`.
///
/// ```
/// use pooled_collections::PolyArray;
///
/// let mut names = PolyArray::strs(5);
/// names.append(&["zero", "one", "two", "three", "four"])?;
/// names.sort();
/// assert_eq!(names.to_string(), "four one three two zero");
/// assert_eq!(names.search(&"two"), Some(&"two"));
/// # Ok::<(), pooled_collections::Error>(())
/// ```
pub struct PolyArray<'a, T, O> {
    array: Array<'a, T>,
    ops: O,
}

impl<T: Default, O: ElementOps<T>> PolyArray<'_, T, O> {
    /// Allocates `capacity` slots driven by `ops`.
    pub fn new(capacity: usize, ops: O) -> Self {
        Self {
            array: Array::with_capacity(capacity),
            ops,
        }
    }
}

impl PolyArray<'_, i32, IntOps> {
    /// Integer buffer with numeric ordering and decimal printing.
    pub fn ints(capacity: usize) -> Self {
        Self::new(capacity, IntOps)
    }
}

impl<T: AsRef<str> + Default> PolyArray<'_, T, StrOps> {
    /// String buffer with lexicographic ordering.
    pub fn strs(capacity: usize) -> Self {
        Self::new(capacity, StrOps)
    }
}

impl<'a, T, O: ElementOps<T>> PolyArray<'a, T, O> {
    /// Drives the caller's `buffer` with `ops`. The buffer starts empty.
    pub fn attach(buffer: &'a mut [T], ops: O) -> Self {
        Self {
            array: Array::attach(buffer),
            ops,
        }
    }

    /// The stored element behaviour.
    #[inline]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Sorts the live elements with the stored ordering predicate.
    pub fn sort(&mut self) {
        let ops = &self.ops;
        algo::sort_by_less(self.array.as_mut_slice(), |a, b| ops.less(a, b));
    }

    /// Binary search with the stored comparison. The buffer must be sorted.
    pub fn search(&self, target: &T) -> Option<&T> {
        let ops = &self.ops;
        self.array.search(target, &|a: &T, b: &T| ops.compare(a, b))
    }

    /// Writes the live elements separated by spaces, then a newline.
    pub fn print_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{self}")
    }

    /// Consumes the wrapper, keeping the buffer.
    pub fn into_array(self) -> Array<'a, T> {
        self.array
    }
}

impl<'a, T, O> Deref for PolyArray<'a, T, O> {
    type Target = Array<'a, T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

impl<T, O> DerefMut for PolyArray<'_, T, O> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.array
    }
}

impl<T, O: ElementOps<T>> fmt::Display for PolyArray<'_, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.array.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            self.ops.fmt(value, f)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug, O: fmt::Debug> fmt::Debug for PolyArray<'_, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyArray")
            .field("array", &self.array)
            .field("ops", &self.ops)
            .finish()
    }
}
