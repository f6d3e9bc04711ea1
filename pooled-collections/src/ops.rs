//! Pluggable element behaviour: comparison, ordering and printing.
//!
//! [`Comparator`] is what the tree and the search algorithms are keyed by.
//! [`ElementOps`] is the bundle a [`PolyArray`](crate::PolyArray) stores so
//! its sort, search and print calls need no arguments.

use core::cmp::Ordering;
use core::fmt;

/// Three-way comparison between two elements.
///
/// Implemented for [`Natural`] (uses `Ord`) and for any
/// `Fn(&T, &T) -> Ordering` closure or function.
///
/// ```
/// use core::cmp::Ordering;
/// use pooled_collections::{Comparator, Natural};
///
/// assert_eq!(Natural.compare(&1, &2), Ordering::Less);
///
/// let reversed = |a: &i32, b: &i32| b.cmp(a);
/// assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Behaviour bundle stored by a [`PolyArray`](crate::PolyArray).
pub trait ElementOps<T> {
    /// Three-way comparison used by `search`.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Strict ordering predicate used by `sort`.
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Writes one element.
    fn fmt(&self, value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Numeric comparison and decimal printing for `i32` elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntOps;

impl ElementOps<i32> for IntOps {
    #[inline]
    fn compare(&self, a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[inline]
    fn less(&self, a: &i32, b: &i32) -> bool {
        a < b
    }

    fn fmt(&self, value: &i32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{value}")
    }
}

/// Lexicographic comparison for string elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrOps;

impl<S: AsRef<str>> ElementOps<S> for StrOps {
    #[inline]
    fn compare(&self, a: &S, b: &S) -> Ordering {
        a.as_ref().cmp(b.as_ref())
    }

    fn fmt(&self, value: &S, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(value.as_ref())
    }
}

/// Plain function pointers, for element kinds without a dedicated ops type.
///
/// ```
/// use core::cmp::Ordering;
/// use pooled_collections::{FnOps, PolyArray};
///
/// #[derive(Clone, Default)]
/// struct Student {
///     name: &'static str,
///     gpa: f32,
/// }
///
/// let ops = FnOps {
///     compare: |a: &Student, b: &Student| a.gpa.total_cmp(&b.gpa),
///     less: |a: &Student, b: &Student| a.gpa < b.gpa,
///     print: |s: &Student, f| write!(f, "{}:{}", s.name, s.gpa),
/// };
///
/// let mut roster = PolyArray::new(2, ops);
/// roster.append(&[Student { name: "Mary", gpa: 4.0 }, Student { name: "Joe", gpa: 2.0 }])?;
/// roster.sort();
/// assert_eq!(roster.to_string(), "Joe:2 Mary:4");
/// # Ok::<(), pooled_collections::Error>(())
/// ```
pub struct FnOps<T> {
    /// Three-way comparison.
    pub compare: fn(&T, &T) -> Ordering,
    /// Strict ordering predicate.
    pub less: fn(&T, &T) -> bool,
    /// Element printer.
    pub print: fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl<T> Clone for FnOps<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FnOps<T> {}

impl<T> fmt::Debug for FnOps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOps").finish_non_exhaustive()
    }
}

impl<T> ElementOps<T> for FnOps<T> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.less)(a, b)
    }

    fn fmt(&self, value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.print)(value, f)
    }
}
