//! Singly linked LIFO list over a node arena.
//!
//! Nodes live in storage the list owns. `push` links a new head and `pop`
//! unlinks it, so node order is the reverse of insertion order.
//!
//! # Example
//!
//! ```
//! use pooled_collections::SList;
//!
//! let mut list: SList<&str> = SList::with_capacity(4);
//! list.push("a")?;
//! list.push("b")?;
//! list.push("c")?;
//!
//! let seen: Vec<_> = list.iter().copied().collect();
//! assert_eq!(seen, ["c", "b", "a"]);
//!
//! assert_eq!(list.pop()?, "c");
//! assert_eq!(list.top()?, &"b");
//! assert_eq!(list.len(), 2);
//! # Ok::<(), pooled_collections::Error>(())
//! ```

use core::fmt;
use core::marker::PhantomData;

use pooled_arena::{Arena, Key, Storage};

use crate::{Error, Result};

/// A list node: the element and the key of the next node.
#[derive(Debug)]
pub struct SListNode<T, K: Key = u32> {
    data: T,
    next: K,
}

/// Singly linked LIFO list owning its node storage.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `K`: Key type (default `u32`)
/// - `S`: Node storage (default [`Arena`])
pub struct SList<T, K: Key = u32, S = Arena<SListNode<T, K>, K>> {
    storage: S,
    head: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key> SList<T, K> {
    /// Creates an empty list whose arena holds `capacity` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the key type. Build the
    /// arena with [`ArenaBuilder`](pooled_arena::ArenaBuilder) and use
    /// [`with_storage`](SList::with_storage) to handle that as an error.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(Arena::with_capacity(capacity))
    }
}

impl<T, K: Key, S> SList<T, K, S>
where
    S: Storage<SListNode<T, K>, Key = K>,
{
    /// Creates an empty list over prepared node storage.
    ///
    /// The storage should be empty; nodes already in it are never visited.
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage,
            head: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Node capacity of the underlying storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Links `value` in as the new head.
    ///
    /// Fails with [`Error::OutOfMemory`] when the storage has no free slot;
    /// the value is dropped and the list is unchanged.
    pub fn push(&mut self, value: T) -> Result<()> {
        let node = SListNode {
            data: value,
            next: self.head,
        };
        let key = self
            .storage
            .try_insert(node)
            .map_err(|_| Error::OutOfMemory {
                capacity: self.storage.capacity(),
            })?;

        self.head = key;
        self.len += 1;
        Ok(())
    }

    /// Returns the head element.
    pub fn top(&self) -> Result<&T> {
        if self.head.is_none() {
            return Err(Error::Empty);
        }

        // Safety: head is occupied while the list is non-empty
        Ok(&unsafe { self.storage.get_unchecked(self.head) }.data)
    }

    /// Unlinks the head and returns its element.
    pub fn pop(&mut self) -> Result<T> {
        if self.head.is_none() {
            return Err(Error::Empty);
        }

        // Safety: head is occupied while the list is non-empty
        let node = unsafe { self.storage.remove_unchecked(self.head) };
        self.head = node.next;
        self.len -= 1;
        Ok(node.data)
    }

    /// Calls `func` on every element, head to tail.
    pub fn visit<F>(&self, func: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(func);
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> Iter<'_, T, K, S> {
        Iter {
            storage: &self.storage,
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Removes every element, releasing each node.
    pub fn clear(&mut self) {
        while self.pop().is_ok() {}
    }
}

impl<'a, T, K: Key, S> IntoIterator for &'a SList<T, K, S>
where
    S: Storage<SListNode<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for SList<T, K, S>
where
    S: Storage<SListNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over list elements, head to tail.
pub struct Iter<'a, T, K: Key, S> {
    storage: &'a S,
    next: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, K: Key, S> Iterator for Iter<'a, T, K, S>
where
    S: Storage<SListNode<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_none() {
            return None;
        }

        // Safety: every link reachable from head is occupied
        let node = unsafe { self.storage.get_unchecked(self.next) };
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, K: Key, S> ExactSizeIterator for Iter<'a, T, K, S> where
    S: Storage<SListNode<T, K>, Key = K>
{
}
