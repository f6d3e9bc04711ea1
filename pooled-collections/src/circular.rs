//! Circular singly linked list over a node arena.
//!
//! The nodes form a ring: the oldest node links back to the newest, which is
//! always the head. Walks are bounded by the node count, never by a
//! terminator.
//!
//! ```text
//!   head (newest) ──► ... ──► tail (oldest)
//!        ▲                          │
//!        └──────────────────────────┘
//! ```

use core::fmt;
use core::marker::PhantomData;

use pooled_arena::{Arena, Key, Storage};

use crate::{Error, Result};

/// A ring node.
#[derive(Debug)]
pub struct RingNode<T, K: Key = u32> {
    data: T,
    next: K,
}

/// Circular list owning its node storage.
///
/// ```
/// use pooled_collections::CircularList;
///
/// let mut ring: CircularList<i32> = CircularList::with_capacity(4);
/// ring.add(1)?;
/// ring.add(2)?;
/// ring.add(3)?;
///
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
///
/// assert_eq!(ring.remove(&2), Some(2));
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), [3, 1]);
/// # Ok::<(), pooled_collections::Error>(())
/// ```
pub struct CircularList<T, K: Key = u32, S = Arena<RingNode<T, K>, K>> {
    storage: S,
    /// Most recently added node.
    head: K,
    /// Oldest node; links back to `head`.
    tail: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key> CircularList<T, K> {
    /// Creates an empty ring with room for `capacity` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the key type.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(Arena::with_capacity(capacity))
    }
}

impl<T, K: Key, S> CircularList<T, K, S>
where
    S: Storage<RingNode<T, K>, Key = K>,
{
    /// Creates an empty ring over prepared node storage.
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Number of nodes in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the ring has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Node capacity of the underlying storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The most recently added element.
    pub fn head(&self) -> Option<&T> {
        self.storage.get(self.head).map(|node| &node.data)
    }

    /// Adds `value` as the new head.
    pub fn add(&mut self, value: T) -> Result<()> {
        let node = RingNode {
            data: value,
            next: self.head,
        };
        let key = self
            .storage
            .try_insert(node)
            .map_err(|_| Error::OutOfMemory {
                capacity: self.storage.capacity(),
            })?;

        if self.tail.is_none() {
            // Single node rings onto itself.
            // Safety: key was just inserted
            unsafe { self.storage.get_unchecked_mut(key) }.next = key;
            self.tail = key;
        } else {
            // Safety: tail is occupied while the ring is non-empty
            unsafe { self.storage.get_unchecked_mut(self.tail) }.next = key;
        }

        self.head = key;
        self.len += 1;
        Ok(())
    }

    /// Calls `func` on exactly [`len`](Self::len) elements, newest first.
    pub fn visit<F>(&self, func: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(func);
    }

    /// Walks the ring once, newest first.
    pub fn iter(&self) -> Iter<'_, T, K, S> {
        Iter {
            storage: &self.storage,
            cursor: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Removes the first node, walking from the head, whose element equals
    /// `value`, and returns its element.
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut prev = self.tail;
        let mut cur = self.head;

        for _ in 0..self.len {
            // Safety: every key on the ring is occupied
            let node = unsafe { self.storage.get_unchecked(cur) };
            if node.data == *value {
                return Some(self.unlink(prev, cur));
            }
            prev = cur;
            cur = node.next;
        }

        None
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        let mut cur = self.head;
        for _ in 0..self.len {
            // Safety: every key on the ring is occupied
            let node = unsafe { self.storage.remove_unchecked(cur) };
            cur = node.next;
        }

        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    /// Unlinks `key`, whose ring predecessor is `prev`, and frees its node.
    fn unlink(&mut self, prev: K, key: K) -> T {
        // Safety: caller found `key` on the ring
        let node = unsafe { self.storage.remove_unchecked(key) };
        self.len -= 1;

        if self.len == 0 {
            self.head = K::NONE;
            self.tail = K::NONE;
            return node.data;
        }

        // Safety: prev is on the ring and distinct from key
        unsafe { self.storage.get_unchecked_mut(prev) }.next = node.next;
        if key == self.head {
            self.head = node.next;
        }
        if key == self.tail {
            self.tail = prev;
        }

        node.data
    }
}

impl<'a, T, K: Key, S> IntoIterator for &'a CircularList<T, K, S>
where
    S: Storage<RingNode<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for CircularList<T, K, S>
where
    S: Storage<RingNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One lap around the ring, newest first.
pub struct Iter<'a, T, K: Key, S> {
    storage: &'a S,
    cursor: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, K: Key, S> Iterator for Iter<'a, T, K, S>
where
    S: Storage<RingNode<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: the lap visits only keys on the ring
        let node = unsafe { self.storage.get_unchecked(self.cursor) };
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, K: Key, S> ExactSizeIterator for Iter<'a, T, K, S> where
    S: Storage<RingNode<T, K>, Key = K>
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(values: &[i32]) -> CircularList<i32> {
        let mut ring = CircularList::with_capacity(16);
        for v in values {
            ring.add(*v).unwrap();
        }
        ring
    }

    fn collect(ring: &CircularList<i32>) -> Vec<i32> {
        ring.iter().copied().collect()
    }

    #[test]
    fn empty_ring() {
        let ring: CircularList<i32> = CircularList::with_capacity(2);
        assert!(ring.is_empty());
        assert_eq!(ring.head(), None);
        assert_eq!(ring.iter().next(), None);
    }

    #[test]
    fn single_node_rings_onto_itself() {
        let mut ring = ring_of(&[7]);
        assert_eq!(collect(&ring), [7]);
        assert_eq!(ring.remove(&7), Some(7));
        assert!(ring.is_empty());
        ring.add(8).unwrap();
        assert_eq!(collect(&ring), [8]);
    }

    #[test]
    fn visit_sees_exactly_len_newest_first() {
        let ring = ring_of(&[1, 2, 3, 4]);
        assert_eq!(ring.len(), 4);

        let mut seen = Vec::new();
        ring.visit(|v| seen.push(*v));
        assert_eq!(seen, [4, 3, 2, 1]);
        assert_eq!(ring.head(), Some(&4));
    }

    #[test]
    fn remove_head_middle_tail() {
        let mut ring = ring_of(&[1, 2, 3, 4, 5]);

        assert_eq!(ring.remove(&5), Some(5)); // head
        assert_eq!(collect(&ring), [4, 3, 2, 1]);

        assert_eq!(ring.remove(&1), Some(1)); // tail
        assert_eq!(collect(&ring), [4, 3, 2]);

        assert_eq!(ring.remove(&3), Some(3)); // middle
        assert_eq!(collect(&ring), [4, 2]);

        // links still ring correctly after surgery
        ring.add(6).unwrap();
        assert_eq!(collect(&ring), [6, 4, 2]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn remove_absent_is_none() {
        let mut ring = ring_of(&[1, 2]);
        assert_eq!(ring.remove(&9), None);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn remove_first_of_duplicates() {
        let mut ring = ring_of(&[5, 1, 5]);
        assert_eq!(ring.remove(&5), Some(5));
        assert_eq!(collect(&ring), [1, 5]);
    }

    #[test]
    fn exhaustion() {
        let mut ring: CircularList<i32> = CircularList::with_capacity(2);
        ring.add(1).unwrap();
        ring.add(2).unwrap();
        assert_eq!(ring.add(3), Err(Error::OutOfMemory { capacity: 2 }));
        assert_eq!(collect(&ring), [2, 1]);
    }

    #[test]
    fn clear_frees_every_node() {
        let mut ring: CircularList<String> = CircularList::with_capacity(3);
        for s in ["x", "y", "z"] {
            ring.add(s.to_string()).unwrap();
        }
        ring.clear();
        assert!(ring.is_empty());
        for s in ["a", "b", "c"] {
            ring.add(s.to_string()).unwrap();
        }
        assert_eq!(format!("{ring:?}"), r#"["c", "b", "a"]"#);
    }

    #[test]
    fn borrowed_elements_narrow_keys() {
        let line = String::from("ann bob cy");
        let mut ring: CircularList<&str, u16> =
            CircularList::with_storage(Arena::with_capacity(3));
        for name in line.split(' ') {
            ring.add(name).unwrap();
        }
        let mut walk = ring.iter();
        assert_eq!(walk.len(), 3);
        assert_eq!(walk.next(), Some(&"cy"));
        assert_eq!(walk.collect::<Vec<_>>(), [&"bob", &"ann"]);
    }
}
