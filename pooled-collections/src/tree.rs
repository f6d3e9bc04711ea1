//! Unbalanced binary search tree over a node arena.
//!
//! Nodes live in storage the tree owns and link to their children and parent
//! by key. Ordering comes from a [`Comparator`]; there is no rebalancing, so
//! sorted input degrades the tree to a list. Every walk and every structural
//! edit is iterative, so depth is bounded by the arena, not the call stack.
//!
//! # Duplicate Policies
//!
//! | Policy | Equal key on insert | `count_of` |
//! |--------|---------------------|------------|
//! | [`Duplicates::Count`] | bumps the existing node's count | the node's count |
//! | [`Duplicates::Allow`] | new node in the right subtree | number of equal nodes |
//!
//! In both modes the left subtree of a node holds strictly smaller keys.
//!
//! # Example
//!
//! ```
//! use pooled_collections::{Duplicates, Tree};
//!
//! let mut tree = Tree::with_capacity(16, Duplicates::Count);
//! for v in [6, 3, 44, 1, 30, 44] {
//!     tree.insert(v)?;
//! }
//!
//! assert_eq!(tree.len(), 6);
//! assert_eq!(tree.node_count(), 5);
//! assert_eq!(tree.count_of(&44), 2);
//!
//! assert_eq!(tree.remove(&44), Some(44));
//! assert_eq!(tree.find(&44), None);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 6, 30]);
//! # Ok::<(), pooled_collections::Error>(())
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use pooled_arena::{Arena, Key, Storage};

use crate::{Comparator, Error, Natural, Result};

/// What an insert does with a key that is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Duplicates {
    /// Keep one node per distinct key and count the repeats.
    #[default]
    Count,
    /// Store every insertion in its own node.
    Allow,
}

/// Traversal order for [`Tree::traverse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, node, right subtree. Ascending key order.
    In,
    /// Left subtree, right subtree, then node.
    Post,
}

/// A tree node.
#[derive(Debug)]
pub struct TreeNode<T, K: Key = u32> {
    data: T,
    left: K,
    right: K,
    parent: K,
    /// Logical insertions collapsed onto this node. Always 1 under
    /// [`Duplicates::Allow`].
    count: usize,
}

/// Binary search tree owning its node storage.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `C`: Comparator (default [`Natural`], which uses `Ord`)
/// - `K`: Key type (default `u32`)
/// - `S`: Node storage (default [`Arena`])
pub struct Tree<T, C = Natural, K: Key = u32, S = Arena<TreeNode<T, K>, K>> {
    storage: S,
    root: K,
    /// Logical insertions, counting duplicates.
    len: usize,
    nodes: usize,
    comparator: C,
    policy: Duplicates,
    _marker: PhantomData<T>,
}

impl<T: Ord> Tree<T> {
    /// Creates an empty tree ordered by `Ord`, with room for `capacity`
    /// nodes.
    ///
    /// Uses `u32` keys; build other trees with
    /// [`with_storage`](Tree::with_storage).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the key type.
    pub fn with_capacity(capacity: usize, policy: Duplicates) -> Self {
        Self::with_storage(Arena::with_capacity(capacity), policy, Natural)
    }
}

impl<T, C: Comparator<T>> Tree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// ```
    /// use pooled_collections::{Duplicates, Tree};
    ///
    /// let mut tree = Tree::with_comparator(8, Duplicates::Allow, |a: &i32, b: &i32| b.cmp(a));
    /// for v in [1, 3, 2] {
    ///     tree.insert(v)?;
    /// }
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// # Ok::<(), pooled_collections::Error>(())
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the key type.
    pub fn with_comparator(capacity: usize, policy: Duplicates, comparator: C) -> Self {
        Self::with_storage(Arena::with_capacity(capacity), policy, comparator)
    }
}

impl<T, C, K: Key, S> Tree<T, C, K, S>
where
    C: Comparator<T>,
    S: Storage<TreeNode<T, K>, Key = K>,
{
    /// Creates an empty tree over prepared node storage.
    pub fn with_storage(storage: S, policy: Duplicates, comparator: C) -> Self {
        Self {
            storage,
            root: K::NONE,
            len: 0,
            nodes: 0,
            comparator,
            policy,
            _marker: PhantomData,
        }
    }

    /// Logical element count. Under [`Duplicates::Count`] every repeat
    /// insertion counts.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Node capacity of the underlying storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The duplicate policy fixed at construction.
    #[inline]
    pub fn policy(&self) -> Duplicates {
        self.policy
    }

    /// The comparator fixed at construction.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Inserts `value`.
    ///
    /// Under [`Duplicates::Count`] an equal key bumps the existing node's
    /// count and `value` is dropped. Fails with [`Error::OutOfMemory`] when
    /// a node is needed and the storage is full; the tree is unchanged.
    pub fn insert(&mut self, value: T) -> Result<()> {
        let mut parent = K::NONE;
        let mut go_left = false;
        let mut cur = self.root;

        while cur.is_some() {
            // Safety: every reachable link is occupied
            let node = unsafe { self.storage.get_unchecked_mut(cur) };
            parent = cur;
            match self.comparator.compare(&value, &node.data) {
                Ordering::Less => {
                    go_left = true;
                    cur = node.left;
                }
                Ordering::Equal if self.policy == Duplicates::Count => {
                    node.count += 1;
                    self.len += 1;
                    return Ok(());
                }
                _ => {
                    go_left = false;
                    cur = node.right;
                }
            }
        }

        let node = TreeNode {
            data: value,
            left: K::NONE,
            right: K::NONE,
            parent,
            count: 1,
        };
        let key = self
            .storage
            .try_insert(node)
            .map_err(|_| Error::OutOfMemory {
                capacity: self.storage.capacity(),
            })?;

        if parent.is_none() {
            self.root = key;
        } else {
            // Safety: parent was reached by the descent above
            let parent = unsafe { self.storage.get_unchecked_mut(parent) };
            if go_left {
                parent.left = key;
            } else {
                parent.right = key;
            }
        }

        self.len += 1;
        self.nodes += 1;
        Ok(())
    }

    /// Returns the stored element equal to `value`.
    pub fn find(&self, value: &T) -> Option<&T> {
        let key = self.find_key(value);
        self.storage.get(key).map(|node| &node.data)
    }

    /// Returns `true` if an element equal to `value` is stored.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.find_key(value).is_some()
    }

    /// Logical occurrences of `value`: the duplicate count under
    /// [`Duplicates::Count`], the number of equal nodes under
    /// [`Duplicates::Allow`].
    pub fn count_of(&self, value: &T) -> usize {
        // Equal keys never sit in a left subtree, so every match lies on the
        // search path that turns right at each match.
        let mut total = 0;
        let mut cur = self.root;

        while cur.is_some() {
            // Safety: every reachable link is occupied
            let node = unsafe { self.storage.get_unchecked(cur) };
            match self.comparator.compare(value, &node.data) {
                Ordering::Less => cur = node.left,
                Ordering::Greater => cur = node.right,
                Ordering::Equal => {
                    total += node.count;
                    cur = node.right;
                }
            }
        }

        total
    }

    /// Removes one node whose key equals `value` and returns its element.
    ///
    /// [`len`](Self::len) drops by that node's duplicate count. A node with
    /// two children takes over its in-order successor's element and count,
    /// and the successor's node is released instead.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let key = self.find_key(value);
        if key.is_none() {
            tracing::trace!(len = self.len, "tree removal miss");
            return None;
        }

        // Safety: find_key returns occupied keys only
        let (left, right, count) = {
            let node = unsafe { self.storage.get_unchecked(key) };
            (node.left, node.right, node.count)
        };
        self.len -= count;
        self.nodes -= 1;

        if left.is_some() && right.is_some() {
            let successor = self.min_key(right);
            // Safety: min_key walks reachable links only
            let successor_right = unsafe { self.storage.get_unchecked(successor) }.right;
            self.splice(successor, successor_right);

            // Safety: successor is still occupied, only unlinked
            let moved = unsafe { self.storage.remove_unchecked(successor) };
            // Safety: key is still linked and occupied
            let target = unsafe { self.storage.get_unchecked_mut(key) };
            target.count = moved.count;
            return Some(core::mem::replace(&mut target.data, moved.data));
        }

        let child = if left.is_some() { left } else { right };
        self.splice(key, child);
        // Safety: key was unlinked above but never released
        Some(unsafe { self.storage.remove_unchecked(key) }.data)
    }

    /// Smallest element.
    pub fn min(&self) -> Option<&T> {
        if self.root.is_none() {
            return None;
        }
        let key = self.min_key(self.root);
        self.storage.get(key).map(|node| &node.data)
    }

    /// Largest element.
    pub fn max(&self) -> Option<&T> {
        let mut cur = self.root;
        let mut last = None;
        while let Some(node) = self.storage.get(cur) {
            last = Some(&node.data);
            cur = node.right;
        }
        last
    }

    /// Number of nodes on the longest root-to-leaf path. 0 when empty.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if self.root.is_some() {
            stack.push((self.root, 1));
        }

        while let Some((key, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            // Safety: only reachable links are pushed
            let node = unsafe { self.storage.get_unchecked(key) };
            for child in [node.left, node.right] {
                if child.is_some() {
                    stack.push((child, depth + 1));
                }
            }
        }

        deepest
    }

    /// Calls `visit` once per node in the given order. Under
    /// [`Duplicates::Count`] a repeated key is visited once.
    pub fn traverse<F>(&self, order: Order, mut visit: F)
    where
        F: FnMut(&T),
    {
        self.walk(order, |key| {
            // Safety: walk yields reachable links only
            visit(&unsafe { self.storage.get_unchecked(key) }.data);
        });
    }

    /// In-order iterator. Under [`Duplicates::Count`] a repeated key is
    /// yielded once.
    pub fn iter(&self) -> Iter<'_, T, K, S> {
        Iter {
            storage: &self.storage,
            stack: Vec::new(),
            cursor: self.root,
            remaining: self.nodes,
            _marker: PhantomData,
        }
    }

    /// Releases every node, children before parents.
    pub fn clear(&mut self) {
        let mut keys = Vec::with_capacity(self.nodes);
        self.walk(Order::Post, |key| keys.push(key));
        for key in keys {
            // Safety: each node is released exactly once
            drop(unsafe { self.storage.remove_unchecked(key) });
        }

        self.root = K::NONE;
        self.len = 0;
        self.nodes = 0;
    }

    fn find_key(&self, value: &T) -> K {
        let mut cur = self.root;
        while cur.is_some() {
            // Safety: every reachable link is occupied
            let node = unsafe { self.storage.get_unchecked(cur) };
            cur = match self.comparator.compare(value, &node.data) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return cur,
            };
        }
        K::NONE
    }

    /// Leftmost key of the subtree at `key`, which must be occupied.
    fn min_key(&self, mut key: K) -> K {
        loop {
            // Safety: caller passes an occupied key; left links are reachable
            let left = unsafe { self.storage.get_unchecked(key) }.left;
            if left.is_none() {
                return key;
            }
            key = left;
        }
    }

    /// Replaces `key` with `child` (possibly `NONE`) in its parent's slot,
    /// or at the root. Leaves the node at `key` occupied.
    fn splice(&mut self, key: K, child: K) {
        // Safety: key is occupied
        let parent = unsafe { self.storage.get_unchecked(key) }.parent;

        if child.is_some() {
            // Safety: child is a linked node
            unsafe { self.storage.get_unchecked_mut(child) }.parent = parent;
        }

        if parent.is_none() {
            self.root = child;
            return;
        }

        // Safety: parent back-references are always occupied
        let parent = unsafe { self.storage.get_unchecked_mut(parent) };
        if parent.left == key {
            parent.left = child;
        } else {
            parent.right = child;
        }
    }

    /// Iterative walk over node keys.
    fn walk<F>(&self, order: Order, mut f: F)
    where
        F: FnMut(K),
    {
        if self.root.is_none() {
            return;
        }

        // Safety (all three arms): only reachable links are pushed
        let node = |key: K| unsafe { self.storage.get_unchecked(key) };
        let mut stack = Vec::new();

        match order {
            Order::Pre => {
                stack.push(self.root);
                while let Some(key) = stack.pop() {
                    f(key);
                    let n = node(key);
                    if n.right.is_some() {
                        stack.push(n.right);
                    }
                    if n.left.is_some() {
                        stack.push(n.left);
                    }
                }
            }
            Order::In => {
                let mut cur = self.root;
                loop {
                    while cur.is_some() {
                        stack.push(cur);
                        cur = node(cur).left;
                    }
                    let Some(key) = stack.pop() else { break };
                    f(key);
                    cur = node(key).right;
                }
            }
            Order::Post => {
                let mut cur = self.root;
                let mut last = K::NONE;
                loop {
                    while cur.is_some() {
                        stack.push(cur);
                        cur = node(cur).left;
                    }
                    let Some(&top) = stack.last() else { break };
                    let right = node(top).right;
                    if right.is_some() && right != last {
                        cur = right;
                    } else {
                        f(top);
                        last = top;
                        stack.pop();
                    }
                }
            }
        }
    }
}

impl<'a, T, C, K: Key, S> IntoIterator for &'a Tree<T, C, K, S>
where
    C: Comparator<T>,
    S: Storage<TreeNode<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C, K: Key, S> fmt::Debug for Tree<T, C, K, S>
where
    C: Comparator<T>,
    S: Storage<TreeNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("policy", &self.policy)
            .field("len", &self.len)
            .field("elements", &DebugInOrder(self))
            .finish()
    }
}

struct DebugInOrder<'a, T, C, K: Key, S>(&'a Tree<T, C, K, S>);

impl<T: fmt::Debug, C, K: Key, S> fmt::Debug for DebugInOrder<'_, T, C, K, S>
where
    C: Comparator<T>,
    S: Storage<TreeNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// In-order iterator over tree elements.
pub struct Iter<'a, T, K: Key, S> {
    storage: &'a S,
    stack: Vec<K>,
    cursor: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, K: Key, S> Iterator for Iter<'a, T, K, S>
where
    S: Storage<TreeNode<T, K>, Key = K>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor.is_some() {
            self.stack.push(self.cursor);
            // Safety: every reachable link is occupied
            self.cursor = unsafe { self.storage.get_unchecked(self.cursor) }.left;
        }

        let key = self.stack.pop()?;
        // Safety: only reachable links are pushed
        let node = unsafe { self.storage.get_unchecked(key) };
        self.cursor = node.right;
        self.remaining -= 1;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, K: Key, S> ExactSizeIterator for Iter<'a, T, K, S> where
    S: Storage<TreeNode<T, K>, Key = K>
{
}
