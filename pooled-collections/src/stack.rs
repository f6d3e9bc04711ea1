//! Explicit LIFO stack over a node arena.
//!
//! Behaves like [`SList`](crate::SList) with a stack vocabulary: frames
//! link downwards from the top, and the top element can be edited in place.

use core::fmt;
use core::marker::PhantomData;

use pooled_arena::{Arena, Key, Storage};

use crate::{Error, Result};

/// A stack frame: the element and the key of the frame beneath it.
#[derive(Debug)]
pub struct StackFrame<T, K: Key = u32> {
    value: T,
    below: K,
}

/// LIFO stack owning its frame storage.
///
/// ```
/// use pooled_collections::Stack;
///
/// let mut stack: Stack<i32> = Stack::with_capacity(8);
/// stack.push(1)?;
/// stack.push(2)?;
/// *stack.top_mut()? += 40;
///
/// assert_eq!(stack.pop()?, 42);
/// assert_eq!(stack.pop()?, 1);
/// assert!(stack.pop().is_err());
/// # Ok::<(), pooled_collections::Error>(())
/// ```
pub struct Stack<T, K: Key = u32, S = Arena<StackFrame<T, K>, K>> {
    frames: S,
    top: K,
    depth: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key> Stack<T, K> {
    /// Creates an empty stack with room for `capacity` frames.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the key type.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(Arena::with_capacity(capacity))
    }
}

impl<T, K: Key, S> Stack<T, K, S>
where
    S: Storage<StackFrame<T, K>, Key = K>,
{
    /// Creates an empty stack over prepared frame storage.
    pub fn with_storage(frames: S) -> Self {
        Self {
            frames,
            top: K::NONE,
            depth: 0,
            _marker: PhantomData,
        }
    }

    /// Number of frames on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.depth
    }

    /// Returns `true` if nothing has been pushed, or everything was popped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Frame capacity of the underlying storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    /// Pushes `value` on top.
    pub fn push(&mut self, value: T) -> Result<()> {
        let frame = StackFrame {
            value,
            below: self.top,
        };
        match self.frames.try_insert(frame) {
            Ok(key) => {
                self.top = key;
                self.depth += 1;
                Ok(())
            }
            Err(_) => Err(Error::OutOfMemory {
                capacity: self.frames.capacity(),
            }),
        }
    }

    /// The top element.
    pub fn top(&self) -> Result<&T> {
        self.frames
            .get(self.top)
            .map(|frame| &frame.value)
            .ok_or(Error::Empty)
    }

    /// The top element, mutably.
    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.frames
            .get_mut(self.top)
            .map(|frame| &mut frame.value)
            .ok_or(Error::Empty)
    }

    /// Pops the top frame and returns its element.
    pub fn pop(&mut self) -> Result<T> {
        let frame = self.frames.remove(self.top).ok_or(Error::Empty)?;
        self.top = frame.below;
        self.depth -= 1;
        Ok(frame.value)
    }

    /// Iterates from the top down.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.top;
        core::iter::from_fn(move || {
            let frame = self.frames.get(cursor)?;
            cursor = frame.below;
            Some(&frame.value)
        })
    }

    /// Pops every frame.
    pub fn clear(&mut self) {
        while self.pop().is_ok() {}
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for Stack<T, K, S>
where
    S: Storage<StackFrame<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("depth", &self.depth)
            .field("top", &self.top().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_empty_only_before_push_and_after_all_pops() {
        let mut stack: Stack<u32> = Stack::with_capacity(4);
        assert!(stack.is_empty());

        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert!(!stack.is_empty());

        stack.pop().unwrap();
        assert!(!stack.is_empty());
        stack.pop().unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn empty_stack_errors() {
        let mut stack: Stack<u32> = Stack::with_capacity(1);
        assert_eq!(stack.top(), Err(Error::Empty));
        assert_eq!(stack.top_mut(), Err(Error::Empty));
        assert_eq!(stack.pop(), Err(Error::Empty));
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn pops_in_reverse_order() {
        let mut stack: Stack<String> = Stack::with_capacity(16);
        let words = ["alpha", "beta", "gamma", "delta"];
        for w in words {
            stack.push(w.to_string()).unwrap();
        }
        assert_eq!(stack.top().map(String::as_str), Ok("delta"));

        let top_down: Vec<&str> = stack.iter().map(String::as_str).collect();
        assert_eq!(top_down, ["delta", "gamma", "beta", "alpha"]);

        for w in words.iter().rev() {
            assert_eq!(stack.pop().unwrap(), *w);
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn full_stack() {
        let mut stack: Stack<u8, u8> = Stack::with_capacity(3);
        for i in 0..3 {
            stack.push(i).unwrap();
        }
        assert_eq!(stack.push(9), Err(Error::OutOfMemory { capacity: 3 }));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.capacity(), 3);
    }

    #[test]
    fn clear_then_reuse() {
        let mut stack: Stack<u32> = Stack::with_capacity(2);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.iter().count(), 0);
        stack.push(3).unwrap();
        stack.push(4).unwrap();
        assert_eq!(format!("{stack:?}"), "Stack { depth: 2, top: Some(4) }");
    }
}
