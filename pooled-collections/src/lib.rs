//! Fixed-capacity containers and the algorithms that run over them.
//!
//! Every container fixes its capacity at construction and never grows.
//! Buffers hold a single boxed slice (or a caller's slice); linked
//! containers and the tree draw nodes from a [`pooled_arena::Arena`] they
//! own, linking them by key.
//!
//! ```text
//! algo (slice algorithms)
//!     └── Array / PolyArray   - contiguous, owned or attached
//!
//! Arena (pooled-arena)
//!     ├── SList / Stack       - LIFO, head insertion
//!     ├── CircularList        - ring, newest first
//!     └── Tree                - unbalanced BST, two duplicate policies
//! ```
//!
//! # Quick Start
//!
//! ```
//! use pooled_collections::{Array, Duplicates, Stack, Tree};
//!
//! let mut arr = Array::with_capacity(4);
//! arr.append(&[3, 1, 2])?;
//! arr.sort();
//! assert_eq!(arr.as_slice(), &[1, 2, 3]);
//!
//! let mut stack: Stack<&str> = Stack::with_capacity(4);
//! stack.push("a")?;
//! assert_eq!(stack.pop()?, "a");
//!
//! let mut tree = Tree::with_capacity(8, Duplicates::Allow);
//! tree.insert(5)?;
//! tree.insert(5)?;
//! assert_eq!(tree.count_of(&5), 2);
//! # Ok::<(), pooled_collections::Error>(())
//! ```
//!
//! # Errors
//!
//! Contract violations (append past capacity, index past the bound, pop
//! from an empty stack, exhausted arena) are [`Error`]s. Lookups that find
//! nothing return `None`.
//!
//! # Feature Flags
//!
//! - `slab` - Use `slab::Slab` as node storage (`with_storage`)

#![warn(missing_docs)]

pub mod algo;
mod array;
pub mod circular;
mod error;
mod ops;
mod polyarray;
pub mod slist;
pub mod stack;
pub mod tree;

pub use array::Array;
pub use circular::CircularList;
pub use error::{Error, Result};
pub use ops::{Comparator, ElementOps, FnOps, IntOps, Natural, StrOps};
pub use polyarray::PolyArray;
pub use slist::SList;
pub use stack::Stack;
pub use tree::{Duplicates, Order, Tree};

pub use pooled_arena::{Arena, ArenaBuilder, ArenaError, Key, Storage};
