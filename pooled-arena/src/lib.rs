//! Fixed-capacity slot arena with stable keys.
//!
//! This crate is the allocator underneath the `pooled-collections`
//! containers. All node memory is reserved up front; inserting hands out a
//! stable [`Key`], removing frees the slot for reuse. The arena never grows;
//! running out of slots is an ordinary `Err`.
//!
//! ```text
//! Arena (owns values, stable keys)
//!     │
//!     ├── SList / Stack / CircularList  - link nodes by key
//!     └── Tree                          - child links + parent back-reference by key
//! ```
//!
//! # Quick Start
//!
//! ```
//! use pooled_arena::{Arena, Storage};
//!
//! let mut arena: Arena<u64> = Arena::with_capacity(1000);
//!
//! let key = arena.try_insert(42).unwrap();
//! assert_eq!(arena.get(key), Some(&42));
//! assert_eq!(arena.remove(key), Some(42));
//! ```
//!
//! # Storage Options
//!
//! | Storage | Capacity | Allocation | Use Case |
//! |---------|----------|------------|----------|
//! | [`Arena`] | Fixed (runtime) | Once, at construction | Default choice |
//! | `slab::Slab` | Growable | May reallocate | When size unknown |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

mod arena;
mod builder;
pub mod key;
pub mod storage;

pub use arena::{Arena, Full};
pub use builder::{ArenaBuilder, ArenaError};
pub use key::Key;
pub use storage::Storage;
