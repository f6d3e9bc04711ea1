//! Error type shared by every container.
//!
//! Only caller-contract violations are errors. A search that finds nothing
//! is an ordinary `None`.

/// The error type for container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An append needs more slots than the buffer has left.
    #[error("cannot append {requested} element(s), only {remaining} slot(s) remain")]
    CapacityExceeded {
        /// Elements the caller tried to append.
        requested: usize,
        /// Free slots at the time of the call.
        remaining: usize,
    },

    /// An index is at or past the bound the operation checks against: the
    /// element count for reads, the capacity for `set`.
    #[error("index {index} out of bounds (limit {bound})")]
    OutOfBounds {
        /// Index the caller passed.
        index: usize,
        /// First invalid index.
        bound: usize,
    },

    /// A source buffer holds fewer elements than the destination needs.
    #[error("source holds {actual} element(s), {expected} required")]
    LengthMismatch {
        /// Elements required.
        expected: usize,
        /// Elements available.
        actual: usize,
    },

    /// `top` or `pop` on an empty LIFO container.
    #[error("container is empty")]
    Empty,

    /// The node arena has no free slot.
    #[error("node arena exhausted (capacity {capacity})")]
    OutOfMemory {
        /// Slots in the arena.
        capacity: usize,
    },
}

/// The result type for container operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = Error::CapacityExceeded {
            requested: 3,
            remaining: 1,
        };
        assert_eq!(
            err.to_string(),
            "cannot append 3 element(s), only 1 slot(s) remain"
        );
        assert_eq!(Error::Empty.to_string(), "container is empty");
        assert_eq!(
            Error::OutOfMemory { capacity: 8 }.to_string(),
            "node arena exhausted (capacity 8)"
        );
    }
}
