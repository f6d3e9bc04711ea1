use crate::{Arena, Key};

/// Error during arena construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// Capacity is zero.
    #[error("capacity cannot be zero")]
    ZeroCapacity,
    /// Capacity needs more slots than the key type can address. The key's
    /// `NONE` value is reserved and never names a slot.
    #[error("capacity ({capacity}) exceeds the key type's limit ({max})")]
    CapacityOverflow {
        /// Requested slots.
        capacity: usize,
        /// Largest capacity the key type supports.
        max: usize,
    },
}

/// Builder for a fixed-capacity [`Arena`].
///
/// ```
/// use pooled_arena::{Arena, ArenaBuilder, ArenaError};
///
/// let arena: Arena<u64> = ArenaBuilder::new().capacity(64).build()?;
/// assert_eq!(arena.capacity(), 64);
///
/// let err = ArenaBuilder::new().capacity(300).build::<u64, u8>().unwrap_err();
/// assert_eq!(err, ArenaError::CapacityOverflow { capacity: 300, max: 255 });
/// # Ok::<(), ArenaError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ArenaBuilder {
    capacity: usize,
}

impl ArenaBuilder {
    /// Starts a builder with zero capacity; set one with [`capacity`](Self::capacity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots to pre-allocate. The arena never grows past it.
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = slots;
        self
    }

    /// Validates the configuration and allocates the arena.
    pub fn build<T, K: Key>(self) -> Result<Arena<T, K>, ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }

        let max = K::NONE.as_usize();
        if self.capacity > max {
            return Err(ArenaError::CapacityOverflow {
                capacity: self.capacity,
                max,
            });
        }

        Ok(Arena::allocate(self.capacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storage;

    #[test]
    fn zero_capacity() {
        let err = ArenaBuilder::new().build::<u64, u32>().unwrap_err();
        assert_eq!(err, ArenaError::ZeroCapacity);
        assert_eq!(err.to_string(), "capacity cannot be zero");
    }

    #[test]
    fn key_limit() {
        assert!(ArenaBuilder::new().capacity(255).build::<u8, u8>().is_ok());

        let err = ArenaBuilder::new()
            .capacity(256)
            .build::<u8, u8>()
            .unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityOverflow {
                capacity: 256,
                max: 255
            }
        );
    }

    #[test]
    fn built_arena_is_usable() {
        let mut arena: Arena<&str, u16> = ArenaBuilder::new().capacity(2).build().unwrap();
        let key = arena.try_insert("x").unwrap();
        assert_eq!(arena.get(key), Some(&"x"));
    }
}
