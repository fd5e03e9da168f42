//! Exclusive ownership of a replaceable GPU-side resource.

/// Releases the GPU memory behind a resource. Consumes it, so a disposed
/// handle cannot be used again.
pub trait Dispose {
    fn dispose(self);
}

/// Holds exactly one live resource. `install` swaps in a fully built
/// replacement and disposes the previous one in the same call, so readers
/// never observe an empty or half-built slot.
pub struct ResourceSlot<T: Dispose> {
    current: T,
    generation: u64,
}

impl<T: Dispose> ResourceSlot<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            generation: 0,
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.current
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.current
    }

    /// Bumped on every install; lets dependants detect stale bindings.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn install(&mut self, next: T) -> u64 {
        let old = std::mem::replace(&mut self.current, next);
        old.dispose();
        self.generation += 1;
        self.generation
    }
}
