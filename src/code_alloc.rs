/// Hands out dictionary codes in strictly increasing order up to a fixed capacity.
///
/// Unlike an ID pool, freed codes are never reused: the decoder rebuilds the
/// dictionary by counting, so a recycled code would desynchronize it.
#[derive(Debug, Clone)]
pub(crate) struct CodeAllocator {
    next: u32,
    capacity: u32,
}

impl CodeAllocator {
    /// Creates an allocator starting from code 0.
    pub(crate) fn new(capacity: u32) -> Self {
        Self { next: 0, capacity }
    }

    /// Returns the next code. Callers check `is_exhausted` first.
    pub(crate) fn allocate(&mut self) -> u32 {
        assert!(!self.is_exhausted(), "Code space exhausted");
        let code = self.next;
        self.next += 1;
        code
    }

    /// Moves the counter forward to `next` without handing codes out.
    pub(crate) fn skip_to(&mut self, next: u32) {
        assert!(next <= self.capacity, "Cannot skip past capacity");
        self.next = self.next.max(next);
    }

    pub(crate) fn next(&self) -> u32 {
        self.next
    }

    pub(crate) fn capacity(&self) -> u32 {
        self.capacity
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.next >= self.capacity
    }
}
